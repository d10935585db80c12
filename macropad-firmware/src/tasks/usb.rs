//! USB device task and HID keyboard endpoint

use defmt::*;
use embassy_stm32::peripherals::USB_OTG_FS;
use embassy_stm32::usb::Driver;
use embassy_usb::class::hid::HidWriter;
use embassy_usb::driver::EndpointError;
use embassy_usb::UsbDevice;

use macropad_hal::{HidReportSink, REPORT_LEN};

/// USB full-speed driver for the on-chip OTG peripheral
pub type UsbDriver = Driver<'static, USB_OTG_FS>;

/// Boot keyboard input endpoint
pub struct UsbKeyboard {
    writer: HidWriter<'static, UsbDriver, REPORT_LEN>,
}

impl UsbKeyboard {
    pub fn new(writer: HidWriter<'static, UsbDriver, REPORT_LEN>) -> Self {
        Self { writer }
    }

    /// Wait until the host has configured the device
    pub async fn ready(&mut self) {
        self.writer.ready().await;
    }
}

impl HidReportSink for UsbKeyboard {
    type Error = EndpointError;

    async fn send_report(&mut self, report: &[u8; REPORT_LEN]) -> Result<(), EndpointError> {
        self.writer.write(report).await
    }
}

/// Runs the USB device state machine
#[embassy_executor::task]
pub async fn usb_task(mut device: UsbDevice<'static, UsbDriver>) -> ! {
    info!("USB task started");
    device.run().await
}
