//! HID typing task
//!
//! Types each string queued on [`TYPE_CHANNEL`] as keyboard reports.

use defmt::*;
use embassy_time::Delay;

use macropad_core::hid::Typist;

use crate::channels::TYPE_CHANNEL;

use super::usb::UsbKeyboard;

pub type KeypadTypist = Typist<UsbKeyboard, Delay>;

#[embassy_executor::task]
pub async fn hid_task(mut typist: KeypadTypist) {
    info!("HID task started");

    loop {
        let text = TYPE_CHANNEL.receive().await;

        typist.sink_mut().ready().await;
        debug!("Typing \"{}\"", text.as_str());

        match typist.type_text(&text).await {
            Ok(count) => trace!("Typed {} characters", count),
            // A report the host never took leaves a key held down
            Err(e) => defmt::panic!("HID report failed: {:?}", e),
        }
    }
}
