//! Macropad - USB macro keypad firmware
//!
//! Main firmware binary for STM32F411 "Black Pill" boards. Five keys and a
//! quadrature encoder type configurable strings over USB HID, while a
//! serial console on USART2 shows the live input state.

#![no_std]
#![no_main]

use core::sync::atomic::AtomicU8;

use defmt::*;
use embassy_executor::Spawner;
use embassy_stm32::peripherals::{USART2, USB_OTG_FS};
use embassy_stm32::timer::qei::QeiPin;
use embassy_stm32::usart::{BufferedInterruptHandler, BufferedUart};
use embassy_stm32::{bind_interrupts, usb};
use embassy_time::Delay;
use embassy_usb::class::hid::{HidBootProtocol, HidSubclass, HidWriter, State};
use embassy_usb::Builder;
use static_cell::StaticCell;
use usbd_hid::descriptor::{KeyboardReport, SerializedDescriptor};
use {defmt_rtt as _, panic_probe as _};

use macropad_core::config::{parse_config, MacropadConfig};
use macropad_core::console::{Command, Console, DEMO_COMMANDS};
use macropad_core::hid::Typist;
use macropad_core::input::{InputEngine, LineId};
use macropad_core::keymap::Keymap;
use macropad_core::screen::StatusScreen;
use macropad_core::transport::{ring_storage, RingBuffer, SerialTransport};
use macropad_hal::REPORT_LEN;
use macropad_hal_stm32::{usart_config, EncoderCounter, KeyPin};

use crate::commands::StatsCommand;
use crate::serial::ChannelTx;
use crate::tasks::{UsbDriver, UsbKeyboard};

mod channels;
mod commands;
mod serial;
mod tasks;

/// Embedded configuration (compiled into firmware)
/// Edit keypad.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../keypad.toml");

/// Largest rings the configuration may ask for
const RX_CAPACITY: usize = 256;
const TX_CAPACITY: usize = 1024;

/// Driver-side UART buffers
const UART_BUF_SIZE: usize = 64;

bind_interrupts!(struct Irqs {
    USART2 => BufferedInterruptHandler<USART2>;
    OTG_FS => usb::InterruptHandler<USB_OTG_FS>;
});

// Transport ring storage
static RX_STORAGE: [AtomicU8; RX_CAPACITY] = ring_storage();
static TX_STORAGE: [AtomicU8; TX_CAPACITY] = ring_storage();

// Static cells for buffers and state shared with tasks (must live forever)
static TRANSPORT: StaticCell<SerialTransport<'static>> = StaticCell::new();
static UART_TX_BUF: StaticCell<[u8; UART_BUF_SIZE]> = StaticCell::new();
static UART_RX_BUF: StaticCell<[u8; UART_BUF_SIZE]> = StaticCell::new();
static STATS: StaticCell<StatsCommand> = StaticCell::new();
static COMMANDS: StaticCell<[Command<'static>; 4]> = StaticCell::new();

// USB descriptors and endpoint buffers
static EP_OUT_BUFFER: StaticCell<[u8; 256]> = StaticCell::new();
static CONFIG_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static BOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static CONTROL_BUF: StaticCell<[u8; 64]> = StaticCell::new();
static HID_STATE: StaticCell<State<'static>> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Macropad firmware starting...");

    let p = embassy_stm32::init(clock_config());
    info!("Peripherals initialized");

    let config = load_config();

    // Serial transport over the shared rings
    let rx_len = (config.transport.rx_capacity as usize).clamp(2, RX_CAPACITY);
    let tx_len = (config.transport.tx_capacity as usize).clamp(2, TX_CAPACITY);
    let rx_ring = unwrap!(RingBuffer::init(&RX_STORAGE[..rx_len]));
    let tx_ring = unwrap!(RingBuffer::init(&TX_STORAGE[..tx_len]));
    let transport: &'static SerialTransport<'static> = TRANSPORT.init(
        SerialTransport::new(rx_ring, tx_ring).with_chunk(config.transport.tx_chunk as usize),
    );
    info!(
        "Transport rings: rx={} tx={} chunk={}",
        rx_len, tx_len, config.transport.tx_chunk
    );

    // USART2 for the console (PA2 TX, PA3 RX)
    let uart_config = usart_config(&config.transport.uart_config());
    let uart = unwrap!(BufferedUart::new(
        p.USART2,
        p.PA3,
        p.PA2,
        UART_TX_BUF.init([0u8; UART_BUF_SIZE]),
        UART_RX_BUF.init([0u8; UART_BUF_SIZE]),
        Irqs,
        uart_config,
    ));
    let (uart_tx, uart_rx) = uart.split();

    info!("UART initialized: {:?}", config.transport.uart_config());

    // Keys are active low with pull-ups
    let keys = [
        KeyPin::new(p.PA0),
        KeyPin::new(p.PA1),
        KeyPin::new(p.PA4),
        KeyPin::new(p.PB0),
        KeyPin::new(p.PB1),
    ];
    let ids = keys.each_ref().map(|key| LineId::new(key.port_letter(), key.pin()));

    // Encoder on TIM3 (PA6 / PA7) in encoder mode
    let encoder = EncoderCounter::new(p.TIM3, QeiPin::new_ch1(p.PA6), QeiPin::new_ch2(p.PA7));

    let input = InputEngine::new(keys, ids, encoder, &config.input);

    info!("Keys and encoder initialized");

    // USB HID keyboard
    let mut usb_driver_config = usb::Config::default();
    usb_driver_config.vbus_detection = false;
    let driver: UsbDriver = usb::Driver::new_fs(
        p.USB_OTG_FS,
        Irqs,
        p.PA12,
        p.PA11,
        EP_OUT_BUFFER.init([0u8; 256]),
        usb_driver_config,
    );

    let mut usb_config = embassy_usb::Config::new(0xc0de, 0xcafe);
    usb_config.manufacturer = Some("Macropad");
    usb_config.product = Some("Macropad Keyboard");
    usb_config.serial_number = Some("00000001");
    usb_config.max_power = 100;
    usb_config.max_packet_size_0 = 64;

    let mut builder = Builder::new(
        driver,
        usb_config,
        CONFIG_DESCRIPTOR.init([0u8; 256]),
        BOS_DESCRIPTOR.init([0u8; 256]),
        &mut [],
        CONTROL_BUF.init([0u8; 64]),
    );

    let hid_config = embassy_usb::class::hid::Config {
        report_descriptor: KeyboardReport::desc(),
        request_handler: None,
        poll_ms: 10,
        max_packet_size: REPORT_LEN as u16,
        hid_subclass: HidSubclass::Boot,
        hid_boot_protocol: HidBootProtocol::Keyboard,
    };
    let writer = HidWriter::<_, REPORT_LEN>::new(
        &mut builder,
        HID_STATE.init(State::new()),
        hid_config,
    );
    let usb_device = builder.build();
    let typist = Typist::new(UsbKeyboard::new(writer), Delay, config.hid.report_delay_ms);

    info!("USB HID keyboard initialized");

    // Console with the demo commands plus transport stats
    let stats: &'static StatsCommand = STATS.init(StatsCommand::new(transport));
    let commands = COMMANDS.init([
        DEMO_COMMANDS[0],
        DEMO_COMMANDS[1],
        DEMO_COMMANDS[2],
        Command::new("stats", stats),
    ]);
    let console = Console::new(
        transport,
        ChannelTx,
        StatusScreen::new(),
        commands,
        config.console,
    );

    let keymap = Keymap::new(config.keymap);
    let scan_interval_ms = config.input.scan_interval_ms;

    // Spawn tasks
    spawner.spawn(tasks::usb_task(usb_device)).unwrap();
    spawner.spawn(tasks::hid_task(typist)).unwrap();
    spawner.spawn(tasks::uart_rx_task(uart_rx, transport)).unwrap();
    spawner.spawn(tasks::uart_tx_task(uart_tx, transport)).unwrap();
    spawner
        .spawn(tasks::foreground_task(console, input, keymap, scan_interval_ms))
        .unwrap();

    info!("All tasks spawned, firmware running");

    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!(
            "Main loop heartbeat (rx dropped {}, tx dropped {})",
            transport.dropped_rx(),
            transport.dropped_tx()
        );
    }
}

/// 25 MHz HSE to a 96 MHz core clock with the 48 MHz USB clock
fn clock_config() -> embassy_stm32::Config {
    use embassy_stm32::rcc::*;
    use embassy_stm32::time::Hertz;

    let mut config = embassy_stm32::Config::default();
    config.rcc.hse = Some(Hse {
        freq: Hertz(25_000_000),
        mode: HseMode::Oscillator,
    });
    config.rcc.pll_src = PllSource::HSE;
    config.rcc.pll = Some(Pll {
        prediv: PllPreDiv::DIV25,
        mul: PllMul::MUL192,
        divp: Some(PllPDiv::DIV2),
        divq: Some(PllQDiv::DIV4),
        divr: None,
    });
    config.rcc.ahb_pre = AHBPrescaler::DIV1;
    config.rcc.apb1_pre = APBPrescaler::DIV2;
    config.rcc.apb2_pre = APBPrescaler::DIV1;
    config.rcc.sys = Sysclk::PLL1_P;
    config.rcc.mux.clk48sel = mux::Clk48sel::PLL1_Q;
    config
}

/// Parse the embedded configuration, falling back to defaults
fn load_config() -> MacropadConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Loaded embedded configuration");
            config
        }
        Err(e) => {
            error!("Embedded configuration invalid ({:?}), using defaults", e);
            MacropadConfig::new()
        }
    }
}
