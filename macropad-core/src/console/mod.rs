//! Line console
//!
//! Reads bytes from the inbound ring, assembles a line and dispatches it to
//! the command table. Keystrokes are echoed at the input position after the
//! prompt; results go to the message line or straight to the terminal.
//!
//! ```text
//! rx ring ──▶ Console::poll ──▶ process_char ──▶ CommandTable ──▶ Action
//!                                   │                              │
//!                                   └── echo / Screen ──▶ Output ◀─┘
//!                                                           │
//!                                                        tx ring
//! ```

pub mod commands;
pub mod line;
pub mod writer;

pub use commands::{Action, Command, CommandTable, DEMO_COMMANDS};
pub use line::{LineBuffer, LossyText, LINE_CAPACITY, MAX_LINE_LEN};
pub use writer::{write_to_string, BufferOutput, ConsoleWriter, Output, EMIT_CAPACITY};

use heapless::String;
use macropad_hal::UartTx;

use crate::config::ConsoleConfig;
use crate::screen::Screen;
use crate::transport::SerialTransport;

/// Control bytes the console reacts to
pub mod keys {
    pub const BS: u8 = 8;
    pub const LF: u8 = b'\n';
    pub const CR: u8 = b'\r';
    pub const ESC: u8 = 27;
    pub const DEL: u8 = 127;
}

/// Line-oriented command console
pub struct Console<'a, T: UartTx, S: Screen> {
    transport: &'a SerialTransport<'a>,
    tx: T,
    screen: S,
    commands: CommandTable<'a>,
    line: LineBuffer,
    layout: ConsoleConfig,
}

impl<'a, T: UartTx, S: Screen> Console<'a, T, S> {
    pub fn new(
        transport: &'a SerialTransport<'a>,
        tx: T,
        screen: S,
        commands: &'a [Command<'a>],
        layout: ConsoleConfig,
    ) -> Self {
        Self {
            transport,
            tx,
            screen,
            commands: CommandTable::new(commands),
            line: LineBuffer::new(),
            layout,
        }
    }

    /// Output handle for callers outside the command path
    pub fn writer(&mut self) -> ConsoleWriter<'_, 'a, T> {
        ConsoleWriter::new(self.transport, &mut self.tx, &self.layout)
    }

    pub fn screen(&self) -> &S {
        &self.screen
    }

    pub fn screen_mut(&mut self) -> &mut S {
        &mut self.screen
    }

    pub fn line(&self) -> &LineBuffer {
        &self.line
    }

    /// Process every received byte, returning how many there were
    pub fn poll(&mut self) -> usize {
        let mut processed = 0;
        while let Some(byte) = self.transport.read_byte() {
            self.process_char(byte);
            processed += 1;
        }
        processed
    }

    /// Full screen redraw
    pub fn refresh_screen(&mut self) {
        let mut out = ConsoleWriter::new(self.transport, &mut self.tx, &self.layout);
        self.screen.refresh(&mut out);
    }

    /// Incremental screen redraw
    pub fn update_screen(&mut self) {
        let mut out = ConsoleWriter::new(self.transport, &mut self.tx, &self.layout);
        self.screen.update(&mut out);
    }

    /// Handle one input byte
    pub fn process_char(&mut self, byte: u8) {
        let mut out = ConsoleWriter::new(self.transport, &mut self.tx, &self.layout);

        match byte {
            keys::CR | keys::LF => {
                dispatch(self.commands, &self.line, &mut out);
                out.erase_input(self.line.cursor());
                self.line.clear();
            }
            keys::DEL | keys::BS => {
                // The terminal interprets the echoed control byte itself
                out.write_bytes(&[byte]);
                self.line.backspace();
            }
            keys::ESC => self.screen.refresh(&mut out),
            _ => {
                if self.line.push(byte) {
                    let col = self.layout.prompt_col + self.line.cursor() as u16;
                    out.move_to(self.layout.prompt_row, col);
                    out.write_bytes(&[byte]);
                }
            }
        }

        self.screen.update(&mut out);
    }
}

/// Run a completed line
fn dispatch(commands: CommandTable<'_>, line: &LineBuffer, out: &mut dyn Output) {
    let text = line.as_bytes();
    if text.eq_ignore_ascii_case(b"help") || text == b"?" {
        commands.help(out);
    } else if let Some(command) = commands.find(text) {
        command.action.run(out);
    } else {
        let mut msg: String<EMIT_CAPACITY> = String::new();
        write_to_string(
            &mut msg,
            format_args!("Unrecognised command \"{}\"", line.display()),
        );
        out.message(&msg);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::{ring_storage, RingBuffer};
    use core::cell::{Cell, RefCell};
    use core::sync::atomic::AtomicU8;

    /// UART that accepts every transfer and keeps a copy
    #[derive(Default)]
    struct CaptureUart {
        sent: RefCell<heapless::Vec<u8, 4096>>,
    }

    impl CaptureUart {
        fn text(&self) -> String<4096> {
            String::from_utf8(self.sent.borrow().clone()).unwrap()
        }

        /// For output that echoed bytes which are not UTF-8
        fn contains(&self, needle: &[u8]) -> bool {
            self.sent.borrow().windows(needle.len()).any(|w| w == needle)
        }
    }

    impl UartTx for &CaptureUart {
        type Error = ();

        fn start_write(&mut self, data: &[u8]) -> Result<(), ()> {
            self.sent.borrow_mut().extend_from_slice(data).map_err(|_| ())
        }
    }

    struct Rig {
        rx: [AtomicU8; 64],
        tx: [AtomicU8; 4096],
    }

    impl Rig {
        fn new() -> Self {
            Self {
                rx: ring_storage(),
                tx: ring_storage(),
            }
        }

        fn transport(&self) -> SerialTransport<'_> {
            SerialTransport::new(
                RingBuffer::init(&self.rx).unwrap(),
                RingBuffer::init(&self.tx).unwrap(),
            )
        }
    }

    /// Pumps transfers to completion so the whole output reaches the capture
    fn drain(transport: &SerialTransport<'_>, uart: &CaptureUart) {
        let mut sink = uart;
        while transport.is_transmitting() {
            transport.on_transmit_complete(&mut sink);
        }
    }

    fn feed<T: UartTx, S: Screen>(
        console: &mut Console<'_, T, S>,
        transport: &SerialTransport<'_>,
        text: &[u8],
    ) {
        for &b in text {
            transport.on_byte_received(b);
        }
        console.poll();
    }

    #[test]
    fn test_help_lists_every_command_once() {
        let rig = Rig::new();
        let transport = rig.transport();
        let uart = CaptureUart::default();
        let mut console =
            Console::new(&transport, &uart, (), DEMO_COMMANDS, ConsoleConfig::default());

        feed(&mut console, &transport, b"help\r");
        drain(&transport, &uart);

        let text = uart.text();
        assert!(text.as_str().contains("Commands :\r\ntest1\r\ntest2\r\ntest3\r\n"));
        assert_eq!(text.as_str().matches("test1\r\n").count(), 1);
    }

    #[test]
    fn test_help_aliases_case_insensitive() {
        for input in [&b"?\r"[..], b"HELP\n", b"Help\r"] {
            let rig = Rig::new();
            let transport = rig.transport();
            let uart = CaptureUart::default();
            let mut console =
                Console::new(&transport, &uart, (), DEMO_COMMANDS, ConsoleConfig::default());

            feed(&mut console, &transport, input);
            drain(&transport, &uart);
            assert!(uart.text().as_str().contains("Commands :\r\n"));
        }
    }

    #[test]
    fn test_unrecognised_command_message() {
        let rig = Rig::new();
        let transport = rig.transport();
        let uart = CaptureUart::default();
        let mut console =
            Console::new(&transport, &uart, (), DEMO_COMMANDS, ConsoleConfig::default());

        feed(&mut console, &transport, b"zzz\r");
        drain(&transport, &uart);

        let text = uart.text();
        let s = text.as_str();
        assert_eq!(s.matches("Unrecognised command \"zzz\"").count(), 1);
        assert!(s.contains("\x1b[23;3HUnrecognised command \"zzz\" "));
        // Input echo erased and cursor reset
        assert!(s.ends_with("\x1b[22;4H   "));
        assert_eq!(console.line().cursor(), 0);
    }

    #[test]
    fn test_registered_command_runs_once() {
        let runs = Cell::new(0);
        let action = |out: &mut dyn Output| {
            runs.set(runs.get() + 1);
            out.print("ran\r\n");
        };
        let commands = [Command::new("go", &action)];

        let rig = Rig::new();
        let transport = rig.transport();
        let uart = CaptureUart::default();
        let mut console =
            Console::new(&transport, &uart, (), &commands, ConsoleConfig::default());

        feed(&mut console, &transport, b"go\r");
        drain(&transport, &uart);

        assert_eq!(runs.get(), 1);
        assert!(uart.text().as_str().contains("ran\r\n"));
    }

    #[test]
    fn test_last_registration_wins() {
        let first = Cell::new(0);
        let second = Cell::new(0);
        let a = |_: &mut dyn Output| first.set(first.get() + 1);
        let b = |_: &mut dyn Output| second.set(second.get() + 1);
        let commands = [Command::new("x", &a), Command::new("x", &b)];

        let rig = Rig::new();
        let transport = rig.transport();
        let uart = CaptureUart::default();
        let mut console =
            Console::new(&transport, &uart, (), &commands, ConsoleConfig::default());

        feed(&mut console, &transport, b"x\n");
        assert_eq!((first.get(), second.get()), (0, 1));
    }

    #[test]
    fn test_echo_positions() {
        let rig = Rig::new();
        let transport = rig.transport();
        let uart = CaptureUart::default();
        let mut console =
            Console::new(&transport, &uart, (), DEMO_COMMANDS, ConsoleConfig::default());

        feed(&mut console, &transport, b"ab");
        drain(&transport, &uart);

        assert_eq!(uart.text().as_str(), "\x1b[22;4Ha\x1b[22;5Hb");
        assert_eq!(console.line().as_str(), Some("ab"));
    }

    #[test]
    fn test_backspace_at_zero_does_not_underflow() {
        let rig = Rig::new();
        let transport = rig.transport();
        let uart = CaptureUart::default();
        let mut console =
            Console::new(&transport, &uart, (), DEMO_COMMANDS, ConsoleConfig::default());

        feed(&mut console, &transport, &[keys::DEL, keys::BS]);
        assert_eq!(console.line().cursor(), 0);
        drain(&transport, &uart);
        // Both control bytes echoed as received
        assert_eq!(&uart.sent.borrow()[..], &[keys::DEL, keys::BS]);

        feed(&mut console, &transport, b"test1x");
        feed(&mut console, &transport, &[keys::DEL]);
        assert_eq!(console.line().as_str(), Some("test1"));

        feed(&mut console, &transport, b"\r");
        drain(&transport, &uart);
        assert!(uart.text().as_str().contains("Test one - [done]\r\n"));
    }

    #[test]
    fn test_trailing_invalid_bytes_do_not_match_command() {
        let rig = Rig::new();
        let transport = rig.transport();
        let uart = CaptureUart::default();
        let mut console =
            Console::new(&transport, &uart, (), DEMO_COMMANDS, ConsoleConfig::default());

        feed(&mut console, &transport, b"test1\xFFjunk\r");
        drain(&transport, &uart);

        assert!(!uart.contains(b"Test one"));
        assert!(uart.contains(b"Unrecognised command \"test1\\xFFjunk\""));
    }

    #[test]
    fn test_unrecognised_invalid_utf8_shown_whole() {
        let rig = Rig::new();
        let transport = rig.transport();
        let uart = CaptureUart::default();
        let mut console =
            Console::new(&transport, &uart, (), DEMO_COMMANDS, ConsoleConfig::default());

        feed(&mut console, &transport, b"ab\xFFcd\r");
        drain(&transport, &uart);

        assert!(uart.contains(b"\x1b[23;3HUnrecognised command \"ab\\xFFcd\" "));
        assert!(!uart.contains(b"Unrecognised command \"ab\" "));
        assert_eq!(console.line().cursor(), 0);
    }

    #[test]
    fn test_line_full_rejects_extra_bytes() {
        let rig = Rig::new();
        let transport = rig.transport();
        let uart = CaptureUart::default();
        let mut console =
            Console::new(&transport, &uart, (), DEMO_COMMANDS, ConsoleConfig::default());

        for _ in 0..3 {
            feed(&mut console, &transport, &[b'x'; 40]);
            drain(&transport, &uart);
        }
        assert_eq!(console.line().cursor(), MAX_LINE_LEN);
    }

    /// Counts screen calls
    #[derive(Default)]
    struct CountingScreen {
        refreshes: u32,
        updates: u32,
    }

    impl Screen for CountingScreen {
        fn refresh(&mut self, _out: &mut dyn Output) {
            self.refreshes += 1;
        }

        fn update(&mut self, _out: &mut dyn Output) {
            self.updates += 1;
        }
    }

    #[test]
    fn test_escape_refreshes_and_keeps_line() {
        let rig = Rig::new();
        let transport = rig.transport();
        let uart = CaptureUart::default();
        let mut console = Console::new(
            &transport,
            &uart,
            CountingScreen::default(),
            DEMO_COMMANDS,
            ConsoleConfig::default(),
        );

        feed(&mut console, &transport, b"te");
        feed(&mut console, &transport, &[keys::ESC]);

        assert_eq!(console.screen().refreshes, 1);
        assert_eq!(console.screen().updates, 3);
        assert_eq!(console.line().as_str(), Some("te"));
    }
}
