//! Console output
//!
//! Everything the console, its commands and the screen print goes through
//! [`Output`]. [`ConsoleWriter`] is the implementation that pushes bytes
//! into the outbound ring and kicks the transmitter.

use core::fmt::{self, Write};

use heapless::String;
use macropad_hal::UartTx;

use crate::config::ConsoleConfig;
use crate::transport::SerialTransport;

/// Size of the scratch buffer used to format one piece of output
pub const EMIT_CAPACITY: usize = 200;

/// Format `args` into a fixed-capacity string
///
/// Output that does not fit is cut at the last piece that did.
pub fn write_to_string<const N: usize>(buf: &mut String<N>, args: fmt::Arguments<'_>) {
    // Overflow is a truncation, not an error
    let _ = buf.write_fmt(args);
}

/// Text output sink for the console
///
/// Only `write_bytes` and `layout` are required; the positioned helpers
/// build on them.
pub trait Output {
    /// Queue raw bytes for transmission, returning how many were accepted
    fn write_bytes(&mut self, bytes: &[u8]) -> usize;

    /// Screen positions used by the prompt and message helpers
    fn layout(&self) -> &ConsoleConfig;

    fn print(&mut self, text: &str) -> usize {
        self.write_bytes(text.as_bytes())
    }

    /// Formatted output at the current cursor position
    fn emit(&mut self, args: fmt::Arguments<'_>) -> usize {
        let mut buf: String<EMIT_CAPACITY> = String::new();
        write_to_string(&mut buf, args);
        self.write_bytes(buf.as_bytes())
    }

    /// Formatted output at `row`, `col` (1-based, `ESC[row;colH`)
    fn emit_at(&mut self, row: u16, col: u16, args: fmt::Arguments<'_>) -> usize {
        let mut buf: String<EMIT_CAPACITY> = String::new();
        write_to_string(&mut buf, format_args!("\x1b[{};{}H{}", row, col, args));
        self.write_bytes(buf.as_bytes())
    }

    /// Move the terminal cursor without printing
    fn move_to(&mut self, row: u16, col: u16) -> usize {
        self.emit_at(row, col, format_args!(""))
    }

    /// Draw the `>` prompt
    fn prompt(&mut self) {
        let layout = *self.layout();
        self.emit_at(layout.prompt_row, layout.prompt_col, format_args!(">"));
    }

    /// Show `text` on the message line, padded with spaces to the line width
    fn message(&mut self, text: &str) {
        let layout = *self.layout();
        let width = layout.message_width as usize;
        self.emit_at(
            layout.message_row,
            layout.message_col,
            format_args!("{:<w$.w$}", text, w = width),
        );
    }

    /// Blank `len` columns of the input line after the prompt
    fn erase_input(&mut self, len: usize) {
        let layout = *self.layout();
        self.emit_at(
            layout.prompt_row,
            layout.prompt_col + 1,
            format_args!("{:w$}", "", w = len),
        );
    }
}

/// [`Output`] over the serial transport
pub struct ConsoleWriter<'w, 'a, T: UartTx> {
    transport: &'w SerialTransport<'a>,
    tx: &'w mut T,
    layout: &'w ConsoleConfig,
}

impl<'w, 'a, T: UartTx> ConsoleWriter<'w, 'a, T> {
    pub fn new(
        transport: &'w SerialTransport<'a>,
        tx: &'w mut T,
        layout: &'w ConsoleConfig,
    ) -> Self {
        Self {
            transport,
            tx,
            layout,
        }
    }
}

impl<T: UartTx> Output for ConsoleWriter<'_, '_, T> {
    fn write_bytes(&mut self, bytes: &[u8]) -> usize {
        self.transport.send(bytes, &mut *self.tx)
    }

    fn layout(&self) -> &ConsoleConfig {
        self.layout
    }
}

impl<T: UartTx> fmt::Write for ConsoleWriter<'_, '_, T> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.write_bytes(s.as_bytes());
        Ok(())
    }
}

/// [`Output`] that captures everything into a buffer
///
/// Used to render off-line and by tests.
#[derive(Debug, Default)]
pub struct BufferOutput<const N: usize> {
    pub buf: heapless::Vec<u8, N>,
    pub layout: ConsoleConfig,
}

impl<const N: usize> BufferOutput<N> {
    pub fn new(layout: ConsoleConfig) -> Self {
        Self {
            buf: heapless::Vec::new(),
            layout,
        }
    }

    pub fn as_str(&self) -> &str {
        core::str::from_utf8(&self.buf).unwrap_or("")
    }

    pub fn clear(&mut self) {
        self.buf.clear();
    }
}

impl<const N: usize> Output for BufferOutput<N> {
    fn write_bytes(&mut self, bytes: &[u8]) -> usize {
        let mut written = 0;
        for &b in bytes {
            if self.buf.push(b).is_err() {
                break;
            }
            written += 1;
        }
        written
    }

    fn layout(&self) -> &ConsoleConfig {
        &self.layout
    }
}
