//! Line accumulator for the console

use core::fmt;

use heapless::Vec;

/// Backing capacity of the line accumulator
pub const LINE_CAPACITY: usize = 100;

/// Longest line the console will hold (one slot stays free for a terminator)
pub const MAX_LINE_LEN: usize = LINE_CAPACITY - 1;

/// Fixed-capacity byte accumulator with an append-only cursor
#[derive(Debug, Clone, Default)]
pub struct LineBuffer {
    bytes: Vec<u8, LINE_CAPACITY>,
}

impl LineBuffer {
    pub const fn new() -> Self {
        Self { bytes: Vec::new() }
    }

    /// Current cursor position (number of stored bytes)
    #[inline]
    pub fn cursor(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.bytes.len() >= MAX_LINE_LEN
    }

    /// Append a byte at the cursor
    ///
    /// Returns `false` and leaves the buffer untouched when the line is full.
    pub fn push(&mut self, byte: u8) -> bool {
        if self.is_full() {
            return false;
        }
        self.bytes.push(byte).is_ok()
    }

    /// Step the cursor back one slot, clearing it
    ///
    /// No-op at cursor 0.
    pub fn backspace(&mut self) -> Option<u8> {
        self.bytes.pop()
    }

    /// Reset the cursor to 0
    pub fn clear(&mut self) {
        self.bytes.clear();
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Accumulated text, or `None` if the line is not valid UTF-8
    pub fn as_str(&self) -> Option<&str> {
        core::str::from_utf8(&self.bytes).ok()
    }

    /// Printable form of the whole line, invalid bytes escaped as `\xNN`
    pub fn display(&self) -> LossyText<'_> {
        LossyText(&self.bytes)
    }
}

/// Bytes shown as text, with each invalid UTF-8 byte written as `\xNN`
#[derive(Debug, Clone, Copy)]
pub struct LossyText<'a>(pub &'a [u8]);

impl fmt::Display for LossyText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for chunk in self.0.utf8_chunks() {
            f.write_str(chunk.valid())?;
            for byte in chunk.invalid() {
                write!(f, "\\x{:02X}", byte)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_read_back() {
        let mut line = LineBuffer::new();
        for b in b"test1" {
            assert!(line.push(*b));
        }
        assert_eq!(line.cursor(), 5);
        assert_eq!(line.as_str(), Some("test1"));
    }

    #[test]
    fn test_push_rejected_when_full() {
        let mut line = LineBuffer::new();
        for _ in 0..MAX_LINE_LEN {
            assert!(line.push(b'x'));
        }
        assert!(line.is_full());
        assert!(!line.push(b'y'));
        assert_eq!(line.cursor(), MAX_LINE_LEN);
        assert!(line.as_bytes().iter().all(|&b| b == b'x'));
    }

    #[test]
    fn test_backspace_at_zero_is_noop() {
        let mut line = LineBuffer::new();
        assert_eq!(line.backspace(), None);
        assert_eq!(line.cursor(), 0);

        line.push(b'a');
        assert_eq!(line.backspace(), Some(b'a'));
        assert_eq!(line.backspace(), None);
        assert_eq!(line.cursor(), 0);
    }

    #[test]
    fn test_invalid_utf8_kept_whole() {
        let mut line = LineBuffer::new();
        for &b in b"ok\xFFgo" {
            line.push(b);
        }
        assert_eq!(line.as_str(), None);
        assert_eq!(line.as_bytes(), b"ok\xFFgo");

        let mut shown: heapless::String<32> = heapless::String::new();
        core::fmt::write(&mut shown, format_args!("{}", line.display())).unwrap();
        assert_eq!(shown.as_str(), "ok\\xFFgo");
    }

    #[test]
    fn test_clear_resets_cursor() {
        let mut line = LineBuffer::new();
        line.push(b'a');
        line.clear();
        assert!(line.is_empty());
        assert_eq!(line.as_str(), Some(""));
    }
}
