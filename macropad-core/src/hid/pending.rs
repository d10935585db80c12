//! Text waiting for the typist
//!
//! Events keep arriving while the typist is busy. Their text is appended to
//! one buffer that is handed over whole when the typist has room, so a fast
//! encoder spin is typed in full instead of being dropped.

use heapless::String;

/// Most text held while the typist is busy
pub const PENDING_TEXT_LEN: usize = 64;

/// Merged text not yet handed to the typist
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingText {
    text: String<PENDING_TEXT_LEN>,
}

impl PendingText {
    pub const fn new() -> Self {
        Self {
            text: String::new(),
        }
    }

    /// Append `text` whole
    ///
    /// Returns `false` and keeps the buffer unchanged if it does not fit.
    pub fn push(&mut self, text: &str) -> bool {
        if self.text.len() + text.len() > PENDING_TEXT_LEN {
            return false;
        }
        self.text.push_str(text).is_ok()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Offer the buffered text to `send`
    ///
    /// `send` hands the text back when it has no room; it stays buffered
    /// and later pushes append to it. Returns `true` once handed over.
    pub fn flush<F>(&mut self, send: F) -> bool
    where
        F: FnOnce(String<PENDING_TEXT_LEN>) -> Result<(), String<PENDING_TEXT_LEN>>,
    {
        if self.text.is_empty() {
            return false;
        }
        match send(core::mem::take(&mut self.text)) {
            Ok(()) => true,
            Err(text) => {
                self.text = text;
                false
            }
        }
    }
}
