//! USB HID keyboard typing

pub mod keycode;
pub mod pending;
pub mod typist;

pub use keycode::{encode, KeyReport, MOD_LSHIFT};
pub use pending::{PendingText, PENDING_TEXT_LEN};
pub use typist::{HidError, Typist};
