//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels or the
//! shared serial transport.

pub mod foreground;
pub mod hid;
pub mod uart_rx;
pub mod uart_tx;
pub mod usb;

pub use foreground::{foreground_task, KeypadConsole, KeypadInput, NUM_KEYS};
pub use hid::{hid_task, KeypadTypist};
pub use uart_rx::uart_rx_task;
pub use uart_tx::uart_tx_task;
pub use usb::{usb_task, UsbDriver, UsbKeyboard};
