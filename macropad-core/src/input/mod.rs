//! Input event engine
//!
//! Edge detection on discrete key lines and direction classification of a
//! free-running encoder counter, run once per scan tick.

pub mod encoder;
pub mod engine;
pub mod events;
pub mod keys;

pub use encoder::{classify, EncoderState, DEFAULT_THRESHOLD};
pub use engine::{InputEngine, InputSnapshot};
pub use events::{EventSink, InputEvent, KeyState, LineId, Rotation};
pub use keys::KeyLine;
