//! Configuration types
//!
//! Board-agnostic configuration structures and the TOML-subset parser the
//! firmware uses for its embedded `keypad.toml`.

pub mod parse;
pub mod types;

pub use parse::{parse_config, ConfigError};
pub use types::*;
