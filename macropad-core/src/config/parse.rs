//! Minimal TOML parser for keypad configuration
//!
//! Handles only the subset `keypad.toml` uses; it is not a general TOML
//! parser.
//!
//! Supported:
//! - `[section]` headers
//! - `key = value` with integer or string values
//! - Comments (`# ...`), including trailing comments outside strings
//!
//! Not supported: arrays, tables, multi-line strings, escapes.

use heapless::String;
use macropad_hal::uart::{DataBits, Parity, StopBits};

use super::types::{MacropadConfig, MAX_KEYS, MAX_TEXT_LEN};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Value could not be parsed for its key
    InvalidValue,
    /// String longer than its fixed capacity
    TooLong,
    /// Line is neither a header nor `key = value`
    Malformed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Transport,
    Console,
    Input,
    Hid,
    Keymap,
}

/// Parse TOML text into a [`MacropadConfig`]
///
/// Keys missing from the input keep their defaults; unknown keys are
/// ignored.
pub fn parse_config(input: &str) -> Result<MacropadConfig, ConfigError> {
    let mut config = MacropadConfig::new();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            section = parse_section_header(&line[1..line.len() - 1])?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ConfigError::Malformed)?;
        apply_value(section, key, value, &mut config)?;
    }

    Ok(config)
}

fn parse_section_header(header: &str) -> Result<Section, ConfigError> {
    match header.trim() {
        "transport" => Ok(Section::Transport),
        "console" => Ok(Section::Console),
        "input" => Ok(Section::Input),
        "hid" => Ok(Section::Hid),
        "keymap" => Ok(Section::Keymap),
        _ => Err(ConfigError::InvalidSection),
    }
}

/// Split `key = value`, dropping a trailing comment outside quotes
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = line[eq_pos + 1..].trim();

    let mut in_string = false;
    let mut end = value.len();
    for (i, c) in value.char_indices() {
        match c {
            '"' => in_string = !in_string,
            '#' if !in_string => {
                end = i;
                break;
            }
            _ => {}
        }
    }
    let value = value[..end].trim();

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Strip surrounding quotes; bare words are accepted as-is
fn parse_string(value: &str) -> &str {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

fn parse_text(value: &str) -> Result<String<MAX_TEXT_LEN>, ConfigError> {
    String::try_from(parse_string(value)).map_err(|_| ConfigError::TooLong)
}

fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidValue)
}

/// Parse a positive integer
fn parse_nonzero<T>(value: &str) -> Result<T, ConfigError>
where
    T: core::str::FromStr + Default + PartialEq,
{
    let v: T = parse_int(value)?;
    if v == T::default() {
        return Err(ConfigError::InvalidValue);
    }
    Ok(v)
}

/// `key0`..`key7` to a key index
fn key_index(key: &str) -> Option<usize> {
    let index: usize = key.strip_prefix("key")?.parse().ok()?;
    (index < MAX_KEYS).then_some(index)
}

fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut MacropadConfig,
) -> Result<(), ConfigError> {
    match section {
        Section::Root => {} // Nothing lives at the root
        Section::Transport => {
            let t = &mut config.transport;
            match key {
                // One slot of each ring is kept free
                "rx_capacity" => t.rx_capacity = parse_int::<u16>(value).and_then(at_least_two)?,
                "tx_capacity" => t.tx_capacity = parse_int::<u16>(value).and_then(at_least_two)?,
                "tx_chunk" => t.tx_chunk = parse_nonzero(value)?,
                "baudrate" => t.baudrate = parse_nonzero(value)?,
                "data_bits" => t.data_bits = parse_data_bits(value)?,
                "parity" => t.parity = parse_parity(value)?,
                "stop_bits" => t.stop_bits = parse_stop_bits(value)?,
                _ => {}
            }
        }
        Section::Console => {
            let c = &mut config.console;
            match key {
                "prompt_row" => c.prompt_row = parse_nonzero(value)?,
                "prompt_col" => c.prompt_col = parse_nonzero(value)?,
                "message_row" => c.message_row = parse_nonzero(value)?,
                "message_col" => c.message_col = parse_nonzero(value)?,
                "message_width" => c.message_width = parse_int(value)?,
                _ => {}
            }
        }
        Section::Input => {
            let i = &mut config.input;
            match key {
                "scan_interval_ms" => i.scan_interval_ms = parse_nonzero(value)?,
                "direction_threshold" => i.direction_threshold = parse_int(value)?,
                "debounce_ticks" => i.debounce_ticks = parse_int(value)?,
                _ => {}
            }
        }
        Section::Hid => {
            if key == "report_delay_ms" {
                config.hid.report_delay_ms = parse_int(value)?;
            }
        }
        Section::Keymap => {
            let k = &mut config.keymap;
            match key {
                "clockwise" => k.clockwise = parse_text(value)?,
                "anticlockwise" => k.anticlockwise = parse_text(value)?,
                _ => {
                    if let Some(index) = key_index(key) {
                        let text = parse_text(value)?;
                        k.keys[index] = (!text.is_empty()).then_some(text);
                    }
                }
            }
        }
    }

    Ok(())
}

fn parse_data_bits(value: &str) -> Result<DataBits, ConfigError> {
    match parse_int::<u8>(value)? {
        7 => Ok(DataBits::Seven),
        8 => Ok(DataBits::Eight),
        9 => Ok(DataBits::Nine),
        _ => Err(ConfigError::InvalidValue),
    }
}

fn parse_parity(value: &str) -> Result<Parity, ConfigError> {
    match parse_string(value) {
        "none" => Ok(Parity::None),
        "even" => Ok(Parity::Even),
        "odd" => Ok(Parity::Odd),
        _ => Err(ConfigError::InvalidValue),
    }
}

fn parse_stop_bits(value: &str) -> Result<StopBits, ConfigError> {
    match parse_int::<u8>(value)? {
        1 => Ok(StopBits::One),
        2 => Ok(StopBits::Two),
        _ => Err(ConfigError::InvalidValue),
    }
}

fn at_least_two(v: u16) -> Result<u16, ConfigError> {
    if v < 2 {
        Err(ConfigError::InvalidValue)
    } else {
        Ok(v)
    }
}
