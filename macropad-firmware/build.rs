//! Build script for macropad-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates keypad.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Longest string a key can type
const MAX_TEXT_LEN: usize = 32;

/// Number of keymap slots
const MAX_KEYS: usize = 8;

/// Integer settings: (section, key, min, max)
///
/// Ring and chunk limits match the static buffers in main.rs.
const INTEGER_FIELDS: &[(&str, &str, i64, i64)] = &[
    ("transport", "rx_capacity", 2, 256),
    ("transport", "tx_capacity", 2, 1024),
    ("transport", "tx_chunk", 1, 64),
    ("transport", "baudrate", 1, 4_000_000),
    ("transport", "data_bits", 7, 9),
    ("transport", "stop_bits", 1, 2),
    ("console", "prompt_row", 1, 999),
    ("console", "prompt_col", 1, 999),
    ("console", "message_row", 1, 999),
    ("console", "message_col", 1, 999),
    ("console", "message_width", 0, 200),
    ("input", "scan_interval_ms", 1, 1000),
    ("input", "direction_threshold", 0, 65535),
    ("input", "debounce_ticks", 0, 255),
    ("hid", "report_delay_ms", 0, 1000),
];

const PARITIES: &[&str] = &["none", "even", "odd"];

const SECTIONS: &[&str] = &["transport", "console", "input", "hid", "keymap"];

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    println!("cargo:rustc-link-search={}", out_dir.display());
    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate keypad.toml at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=keypad.toml");

    let config_path = Path::new("keypad.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: keypad.toml not found!                                   ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds keypad.toml as its configuration.           ║\n\
            ║  Please create one in the macropad-firmware directory.           ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read keypad.toml                               ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in keypad.toml                       ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    validate_sections(&config, &mut errors);
    validate_integers(&config, &mut errors);
    validate_parity(&config, &mut errors);
    validate_keymap(&config, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid keypad configuration                             ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=keypad.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Only known sections, each a table
///
/// The firmware parser rejects unknown sections but ignores unknown keys,
/// so unknown keys only produce a warning here.
fn validate_sections(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(root) = config.as_table() else {
        errors.push("top level must be a table".to_string());
        return;
    };

    for (name, section) in root {
        if !SECTIONS.contains(&name.as_str()) {
            errors.push(format!("unknown section [{}]", name));
            continue;
        }

        let Some(table) = section.as_table() else {
            errors.push(format!("[{}] must be a table", name));
            continue;
        };

        for key in table.keys() {
            if !is_known_key(name, key) {
                println!("cargo:warning=keypad.toml: [{}] {} is ignored", name, key);
            }
        }
    }
}

fn is_known_key(section: &str, key: &str) -> bool {
    if section == "keymap" {
        return key == "clockwise" || key == "anticlockwise" || key_index(key).is_some();
    }
    if section == "transport" && key == "parity" {
        return true;
    }
    INTEGER_FIELDS
        .iter()
        .any(|(s, k, _, _)| *s == section && *k == key)
}

fn validate_integers(config: &toml::Value, errors: &mut Vec<String>) {
    for (section, key, min, max) in INTEGER_FIELDS {
        let Some(value) = config.get(section).and_then(|s| s.get(key)) else {
            continue;
        };

        match value {
            toml::Value::Integer(v) if (*min..=*max).contains(v) => {}
            toml::Value::Integer(_) => {
                errors.push(format!("[{}] {} must be {}-{}", section, key, min, max));
            }
            _ => errors.push(format!("[{}] {} must be an integer", section, key)),
        }
    }
}

fn validate_parity(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(value) = config.get("transport").and_then(|t| t.get("parity")) else {
        return;
    };

    match value.as_str() {
        Some(parity) if PARITIES.contains(&parity) => {}
        _ => errors.push("[transport] parity must be 'none', 'even' or 'odd'".to_string()),
    }
}

fn validate_keymap(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(keymap) = config.get("keymap").and_then(|k| k.as_table()) else {
        return;
    };

    for (key, value) in keymap {
        if !(key == "clockwise" || key == "anticlockwise" || key_index(key).is_some()) {
            continue;
        }

        match value.as_str() {
            Some(text) if text.len() > MAX_TEXT_LEN => {
                errors.push(format!(
                    "[keymap] {} longer than {} bytes",
                    key, MAX_TEXT_LEN
                ));
            }
            Some(_) => {}
            None => errors.push(format!("[keymap] {} must be a string", key)),
        }
    }
}

/// `key0`..`key7` to a slot index
fn key_index(key: &str) -> Option<usize> {
    key.strip_prefix("key")?
        .parse::<usize>()
        .ok()
        .filter(|i| *i < MAX_KEYS)
}
