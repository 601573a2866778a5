//! Minimal TOML parser for the panel configuration
//!
//! Handles only the subset used by `panel.toml`. Arrays, tables of
//! tables and strings are not supported.
//!
//! Supported features:
//! - `[section]` headers (`timing`, `policy`, `display`)
//! - `key = value` pairs (decimal or `0x` hex integers, booleans)
//! - Comments (`# ...`), also trailing a value
//!
//! Unknown keys are ignored; the firmware build script rejects them
//! before they get this far.

use super::types::PanelConfig;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Value of the wrong type or out of range
    InvalidValue,
    /// Line is neither a header, a comment nor `key = value`
    InvalidLine,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Timing,
    Policy,
    Display,
}

/// Parse TOML text into a [`PanelConfig`], starting from the defaults
pub fn parse_config(input: &str) -> Result<PanelConfig, ParseError> {
    let mut config = PanelConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = strip_comment(line).trim();

        if line.is_empty() {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            section = parse_section_header(&line[1..line.len() - 1])?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::InvalidLine)?;
        apply_value(&mut config, section, key, value)?;
    }

    Ok(config)
}

fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    match header.trim() {
        "timing" => Ok(Section::Timing),
        "policy" => Ok(Section::Policy),
        "display" => Ok(Section::Display),
        _ => Err(ParseError::InvalidSection),
    }
}

/// Cut a trailing `# comment` that is not inside a string
fn strip_comment(line: &str) -> &str {
    let mut in_string = false;
    for (i, c) in line.char_indices() {
        match c {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..i],
            _ => {}
        }
    }
    line
}

/// Parse "key = value" line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = line[eq_pos + 1..].trim();

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

fn apply_value(
    config: &mut PanelConfig,
    section: Section,
    key: &str,
    value: &str,
) -> Result<(), ParseError> {
    match section {
        Section::Timing => match key {
            "pulse_hold_us" => config.timing.pulse_hold_us = parse_u32(value)?,
            "settle_us" => config.timing.settle_us = parse_u32(value)?,
            "poll_timeout_ms" => config.timing.poll_timeout_ms = parse_u32(value)?,
            _ => {}
        },
        Section::Policy => match key {
            "restore_write_state_on_address_commit" => {
                config.policy.restore_write_state_on_address_commit = parse_bool(value)?
            }
            "prefetch_on_switch_exit" => {
                config.policy.prefetch_on_switch_exit = parse_bool(value)?
            }
            "start_address" => {
                config.policy.start_address =
                    u16::try_from(parse_u32(value)?).map_err(|_| ParseError::InvalidValue)?
            }
            _ => {}
        },
        Section::Display => match key {
            "enabled" => config.display.enabled = parse_bool(value)?,
            "base_address" => {
                config.display.base_address =
                    u8::try_from(parse_u32(value)?).map_err(|_| ParseError::InvalidValue)?
            }
            _ => {}
        },
        Section::Root => {}
    }
    Ok(())
}

/// Parse a decimal or `0x` prefixed hex integer, `_` separators allowed
fn parse_u32(value: &str) -> Result<u32, ParseError> {
    let mut digits: heapless::String<16> = heapless::String::new();
    let (body, radix) = match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        Some(hex) => (hex, 16),
        None => (value, 10),
    };
    for c in body.chars().filter(|c| *c != '_') {
        digits.push(c).map_err(|_| ParseError::InvalidValue)?;
    }
    u32::from_str_radix(&digits, radix).map_err(|_| ParseError::InvalidValue)
}

/// Parse a boolean value
fn parse_bool(value: &str) -> Result<bool, ParseError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseError::InvalidValue),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config_str = r#"
# Membership Card on the breadboard
[timing]
pulse_hold_us = 150
settle_us = 2_000
poll_timeout_ms = 20   # snappier display

[policy]
restore_write_state_on_address_commit = false
prefetch_on_switch_exit = true
start_address = 0x0100

[display]
enabled = true
base_address = 0x61
"#;

        let config = parse_config(config_str).unwrap();
        assert_eq!(config.timing.pulse_hold_us, 150);
        assert_eq!(config.timing.settle_us, 2000);
        assert_eq!(config.timing.poll_timeout_ms, 20);
        assert!(!config.policy.restore_write_state_on_address_commit);
        assert!(config.policy.prefetch_on_switch_exit);
        assert_eq!(config.policy.start_address, 0x0100);
        assert!(config.display.enabled);
        assert_eq!(config.display.base_address, 0x61);
    }

    #[test]
    fn test_missing_values_keep_defaults() {
        let config = parse_config("[timing]\npulse_hold_us = 250\n").unwrap();
        assert_eq!(config.timing.pulse_hold_us, 250);
        assert_eq!(config.timing.poll_timeout_ms, 50);
        assert_eq!(config.policy, PanelConfig::default().policy);

        assert_eq!(parse_config("").unwrap(), PanelConfig::default());
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let config = parse_config("[display]\nbrightness = 40\nenabled = false\n").unwrap();
        assert!(!config.display.enabled);
    }

    #[test]
    fn test_errors() {
        assert_eq!(parse_config("[pins]"), Err(ParseError::InvalidSection));
        assert_eq!(
            parse_config("[policy]\nprefetch_on_switch_exit = yes"),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(
            parse_config("[policy]\nstart_address = 0x10000"),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(
            parse_config("[display]\nbase_address = 256"),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(parse_config("[timing]\njunk"), Err(ParseError::InvalidLine));
    }

    #[test]
    fn test_strip_comment_respects_strings() {
        assert_eq!(strip_comment("a = 1 # note"), "a = 1 ");
        assert_eq!(strip_comment("a = \"#1\""), "a = \"#1\"");
    }
}
