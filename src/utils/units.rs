//! Parse quantities such as `"4 GiB"` or `"2 hours"` into canonical units.
//!
//! Memory quantities are returned in bytes, durations in milliseconds.

use super::config::{MEMORY_UNITS, TIME_UNITS};
use super::error::MrcError;

/// Parse a quantity string to canonical units (bytes, milliseconds)
///
/// Plain numbers are returned unchanged. Otherwise the string must be
/// `"<value> <unit>"` with a unit from the memory or time tables.
///
/// # Errors
/// * `MrcError::MalformedInput` - unparsable value or unknown unit
pub fn parse_quantity(text: &str) -> Result<f64, MrcError> {
    let text = text.trim();
    let ends_with_unit = text
        .chars()
        .last()
        .map(|c| c.is_alphabetic())
        .unwrap_or(false);

    if !ends_with_unit {
        return parse_value(text);
    }

    let mut parts = text.split_whitespace();
    let (value, unit) = match (parts.next(), parts.next(), parts.next()) {
        (Some(value), Some(unit), None) => (value, unit),
        _ => {
            return Err(MrcError::MalformedInput(format!(
                "expected '<value> <unit>', got '{}'",
                text
            )))
        }
    };

    let multiplier = lookup_unit(unit)
        .ok_or_else(|| MrcError::MalformedInput(format!("unknown unit '{}'", unit)))?;

    Ok(parse_value(value)? * multiplier)
}

fn parse_value(text: &str) -> Result<f64, MrcError> {
    text.parse::<f64>()
        .map_err(|_| MrcError::MalformedInput(format!("invalid number '{}'", text)))
}

fn lookup_unit(unit: &str) -> Option<f64> {
    MEMORY_UNITS
        .iter()
        .chain(TIME_UNITS.iter())
        .find(|(name, _)| *name == unit)
        .map(|(_, multiplier)| *multiplier)
}
