//! Checksum algorithms for identifiers.
//!
//! These are plain string functions; the `luhn`, `isbn`, `npi` and
//! `creditcard` checkers wrap them.

use crate::error::CheckError;
use crate::value::Value;

/// Digits fed to the Luhn algorithm for a value.
///
/// Floats are rendered with no fractional part, integers in decimal.
/// Spaces and dashes are removed from the result.
pub fn normalize_luhn_input(value: &Value<'_>) -> Result<String, CheckError> {
    let raw = match value {
        Value::Float(x) => format!("{x:.0}").replace('.', ""),
        Value::Int(n) => n.to_string(),
        Value::Uint(n) => n.to_string(),
        other => other.text()?.into_owned(),
    };
    Ok(strip_separators(&raw))
}

fn strip_separators(input: &str) -> String {
    input.chars().filter(|c| *c != ' ' && *c != '-').collect()
}

/// Validate a digit string with the Luhn (mod 10) algorithm.
///
/// Spaces and dashes are ignored.
pub fn luhn(input: &str) -> Result<(), CheckError> {
    let digits = strip_separators(input);
    if digits.is_empty() {
        return Err(CheckError::invalid(format!(
            "{digits:?} is not a valid input for Luhn validation"
        )));
    }

    let mut sum = 0u32;
    let mut double = false;
    for c in digits.chars().rev() {
        let Some(mut digit) = c.to_digit(10) else {
            return Err(CheckError::invalid(format!(
                "{digits:?} contains non-digit character: {c:?}"
            )));
        };
        if double {
            digit *= 2;
            if digit > 9 {
                digit -= 9;
            }
        }
        sum += digit;
        double = !double;
    }

    if sum % 10 != 0 {
        return Err(CheckError::invalid(format!(
            "{digits:?} is not valid according to the Luhn algorithm"
        )));
    }
    Ok(())
}

/// Validate an ISBN-10 or ISBN-13, ignoring dashes.
pub fn isbn(input: &str) -> Result<(), CheckError> {
    let cleaned: String = input.chars().filter(|c| *c != '-').collect();
    match cleaned.len() {
        10 => isbn10(&cleaned),
        13 => isbn13(&cleaned),
        _ => Err(CheckError::invalid(format!(
            "{input:?} is not a valid ISBN (must be 10 or 13 digits)"
        ))),
    }
}

/// Validate a 10-character ISBN. The last character may be `X`.
pub fn isbn10(input: &str) -> Result<(), CheckError> {
    let bytes = input.as_bytes();
    if bytes.len() != 10 {
        return Err(CheckError::invalid(format!(
            "{input:?} is not a valid ISBN-10"
        )));
    }

    let mut sum = 0u32;
    for (i, byte) in bytes.iter().enumerate() {
        let weight = 10 - i as u32;
        let digit = match byte {
            b'0'..=b'9' => u32::from(byte - b'0'),
            b'X' | b'x' if i == 9 => 10,
            _ => {
                return Err(CheckError::invalid(format!(
                    "invalid character in ISBN-10: {}",
                    char::from(*byte)
                )))
            }
        };
        sum += digit * weight;
    }

    if sum % 11 != 0 {
        return Err(CheckError::invalid(format!(
            "{input:?} is not a valid ISBN-10"
        )));
    }
    Ok(())
}

/// Validate a 13-digit ISBN.
pub fn isbn13(input: &str) -> Result<(), CheckError> {
    let bytes = input.as_bytes();
    if bytes.len() != 13 {
        return Err(CheckError::invalid(format!(
            "{input:?} is not a valid ISBN-13"
        )));
    }

    let mut sum = 0u32;
    for (i, byte) in bytes[..12].iter().enumerate() {
        if !byte.is_ascii_digit() {
            return Err(CheckError::invalid(format!(
                "invalid character in ISBN-13: {}",
                char::from(*byte)
            )));
        }
        let weight = if i % 2 == 0 { 1 } else { 3 };
        sum += u32::from(byte - b'0') * weight;
    }

    let expected = (10 - sum % 10) % 10;
    let last = bytes[12];
    if !last.is_ascii_digit() || u32::from(last - b'0') != expected {
        return Err(CheckError::invalid(format!(
            "{input:?} is not a valid ISBN-13"
        )));
    }
    Ok(())
}

/// Validate a US National Provider Identifier.
///
/// An NPI is exactly ten digits whose Luhn check includes the `80840`
/// health-industry prefix.
pub fn npi(input: &str) -> Result<(), CheckError> {
    let well_formed = input.len() == 10 && input.bytes().all(|b| b.is_ascii_digit());
    if !well_formed || luhn(&format!("80840{input}")).is_err() {
        return Err(CheckError::invalid(format!("{input:?} is not a valid NPI")));
    }
    Ok(())
}
