//! Pattern-based checkers.

use std::sync::Arc;

use regex::Regex;

use crate::error::CheckError;
use crate::registry::Checker;
use crate::value::Value;

/// Build a checker that matches the value's text against `pattern`.
///
/// # Example
/// ```rust
/// use tagcheck::{regex_checker, Value};
///
/// let checker = regex_checker(r"^\d+$").unwrap();
/// assert!(checker(&Value::Str("123".into())).is_ok());
/// assert!(checker(&Value::Str("12a".into())).is_err());
/// ```
pub fn regex_checker(pattern: &str) -> Result<Checker, CheckError> {
    let regex = Regex::new(pattern)?;
    Ok(Arc::new(move |value: &Value<'_>| matches_pattern(value, &regex)))
}

/// Build a checker that accepts exactly one of the `|`-separated choices.
///
/// Choices are regular-expression alternatives, anchored at both ends.
pub fn one_of(choices: &str) -> Result<Checker, CheckError> {
    regex_checker(&format!("^({choices})$"))
}

pub(crate) fn matches_pattern(value: &Value<'_>, regex: &Regex) -> Result<(), CheckError> {
    let text = value.text()?;
    if regex.is_match(&text) {
        Ok(())
    } else {
        Err(CheckError::invalid(format!(
            "{:?} does not match {}",
            text.as_ref(),
            regex.as_str()
        )))
    }
}

/// Defines a function returning a lazily compiled built-in pattern.
macro_rules! builtin_pattern {
    ($(#[$meta:meta])* $name:ident => $pattern:expr) => {
        $(#[$meta])*
        pub(crate) fn $name() -> &'static ::regex::Regex {
            static CELL: ::std::sync::OnceLock<::regex::Regex> = ::std::sync::OnceLock::new();
            CELL.get_or_init(|| ::regex::Regex::new($pattern).expect("built-in pattern compiles"))
        }
    };
}

pub(crate) use builtin_pattern;
