//! Size comparison checkers: `eq`, `ne`, `min` and `max`.
//!
//! Numbers compare by value; strings and collections compare by length
//! (string length in bytes). The argument is parsed when the check runs,
//! against the kind of the value being checked. Absent values always pass.

use std::cmp::Ordering;
use std::fmt::Display;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::CheckError;
use crate::registry::Checker;
use crate::value::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bound {
    AtMost,
    AtLeast,
    Equal,
    NotEqual,
}

impl Bound {
    fn violation(self) -> &'static str {
        match self {
            Self::AtMost => "more than",
            Self::AtLeast => "less than",
            Self::Equal => "not equal to",
            Self::NotEqual => "equal to",
        }
    }

    fn is_violated(self, ordering: Option<Ordering>) -> bool {
        match (self, ordering) {
            (Self::AtMost, Some(o)) => o == Ordering::Greater,
            (Self::AtLeast, Some(o)) => o == Ordering::Less,
            (Self::Equal, Some(o)) => o != Ordering::Equal,
            (Self::NotEqual, Some(o)) => o == Ordering::Equal,
            (Self::NotEqual, None) => false,
            (_, None) => true,
        }
    }
}

/// `eq:N` maker.
pub fn eq(argument: &str) -> Result<Checker, CheckError> {
    size_checker(argument, Bound::Equal)
}

/// `ne:N` maker.
pub fn ne(argument: &str) -> Result<Checker, CheckError> {
    size_checker(argument, Bound::NotEqual)
}

/// `min:N` maker.
pub fn min(argument: &str) -> Result<Checker, CheckError> {
    size_checker(argument, Bound::AtLeast)
}

/// `max:N` maker.
pub fn max(argument: &str) -> Result<Checker, CheckError> {
    size_checker(argument, Bound::AtMost)
}

fn size_checker(argument: &str, bound: Bound) -> Result<Checker, CheckError> {
    let argument = argument.to_string();
    Ok(Arc::new(move |value: &Value<'_>| {
        compare_size(value, &argument, bound)
    }))
}

fn compare_size(value: &Value<'_>, argument: &str, bound: Bound) -> Result<(), CheckError> {
    match value {
        Value::Absent => Ok(()),
        Value::Int(n) => compare(*n, parse_argument::<i64>(argument)?, bound, "", |v: i64| v.to_string()),
        Value::Uint(n) => compare(*n, parse_argument::<u64>(argument)?, bound, "", |v: u64| v.to_string()),
        Value::Float(x) => compare(*x, parse_argument::<f64>(argument)?, bound, "", |v| {
            format!("{v:.0}")
        }),
        Value::Str(s) => compare_len(s.len(), argument, bound),
        Value::Seq { len } => compare_len(*len, argument, bound),
        other => Err(CheckError::UnsupportedKind(other.kind())),
    }
}

/// Lengths compare against a signed bound, so `min:-1` holds for any length.
fn compare_len(len: usize, argument: &str, bound: Bound) -> Result<(), CheckError> {
    let len = i64::try_from(len).unwrap_or(i64::MAX);
    compare(len, parse_argument::<i64>(argument)?, bound, "len ", |v: i64| v.to_string())
}

fn compare<T, F>(
    actual: T,
    expected: T,
    bound: Bound,
    label: &str,
    render: F,
) -> Result<(), CheckError>
where
    T: PartialOrd + Copy,
    F: Fn(T) -> String,
{
    if bound.is_violated(actual.partial_cmp(&expected)) {
        return Err(CheckError::invalid(format!(
            "{label}{} is {} {}",
            render(actual),
            bound.violation(),
            render(expected)
        )));
    }
    Ok(())
}

fn parse_argument<T>(argument: &str) -> Result<T, CheckError>
where
    T: FromStr,
    T::Err: Display,
{
    argument
        .trim()
        .parse()
        .map_err(|err| CheckError::argument(argument, err))
}
