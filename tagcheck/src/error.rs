//! Error types for validation.
//!
//! Errors come in three layers:
//!
//! - [`CheckError`] is what a single checker (or checker maker) reports.
//! - [`Failure`] adds the check name or the offending tag segment.
//! - [`ValidationError`] adds the dotted scope path of the failing field.
//!
//! [`ErrorKind`] classifies any of these for programmatic handling.
//!
//! # Example
//! ```rust
//! use tagcheck::{ErrorKind, Validator};
//!
//! let validator = Validator::new();
//! let err = validator.check_value("", "required").unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::MissingValue);
//! assert_eq!(err.to_string(), "required check failed: value missing");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::value::Kind;

/// Classification of validation errors.
///
/// When serialized, kinds are converted to SCREAMING_SNAKE_CASE
/// (e.g., `MissingValue` becomes `"MISSING_VALUE"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// A `required`-class check found a zero or absent value
    MissingValue,
    /// A named check rejected the value
    CheckFailed,
    /// The check list referenced an unknown or malformed check
    InvalidChecker,
    /// A non-public field carries a check list
    PrivateField,
    /// A reference chain was too deep to resolve
    DerefLimit,
}

impl ErrorKind {
    /// Returns the string representation of the error kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingValue => "MISSING_VALUE",
            Self::CheckFailed => "CHECK_FAILED",
            Self::InvalidChecker => "INVALID_CHECKER",
            Self::PrivateField => "PRIVATE_FIELD",
            Self::DerefLimit => "DEREF_LIMIT",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned by a checker or a checker maker.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CheckError {
    /// The value is zero or absent.
    #[error("value missing")]
    Missing,

    /// The value does not satisfy the check.
    #[error("{0}")]
    Invalid(String),

    /// The check cannot be applied to values of this kind.
    #[error("unsupported kind {0}")]
    UnsupportedKind(Kind),

    /// A pattern argument failed to compile.
    #[error(transparent)]
    Pattern(#[from] regex::Error),

    /// A check argument could not be interpreted.
    #[error("invalid argument {argument:?}: {reason}")]
    Argument { argument: String, reason: String },
}

impl CheckError {
    /// Create an [`CheckError::Invalid`] error from a message.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid(message.into())
    }

    /// Create an [`CheckError::Argument`] error.
    pub fn argument(argument: impl Into<String>, reason: impl fmt::Display) -> Self {
        Self::Argument {
            argument: argument.into(),
            reason: reason.to_string(),
        }
    }
}

/// A validation failure, before it is attributed to a field.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Failure {
    /// A check rejected the value.
    #[error("{check} check failed: {cause}")]
    CheckFailed {
        check: String,
        #[source]
        cause: CheckError,
    },

    /// A tag segment names no known checker, or is a malformed invocation.
    #[error("invalid checker: {segment}")]
    UnknownChecker { segment: String },

    /// A checker maker rejected its argument.
    #[error("invalid checker: {segment}: {cause}")]
    MakerRejected {
        segment: String,
        #[source]
        cause: CheckError,
    },

    /// A non-public field carries a check list.
    #[error("private field, will not validate")]
    PrivateField,

    /// The value sits behind more reference layers than the engine follows.
    #[error("reference chain exceeds {limit} levels")]
    DerefLimit { limit: usize },
}

impl Failure {
    /// Returns the kind of this failure.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::CheckFailed {
                cause: CheckError::Missing,
                ..
            } => ErrorKind::MissingValue,
            Self::CheckFailed { .. } => ErrorKind::CheckFailed,
            Self::UnknownChecker { .. } | Self::MakerRejected { .. } => ErrorKind::InvalidChecker,
            Self::PrivateField => ErrorKind::PrivateField,
            Self::DerefLimit { .. } => ErrorKind::DerefLimit,
        }
    }
}

/// The error returned by a validation call.
///
/// Displays as `"<scope path>: <failure>"`, or just the failure when it
/// happened on the root value.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{}{failure}", scope_prefix(.scope))]
pub struct ValidationError {
    scope: Vec<String>,
    #[source]
    failure: Failure,
}

fn scope_prefix(scope: &[String]) -> String {
    if scope.is_empty() {
        String::new()
    } else {
        format!("{}: ", scope.join("."))
    }
}

impl ValidationError {
    /// Create a new error for the given scope.
    pub fn new(scope: Vec<String>, failure: Failure) -> Self {
        Self { scope, failure }
    }

    /// Create an error on the root value.
    pub fn root(failure: Failure) -> Self {
        Self::new(Vec::new(), failure)
    }

    /// Returns the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        self.failure.kind()
    }

    /// Field names from the outermost record down to the failing field.
    pub fn scope(&self) -> &[String] {
        &self.scope
    }

    /// The scope joined with dots (empty for the root value).
    pub fn path(&self) -> String {
        self.scope.join(".")
    }

    /// The unscoped failure.
    pub fn failure(&self) -> &Failure {
        &self.failure
    }

    /// The display name of the failing check, when a check ran.
    pub fn check_name(&self) -> Option<&str> {
        match &self.failure {
            Failure::CheckFailed { check, .. } => Some(check),
            _ => None,
        }
    }

    /// Convert into a serializable report.
    pub fn report(&self) -> ErrorReport {
        ErrorReport {
            field: self.path(),
            check: self.check_name().map(str::to_owned),
            message: self.failure.to_string(),
            code: self.kind(),
        }
    }
}

/// Serializable summary of a [`ValidationError`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReport {
    /// Dotted path of the failing field (empty for the root value)
    pub field: String,
    /// Display name of the failing check, if one ran
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check: Option<String>,
    /// Human-readable message, without the field path
    pub message: String,
    /// Error kind
    pub code: ErrorKind,
}

/// Error returned when a [`ValidatorConfig`](crate::ValidatorConfig) is unusable.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} separator cannot be empty")]
    EmptySeparator(&'static str),

    #[error("check separator and argument separator must differ (both {0:?})")]
    SameSeparators(String),

    #[error("invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for validation calls.
pub type ValidationResult<T> = Result<T, ValidationError>;
