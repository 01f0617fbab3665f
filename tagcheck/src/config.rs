//! Configuration for a [`Validator`](crate::Validator).
//!
//! # Example
//! ```rust
//! use tagcheck::{Validator, ValidatorConfig};
//!
//! let config = ValidatorConfig::new()
//!     .with_tag_name("check")
//!     .with_check_separator(" ")
//!     .with_argument_separator("=");
//! let validator = Validator::with_config(config).unwrap();
//! assert!(validator.check_value("bar", "one_of=foo|bar").is_ok());
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default metadata tag consulted on each field.
pub const DEFAULT_TAG_NAME: &str = "validate";

/// Default separator between check segments.
pub const DEFAULT_CHECK_SEPARATOR: &str = ",";

/// Default separator between a maker name and its argument.
pub const DEFAULT_ARGUMENT_SEPARATOR: &str = ":";

/// Checks that still run when the value is zero.
pub const DEFAULT_DONT_SKIP_ZERO: [&str; 5] = ["required", "eq", "ne", "min", "max"];

/// Validator configuration.
///
/// # Fields
///
/// * `tag_name` - Name of the field tag that holds the check list.
///   Default: `"validate"`.
///
/// * `check_separator` - Separator between check segments. Default: `","`.
///
/// * `argument_separator` - Separator between a checker maker name and its
///   argument. Default: `":"`.
///
/// * `dont_skip_zero` - Check names that run even on zero values. Every
///   other check is skipped when the value is zero. Default: `required`,
///   `eq`, `ne`, `min`, `max`.
///
/// * `error_on_private` - Report non-public fields that carry a check list.
///   When false such fields are silently skipped. Default: true.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Field tag holding the check list (default: "validate")
    pub tag_name: String,
    /// Check segment separator (default: ",")
    pub check_separator: String,
    /// Maker/argument separator (default: ":")
    pub argument_separator: String,
    /// Checks exempt from zero-skip
    pub dont_skip_zero: Vec<String>,
    /// Fail on tagged non-public fields (default: true)
    pub error_on_private: bool,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            tag_name: DEFAULT_TAG_NAME.to_string(),
            check_separator: DEFAULT_CHECK_SEPARATOR.to_string(),
            argument_separator: DEFAULT_ARGUMENT_SEPARATOR.to_string(),
            dont_skip_zero: DEFAULT_DONT_SKIP_ZERO.iter().map(|s| s.to_string()).collect(),
            error_on_private: true,
        }
    }
}

impl ValidatorConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from JSON. Missing keys take their defaults.
    ///
    /// # Example
    /// ```rust
    /// use tagcheck::ValidatorConfig;
    ///
    /// let config = ValidatorConfig::from_json(r#"{"tag_name": "check"}"#).unwrap();
    /// assert_eq!(config.tag_name, "check");
    /// assert_eq!(config.check_separator, ",");
    /// ```
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate_config()?;
        Ok(config)
    }

    pub fn with_tag_name(mut self, tag_name: impl Into<String>) -> Self {
        self.tag_name = tag_name.into();
        self
    }

    pub fn with_check_separator(mut self, separator: impl Into<String>) -> Self {
        self.check_separator = separator.into();
        self
    }

    pub fn with_argument_separator(mut self, separator: impl Into<String>) -> Self {
        self.argument_separator = separator.into();
        self
    }

    /// Replace the zero-skip exemption set.
    ///
    /// # Example
    /// ```rust
    /// use tagcheck::ValidatorConfig;
    ///
    /// let config = ValidatorConfig::new().with_dont_skip_zero(["required", "nonzero"]);
    /// assert!(config.is_exempt_from_zero_skip("nonzero"));
    /// assert!(!config.is_exempt_from_zero_skip("min"));
    /// ```
    pub fn with_dont_skip_zero<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dont_skip_zero = names.into_iter().map(Into::into).collect();
        self
    }

    /// Add one name to the zero-skip exemption set.
    pub fn exempt_from_zero_skip(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !self.is_exempt_from_zero_skip(&name) {
            self.dont_skip_zero.push(name);
        }
        self
    }

    pub fn with_error_on_private(mut self, enabled: bool) -> Self {
        self.error_on_private = enabled;
        self
    }

    /// Whether the named check runs on zero values.
    pub fn is_exempt_from_zero_skip(&self, check_name: &str) -> bool {
        self.dont_skip_zero.iter().any(|name| name == check_name)
    }

    /// Reject configurations the tag parser cannot work with.
    pub fn validate_config(&self) -> Result<(), ConfigError> {
        if self.check_separator.is_empty() {
            return Err(ConfigError::EmptySeparator("check"));
        }
        if self.argument_separator.is_empty() {
            return Err(ConfigError::EmptySeparator("argument"));
        }
        if self.check_separator == self.argument_separator {
            return Err(ConfigError::SameSeparators(self.check_separator.clone()));
        }
        Ok(())
    }
}
