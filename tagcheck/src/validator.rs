//! The validation engine.

use std::fmt;
use std::sync::OnceLock;

use tracing::{debug, trace};

use crate::checks::register_builtins;
use crate::config::ValidatorConfig;
use crate::error::{CheckError, ConfigError, Failure, ValidationError, ValidationResult};
use crate::parser::parse_check_list;
use crate::registry::{Checker, CheckerRegistry};
use crate::value::{Checkable, Value};

/// Walks records and runs the checks named in their field tags.
///
/// Each validator owns its configuration and its checker registry. Custom
/// checkers registered on one validator are invisible to the others.
///
/// # Example
/// ```rust
/// use tagcheck::{Structured, Validator};
///
/// #[derive(Structured)]
/// pub struct Signup {
///     #[tag(validate = "required,email")]
///     pub email: String,
///     #[tag(validate = "min:8")]
///     pub password: String,
/// }
///
/// let validator = Validator::new();
/// let signup = Signup { email: "a@b.co".into(), password: "short".into() };
/// let err = validator.validate(&signup, &[]).unwrap_err();
/// assert_eq!(err.to_string(), "password: min check failed: len 5 is less than 8");
/// ```
pub struct Validator {
    config: ValidatorConfig,
    registry: CheckerRegistry,
}

impl Validator {
    /// A validator with the default configuration and every built-in check.
    pub fn new() -> Self {
        Self::build(ValidatorConfig::default(), true)
    }

    /// Like [`Validator::new`], reading check lists from `tag_name`.
    pub fn with_tag(tag_name: impl Into<String>) -> Self {
        Self::build(ValidatorConfig::new().with_tag_name(tag_name), true)
    }

    /// A validator with every built-in check and a custom configuration.
    pub fn with_config(config: ValidatorConfig) -> Result<Self, ConfigError> {
        config.validate_config()?;
        Ok(Self::build(config, true))
    }

    /// A validator with no registered checks at all.
    pub fn empty(config: ValidatorConfig) -> Result<Self, ConfigError> {
        config.validate_config()?;
        Ok(Self::build(config, false))
    }

    fn build(config: ValidatorConfig, builtins: bool) -> Self {
        let registry = CheckerRegistry::new();
        if builtins {
            register_builtins(&registry);
        }
        debug!(tag = %config.tag_name, builtins, "created validator");
        Self { config, registry }
    }

    /// The process-wide default validator.
    pub fn global() -> &'static Validator {
        static GLOBAL: OnceLock<Validator> = OnceLock::new();
        GLOBAL.get_or_init(Validator::new)
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    pub fn registry(&self) -> &CheckerRegistry {
        &self.registry
    }

    /// Register a checker, replacing any previous one with the same name.
    pub fn register_checker<F>(&self, name: impl Into<String>, checker: F)
    where
        F: Fn(&Value<'_>) -> Result<(), CheckError> + Send + Sync + 'static,
    {
        self.registry.register_checker(name, checker);
    }

    /// Register a checker maker, replacing any previous one with the same name.
    pub fn register_checker_maker<F>(&self, name: impl Into<String>, maker: F)
    where
        F: Fn(&str) -> Result<Checker, CheckError> + Send + Sync + 'static,
    {
        self.registry.register_checker_maker(name, maker);
    }

    /// Validate a value and, when it is a record, every field below it.
    ///
    /// `checks` are extra check lists applied to the root value before its
    /// fields are visited. Validation stops at the first failure.
    pub fn validate<T: Checkable + ?Sized>(
        &self,
        value: &T,
        checks: &[&str],
    ) -> ValidationResult<()> {
        let check_list = checks.join(&self.config.check_separator);
        let mut scope = Vec::new();
        self.walk(value.value(), &check_list, &mut scope)
    }

    /// Run a single check list against a value.
    ///
    /// Records are walked exactly as [`Validator::validate`] does.
    pub fn check_value<T: Checkable + ?Sized>(
        &self,
        value: &T,
        check_list: &str,
    ) -> ValidationResult<()> {
        let mut scope = Vec::new();
        self.walk(value.value(), check_list, &mut scope)
    }

    fn walk(
        &self,
        value: Value<'_>,
        check_list: &str,
        scope: &mut Vec<String>,
    ) -> ValidationResult<()> {
        let value = value
            .resolve()
            .map_err(|failure| ValidationError::new(scope.clone(), failure))?;

        if !check_list.trim().is_empty() {
            self.run_checks(&value, check_list).map_err(|failure| {
                debug!(scope = %scope.join("."), error = %failure, "validation failed");
                ValidationError::new(scope.clone(), failure)
            })?;
        }

        let Value::Struct(record) = value else {
            return Ok(());
        };

        trace!(record = record.type_name(), scope = %scope.join("."), "walking record");
        for field in record.fields() {
            let check_list = field.tag(&self.config.tag_name).unwrap_or_default();

            if !field.is_public() {
                if self.config.error_on_private && !check_list.trim().is_empty() {
                    scope.push(field.name().to_string());
                    return Err(ValidationError::new(scope.clone(), Failure::PrivateField));
                }
                continue;
            }

            let nested = matches!(field.value().value().resolve(), Ok(Value::Struct(_)));
            if check_list.trim().is_empty() && !nested {
                continue;
            }

            scope.push(field.name().to_string());
            self.walk(field.value().value(), check_list, scope)?;
            scope.pop();
        }

        Ok(())
    }

    fn run_checks(&self, value: &Value<'_>, check_list: &str) -> Result<(), Failure> {
        let checks = parse_check_list(check_list, &self.config, &self.registry)?;
        let zero = value.is_zero();

        for check in &checks {
            if zero && !self.config.is_exempt_from_zero_skip(&check.name) {
                trace!(check = %check.name, "skipping check on zero value");
                continue;
            }
            (check.checker)(value).map_err(|cause| Failure::CheckFailed {
                check: check.name.clone(),
                cause,
            })?;
        }

        Ok(())
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator")
            .field("config", &self.config)
            .field("registry", &self.registry)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::structured::{Field, Structured};

    struct Inner {
        code: String,
    }

    impl Structured for Inner {
        fn fields(&self) -> Vec<Field<'_>> {
            vec![Field::new("code", &self.code).with_tags(&[("validate", "required,min:2")])]
        }
    }

    impl Checkable for Inner {
        fn value(&self) -> Value<'_> {
            Value::Struct(self)
        }
    }

    struct Outer {
        name: String,
        inner: Option<Box<Inner>>,
        secret: String,
    }

    impl Structured for Outer {
        fn fields(&self) -> Vec<Field<'_>> {
            vec![
                Field::new("name", &self.name).with_tags(&[("validate", "required")]),
                Field::new("inner", &self.inner),
                Field::new("secret", &self.secret)
                    .with_public(false)
                    .with_tags(&[("validate", "required")]),
            ]
        }
    }

    impl Checkable for Outer {
        fn value(&self) -> Value<'_> {
            Value::Struct(self)
        }
    }

    fn outer(name: &str, code: Option<&str>) -> Outer {
        Outer {
            name: name.to_string(),
            inner: code.map(|code| {
                Box::new(Inner {
                    code: code.to_string(),
                })
            }),
            secret: String::new(),
        }
    }

    #[test]
    fn test_nested_scope() {
        let validator =
            Validator::with_config(ValidatorConfig::new().with_error_on_private(false)).unwrap();
        let err = validator.validate(&outer("x", Some("a")), &[]).unwrap_err();
        assert_eq!(err.to_string(), "inner.code: min check failed: len 1 is less than 2");
        assert_eq!(err.scope(), ["inner", "code"]);
    }

    #[test]
    fn test_absent_nested_record_is_skipped() {
        let validator =
            Validator::with_config(ValidatorConfig::new().with_error_on_private(false)).unwrap();
        assert!(validator.validate(&outer("x", None), &[]).is_ok());
    }

    #[test]
    fn test_fail_fast_in_declaration_order() {
        let validator = Validator::new();
        let err = validator.validate(&outer("", Some("a")), &[]).unwrap_err();
        assert_eq!(err.to_string(), "name: required check failed: value missing");
    }

    #[test]
    fn test_private_field_policy() {
        let validator = Validator::new();
        let err = validator.validate(&outer("x", Some("ab")), &[]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PrivateField);
        assert_eq!(err.to_string(), "secret: private field, will not validate");
    }

    #[test]
    fn test_root_checks() {
        let validator = Validator::new();
        assert!(validator.check_value(&5, "min:3").is_ok());
        assert_eq!(
            validator.check_value(&2, "min:3").unwrap_err().to_string(),
            "min check failed: 2 is less than 3"
        );
        assert!(validator.validate(&"abc", &["required", "max:5"]).is_ok());
        assert!(validator.validate(&42, &[]).is_ok());
    }

    #[test]
    fn test_zero_skip() {
        let validator = Validator::new();
        assert!(validator.check_value("", "email").is_ok());
        assert!(validator.check_value(&0, "min:1").is_err());
        assert!(validator.check_value(&None::<String>, "email,uuid").is_ok());
        assert!(validator.check_value(&None::<String>, "required").is_err());
    }

    #[test]
    fn test_custom_checker_is_per_instance() {
        let a = Validator::new();
        let b = Validator::new();
        a.register_checker("even", |value: &Value<'_>| match value {
            Value::Int(n) if n % 2 == 0 => Ok(()),
            _ => Err(CheckError::invalid("not even")),
        });
        assert!(a.check_value(&4, "even").is_ok());
        assert_eq!(
            a.check_value(&3, "even").unwrap_err().to_string(),
            "even check failed: not even"
        );
        assert_eq!(
            b.check_value(&4, "even").unwrap_err().to_string(),
            "invalid checker: even"
        );
    }

    #[test]
    fn test_empty_validator() {
        let validator = Validator::empty(ValidatorConfig::default()).unwrap();
        assert!(validator.registry().is_empty());
        assert!(validator.check_value("x", "required").is_err());
        assert!(validator.check_value("x", "").is_ok());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = ValidatorConfig::new().with_check_separator("");
        assert!(Validator::with_config(config).is_err());
    }
}
