//! Basic Usage Example
//!
//! This example demonstrates validating nested records with field tags,
//! registering custom checks and reading structured error reports.
//!
//! Run with: `cargo run --example basic_usage`

use std::sync::Arc;

use tagcheck::{CheckError, Checker, Structured, Validator, ValidatorConfig, Value};

// =============================================================================
// Example 1: Tagged Records
// =============================================================================

#[derive(Debug, Structured)]
pub struct Address {
    #[tag(validate = "required")]
    pub street: String,
    #[tag(validate = "required,alpha")]
    pub city: String,
    #[tag(validate = "required,numeric,min:4,max:10")]
    pub postal_code: String,
}

#[derive(Debug, Structured)]
pub struct Customer {
    #[tag(validate = "required,uuid")]
    pub id: String,
    #[tag(validate = "required,email")]
    pub email: String,
    #[tag(validate = "min:18,max:130")]
    pub age: u8,
    #[tag(validate = "one_of:basic|premium")]
    pub plan: String,
    #[tag(validate = "creditcard")]
    pub card: Option<String>,
    pub address: Option<Box<Address>>,
}

fn customer() -> Customer {
    Customer {
        id: "f47ac10b-58cc-0372-8567-0e02b2c3d479".into(),
        email: "jane@example.com".into(),
        age: 34,
        plan: "premium".into(),
        card: Some("4111 1111 1111 1111".into()),
        address: Some(Box::new(Address {
            street: "Karl Johans gate 1".into(),
            city: "Oslo".into(),
            postal_code: "0154".into(),
        })),
    }
}

// =============================================================================
// Example 2: Custom Checks
// =============================================================================

fn register_custom_checks(validator: &Validator) {
    validator.register_checker("no_spaces", |value: &Value<'_>| {
        let text = value.text()?;
        if text.contains(' ') {
            Err(CheckError::invalid(format!("{:?} contains spaces", text.as_ref())))
        } else {
            Ok(())
        }
    });

    validator.register_checker_maker("suffix", |argument: &str| {
        let suffix = argument.to_string();
        let checker: Checker = Arc::new(move |value: &Value<'_>| -> Result<(), CheckError> {
            if value.text()?.ends_with(&suffix) {
                Ok(())
            } else {
                Err(CheckError::invalid(format!("does not end with {suffix:?}")))
            }
        });
        Ok(checker)
    });
}

#[derive(Debug, Structured)]
pub struct Deployment {
    #[tag(validate = "required,no_spaces,suffix:.internal")]
    pub host: String,
}

// =============================================================================
// Example 3: Custom Configuration
// =============================================================================

#[derive(Debug, Structured)]
pub struct Rule {
    #[tag(rule = "required; min=2; regex=^[A-Z_]+$")]
    pub name: String,
}

fn main() {
    println!("=== tagcheck Basic Usage Examples ===\n");

    // Example 1: a valid record, then a few broken ones
    let validator = Validator::new();
    println!("1. Tagged Records:");
    println!("   valid customer: {:?}", validator.validate(&customer(), &[]));

    let mut young = customer();
    young.age = 12;
    if let Err(err) = validator.validate(&young, &[]) {
        println!("   underage: {err}");
    }

    let mut moved = customer();
    if let Some(address) = moved.address.as_mut() {
        address.postal_code = "01x4".into();
    }
    if let Err(err) = validator.validate(&moved, &[]) {
        println!("   bad address: {err} (path: {})", err.path());
    }
    println!();

    // Example 2: custom checkers and makers
    println!("2. Custom Checks:");
    register_custom_checks(&validator);
    for host in ["db.internal", "db.example.com", "db .internal"] {
        let deployment = Deployment { host: host.into() };
        match validator.validate(&deployment, &[]) {
            Ok(()) => println!("   {host:?}: ok"),
            Err(err) => println!("   {host:?}: {err}"),
        }
    }
    println!();

    // Example 3: different tag name and separators
    println!("3. Custom Configuration:");
    let config = ValidatorConfig::new()
        .with_tag_name("rule")
        .with_check_separator(";")
        .with_argument_separator("=");
    match Validator::with_config(config) {
        Ok(rules) => {
            for name in ["MAX_RETRIES", "x", "lower_case"] {
                let rule = Rule { name: name.into() };
                match rules.validate(&rule, &[]) {
                    Ok(()) => println!("   {name:?}: ok"),
                    Err(err) => println!("   {name:?}: {err}"),
                }
            }
        }
        Err(err) => println!("   invalid configuration: {err}"),
    }
    println!();

    // Example 4: machine-readable reports
    println!("4. Error Reports:");
    let mut anonymous = customer();
    anonymous.email.clear();
    if let Err(err) = tagcheck::validate(&anonymous, &[]) {
        match serde_json::to_string_pretty(&err.report()) {
            Ok(json) => println!("{json}"),
            Err(err) => println!("   could not serialize report: {err}"),
        }
    }
}
