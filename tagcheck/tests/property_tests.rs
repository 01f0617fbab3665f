//! Property tests for the validation engine.

use proptest::prelude::*;
use tagcheck::{checksum, ErrorKind, Structured, Validator};

#[derive(Structured)]
pub struct Token {
    #[tag(validate = "required,uuid")]
    pub id: String,
    #[tag(validate = "required")]
    pub label: String,
}

#[derive(Structured)]
pub struct Envelope {
    pub token: Option<Box<Token>>,
}

/// Append the Luhn check digit to a digit string.
fn with_luhn_digit(payload: &str) -> String {
    let sum: u32 = payload
        .chars()
        .rev()
        .filter_map(|c| c.to_digit(10))
        .enumerate()
        .map(|(i, d)| {
            if i % 2 == 0 {
                let doubled = d * 2;
                if doubled > 9 {
                    doubled - 9
                } else {
                    doubled
                }
            } else {
                d
            }
        })
        .sum();
    format!("{payload}{}", (10 - sum % 10) % 10)
}

proptest! {
    #[test]
    fn prop_generated_uuids_pass(seed in any::<u128>(), label in "[a-z]{1,10}") {
        let id = uuid::Uuid::from_u128(seed);
        for text in [id.hyphenated().to_string(), id.simple().to_string()] {
            let token = Token { id: text, label: label.clone() };
            prop_assert!(Validator::new().validate(&token, &[]).is_ok());
        }
    }

    #[test]
    fn prop_time_ordered_uuids_pass(_round in 0u8..16) {
        let id = uuid::Uuid::now_v7().to_string().to_uppercase();
        prop_assert!(Validator::new().check_value(&id, "uuid").is_ok());
    }

    #[test]
    fn prop_truncated_uuids_fail(seed in any::<u128>(), cut in 1usize..8) {
        let mut text = uuid::Uuid::from_u128(seed).hyphenated().to_string();
        text.truncate(text.len() - cut);
        let err = Validator::new().check_value(&text, "uuid").unwrap_err();
        prop_assert_eq!(err.kind(), ErrorKind::CheckFailed);
    }

    #[test]
    fn prop_required_matches_zero(text in ".{0,8}", number in any::<i64>()) {
        let validator = Validator::new();
        prop_assert_eq!(validator.check_value(&text, "required").is_ok(), !text.is_empty());
        prop_assert_eq!(validator.check_value(&number, "required").is_ok(), number != 0);
    }

    #[test]
    fn prop_reference_transparency(label in "[a-z]{0,4}", valid in any::<bool>()) {
        let id = if valid {
            uuid::Uuid::now_v7().to_string()
        } else {
            "not-a-uuid".to_string()
        };
        let envelope = Envelope {
            token: Some(Box::new(Token { id, label })),
        };
        let validator = Validator::new();
        let direct = validator.validate(&envelope, &[]).map_err(|e| e.to_string());
        prop_assert_eq!(validator.validate(&&envelope, &[]).map_err(|e| e.to_string()), direct.clone());
        prop_assert_eq!(
            validator.validate(&Some(Some(&&envelope)), &[]).map_err(|e| e.to_string()),
            direct.clone()
        );
        prop_assert_eq!(
            validator.validate(&std::sync::Arc::new(Box::new(&envelope)), &[]).map_err(|e| e.to_string()),
            direct
        );
    }

    #[test]
    fn prop_parse_tolerance(pad in prop::collection::vec("[ ,]{0,3}", 3), value in 0i64..100) {
        let noisy = format!("{}min:10,{}max:50{}", pad[0], pad[1], pad[2]);
        let validator = Validator::new();
        let expected = validator.check_value(&value, "min:10,max:50").map_err(|e| e.to_string());
        prop_assert_eq!(validator.check_value(&value, &noisy).map_err(|e| e.to_string()), expected);
    }

    #[test]
    fn prop_luhn_check_digit(payload in "[0-9]{1,18}") {
        let number = with_luhn_digit(&payload);
        prop_assert!(checksum::luhn(&number).is_ok());
        prop_assert!(Validator::new().check_value(&number, "luhn").is_ok());

        let last = number.chars().last().and_then(|c| c.to_digit(10)).unwrap_or(0);
        let broken = format!("{}{}", &payload, (last + 1) % 10);
        prop_assert!(checksum::luhn(&broken).is_err());
    }

    #[test]
    fn prop_npi_is_prefixed_luhn(payload in "[0-9]{9}") {
        let prefixed = with_luhn_digit(&format!("80840{payload}"));
        let npi = &prefixed[5..];
        prop_assert!(checksum::npi(npi).is_ok());
        prop_assert!(Validator::new().check_value(npi, "npi").is_ok());
    }
}
