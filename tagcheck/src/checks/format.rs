//! Format predicates over a value's text.

use std::net::IpAddr;

use crate::checks::pattern::{builtin_pattern, matches_pattern};
use crate::checksum;
use crate::error::CheckError;
use crate::value::Value;

builtin_pattern!(email_pattern => concat!(
    r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@",
    r"[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?",
    r"(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$"
));
builtin_pattern!(uuid_pattern =>
    r"(?i)^[0-9a-f]{8}-?[0-9a-f]{4}-?[0-9a-f]{4}-?[0-9a-f]{4}-?[0-9a-f]{12}$");
builtin_pattern!(mongoid_pattern => r"(?i)^[0-9a-f]{24}$");
builtin_pattern!(hexadecimal_pattern => r"(?i)^[0-9a-f]+$");
builtin_pattern!(base64_pattern =>
    r"(?i)^(?:[a-z0-9+/]{4})*(?:[a-z0-9+/]{2}==|[a-z0-9+/]{3}=)?$");
builtin_pattern!(domain_pattern => r"(?i)^([a-z0-9]([a-z0-9\-]{0,61}[a-z0-9])?\.)+[a-z]{2,}$");
builtin_pattern!(ssn_pattern => concat!(
    r"^(0(0[1-9]|[1-9]\d)|[1-5]\d\d|6([0-5]\d|6[0-5]|6[7-9]|[7-9]\d)|[7-8]\d\d)",
    r"-(0[1-9]|[1-9]\d)",
    r"-(000[1-9]|00[1-9]\d|0[1-9]\d\d|[1-9]\d\d\d)$"
));
builtin_pattern!(alpha_pattern => r"(?i)^[a-z]*$");
builtin_pattern!(alphanum_pattern => r"(?i)^[a-z0-9]*$");
builtin_pattern!(numeric_pattern => r"^\d*$");
builtin_pattern!(rgb_pattern => concat!(
    r"^rgb\(((?:2(?:5[0-5]|[0-4]\d)|1\d\d|[1-9]?\d)),",
    r"((?:2(?:5[0-5]|[0-4]\d)|1\d\d|[1-9]?\d)),",
    r"((?:2(?:5[0-5]|[0-4]\d)|1\d\d|[1-9]?\d))\)$"
));
builtin_pattern!(rgba_pattern => concat!(
    r"^rgba\(((?:2(?:5[0-5]|[0-4]\d)|1\d\d|[1-9]?\d)),",
    r"((?:2(?:5[0-5]|[0-4]\d)|1\d\d|[1-9]?\d)),",
    r"((?:2(?:5[0-5]|[0-4]\d)|1\d\d|[1-9]?\d)),",
    r"(0|1|0?\.\d+)\)$"
));

pub(crate) fn uuid(value: &Value<'_>) -> Result<(), CheckError> {
    matches_pattern(value, uuid_pattern())
}

pub(crate) fn mongoid(value: &Value<'_>) -> Result<(), CheckError> {
    matches_pattern(value, mongoid_pattern())
}

pub(crate) fn hexadecimal(value: &Value<'_>) -> Result<(), CheckError> {
    matches_pattern(value, hexadecimal_pattern())
}

pub(crate) fn base64(value: &Value<'_>) -> Result<(), CheckError> {
    matches_pattern(value, base64_pattern())
}

pub(crate) fn domain(value: &Value<'_>) -> Result<(), CheckError> {
    matches_pattern(value, domain_pattern())
}

pub(crate) fn ssn(value: &Value<'_>) -> Result<(), CheckError> {
    matches_pattern(value, ssn_pattern())
}

pub(crate) fn alpha(value: &Value<'_>) -> Result<(), CheckError> {
    matches_pattern(value, alpha_pattern())
}

pub(crate) fn alphanum(value: &Value<'_>) -> Result<(), CheckError> {
    matches_pattern(value, alphanum_pattern())
}

pub(crate) fn numeric(value: &Value<'_>) -> Result<(), CheckError> {
    matches_pattern(value, numeric_pattern())
}

pub(crate) fn rgb(value: &Value<'_>) -> Result<(), CheckError> {
    matches_pattern(value, rgb_pattern())
}

pub(crate) fn rgba(value: &Value<'_>) -> Result<(), CheckError> {
    matches_pattern(value, rgba_pattern())
}

/// Accepts `user@host` and `Display Name <user@host>`.
pub(crate) fn email(value: &Value<'_>) -> Result<(), CheckError> {
    let text = value.text()?;
    let address = match (text.rfind('<'), text.ends_with('>')) {
        (Some(open), true) => &text[open + 1..text.len() - 1],
        _ => text.trim(),
    };
    if email_pattern().is_match(address) {
        Ok(())
    } else {
        Err(CheckError::invalid(format!(
            "{:?} is not a valid email address",
            text.as_ref()
        )))
    }
}

/// Absolute URL with a scheme and a host.
pub(crate) fn url(value: &Value<'_>) -> Result<(), CheckError> {
    let text = value.text()?;
    let parsed = url::Url::parse(&text).map_err(|err| {
        CheckError::invalid(format!("{:?} is not a valid URL: {err}", text.as_ref()))
    })?;
    match parsed.host_str() {
        Some(host) if !host.is_empty() => Ok(()),
        _ => Err(CheckError::invalid(format!(
            "{:?} is not a valid URL (missing scheme or host)",
            text.as_ref()
        ))),
    }
}

fn parse_ip(text: &str) -> Option<IpAddr> {
    text.parse().ok()
}

fn is_v4(addr: &IpAddr) -> bool {
    match addr {
        IpAddr::V4(_) => true,
        IpAddr::V6(v6) => v6.to_ipv4_mapped().is_some(),
    }
}

pub(crate) fn ip(value: &Value<'_>) -> Result<(), CheckError> {
    let text = value.text()?;
    match parse_ip(&text) {
        Some(_) => Ok(()),
        None => Err(CheckError::invalid(format!(
            "{:?} is not a valid IP address",
            text.as_ref()
        ))),
    }
}

/// IPv4, including the IPv4-mapped IPv6 form.
pub(crate) fn ipv4(value: &Value<'_>) -> Result<(), CheckError> {
    let text = value.text()?;
    match parse_ip(&text) {
        Some(addr) if is_v4(&addr) => Ok(()),
        _ => Err(CheckError::invalid(format!(
            "{:?} is not a valid IPv4 address",
            text.as_ref()
        ))),
    }
}

pub(crate) fn ipv6(value: &Value<'_>) -> Result<(), CheckError> {
    let text = value.text()?;
    match parse_ip(&text) {
        Some(addr) if !is_v4(&addr) => Ok(()),
        _ => Err(CheckError::invalid(format!(
            "{:?} is not a valid IPv6 address",
            text.as_ref()
        ))),
    }
}

/// IEEE 802 MAC-48, EUI-48, EUI-64 or 20-octet InfiniBand address, in
/// colon, dash or dotted-quad notation.
pub(crate) fn mac(value: &Value<'_>) -> Result<(), CheckError> {
    let text = value.text()?;
    if parse_mac(text.as_bytes()) {
        Ok(())
    } else {
        Err(CheckError::invalid(format!(
            "{:?} is not a valid MAC address",
            text.as_ref()
        )))
    }
}

fn parse_mac(s: &[u8]) -> bool {
    const OCTET_COUNTS: [usize; 3] = [6, 8, 20];

    if s.len() < 14 {
        return false;
    }

    if s[2] == b':' || s[2] == b'-' {
        if (s.len() + 1) % 3 != 0 {
            return false;
        }
        let octets = (s.len() + 1) / 3;
        if !OCTET_COUNTS.contains(&octets) {
            return false;
        }
        let separator = s[2];
        (0..octets).all(|i| {
            let at = i * 3;
            let hex = s[at].is_ascii_hexdigit() && s[at + 1].is_ascii_hexdigit();
            hex && (at + 2 == s.len() || s[at + 2] == separator)
        })
    } else if s[4] == b'.' {
        if (s.len() + 1) % 5 != 0 {
            return false;
        }
        let octets = 2 * (s.len() + 1) / 5;
        if !OCTET_COUNTS.contains(&octets) {
            return false;
        }
        (0..octets / 2).all(|i| {
            let at = i * 5;
            let hex = s[at..at + 4].iter().all(u8::is_ascii_hexdigit);
            hex && (at + 4 == s.len() || s[at + 4] == b'.')
        })
    } else {
        false
    }
}

pub(crate) fn boolean(value: &Value<'_>) -> Result<(), CheckError> {
    let text = value.text()?;
    match text.to_ascii_lowercase().as_str() {
        "1" | "t" | "true" | "yes" | "y" | "on" | "0" | "f" | "false" | "no" | "n" | "off" => {
            Ok(())
        }
        _ => Err(CheckError::invalid(format!(
            "{:?} is not a valid boolean value",
            text.as_ref()
        ))),
    }
}

pub(crate) fn ascii(value: &Value<'_>) -> Result<(), CheckError> {
    let text = value.text()?;
    match text.char_indices().find(|(_, c)| !c.is_ascii()) {
        None => Ok(()),
        Some((at, c)) => Err(CheckError::invalid(format!(
            "{:?} contains non-ASCII character {c:?} at position {at}",
            text.as_ref()
        ))),
    }
}

pub(crate) fn lowercase(value: &Value<'_>) -> Result<(), CheckError> {
    let text = value.text()?;
    match text.char_indices().find(|(_, c)| c.is_uppercase()) {
        None => Ok(()),
        Some((at, c)) => Err(CheckError::invalid(format!(
            "{:?} contains uppercase character {c:?} at position {at}",
            text.as_ref()
        ))),
    }
}

pub(crate) fn uppercase(value: &Value<'_>) -> Result<(), CheckError> {
    let text = value.text()?;
    match text.char_indices().find(|(_, c)| c.is_lowercase()) {
        None => Ok(()),
        Some((at, c)) => Err(CheckError::invalid(format!(
            "{:?} contains lowercase character {c:?} at position {at}",
            text.as_ref()
        ))),
    }
}

pub(crate) fn json(value: &Value<'_>) -> Result<(), CheckError> {
    let text = value.text()?;
    serde_json::from_str::<serde::de::IgnoredAny>(&text)
        .map(|_| ())
        .map_err(|err| CheckError::invalid(format!("{:?} is not valid JSON: {err}", text.as_ref())))
}

pub(crate) fn luhn(value: &Value<'_>) -> Result<(), CheckError> {
    checksum::luhn(&checksum::normalize_luhn_input(value)?)
}

pub(crate) fn isbn(value: &Value<'_>) -> Result<(), CheckError> {
    checksum::isbn(&value.text()?)
}

pub(crate) fn npi(value: &Value<'_>) -> Result<(), CheckError> {
    checksum::npi(&value.text()?)
}

/// 13 to 19 digits (spaces and dashes ignored) passing the Luhn check.
pub(crate) fn creditcard(value: &Value<'_>) -> Result<(), CheckError> {
    let digits = checksum::normalize_luhn_input(value)?;
    if !(13..=19).contains(&digits.len()) {
        return Err(CheckError::invalid(format!(
            "{digits:?} is not a valid credit card number (wrong length)"
        )));
    }
    if let Some(c) = digits.chars().find(|c| !c.is_ascii_digit()) {
        return Err(CheckError::invalid(format!(
            "{digits:?} contains non-digit character: {c:?}"
        )));
    }
    checksum::luhn(&digits)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Value<'_> {
        Value::Str(s.into())
    }

    fn check_table(
        checker: fn(&Value<'_>) -> Result<(), CheckError>,
        valid: &[&str],
        invalid: &[&str],
    ) {
        for input in valid {
            assert!(checker(&text(input)).is_ok(), "expected {input:?} to pass");
        }
        for input in invalid {
            assert!(checker(&text(input)).is_err(), "expected {input:?} to fail");
        }
    }

    #[test]
    fn test_email() {
        check_table(
            email,
            &[
                "test@example.com",
                "test@sub.example.com",
                "test+tag@example.com",
                "first.last@example.com",
                "Jane Doe <jane@example.com>",
            ],
            &["testexample.com", "test@", "@example.com", "test@test@example.com", ""],
        );
        assert!(email(&Value::Int(12345)).is_err());
        assert_eq!(
            email(&text("nope")).unwrap_err().to_string(),
            "\"nope\" is not a valid email address"
        );
    }

    #[test]
    fn test_url() {
        check_table(
            url,
            &[
                "http://example.com",
                "https://example.com/path?query=value",
                "https://example.com:8080",
                "ftp://ftp.example.org",
            ],
            &["example.com", "htt:/example.com", "\x12", "http://", ""],
        );
        assert!(url(&Value::Int(12345)).is_err());
        assert_eq!(
            url(&text("htt:/example.com")).unwrap_err().to_string(),
            "\"htt:/example.com\" is not a valid URL (missing scheme or host)"
        );
    }

    #[test]
    fn test_ip_families() {
        check_table(
            ip,
            &["192.168.1.1", "2001:0db8:85a3:0000:0000:8a2e:0370:7334", "2001:db8:85a3::8a2e:370:7334"],
            &["192.168.1", "not-an-ip", "12345", ""],
        );
        check_table(
            ipv4,
            &["192.168.1.1", "0.0.0.0", "255.255.255.255", "::ffff:192.0.2.1"],
            &["192.168.1", "256.256.256.256", "2001:0db8:85a3:0000:0000:8a2e:0370:7334", ""],
        );
        check_table(
            ipv6,
            &["2001:0db8:85a3:0000:0000:8a2e:0370:7334", "2001:db8:85a3::8a2e:370:7334", "::1", "::"],
            &["192.168.1.1", "2001:0db8:85a3", "::ffff:192.0.2.1", ""],
        );
    }

    #[test]
    fn test_mac() {
        check_table(
            mac,
            &[
                "01:23:45:67:89:ab",
                "01:23:45:67:89:AB",
                "01-23-45-67-89-ab",
                "0123.4567.89ab",
                "02:00:5e:10:00:00:00:01",
                "00:00:00:00:fe:80:00:00:00:00:00:00:02:00:5e:10:00:00:00:01",
                "0200.5e10.0000.0001",
            ],
            &[
                "01:23:45:67:89",
                "01:23:45:67:89:ab:cd",
                "01:23:45:67:89:zz",
                "01-23:45-67:89-ab",
                "0123.4567.89ab.",
                "not-a-mac",
                "",
            ],
        );
        assert!(mac(&Value::Int(12345)).is_err());
    }

    #[test]
    fn test_domain() {
        check_table(
            domain,
            &["example.com", "sub.example.com", "a.b.c.example.com", "ex-am-ple.com", "a.co"],
            &["example.c", "ex@mple.com", ".example.com", "-example.com", "example-.com", "not_a_domain"],
        );
    }

    #[test]
    fn test_character_classes() {
        check_table(alpha, &["abcdef", "AbCdEf", ""], &["abc123", "abc!", "abc def"]);
        check_table(alphanum, &["abc123DEF", "123456", ""], &["abc123!", "abc 123"]);
        check_table(numeric, &["123456", ""], &["123abc", "123!", "123 456", "-1"]);
        assert!(numeric(&Value::Int(12345)).is_ok());
        assert!(alphanum(&Value::Int(12345)).is_ok());
        assert!(alpha(&Value::Int(12345)).is_err());
    }

    #[test]
    fn test_identifier_patterns() {
        check_table(ssn, &["123-45-6789"], &["123456789", "123-45-67a9", "000-12-3456", ""]);
        check_table(hexadecimal, &["deadBEEF", "0123"], &["xyz", "0x1F", ""]);
        check_table(mongoid, &["507f1f77bcf86cd799439011", "507F1F77BCF86CD799439011"], &["507f1f77bcf86cd79943901"]);
        check_table(base64, &["Zm9vYmFy", "Zm9vYg==", "Zm9vYmE=", ""], &["Zm9vYg=", "not base64!"]);
        check_table(
            uuid,
            &["6ba7b810-9dad-11d1-80b4-00c04fd430c8", "6BA7B8109DAD11D180B400C04FD430C8"],
            &["6ba7b810-9dad-11d1-80b4", "zba7b810-9dad-11d1-80b4-00c04fd430c8"],
        );
    }

    #[test]
    fn test_colors() {
        check_table(
            rgb,
            &["rgb(255,255,255)", "rgb(155,255,255)", "rgb(255,55,255)", "rgb(255,255,5)", "rgb(0,0,0)"],
            &[
                "rgb(256,255,255)",
                "rgb(255,255)",
                "rgb(255, 255, 255)",
                "rgb255,255,255",
                "rgba(255,255,255)",
                "rgb(255,255,255,0)",
                "rgb(-1,255,255)",
                "rgb(a,b,c)",
                "",
            ],
        );
        check_table(
            rgba,
            &["rgba(255,255,255,0.5)", "rgba(0,0,0,1)", "rgba(0,0,0,0)", "rgba(1,2,3,.5)"],
            &[
                "rgba(256,255,255,0.5)",
                "rgba(255,255,255,1.5)",
                "rgba(255,255,255)",
                "rgba(255, 255, 255, 0.5)",
                "rgb(255,255,255,0.5)",
                "rgba(255,255,255,50%)",
                "",
            ],
        );
        assert!(rgb(&Value::Int(12345)).is_err());
    }

    #[test]
    fn test_boolean() {
        check_table(
            boolean,
            &["1", "t", "TRUE", "True", "yes", "y", "on", "0", "f", "False", "no", "n", "off"],
            &["not-a-bool", "2", ""],
        );
        assert!(boolean(&Value::Int(1)).is_ok());
        assert!(boolean(&Value::Int(0)).is_ok());
        assert!(boolean(&Value::Int(12345)).is_err());
        assert!(boolean(&Value::Bool(true)).is_ok());
    }

    #[test]
    fn test_case_and_ascii() {
        check_table(ascii, &["abcdefABCDEF", "!@#$%^&*()", "Hello, World! 123", ""], &["Héllö", "👋"]);
        assert_eq!(
            ascii(&text("aé")).unwrap_err().to_string(),
            "\"aé\" contains non-ASCII character 'é' at position 1"
        );
        check_table(lowercase, &["abcdef", "abcdef123", "abcdef!@#", ""], &["abcDef", "ABCDEF"]);
        check_table(uppercase, &["ABCDEF", "ABCDEF123", "ABCDEF!@#", ""], &["ABCdEF", "abcdef"]);
        assert_eq!(
            lowercase(&text("abcDef")).unwrap_err().to_string(),
            "\"abcDef\" contains uppercase character 'D' at position 3"
        );
        assert!(lowercase(&Value::Int(12345)).is_ok());
    }

    #[test]
    fn test_json() {
        check_table(
            json,
            &[r#"{"key": "value"}"#, "[1, 2, 3]", r#""hello""#, "42", "true", "null"],
            &[r#"{"key: "value"}"#, r#"{"key": "value""#, "[1, 2, 3,]", "not-json", ""],
        );
        assert!(json(&Value::Int(12345)).is_ok());
    }

    #[test]
    fn test_checksum_wrappers() {
        assert!(luhn(&Value::Int(4111111111111111)).is_ok());
        assert!(luhn(&Value::Int(4111111111111112)).is_err());
        assert!(luhn(&Value::Uint(4242424242424242)).is_ok());
        assert!(luhn(&Value::Float(4111111111111111.0)).is_ok());
        assert!(luhn(&text("4111-1111-1111-111a")).is_err());
        assert!(luhn(&text("")).is_err());
        assert!(luhn(&Value::Seq { len: 3 }).is_err());

        check_table(
            isbn,
            &["0-306-40615-2", "0-8044-2957-X", "978-3-16-148410-0"],
            &["0-306-40615-3", "0-306-40615-Y", "978-3-16-148410-1", "978-3-16-148410", "978-3-16-14841A-0", ""],
        );
        assert!(isbn(&Value::Uint(9783161484100)).is_ok());
        assert!(isbn(&Value::Int(12345)).is_err());

        check_table(npi, &["1234567893"], &["1234567890", "123456789", "12345678a3", ""]);
        assert!(npi(&Value::Int(1234567893)).is_ok());
        assert!(npi(&Value::Int(1234567890)).is_err());
    }

    #[test]
    fn test_creditcard() {
        check_table(
            creditcard,
            &["4111 1111 1111 1111", "5500 0000 0000 0004", "3400 0000 0000 009", "4111-1111-1111-1111"],
            &[
                "4111 1111 1111 1112",
                "4111 1111 1111",
                "4111 1111 1111 1111 1111",
                "4111 1111 1111 111a",
                "not-a-credit-card",
                "",
            ],
        );
        assert!(creditcard(&Value::Uint(4111111111111111)).is_ok());
        assert!(creditcard(&Value::Int(12345)).is_err());
        assert_eq!(
            creditcard(&text("4111 1111 1111")).unwrap_err().to_string(),
            "\"411111111111\" is not a valid credit card number (wrong length)"
        );
    }
}
