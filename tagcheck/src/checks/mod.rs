//! Built-in checkers and checker makers.
//!
//! | Name | Kind | Accepts |
//! |------|------|---------|
//! | `required` | checker | any non-zero value |
//! | `email`, `url`, `ip`, `ipv4`, `ipv6`, `mac`, `domain` | checker | network identifiers |
//! | `uuid`, `mongoid`, `ssn`, `isbn`, `npi`, `creditcard`, `luhn` | checker | identifiers |
//! | `alpha`, `alphanum`, `numeric`, `hexadecimal`, `base64`, `ascii` | checker | character classes |
//! | `lowercase`, `uppercase`, `boolean`, `json`, `rgb`, `rgba` | checker | text formats |
//! | `eq`, `ne`, `min`, `max` | maker | size or numeric comparison |
//! | `regex`, `one_of` | maker | pattern match |

mod compare;
mod format;
mod pattern;

pub use compare::{eq, max, min, ne};
pub use pattern::{one_of, regex_checker};

use tracing::debug;

use crate::error::CheckError;
use crate::registry::CheckerRegistry;
use crate::value::Value;

type CheckFn = fn(&Value<'_>) -> Result<(), CheckError>;
type MakerFn = fn(&str) -> Result<crate::registry::Checker, CheckError>;

const BUILTIN_CHECKERS: &[(&str, CheckFn)] = &[
    ("required", required),
    ("email", format::email),
    ("url", format::url),
    ("ip", format::ip),
    ("ipv4", format::ipv4),
    ("ipv6", format::ipv6),
    ("mac", format::mac),
    ("domain", format::domain),
    ("uuid", format::uuid),
    ("mongoid", format::mongoid),
    ("ssn", format::ssn),
    ("isbn", format::isbn),
    ("npi", format::npi),
    ("creditcard", format::creditcard),
    ("luhn", format::luhn),
    ("alpha", format::alpha),
    ("alphanum", format::alphanum),
    ("numeric", format::numeric),
    ("hexadecimal", format::hexadecimal),
    ("base64", format::base64),
    ("ascii", format::ascii),
    ("lowercase", format::lowercase),
    ("uppercase", format::uppercase),
    ("boolean", format::boolean),
    ("json", format::json),
    ("rgb", format::rgb),
    ("rgba", format::rgba),
];

const BUILTIN_MAKERS: &[(&str, MakerFn)] = &[
    ("eq", eq),
    ("ne", ne),
    ("min", min),
    ("max", max),
    ("regex", regex_checker),
    ("one_of", one_of),
];

/// Fails with [`CheckError::Missing`] on zero and absent values.
pub fn required(value: &Value<'_>) -> Result<(), CheckError> {
    if value.is_zero() {
        Err(CheckError::Missing)
    } else {
        Ok(())
    }
}

/// Install every built-in checker and maker into `registry`.
pub fn register_builtins(registry: &CheckerRegistry) {
    for (name, checker) in BUILTIN_CHECKERS {
        registry.register_checker(*name, *checker);
    }
    for (name, maker) in BUILTIN_MAKERS {
        registry.register_checker_maker(*name, *maker);
    }
    debug!(
        checkers = BUILTIN_CHECKERS.len(),
        makers = BUILTIN_MAKERS.len(),
        "registered built-in checks"
    );
}
