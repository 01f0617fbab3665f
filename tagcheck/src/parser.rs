//! Check-list parsing.
//!
//! A check list is a separator-delimited sequence of segments. A segment is
//! either a registered checker name (`email`) or a maker invocation
//! (`min:3`). Surrounding whitespace and empty segments are ignored.

use std::fmt;

use tracing::trace;

use crate::config::ValidatorConfig;
use crate::error::Failure;
use crate::registry::{Checker, CheckerRegistry};

/// A checker bound to the name used when reporting its failures.
#[derive(Clone)]
pub struct BoundCheck {
    /// Display name: the segment up to its first argument separator.
    pub name: String,
    pub checker: Checker,
}

impl BoundCheck {
    pub fn new(name: impl Into<String>, checker: Checker) -> Self {
        Self {
            name: name.into(),
            checker,
        }
    }
}

impl fmt::Debug for BoundCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundCheck").field("name", &self.name).finish()
    }
}

/// Resolve every segment of `text` to a checker, in order.
///
/// Parameterized checkers are materialized through `registry` and cached
/// under their segment text. The first unknown or malformed segment stops
/// parsing with [`Failure::UnknownChecker`]; a maker that rejects its
/// argument stops it with [`Failure::MakerRejected`].
pub fn parse_check_list(
    text: &str,
    config: &ValidatorConfig,
    registry: &CheckerRegistry,
) -> Result<Vec<BoundCheck>, Failure> {
    let argument_separator = config.argument_separator.as_str();
    let mut checks = Vec::new();

    for segment in text.split(config.check_separator.as_str()) {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }

        if let Some(checker) = registry.checker(segment) {
            checks.push(BoundCheck::new(display_name(segment, argument_separator), checker));
            continue;
        }

        let (maker_name, argument) = split_invocation(segment, argument_separator)
            .ok_or_else(|| Failure::UnknownChecker {
                segment: segment.to_string(),
            })?;
        trace!(segment, maker = maker_name, argument, "materializing checker");
        let checker = registry.materialize(segment, maker_name, argument)?;
        checks.push(BoundCheck::new(maker_name, checker));
    }

    Ok(checks)
}

fn display_name<'s>(segment: &'s str, argument_separator: &str) -> &'s str {
    segment
        .split_once(argument_separator)
        .map_or(segment, |(name, _)| name)
}

/// Split `name<sep>argument`. Exactly one separator and two non-empty
/// parts are required.
fn split_invocation<'s>(segment: &'s str, separator: &str) -> Option<(&'s str, &'s str)> {
    let (name, argument) = segment.split_once(separator)?;
    if name.is_empty() || argument.is_empty() || argument.contains(separator) {
        return None;
    }
    Some((name, argument))
}
