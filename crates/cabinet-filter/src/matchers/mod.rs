//! Reference matchers for the built-in column types.
//!
//! These are the per-type matchers the Cabinet UI wires up by default,
//! together with the [`TypeRegistry`] that binds column names to them through
//! the configured column types. The engine core is matcher-agnostic; anything
//! implementing [`ColumnMatcher`](crate::matcher::ColumnMatcher) plugs in the
//! same way.

mod date;
mod size;
mod text;

pub use date::DateMatcher;
pub use size::SizeMatcher;
pub use text::TextMatcher;

use std::rc::Rc;

use strsim::levenshtein;

use crate::config::{ColumnType, Settings};
use crate::expr::{FilterError, FilterResult};
use crate::matcher::{ColumnMatcher, MatcherRegistry};

/// Maximum Levenshtein distance to consider a column name as a suggestion.
const MAX_SUGGESTION_DISTANCE: usize = 3;

/// Comparison operator shared by the size and date matchers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Compare {
    Eq,
    Lt,
    Le,
    Gt,
    Ge,
}

impl Compare {
    /// Splits an optional comparison prefix off the filter text.
    ///
    /// No prefix means equality.
    pub(crate) fn split_prefix(text: &str) -> (Compare, &str) {
        if let Some(rest) = text.strip_prefix(">=") {
            (Compare::Ge, rest)
        } else if let Some(rest) = text.strip_prefix("<=") {
            (Compare::Le, rest)
        } else if let Some(rest) = text.strip_prefix('>') {
            (Compare::Gt, rest)
        } else if let Some(rest) = text.strip_prefix('<') {
            (Compare::Lt, rest)
        } else if let Some(rest) = text.strip_prefix('=') {
            (Compare::Eq, rest)
        } else {
            (Compare::Eq, text)
        }
    }

    /// Applies the comparison with `value` on the left-hand side.
    pub(crate) fn matches<T: PartialOrd>(self, value: T, reference: T) -> bool {
        match self {
            Compare::Eq => value == reference,
            Compare::Lt => value < reference,
            Compare::Le => value <= reference,
            Compare::Gt => value > reference,
            Compare::Ge => value >= reference,
        }
    }
}

/// Registry resolving columns through the configured column types.
///
/// Resolution consults [`Settings`] at parse time and hands out a matcher
/// bound to the column name, so a live type change (followed by the engine's
/// cache invalidation) re-binds the column to the matcher governing its new
/// type on the next parse.
pub struct TypeRegistry {
    settings: Rc<Settings>,
}

impl TypeRegistry {
    /// Creates a registry over the given settings.
    pub fn new(settings: Rc<Settings>) -> Self {
        Self { settings }
    }

    /// Finds the configured column name closest to `name`, for "did you
    /// mean" messages. Exact matches and distant names return `None`.
    pub fn closest_column(&self, name: &str) -> Option<String> {
        let query = name.to_lowercase();
        let (best, distance) = self
            .settings
            .column_names()
            .into_iter()
            .map(|candidate| {
                let distance = levenshtein(&query, &candidate.to_lowercase());
                (candidate, distance)
            })
            .min_by_key(|(_, d)| *d)?;

        (distance > 0 && distance <= MAX_SUGGESTION_DISTANCE).then_some(best)
    }
}

impl MatcherRegistry for TypeRegistry {
    fn resolve(&self, column: &str) -> FilterResult<Rc<dyn ColumnMatcher>> {
        let column_type = self
            .settings
            .column_type(column)
            .ok_or_else(|| FilterError::unknown_column(column))?;

        Ok(match column_type {
            ColumnType::Text => Rc::new(TextMatcher::new(column)),
            ColumnType::Size => Rc::new(SizeMatcher::new(column)),
            ColumnType::Date => Rc::new(DateMatcher::new(column)),
        })
    }
}
