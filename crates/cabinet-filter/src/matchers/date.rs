//! Date column matcher.

use chrono::NaiveDate;

use super::Compare;
use crate::matcher::{ColumnMatcher, CompiledState, MatchError, MatchResult};
use crate::node::Node;

/// Matcher for date columns.
///
/// Filter text is an optional comparison prefix (`>`, `>=`, `<`, `<=`, `=`)
/// followed by a date in `YYYY-MM-DD` form, e.g. `>=2024-01-01`. The node
/// property must hold a date in the same form.
pub struct DateMatcher {
    property: String,
}

struct CompiledDate {
    compare: Compare,
    date: NaiveDate,
}

impl DateMatcher {
    /// Creates a matcher reading the given node property.
    pub fn new(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
        }
    }

    fn compile(filter_text: &str) -> MatchResult<CompiledDate> {
        let (compare, rest) = Compare::split_prefix(filter_text.trim());
        let date = parse_date(rest.trim()).ok_or_else(|| {
            MatchError::new(format!(
                "invalid date filter: '{filter_text}' (expected YYYY-MM-DD)"
            ))
        })?;
        Ok(CompiledDate { compare, date })
    }
}

impl ColumnMatcher for DateMatcher {
    fn test(
        &self,
        filter_text: &str,
        compiled: &mut Option<CompiledState>,
        node: &dyn Node,
    ) -> MatchResult<bool> {
        if compiled.is_none() {
            *compiled = Some(Box::new(Self::compile(filter_text)?));
        }
        let state = compiled
            .as_ref()
            .and_then(|state| state.downcast_ref::<CompiledDate>())
            .ok_or_else(|| MatchError::new("date filter state of unexpected type"))?;

        let value = node.property(&self.property).ok_or_else(|| {
            MatchError::new(format!("node has no '{}' property", self.property))
        })?;
        let date = parse_date(value.trim()).ok_or_else(|| {
            MatchError::new(format!("'{}' is not a date: '{value}'", self.property))
        })?;

        Ok(state.compare.matches(date, state.date))
    }
}

/// Parses a date string in YYYY-MM-DD format.
fn parse_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()
}
