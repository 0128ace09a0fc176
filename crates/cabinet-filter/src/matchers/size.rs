//! Byte-size column matcher.

use super::Compare;
use crate::matcher::{ColumnMatcher, CompiledState, MatchError, MatchResult};
use crate::node::Node;

/// Matcher for size columns.
///
/// Filter text is an optional comparison prefix (`>`, `>=`, `<`, `<=`, `=`)
/// followed by a decimal count with an optional `k`, `M`, `G` or `T` binary
/// suffix, e.g. `>1M` or `<=500k`. The node property must parse as a byte
/// count.
pub struct SizeMatcher {
    property: String,
}

struct CompiledSize {
    compare: Compare,
    bytes: u64,
}

impl SizeMatcher {
    /// Creates a matcher reading the given node property.
    pub fn new(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
        }
    }

    fn compile(filter_text: &str) -> MatchResult<CompiledSize> {
        let (compare, rest) = Compare::split_prefix(filter_text.trim());
        let rest = rest.trim();

        let (number, suffix) = match rest.find(|c: char| !c.is_ascii_digit()) {
            Some(pos) => rest.split_at(pos),
            None => (rest, ""),
        };
        let count: u64 = number
            .parse()
            .map_err(|_| MatchError::new(format!("invalid size filter: '{filter_text}'")))?;
        let multiplier: u64 = match suffix {
            "" => 1,
            "k" | "K" => 1 << 10,
            "M" => 1 << 20,
            "G" => 1 << 30,
            "T" => 1 << 40,
            _ => {
                return Err(MatchError::new(format!(
                    "invalid size suffix '{suffix}' in filter: '{filter_text}'"
                )))
            }
        };
        let bytes = count.checked_mul(multiplier).ok_or_else(|| {
            MatchError::new(format!("size filter out of range: '{filter_text}'"))
        })?;

        Ok(CompiledSize { compare, bytes })
    }
}

impl ColumnMatcher for SizeMatcher {
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
            .and_then(|state| state.downcast_ref::<CompiledSize>())
            .ok_or_else(|| MatchError::new("size filter state of unexpected type"))?;

        let value = node.property(&self.property).ok_or_else(|| {
            MatchError::new(format!("node has no '{}' property", self.property))
        })?;
        let size: u64 = value.trim().parse().map_err(|_| {
            MatchError::new(format!(
                "'{}' is not a byte count: '{value}'",
                self.property
            ))
        })?;

        Ok(state.compare.matches(size, state.bytes))
    }
}
