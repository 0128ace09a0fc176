//! Left-to-right short-circuit evaluation of compiled filters.

use super::ast::{Connective, Payload, Sequence};
use super::error::FilterResult;
use crate::node::Node;

/// Evaluates one nesting level against a node.
///
/// The fold is seeded with `true` and runs strictly left to right; AND and OR
/// have no relative precedence. Short-circuiting stops the fold as soon as
/// the accumulated result decides it: a true accumulator meeting OR stays
/// true, a false accumulator meeting AND stays false, and everything after
/// the stopping point is skipped. Leaf tests are delegated to the block's
/// matcher (which compiles lazily on first use); errors abort the fold
/// immediately.
pub(crate) fn evaluate(sequence: &Sequence, node: &dyn Node) -> FilterResult<bool> {
    let mut matched = true;

    for element in sequence.elements() {
        match (matched, element.connective()) {
            (true, Connective::Or) | (false, Connective::And) => break,
            _ => {}
        }

        let result = match element.payload() {
            Payload::Leaf(block) => block.test(node)?,
            Payload::Group(inner) => evaluate(inner, node)?,
        };

        matched = if element.negate() { !result } else { result };
    }

    Ok(matched)
}
