//! Leaf-matcher adapter contract.
//!
//! A [`ColumnMatcher`] is the per-field capability the engine delegates leaf
//! tests to: it compiles a field-specific filter string into opaque state and
//! tests nodes against it. The engine owns the per-leaf compiled state and its
//! lifetime but never interprets it. A [`MatcherRegistry`] decides which
//! matcher governs a column name; in the full application that decision comes
//! from the configured column types (see
//! [`TypeRegistry`](crate::matchers::TypeRegistry)).

use std::any::Any;
use std::rc::Rc;

use thiserror::Error;

use crate::expr::FilterResult;
use crate::node::Node;

/// Opaque per-leaf compiled state, produced by a matcher's compile step.
pub type CompiledState = Box<dyn Any>;

/// Error raised by a matcher while compiling filter text or testing a node.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct MatchError {
    /// Human-readable description of the failure.
    pub message: String,
}

impl MatchError {
    /// Creates a new matcher error from a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A specialized Result type for matcher operations.
pub type MatchResult<T> = Result<T, MatchError>;

/// Per-column matching capability.
///
/// Implementations must be re-entrant across blocks: no shared mutable state
/// between invocations for different filter strings. All per-block state lives
/// in the `compiled` slot the engine passes in.
pub trait ColumnMatcher {
    /// Tests a node against the given filter text.
    ///
    /// On the first call for a block, compiles `filter_text` into opaque state
    /// and stores it in `compiled`; subsequent calls reuse the stored state.
    ///
    /// # Errors
    ///
    /// Fails when the filter text cannot be compiled for this column type, or
    /// when the node's data cannot be accessed or interpreted.
    fn test(
        &self,
        filter_text: &str,
        compiled: &mut Option<CompiledState>,
        node: &dyn Node,
    ) -> MatchResult<bool>;

    /// Releases per-leaf compiled state.
    ///
    /// Called when a block (or its owning expression tree) is discarded. The
    /// default simply drops the state; matchers holding external resources can
    /// override.
    fn free(&self, compiled: CompiledState) {
        drop(compiled);
    }
}

impl std::fmt::Debug for dyn ColumnMatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ColumnMatcher")
    }
}

/// Resolves column names to the matcher governing them.
pub trait MatcherRegistry {
    /// Looks up the matcher for a column name.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::UnknownColumnType`] when no matcher governs the
    /// column (unknown name or unconfigured type).
    ///
    /// [`FilterError::UnknownColumnType`]: crate::expr::FilterError::UnknownColumnType
    fn resolve(&self, column: &str) -> FilterResult<Rc<dyn ColumnMatcher>>;
}
