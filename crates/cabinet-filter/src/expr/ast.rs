//! Expression tree for compiled filters.
//!
//! The tree is flat per nesting level: a [`Sequence`] is an ordered list of
//! [`Element`]s, each carrying the connective to its predecessor, a negate
//! flag, and either a leaf [`Block`] or a nested sequence. This shape feeds
//! the left-to-right short-circuit fold in the evaluator; there is no binary
//! AND/OR tree and no operator precedence.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use super::error::{FilterError, FilterResult};
use crate::matcher::{ColumnMatcher, CompiledState};
use crate::node::Node;

/// Connective between an element and its predecessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connective {
    /// Logical AND (also the ignored default for the first element).
    And,
    /// Logical OR.
    Or,
}

/// One nesting level of a compiled filter: an ordered list of elements.
#[derive(Debug)]
pub struct Sequence {
    elements: Vec<Element>,
}

impl Sequence {
    pub(crate) fn new(elements: Vec<Element>) -> Self {
        Self { elements }
    }

    /// The elements of this level, in source order.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Returns true if any block at any depth filters on the given column.
    pub fn references_column(&self, column: &str) -> bool {
        self.elements.iter().any(|element| match &element.payload {
            Payload::Leaf(block) => block.column() == column,
            Payload::Group(inner) => inner.references_column(column),
        })
    }
}

/// One element of a sequence.
#[derive(Debug)]
pub struct Element {
    connective: Connective,
    negate: bool,
    payload: Payload,
}

impl Element {
    pub(crate) fn new(connective: Connective, negate: bool, payload: Payload) -> Self {
        Self {
            connective,
            negate,
            payload,
        }
    }

    /// Connective to the preceding element (And for the first element).
    pub fn connective(&self) -> Connective {
        self.connective
    }

    /// Whether the payload result is inverted before folding.
    pub fn negate(&self) -> bool {
        self.negate
    }

    /// The element payload.
    pub fn payload(&self) -> &Payload {
        &self.payload
    }
}

/// Payload of an element: a leaf block or a nested group.
#[derive(Debug)]
pub enum Payload {
    /// A leaf predicate over one column.
    Leaf(Block),
    /// A parenthesized nested sequence.
    Group(Sequence),
}

/// A leaf filter predicate: one column, one field-specific filter string.
///
/// The block owns the opaque state its matcher compiles the filter text into.
/// The state is built lazily on the first test and released through the
/// matcher's free step when the block is dropped.
pub struct Block {
    column: String,
    filter_text: String,
    matcher: Rc<dyn ColumnMatcher>,
    compiled: RefCell<Option<CompiledState>>,
}

impl Block {
    pub(crate) fn new(
        column: impl Into<String>,
        filter_text: impl Into<String>,
        matcher: Rc<dyn ColumnMatcher>,
    ) -> Self {
        Self {
            column: column.into(),
            filter_text: filter_text.into(),
            matcher,
            compiled: RefCell::new(None),
        }
    }

    /// The column this block filters on.
    pub fn column(&self) -> &str {
        &self.column
    }

    /// The field-specific filter text (quote-unescaped if it was quoted).
    pub fn filter_text(&self) -> &str {
        &self.filter_text
    }

    /// Tests a node against this block, compiling matcher state on first use.
    pub(crate) fn test(&self, node: &dyn Node) -> FilterResult<bool> {
        let mut compiled = self.compiled.borrow_mut();
        self.matcher
            .test(&self.filter_text, &mut compiled, node)
            .map_err(|source| FilterError::Evaluation {
                column: self.column.clone(),
                source,
            })
    }
}

impl Drop for Block {
    fn drop(&mut self) {
        if let Some(state) = self.compiled.borrow_mut().take() {
            self.matcher.free(state);
        }
    }
}

impl fmt::Debug for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Block")
            .field("column", &self.column)
            .field("filter_text", &self.filter_text)
            .finish_non_exhaustive()
    }
}
