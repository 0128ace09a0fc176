//! Filter expression language: parsing and evaluation.
//!
//! Filters describe boolean predicates over nodes, one leaf predicate per
//! column, e.g. `size:">1M" and (ext:"jpg" or ext:"png")`.
//!
//! # Supported Syntax
//!
//! ## Blocks
//! - `column:text` - Filter one column with field-specific text; the column
//!   prefix defaults to `name` when omitted.
//! - `column:"quoted text"` - Quoted filter text, backslash-escapable, may be
//!   followed by further elements.
//! - Unquoted filter text runs to the end of the enclosing scope, so an
//!   unquoted block is always the last element at its level.
//!
//! ## Boolean Operators
//! - `AND`, `OR` - Connectives between elements (case-insensitive).
//! - `NOT` - Negates the following element (case-insensitive).
//! - `()` - Grouping; parentheses inside quoted text do not count.
//!
//! There is no precedence between AND and OR: expressions are evaluated as a
//! strict left-to-right fold with short-circuiting (see the evaluator).
//!
//! What a block's filter text means (`>1M`, wildcards, dates) is decided by
//! the matcher governing the column, not by this module.

pub(crate) mod ast;
mod error;
pub(crate) mod evaluator;
pub(crate) mod parser;
mod scan;

pub use ast::{Block, Connective, Element, Payload, Sequence};
pub use error::{FilterError, FilterResult};

#[cfg(test)]
mod tests;
