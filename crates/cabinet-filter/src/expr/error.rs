//! Error types for the filter expression engine.

use thiserror::Error;

use crate::matcher::MatchError;

/// A specialized Result type for filter operations.
pub type FilterResult<T> = Result<T, FilterError>;

/// Errors that can occur while compiling or evaluating a filter expression.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FilterError {
    /// The filter expression (or a parenthesized group) is empty.
    #[error("filter expression is empty")]
    EmptyExpression,

    /// The expression ended where an element was required.
    #[error("unexpected end of expression")]
    UnexpectedEnd,

    /// A quoted string was opened but never closed.
    #[error("unterminated quoted string")]
    UnterminatedQuote,

    /// A parenthesized group was opened but never closed.
    #[error("unmatched parenthesis")]
    UnmatchedParen,

    /// Text appeared where an AND or OR connective was required.
    #[error("expected AND or OR, found: {token}")]
    UnexpectedToken {
        /// The text that was found instead of a connective.
        token: String,
    },

    /// A block names a column with no resolvable matcher.
    #[error("no matcher for column: {column}")]
    UnknownColumnType {
        /// The column name that could not be resolved.
        column: String,
    },

    /// The matcher for a column failed while compiling or testing.
    #[error("cannot evaluate '{column}' filter: {source}")]
    Evaluation {
        /// The column whose matcher failed.
        column: String,
        /// The underlying matcher error.
        #[source]
        source: MatchError,
    },
}

impl FilterError {
    /// Creates an unexpected token error.
    pub fn unexpected_token(token: impl Into<String>) -> Self {
        FilterError::UnexpectedToken {
            token: token.into(),
        }
    }

    /// Creates an unknown column type error.
    pub fn unknown_column(column: impl Into<String>) -> Self {
        FilterError::UnknownColumnType {
            column: column.into(),
        }
    }
}
