//! Recursive descent parser for filter expressions.

use crate::matcher::MatcherRegistry;

use super::ast::{Block, Connective, Element, Payload, Sequence};
use super::error::{FilterError, FilterResult};
use super::scan::{find_unquoted_colon, scan_balanced, scan_quoted};

/// Column assumed when a block has no `column:` prefix.
pub(crate) const DEFAULT_COLUMN: &str = "name";

/// Parser for filter expressions.
///
/// # Grammar
///
/// ```text
/// expr       ::= element (connective element)*
/// element    ::= ["NOT"] (block | "(" expr ")")
/// connective ::= "AND" | "OR"                     (case-insensitive)
/// block      ::= [column ":"] filter_text
/// ```
///
/// A connective or NOT keyword is only recognized when followed by `(` or a
/// blank character, so identifiers like `android` are not split. Quoted
/// filter text is backslash-escapable and consumed up to the matching `"`;
/// unquoted filter text runs to the end of the enclosing scope, so an
/// unquoted block is always the last element at its nesting level.
///
/// There is no precedence between AND and OR: the resulting sequence is
/// evaluated as a literal left-to-right fold.
///
/// Known ambiguity, kept as-is: in connective position, unquoted text whose
/// first word happens to satisfy the keyword boundary rule (e.g. `or der`) is
/// read as a connective rather than block text.
pub(crate) struct Parser<'a> {
    registry: &'a dyn MatcherRegistry,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(registry: &'a dyn MatcherRegistry) -> Self {
        Self { registry }
    }

    /// Parses a complete filter expression into a sequence.
    pub(crate) fn parse(&self, input: &str) -> FilterResult<Sequence> {
        self.parse_element(input)
    }

    /// Parses one nesting scope into a sequence of elements.
    ///
    /// `scope` must be exactly the text of the current level: the whole input
    /// at top level, or the interior of a parenthesized group.
    fn parse_element(&self, scope: &str) -> FilterResult<Sequence> {
        let mut elements = Vec::new();
        let mut rest = scope.trim_start();

        while !rest.is_empty() {
            let connective = if elements.is_empty() {
                Connective::And
            } else {
                match parse_connective(rest) {
                    Some((connective, consumed)) => {
                        rest = rest[consumed..].trim_start();
                        connective
                    }
                    None => return Err(FilterError::unexpected_token(next_word(rest))),
                }
            };

            let negate = match keyword_len(rest, "not") {
                Some(consumed) => {
                    rest = rest[consumed..].trim_start();
                    true
                }
                None => false,
            };

            // A consumed connective or NOT must be followed by an element.
            if rest.is_empty() {
                return Err(FilterError::UnexpectedEnd);
            }

            let payload = if let Some(inner) = rest.strip_prefix('(') {
                let close = scan_balanced(inner)?;
                let group = self.parse_element(&inner[..close])?;
                rest = inner[close + 1..].trim_start();
                Payload::Group(group)
            } else {
                let (block, consumed) = self.parse_block(rest)?;
                rest = rest[consumed..].trim_start();
                Payload::Leaf(block)
            };

            elements.push(Element::new(connective, negate, payload));
        }

        if elements.is_empty() {
            return Err(FilterError::EmptyExpression);
        }

        Ok(Sequence::new(elements))
    }

    /// Parses one leaf block at the start of `rest`.
    ///
    /// Returns the block and the number of bytes consumed.
    fn parse_block(&self, rest: &str) -> FilterResult<(Block, usize)> {
        let (column, text, text_start) = match find_unquoted_colon(rest)? {
            Some(colon) => (&rest[..colon], &rest[colon + 1..], colon + 1),
            None => (DEFAULT_COLUMN, rest, 0),
        };

        let (filter_text, consumed) = if let Some(quoted) = text.strip_prefix('"') {
            let (content, end) = scan_quoted(quoted)?;
            (content, text_start + 1 + end)
        } else {
            // Unquoted filter text takes the whole remaining scope.
            (text.to_string(), rest.len())
        };

        let matcher = self.registry.resolve(column)?;
        Ok((Block::new(column, filter_text, matcher), consumed))
    }
}

/// Recognizes a leading AND/OR keyword, returning it and the bytes consumed.
fn parse_connective(rest: &str) -> Option<(Connective, usize)> {
    if let Some(len) = keyword_len(rest, "and") {
        return Some((Connective::And, len));
    }
    if let Some(len) = keyword_len(rest, "or") {
        return Some((Connective::Or, len));
    }
    None
}

/// Matches a case-insensitive keyword at the start of `rest`.
///
/// The keyword is only recognized when followed by `(` or a blank character
/// (the boundary rule), never at end of input. Returns the keyword length.
fn keyword_len(rest: &str, keyword: &str) -> Option<usize> {
    let head = rest.get(..keyword.len())?;
    if !head.eq_ignore_ascii_case(keyword) {
        return None;
    }
    match rest[keyword.len()..].chars().next() {
        Some(c) if c == '(' || c.is_whitespace() => Some(keyword.len()),
        _ => None,
    }
}

/// First blank-delimited word of `rest`, for error messages.
fn next_word(rest: &str) -> &str {
    rest.split_whitespace().next().unwrap_or(rest)
}
