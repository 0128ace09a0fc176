//! Free-text column matcher.

use crate::matcher::{ColumnMatcher, CompiledState, MatchError, MatchResult};
use crate::node::Node;

/// Matcher for text columns.
///
/// Plain filter text matches as a case-insensitive (ASCII) substring of the
/// property value. Text containing an unescaped `*` or `?` is treated as a
/// wildcard pattern over the whole value: `*` matches any run of characters,
/// `?` matches exactly one, and `\` escapes the next character.
pub struct TextMatcher {
    property: String,
}

/// Compiled form of a text filter.
enum CompiledText {
    Contains(String),
    Wildcard(Vec<PatternToken>),
}

#[derive(Debug, PartialEq, Eq)]
enum PatternToken {
    AnyRun,
    AnyChar,
    Literal(char),
}

impl TextMatcher {
    /// Creates a matcher reading the given node property.
    pub fn new(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
        }
    }

    fn compile(filter_text: &str) -> CompiledText {
        if !has_wildcard(filter_text) {
            return CompiledText::Contains(unescape(filter_text).to_ascii_lowercase());
        }

        let mut tokens = Vec::new();
        let mut chars = filter_text.chars();
        while let Some(c) = chars.next() {
            match c {
                '*' => {
                    // Collapse runs of stars.
                    if tokens.last() != Some(&PatternToken::AnyRun) {
                        tokens.push(PatternToken::AnyRun);
                    }
                }
                '?' => tokens.push(PatternToken::AnyChar),
                '\\' => {
                    if let Some(escaped) = chars.next() {
                        tokens.push(PatternToken::Literal(escaped.to_ascii_lowercase()));
                    }
                }
                _ => tokens.push(PatternToken::Literal(c.to_ascii_lowercase())),
            }
        }
        CompiledText::Wildcard(tokens)
    }
}

impl ColumnMatcher for TextMatcher {
    fn test(
        &self,
        filter_text: &str,
        compiled: &mut Option<CompiledState>,
        node: &dyn Node,
    ) -> MatchResult<bool> {
        if compiled.is_none() {
            *compiled = Some(Box::new(Self::compile(filter_text)));
        }
        let state = compiled
            .as_ref()
            .and_then(|state| state.downcast_ref::<CompiledText>())
            .ok_or_else(|| MatchError::new("text filter state of unexpected type"))?;

        let value = node.property(&self.property).ok_or_else(|| {
            MatchError::new(format!("node has no '{}' property", self.property))
        })?;
        let value = value.to_ascii_lowercase();

        Ok(match state {
            CompiledText::Contains(needle) => value.contains(needle.as_str()),
            CompiledText::Wildcard(tokens) => {
                let chars: Vec<char> = value.chars().collect();
                wildcard_match(tokens, &chars)
            }
        })
    }
}

/// Returns true if the text contains an unescaped `*` or `?`.
fn has_wildcard(text: &str) -> bool {
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            '*' | '?' => return true,
            _ => {}
        }
    }
    false
}

/// Strips `\` escapes, keeping the escaped characters literally.
fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(escaped) = chars.next() {
                out.push(escaped);
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Matches a wildcard token list against the whole value.
fn wildcard_match(tokens: &[PatternToken], value: &[char]) -> bool {
    match tokens.split_first() {
        None => value.is_empty(),
        Some((PatternToken::AnyRun, rest)) => {
            (0..=value.len()).any(|skip| wildcard_match(rest, &value[skip..]))
        }
        Some((PatternToken::AnyChar, rest)) => {
            !value.is_empty() && wildcard_match(rest, &value[1..])
        }
        Some((PatternToken::Literal(c), rest)) => {
            value.first() == Some(c) && wildcard_match(rest, &value[1..])
        }
    }
}
