//! Tests for the filter expression parser.

use std::rc::Rc;

use super::parser::Parser;
use super::*;
use crate::matcher::{ColumnMatcher, CompiledState, MatchResult, MatcherRegistry};
use crate::node::Node;

/// Matcher stub; parser tests only look at the tree structure.
struct StubMatcher;

impl ColumnMatcher for StubMatcher {
    fn test(
        &self,
        _filter_text: &str,
        _compiled: &mut Option<CompiledState>,
        _node: &dyn Node,
    ) -> MatchResult<bool> {
        Ok(true)
    }
}

struct StubRegistry;

impl MatcherRegistry for StubRegistry {
    fn resolve(&self, column: &str) -> FilterResult<Rc<dyn ColumnMatcher>> {
        match column {
            "name" | "ext" | "size" => Ok(Rc::new(StubMatcher)),
            _ => Err(FilterError::unknown_column(column)),
        }
    }
}

fn parse(input: &str) -> FilterResult<Sequence> {
    Parser::new(&StubRegistry).parse(input)
}

fn leaf(element: &Element) -> &Block {
    match element.payload() {
        Payload::Leaf(block) => block,
        Payload::Group(_) => panic!("expected leaf element"),
    }
}

fn group(element: &Element) -> &Sequence {
    match element.payload() {
        Payload::Group(inner) => inner,
        Payload::Leaf(_) => panic!("expected group element"),
    }
}

// ==================== Block Tests ====================

#[test]
fn test_parse_plain_block_defaults_to_name() {
    let sequence = parse("report").unwrap();
    assert_eq!(sequence.elements().len(), 1);

    let element = &sequence.elements()[0];
    assert_eq!(element.connective(), Connective::And);
    assert!(!element.negate());
    assert_eq!(leaf(element).column(), "name");
    assert_eq!(leaf(element).filter_text(), "report");
}

#[test]
fn test_parse_column_prefix() {
    let sequence = parse("ext:jpg").unwrap();
    let block = leaf(&sequence.elements()[0]);
    assert_eq!(block.column(), "ext");
    assert_eq!(block.filter_text(), "jpg");
}

#[test]
fn test_parse_surrounding_blanks() {
    let sequence = parse("   ext:jpg").unwrap();
    assert_eq!(leaf(&sequence.elements()[0]).column(), "ext");
}

#[test]
fn test_parse_quoted_filter_text_unescapes() {
    let sequence = parse(r#"name:"a \"b\" c""#).unwrap();
    assert_eq!(leaf(&sequence.elements()[0]).filter_text(), r#"a "b" c"#);
}

#[test]
fn test_parse_quoted_without_column_prefix() {
    let sequence = parse("\"some file\"").unwrap();
    let block = leaf(&sequence.elements()[0]);
    assert_eq!(block.column(), "name");
    assert_eq!(block.filter_text(), "some file");
}

#[test]
fn test_unquoted_block_runs_to_end_of_scope() {
    // Without quotes the filter text swallows the rest of the level, keywords
    // included; an unquoted block is always the last element at its level.
    let sequence = parse("name:foo and bar").unwrap();
    assert_eq!(sequence.elements().len(), 1);
    assert_eq!(leaf(&sequence.elements()[0]).filter_text(), "foo and bar");
}

#[test]
fn test_quoted_block_allows_siblings() {
    let sequence = parse(r#"name:"foo" and ext:jpg"#).unwrap();
    assert_eq!(sequence.elements().len(), 2);

    let second = &sequence.elements()[1];
    assert_eq!(second.connective(), Connective::And);
    assert_eq!(leaf(second).column(), "ext");
    assert_eq!(leaf(second).filter_text(), "jpg");
}

#[test]
fn test_unknown_column_is_a_parse_error() {
    assert_eq!(
        parse("bogus:foo").unwrap_err(),
        FilterError::unknown_column("bogus")
    );
}

// ==================== Connective Tests ====================

#[test]
fn test_parse_or_connective() {
    let sequence = parse(r#"name:"a" or ext:jpg"#).unwrap();
    assert_eq!(sequence.elements()[1].connective(), Connective::Or);
}

#[test]
fn test_connectives_case_insensitive() {
    for input in [
        r#"name:"a" AND ext:jpg"#,
        r#"name:"a" And ext:jpg"#,
        r#"name:"a" aNd ext:jpg"#,
    ] {
        let sequence = parse(input).unwrap();
        assert_eq!(sequence.elements()[1].connective(), Connective::And);
    }

    let sequence = parse(r#"name:"a" OR ext:jpg"#).unwrap();
    assert_eq!(sequence.elements()[1].connective(), Connective::Or);
}

#[test]
fn test_three_element_chain() {
    let sequence = parse(r#"name:"a" and ext:"jpg" or size:"1""#).unwrap();
    assert_eq!(sequence.elements().len(), 3);
    assert_eq!(sequence.elements()[1].connective(), Connective::And);
    assert_eq!(sequence.elements()[2].connective(), Connective::Or);
}

#[test]
fn test_missing_connective_is_an_error() {
    assert_eq!(
        parse(r#"name:"a" android:x"#).unwrap_err(),
        FilterError::unexpected_token("android:x")
    );
}

#[test]
fn test_keyword_requires_boundary() {
    // "android" starts with "and" but is not a connective; as the first
    // element it is an unquoted name block.
    let sequence = parse("android").unwrap();
    assert_eq!(leaf(&sequence.elements()[0]).filter_text(), "android");

    // A connective at end of input has no boundary character and is not
    // recognized as a keyword.
    assert_eq!(
        parse(r#"name:"a" and"#).unwrap_err(),
        FilterError::unexpected_token("and")
    );
}

#[test]
fn test_keyword_boundary_accepts_paren() {
    let sequence = parse(r#"name:"a" or(ext:jpg)"#).unwrap();
    assert_eq!(sequence.elements().len(), 2);
    assert_eq!(sequence.elements()[1].connective(), Connective::Or);
}

#[test]
fn test_trailing_connective_is_an_error() {
    assert_eq!(
        parse(r#"name:"a" and "#).unwrap_err(),
        FilterError::UnexpectedEnd
    );
}

// ==================== NOT Tests ====================

#[test]
fn test_not_sets_negate_flag() {
    let sequence = parse(r#"not name:"a""#).unwrap();
    assert!(sequence.elements()[0].negate());
}

#[test]
fn test_not_after_connective() {
    let sequence = parse(r#"name:"a" and not ext:jpg"#).unwrap();
    assert!(!sequence.elements()[0].negate());
    assert!(sequence.elements()[1].negate());
}

#[test]
fn test_not_group() {
    let sequence = parse("not(ext:jpg)").unwrap();
    let element = &sequence.elements()[0];
    assert!(element.negate());
    assert_eq!(group(element).elements().len(), 1);
}

#[test]
fn test_nothing_is_a_block_not_a_negation() {
    let sequence = parse("nothing").unwrap();
    let element = &sequence.elements()[0];
    assert!(!element.negate());
    assert_eq!(leaf(element).filter_text(), "nothing");
}

#[test]
fn test_dangling_not_is_an_error() {
    assert_eq!(parse("not ").unwrap_err(), FilterError::UnexpectedEnd);
}

// ==================== Group Tests ====================

#[test]
fn test_parse_group() {
    let sequence = parse(r#"(name:"a" or ext:jpg)"#).unwrap();
    assert_eq!(sequence.elements().len(), 1);

    let inner = group(&sequence.elements()[0]);
    assert_eq!(inner.elements().len(), 2);
    assert_eq!(inner.elements()[1].connective(), Connective::Or);
}

#[test]
fn test_parse_nested_groups() {
    let sequence = parse(r#"name:"a" or (ext:"jpg" and (size:"1" or size:"2"))"#).unwrap();
    assert_eq!(sequence.elements().len(), 2);

    let inner = group(&sequence.elements()[1]);
    assert_eq!(inner.elements().len(), 2);

    let innermost = group(&inner.elements()[1]);
    assert_eq!(innermost.elements().len(), 2);
    assert_eq!(leaf(&innermost.elements()[1]).filter_text(), "2");
}

#[test]
fn test_paren_inside_quotes_does_not_close_group() {
    let sequence = parse(r#"(ext:"a)b")"#).unwrap();
    let inner = group(&sequence.elements()[0]);
    assert_eq!(leaf(&inner.elements()[0]).filter_text(), "a)b");
}

#[test]
fn test_unquoted_block_scoped_to_group() {
    // An unquoted block consumes only the rest of its own group.
    let sequence = parse(r#"(name:foo) or ext:jpg"#).unwrap();
    assert_eq!(sequence.elements().len(), 2);
    let inner = group(&sequence.elements()[0]);
    assert_eq!(leaf(&inner.elements()[0]).filter_text(), "foo");
}

// ==================== Error Tests ====================

#[test]
fn test_empty_expression() {
    assert_eq!(parse("").unwrap_err(), FilterError::EmptyExpression);
    assert_eq!(parse("   ").unwrap_err(), FilterError::EmptyExpression);
    assert_eq!(parse("()").unwrap_err(), FilterError::EmptyExpression);
}

#[test]
fn test_unmatched_parenthesis() {
    assert_eq!(parse("(name:x").unwrap_err(), FilterError::UnmatchedParen);
    assert_eq!(
        parse(r#"(name:"a" or (ext:jpg)"#).unwrap_err(),
        FilterError::UnmatchedParen
    );
}

#[test]
fn test_unterminated_quote() {
    assert_eq!(
        parse(r#"name:"abc"#).unwrap_err(),
        FilterError::UnterminatedQuote
    );
}

#[test]
fn test_references_column() {
    let sequence = parse(r#"name:"a" and (ext:"jpg" or size:"1")"#).unwrap();
    assert!(sequence.references_column("name"));
    assert!(sequence.references_column("ext"));
    assert!(sequence.references_column("size"));
    assert!(!sequence.references_column("modified"));
}
