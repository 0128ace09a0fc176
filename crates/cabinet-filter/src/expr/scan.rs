//! Quote-aware lexical scanners for the filter grammar.

use super::error::{FilterError, FilterResult};

/// Scans a backslash-escaped double-quoted string.
///
/// `s` must start at the character just after the opening `"`. Characters are
/// copied verbatim except `\X`, which copies the literal `X` (there are no
/// further escape semantics). Returns the unescaped content together with the
/// index just past the closing quote.
pub(crate) fn scan_quoted(s: &str) -> FilterResult<(String, usize)> {
    let mut content = String::new();
    let mut chars = s.char_indices();

    while let Some((i, c)) = chars.next() {
        match c {
            '"' => return Ok((content, i + 1)),
            '\\' => match chars.next() {
                Some((_, escaped)) => content.push(escaped),
                None => break,
            },
            _ => content.push(c),
        }
    }

    Err(FilterError::UnterminatedQuote)
}

/// Scans to the parenthesis matching an already-consumed `(`.
///
/// `s` must start just inside the opening parenthesis. Nested groups are
/// counted; quoted strings are skipped via [`scan_quoted`] so parentheses
/// inside quotes do not count. Returns the index of the matching `)`.
pub(crate) fn scan_balanced(s: &str) -> FilterResult<usize> {
    let mut depth = 1usize;
    let mut i = 0;

    while let Some(c) = s[i..].chars().next() {
        if c == '"' {
            let (_, end) = scan_quoted(&s[i + 1..])?;
            i += 1 + end;
            continue;
        }
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(i);
                }
            }
            _ => {}
        }
        i += c.len_utf8();
    }

    Err(FilterError::UnmatchedParen)
}

/// Finds the first `:` in `s` that is not inside a quoted string.
pub(crate) fn find_unquoted_colon(s: &str) -> FilterResult<Option<usize>> {
    let mut i = 0;

    while let Some(c) = s[i..].chars().next() {
        if c == '"' {
            let (_, end) = scan_quoted(&s[i + 1..])?;
            i += 1 + end;
            continue;
        }
        if c == ':' {
            return Ok(Some(i));
        }
        i += c.len_utf8();
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_quoted_plain() {
        let (content, end) = scan_quoted("abc\" rest").unwrap();
        assert_eq!(content, "abc");
        assert_eq!(end, 4);
    }

    #[test]
    fn test_scan_quoted_escapes() {
        let (content, end) = scan_quoted(r#"a\"b\\c" tail"#).unwrap();
        assert_eq!(content, "a\"b\\c");
        assert_eq!(end, 8);
    }

    #[test]
    fn test_scan_quoted_empty() {
        let (content, end) = scan_quoted("\"x").unwrap();
        assert_eq!(content, "");
        assert_eq!(end, 1);
    }

    #[test]
    fn test_scan_quoted_unterminated() {
        assert_eq!(scan_quoted("abc"), Err(FilterError::UnterminatedQuote));
        // A trailing backslash consumes the end of input.
        assert_eq!(scan_quoted("abc\\"), Err(FilterError::UnterminatedQuote));
    }

    #[test]
    fn test_scan_balanced_flat() {
        assert_eq!(scan_balanced("abc) tail").unwrap(), 3);
    }

    #[test]
    fn test_scan_balanced_nested() {
        assert_eq!(scan_balanced("a(b)c) tail").unwrap(), 5);
        assert_eq!(scan_balanced("((x))y)").unwrap(), 6);
    }

    #[test]
    fn test_scan_balanced_paren_inside_quotes() {
        assert_eq!(scan_balanced("x:\"a)b\")").unwrap(), 7);
    }

    #[test]
    fn test_scan_balanced_unmatched() {
        assert_eq!(scan_balanced("a(b)"), Err(FilterError::UnmatchedParen));
        assert_eq!(scan_balanced(""), Err(FilterError::UnmatchedParen));
    }

    #[test]
    fn test_scan_balanced_unterminated_quote() {
        assert_eq!(
            scan_balanced("x:\"a)b)"),
            Err(FilterError::UnterminatedQuote)
        );
    }

    #[test]
    fn test_find_colon() {
        assert_eq!(find_unquoted_colon("ext:jpg").unwrap(), Some(3));
        assert_eq!(find_unquoted_colon("plain text").unwrap(), None);
    }

    #[test]
    fn test_find_colon_skips_quotes() {
        assert_eq!(find_unquoted_colon("\"a:b\" c:d").unwrap(), Some(7));
        assert_eq!(find_unquoted_colon("\"a:b\"").unwrap(), None);
    }
}
