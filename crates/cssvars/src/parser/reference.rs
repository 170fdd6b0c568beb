//! Finding `var()` references inside a declaration value.
//!
//! Only references in value position count. Anything inside a string
//! literal or a `url(...)` argument is text, not a reference:
//!
//! ```
//! use cssvars::parser::reference::find_var_references;
//!
//! let refs = find_var_references(r#"var(--black) url("http://var(--white)")"#);
//! assert_eq!(refs.len(), 1);
//! assert_eq!(refs[0].name, "--black");
//! ```

use nom::{
    IResult,
    bytes::complete::{tag, tag_no_case, take_while1},
    character::complete::multispace0,
    combinator::recognize,
    sequence::pair,
};
use std::ops::Range;

/// One `var(--name[, fallback])` occurrence.
#[derive(Clone, Debug, PartialEq)]
pub struct VarReference<'a> {
    /// The custom property name, including the leading `--`.
    pub name: &'a str,
    /// The trimmed fallback argument, if any.
    pub fallback: Option<&'a str>,
    /// Byte range of the whole `var(...)` expression in the scanned value.
    pub range: Range<usize>,
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_' || b >= 0x80
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

/// Parses `var(` and the custom property name that follows it.
fn var_head(input: &str) -> IResult<&str, &str> {
    let (input, _) = tag_no_case("var(")(input)?;
    let (input, _) = multispace0(input)?;
    let (input, name) = recognize(pair(tag("--"), take_while1(is_ident_char)))(input)?;
    let (input, _) = multispace0(input)?;
    Ok((input, name))
}

/// Returns the top-level `var()` references in `value`, in order.
///
/// References nested in another reference's fallback are not listed; use
/// [`referenced_names`] to collect those too. Malformed `var(` text is
/// skipped.
pub fn find_var_references(value: &str) -> Vec<VarReference<'_>> {
    let bytes = value.as_bytes();
    let mut refs = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let at_boundary = i == 0 || !is_ident_byte(bytes[i - 1]);
        match bytes[i] {
            b'"' | b'\'' => i = skip_string(bytes, i),
            _ if at_boundary && starts_with_ignore_case(bytes, i, b"url(") => {
                i = skip_parens(bytes, i + 3).unwrap_or(bytes.len());
            }
            _ if at_boundary && starts_with_ignore_case(bytes, i, b"var(") => {
                match parse_reference(value, i) {
                    Some(reference) => {
                        i = reference.range.end;
                        refs.push(reference);
                    }
                    None => {
                        log::trace!("ignoring malformed var() at {} in {:?}", i, value);
                        i += 4;
                    }
                }
            }
            _ => i += 1,
        }
    }
    refs
}

/// Every custom property name referenced by `value`, including references
/// inside fallbacks, in textual order.
pub fn referenced_names(value: &str) -> Vec<&str> {
    let mut names = Vec::new();
    for reference in find_var_references(value) {
        names.push(reference.name);
        if let Some(fallback) = reference.fallback {
            names.extend(referenced_names(fallback));
        }
    }
    names
}

fn parse_reference(value: &str, start: usize) -> Option<VarReference<'_>> {
    let (rest, name) = var_head(&value[start..]).ok()?;
    let after_name = value.len() - rest.len();
    let bytes = value.as_bytes();

    match bytes.get(after_name)? {
        b')' => Some(VarReference {
            name,
            fallback: None,
            range: start..after_name + 1,
        }),
        b',' => {
            // skip_parens expects to sit on an opening parenthesis; the comma
            // takes its place here.
            let end = skip_parens(bytes, after_name)?;
            Some(VarReference {
                name,
                fallback: Some(value[after_name + 1..end - 1].trim()),
                range: start..end,
            })
        }
        _ => None,
    }
}

fn starts_with_ignore_case(bytes: &[u8], at: usize, needle: &[u8]) -> bool {
    bytes
        .get(at..at + needle.len())
        .is_some_and(|window| window.eq_ignore_ascii_case(needle))
}

/// Returns the index just past the string literal starting at `start`.
fn skip_string(bytes: &[u8], start: usize) -> usize {
    let quote = bytes[start];
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b if b == quote => return i + 1,
            _ => i += 1,
        }
    }
    bytes.len()
}

/// Returns the index just past the `)` closing the group opened at `open`,
/// or `None` if the group is never closed.
fn skip_parens(bytes: &[u8], open: usize) -> Option<usize> {
    let mut depth = 1usize;
    let mut i = open + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'"' | b'\'' => {
                i = skip_string(bytes, i);
                continue;
            }
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            _ => {}
        }
        i += 1;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_reference() {
        let refs = find_var_references("1px solid var(--black)");
        assert_eq!(
            refs,
            vec![VarReference {
                name: "--black",
                fallback: None,
                range: 10..22,
            }]
        );
    }

    #[test]
    fn test_fallback_and_whitespace() {
        let refs = find_var_references("VAR( --green--42deg--adjusthue , rgb(0, 0, 0) )");
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].name, "--green--42deg--adjusthue");
        assert_eq!(refs[0].fallback, Some("rgb(0, 0, 0)"));
    }

    #[test]
    fn test_strings_and_urls_are_ignored() {
        assert!(find_var_references(r#"url("http://var(--black)")"#).is_empty());
        assert!(find_var_references("url(http://var(--black))").is_empty());
        assert!(find_var_references("'var(--black)'").is_empty());
        assert!(find_var_references("\"a \\\" var(--black)\"").is_empty());
    }

    #[test]
    fn test_malformed_references_are_skipped() {
        assert!(find_var_references("var(black)").is_empty());
        assert!(find_var_references("var(--black").is_empty());
        assert!(find_var_references("var(--black, rgb(0, 0, 0)").is_empty());
        assert!(find_var_references("somevar(--black)").is_empty());
        assert_eq!(find_var_references("var(--) var(--ok)")[0].name, "--ok");
    }

    #[test]
    fn test_nested_fallback_names() {
        assert_eq!(
            referenced_names("var(--a, var(--b, var(--c))) var(--d)"),
            vec!["--a", "--b", "--c", "--d"]
        );
    }
}
