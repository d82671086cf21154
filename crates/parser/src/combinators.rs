//! Nom parser combinators for update-center properties files.

use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, take_while, take_while1},
    character::complete::{anychar, char, one_of},
    combinator::{eof, map, not, opt, recognize, value},
    multi::many0,
    sequence::{pair, preceded},
};

use crate::ast::*;
use crate::lexer::Span;

// ============================================================================
// Utility combinators
// ============================================================================

fn is_hspace(c: char) -> bool {
    c == ' ' || c == '\t' || c == '\x0c'
}

/// Parses horizontal whitespace (never a line break).
fn hspace(input: Span) -> IResult<Span, Span> {
    take_while(is_hspace)(input)
}

/// Parses a single line break.
fn line_ending(input: Span) -> IResult<Span, Span> {
    alt((tag("\r\n"), tag("\n"), tag("\r"))).parse(input)
}

/// Parses a line break or the end of input.
fn end_of_line(input: Span) -> IResult<Span, ()> {
    value((), alt((line_ending, eof))).parse(input)
}

/// Parses a comment (`#` or `!` until end of line).
fn comment(input: Span) -> IResult<Span, Span> {
    recognize(pair(
        one_of("#!"),
        take_while(|c: char| c != '\n' && c != '\r'),
    ))
    .parse(input)
}

fn unescape(c: char) -> char {
    match c {
        'n' => '\n',
        't' => '\t',
        'r' => '\r',
        'f' => '\x0c',
        other => other,
    }
}

// ============================================================================
// Entry parsers
// ============================================================================

/// Parses a property key: everything up to whitespace, `=` or `:`.
pub fn key(input: Span) -> IResult<Span, String> {
    map(
        take_while1(|c: char| !c.is_whitespace() && c != '=' && c != ':' && c != '\\'),
        |s: Span| s.fragment().to_string(),
    )
    .parse(input)
}

/// Parses the separator between key and value: `=`, `:` or plain whitespace.
fn separator(input: Span) -> IResult<Span, ()> {
    value((), (hspace, opt(one_of("=:")), hspace)).parse(input)
}

/// Parses one piece of a value: a run of plain text, an escape or a line continuation.
fn value_fragment(input: Span) -> IResult<Span, String> {
    alt((
        value(String::new(), (char('\\'), line_ending, hspace)),
        value(String::new(), (char('\\'), eof)),
        map(preceded(char('\\'), anychar), |c| unescape(c).to_string()),
        map(
            take_while1(|c: char| c != '\\' && c != '\n' && c != '\r'),
            |s: Span| s.fragment().to_string(),
        ),
    ))
    .parse(input)
}

/// Parses a logical value, joining continuation lines and resolving escapes.
pub fn property_value(input: Span) -> IResult<Span, String> {
    map(many0(value_fragment), |parts| parts.concat()).parse(input)
}

/// Parses a `key=value` entry.
pub fn entry(input: Span) -> IResult<Span, Property> {
    let line = input.location_line();
    let (input, key) = key(input)?;
    let (input, _) = separator(input)?;
    let (input, text) = property_value(input)?;
    Ok((
        input,
        Property {
            key,
            value: text,
            line,
        },
    ))
}

/// Parses one physical line: blank, comment or entry.
fn line(input: Span) -> IResult<Span, Option<Property>> {
    let (input, _) = hspace(input)?;
    let (input, item) = opt(alt((value(None, comment), map(entry, Some)))).parse(input)?;
    let (input, _) = end_of_line(input)?;
    Ok((input, item.flatten()))
}

// ============================================================================
// File parser
// ============================================================================

/// Parses a complete properties file.
pub fn properties(input: Span) -> IResult<Span, AstProperties> {
    let (input, lines) = many0(preceded(not(eof), line)).parse(input)?;
    let (input, _) = eof(input)?;
    Ok((
        input,
        AstProperties {
            entries: lines.into_iter().flatten().collect(),
        },
    ))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn span(s: &str) -> Span<'_> {
        Span::new(s)
    }

    #[test]
    fn test_key() {
        let (rest, result) = key(span("checkstyle.name=Checkstyle")).unwrap();
        assert_eq!(result, "checkstyle.name");
        assert_eq!(*rest.fragment(), "=Checkstyle");
    }

    #[test]
    fn test_entry_separators() {
        for input in ["a=b c", "a = b c", "a:b c", "a : b c", "a b c"] {
            let (_, result) = entry(span(input)).unwrap();
            assert_eq!(result.key, "a", "input: {}", input);
            assert_eq!(result.value, "b c", "input: {}", input);
        }
    }

    #[test]
    fn test_empty_value() {
        let (_, result) = entry(span("checkstyle.license=")).unwrap();
        assert_eq!(result.value, "");
    }

    #[test]
    fn test_value_escapes() {
        let (_, result) = property_value(span(r"a\=b\:c\\d\te\nf")).unwrap();
        assert_eq!(result, "a=b:c\\d\te\nf");
    }

    #[test]
    fn test_value_continuation() {
        let (_, result) = property_value(span("A,\\\n    B,\\\r\n  C")).unwrap();
        assert_eq!(result, "A,B,C");
    }

    #[test]
    fn test_trailing_backslash_at_eof() {
        let (_, result) = property_value(span("abc\\")).unwrap();
        assert_eq!(result, "abc");
    }

    #[test]
    fn test_comment() {
        assert!(comment(span("# a comment")).is_ok());
        assert!(comment(span("! another")).is_ok());
        assert!(comment(span("key=value")).is_err());
    }

    #[test]
    fn test_properties() {
        let input = "# header\n\nplugins=a,b\n  ! indented comment\na.name=A\r\nb.name = B";
        let (_, result) = properties(span(input)).unwrap();
        assert_eq!(result.entries.len(), 3);
        assert_eq!(result.entries[0].key, "plugins");
        assert_eq!(result.entries[0].line, 3);
        assert_eq!(result.entries[1].value, "A");
        assert_eq!(result.entries[2].value, "B");
        assert_eq!(result.entries[2].line, 6);
    }

    #[test]
    fn test_properties_empty() {
        let (_, result) = properties(span("")).unwrap();
        assert!(result.entries.is_empty());
    }

    #[test]
    fn test_properties_rejects_missing_key() {
        assert!(properties(span("a=1\n=oops\n")).is_err());
    }
}
