//! Comma (or semicolon) separated header values.

use std::fmt::Display;
use std::str::FromStr;

use vellum_error::{BoxError, ErrorContext as _, OpaqueError};
use vellum_utils::collections::NonEmptyVec;

/// Separator between the elements of a list value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub(crate) enum Separator {
    #[default]
    Comma,
    SemiColon,
}

impl Separator {
    pub(crate) fn as_char(self) -> char {
        match self {
            Self::Comma => ',',
            Self::SemiColon => ';',
        }
    }

    fn as_joiner(self) -> &'static str {
        match self {
            Self::Comma => ", ",
            Self::SemiColon => "; ",
        }
    }
}

/// Split `s` on `sep`, except where `sep` appears inside a quoted string.
///
/// Backslash escapes inside quoted strings are honoured, so `"a\",b"` is a
/// single element. Elements are returned untrimmed.
pub(crate) fn split_str(s: &str, sep: char) -> impl Iterator<Item = &str> {
    let mut in_quotes = false;
    let mut escaped = false;
    s.split(move |c| {
        if in_quotes {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_quotes = false;
            }
            false
        } else if c == sep {
            true
        } else {
            if c == '"' {
                in_quotes = true;
            }
            false
        }
    })
}

/// All trimmed, non-empty list elements over all raw values.
///
/// Empty elements (`a, , b`) are skipped as allowed by the list rule of
/// RFC 9110, section 5.6.1.
pub(crate) fn elements<'i, I>(values: I, sep: Separator) -> impl Iterator<Item = &'i str>
where
    I: IntoIterator<Item = &'i str>,
{
    let sep = sep.as_char();
    values
        .into_iter()
        .flat_map(move |value| split_str(value, sep))
        .map(str::trim)
        .filter(|element| !element.is_empty())
}

/// Parse a list element through its [`FromStr`] implementation.
pub(crate) fn parse_from_str<T>(s: &str) -> Result<T, OpaqueError>
where
    T: FromStr<Err: Into<BoxError>>,
{
    s.parse::<T>()
        .map_err(|err| OpaqueError::from_boxed(err.into()))
}

/// Decode a list which may not be empty.
pub(crate) fn decode_non_empty_list<'i, I, T, F>(
    values: I,
    sep: Separator,
    parse: F,
) -> Result<NonEmptyVec<T>, OpaqueError>
where
    I: IntoIterator<Item = &'i str>,
    F: FnMut(&str) -> Result<T, OpaqueError>,
{
    let items = decode_list(values, sep, parse)?;
    NonEmptyVec::from_vec(items).context("header value is an empty list")
}

/// Decode a list which may be empty.
pub(crate) fn decode_list<'i, I, T, F>(
    values: I,
    sep: Separator,
    mut parse: F,
) -> Result<Vec<T>, OpaqueError>
where
    I: IntoIterator<Item = &'i str>,
    F: FnMut(&str) -> Result<T, OpaqueError>,
{
    elements(values, sep)
        .map(|element| {
            parse(element).with_context(|| format!("parse list element {element:?}"))
        })
        .collect()
}

/// Join the displayed values with the separator and a space.
pub(crate) fn encode_list<T, I>(values: I, sep: Separator) -> String
where
    I: IntoIterator<Item = T>,
    T: Display,
{
    use std::fmt::Write as _;

    let mut out = String::new();
    for (index, value) in values.into_iter().enumerate() {
        if index > 0 {
            out.push_str(sep.as_joiner());
        }
        let _ = write!(out, "{value}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_respects_quotes() {
        for (input, sep, expected) in [
            ("aaa, b; bb, ccc", ';', vec!["aaa, b", " bb, ccc"]),
            ("aaa; b, bb; ccc", ',', vec!["aaa; b", " bb; ccc"]),
            (
                "foo=\"bar,baz\", sherlock=holmes",
                ',',
                vec!["foo=\"bar,baz\"", " sherlock=holmes"],
            ),
            (
                r#"a="x\",y", b"#,
                ',',
                vec![r#"a="x\",y""#, " b"],
            ),
        ] {
            assert_eq!(split_str(input, sep).collect::<Vec<_>>(), expected, "{input}");
        }
    }

    #[test]
    fn elements_skip_empty_and_span_values() {
        let found: Vec<_> = elements([" a ,, b", "", "c,"], Separator::Comma).collect();
        assert_eq!(found, ["a", "b", "c"]);
    }

    #[test]
    fn decode_non_empty_list_rejects_empty() {
        let err = decode_non_empty_list([" , "], Separator::Comma, parse_from_str::<u8>)
            .unwrap_err();
        assert_eq!(err.to_string(), "header value is an empty list");
    }

    #[test]
    fn decode_list_reports_the_element() {
        let err = decode_list(["1, x"], Separator::Comma, parse_from_str::<u8>).unwrap_err();
        assert!(err.to_string().starts_with("parse list element \"x\""), "{err}");
        assert_eq!(
            decode_list(["1, 2", "3"], Separator::Comma, parse_from_str::<u8>).unwrap(),
            [1, 2, 3]
        );
    }

    #[test]
    fn encode_list_joins() {
        assert_eq!(encode_list([1, 2, 3], Separator::Comma), "1, 2, 3");
        assert_eq!(encode_list(["a", "b"], Separator::SemiColon), "a; b");
        assert_eq!(encode_list(Vec::<u8>::new(), Separator::Comma), "");
    }

    #[quickcheck_macros::quickcheck]
    fn quoted_elements_survive_splitting(items: Vec<String>) -> bool {
        use crate::util::{quote, unquote};

        let items: Vec<String> = items
            .into_iter()
            .map(|item| item.chars().filter(|c| (' '..='~').contains(c)).collect())
            .collect();
        let joined = encode_list(items.iter().map(|item| quote(item)), Separator::Comma);
        let found: Result<Vec<_>, _> = elements([joined.as_str()], Separator::Comma)
            .map(unquote)
            .collect();
        found.is_ok_and(|found| found == items)
    }
}
