//! Tokens and quoted strings, RFC 9110 section 5.6.

use std::borrow::Cow;

use vellum_error::OpaqueError;

/// Returns true if `b` is a `tchar`.
#[must_use]
pub fn is_tchar(b: u8) -> bool {
    b.is_ascii_alphanumeric()
        || matches!(
            b,
            b'!' | b'#'
                | b'$'
                | b'%'
                | b'&'
                | b'\''
                | b'*'
                | b'+'
                | b'-'
                | b'.'
                | b'^'
                | b'_'
                | b'`'
                | b'|'
                | b'~'
        )
}

/// Returns true if `s` is a non-empty `token`.
#[must_use]
pub fn is_token(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(is_tchar)
}

/// Wrap `s` in double quotes, escaping `\` and `"`.
#[must_use]
pub fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        if matches!(c, '"' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}

/// Quote `s` unless it is a token already.
#[must_use]
pub fn quote_if_needed(s: &str) -> Cow<'_, str> {
    if is_token(s) {
        Cow::Borrowed(s)
    } else {
        Cow::Owned(quote(s))
    }
}

/// Parse a `quoted-string` (surrounding quotes included) into its content.
pub fn unquote(s: &str) -> Result<String, OpaqueError> {
    let inner = s
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .ok_or_else(|| OpaqueError::from_display("quoted string must be wrapped in double quotes"))?;

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some(escaped) => out.push(escaped),
                None => {
                    return Err(OpaqueError::from_display(
                        "quoted string ends in a lone backslash",
                    ));
                }
            },
            '"' => {
                return Err(OpaqueError::from_display(
                    "unescaped double quote inside quoted string",
                ));
            }
            c if c.is_ascii_control() && c != '\t' => {
                return Err(OpaqueError::from_display(
                    "control character inside quoted string",
                ));
            }
            c => out.push(c),
        }
    }
    Ok(out)
}

/// Parse either a `token` or a `quoted-string`.
pub fn token_or_quoted(s: &str) -> Result<String, OpaqueError> {
    if s.starts_with('"') {
        unquote(s)
    } else if is_token(s) {
        Ok(s.to_owned())
    } else {
        Err(OpaqueError::from_display(
            "expected a token or a quoted string",
        ))
    }
}

/// Split `name=value` at the first `=`, both sides trimmed.
pub(crate) fn split_param(s: &str) -> (&str, Option<&str>) {
    match s.split_once('=') {
        Some((name, value)) => (name.trim(), Some(value.trim())),
        None => (s.trim(), None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens() {
        assert!(is_token("gzip"));
        assert!(is_token("x-custom_1.0~"));
        assert!(!is_token(""));
        assert!(!is_token("a b"));
        assert!(!is_token("a,b"));
        assert!(!is_token("\"a\""));
    }

    #[test]
    fn quote_escapes_minimally() {
        assert_eq!(quote("abc"), "\"abc\"");
        assert_eq!(quote(r#"a"b\c"#), r#""a\"b\\c""#);
        assert_eq!(quote_if_needed("abc"), "abc");
        assert_eq!(quote_if_needed("a b"), "\"a b\"");
    }

    #[test]
    fn unquote_handles_escapes() {
        assert_eq!(unquote(r#""a\"b\\c""#).unwrap(), r#"a"b\c"#);
        assert_eq!(unquote("\"\"").unwrap(), "");
        for bad in ["abc", "\"abc", "\"", "\"a\"b\"", "\"a\\\"", "\"a\u{1}\""] {
            assert!(unquote(bad).is_err(), "{bad:?}");
        }
    }

    #[test]
    fn token_or_quoted_string() {
        assert_eq!(token_or_quoted("abc").unwrap(), "abc");
        assert_eq!(token_or_quoted("\"a b\"").unwrap(), "a b");
        assert!(token_or_quoted("a b").is_err());
    }

    #[test]
    fn params() {
        assert_eq!(split_param(" q = 0.5 "), ("q", Some("0.5")));
        assert_eq!(split_param("a=b=c"), ("a", Some("b=c")));
        assert_eq!(split_param("secure"), ("secure", None));
    }
}
