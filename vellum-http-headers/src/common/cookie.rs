use std::fmt;

use vellum_error::{ErrorContext as _, OpaqueError};
use vellum_utils::collections::NonEmptyVec;

use crate::util::{csv, is_token};
use crate::{HeaderDecode, HeaderEncode};

/// `Cookie` header, defined in [RFC6265](https://datatracker.ietf.org/doc/html/rfc6265#section-5.4)
///
/// In an HTTP request the user agent sends the cookies it holds for the
/// target as `name=value` pairs separated by `; `. When the request was
/// split into several field lines (HTTP/2 allows this) all of them are
/// read as one list.
///
/// # ABNF
///
/// ```text
/// cookie-header = "Cookie:" OWS cookie-string OWS
/// cookie-string = cookie-pair *( ";" SP cookie-pair )
/// cookie-pair   = cookie-name "=" cookie-value
/// cookie-name   = token
/// cookie-value  = *cookie-octet / ( DQUOTE *cookie-octet DQUOTE )
/// ```
///
/// Cookie values are kept as sent, surrounding quotes included.
///
/// # Example values
///
/// * `SID=31d4d96e407aad42`
/// * `SID=31d4d96e407aad42; lang=en-US`
///
/// # Example
///
/// ```
/// use vellum_http_headers::Cookie;
///
/// let cookie = Cookie::new("SID", "31d4d96e407aad42")
///     .unwrap()
///     .with("lang", "en-US")
///     .unwrap();
/// assert_eq!(cookie.get("lang"), Some("en-US"));
/// assert_eq!(cookie.to_string(), "SID=31d4d96e407aad42; lang=en-US");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cookie(NonEmptyVec<(String, String)>);

impl Cookie {
    /// Create a header holding a single cookie.
    pub fn new(name: &str, value: &str) -> Result<Self, OpaqueError> {
        validate_pair(name, value)?;
        Ok(Self(NonEmptyVec::new((name.to_owned(), value.to_owned()))))
    }

    /// Append a cookie.
    pub fn with(mut self, name: &str, value: &str) -> Result<Self, OpaqueError> {
        validate_pair(name, value)?;
        self.0.push((name.to_owned(), value.to_owned()));
        Ok(self)
    }

    /// The value of the first cookie named `name`.
    ///
    /// Cookie names are case-sensitive.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.iter().find(|(n, _)| *n == name).map(|(_, v)| v)
    }

    /// Iterate over all `(name, value)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// The number of cookie pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false, a `Cookie` header carries at least one pair.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl HeaderDecode for Cookie {
    fn decode<'i, I>(values: &mut I) -> Result<Self, OpaqueError>
    where
        I: Iterator<Item = &'i str>,
    {
        csv::decode_non_empty_list(values, csv::Separator::SemiColon, |pair| {
            let (name, value) = pair
                .split_once('=')
                .context("cookie pair without '='")?;
            let (name, value) = (name.trim(), value.trim());
            validate_pair(name, value)?;
            Ok((name.to_owned(), value.to_owned()))
        })
        .map(Self)
    }
}

impl HeaderEncode for Cookie {
    fn encode<E: Extend<String>>(&self, values: &mut E) {
        values.extend(std::iter::once(self.to_string()));
    }
}

impl fmt::Display for Cookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, (name, value)) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{name}={value}")?;
        }
        Ok(())
    }
}

pub(super) fn validate_pair(name: &str, value: &str) -> Result<(), OpaqueError> {
    if !is_token(name) {
        return Err(OpaqueError::from_display(format!(
            "cookie name {name:?} is not a token"
        )));
    }
    let inner = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value);
    if inner.bytes().all(is_cookie_octet) {
        Ok(())
    } else {
        Err(OpaqueError::from_display(format!(
            "invalid cookie value for {name}"
        )))
    }
}

/// `%x21 / %x23-2B / %x2D-3A / %x3C-5B / %x5D-7E`
fn is_cookie_octet(b: u8) -> bool {
    matches!(b, 0x21 | 0x23..=0x2B | 0x2D..=0x3A | 0x3C..=0x5B | 0x5D..=0x7E)
}

#[cfg(test)]
mod tests {
    use super::super::{test_decode, test_encode};
    use super::*;
    use vellum_http_types::header;

    #[test]
    fn decode_pairs() {
        let cookie = test_decode::<Cookie>(&["SID=31d4d96e407aad42; lang=en-US"]).unwrap();
        assert_eq!(cookie.len(), 2);
        assert_eq!(cookie.get("SID"), Some("31d4d96e407aad42"));
        assert_eq!(cookie.get("sid"), None);
        assert_eq!(cookie.get("lang"), Some("en-US"));
    }

    #[test]
    fn decode_split_field_lines() {
        let cookie = test_decode::<Cookie>(&["a=1", "b=\"two\"; c="]).unwrap();
        assert_eq!(
            cookie.iter().collect::<Vec<_>>(),
            [("a", "1"), ("b", "\"two\""), ("c", "")]
        );

        let headers = test_encode(cookie);
        assert_eq!(
            headers.get(&header::COOKIE).unwrap().first(),
            "a=1; b=\"two\"; c="
        );
    }

    #[test]
    fn decode_invalid() {
        for bad in ["", "novalue", "=value", "a=b c", "a=b,c", "a=\"b"] {
            assert_eq!(test_decode::<Cookie>(&[bad]), None, "{bad:?}");
        }
    }
}
