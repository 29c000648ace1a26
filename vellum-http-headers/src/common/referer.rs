use std::str::FromStr;

use vellum_error::{ErrorContext as _, OpaqueError};

use crate::util::UriRef;
use crate::{HeaderDecode, HeaderEncode};

/// `Referer` header, defined in
/// [RFC9110](https://www.rfc-editor.org/rfc/rfc9110#section-10.1.3)
///
/// The `Referer` \[sic\] header field allows the user agent to specify a
/// URI reference for the resource from which the target URI was obtained
/// (i.e., the "referrer", though the field name is misspelled).  A user
/// agent MUST NOT include the fragment and userinfo components of the URI
/// reference, if any, when generating the Referer field value.
///
/// # ABNF
///
/// ```text
/// Referer = absolute-URI / partial-URI
/// ```
///
/// Values with a fragment are rejected.
///
/// # Example values
///
/// * `http://www.example.org/hypertext/Overview.html`
///
/// # Examples
///
/// ```
/// use vellum_http_headers::Referer;
///
/// let r: Referer = "/People.html".parse().unwrap();
/// assert_eq!(r.as_str(), "/People.html");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Referer(UriRef);


impl Referer {
    /// View this `Referer` as a `&str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl FromStr for Referer {
    type Err = OpaqueError;

    fn from_str(src: &str) -> Result<Self, Self::Err> {
        let uri: UriRef = src.parse()?;
        if uri.has_fragment() {
            return Err(OpaqueError::from_display("referer may not carry a fragment"));
        }
        Ok(Self(uri))
    }
}

impl HeaderDecode for Referer {
    fn decode<'i, I>(values: &mut I) -> Result<Self, OpaqueError>
    where
        I: Iterator<Item = &'i str>,
    {
        values.next().context("missing referer value")?.parse()
    }
}

impl HeaderEncode for Referer {
    fn encode<E: Extend<String>>(&self, values: &mut E) {
        values.extend(::std::iter::once(self.0.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_decode;
    use super::*;

    #[test]
    fn decode() {
        let r: Referer = test_decode(&["http://www.example.org/hypertext/Overview.html"]).unwrap();
        assert_eq!(r.as_str(), "http://www.example.org/hypertext/Overview.html");
    }

    #[test]
    fn fragment_is_rejected() {
        assert_eq!(test_decode::<Referer>(&["/People.html#tim"]), None);
    }
}
