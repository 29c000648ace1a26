use std::fmt;
use std::str::FromStr;

use mime::Mime;
use vellum_error::{ErrorContext as _, OpaqueError};

use crate::{HeaderDecode, HeaderEncode};

/// `Content-Type` header, defined in
/// [RFC9110](https://www.rfc-editor.org/rfc/rfc9110#section-8.3)
///
/// The `Content-Type` header field indicates the media type of the
/// associated representation: either the representation enclosed in the
/// message payload or the selected representation, as determined by the
/// message semantics.  The indicated media type defines both the data
/// format and how that data is intended to be processed by a recipient,
/// within the scope of the received message semantics, after any content
/// codings indicated by Content-Encoding are decoded.
///
/// # ABNF
///
/// ```text
/// Content-Type = media-type
/// ```
///
/// # Example values
///
/// * `text/html; charset=utf-8`
/// * `application/json`
///
/// # Examples
///
/// ```
/// use vellum_http_headers::ContentType;
///
/// let ct = ContentType::json();
/// assert_eq!(ct.to_string(), "application/json");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ContentType(Mime);

impl ContentType {
    /// A constructor to easily create a `Content-Type: application/json` header.
    #[inline]
    #[must_use]
    pub fn json() -> Self {
        Self(mime::APPLICATION_JSON)
    }

    /// A constructor to easily create a `Content-Type: text/plain` header.
    #[inline]
    #[must_use]
    pub fn text() -> Self {
        Self(mime::TEXT_PLAIN)
    }

    /// A constructor to easily create a `Content-Type: text/plain; charset=utf-8` header.
    #[inline]
    #[must_use]
    pub fn text_utf8() -> Self {
        Self(mime::TEXT_PLAIN_UTF_8)
    }

    /// A constructor to easily create a `Content-Type: text/html; charset=utf-8` header.
    #[inline]
    #[must_use]
    pub fn html_utf8() -> Self {
        Self(mime::TEXT_HTML_UTF_8)
    }

    /// A constructor to easily create a `Content-Type: application/x-www-form-urlencoded` header.
    #[inline]
    #[must_use]
    pub fn form_url_encoded() -> Self {
        Self(mime::APPLICATION_WWW_FORM_URLENCODED)
    }

    /// A constructor to easily create a `Content-Type: application/octet-stream` header.
    #[inline]
    #[must_use]
    pub fn octet_stream() -> Self {
        Self(mime::APPLICATION_OCTET_STREAM)
    }

    /// Reference to the internal [`Mime`].
    #[must_use]
    pub fn mime(&self) -> &Mime {
        &self.0
    }

    /// Consume the header into the internal [`Mime`].
    #[must_use]
    pub fn into_mime(self) -> Mime {
        self.0
    }

    /// The `charset` parameter, if any.
    #[must_use]
    pub fn charset(&self) -> Option<&str> {
        self.0.get_param(mime::CHARSET).map(|name| name.as_str())
    }
}

impl HeaderDecode for ContentType {
    fn decode<'i, I>(values: &mut I) -> Result<Self, OpaqueError>
    where
        I: Iterator<Item = &'i str>,
    {
        values
            .next()
            .context("missing content-type value")?
            .parse()
    }
}

impl HeaderEncode for ContentType {
    fn encode<E: Extend<String>>(&self, values: &mut E) {
        values.extend(::std::iter::once(self.0.to_string()));
    }
}

impl From<Mime> for ContentType {
    fn from(m: Mime) -> Self {
        Self(m)
    }
}

impl From<ContentType> for Mime {
    fn from(ct: ContentType) -> Self {
        ct.0
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for ContentType {
    type Err = OpaqueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<Mime>()
            .map(Self)
            .context("parse content-type media type")
    }
}
