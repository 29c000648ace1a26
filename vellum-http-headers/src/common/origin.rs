use std::fmt;
use std::str::FromStr;

use http::uri::{self, Authority, Scheme, Uri};
use vellum_error::{ErrorContext as _, OpaqueError};

use crate::util::{IterExt as _, TryFromValues, check_authority};

/// The `Origin` header.
///
/// The `Origin` header is a version of the `Referer` header that is used for all HTTP fetches and `POST`s whose CORS flag is set.
/// This header is often used to inform recipients of the security context of where the request was initiated.
///
/// Following the [Fetch standard][url], the value of this header is composed of
/// a String (scheme), Host (host/port)
///
/// [url]: https://fetch.spec.whatwg.org/#origin-header
///
/// # Examples
///
/// ```
/// use vellum_http_headers::Origin;
///
/// let origin = Origin::NULL;
/// assert!(origin.is_null());
///
/// let origin = Origin::try_from_parts("https", "example.com", 8443).unwrap();
/// assert_eq!(origin.to_string(), "https://example.com:8443");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Origin(OriginOrNull);

derive_header!(Origin);

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
enum OriginOrNull {
    Origin(Scheme, Authority),
    Null,
}

impl Origin {
    /// The literal `null` Origin header.
    pub const NULL: Self = Self(OriginOrNull::Null);

    /// Checks if `Origin` is `null`.
    #[inline]
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self.0, OriginOrNull::Null)
    }

    /// Get the "scheme" part of this origin.
    #[inline]
    #[must_use]
    pub fn scheme(&self) -> &str {
        match self.0 {
            OriginOrNull::Origin(ref scheme, _) => scheme.as_str(),
            OriginOrNull::Null => "",
        }
    }

    /// Get the "hostname" part of this origin.
    #[inline]
    #[must_use]
    pub fn hostname(&self) -> &str {
        match self.0 {
            OriginOrNull::Origin(_, ref auth) => auth.host(),
            OriginOrNull::Null => "",
        }
    }

    /// Get the "port" part of this origin.
    #[inline]
    #[must_use]
    pub fn port(&self) -> Option<u16> {
        match self.0 {
            OriginOrNull::Origin(_, ref auth) => auth.port_u16(),
            OriginOrNull::Null => None,
        }
    }

    /// Tries to build a `Origin` from three parts, the scheme, the host and an optional port.
    pub fn try_from_parts(
        scheme: &str,
        host: &str,
        port: impl Into<Option<u16>>,
    ) -> Result<Self, OpaqueError> {
        let origin = match port.into() {
            Some(port) => format!("{scheme}://{host}:{port}"),
            None => format!("{scheme}://{host}"),
        };
        origin.parse()
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            OriginOrNull::Origin(ref scheme, ref auth) => write!(f, "{scheme}://{auth}"),
            OriginOrNull::Null => f.write_str("null"),
        }
    }
}

impl FromStr for Origin {
    type Err = OpaqueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == "null" {
            return Ok(Self::NULL);
        }

        let uri = Uri::try_from(s).context("parse origin as uri")?;

        let (scheme, auth) = match uri.into_parts() {
            uri::Parts {
                scheme: Some(scheme),
                authority: Some(auth),
                path_and_query: None,
                ..
            } => (scheme, auth),
            uri::Parts {
                scheme: Some(scheme),
                authority: Some(auth),
                path_and_query: Some(p),
                ..
            } if p == "/" => (scheme, auth),
            _ => {
                return Err(OpaqueError::from_display(
                    "origin must be scheme and authority only",
                ));
            }
        };
        check_authority(&auth).context("origin authority")?;

        Ok(Self(OriginOrNull::Origin(scheme, auth)))
    }
}

impl TryFromValues for Origin {
    fn try_from_values<'i, I>(values: &mut I) -> Result<Self, OpaqueError>
    where
        I: Iterator<Item = &'i str>,
    {
        values
            .just_one()
            .context("expected exactly one origin")?
            .parse()
    }
}

#[cfg(test)]
mod tests {
    use super::super::{test_decode, test_encode};
    use super::*;
    use vellum_http_types::header;

    #[test]
    fn origin() {
        let s = "http://web-platform.test:8000";
        let origin = test_decode::<Origin>(&[s]).unwrap();
        assert_eq!(origin.scheme(), "http");
        assert_eq!(origin.hostname(), "web-platform.test");
        assert_eq!(origin.port(), Some(8000));

        let headers = test_encode(origin);
        assert_eq!(headers.get(&header::ORIGIN).unwrap().first(), s);
    }

    #[test]
    fn null() {
        assert_eq!(test_decode::<Origin>(&["null"]), Some(Origin::NULL));

        let headers = test_encode(Origin::NULL);
        assert_eq!(headers.get(&header::ORIGIN).unwrap().first(), "null");
    }

    #[test]
    fn port_must_be_numeric() {
        assert!("https://example.com:abc".parse::<Origin>().is_err());
        assert!(Origin::try_from_parts("https", "example.com:abc", None).is_err());
        assert_eq!(
            Origin::try_from_parts("https", "example.com", 443)
                .unwrap()
                .port(),
            Some(443)
        );
    }

    #[test]
    fn trailing_slash() {
        let origin = test_decode::<Origin>(&["https://example.com/"]).unwrap();
        assert_eq!(origin.to_string(), "https://example.com");
    }

    #[test]
    fn invalid() {
        for bad in [
            "example.com",
            "https://example.com/path",
            "https://user@example.com",
            "https://example.com:abc",
            "http://example.com:70000",
            "",
        ] {
            assert_eq!(test_decode::<Origin>(&[bad]), None, "{bad:?}");
        }
        assert_eq!(
            test_decode::<Origin>(&["https://a.example", "https://b.example"]),
            None
        );
    }
}
