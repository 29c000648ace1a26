use std::fmt;
use std::str::FromStr;

use http::uri::Authority;
use vellum_error::{ErrorContext as _, OpaqueError};

use crate::util::{IterExt as _, TryFromValues, check_authority, parse_authority};

/// `Host` header, defined in [RFC9110](https://www.rfc-editor.org/rfc/rfc9110#section-7.2)
///
/// The "Host" header field in a request provides the host and port
/// information from the target URI, enabling the origin server to
/// distinguish among resources while servicing requests for multiple
/// host names.
///
/// # ABNF
///
/// ```text
/// Host = uri-host [ ":" port ]
/// ```
///
/// A request carrying more than one value, or user info, is rejected.
///
/// # Example values
///
/// * `example.com`
/// * `[::1]:8080`
///
/// # Example
///
/// ```
/// use vellum_http_headers::Host;
///
/// let host: Host = "example.com:8080".parse().unwrap();
/// assert_eq!(host.hostname(), "example.com");
/// assert_eq!(host.port(), Some(8080));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Host(Authority);

derive_header!(Host);

impl Host {
    /// The host, without port. IPv6 addresses keep their brackets.
    #[must_use]
    pub fn hostname(&self) -> &str {
        self.0.host()
    }

    /// The port, if given.
    #[must_use]
    pub fn port(&self) -> Option<u16> {
        self.0.port_u16()
    }

    /// The underlying authority.
    #[must_use]
    pub fn authority(&self) -> &Authority {
        &self.0
    }
}

impl FromStr for Host {
    type Err = OpaqueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_authority(s).context("parse host").map(Self)
    }
}

impl TryFrom<Authority> for Host {
    type Error = OpaqueError;

    fn try_from(authority: Authority) -> Result<Self, Self::Error> {
        check_authority(&authority).context("host authority")?;
        Ok(Self(authority))
    }
}

impl From<Host> for Authority {
    fn from(host: Host) -> Self {
        host.0
    }
}

impl fmt::Display for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl TryFromValues for Host {
    fn try_from_values<'i, I>(values: &mut I) -> Result<Self, OpaqueError>
    where
        I: Iterator<Item = &'i str>,
    {
        values
            .just_one()
            .context("expected exactly one host")?
            .parse()
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_decode;
    use super::*;

    #[test]
    fn decode() {
        let host = test_decode::<Host>(&["example.com"]).unwrap();
        assert_eq!(host.hostname(), "example.com");
        assert_eq!(host.port(), None);

        let host = test_decode::<Host>(&["[::1]:8080"]).unwrap();
        assert_eq!(host.hostname(), "[::1]");
        assert_eq!(host.port(), Some(8080));
        assert_eq!(host.to_string(), "[::1]:8080");
    }

    #[test]
    fn non_numeric_port_is_an_error() {
        assert!("example.com:port".parse::<Host>().is_err());
        assert!("example.com:65536".parse::<Host>().is_err());
        assert_eq!("example.com:65535".parse::<Host>().unwrap().port(), Some(65535));

        let authority: Authority = "example.com:port".parse().unwrap();
        assert!(Host::try_from(authority).is_err());
    }

    #[test]
    fn decode_invalid() {
        for bad in [
            "",
            "user@example.com",
            "example.com/path",
            "example.com:port",
            "example.com:80x",
            "[::1]:http",
        ] {
            assert_eq!(test_decode::<Host>(&[bad]), None, "{bad:?}");
        }
        assert_eq!(test_decode::<Host>(&["a.example", "b.example"]), None);
    }
}
