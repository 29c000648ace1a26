use std::fmt;
use std::str::FromStr;

use vellum_error::OpaqueError;

use crate::util::is_token;

derive_non_empty_flat_csv_header! {
    #[header(sep = Comma)]
    /// `Upgrade` header, defined in [RFC9110](https://www.rfc-editor.org/rfc/rfc9110#section-7.8)
    ///
    /// The `Upgrade` header field is intended to provide a simple mechanism
    /// for transitioning from HTTP/1.1 to some other protocol on the same
    /// connection.  A client MAY send a list of protocols in the Upgrade
    /// header field of a request to invite the server to switch to one or
    /// more of those protocols, in order of descending preference, before
    /// sending the final response.  A server MAY ignore a received Upgrade
    /// header field if it wishes to continue using the current protocol on
    /// that connection.  Upgrade cannot be used to insist on a protocol
    /// change.
    ///
    /// ## ABNF
    ///
    /// ```text
    /// Upgrade          = 1#protocol
    ///
    /// protocol         = protocol-name ["/" protocol-version]
    /// protocol-name    = token
    /// protocol-version = token
    /// ```
    ///
    /// ## Example values
    ///
    /// * `HTTP/2.0, SHTTP/1.3, IRC/6.9, RTA/x11`
    ///
    /// # Note
    ///
    /// In practice, the `Upgrade` header is never that complicated. In most cases,
    /// it is only ever a single value, such as `"websocket"`.
    ///
    /// # Examples
    ///
    /// ```
    /// use vellum_http_headers::Upgrade;
    ///
    /// let ws = Upgrade::websocket();
    /// assert!(ws.offers("WebSocket"));
    /// ```
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub struct Upgrade(pub NonEmptyVec<Protocol>);
}

impl Upgrade {
    /// Constructs an `Upgrade: websocket` header.
    #[must_use]
    pub fn websocket() -> Self {
        Self::new(Protocol {
            name: "websocket".to_owned(),
            version: None,
        })
    }

    /// Returns true if a protocol with the given name is offered, any version.
    #[must_use]
    pub fn offers(&self, name: &str) -> bool {
        self.iter().any(|p| p.name.eq_ignore_ascii_case(name))
    }
}

/// A `protocol-name ["/" protocol-version]` pair.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Protocol {
    name: String,
    version: Option<String>,
}

impl Protocol {
    /// Create a protocol, both parts must be tokens.
    pub fn new(name: &str, version: Option<&str>) -> Result<Self, OpaqueError> {
        if !is_token(name) || version.is_some_and(|v| !is_token(v)) {
            return Err(OpaqueError::from_display("protocol parts must be tokens"));
        }
        Ok(Self {
            name: name.to_owned(),
            version: version.map(ToOwned::to_owned),
        })
    }

    /// The protocol name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The protocol version, if given.
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }
}

impl FromStr for Protocol {
    type Err = OpaqueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().split_once('/') {
            Some((name, version)) => Self::new(name, Some(version)),
            None => Self::new(s.trim(), None),
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if let Some(version) = &self.version {
            write!(f, "/{version}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::{test_decode, test_encode};
    use super::*;
    use vellum_http_types::header;

    #[test]
    fn decode_protocols() {
        let upgrade = test_decode::<Upgrade>(&["HTTP/2.0, SHTTP/1.3, IRC/6.9, RTA/x11"]).unwrap();
        let protocols: Vec<_> = upgrade.iter().map(|p| (p.name(), p.version())).collect();
        assert_eq!(
            protocols,
            [
                ("HTTP", Some("2.0")),
                ("SHTTP", Some("1.3")),
                ("IRC", Some("6.9")),
                ("RTA", Some("x11"))
            ]
        );
        assert!(upgrade.offers("irc"));
        assert!(!upgrade.offers("websocket"));
    }

    #[test]
    fn decode_invalid() {
        for bad in ["", "web socket", "h2c/", "/1.1"] {
            assert!(test_decode::<Upgrade>(&[bad]).is_none(), "{bad:?}");
        }
    }

    #[test]
    fn encode_websocket() {
        let headers = test_encode(Upgrade::websocket());
        assert_eq!(headers.get(&header::UPGRADE).unwrap().first(), "websocket");
    }
}
