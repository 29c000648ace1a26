use crate::util::UriRef;

/// `Location` header, defined in
/// [RFC9110](https://www.rfc-editor.org/rfc/rfc9110#section-10.2.2)
///
/// The `Location` header field is used in some responses to refer to a
/// specific resource in relation to the response.  The type of
/// relationship is defined by the combination of request method and
/// status code semantics.
///
/// # ABNF
///
/// ```text
/// Location = URI-reference
/// ```
///
/// # Example values
/// * `/People.html#tim`
/// * `http://www.example.net/index.html`
///
/// # Example
///
/// ```
/// use vellum_http_headers::Location;
///
/// let location: Location = "../login".parse().unwrap();
/// assert_eq!(
///     location.resolve_against("https://example.com/app/home").unwrap(),
///     "https://example.com/login",
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Location(pub UriRef);

derive_header!(Location(_));

impl Location {
    /// The target as given.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Resolve a relative target against the request URI.
    pub fn resolve_against(&self, base: &str) -> Result<String, vellum_error::OpaqueError> {
        self.0.resolve_against(base)
    }
}

impl std::str::FromStr for Location {
    type Err = vellum_error::OpaqueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::super::{test_decode, test_encode};
    use super::*;
    use vellum_http_types::header;

    #[test]
    fn decode_relative_with_fragment() {
        let location: Location = test_decode(&["/People.html#tim"]).unwrap();
        assert!(!location.0.is_absolute());
        assert!(location.0.has_fragment());
    }

    #[test]
    fn encode() {
        let location: Location = "http://www.example.net/index.html".parse().unwrap();
        let headers = test_encode(location);
        assert_eq!(
            headers.get(&header::LOCATION).unwrap().first(),
            "http://www.example.net/index.html"
        );
    }

    #[test]
    fn decode_invalid() {
        assert_eq!(test_decode::<Location>(&["http://exa mple.net"]), None);
    }
}
