use crate::util::UriRef;

/// `Content-Location` header, defined in
/// [RFC9110](https://www.rfc-editor.org/rfc/rfc9110#section-8.7)
///
/// The header can be used by both the client in requests and the server
/// in responses with different semantics. Client sets `Content-Location`
/// to refer to the URI where original representation of the body was
/// obtained.
///
/// In responses `Content-Location` represents URI for the representation
/// that was content negotiated, created or for the response payload.
///
/// # ABNF
///
/// ```text
/// Content-Location = absolute-URI / partial-URI
/// ```
///
/// # Example values
///
/// * `/hypertext/Overview.html`
/// * `http://www.example.org/hypertext/Overview.html`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ContentLocation(pub UriRef);

derive_header!(ContentLocation(_));

#[cfg(test)]
mod tests {
    use super::super::test_decode;
    use super::*;

    #[test]
    fn partial_uri() {
        let loc: ContentLocation = test_decode(&["/hypertext/Overview.html"]).unwrap();
        assert_eq!(loc.0.as_str(), "/hypertext/Overview.html");
    }

    #[test]
    fn absolute_uri() {
        let loc: ContentLocation =
            test_decode(&["http://www.example.org/hypertext/Overview.html"]).unwrap();
        assert!(loc.0.is_absolute());
    }
}
