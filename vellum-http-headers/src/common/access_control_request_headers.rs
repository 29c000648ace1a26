use vellum_error::{ErrorContext as _, OpaqueError};
use vellum_http_types::HeaderName;

derive_non_empty_flat_csv_header! {
    #[header(sep = Comma, parse = parse_request_header_name)]
    /// `Access-Control-Request-Headers` header, as defined on
    /// [mdn](https://developer.mozilla.org/en-US/docs/Web/HTTP/Reference/Headers/Access-Control-Request-Headers).
    ///
    /// The `Access-Control-Request-Headers` header indicates which headers will
    /// be used in the actual request as part of the preflight request.
    ///
    /// # ABNF
    ///
    /// ```text
    /// Access-Control-Request-Headers: "Access-Control-Request-Headers" ":" #field-name
    /// ```
    ///
    /// The `*` wildcard is only meaningful in the response's
    /// `Access-Control-Allow-Headers` and is rejected here.
    ///
    /// # Example values
    /// * `accept-language, date`
    #[derive(Clone, Debug, PartialEq)]
    pub struct AccessControlRequestHeaders(pub NonEmptyVec<HeaderName>);
}

fn parse_request_header_name(s: &str) -> Result<HeaderName, OpaqueError> {
    if s == "*" {
        return Err(OpaqueError::from_display(
            "wildcard is not a request header name",
        ));
    }
    s.parse::<HeaderName>()
        .context("parse request header name")
}

#[cfg(test)]
mod tests {
    use super::super::test_decode;
    use super::*;

    #[test]
    fn decode() {
        let req: AccessControlRequestHeaders = test_decode(&["x-requested-with, content-type"]).unwrap();
        let names: Vec<_> = req.iter().map(HeaderName::as_str).collect();
        assert_eq!(names, ["x-requested-with", "content-type"]);
        assert!(test_decode::<AccessControlRequestHeaders>(&["*"]).is_none());
        assert!(test_decode::<AccessControlRequestHeaders>(&["content-type, *"]).is_none());
    }
}
