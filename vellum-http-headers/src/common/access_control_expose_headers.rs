use vellum_http_types::HeaderName;

derive_wildcard_list_header! {
    /// `Access-Control-Expose-Headers` header, as defined on
    /// [mdn](https://developer.mozilla.org/en-US/docs/Web/HTTP/Reference/Headers/Access-Control-Expose-Headers).
    ///
    /// The `Access-Control-Expose-Headers` header indicates which headers
    /// are safe to expose to the API of a CORS API specification. The
    /// wildcard only applies to requests without credentials.
    ///
    /// # ABNF
    ///
    /// ```text
    /// Access-Control-Expose-Headers = "Access-Control-Expose-Headers" ":" #field-name | *
    /// ```
    ///
    /// # Example values
    /// * `ETag, Content-Length`
    /// * `*`
    #[derive(Clone, Debug, PartialEq)]
    pub struct AccessControlExposeHeaders(pub WildcardList<HeaderName>);
}

#[cfg(test)]
mod tests {
    use super::super::{test_decode, test_encode};
    use super::*;
    use vellum_http_types::header;
    use vellum_utils::collections::non_empty_vec;

    #[test]
    fn encode_lowercase_names() {
        let expose = AccessControlExposeHeaders::new_values(non_empty_vec![
            header::ETAG,
            header::CONTENT_LENGTH
        ]);
        let headers = test_encode(expose);
        assert_eq!(
            headers.get(&header::ACCESS_CONTROL_EXPOSE_HEADERS).unwrap().first(),
            "etag, content-length"
        );
    }

    #[test]
    fn decode() {
        let expose: AccessControlExposeHeaders = test_decode(&["ETag, X-Request-Id"]).unwrap();
        assert_eq!(expose.values().unwrap().len(), 2);
        assert!(test_decode::<AccessControlExposeHeaders>(&["*"]).unwrap().is_any());
    }
}
