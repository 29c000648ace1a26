use vellum_http_types::HeaderName;

derive_wildcard_list_header! {
    /// `Access-Control-Allow-Headers` header, as defined on
    /// [mdn](https://developer.mozilla.org/en-US/docs/Web/HTTP/Reference/Headers/Access-Control-Allow-Headers).
    ///
    /// The `Access-Control-Allow-Headers` header indicates, as part of the
    /// response to a preflight request, which header field names can be used
    /// during the actual request.
    ///
    /// # ABNF
    ///
    /// ```text
    /// Access-Control-Allow-Headers: "Access-Control-Allow-Headers" ":" #field-name | *
    /// ```
    ///
    /// # Example values
    /// * `accept-language, date`
    /// * `*`
    ///
    /// # Examples
    ///
    /// ```
    /// use vellum_utils::collections::non_empty_vec;
    /// use vellum_http_types::header;
    /// use vellum_http_headers::AccessControlAllowHeaders;
    ///
    /// let allow_headers = AccessControlAllowHeaders::new_values(
    ///     non_empty_vec![header::CACHE_CONTROL, header::DATE],
    /// );
    /// assert!(allow_headers.allows(&header::DATE));
    /// ```
    #[derive(Clone, Debug, PartialEq)]
    pub struct AccessControlAllowHeaders(pub WildcardList<HeaderName>);
}

impl AccessControlAllowHeaders {
    /// Returns true if `name` is allowed, always for `*`.
    #[must_use]
    pub fn allows(&self, name: &HeaderName) -> bool {
        self.0.any_matches(|allowed| allowed == name)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_decode;
    use super::*;
    use vellum_http_types::header;

    #[test]
    fn decode_multiple_values() {
        let allow_headers =
            test_decode::<AccessControlAllowHeaders>(&["foo, bar", "baz"]).unwrap();
        let values = allow_headers.values().unwrap();
        assert_eq!(values.len(), 3);
        assert_eq!(values[0], "foo");
        assert_eq!(values[2], "baz");
    }

    #[test]
    fn decode_with_empty_header_value() {
        let allow_headers =
            test_decode::<AccessControlAllowHeaders>(&["Content-Type, , Accept"]).unwrap();
        assert!(allow_headers.allows(&header::CONTENT_TYPE));
        assert!(allow_headers.allows(&header::ACCEPT));
        assert_eq!(allow_headers.values().unwrap().len(), 2);
    }

    #[test]
    fn decode_empty() {
        assert!(test_decode::<AccessControlAllowHeaders>(&[""]).is_none());
    }

    #[test]
    fn decode_any() {
        let allow = test_decode::<AccessControlAllowHeaders>(&["*"]).unwrap();
        assert!(allow.is_any());
        assert!(allow.allows(&header::AUTHORIZATION));
    }
}
