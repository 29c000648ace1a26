use vellum_http_types::HeaderName;

derive_wildcard_list_header! {
    /// `Vary` header, defined in [RFC9110](https://www.rfc-editor.org/rfc/rfc9110#section-12.5.5)
    ///
    /// The "Vary" header field in a response describes what parts of a
    /// request message, aside from the method, Host header field, and
    /// request target, might influence the origin server's process for
    /// selecting and representing this response.  The value consists of
    /// either a single asterisk ("*") or a list of header field names
    /// (case-insensitive).
    ///
    /// # ABNF
    ///
    /// ```text
    /// Vary = "*" / 1#field-name
    /// ```
    ///
    /// # Example values
    ///
    /// * `accept-encoding, accept-language`
    ///
    /// # Example
    ///
    /// ```
    /// use vellum_http_headers::Vary;
    /// use vellum_http_types::header;
    ///
    /// let vary = Vary::new(header::ACCEPT_ENCODING);
    /// assert!(vary.contains(&header::ACCEPT_ENCODING));
    /// ```
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub struct Vary(pub WildcardList<HeaderName>);
}

impl Vary {
    /// Returns true if the response varies on `name`, always for `*`.
    #[must_use]
    pub fn contains(&self, name: &HeaderName) -> bool {
        self.0.any_matches(|value| value == name)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_decode;
    use super::*;
    use vellum_http_types::header;

    #[test]
    fn decode_case_insensitive_names() {
        let vary: Vary = test_decode(&["Accept-Encoding, ACCEPT-LANGUAGE"]).unwrap();
        assert!(vary.contains(&header::ACCEPT_ENCODING));
        assert!(vary.contains(&header::ACCEPT_LANGUAGE));
        assert!(!vary.contains(&header::COOKIE));
    }

    #[test]
    fn any_varies_on_everything() {
        let vary: Vary = test_decode(&["*"]).unwrap();
        assert!(vary.is_any());
        assert!(vary.contains(&header::COOKIE));
    }

    #[test]
    fn decode_invalid() {
        assert_eq!(test_decode::<Vary>(&["bad name"]), None);
        assert_eq!(test_decode::<Vary>(&["*, cookie"]), None);
    }
}
