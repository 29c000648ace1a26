token_enum_header! {
    /// `X-Content-Type-Options` header, defined in the
    /// [Fetch standard](https://fetch.spec.whatwg.org/#x-content-type-options-header)
    ///
    /// Indicates that the MIME types advertised in the `Content-Type`
    /// headers should be respected and not changed.
    ///
    /// # Example values
    /// * `nosniff`
    pub enum XContentTypeOptions {
        /// Block the request if the destination does not match the type.
        NoSniff => "nosniff",
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_decode;
    use super::*;

    #[test]
    fn decode() {
        assert_eq!(test_decode(&["nosniff"]), Some(XContentTypeOptions::NoSniff));
        assert_eq!(test_decode(&["NoSniff"]), Some(XContentTypeOptions::NoSniff));
        assert_eq!(test_decode::<XContentTypeOptions>(&["sniff"]), None);
    }
}
