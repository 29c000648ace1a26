token_enum_header! {
    /// `Accept-Ranges` header, defined in [RFC9110](https://www.rfc-editor.org/rfc/rfc9110#section-14.3)
    ///
    /// The `Accept-Ranges` header field allows a server to indicate that it
    /// supports range requests for the target resource.
    ///
    /// # ABNF
    ///
    /// ```text
    /// Accept-Ranges     = acceptable-ranges
    /// acceptable-ranges = 1#range-unit / "none"
    /// ```
    ///
    /// # Example values
    /// * `bytes`
    /// * `none`
    pub enum AcceptRanges {
        /// Byte ranges are supported.
        Bytes => "bytes",
        /// No range requests are supported.
        NoRanges => "none",
    }
}

#[cfg(test)]
mod tests {
    use super::super::{test_decode, test_encode};
    use super::*;
    use vellum_http_types::header;

    #[test]
    fn decode() {
        assert_eq!(test_decode(&["bytes"]), Some(AcceptRanges::Bytes));
        assert_eq!(test_decode(&["None"]), Some(AcceptRanges::NoRanges));
        assert_eq!(test_decode::<AcceptRanges>(&["pages"]), None);
    }

    #[test]
    fn encode() {
        let headers = test_encode(AcceptRanges::Bytes);
        assert_eq!(headers.get(&header::ACCEPT_RANGES).unwrap().first(), "bytes");
    }
}
