token_enum_header! {
    /// `X-Frame-Options` header, defined in
    /// [RFC7034](https://www.rfc-editor.org/rfc/rfc7034)
    ///
    /// Indicates whether a browser should be allowed to render a page in a
    /// frame. Superseded by the `frame-ancestors` directive of
    /// `Content-Security-Policy`.
    ///
    /// # Example values
    /// * `DENY`
    /// * `SAMEORIGIN`
    pub enum XFrameOptions {
        /// The page cannot be displayed in a frame.
        Deny => "DENY",
        /// The page can only be framed by same-origin documents.
        SameOrigin => "SAMEORIGIN",
    }
}

#[cfg(test)]
mod tests {
    use super::super::{test_decode, test_encode};
    use super::*;
    use vellum_http_types::header;

    #[test]
    fn decode_case_insensitive() {
        assert_eq!(test_decode(&["deny"]), Some(XFrameOptions::Deny));
        assert_eq!(test_decode(&["SameOrigin"]), Some(XFrameOptions::SameOrigin));
        assert_eq!(test_decode::<XFrameOptions>(&["ALLOW-FROM https://a.example"]), None);
    }

    #[test]
    fn encode() {
        let headers = test_encode(XFrameOptions::SameOrigin);
        assert_eq!(
            headers.get(&header::X_FRAME_OPTIONS).unwrap().first(),
            "SAMEORIGIN"
        );
    }
}
