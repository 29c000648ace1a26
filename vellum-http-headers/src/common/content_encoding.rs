use crate::util::Coding;

derive_non_empty_flat_csv_header! {
    #[header(sep = Comma)]
    /// `Content-Encoding` header, defined in
    /// [RFC9110](https://www.rfc-editor.org/rfc/rfc9110#section-8.4)
    ///
    /// The `Content-Encoding` header field indicates what content codings
    /// have been applied to the representation, beyond those inherent in
    /// the media type, and thus what decoding mechanisms have to be applied
    /// in order to obtain data in the media type referenced by the
    /// Content-Type header field.  Content-Encoding is primarily used to
    /// allow a representation's data to be compressed without losing the
    /// identity of its underlying media type.
    ///
    /// # ABNF
    ///
    /// ```text
    /// Content-Encoding = 1#content-coding
    /// ```
    ///
    /// # Example values
    ///
    /// * `gzip`
    ///
    /// # Examples
    ///
    /// ```
    /// use vellum_http_headers::ContentEncoding;
    ///
    /// let content_enc = ContentEncoding::gzip();
    /// assert!(content_enc.contains("gzip"));
    /// ```
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub struct ContentEncoding(pub NonEmptyVec<Coding>);
}

impl ContentEncoding {
    /// A constructor to easily create a `Content-Encoding: gzip` header.
    #[must_use]
    pub fn gzip() -> Self {
        Self::new(Coding::GZIP)
    }

    /// A constructor to easily create a `Content-Encoding: br` header.
    #[must_use]
    pub fn brotli() -> Self {
        Self::new(Coding::BR)
    }

    /// A constructor to easily create a `Content-Encoding: zstd` header.
    #[must_use]
    pub fn zstd() -> Self {
        Self::new(Coding::ZSTD)
    }

    /// Check if this header contains a given "coding", ignoring case.
    #[must_use]
    pub fn contains(&self, coding: &str) -> bool {
        self.iter().any(|c| c.as_str().eq_ignore_ascii_case(coding))
    }

    /// The coding applied last, which has to be removed first.
    #[must_use]
    pub fn outermost(&self) -> &Coding {
        self.0.last()
    }
}

#[cfg(test)]
mod tests {
    use super::super::{test_decode, test_encode};
    use super::*;
    use vellum_http_types::header;

    #[test]
    fn decode_layers() {
        let enc: ContentEncoding = test_decode(&["deflate, GZIP"]).unwrap();
        assert!(enc.contains("gzip"));
        assert!(enc.contains("deflate"));
        assert!(!enc.contains("br"));
        assert_eq!(enc.outermost(), &Coding::GZIP);
    }

    #[test]
    fn decode_invalid() {
        assert_eq!(test_decode::<ContentEncoding>(&[""]), None);
        assert_eq!(test_decode::<ContentEncoding>(&["*"]), None);
        assert_eq!(test_decode::<ContentEncoding>(&["gzip;q=1"]), None);
    }

    #[test]
    fn encode() {
        let headers = test_encode(ContentEncoding::brotli());
        assert_eq!(headers.get(&header::CONTENT_ENCODING).unwrap().first(), "br");
    }
}
