use crate::util::Coding;

derive_non_empty_flat_csv_header! {
    #[header(sep = Comma)]
    /// `Transfer-Encoding` header, defined in
    /// [RFC9112](https://www.rfc-editor.org/rfc/rfc9112#section-6.1)
    ///
    /// The `Transfer-Encoding` header field lists the transfer coding names
    /// corresponding to the sequence of transfer codings that have been (or
    /// will be) applied to the payload body in order to form the message
    /// body.
    ///
    /// # ABNF
    ///
    /// ```text
    /// Transfer-Encoding = 1#transfer-coding
    /// ```
    ///
    /// # Example values
    ///
    /// * `chunked`
    /// * `gzip, chunked`
    ///
    /// # Example
    ///
    /// ```
    /// use vellum_http_headers::TransferEncoding;
    ///
    /// let transfer = TransferEncoding::chunked();
    /// assert!(transfer.is_chunked());
    /// ```
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub struct TransferEncoding(pub NonEmptyVec<Coding>);
}

impl TransferEncoding {
    /// Constructor for the most common Transfer-Encoding, `chunked`.
    #[must_use]
    pub fn chunked() -> Self {
        Self::new(Coding::CHUNKED)
    }

    /// Returns whether this ends with the `chunked` encoding.
    #[must_use]
    pub fn is_chunked(&self) -> bool {
        *self.0.last() == Coding::CHUNKED
    }
}
