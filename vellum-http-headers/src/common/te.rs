use crate::util::{Coding, QualityValue};

derive_non_empty_flat_csv_header! {
    #[header(sep = Comma)]
    /// `TE` header, defined in
    /// [RFC9110](https://www.rfc-editor.org/rfc/rfc9110#section-10.1.4)
    ///
    /// As RFC9110 states, "The "TE" header field in a request indicates what transfer codings,
    /// besides chunked, the client is willing to accept in response, and
    /// whether or not the client is willing to accept trailer fields in a
    /// chunked transfer coding."
    ///
    /// # ABNF
    ///
    /// ```text
    /// TE        = #t-codings
    /// t-codings = "trailers" / ( transfer-coding [ weight ] )
    /// ```
    ///
    /// # Example values
    /// * `trailers`
    /// * `trailers, deflate;q=0.5`
    #[derive(Clone, Debug, PartialEq)]
    pub struct Te(pub NonEmptyVec<QualityValue<Coding>>);
}

impl Te {
    /// Create a `TE: trailers` header.
    #[must_use]
    pub fn trailers() -> Self {
        Self::new(QualityValue::new_value(Coding::TRAILERS))
    }

    /// Returns true if trailer fields are accepted.
    #[must_use]
    pub fn has_trailers(&self) -> bool {
        self.iter().any(|qv| qv.value == Coding::TRAILERS)
    }
}

#[cfg(test)]
mod tests {
    use super::super::{test_decode, test_encode};
    use super::*;
    use vellum_http_types::header;

    #[test]
    fn decode() {
        let te: Te = test_decode(&["trailers, deflate;q=0.5"]).unwrap();
        assert!(te.has_trailers());
        assert_eq!(te.0.len(), 2);
        assert!(!test_decode::<Te>(&["gzip"]).unwrap().has_trailers());
        assert!(test_decode::<Te>(&[" "]).is_none());
    }

    #[test]
    fn encode() {
        let headers = test_encode(Te::trailers());
        assert_eq!(headers.get(&header::TE).unwrap().first(), "trailers");
    }
}
