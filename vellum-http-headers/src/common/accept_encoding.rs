use crate::util::{Coding, QualityValue, sort_by_quality};

derive_wildcard_list_header! {
    /// `Accept-Encoding` header, defined in
    /// [RFC9110](https://www.rfc-editor.org/rfc/rfc9110#section-12.5.3)
    ///
    /// The `Accept-Encoding` header field can be used by user agents to
    /// indicate what response content-codings are acceptable in the response.
    ///
    /// # ABNF
    ///
    /// ```text
    /// Accept-Encoding  = #( codings [ weight ] )
    /// codings          = content-coding / "identity" / "*"
    /// ```
    ///
    /// A lone `*` is the wildcard and may not be combined with codings.
    ///
    /// # Example values
    /// * `gzip, deflate`
    /// * `br;q=1.0, gzip;q=0.8`
    /// * `*`
    #[derive(Clone, Debug, PartialEq)]
    pub struct AcceptEncoding(pub WildcardList<QualityValue<Coding>>);
}

impl AcceptEncoding {
    /// The codings as sent, empty for the wildcard.
    pub fn encodings(&self) -> impl Iterator<Item = &QualityValue<Coding>> {
        self.0.iter()
    }

    /// The acceptable codings (`q > 0`) ordered by descending quality.
    #[must_use]
    pub fn preferred(&self) -> Vec<Coding> {
        let mut values: Vec<_> = self
            .0
            .iter()
            .filter(|qv| qv.quality.as_u16() > 0)
            .cloned()
            .collect();
        sort_by_quality(&mut values);
        values.into_iter().map(|qv| qv.value).collect()
    }

    /// Returns true if `coding` is acceptable.
    ///
    /// The wildcard accepts everything, an explicit `q=0` rejects.
    #[must_use]
    pub fn accepts(&self, coding: &Coding) -> bool {
        self.0
            .any_matches(|qv| qv.value == *coding && qv.quality.as_u16() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::super::{test_decode, test_encode};
    use super::*;
    use crate::util::Quality;
    use vellum_http_types::header;

    #[test]
    fn decode_with_quality() {
        let header: AcceptEncoding = test_decode(&["gzip;q=0.5, deflate"]).unwrap();
        let encodings: Vec<_> = header
            .encodings()
            .map(|qv| (qv.value.as_str(), qv.quality.as_u16()))
            .collect();
        assert_eq!(encodings, [("gzip", 500), ("deflate", 1000)]);
        assert_eq!(header.preferred(), [Coding::DEFLATE, Coding::GZIP]);
    }

    #[test]
    fn wildcard_is_exclusive() {
        assert!(test_decode::<AcceptEncoding>(&["*"]).unwrap().is_any());
        assert!(test_decode::<AcceptEncoding>(&["*, gzip"]).is_none());
        assert!(test_decode::<AcceptEncoding>(&["gzip, *;q=0"]).is_none());
        assert_eq!(
            test_decode::<AcceptEncoding>(&["gzip, deflate"])
                .unwrap()
                .values()
                .unwrap()
                .len(),
            2
        );
    }

    #[test]
    fn accepts() {
        let header: AcceptEncoding = test_decode(&["br, gzip;q=0"]).unwrap();
        assert!(header.accepts(&Coding::BR));
        assert!(!header.accepts(&Coding::GZIP));
        assert!(!header.accepts(&Coding::ZSTD));
        assert!(AcceptEncoding::any().accepts(&Coding::ZSTD));
    }

    #[test]
    fn encode() {
        let headers = test_encode(AcceptEncoding::new(QualityValue::new(
            Coding::GZIP,
            Quality::new_clamped(800),
        )));
        assert_eq!(
            headers.get(&header::ACCEPT_ENCODING).unwrap().first(),
            "gzip;q=0.8"
        );
        let headers = test_encode(AcceptEncoding::any());
        assert_eq!(headers.get(&header::ACCEPT_ENCODING).unwrap().first(), "*");
    }
}
