use mime::Mime;

use crate::util::{QualityValue, sort_by_quality};

derive_non_empty_flat_csv_header! {
    #[header(sep = Comma)]
    /// `Accept` header, defined in [RFC9110](https://www.rfc-editor.org/rfc/rfc9110#section-12.5.1)
    ///
    /// The `Accept` header field can be used by user agents to specify
    /// response media types that are acceptable.
    ///
    /// # ABNF
    ///
    /// ```text
    /// Accept = #( media-range [ weight ] )
    ///
    /// media-range    = ( "*/*"
    ///                  / ( type "/" "*" )
    ///                  / ( type "/" subtype )
    ///                  ) parameters
    /// ```
    ///
    /// # Example values
    /// * `audio/*; q=0.2, audio/basic`
    /// * `text/plain; q=0.5, text/html, text/x-dvi; q=0.8, text/x-c`
    ///
    /// # Examples
    ///
    /// ```
    /// use vellum_http_headers::{Accept, HeadersExt, MutableHeadersExt};
    /// use vellum_http_headers::util::{Quality, QualityValue};
    /// use vellum_http_types::Headers;
    ///
    /// let headers = Headers::build(|h| {
    ///     h.typed_insert(Accept::new(QualityValue::new(
    ///         mime::APPLICATION_JSON,
    ///         Quality::new_clamped(900),
    ///     )))
    /// });
    /// let accept: Accept = headers.typed_get().unwrap();
    /// assert_eq!(accept.iter().next().unwrap().value, mime::APPLICATION_JSON);
    /// ```
    #[derive(Clone, Debug, PartialEq)]
    pub struct Accept(pub NonEmptyVec<QualityValue<Mime>>);
}

impl Accept {
    /// `Accept: application/json`
    #[must_use]
    pub fn json() -> Self {
        Self::new(QualityValue::new_value(mime::APPLICATION_JSON))
    }

    /// `Accept: text/html`
    #[must_use]
    pub fn html() -> Self {
        Self::new(QualityValue::new_value(mime::TEXT_HTML))
    }

    /// The media ranges ordered by descending quality.
    ///
    /// Ranges with equal quality keep the order in which they were sent.
    #[must_use]
    pub fn sorted_by_quality(&self) -> Vec<QualityValue<Mime>> {
        let mut values = self.0.clone().into_vec();
        sort_by_quality(&mut values);
        values
    }
}

#[cfg(test)]
mod tests {
    use super::super::{test_decode, test_encode};
    use super::*;
    use crate::util::Quality;
    use vellum_http_types::header;
    use vellum_utils::collections::non_empty_vec;

    fn qv(mime: Mime, q: u16) -> QualityValue<Mime> {
        QualityValue::new(mime, Quality::new_clamped(q))
    }

    #[test]
    fn decode_with_quality_and_params() {
        let accept: Accept =
            test_decode(&["text/plain; q=0.5, text/html", "text/x-dvi; q=0.8, */*;q=0"]).unwrap();
        assert_eq!(
            accept,
            Accept(non_empty_vec![
                qv(mime::TEXT_PLAIN, 500),
                qv(mime::TEXT_HTML, 1000),
                qv("text/x-dvi".parse().unwrap(), 800),
                qv(mime::STAR_STAR, 0),
            ])
        );
        let order: Vec<_> = accept
            .sorted_by_quality()
            .into_iter()
            .map(|qv| qv.value.to_string())
            .collect();
        assert_eq!(order, ["text/html", "text/x-dvi", "text/plain", "*/*"]);
    }

    #[test]
    fn media_type_params_stay_with_the_value() {
        let accept: Accept = test_decode(&["text/html;level=1;q=0.7"]).unwrap();
        let first = accept.iter().next().unwrap();
        assert_eq!(first.value.get_param("level").unwrap(), "1");
        assert_eq!(first.quality.as_u16(), 700);
    }

    #[test]
    fn decode_invalid() {
        assert!(test_decode::<Accept>(&[""]).is_none());
        assert!(test_decode::<Accept>(&["text/html;q=2"]).is_none());
        assert!(test_decode::<Accept>(&["not a mime"]).is_none());
    }

    #[test]
    fn encode_omits_default_quality() {
        let headers = test_encode(Accept(non_empty_vec![
            qv(mime::TEXT_HTML, 1000),
            qv(mime::APPLICATION_JSON, 250),
        ]));
        assert_eq!(
            headers.get(&header::ACCEPT).unwrap().first(),
            "text/html, application/json;q=0.25"
        );
    }
}
