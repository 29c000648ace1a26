use crate::util::{LanguageTag, QualityValue, sort_by_quality};

derive_wildcard_list_header! {
    /// `Accept-Language` header, defined in
    /// [RFC9110](https://www.rfc-editor.org/rfc/rfc9110#section-12.5.4)
    ///
    /// # ABNF
    ///
    /// ```text
    /// Accept-Language = #( language-range [ weight ] )
    /// ```
    ///
    /// # Example values
    /// * `da, en-gb;q=0.8, en;q=0.7`
    /// * `*`
    #[derive(Clone, Debug, PartialEq)]
    pub struct AcceptLanguage(pub WildcardList<QualityValue<LanguageTag>>);
}

impl AcceptLanguage {
    /// The acceptable languages (`q > 0`) ordered by descending quality.
    #[must_use]
    pub fn preferred(&self) -> Vec<LanguageTag> {
        let mut values: Vec<_> = self
            .0
            .iter()
            .filter(|qv| qv.quality.as_u16() > 0)
            .cloned()
            .collect();
        sort_by_quality(&mut values);
        values.into_iter().map(|qv| qv.value).collect()
    }
}
