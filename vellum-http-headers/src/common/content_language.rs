use crate::util::LanguageTag;

derive_non_empty_flat_csv_header! {
    #[header(sep = Comma)]
    /// `Content-Language` header, defined in
    /// [RFC9110](https://www.rfc-editor.org/rfc/rfc9110#section-8.5)
    ///
    /// The `Content-Language` header field describes the natural language(s)
    /// of the intended audience for the representation.  Note that this
    /// might not be equivalent to all the languages used within the
    /// representation.
    ///
    /// # ABNF
    ///
    /// ```text
    /// Content-Language = 1#language-tag
    /// ```
    ///
    /// # Example values
    ///
    /// * `da`
    /// * `mi, en`
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub struct ContentLanguage(pub NonEmptyVec<LanguageTag>);
}

impl ContentLanguage {
    /// Returns true if any of the languages is matched by `range`.
    #[must_use]
    pub fn matches(&self, range: &LanguageTag) -> bool {
        self.iter().any(|tag| range.matches(tag))
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_decode;
    use super::*;

    #[test]
    fn decode() {
        let lang: ContentLanguage = test_decode(&["mi, en-NZ"]).unwrap();
        assert_eq!(lang.0.len(), 2);
        assert!(lang.matches(&"en".parse().unwrap()));
        assert!(!lang.matches(&"fr".parse().unwrap()));
        assert_eq!(test_decode::<ContentLanguage>(&["en_US"]), None);
    }
}
