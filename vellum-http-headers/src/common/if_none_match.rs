use super::ETag;
use crate::util::EntityTag;

derive_wildcard_list_header! {
    /// `If-None-Match` header, defined in
    /// [RFC9110](https://www.rfc-editor.org/rfc/rfc9110#section-13.1.2)
    ///
    /// The `If-None-Match` header field makes the request method conditional
    /// on a recipient cache or origin server either not having any current
    /// representation of the target resource, when the field-value is "*",
    /// or having a selected representation with an entity-tag that does not
    /// match any of those listed in the field-value.
    ///
    /// A recipient MUST use the weak comparison function when comparing
    /// entity-tags for If-None-Match, since weak entity-tags
    /// can be used for cache validation even if there have been changes to
    /// the representation data.
    ///
    /// # ABNF
    ///
    /// ```text
    /// If-None-Match = "*" / 1#entity-tag
    /// ```
    ///
    /// # Example values
    ///
    /// * `"xyzzy"`
    /// * `W/"xyzzy"`
    /// * `"xyzzy", "r2d2xxxx", "c3piozzzz"`
    /// * `W/"xyzzy", W/"r2d2xxxx", W/"c3piozzzz"`
    /// * `*`
    ///
    /// # Examples
    ///
    /// ```
    /// use vellum_http_headers::IfNoneMatch;
    ///
    /// let if_none_match = IfNoneMatch::any();
    /// assert!(if_none_match.is_any());
    /// ```
    #[derive(Clone, Debug, PartialEq)]
    pub struct IfNoneMatch(pub WildcardList<EntityTag>);
}

impl IfNoneMatch {
    /// Checks whether the ETag passes this precondition.
    #[must_use]
    pub fn precondition_passes(&self, etag: &ETag) -> bool {
        !self.0.matches_weak(&etag.0)
    }
}

impl From<ETag> for IfNoneMatch {
    fn from(etag: ETag) -> Self {
        Self::new(etag.0)
    }
}
