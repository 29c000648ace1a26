use super::ETag;
use crate::util::EntityTag;

derive_wildcard_list_header! {
    /// `If-Match` header, defined in
    /// [RFC9110](https://www.rfc-editor.org/rfc/rfc9110#section-13.1.1)
    ///
    /// The `If-Match` header field makes the request method conditional on
    /// the recipient origin server either having at least one current
    /// representation of the target resource, when the field-value is "*",
    /// or having a current representation of the target resource that has an
    /// entity-tag matching a member of the list of entity-tags provided in
    /// the field-value.
    ///
    /// An origin server MUST use the strong comparison function when
    /// comparing entity-tags for `If-Match`, since the client
    /// intends this precondition to prevent the method from being applied if
    /// there have been any changes to the representation data.
    ///
    /// # ABNF
    ///
    /// ```text
    /// If-Match = "*" / 1#entity-tag
    /// ```
    ///
    /// # Example values
    ///
    /// * `"xyzzy"`
    /// * `"xyzzy", "r2d2xxxx", "c3piozzzz"`
    /// * `*`
    #[derive(Clone, Debug, PartialEq)]
    pub struct IfMatch(pub WildcardList<EntityTag>);
}

impl IfMatch {
    /// Checks whether the `ETag` strongly matches.
    #[must_use]
    pub fn precondition_passes(&self, etag: &ETag) -> bool {
        self.0.matches_strong(&etag.0)
    }
}

impl From<ETag> for IfMatch {
    fn from(etag: ETag) -> Self {
        Self::new(etag.0)
    }
}
