use std::str::FromStr;

use vellum_error::OpaqueError;

use crate::util::EntityTag;

/// `ETag` header, defined in [RFC9110](https://www.rfc-editor.org/rfc/rfc9110#section-8.8.3)
///
/// The `ETag` header field in a response provides the current entity-tag
/// for the selected representation, as determined at the conclusion of
/// handling the request.  An entity-tag is an opaque validator for
/// differentiating between multiple representations of the same
/// resource, regardless of whether those multiple representations are
/// due to resource state changes over time, content negotiation
/// resulting in multiple representations being valid at the same time,
/// or both. An entity-tag consists of an opaque quoted string, possibly
/// prefixed by a weakness indicator.
///
/// # ABNF
///
/// ```text
/// ETag       = entity-tag
/// ```
///
/// # Example values
///
/// * `"xyzzy"`
/// * `W/"xyzzy"`
/// * `""`
///
/// # Examples
///
/// ```
/// use vellum_http_headers::ETag;
///
/// let etag: ETag = "\"xyzzy\"".parse().unwrap();
/// assert_eq!(etag.tag(), "xyzzy");
/// assert!(!etag.is_weak());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ETag(pub EntityTag);

derive_header!(ETag(_));

impl ETag {
    /// Create a strong `ETag` for the given opaque tag.
    pub fn strong(tag: &str) -> Result<Self, OpaqueError> {
        EntityTag::strong(tag).map(Self)
    }

    /// Create a weak `ETag` for the given opaque tag.
    pub fn weak(tag: &str) -> Result<Self, OpaqueError> {
        EntityTag::weak(tag).map(Self)
    }

    /// The opaque tag, without quotes or weakness indicator.
    #[must_use]
    pub fn tag(&self) -> &str {
        self.0.tag()
    }

    /// Returns true if this is a weak validator.
    #[must_use]
    pub fn is_weak(&self) -> bool {
        self.0.is_weak()
    }
}

impl FromStr for ETag {
    type Err = OpaqueError;

    fn from_str(src: &str) -> Result<Self, Self::Err> {
        src.parse().map(Self)
    }
}

impl From<EntityTag> for ETag {
    fn from(tag: EntityTag) -> Self {
        Self(tag)
    }
}
