use std::fmt;
use std::time::SystemTime;

use vellum_error::{ErrorContext as _, OpaqueError};

use super::{ETag, LastModified};
use crate::util::{EntityTag, HttpDate, TryFromValues};

/// `If-Range` header, defined in [RFC9110](https://www.rfc-editor.org/rfc/rfc9110#section-13.1.5)
///
/// If a client has a partial copy of a representation and wishes to have
/// an up-to-date copy of the entire representation, it could use the
/// Range header field with a conditional GET (using either or both of
/// If-Unmodified-Since and If-Match.)  However, if the precondition
/// fails because the representation has been modified, the client would
/// then have to make a second request to obtain the entire current
/// representation.
///
/// The `If-Range` header field allows a client to "short-circuit" the
/// second request.  Informally, its meaning is as follows: if the
/// representation is unchanged, send me the part(s) that I am requesting
/// in Range; otherwise, send me the entire representation.
///
/// # ABNF
///
/// ```text
/// If-Range = entity-tag / HTTP-date
/// ```
///
/// # Example values
///
/// * `Sat, 29 Oct 1994 19:43:31 GMT`
/// * `"xyzzy"`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IfRange(IfRangeValue);

/// The validator carried by an [`IfRange`] header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IfRangeValue {
    /// An entity tag, compared strongly.
    EntityTag(EntityTag),
    /// A last modification date.
    Date(HttpDate),
}

derive_header!(IfRange(_));

impl IfRange {
    /// Create an `IfRange` header with an entity tag.
    #[must_use]
    pub fn etag(tag: ETag) -> Self {
        Self(IfRangeValue::EntityTag(tag.0))
    }

    /// Create an `IfRange` header with a date value.
    #[must_use]
    pub fn date(time: SystemTime) -> Self {
        Self(IfRangeValue::Date(time.into()))
    }

    /// The validator of this header.
    #[must_use]
    pub fn value(&self) -> &IfRangeValue {
        &self.0
    }

    /// Checks if the resource has been modified, or if the range request
    /// can be served.
    ///
    /// Entity tags use the strong comparison, a date only matches when it
    /// equals the last modification date exactly.
    #[must_use]
    pub fn is_modified(&self, etag: Option<&ETag>, last_modified: Option<&LastModified>) -> bool {
        match &self.0 {
            IfRangeValue::Date(since) => last_modified.is_none_or(|time| since != &time.0),
            IfRangeValue::EntityTag(tag) => etag.is_none_or(|etag| !tag.strong_eq(&etag.0)),
        }
    }
}

impl TryFromValues for IfRangeValue {
    fn try_from_values<'i, I>(values: &mut I) -> Result<Self, OpaqueError>
    where
        I: Iterator<Item = &'i str>,
    {
        let value = values.next().context("missing if-range value")?.trim();
        if value.starts_with('"') || value.starts_with("W/") {
            value.parse().map(Self::EntityTag)
        } else {
            value.parse().map(Self::Date)
        }
    }
}

impl fmt::Display for IfRangeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EntityTag(tag) => fmt::Display::fmt(tag, f),
            Self::Date(date) => fmt::Display::fmt(date, f),
        }
    }
}
