use std::time::SystemTime;

use crate::util::HttpDate;

/// `If-Unmodified-Since` header, defined in
/// [RFC9110](https://www.rfc-editor.org/rfc/rfc9110#section-13.1.4)
///
/// The `If-Unmodified-Since` header field makes the request method
/// conditional on the selected representation's last modification date
/// being earlier than or equal to the date provided in the field-value.
///
/// # ABNF
///
/// ```text
/// If-Unmodified-Since = HTTP-date
/// ```
///
/// # Example values
///
/// * `Sat, 29 Oct 1994 19:43:31 GMT`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IfUnmodifiedSince(pub HttpDate);

derive_header!(IfUnmodifiedSince(_));

impl From<SystemTime> for IfUnmodifiedSince {
    fn from(time: SystemTime) -> Self {
        Self(time.into())
    }
}

impl From<IfUnmodifiedSince> for SystemTime {
    fn from(date: IfUnmodifiedSince) -> Self {
        date.0.into()
    }
}

impl IfUnmodifiedSince {
    /// Check if the precondition passes for a resource modified at
    /// `last_modified`.
    #[must_use]
    pub fn precondition_passes(&self, last_modified: SystemTime) -> bool {
        HttpDate::from(last_modified) <= self.0
    }
}
