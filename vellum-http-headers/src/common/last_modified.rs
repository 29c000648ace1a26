use std::time::SystemTime;

use crate::util::HttpDate;

/// `Last-Modified` header, defined in
/// [RFC9110](https://www.rfc-editor.org/rfc/rfc9110#section-8.8.2)
///
/// The `Last-Modified` header field in a response provides a timestamp
/// indicating the date and time at which the origin server believes the
/// selected representation was last modified, as determined at the
/// conclusion of handling the request.
///
/// # ABNF
///
/// ```text
/// Last-Modified = HTTP-date
/// ```
///
/// # Example values
///
/// * `Sat, 29 Oct 1994 19:43:31 GMT`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LastModified(pub HttpDate);

derive_header!(LastModified(_));

impl From<SystemTime> for LastModified {
    fn from(time: SystemTime) -> Self {
        Self(time.into())
    }
}

impl From<LastModified> for SystemTime {
    fn from(date: LastModified) -> Self {
        date.0.into()
    }
}
