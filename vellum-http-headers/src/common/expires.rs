use std::time::SystemTime;

use crate::util::HttpDate;

/// `Expires` header, defined in
/// [RFC9111](https://www.rfc-editor.org/rfc/rfc9111#section-5.3)
///
/// The `Expires` header field gives the date/time after which the
/// response is considered stale.
///
/// The presence of an Expires field does not imply that the original
/// resource will change or cease to exist at, before, or after that
/// time.
///
/// # ABNF
///
/// ```text
/// Expires = HTTP-date
/// ```
///
/// # Example values
///
/// * `Sat, 29 Oct 1994 19:43:31 GMT`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Expires(pub HttpDate);

derive_header!(Expires(_));

impl From<SystemTime> for Expires {
    fn from(time: SystemTime) -> Self {
        Self(time.into())
    }
}

impl From<Expires> for SystemTime {
    fn from(date: Expires) -> Self {
        date.0.into()
    }
}

#[cfg(test)]
mod tests {
    use super::super::{test_decode, test_encode};
    use super::*;
    use vellum_http_types::header;

    #[test]
    fn encode_imf_fixdate() {
        let expires = Expires(HttpDate::from_unix_secs(1_445_412_480));
        let headers = test_encode(expires);
        assert_eq!(
            headers.get(&header::EXPIRES).unwrap().first(),
            "Wed, 21 Oct 2015 07:28:00 GMT"
        );
    }

    #[test]
    fn decode_zero_is_invalid() {
        // `Expires: 0` is common but not a date
        assert_eq!(test_decode::<Expires>(&["0"]), None);
    }
}
