use std::time::SystemTime;

use crate::util::HttpDate;

/// `If-Modified-Since` header, defined in
/// [RFC9110](https://www.rfc-editor.org/rfc/rfc9110#section-13.1.3)
///
/// The `If-Modified-Since` header field makes a GET or HEAD request
/// method conditional on the selected representation's modification date
/// being more recent than the date provided in the field-value.
///
/// # ABNF
///
/// ```text
/// If-Modified-Since = HTTP-date
/// ```
///
/// # Example values
///
/// * `Sat, 29 Oct 1994 19:43:31 GMT`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IfModifiedSince(pub HttpDate);

derive_header!(IfModifiedSince(_));

impl From<SystemTime> for IfModifiedSince {
    fn from(time: SystemTime) -> Self {
        Self(time.into())
    }
}

impl From<IfModifiedSince> for SystemTime {
    fn from(date: IfModifiedSince) -> Self {
        date.0.into()
    }
}

impl IfModifiedSince {
    /// Check if the resource was modified since this date.
    #[must_use]
    pub fn is_modified(&self, last_modified: SystemTime) -> bool {
        HttpDate::from(last_modified) > self.0
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::super::test_decode;
    use super::*;

    #[test]
    fn is_modified() {
        let newer = SystemTime::now();
        let exact = newer - Duration::from_secs(2);
        let older = newer - Duration::from_secs(4);

        let if_mod = IfModifiedSince::from(exact);
        assert!(if_mod.is_modified(newer));
        assert!(!if_mod.is_modified(exact));
        assert!(!if_mod.is_modified(older));
    }

    #[test]
    fn decode_obsolete_formats() {
        let expected = HttpDate::from_unix_secs(784_111_777);
        for value in [
            "Sun, 06 Nov 1994 08:49:37 GMT",
            "Sunday, 06-Nov-94 08:49:37 GMT",
            "Sun Nov  6 08:49:37 1994",
        ] {
            assert_eq!(
                test_decode::<IfModifiedSince>(&[value]),
                Some(IfModifiedSince(expected)),
                "{value:?}"
            );
        }
        assert_eq!(test_decode::<IfModifiedSince>(&["yesterday"]), None);
    }
}
