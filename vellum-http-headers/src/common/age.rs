use std::time::Duration;

use crate::util::Seconds;

/// `Age` header, defined in [RFC9111](https://www.rfc-editor.org/rfc/rfc9111#section-5.1)
///
/// The "Age" header field conveys the sender's estimate of the amount of
/// time since the response was generated or successfully validated at
/// the origin server.  Age values are calculated as specified in
/// Section 4.2.3 of RFC9111.
///
/// # ABNF
///
/// ```text
/// Age = delta-seconds
/// ```
///
/// The Age field-value is a non-negative integer, representing time in
/// seconds. Values too large for a `u64` saturate.
///
/// # Example values
///
/// * `3600`
///
/// # Example
///
/// ```
/// use vellum_http_headers::Age;
///
/// let len = Age::from_secs(60);
/// assert_eq!(len.as_secs(), 60);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Age(Seconds);

derive_header!(Age(_));

impl Age {
    /// Creates a new `Age` header from the specified number of whole seconds.
    #[must_use]
    pub const fn from_secs(secs: u64) -> Self {
        Self(Seconds::new(secs))
    }

    /// Returns the number of seconds for this `Age` header.
    #[must_use]
    pub const fn as_secs(self) -> u64 {
        self.0.as_u64()
    }
}

impl From<Duration> for Age {
    fn from(dur: Duration) -> Self {
        Self(Seconds::from(dur))
    }
}

impl From<Age> for Duration {
    fn from(age: Age) -> Self {
        age.0.into()
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_decode;
    use super::*;

    #[test]
    fn decode() {
        assert_eq!(test_decode::<Age>(&["60"]), Some(Age::from_secs(60)));
        assert_eq!(
            test_decode::<Age>(&["99999999999999999999999"]),
            Some(Age::from_secs(u64::MAX))
        );
        for bad in ["", "-1", "1.5", "+1", "0x10"] {
            assert_eq!(test_decode::<Age>(&[bad]), None, "{bad:?}");
        }
    }
}
