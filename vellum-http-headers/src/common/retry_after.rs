use std::fmt;
use std::time::SystemTime;

use vellum_error::{ErrorContext as _, OpaqueError};

use crate::util::{HttpDate, Seconds, TryFromValues};

/// The `Retry-After` header.
///
/// The `Retry-After` response-header field can be used with a 503 (Service
/// Unavailable) response to indicate how long the service is expected to be
/// unavailable to the requesting client. This field MAY also be used with any
/// 3xx (Redirection) response to indicate the minimum time the user-agent is
/// asked wait before issuing the redirected request. The value of this field
/// can be either an HTTP-date or an integer number of seconds (in decimal)
/// after the time of the response.
///
/// # Examples
/// ```
/// use std::time::SystemTime;
/// use vellum_http_headers::{RetryAfter, util::Seconds};
///
/// let delay = RetryAfter::delay(Seconds::new(300));
/// let date = RetryAfter::date(SystemTime::now());
/// ```
///
/// Retry-After header, defined in [RFC9110](https://www.rfc-editor.org/rfc/rfc9110#section-10.2.3)
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RetryAfter(After);

derive_header!(RetryAfter(_));

/// When to retry, see [`RetryAfter`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum After {
    /// Retry after the given DateTime
    DateTime(HttpDate),
    /// Retry after this duration has elapsed
    Delay(Seconds),
}

impl RetryAfter {
    /// Create an `RetryAfter` header with a date value.
    #[must_use]
    pub fn date(time: SystemTime) -> Self {
        Self(After::DateTime(time.into()))
    }

    /// Create an `RetryAfter` header with a delay value in seconds
    #[must_use]
    pub fn delay(seconds: Seconds) -> Self {
        Self(After::Delay(seconds))
    }

    #[must_use]
    pub fn after(&self) -> After {
        self.0
    }
}

impl TryFromValues for After {
    fn try_from_values<'i, I>(values: &mut I) -> Result<Self, OpaqueError>
    where
        I: Iterator<Item = &'i str>,
    {
        let value = values.next().context("missing retry-after value")?;
        if let Ok(delay) = value.parse::<Seconds>() {
            return Ok(Self::Delay(delay));
        }
        value
            .parse::<HttpDate>()
            .map(Self::DateTime)
            .context("retry-after is neither delay-seconds nor http-date")
    }
}

impl fmt::Display for After {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Delay(delay) => fmt::Display::fmt(delay, f),
            Self::DateTime(date) => fmt::Display::fmt(date, f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::{test_decode, test_encode};
    use super::{After, RetryAfter, Seconds};
    use crate::util::HttpDate;
    use vellum_http_types::header;

    #[test]
    fn delay_decode() {
        let r: RetryAfter = test_decode(&["1234"]).unwrap();
        assert_eq!(r, RetryAfter::delay(Seconds::new(1234)));
    }

    macro_rules! test_retry_after_datetime {
        ($name:ident, $s:expr) => {
            #[test]
            fn $name() {
                let r: RetryAfter = test_decode(&[$s]).unwrap();
                let dt = "Sun, 06 Nov 1994 08:49:37 GMT".parse::<HttpDate>().unwrap();

                assert_eq!(r, RetryAfter(After::DateTime(dt)));
            }
        };
    }

    test_retry_after_datetime!(date_decode_rfc1123, "Sun, 06 Nov 1994 08:49:37 GMT");
    test_retry_after_datetime!(date_decode_rfc850, "Sunday, 06-Nov-94 08:49:37 GMT");
    test_retry_after_datetime!(date_decode_asctime, "Sun Nov  6 08:49:37 1994");

    #[test]
    fn encode_delay() {
        let headers = test_encode(RetryAfter::delay(Seconds::new(120)));
        assert_eq!(headers.get(&header::RETRY_AFTER).unwrap().first(), "120");
    }

    #[test]
    fn decode_invalid() {
        assert_eq!(test_decode::<RetryAfter>(&["soon"]), None);
        assert_eq!(test_decode::<RetryAfter>(&["-5"]), None);
    }
}
