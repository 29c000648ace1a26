use std::fmt;
use std::str::FromStr;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use vellum_error::{ErrorContext as _, OpaqueError};

use super::TryFromValues;

/// A timestamp with HTTP formatting and parsing.
///
/// ```text
/// Sun, 06 Nov 1994 08:49:37 GMT  ; IMF-fixdate
/// Sunday, 06-Nov-94 08:49:37 GMT ; obsolete RFC 850 format
/// Sun Nov  6 08:49:37 1994       ; ANSI C's asctime() format
/// ```
///
/// All three formats are accepted on input, output is always the
/// IMF-fixdate. The precision is one second: sub-second parts are dropped
/// and times outside of the years 1970 to 9999 are clamped into that range.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HttpDate(SystemTime);

// 9999-12-31T23:59:59Z
const MAX_SECS: u64 = 253_402_300_799;

impl HttpDate {
    /// The current time, truncated to the second.
    #[must_use]
    pub fn now() -> Self {
        SystemTime::now().into()
    }

    /// Seconds since the unix epoch.
    #[must_use]
    pub fn as_unix_secs(&self) -> u64 {
        self.0
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default()
    }

    /// Create a date from seconds since the unix epoch.
    #[must_use]
    pub fn from_unix_secs(secs: u64) -> Self {
        Self(UNIX_EPOCH + Duration::from_secs(secs.min(MAX_SECS)))
    }
}

impl From<SystemTime> for HttpDate {
    fn from(time: SystemTime) -> Self {
        let secs = time
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
        Self::from_unix_secs(secs)
    }
}

impl From<HttpDate> for SystemTime {
    fn from(date: HttpDate) -> Self {
        date.0
    }
}

impl FromStr for HttpDate {
    type Err = OpaqueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let time = httpdate::parse_http_date(s.trim()).context("invalid http date")?;
        Ok(time.into())
    }
}

impl TryFromValues for HttpDate {
    fn try_from_values<'i, I>(values: &mut I) -> Result<Self, OpaqueError>
    where
        I: Iterator<Item = &'i str>,
    {
        values
            .next()
            .context("missing http date value")?
            .parse()
    }
}

impl fmt::Display for HttpDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&httpdate::fmt_http_date(self.0))
    }
}

impl fmt::Debug for HttpDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HttpDate({self})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOV_06: u64 = 784_111_777;

    #[test]
    fn parses_all_three_formats() {
        let expected = HttpDate::from_unix_secs(NOV_06);
        for s in [
            "Sun, 06 Nov 1994 08:49:37 GMT",
            "Sunday, 06-Nov-94 08:49:37 GMT",
            "Sun Nov  6 08:49:37 1994",
        ] {
            assert_eq!(s.parse::<HttpDate>().unwrap(), expected, "{s}");
        }
        assert_eq!(expected.to_string(), "Sun, 06 Nov 1994 08:49:37 GMT");
    }

    #[test]
    fn rejects_garbage() {
        for s in ["", "yesterday", "Sun, 06 Nov 1994", "1994-11-08T08:48:37Z"] {
            assert!(s.parse::<HttpDate>().is_err(), "{s:?}");
        }
    }

    #[test]
    fn truncates_and_clamps() {
        let with_nanos = UNIX_EPOCH + Duration::new(NOV_06, 999_999_999);
        assert_eq!(HttpDate::from(with_nanos).as_unix_secs(), NOV_06);

        let before_epoch = UNIX_EPOCH - Duration::from_secs(10);
        assert_eq!(HttpDate::from(before_epoch).as_unix_secs(), 0);

        let far_future = HttpDate::from_unix_secs(u64::MAX);
        assert_eq!(far_future.to_string(), "Fri, 31 Dec 9999 23:59:59 GMT");
    }

    #[test]
    fn ordering_follows_time() {
        assert!(HttpDate::from_unix_secs(1) < HttpDate::from_unix_secs(2));
    }
}
