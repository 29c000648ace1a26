use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use vellum_error::{ErrorContext as _, OpaqueError};

use super::TryFromValues;

/// A non-negative number of seconds, the `delta-seconds` of RFC 9111.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Seconds(u64);

impl Seconds {
    /// Create from a number of seconds.
    #[must_use]
    pub const fn new(secs: u64) -> Self {
        Self(secs)
    }

    /// The number of seconds.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }

    /// As a [`Duration`].
    #[must_use]
    pub const fn as_duration(self) -> Duration {
        Duration::from_secs(self.0)
    }
}

impl FromStr for Seconds {
    type Err = OpaqueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(OpaqueError::from_display(
                "delta-seconds must be decimal digits",
            ));
        }
        // saturating, as RFC 9111 section 1.2.2 asks for
        Ok(Self(s.parse::<u64>().unwrap_or(u64::MAX)))
    }
}

impl TryFromValues for Seconds {
    fn try_from_values<'i, I>(values: &mut I) -> Result<Self, OpaqueError>
    where
        I: Iterator<Item = &'i str>,
    {
        values.next().context("missing seconds value")?.parse()
    }
}

impl From<Duration> for Seconds {
    fn from(dur: Duration) -> Self {
        Self(dur.as_secs())
    }
}

impl From<Seconds> for Duration {
    fn from(secs: Seconds) -> Self {
        secs.as_duration()
    }
}

impl fmt::Debug for Seconds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}

impl fmt::Display for Seconds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse() {
        assert_eq!("42".parse::<Seconds>().unwrap(), Seconds::new(42));
        assert_eq!(
            "99999999999999999999999".parse::<Seconds>().unwrap(),
            Seconds::new(u64::MAX)
        );
        for bad in ["", "-1", "1.5", "1s"] {
            assert!(bad.parse::<Seconds>().is_err(), "{bad:?}");
        }
    }

    #[test]
    fn duration_truncates() {
        assert_eq!(Seconds::from(Duration::from_millis(1999)), Seconds::new(1));
        assert_eq!(Duration::from(Seconds::new(3)), Duration::from_secs(3));
    }
}
