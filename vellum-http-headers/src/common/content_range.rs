use std::fmt;
use std::ops::{Bound, RangeBounds};
use std::str::FromStr;

use vellum_error::{ErrorContext as _, OpaqueError};

use crate::util::TryFromValues;

/// Content-Range, described in [RFC9110](https://www.rfc-editor.org/rfc/rfc9110#section-14.4)
///
/// # ABNF
///
/// ```text
/// Content-Range       = range-unit SP
///                       ( range-resp / unsatisfied-range )
///
/// range-resp          = incl-range "/" ( complete-length / "*" )
/// incl-range          = first-pos "-" last-pos
/// unsatisfied-range   = "*/" complete-length
///
/// complete-length     = 1*DIGIT
/// ```
///
/// Only the `bytes` range unit is supported.
///
/// # Example values
///
/// * `bytes 42-1233/1234`
/// * `bytes 42-1233/*`
/// * `bytes */1234`
///
/// # Example
///
/// ```
/// use vellum_http_headers::ContentRange;
///
/// let cr = ContentRange::bytes(0..500, 1234).unwrap();
/// assert_eq!(cr.to_string(), "bytes 0-499/1234");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ContentRange {
    /// First and last bytes of the range, omitted if request could not be
    /// satisfied
    range: Option<(u64, u64)>,

    /// Total length of the instance, can be omitted if unknown
    complete_length: Option<u64>,
}

derive_header!(ContentRange);

impl ContentRange {
    /// Construct a new `Content-Range: bytes ..` header.
    pub fn bytes(
        range: impl RangeBounds<u64>,
        complete_length: impl Into<Option<u64>>,
    ) -> Result<Self, OpaqueError> {
        let complete_length = complete_length.into();

        let start = match range.start_bound() {
            Bound::Included(&s) => s,
            Bound::Excluded(&s) => s.checked_add(1).context("range start overflows")?,
            Bound::Unbounded => 0,
        };

        let end = match range.end_bound() {
            Bound::Included(&e) => e,
            Bound::Excluded(&e) => e.checked_sub(1).context("empty content range")?,
            Bound::Unbounded => complete_length
                .and_then(|len| len.checked_sub(1))
                .context("unbounded content range without complete length")?,
        };

        Self::checked(Some((start, end)), complete_length)
    }

    /// Create a new `ContentRange` stating the range could not be satisfied.
    ///
    /// The passed argument is the complete length of the entity.
    #[must_use]
    pub fn unsatisfied_bytes(complete_length: u64) -> Self {
        Self {
            range: None,
            complete_length: Some(complete_length),
        }
    }

    fn checked(range: Option<(u64, u64)>, complete_length: Option<u64>) -> Result<Self, OpaqueError> {
        if let Some((first, last)) = range {
            if first > last {
                return Err(OpaqueError::from_display(
                    "content range first byte after last byte",
                ));
            }
            if complete_length.is_some_and(|len| last >= len) {
                return Err(OpaqueError::from_display(
                    "content range ends beyond the complete length",
                ));
            }
        }
        Ok(Self {
            range,
            complete_length,
        })
    }

    /// Get the byte range if satisified.
    ///
    /// Note that these byte ranges are inclusive on both ends.
    #[must_use]
    pub fn bytes_range(&self) -> Option<(u64, u64)> {
        self.range
    }

    /// Get the bytes complete length if available.
    #[must_use]
    pub fn bytes_len(&self) -> Option<u64> {
        self.complete_length
    }
}

fn parse_pos(s: &str) -> Result<u64, OpaqueError> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(OpaqueError::from_display("byte position must be decimal digits"));
    }
    s.parse().map_err(OpaqueError::from_std)
}

impl FromStr for ContentRange {
    type Err = OpaqueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (unit, spec) = s
            .trim()
            .split_once(' ')
            .context("content range without unit")?;
        if unit != "bytes" {
            return Err(OpaqueError::from_display("unsupported content range unit"));
        }
        let (range, complete_length) = spec
            .trim_start()
            .split_once('/')
            .context("content range without complete length")?;

        let complete_length = match complete_length {
            "*" => None,
            len => Some(parse_pos(len)?),
        };

        let range = match range {
            "*" => {
                if complete_length.is_none() {
                    return Err(OpaqueError::from_display(
                        "unsatisfied content range without complete length",
                    ));
                }
                None
            }
            range => {
                let (first, last) = range.split_once('-').context("content range without dash")?;
                Some((parse_pos(first)?, parse_pos(last)?))
            }
        };

        Self::checked(range, complete_length)
    }
}

impl TryFromValues for ContentRange {
    fn try_from_values<'i, I>(values: &mut I) -> Result<Self, OpaqueError>
    where
        I: Iterator<Item = &'i str>,
    {
        values.next().context("missing content-range value")?.parse()
    }
}

impl fmt::Display for ContentRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("bytes ")?;
        match self.range {
            Some((first, last)) => write!(f, "{first}-{last}")?,
            None => f.write_str("*")?,
        }
        match self.complete_length {
            Some(len) => write!(f, "/{len}"),
            None => f.write_str("/*"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::{test_decode, test_encode};
    use super::*;
    use vellum_http_types::header;

    #[test]
    fn test_bytes() {
        let cr = ContentRange::bytes(0..=499, 1234).unwrap();
        assert_eq!(cr.bytes_range(), Some((0, 499)));
        assert_eq!(cr.bytes_len(), Some(1234));
        assert_eq!(ContentRange::bytes(.., 100).unwrap().bytes_range(), Some((0, 99)));
        assert!(ContentRange::bytes(10..5, None).is_err());
        assert!(ContentRange::bytes(0..=100, 100).is_err());
        assert!(ContentRange::bytes(0.., None).is_err());
    }

    #[test]
    fn test_bytes_unknown_len() {
        let cr = ContentRange::bytes(0..500, None).unwrap();
        let headers = test_encode(cr);
        assert_eq!(
            headers.get(&header::CONTENT_RANGE).unwrap().first(),
            "bytes 0-499/*"
        );
    }

    #[test]
    fn test_unsatisfied() {
        let cr: ContentRange = test_decode(&["bytes */1234"]).unwrap();
        assert_eq!(cr, ContentRange::unsatisfied_bytes(1234));
        assert_eq!(cr.bytes_range(), None);
        assert_eq!(cr.to_string(), "bytes */1234");
    }

    #[test]
    fn decode_bytes() {
        let cr: ContentRange = test_decode(&["bytes 42-1233/1234"]).unwrap();
        assert_eq!(cr.bytes_range(), Some((42, 1233)));
        assert_eq!(cr.bytes_len(), Some(1234));
    }

    #[test]
    fn decode_invalid() {
        for bad in [
            "bytes */*",
            "bytes 1-0/10",
            "bytes 0-10/10",
            "items 0-1/2",
            "bytes 0-1",
            "bytes -1-2/10",
            "bytes a-b/10",
            "0-1/2",
        ] {
            assert_eq!(test_decode::<ContentRange>(&[bad]), None, "{bad:?}");
        }
    }
}
