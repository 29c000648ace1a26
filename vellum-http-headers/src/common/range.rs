use std::fmt;
use std::ops::{Bound, RangeBounds};
use std::str::FromStr;

use vellum_error::{ErrorContext as _, OpaqueError};
use vellum_utils::collections::NonEmptyVec;

use crate::util::{TryFromValues, csv};

/// `Range` header, defined in [RFC9110](https://www.rfc-editor.org/rfc/rfc9110#section-14.2)
///
/// The "Range" header field on a GET request modifies the method
/// semantics to request transfer of only one or more subranges of the
/// selected representation data, rather than the entire selected
/// representation data.
///
/// # ABNF
///
/// ```text
/// Range         = ranges-specifier
/// ranges-specifier = range-unit "=" range-set
/// range-set     = 1#range-spec
/// range-spec    = int-range / suffix-range
/// int-range     = first-pos "-" [ last-pos ]
/// suffix-range  = "-" suffix-length
/// ```
///
/// Only the `bytes` range unit is supported.
///
/// # Example values
///
/// * `bytes=1000-`
/// * `bytes=-2000`
/// * `bytes=0-1,30-40`
/// * `bytes=0-10,20-90,-100`
///
/// # Examples
///
/// ```
/// use vellum_http_headers::Range;
///
/// let range = Range::bytes(0..1234).unwrap();
/// assert_eq!(range.to_string(), "bytes=0-1233");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Range(NonEmptyVec<ByteRangeSpec>);

derive_header!(Range);

/// A single `range-spec` of a [`Range`] header.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ByteRangeSpec {
    /// `first-last`, both inclusive.
    FromTo(u64, u64),
    /// `first-`, from `first` until the end.
    AllFrom(u64),
    /// `-n`, the last `n` bytes.
    Last(u64),
}

impl ByteRangeSpec {
    /// Resolve against the full length, `None` when not satisfiable.
    ///
    /// The returned bounds are inclusive.
    #[must_use]
    pub fn to_satisfiable_range(self, full_length: u64) -> Option<(u64, u64)> {
        if full_length == 0 {
            return None;
        }
        match self {
            Self::FromTo(from, to) => {
                (from < full_length).then_some((from, to.min(full_length - 1)))
            }
            Self::AllFrom(from) => (from < full_length).then_some((from, full_length - 1)),
            Self::Last(0) => None,
            Self::Last(n) => Some((full_length.saturating_sub(n), full_length - 1)),
        }
    }
}

fn parse_pos(s: &str) -> Result<u64, OpaqueError> {
    let s = s.trim();
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(OpaqueError::from_display("byte position must be decimal digits"));
    }
    s.parse().map_err(OpaqueError::from_std)
}

impl FromStr for ByteRangeSpec {
    type Err = OpaqueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (first, last) = s.trim().split_once('-').context("range spec without dash")?;
        match (first.trim(), last.trim()) {
            ("", last) => parse_pos(last).map(Self::Last),
            (first, "") => parse_pos(first).map(Self::AllFrom),
            (first, last) => {
                let (first, last) = (parse_pos(first)?, parse_pos(last)?);
                if first > last {
                    return Err(OpaqueError::from_display("range first byte after last byte"));
                }
                Ok(Self::FromTo(first, last))
            }
        }
    }
}

impl fmt::Display for ByteRangeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::FromTo(from, to) => write!(f, "{from}-{to}"),
            Self::AllFrom(from) => write!(f, "{from}-"),
            Self::Last(n) => write!(f, "-{n}"),
        }
    }
}

impl Range {
    /// Creates a `Range` header from bounds.
    pub fn bytes(bounds: impl RangeBounds<u64>) -> Result<Self, OpaqueError> {
        let start = match bounds.start_bound() {
            Bound::Included(&s) => Some(s),
            Bound::Excluded(&s) => Some(s.checked_add(1).context("range start overflows")?),
            Bound::Unbounded => None,
        };
        let end = match bounds.end_bound() {
            Bound::Included(&e) => Some(e),
            Bound::Excluded(&e) => Some(e.checked_sub(1).context("empty range")?),
            Bound::Unbounded => None,
        };

        let spec = match (start, end) {
            (Some(start), Some(end)) if start <= end => ByteRangeSpec::FromTo(start, end),
            (Some(start), None) => ByteRangeSpec::AllFrom(start),
            (None, Some(end)) => ByteRangeSpec::FromTo(0, end),
            (None, None) => ByteRangeSpec::AllFrom(0),
            (Some(_), Some(_)) => return Err(OpaqueError::from_display("empty range")),
        };
        Ok(Self(NonEmptyVec::new(spec)))
    }

    /// The last `n` bytes, `bytes=-n`.
    #[must_use]
    pub fn suffix(n: u64) -> Self {
        Self(NonEmptyVec::new(ByteRangeSpec::Last(n)))
    }

    /// The range specs as requested.
    #[must_use]
    pub fn specs(&self) -> &NonEmptyVec<ByteRangeSpec> {
        &self.0
    }

    /// Iterate the satisfiable ranges for a representation of `len` bytes,
    /// as inclusive `(first, last)` pairs.
    pub fn satisfiable_ranges(&self, len: u64) -> impl Iterator<Item = (u64, u64)> + '_ {
        self.0
            .iter()
            .filter_map(move |spec| spec.to_satisfiable_range(len))
    }
}

impl FromStr for Range {
    type Err = OpaqueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let set = s
            .trim()
            .strip_prefix("bytes=")
            .context("range without bytes unit")?;
        csv::decode_non_empty_list([set], csv::Separator::Comma, csv::parse_from_str).map(Self)
    }
}

impl TryFromValues for Range {
    fn try_from_values<'i, I>(values: &mut I) -> Result<Self, OpaqueError>
    where
        I: Iterator<Item = &'i str>,
    {
        values.next().context("missing range value")?.parse()
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("bytes=")?;
        for (index, spec) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str(",")?;
            }
            write!(f, "{spec}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::{test_decode, test_encode};
    use super::*;
    use vellum_http_types::header;

    #[test]
    fn test_to_satisfiable_range() {
        assert_eq!(ByteRangeSpec::FromTo(0, 0).to_satisfiable_range(3), Some((0, 0)));
        assert_eq!(ByteRangeSpec::FromTo(1, 2).to_satisfiable_range(3), Some((1, 2)));
        assert_eq!(ByteRangeSpec::FromTo(1, 5).to_satisfiable_range(3), Some((1, 2)));
        assert_eq!(ByteRangeSpec::FromTo(3, 3).to_satisfiable_range(3), None);
        assert_eq!(ByteRangeSpec::FromTo(0, 0).to_satisfiable_range(0), None);

        assert_eq!(ByteRangeSpec::AllFrom(0).to_satisfiable_range(3), Some((0, 2)));
        assert_eq!(ByteRangeSpec::AllFrom(2).to_satisfiable_range(3), Some((2, 2)));
        assert_eq!(ByteRangeSpec::AllFrom(3).to_satisfiable_range(3), None);

        assert_eq!(ByteRangeSpec::Last(1).to_satisfiable_range(3), Some((2, 2)));
        assert_eq!(ByteRangeSpec::Last(5).to_satisfiable_range(3), Some((0, 2)));
        assert_eq!(ByteRangeSpec::Last(0).to_satisfiable_range(3), None);
    }

    #[test]
    fn test_parse_valid() {
        let range: Range = test_decode(&["bytes=0-10, 20-90,-100, 200-"]).unwrap();
        assert_eq!(
            range.specs().as_slice(),
            [
                ByteRangeSpec::FromTo(0, 10),
                ByteRangeSpec::FromTo(20, 90),
                ByteRangeSpec::Last(100),
                ByteRangeSpec::AllFrom(200),
            ]
        );
        let ranges: Vec<_> = range.satisfiable_ranges(150).collect();
        assert_eq!(ranges, [(0, 10), (20, 90), (50, 149)]);
    }

    #[test]
    fn test_parse_invalid() {
        for bad in [
            "bytes=1-0",
            "bytes=-",
            "bytes=",
            "bytes=a-b",
            "bytes=1-2-3",
            "chunks=0-1",
            "0-1",
        ] {
            assert_eq!(test_decode::<Range>(&[bad]), None, "{bad:?}");
        }
    }

    #[test]
    fn encode_suffix() {
        let headers = test_encode(Range::suffix(500));
        assert_eq!(headers.get(&header::RANGE).unwrap().first(), "bytes=-500");
        assert_eq!(Range::bytes(100..).unwrap().to_string(), "bytes=100-");
        assert!(Range::bytes(5..5).is_err());
    }
}
