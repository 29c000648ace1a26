use std::fmt;

use vellum_utils::collections::NonEmptyVec;

use crate::InvalidHeaderValue;

/// The ordered, non-empty list of raw values stored for one header name.
///
/// Every value is validated on the way in: it may not contain CR, LF, NUL,
/// DEL or any other control character except HTAB. No other normalisation
/// happens; grammars are responsible for trimming optional whitespace.
///
/// A header that would have no values is never stored, so a present name
/// always has at least one (possibly empty) string.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct RawValues(NonEmptyVec<String>);

impl RawValues {
    /// Create [`RawValues`] holding a single value.
    pub fn new(value: impl Into<String>) -> Result<Self, InvalidHeaderValue> {
        let value = value.into();
        validate(&value)?;
        Ok(Self(NonEmptyVec::new(value)))
    }

    /// Create [`RawValues`] from a list of values.
    ///
    /// Returns `Ok(None)` when the list is empty: an empty list is the same
    /// as an absent header.
    pub fn try_from_iter<I>(values: I) -> Result<Option<Self>, InvalidHeaderValue>
    where
        I: IntoIterator<Item: Into<String>>,
    {
        let values = values
            .into_iter()
            .map(|value| {
                let value = value.into();
                validate(&value).map(|()| value)
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(NonEmptyVec::from_vec(values).map(Self))
    }

    /// The first value, the only one consulted by single-valued grammars.
    #[must_use]
    pub fn first(&self) -> &str {
        self.0.first()
    }

    /// Iterate over the values in order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.0.iter().map(String::as_str)
    }

    /// Amount of values, never zero.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// All values joined the way repeated field lines are combined: `", "`.
    #[must_use]
    pub fn joined(&self) -> String {
        self.0.join(", ")
    }

    /// Append another value.
    pub fn push(&mut self, value: impl Into<String>) -> Result<(), InvalidHeaderValue> {
        let value = value.into();
        validate(&value)?;
        self.0.push(value);
        Ok(())
    }

    /// Consume into the underlying values.
    #[must_use]
    pub fn into_inner(self) -> NonEmptyVec<String> {
        self.0
    }
}

impl fmt::Debug for RawValues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.len() == 1 {
            fmt::Debug::fmt(self.first(), f)
        } else {
            f.debug_list().entries(self.iter()).finish()
        }
    }
}

impl<'a> IntoIterator for &'a RawValues {
    type Item = &'a str;
    type IntoIter = std::iter::Map<std::slice::Iter<'a, String>, fn(&'a String) -> &'a str>;

    fn into_iter(self) -> Self::IntoIter {
        let as_str: fn(&'a String) -> &'a str = String::as_str;
        self.0.iter().map(as_str)
    }
}

impl TryFrom<&str> for RawValues {
    type Error = InvalidHeaderValue;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<String> for RawValues {
    type Error = InvalidHeaderValue;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

pub(crate) fn validate(value: &str) -> Result<(), InvalidHeaderValue> {
    match value
        .bytes()
        .position(|b| (b < b' ' && b != b'\t') || b == 0x7f)
    {
        Some(position) => Err(InvalidHeaderValue::new(position)),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_control_characters() {
        for (value, position) in [
            ("foo\r\nbar", 3),
            ("\nfoo", 0),
            ("a\0", 1),
            ("x\x7f", 1),
            ("\x1b[31m", 0),
        ] {
            assert_eq!(RawValues::new(value).unwrap_err().position(), position);
        }
    }

    #[test]
    fn allows_tabs_and_obs_text() {
        let values = RawValues::try_from_iter(["a\tb", "caf\u{e9}", ""])
            .unwrap()
            .unwrap();
        assert_eq!(values.len(), 3);
        assert_eq!(values.first(), "a\tb");
        assert_eq!(values.joined(), "a\tb, caf\u{e9}, ");
    }

    #[test]
    fn empty_list_is_absent() {
        assert!(
            RawValues::try_from_iter(Vec::<String>::new())
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn push_validates() {
        let mut values = RawValues::new("gzip").unwrap();
        values.push("br").unwrap();
        assert!(values.push("bad\r\n").is_err());
        assert_eq!(values.iter().collect::<Vec<_>>(), ["gzip", "br"]);
    }
}
