use std::fmt;
use std::str::FromStr;

use vellum_error::{BoxError, OpaqueError};
use vellum_utils::collections::NonEmptyVec;

use super::csv::{self, Separator};

/// Either the wildcard `*` or a list of values, never both.
///
/// ```text
/// wildcard-list = "*" / 1#item
/// ```
///
/// Parsing splits on commas over all raw values, trims, drops empty
/// elements and duplicates (first occurrence wins). A lone `*` is
/// [`WildcardList::Any`]; a `*` next to other items is an error.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum WildcardList<T> {
    /// The wildcard, meaning "any".
    Any,
    /// An explicit list.
    Values(NonEmptyVec<T>),
}

impl<T> WildcardList<T> {
    /// A list of one value.
    pub fn new(value: T) -> Self {
        Self::Values(NonEmptyVec::new(value))
    }

    /// Returns true for the wildcard.
    pub fn is_any(&self) -> bool {
        matches!(self, Self::Any)
    }

    /// The values, `None` for the wildcard.
    pub fn values(&self) -> Option<&NonEmptyVec<T>> {
        match self {
            Self::Any => None,
            Self::Values(values) => Some(values),
        }
    }

    /// The values, `None` for the wildcard.
    pub fn into_values(self) -> Option<NonEmptyVec<T>> {
        match self {
            Self::Any => None,
            Self::Values(values) => Some(values),
        }
    }

    /// Iterate over the values, empty for the wildcard.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        match self {
            Self::Any => [].iter(),
            Self::Values(values) => values.iter(),
        }
    }

    /// Returns true if this is the wildcard or any value matches `f`.
    pub fn any_matches(&self, f: impl FnMut(&T) -> bool) -> bool {
        self.is_any() || self.iter().any(f)
    }

    /// Decode with a custom wildcard literal and element parser.
    pub(crate) fn decode_with<'i, I, F>(
        values: I,
        wildcard: &str,
        mut parse: F,
    ) -> Result<Self, OpaqueError>
    where
        I: IntoIterator<Item = &'i str>,
        F: FnMut(&str) -> Result<T, OpaqueError>,
    {
        let mut seen = ahash::AHashSet::new();
        let mut elements = Vec::new();
        for element in csv::elements(values, Separator::Comma) {
            if seen.insert(element) {
                elements.push(element);
            }
        }

        match elements.as_slice() {
            [] => Err(OpaqueError::from_display("header value is an empty list")),
            [only] if *only == wildcard => Ok(Self::Any),
            elements if elements.iter().any(|element| *element == wildcard) => Err(
                OpaqueError::from_display("wildcard may not be combined with other values"),
            ),
            elements => {
                let parsed = elements
                    .iter()
                    .map(|element| parse(element))
                    .collect::<Result<Vec<_>, _>>()?;
                NonEmptyVec::from_vec(parsed)
                    .map(Self::Values)
                    .ok_or_else(|| OpaqueError::from_display("header value is an empty list"))
            }
        }
    }

    /// Encode with a custom wildcard literal and element formatter.
    pub(crate) fn encode_with<F>(&self, wildcard: &str, mut fmt: F) -> String
    where
        F: FnMut(&T) -> String,
    {
        match self {
            Self::Any => wildcard.to_owned(),
            Self::Values(values) => values.iter().map(&mut fmt).collect::<Vec<_>>().join(", "),
        }
    }
}

impl<T> WildcardList<T>
where
    T: FromStr<Err: Into<BoxError>>,
{
    /// Decode using `*` as wildcard and [`FromStr`] for the items.
    pub fn decode<'i, I>(values: I) -> Result<Self, OpaqueError>
    where
        I: IntoIterator<Item = &'i str>,
    {
        Self::decode_with(values, "*", csv::parse_from_str)
    }
}

impl<T> From<NonEmptyVec<T>> for WildcardList<T> {
    fn from(values: NonEmptyVec<T>) -> Self {
        Self::Values(values)
    }
}

impl<T: fmt::Display> fmt::Display for WildcardList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("*"),
            Self::Values(values) => {
                f.write_str(&csv::encode_list(values.iter(), Separator::Comma))
            }
        }
    }
}
