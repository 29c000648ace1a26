use std::fmt;

/// A header name that is not a valid http token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidHeaderName {
    name: String,
}

impl InvalidHeaderName {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
        }
    }

    /// The rejected name, as it was given.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for InvalidHeaderName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid header name: {:?}", self.name)
    }
}

impl std::error::Error for InvalidHeaderName {}

/// A header value containing bytes that may not appear in a field value
/// (CR, LF, NUL or any other control character but HTAB).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidHeaderValue {
    position: usize,
}

impl InvalidHeaderValue {
    pub(crate) fn new(position: usize) -> Self {
        Self { position }
    }

    /// Byte offset of the first offending character.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }
}

impl fmt::Display for InvalidHeaderValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid header value: forbidden character at byte {}",
            self.position
        )
    }
}

impl std::error::Error for InvalidHeaderValue {}

/// Error returned when building a header collection from raw input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeadersError {
    /// A name failed to parse.
    InvalidHeaderName(InvalidHeaderName),
    /// A value contained forbidden characters.
    InvalidHeaderValue(InvalidHeaderValue),
}

impl fmt::Display for HeadersError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidHeaderName(err) => err.fmt(f),
            Self::InvalidHeaderValue(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for HeadersError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidHeaderName(err) => Some(err),
            Self::InvalidHeaderValue(err) => Some(err),
        }
    }
}

impl From<InvalidHeaderName> for HeadersError {
    fn from(err: InvalidHeaderName) -> Self {
        Self::InvalidHeaderName(err)
    }
}

impl From<InvalidHeaderValue> for HeadersError {
    fn from(err: InvalidHeaderValue) -> Self {
        Self::InvalidHeaderValue(err)
    }
}
