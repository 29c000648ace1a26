use std::fmt;

use vellum_error::OpaqueError;
use vellum_http_types::HeaderName;

/// Error returned when a typed header cannot be produced.
///
/// Always tagged with the name of the header it is about.
pub struct Error {
    name: HeaderName,
    kind: Kind,
}

enum Kind {
    Missing,
    Invalid(OpaqueError),
}

impl Error {
    /// Create an error for a header that is required but absent.
    #[must_use]
    pub fn missing(name: HeaderName) -> Self {
        Self {
            name,
            kind: Kind::Missing,
        }
    }

    /// Create an error for a header that is present but fails its grammar.
    pub fn invalid(name: HeaderName, source: impl Into<OpaqueError>) -> Self {
        Self {
            name,
            kind: Kind::Invalid(source.into()),
        }
    }

    /// Returns true if the header was absent.
    #[must_use]
    pub fn is_missing(&self) -> bool {
        matches!(self.kind, Kind::Missing)
    }

    /// Returns true if the header was present but malformed.
    #[must_use]
    pub fn is_invalid(&self) -> bool {
        matches!(self.kind, Kind::Invalid(_))
    }

    /// The name of the header this error is about.
    #[must_use]
    pub fn header_name(&self) -> &HeaderName {
        &self.name
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut d = f.debug_struct("Error");
        d.field("name", &self.name);
        match &self.kind {
            Kind::Missing => d.field("kind", &"Missing"),
            Kind::Invalid(source) => d.field("kind", &"Invalid").field("source", source),
        };
        d.finish()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            Kind::Missing => write!(f, "missing http header: {}", self.name),
            Kind::Invalid(source) => write!(f, "invalid http header {}: {source}", self.name),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            Kind::Missing => None,
            Kind::Invalid(source) => Some(source),
        }
    }
}
