use std::fmt;
use std::str::FromStr;

use iri_string::types::{UriAbsoluteString, UriReferenceStr, UriReferenceString};
use vellum_error::{ErrorContext as _, OpaqueError};

use super::TryFromValues;

/// A URI reference, absolute (`https://a.example/x`) or relative (`/x?y`).
///
/// Validated against RFC 3986; resolution against a base follows section 5
/// of the same RFC.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct UriRef(UriReferenceString);

impl UriRef {
    /// The reference as given.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns true if the reference has a scheme.
    #[must_use]
    pub fn is_absolute(&self) -> bool {
        self.0.to_iri().is_ok()
    }

    /// Returns true if the reference carries a `#fragment`.
    #[must_use]
    pub fn has_fragment(&self) -> bool {
        self.0.fragment().is_some()
    }

    /// Resolve this reference against an absolute base URI.
    pub fn resolve_against(&self, base: &str) -> Result<String, OpaqueError> {
        let base = UriAbsoluteString::try_from(base.to_owned())
            .map_err(|err| OpaqueError::from_display(err.to_string()))?;
        Ok(self.0.resolve_against(&base).to_string())
    }
}

impl FromStr for UriRef {
    type Err = OpaqueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(OpaqueError::from_display("empty uri reference"));
        }
        UriReferenceStr::new(s)
            .map(|uri| Self(uri.to_owned()))
            .context("invalid uri reference")
    }
}

impl TryFromValues for UriRef {
    fn try_from_values<'i, I>(values: &mut I) -> Result<Self, OpaqueError>
    where
        I: Iterator<Item = &'i str>,
    {
        values.next().context("missing uri reference value")?.parse()
    }
}

impl fmt::Debug for UriRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("UriRef").field(&self.as_str()).finish()
    }
}

impl fmt::Display for UriRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse() {
        let abs: UriRef = "https://example.com/a?b#c".parse().unwrap();
        assert!(abs.is_absolute());
        assert!(abs.has_fragment());

        let rel: UriRef = "/docs/index.html".parse().unwrap();
        assert!(!rel.is_absolute());

        for bad in ["", "http://exa mple.com", "/a b", "%zz"] {
            assert!(bad.parse::<UriRef>().is_err(), "{bad:?}");
        }
    }

    #[test]
    fn resolve() {
        let rel: UriRef = "../c?d".parse().unwrap();
        assert_eq!(
            rel.resolve_against("https://example.com/a/b/").unwrap(),
            "https://example.com/a/c?d"
        );
        assert!(rel.resolve_against("/relative").is_err());
    }
}
