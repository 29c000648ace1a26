use std::fmt;
use std::str::FromStr;

use vellum_error::OpaqueError;

use super::{TryFromValues, WildcardList};

/// An entity tag, defined in [RFC9110](https://www.rfc-editor.org/rfc/rfc9110#section-8.8.3)
///
/// An entity tag consists of a string enclosed by two literal double quotes.
/// Preceding the first double quote is an optional weakness indicator,
/// which always looks like `W/`. Examples for valid tags are `"xyzzy"` and `W/"xyzzy"`.
///
/// # ABNF
///
/// ```text
/// entity-tag = [ weak ] opaque-tag
/// weak       = %x57.2F ; "W/", case-sensitive
/// opaque-tag = DQUOTE *etagc DQUOTE
/// etagc      = %x21 / %x23-7E / obs-text
///            ; VCHAR except double quotes, plus obs-text
/// ```
///
/// # Comparison
/// To check if two entity tags are equivalent in an application always use the `strong_eq` or
/// `weak_eq` methods based on the context of the Tag. Only use `==` to check if two tags are
/// identical.
///
/// | ETag 1  | ETag 2  | Strong Comparison | Weak Comparison |
/// |---------|---------|-------------------|-----------------|
/// | `W/"1"` | `W/"1"` | no match          | match           |
/// | `W/"1"` | `W/"2"` | no match          | no match        |
/// | `W/"1"` | `"1"`   | no match          | match           |
/// | `"1"`   | `"1"`   | match             | match           |
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct EntityTag(String);

impl EntityTag {
    /// Create a strong tag, `"tag"`.
    pub fn strong(tag: &str) -> Result<Self, OpaqueError> {
        check_tag(tag)?;
        Ok(Self(format!("\"{tag}\"")))
    }

    /// Create a weak tag, `W/"tag"`.
    pub fn weak(tag: &str) -> Result<Self, OpaqueError> {
        check_tag(tag)?;
        Ok(Self(format!("W/\"{tag}\"")))
    }

    /// The opaque tag, without quotes or weakness indicator.
    #[must_use]
    pub fn tag(&self) -> &str {
        let end = self.0.len() - 1;
        if self.is_weak() {
            &self.0[3..end]
        } else {
            &self.0[1..end]
        }
    }

    /// Returns true if this is a "weak" tag.
    #[must_use]
    pub fn is_weak(&self) -> bool {
        self.0.starts_with('W')
    }

    /// For strong comparison two entity-tags are equivalent if both are not weak and their
    /// opaque-tags match character-by-character.
    #[must_use]
    pub fn strong_eq(&self, other: &Self) -> bool {
        !self.is_weak() && !other.is_weak() && self.tag() == other.tag()
    }

    /// For weak comparison two entity-tags are equivalent if their
    /// opaque-tags match character-by-character, regardless of either or
    /// both being tagged as "weak".
    #[must_use]
    pub fn weak_eq(&self, other: &Self) -> bool {
        self.tag() == other.tag()
    }

    /// The tag as it appears on the wire.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn check_tag(tag: &str) -> Result<(), OpaqueError> {
    if tag.bytes().all(|c| c == b'\x21' || (b'\x23'..b'\x7f').contains(&c) || c >= b'\x80') {
        Ok(())
    } else {
        Err(OpaqueError::from_display("invalid character in entity tag"))
    }
}

impl FromStr for EntityTag {
    type Err = OpaqueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (weak, rest) = match s.strip_prefix("W/") {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let tag = rest
            .strip_prefix('"')
            .and_then(|rest| rest.strip_suffix('"'))
            .ok_or_else(|| OpaqueError::from_display("entity tag must be quoted"))?;
        if weak { Self::weak(tag) } else { Self::strong(tag) }
    }
}

impl TryFromValues for EntityTag {
    fn try_from_values<'i, I>(values: &mut I) -> Result<Self, OpaqueError>
    where
        I: Iterator<Item = &'i str>,
    {
        use super::IterExt as _;

        values
            .just_one()
            .ok_or_else(|| OpaqueError::from_display("expected exactly one entity tag"))?
            .parse()
    }
}

impl fmt::Debug for EntityTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for EntityTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl WildcardList<EntityTag> {
    /// Strong precondition match, as used by `If-Match`.
    #[must_use]
    pub fn matches_strong(&self, other: &EntityTag) -> bool {
        self.any_matches(|tag| tag.strong_eq(other))
    }

    /// Weak precondition match, as used by `If-None-Match`.
    #[must_use]
    pub fn matches_weak(&self, other: &EntityTag) -> bool {
        self.any_matches(|tag| tag.weak_eq(other))
    }
}
