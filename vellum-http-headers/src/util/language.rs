use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use vellum_error::OpaqueError;

/// A language tag or range, such as `en` or `en-US`.
///
/// ```text
/// language-range = 1*8ALPHA *( "-" 1*8alphanum )
/// ```
///
/// Comparison ignores ASCII case; the original spelling is kept for
/// encoding.
#[derive(Clone)]
pub struct LanguageTag(String);

impl LanguageTag {
    /// The tag as given.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The primary subtag, `en` for `en-US`.
    #[must_use]
    pub fn primary(&self) -> &str {
        self.0.split('-').next().unwrap_or_default()
    }

    /// Returns true if this range matches `tag` by prefix, as in RFC 4647
    /// basic filtering: `en` matches `en` and `en-US`, not `eng`.
    #[must_use]
    pub fn matches(&self, tag: &Self) -> bool {
        let range = self.0.as_bytes();
        let tag = tag.0.as_bytes();
        tag.len() >= range.len()
            && tag[..range.len()].eq_ignore_ascii_case(range)
            && (tag.len() == range.len() || tag[range.len()] == b'-')
    }
}

impl FromStr for LanguageTag {
    type Err = OpaqueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut subtags = s.split('-');
        let valid = subtags
            .next()
            .is_some_and(|primary| is_subtag(primary, u8::is_ascii_alphabetic))
            && subtags.all(|subtag| is_subtag(subtag, u8::is_ascii_alphanumeric));
        if valid {
            Ok(Self(s.to_owned()))
        } else {
            Err(OpaqueError::from_display("invalid language tag"))
        }
    }
}

fn is_subtag(s: &str, valid: fn(&u8) -> bool) -> bool {
    (1..=8).contains(&s.len()) && s.bytes().all(|b| valid(&b))
}

impl PartialEq for LanguageTag {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl Eq for LanguageTag {}

impl Hash for LanguageTag {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for b in self.0.bytes() {
            state.write_u8(b.to_ascii_lowercase());
        }
    }
}

impl fmt::Debug for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(s: &str) -> LanguageTag {
        s.parse().unwrap()
    }

    #[test]
    fn parse() {
        assert_eq!(tag("en-US"), tag("en-us"));
        assert_eq!(tag("zh-Hant-TW").primary(), "zh");
        for bad in ["", "*", "en_US", "toolonglang", "en-", "1en", "en-abcdefghi"] {
            assert!(bad.parse::<LanguageTag>().is_err(), "{bad:?}");
        }
    }

    #[test]
    fn basic_filtering() {
        assert!(tag("en").matches(&tag("en-GB")));
        assert!(tag("en").matches(&tag("EN")));
        assert!(!tag("en").matches(&tag("eng")));
        assert!(!tag("en-GB").matches(&tag("en")));
    }
}
