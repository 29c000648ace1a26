use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use vellum_error::OpaqueError;

use super::is_token;

/// A content or transfer coding name, such as `gzip` or `chunked`.
///
/// Coding names are case-insensitive and kept in lowercase. The wildcard
/// `*` is not a coding; lists that allow it model it separately.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Coding(Cow<'static, str>);

impl Coding {
    /// `gzip`
    pub const GZIP: Self = Self(Cow::Borrowed("gzip"));
    /// `deflate`
    pub const DEFLATE: Self = Self(Cow::Borrowed("deflate"));
    /// `br`
    pub const BR: Self = Self(Cow::Borrowed("br"));
    /// `zstd`
    pub const ZSTD: Self = Self(Cow::Borrowed("zstd"));
    /// `compress`
    pub const COMPRESS: Self = Self(Cow::Borrowed("compress"));
    /// `identity`
    pub const IDENTITY: Self = Self(Cow::Borrowed("identity"));
    /// `chunked`, a transfer coding.
    pub const CHUNKED: Self = Self(Cow::Borrowed("chunked"));
    /// `trailers`, only meaningful in `TE`.
    pub const TRAILERS: Self = Self(Cow::Borrowed("trailers"));

    /// The coding name, lowercase.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Coding {
    type Err = OpaqueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == "*" || !is_token(s) {
            return Err(OpaqueError::from_display("invalid coding name"));
        }
        let known = [
            Self::GZIP,
            Self::DEFLATE,
            Self::BR,
            Self::ZSTD,
            Self::COMPRESS,
            Self::IDENTITY,
            Self::CHUNKED,
            Self::TRAILERS,
        ];
        Ok(known
            .into_iter()
            .find(|coding| coding.as_str().eq_ignore_ascii_case(s))
            .unwrap_or_else(|| Self(Cow::Owned(s.to_ascii_lowercase()))))
    }
}

impl fmt::Debug for Coding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for Coding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
