use std::str::FromStr;

use vellum_error::OpaqueError;

use super::origin::Origin;
use crate::util::TryFromValues;

/// `Access-Control-Allow-Origin` header, as defined on
/// [mdn](https://developer.mozilla.org/en-US/docs/Web/HTTP/Reference/Headers/Access-Control-Allow-Origin).
///
/// The `Access-Control-Allow-Origin` header indicates whether a resource
/// can be shared based by returning the value of the Origin request header,
/// `*`, or `null` in the response.
///
/// ## ABNF
///
/// ```text
/// Access-Control-Allow-Origin = "Access-Control-Allow-Origin" ":" origin-list-or-null | "*"
/// ```
///
/// ## Example values
/// * `null`
/// * `*`
/// * `http://google.com/`
///
/// # Examples
///
/// ```
/// use vellum_http_headers::AccessControlAllowOrigin;
///
/// let any_origin = AccessControlAllowOrigin::ANY;
/// let null_origin = AccessControlAllowOrigin::NULL;
/// let origin: AccessControlAllowOrigin = "http://web-platform.test:8000".parse().unwrap();
/// assert!(origin.origin().is_some());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AccessControlAllowOrigin(OriginOrAny);

derive_header!(AccessControlAllowOrigin(_));

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
enum OriginOrAny {
    Origin(Origin),
    /// Allow all origins
    Any,
}

impl AccessControlAllowOrigin {
    /// `Access-Control-Allow-Origin: *`
    pub const ANY: Self = Self(OriginOrAny::Any);
    /// `Access-Control-Allow-Origin: null`
    pub const NULL: Self = Self(OriginOrAny::Origin(Origin::NULL));

    /// Returns the origin if there's one specified.
    #[must_use]
    pub fn origin(&self) -> Option<&Origin> {
        match self.0 {
            OriginOrAny::Origin(ref origin) => Some(origin),
            OriginOrAny::Any => None,
        }
    }

    /// Returns true if `origin` may read the response.
    #[must_use]
    pub fn allows(&self, origin: &Origin) -> bool {
        match self.0 {
            OriginOrAny::Any => true,
            OriginOrAny::Origin(ref allowed) => allowed == origin,
        }
    }
}

impl From<Origin> for AccessControlAllowOrigin {
    fn from(origin: Origin) -> Self {
        Self(OriginOrAny::Origin(origin))
    }
}

impl FromStr for AccessControlAllowOrigin {
    type Err = OpaqueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

impl FromStr for OriginOrAny {
    type Err = OpaqueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim() == "*" {
            Ok(Self::Any)
        } else {
            s.parse().map(Self::Origin)
        }
    }
}

impl TryFromValues for OriginOrAny {
    fn try_from_values<'i, I>(values: &mut I) -> Result<Self, OpaqueError>
    where
        I: Iterator<Item = &'i str>,
    {
        use crate::util::IterExt as _;
        use vellum_error::ErrorContext as _;

        values
            .just_one()
            .context("expected exactly one allowed origin")?
            .parse()
    }
}

impl std::fmt::Display for OriginOrAny {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Origin(origin) => std::fmt::Display::fmt(origin, f),
            Self::Any => f.write_str("*"),
        }
    }
}
