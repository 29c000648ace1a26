use std::fmt;

use vellum_error::{ErrorContext as _, OpaqueError};
use vellum_utils::collections::NonEmptyVec;

use crate::util::{csv, quote, split_param, unquote};
use crate::{HeaderDecode, HeaderEncode};

/// `Permissions-Policy` header, defined in
/// [Permissions Policy](https://www.w3.org/TR/permissions-policy/#permissions-policy-http-header-field)
///
/// Controls which origins may use browser features within a document and
/// its embedded frames.
///
/// The value is a structured field dictionary (RFC 8941) from feature names
/// to allowlists:
///
/// ```text
/// Permissions-Policy = sf-dictionary
/// member             = sf-key "=" ( allowlist-item / "(" *( SP allowlist-item ) ")" )
/// allowlist-item     = "*" / "self" / "src" / sf-string
/// ```
///
/// Any syntactically valid feature name is accepted, since new features
/// ship far more often than this list could follow. Repeated features,
/// member parameters and other structured field types are rejected.
///
/// # Example values
///
/// * `geolocation=()`
/// * `camera=(self "https://media.example.com"), fullscreen=*`
///
/// # Example
///
/// ```
/// use vellum_http_headers::{Allowlist, PermissionsPolicy};
///
/// let policy = PermissionsPolicy::new("geolocation", Allowlist::none())
///     .unwrap()
///     .with_feature("camera", Allowlist::self_origin().with_origin("https://media.example.com"))
///     .unwrap();
/// assert!(policy.is_disabled("geolocation"));
/// assert_eq!(
///     policy.to_string(),
///     r#"geolocation=(), camera=(self "https://media.example.com")"#,
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PermissionsPolicy(NonEmptyVec<(String, Allowlist)>);

impl PermissionsPolicy {
    /// Create the header for a single feature.
    pub fn new(feature: impl Into<String>, allowlist: Allowlist) -> Result<Self, OpaqueError> {
        let feature = feature.into();
        validate_feature(&feature)?;
        Ok(Self(NonEmptyVec::new((feature, allowlist))))
    }

    /// Set the allowlist of a feature, replacing a previous one.
    pub fn with_feature(
        mut self,
        feature: impl Into<String>,
        allowlist: Allowlist,
    ) -> Result<Self, OpaqueError> {
        let feature = feature.into();
        validate_feature(&feature)?;
        match self.0.iter_mut().find(|(name, _)| *name == feature) {
            Some((_, existing)) => *existing = allowlist,
            None => self.0.push((feature, allowlist)),
        }
        Ok(self)
    }

    /// The allowlist of a feature, `None` if the policy does not mention it.
    #[must_use]
    pub fn allowlist(&self, feature: &str) -> Option<&Allowlist> {
        self.0
            .iter()
            .find(|(name, _)| name == feature)
            .map(|(_, allowlist)| allowlist)
    }

    /// Returns true if the feature is explicitly disabled with `()`.
    #[must_use]
    pub fn is_disabled(&self, feature: &str) -> bool {
        self.allowlist(feature).is_some_and(Allowlist::is_empty)
    }

    /// Iterate over the features in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Allowlist)> {
        self.0.iter().map(|(name, allowlist)| (name.as_str(), allowlist))
    }
}

impl HeaderDecode for PermissionsPolicy {
    fn decode<'i, I>(values: &mut I) -> Result<Self, OpaqueError>
    where
        I: Iterator<Item = &'i str>,
    {
        let mut members: Vec<(String, Allowlist)> = Vec::new();
        for member in csv::elements(values, csv::Separator::Comma) {
            let (name, value) = split_param(member);
            validate_feature(name)?;
            if members.iter().any(|(known, _)| known == name) {
                return Err(OpaqueError::from_display(format!(
                    "duplicate feature {name}"
                )));
            }
            let value = value.with_context(|| format!("feature {name} without allowlist"))?;
            let allowlist = Allowlist::parse(value).with_context(|| format!("parse {name}"))?;
            members.push((name.to_owned(), allowlist));
        }
        NonEmptyVec::from_vec(members)
            .map(Self)
            .context("permissions policy without features")
    }
}

impl HeaderEncode for PermissionsPolicy {
    fn encode<E: Extend<String>>(&self, values: &mut E) {
        values.extend(std::iter::once(self.to_string()));
    }
}

impl fmt::Display for PermissionsPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, (name, allowlist)) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name}={allowlist}")?;
        }
        Ok(())
    }
}

/// The origins a feature is allowed for.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Allowlist(Vec<AllowlistItem>);

impl Allowlist {
    /// `*`, every origin.
    #[must_use]
    pub fn any() -> Self {
        Self(vec![AllowlistItem::Any])
    }

    /// `()`, the feature is disabled.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// `(self)`, the origin of the document.
    #[must_use]
    pub fn self_origin() -> Self {
        Self(vec![AllowlistItem::SelfOrigin])
    }

    /// Add an item.
    #[must_use]
    pub fn with_item(mut self, item: AllowlistItem) -> Self {
        if !self.0.contains(&item) {
            self.0.push(item);
        }
        self
    }

    /// Add an explicit origin.
    #[must_use]
    pub fn with_origin(self, origin: impl Into<String>) -> Self {
        self.with_item(AllowlistItem::Origin(origin.into()))
    }

    /// Returns true if the feature is allowed for every origin.
    #[must_use]
    pub fn allows_any(&self) -> bool {
        self.0.contains(&AllowlistItem::Any)
    }

    /// Returns true if no origin is allowed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The items, in order.
    #[must_use]
    pub fn items(&self) -> &[AllowlistItem] {
        &self.0
    }

    fn parse(s: &str) -> Result<Self, OpaqueError> {
        let Some(inner) = s.strip_prefix('(') else {
            return AllowlistItem::parse(s).map(|item| Self(vec![item]));
        };
        let inner = inner
            .strip_suffix(')')
            .context("inner list without closing parenthesis")?;
        csv::split_str(inner, ' ')
            .filter(|item| !item.is_empty())
            .try_fold(Self::none(), |allowlist, item| {
                AllowlistItem::parse(item).map(|item| allowlist.with_item(item))
            })
    }
}

impl fmt::Display for Allowlist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let [AllowlistItem::Any] = self.0.as_slice() {
            return f.write_str("*");
        }
        f.write_str("(")?;
        for (index, item) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str(" ")?;
            }
            fmt::Display::fmt(item, f)?;
        }
        f.write_str(")")
    }
}

/// A single member of an [`Allowlist`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum AllowlistItem {
    /// `*`
    Any,
    /// `self`
    SelfOrigin,
    /// `src`, the origin of the embedded frame
    Src,
    /// A serialized origin such as `"https://example.com"`
    Origin(String),
}

impl AllowlistItem {
    fn parse(s: &str) -> Result<Self, OpaqueError> {
        match s {
            "*" => Ok(Self::Any),
            "self" => Ok(Self::SelfOrigin),
            "src" => Ok(Self::Src),
            s if s.starts_with('"') => {
                let origin = unquote(s)?;
                if origin.bytes().all(|b| (0x20..0x7f).contains(&b)) {
                    Ok(Self::Origin(origin))
                } else {
                    Err(OpaqueError::from_display(
                        "structured field string must be printable ascii",
                    ))
                }
            }
            _ => Err(OpaqueError::from_display(format!(
                "unknown allowlist item {s:?}"
            ))),
        }
    }
}

impl fmt::Display for AllowlistItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("*"),
            Self::SelfOrigin => f.write_str("self"),
            Self::Src => f.write_str("src"),
            Self::Origin(origin) => f.write_str(&quote(origin)),
        }
    }
}

/// `sf-key = ( lcalpha / "*" ) *( lcalpha / DIGIT / "_" / "-" / "." / "*" )`
fn validate_feature(name: &str) -> Result<(), OpaqueError> {
    let mut bytes = name.bytes();
    let valid = bytes
        .next()
        .is_some_and(|b| b.is_ascii_lowercase() || b == b'*')
        && bytes.all(|b| {
            b.is_ascii_lowercase() || b.is_ascii_digit() || matches!(b, b'_' | b'-' | b'.' | b'*')
        });
    if valid {
        Ok(())
    } else {
        Err(OpaqueError::from_display(format!(
            "invalid feature name {name:?}"
        )))
    }
}
