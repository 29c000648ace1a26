use std::fmt;
use std::time::{Duration, SystemTime};

use vellum_error::{ErrorContext as _, OpaqueError};
use vellum_utils::collections::NonEmptyVec;

use super::cookie::validate_pair;
use crate::util::{HttpDate, split_param};
use crate::{HeaderDecode, HeaderEncode};

/// `Set-Cookie` header, defined in [RFC6265](https://datatracker.ietf.org/doc/html/rfc6265#section-4.1)
///
/// The Set-Cookie HTTP response header is used to send cookies from the
/// server to the user agent.
///
/// Every field line carries exactly one cookie and field lines are never
/// combined with commas, as the `Expires` date contains one itself. This
/// header therefore holds all cookies of a response, one per raw value.
///
/// # ABNF
///
/// ```text
/// set-cookie-string = cookie-pair *( ";" SP cookie-av )
/// cookie-av         = expires-av / max-age-av / domain-av /
///                     path-av / secure-av / httponly-av /
///                     samesite-av / partitioned-av / extension-av
/// ```
///
/// Attribute names are matched case-insensitively. `Domain`, `Path`,
/// `Expires`, `Max-Age` and `SameSite` may each appear at most once;
/// extension attributes are ignored.
///
/// # Example values
///
/// * `SID=31d4d96e407aad42; Path=/; Secure; HttpOnly`
/// * `lang=en-US; Expires=Wed, 09 Jun 2021 10:18:14 GMT`
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use vellum_http_headers::{ResponseCookie, SameSite, SetCookie};
///
/// let cookie = ResponseCookie::new("SID", "31d4d96e407aad42")
///     .unwrap()
///     .with_path("/")
///     .unwrap()
///     .with_max_age(Duration::from_secs(3600))
///     .with_secure()
///     .with_http_only()
///     .with_same_site(SameSite::Lax);
/// assert_eq!(
///     cookie.to_string(),
///     "SID=31d4d96e407aad42; Max-Age=3600; Path=/; Secure; HttpOnly; SameSite=Lax",
/// );
/// let header = SetCookie::new(cookie);
/// assert_eq!(header.get("SID").unwrap().path(), Some("/"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SetCookie(NonEmptyVec<ResponseCookie>);

impl SetCookie {
    /// Create the header with a single cookie.
    #[must_use]
    pub fn new(cookie: ResponseCookie) -> Self {
        Self(NonEmptyVec::new(cookie))
    }

    /// Add another cookie to the response.
    #[must_use]
    pub fn with_cookie(mut self, cookie: ResponseCookie) -> Self {
        self.0.push(cookie);
        self
    }

    /// The last cookie set under `name`, as a user agent would store it.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ResponseCookie> {
        self.0.iter().rev().find(|cookie| cookie.name == name)
    }

    /// Iterate over the cookies in order.
    pub fn iter(&self) -> std::slice::Iter<'_, ResponseCookie> {
        self.0.iter()
    }
}

impl HeaderDecode for SetCookie {
    fn decode<'i, I>(values: &mut I) -> Result<Self, OpaqueError>
    where
        I: Iterator<Item = &'i str>,
    {
        let cookies = values
            .map(ResponseCookie::parse)
            .collect::<Result<Vec<_>, _>>()?;
        NonEmptyVec::from_vec(cookies)
            .map(Self)
            .context("set-cookie without cookies")
    }
}

impl HeaderEncode for SetCookie {
    fn encode<E: Extend<String>>(&self, values: &mut E) {
        values.extend(self.0.iter().map(ToString::to_string));
    }
}

token_enum! {
    /// The `SameSite` attribute of a cookie.
    pub enum SameSite {
        /// Only sent with same-site requests.
        Strict => "Strict",
        /// Also sent with top-level cross-site navigations.
        Lax => "Lax",
        /// Sent with all requests, requires `Secure`.
        None => "None",
    }
}

/// A single cookie with its attributes, as sent in a `Set-Cookie` line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResponseCookie {
    name: String,
    value: String,
    expires: Option<HttpDate>,
    max_age: Option<i64>,
    domain: Option<String>,
    path: Option<String>,
    secure: bool,
    http_only: bool,
    same_site: Option<SameSite>,
    partitioned: bool,
}

impl ResponseCookie {
    /// Create a cookie without attributes.
    pub fn new(name: &str, value: &str) -> Result<Self, OpaqueError> {
        validate_pair(name, value)?;
        Ok(Self {
            name: name.to_owned(),
            value: value.to_owned(),
            expires: None,
            max_age: None,
            domain: None,
            path: None,
            secure: false,
            http_only: false,
            same_site: None,
            partitioned: false,
        })
    }

    /// A cookie which removes `name` from the user agent.
    pub fn removal(name: &str) -> Result<Self, OpaqueError> {
        let mut cookie = Self::new(name, "")?;
        cookie.max_age = Some(0);
        Ok(cookie)
    }

    /// Set the `Expires` attribute.
    #[must_use]
    pub fn with_expires(mut self, expires: SystemTime) -> Self {
        self.expires = Some(expires.into());
        self
    }

    /// Set the `Max-Age` attribute.
    #[must_use]
    pub fn with_max_age(mut self, max_age: Duration) -> Self {
        self.max_age = Some(i64::try_from(max_age.as_secs()).unwrap_or(i64::MAX));
        self
    }

    /// Set the `Domain` attribute. Leading dots are dropped and a domain
    /// left empty by that is rejected.
    pub fn with_domain(mut self, domain: &str) -> Result<Self, OpaqueError> {
        let domain = attribute_value(domain)?;
        let domain = domain.trim_start_matches('.');
        if domain.is_empty() {
            return Err(OpaqueError::from_display("empty cookie domain"));
        }
        self.domain = Some(domain.to_owned());
        Ok(self)
    }

    /// Set the `Path` attribute, which must start with `/`.
    pub fn with_path(mut self, path: &str) -> Result<Self, OpaqueError> {
        let path = attribute_value(path)?;
        if !path.starts_with('/') {
            return Err(OpaqueError::from_display("cookie path must start with '/'"));
        }
        self.path = Some(path);
        Ok(self)
    }

    /// Set the `Secure` attribute.
    #[must_use]
    pub fn with_secure(mut self) -> Self {
        self.secure = true;
        self
    }

    /// Set the `HttpOnly` attribute.
    #[must_use]
    pub fn with_http_only(mut self) -> Self {
        self.http_only = true;
        self
    }

    /// Set the `SameSite` attribute.
    #[must_use]
    pub fn with_same_site(mut self, same_site: SameSite) -> Self {
        self.same_site = Some(same_site);
        self
    }

    /// Set the `Partitioned` attribute.
    #[must_use]
    pub fn with_partitioned(mut self) -> Self {
        self.partitioned = true;
        self
    }

    /// The cookie name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The cookie value, quotes included if it was quoted.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The `Expires` attribute.
    #[must_use]
    pub fn expires(&self) -> Option<SystemTime> {
        self.expires.map(Into::into)
    }

    /// The `Max-Age` attribute in seconds, zero or negative expires the
    /// cookie immediately.
    #[must_use]
    pub fn max_age_seconds(&self) -> Option<i64> {
        self.max_age
    }

    /// The `Max-Age` attribute, zero if the cookie expires immediately.
    #[must_use]
    pub fn max_age(&self) -> Option<Duration> {
        self.max_age
            .map(|secs| Duration::from_secs(u64::try_from(secs).unwrap_or_default()))
    }

    /// The `Domain` attribute, without leading dot.
    #[must_use]
    pub fn domain(&self) -> Option<&str> {
        self.domain.as_deref()
    }

    /// The `Path` attribute.
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Returns true if `Secure` is set.
    #[must_use]
    pub fn secure(&self) -> bool {
        self.secure
    }

    /// Returns true if `HttpOnly` is set.
    #[must_use]
    pub fn http_only(&self) -> bool {
        self.http_only
    }

    /// The `SameSite` attribute.
    #[must_use]
    pub fn same_site(&self) -> Option<SameSite> {
        self.same_site
    }

    /// Returns true if `Partitioned` is set.
    #[must_use]
    pub fn partitioned(&self) -> bool {
        self.partitioned
    }

    fn parse(s: &str) -> Result<Self, OpaqueError> {
        let mut parts = s.split(';');
        let pair = parts.next().unwrap_or_default();
        let (name, value) = pair.split_once('=').context("cookie pair without '='")?;
        let mut cookie = Self::new(name.trim(), value.trim())?;

        for av in parts {
            let (attr, value) = split_param(av);
            if attr.is_empty() {
                continue;
            }
            vellum_utils::macros::match_ignore_ascii_case_str! {
                match (attr) {
                    "expires" => {
                        ensure_unset(cookie.expires.is_some(), "Expires")?;
                        let value = value.context("Expires without value")?;
                        cookie.expires = Some(value.parse()?);
                    },
                    "max-age" => {
                        ensure_unset(cookie.max_age.is_some(), "Max-Age")?;
                        cookie.max_age = Some(parse_max_age(value.context("Max-Age without value")?)?);
                    },
                    "domain" => {
                        ensure_unset(cookie.domain.is_some(), "Domain")?;
                        cookie = cookie.with_domain(value.context("Domain without value")?)?;
                    },
                    "path" => {
                        ensure_unset(cookie.path.is_some(), "Path")?;
                        cookie = cookie.with_path(value.context("Path without value")?)?;
                    },
                    "samesite" => {
                        ensure_unset(cookie.same_site.is_some(), "SameSite")?;
                        cookie.same_site = Some(value.context("SameSite without value")?.parse()?);
                    },
                    "secure" => cookie.secure = flag(value, "Secure")?,
                    "httponly" => cookie.http_only = flag(value, "HttpOnly")?,
                    "partitioned" => cookie.partitioned = flag(value, "Partitioned")?,
                    _ => {
                        tracing::trace!("ignore unknown set-cookie attribute {attr}");
                    },
                }
            }
        }

        Ok(cookie)
    }
}

fn ensure_unset(is_set: bool, attr: &str) -> Result<(), OpaqueError> {
    if is_set {
        Err(OpaqueError::from_display(format!(
            "duplicate {attr} attribute"
        )))
    } else {
        Ok(())
    }
}

fn flag(value: Option<&str>, attr: &str) -> Result<bool, OpaqueError> {
    match value {
        None => Ok(true),
        Some(_) => Err(OpaqueError::from_display(format!(
            "{attr} does not take a value"
        ))),
    }
}

fn parse_max_age(s: &str) -> Result<i64, OpaqueError> {
    let (negative, digits) = match s.strip_prefix('-') {
        Some(digits) => (true, digits),
        None => (false, s),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(OpaqueError::from_display("Max-Age must be an integer"));
    }
    let secs = digits.parse::<i64>().unwrap_or(i64::MAX);
    Ok(if negative { -secs } else { secs })
}

/// Attribute values are trimmed as they are on decode.
fn attribute_value(s: &str) -> Result<String, OpaqueError> {
    let s = s.trim();
    if s.bytes().any(|b| b.is_ascii_control() || b == b';') {
        Err(OpaqueError::from_display(
            "cookie attribute value may not contain ';' or controls",
        ))
    } else {
        Ok(s.to_owned())
    }
}

impl fmt::Display for ResponseCookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)?;
        if let Some(expires) = &self.expires {
            write!(f, "; Expires={expires}")?;
        }
        if let Some(max_age) = self.max_age {
            write!(f, "; Max-Age={max_age}")?;
        }
        if let Some(domain) = &self.domain {
            write!(f, "; Domain={domain}")?;
        }
        if let Some(path) = &self.path {
            write!(f, "; Path={path}")?;
        }
        if self.secure {
            f.write_str("; Secure")?;
        }
        if self.http_only {
            f.write_str("; HttpOnly")?;
        }
        if let Some(same_site) = self.same_site {
            write!(f, "; SameSite={same_site}")?;
        }
        if self.partitioned {
            f.write_str("; Partitioned")?;
        }
        Ok(())
    }
}
