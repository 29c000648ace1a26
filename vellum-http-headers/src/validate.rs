//! Eager or on-demand validation of the managed headers.
//!
//! Typed reads always validate the header they touch. A request layer
//! that wants to reject malformed requests up front can additionally run
//! [`validate_headers`] in [`ValidationMode::Strict`].

use serde::{Deserialize, Serialize};
use vellum_http_types::{HeaderName, Headers};

use crate::{Error, HeaderAccessor, accessors};

/// When managed headers get validated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValidationMode {
    /// Only headers that are actually read get validated.
    #[default]
    Lazy,
    /// Every managed header is validated before the request is handled.
    Strict,
}

/// An accessor with its value type erased.
pub trait ManagedHeader: Send + Sync {
    /// The header name.
    fn name(&self) -> &HeaderName;

    /// Decode the header if present, discarding the value.
    fn validate(&self, headers: &Headers) -> Result<(), Error>;
}

impl<T: Clone + Send + Sync + 'static> ManagedHeader for HeaderAccessor<T> {
    fn name(&self) -> &HeaderName {
        Self::name(self)
    }

    fn validate(&self, headers: &Headers) -> Result<(), Error> {
        self.get(headers).map(drop)
    }
}

/// The standard accessors, as validated in strict mode.
pub fn managed_headers() -> impl Iterator<Item = &'static dyn ManagedHeader> {
    accessors::all()
}

/// Validate `headers` according to `mode`.
///
/// In [`ValidationMode::Strict`] every managed header that is present gets
/// decoded, and all failures are returned together. Decoded values end up
/// in the cache of `headers`, so later typed reads are free.
///
/// ```
/// use vellum_http_headers::{ValidationMode, validate_headers};
/// use vellum_http_types::Headers;
///
/// let headers = Headers::from_map([("content-length", ["-1"])]).unwrap();
/// assert!(validate_headers(&headers, ValidationMode::Lazy).is_ok());
/// let errors = validate_headers(&headers, ValidationMode::Strict).unwrap_err();
/// assert_eq!(errors[0].header_name(), "content-length");
/// ```
pub fn validate_headers(headers: &Headers, mode: ValidationMode) -> Result<(), Vec<Error>> {
    if mode == ValidationMode::Lazy {
        return Ok(());
    }
    let errors: Vec<_> = managed_headers()
        .filter_map(|header| header.validate(headers).err())
        .collect();
    if errors.is_empty() {
        Ok(())
    } else {
        tracing::debug!(count = errors.len(), "strict header validation failed");
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use tracing_test::traced_test;

    use super::*;
    use crate::{ETag, HeadersExt as _};

    #[test]
    fn mode_serde() {
        assert_eq!(
            serde_json::to_string(&ValidationMode::Strict).unwrap(),
            "\"strict\""
        );
        let mode: ValidationMode = serde_json::from_str("\"lazy\"").unwrap();
        assert_eq!(mode, ValidationMode::Lazy);
        assert_eq!(ValidationMode::default(), ValidationMode::Lazy);
        assert!(serde_json::from_str::<ValidationMode>("\"eager\"").is_err());
    }

    #[test]
    #[traced_test]
    fn valid_headers_pass_and_get_cached() {
        let headers = Headers::from_map([
            ("etag", vec!["\"v1\""]),
            ("content-length", vec!["3"]),
            ("x-unmanaged", vec!["anything goes"]),
        ])
        .unwrap();
        validate_headers(&headers, ValidationMode::Strict).unwrap();
        assert!(headers.typed_cache().contains(accessors::ETAG.cache_key()));
        assert!(headers.typed_get::<ETag>().is_some());
        assert!(!logs_contain("strict header validation failed"));
    }

    #[test]
    #[traced_test]
    fn strict_collects_every_failure() {
        let headers = Headers::from_map([
            ("etag", vec!["v1"]),
            ("age", vec!["soon"]),
            ("host", vec!["example.com"]),
        ])
        .unwrap();
        assert!(validate_headers(&headers, ValidationMode::Lazy).is_ok());

        let errors = validate_headers(&headers, ValidationMode::Strict).unwrap_err();
        let mut names: Vec<_> = errors.iter().map(|e| e.header_name().as_str()).collect();
        names.sort_unstable();
        assert_eq!(names, ["age", "etag"]);
        assert!(errors.iter().all(Error::is_invalid));
        assert!(logs_contain("strict header validation failed"));
    }

    #[test]
    fn managed_set_covers_scalars() {
        assert!(managed_headers().any(|h| h.name() == "user-agent"));
        assert!(managed_headers().any(|h| h.name() == "content-length"));
        assert!(managed_headers().any(|h| h.name() == "x-forwarded-for"));
    }
}
