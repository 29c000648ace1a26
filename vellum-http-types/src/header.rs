//! Http header names.
//!
//! [`HeaderName`] is the case-insensitive name type of the [`http`] crate,
//! which normalises to lowercase on construction. The constants below cover
//! the standard names, including a few that the [`http`] crate does not ship.
//!
//! [`http`]: https://docs.rs/http

use crate::InvalidHeaderName;

#[doc(inline)]
pub use http::header::HeaderName;

#[doc(inline)]
pub use http::header::{
    ACCEPT, ACCEPT_ENCODING, ACCEPT_LANGUAGE, ACCEPT_RANGES, ACCESS_CONTROL_ALLOW_CREDENTIALS,
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
    ACCESS_CONTROL_EXPOSE_HEADERS, ACCESS_CONTROL_MAX_AGE, ACCESS_CONTROL_REQUEST_HEADERS,
    ACCESS_CONTROL_REQUEST_METHOD, AGE, ALLOW, AUTHORIZATION, CACHE_CONTROL, CONNECTION,
    CONTENT_DISPOSITION, CONTENT_ENCODING, CONTENT_LANGUAGE, CONTENT_LENGTH, CONTENT_LOCATION,
    CONTENT_RANGE, CONTENT_SECURITY_POLICY, CONTENT_TYPE, COOKIE, DATE, ETAG, EXPECT, EXPIRES,
    FORWARDED, HOST, IF_MATCH, IF_MODIFIED_SINCE, IF_NONE_MATCH, IF_RANGE, IF_UNMODIFIED_SINCE,
    LAST_MODIFIED, LOCATION, ORIGIN, RANGE, REFERER, REFERRER_POLICY, RETRY_AFTER, SERVER,
    SET_COOKIE, STRICT_TRANSPORT_SECURITY, TE, TRANSFER_ENCODING, UPGRADE, USER_AGENT, VARY,
    X_CONTENT_TYPE_OPTIONS, X_FRAME_OPTIONS,
};

// the http crate only covers the classic set, these are the modern additions
/// `Clear-Site-Data`
pub const CLEAR_SITE_DATA: HeaderName = HeaderName::from_static("clear-site-data");
/// `Cross-Origin-Embedder-Policy`
pub const CROSS_ORIGIN_EMBEDDER_POLICY: HeaderName =
    HeaderName::from_static("cross-origin-embedder-policy");
/// `Cross-Origin-Opener-Policy`
pub const CROSS_ORIGIN_OPENER_POLICY: HeaderName =
    HeaderName::from_static("cross-origin-opener-policy");
/// `Cross-Origin-Resource-Policy`
pub const CROSS_ORIGIN_RESOURCE_POLICY: HeaderName =
    HeaderName::from_static("cross-origin-resource-policy");
/// `Permissions-Policy`
pub const PERMISSIONS_POLICY: HeaderName = HeaderName::from_static("permissions-policy");
/// `Sec-Fetch-Dest`
pub const SEC_FETCH_DEST: HeaderName = HeaderName::from_static("sec-fetch-dest");
/// `Sec-Fetch-Mode`
pub const SEC_FETCH_MODE: HeaderName = HeaderName::from_static("sec-fetch-mode");
/// `Sec-Fetch-Site`
pub const SEC_FETCH_SITE: HeaderName = HeaderName::from_static("sec-fetch-site");
/// `X-Forwarded-For`
pub const X_FORWARDED_FOR: HeaderName = HeaderName::from_static("x-forwarded-for");

/// Parse a header name from a str, ignoring ASCII case.
///
/// ```
/// use vellum_http_types::header::{self, parse_header_name};
///
/// assert_eq!(parse_header_name("Content-Type").unwrap(), header::CONTENT_TYPE);
/// assert!(parse_header_name("bad name").is_err());
/// ```
pub fn parse_header_name(name: &str) -> Result<HeaderName, InvalidHeaderName> {
    HeaderName::from_bytes(name.trim().as_bytes()).map_err(|_err| InvalidHeaderName::new(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_header_name_is_case_insensitive() {
        for raw in ["sec-fetch-site", "Sec-Fetch-Site", "SEC-FETCH-SITE", " sec-fetch-site "] {
            assert_eq!(parse_header_name(raw).unwrap(), SEC_FETCH_SITE);
        }
    }

    #[test]
    fn parse_header_name_rejects_invalid() {
        for raw in ["", "a b", "x:y", "caf\u{e9}"] {
            assert!(parse_header_name(raw).is_err(), "{raw:?}");
        }
    }
}
