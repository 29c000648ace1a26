//! The static accessors of all standard headers.
//!
//! Every typed header of this crate has exactly one accessor here, which
//! is also what [`TypedHeader::accessor`] returns for it. A few headers
//! have no dedicated type and are read through a generic codec instead.
//!
//! ```
//! use vellum_http_headers::{ContentType, accessors};
//! use vellum_http_types::Headers;
//!
//! let headers = Headers::build(|h| {
//!     accessors::CONTENT_TYPE.set(h, ContentType::json());
//!     accessors::CONTENT_LENGTH.set(h, 2_u64);
//! });
//! assert_eq!(accessors::CONTENT_LENGTH.get(&headers).unwrap(), Some(2));
//! assert_eq!(
//!     accessors::CONTENT_TYPE.require(&headers).unwrap(),
//!     ContentType::json(),
//! );
//! ```

use vellum_http_types::header;

use crate::codec::{self, Codec};
use crate::validate::ManagedHeader;
use crate::{HeaderAccessor, TypedHeader};
use crate::{
    Accept, AcceptEncoding, AcceptLanguage, AcceptRanges, AccessControlAllowCredentials,
    AccessControlAllowHeaders, AccessControlAllowMethods, AccessControlAllowOrigin,
    AccessControlExposeHeaders, AccessControlMaxAge, AccessControlRequestHeaders,
    AccessControlRequestMethod, Age, Allow, Authorization, CacheControl, ClearSiteData,
    Connection, ContentDisposition, ContentEncoding, ContentLanguage, ContentLocation,
    ContentRange, ContentSecurityPolicy, ContentType, Cookie, CrossOriginEmbedderPolicy,
    CrossOriginOpenerPolicy, CrossOriginResourcePolicy, Date, ETag, Expect, Expires, Forwarded,
    Host, IfMatch, IfModifiedSince, IfNoneMatch, IfRange, IfUnmodifiedSince, LastModified,
    Location, Origin, PermissionsPolicy, Range, Referer, ReferrerPolicy, RetryAfter,
    SecFetchDest, SecFetchMode, SecFetchSite, SetCookie, StrictTransportSecurity, Te,
    TransferEncoding, Upgrade, Vary, XContentTypeOptions, XForwardedFor, XFrameOptions,
};

macro_rules! typed_accessors {
    ($($accessor:ident: $ty:ident;)+) => {
        $(
            #[doc = concat!("Accessor of the [`", stringify!($ty), "`] header.")]
            pub static $accessor: HeaderAccessor<$ty> =
                HeaderAccessor::new(header::$accessor, Codec::typed());

            impl TypedHeader for $ty {
                fn accessor() -> &'static HeaderAccessor<Self> {
                    &$accessor
                }
            }
        )+

        static TYPED: &[&dyn ManagedHeader] = &[$(&$accessor),+];
    };
}

typed_accessors! {
    ACCEPT: Accept;
    ACCEPT_ENCODING: AcceptEncoding;
    ACCEPT_LANGUAGE: AcceptLanguage;
    ACCEPT_RANGES: AcceptRanges;
    ACCESS_CONTROL_ALLOW_CREDENTIALS: AccessControlAllowCredentials;
    ACCESS_CONTROL_ALLOW_HEADERS: AccessControlAllowHeaders;
    ACCESS_CONTROL_ALLOW_METHODS: AccessControlAllowMethods;
    ACCESS_CONTROL_ALLOW_ORIGIN: AccessControlAllowOrigin;
    ACCESS_CONTROL_EXPOSE_HEADERS: AccessControlExposeHeaders;
    ACCESS_CONTROL_MAX_AGE: AccessControlMaxAge;
    ACCESS_CONTROL_REQUEST_HEADERS: AccessControlRequestHeaders;
    ACCESS_CONTROL_REQUEST_METHOD: AccessControlRequestMethod;
    AGE: Age;
    ALLOW: Allow;
    AUTHORIZATION: Authorization;
    CACHE_CONTROL: CacheControl;
    CLEAR_SITE_DATA: ClearSiteData;
    CONNECTION: Connection;
    CONTENT_DISPOSITION: ContentDisposition;
    CONTENT_ENCODING: ContentEncoding;
    CONTENT_LANGUAGE: ContentLanguage;
    CONTENT_LOCATION: ContentLocation;
    CONTENT_RANGE: ContentRange;
    CONTENT_SECURITY_POLICY: ContentSecurityPolicy;
    CONTENT_TYPE: ContentType;
    COOKIE: Cookie;
    CROSS_ORIGIN_EMBEDDER_POLICY: CrossOriginEmbedderPolicy;
    CROSS_ORIGIN_OPENER_POLICY: CrossOriginOpenerPolicy;
    CROSS_ORIGIN_RESOURCE_POLICY: CrossOriginResourcePolicy;
    DATE: Date;
    ETAG: ETag;
    EXPECT: Expect;
    EXPIRES: Expires;
    FORWARDED: Forwarded;
    HOST: Host;
    IF_MATCH: IfMatch;
    IF_MODIFIED_SINCE: IfModifiedSince;
    IF_NONE_MATCH: IfNoneMatch;
    IF_RANGE: IfRange;
    IF_UNMODIFIED_SINCE: IfUnmodifiedSince;
    LAST_MODIFIED: LastModified;
    LOCATION: Location;
    ORIGIN: Origin;
    PERMISSIONS_POLICY: PermissionsPolicy;
    RANGE: Range;
    REFERER: Referer;
    REFERRER_POLICY: ReferrerPolicy;
    RETRY_AFTER: RetryAfter;
    SEC_FETCH_DEST: SecFetchDest;
    SEC_FETCH_MODE: SecFetchMode;
    SEC_FETCH_SITE: SecFetchSite;
    SET_COOKIE: SetCookie;
    STRICT_TRANSPORT_SECURITY: StrictTransportSecurity;
    TE: Te;
    TRANSFER_ENCODING: TransferEncoding;
    UPGRADE: Upgrade;
    VARY: Vary;
    X_CONTENT_TYPE_OPTIONS: XContentTypeOptions;
    X_FORWARDED_FOR: XForwardedFor;
    X_FRAME_OPTIONS: XFrameOptions;
}

/// Accessor of the `Content-Length` header, a plain `u64`.
pub static CONTENT_LENGTH: HeaderAccessor<u64> =
    HeaderAccessor::new(header::CONTENT_LENGTH, codec::U64);

/// Accessor of the `User-Agent` header, as trimmed text.
pub static USER_AGENT: HeaderAccessor<String> =
    HeaderAccessor::new(header::USER_AGENT, codec::TEXT);

/// Accessor of the `Server` header, as trimmed text.
pub static SERVER: HeaderAccessor<String> = HeaderAccessor::new(header::SERVER, codec::TEXT);

static UNTYPED: &[&dyn ManagedHeader] = &[&CONTENT_LENGTH, &USER_AGENT, &SERVER];

/// All standard accessors, typed ones first.
pub(crate) fn all() -> impl Iterator<Item = &'static dyn ManagedHeader> {
    TYPED.iter().chain(UNTYPED).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HeadersExt as _;
    use vellum_http_types::Headers;

    #[test]
    fn accessor_names_are_unique() {
        let mut names: Vec<_> = all().map(|h| h.name().as_str()).collect();
        let len = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), len);
    }

    #[test]
    fn typed_header_links_to_its_accessor() {
        assert!(std::ptr::eq(ETag::accessor(), &ETAG));
        assert_eq!(<Cookie as TypedHeader>::name(), &header::COOKIE);
    }

    #[test]
    fn scalar_accessors() {
        let headers = Headers::from_map([
            ("content-length", vec!["42"]),
            ("user-agent", vec!["  curl/8.0 "]),
        ])
        .unwrap();
        assert_eq!(CONTENT_LENGTH.get(&headers).unwrap(), Some(42));
        assert_eq!(USER_AGENT.require(&headers).unwrap(), "curl/8.0");
        assert!(SERVER.require(&headers).unwrap_err().is_missing());
        assert!(!headers.typed_contains::<Host>());
    }
}
