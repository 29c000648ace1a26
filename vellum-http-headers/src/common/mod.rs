pub use self::accept::Accept;
pub use self::accept_encoding::AcceptEncoding;
pub use self::accept_language::AcceptLanguage;
pub use self::accept_ranges::AcceptRanges;
pub use self::access_control_allow_credentials::AccessControlAllowCredentials;
pub use self::access_control_allow_headers::AccessControlAllowHeaders;
pub use self::access_control_allow_methods::AccessControlAllowMethods;
pub use self::access_control_allow_origin::AccessControlAllowOrigin;
pub use self::access_control_expose_headers::AccessControlExposeHeaders;
pub use self::access_control_max_age::AccessControlMaxAge;
pub use self::access_control_request_headers::AccessControlRequestHeaders;
pub use self::access_control_request_method::AccessControlRequestMethod;
pub use self::age::Age;
pub use self::allow::Allow;
pub use self::authorization::{Authorization, Basic, Bearer, Credentials};
pub use self::cache_control::{CacheControl, MaxStale};
pub use self::clear_site_data::{ClearSiteData, ClearSiteDataType};
pub use self::connection::Connection;
pub use self::content_disposition::{
    Charset, ContentDisposition, DispositionParam, DispositionType, ExtendedValue, ParamValue,
};
pub use self::content_encoding::ContentEncoding;
pub use self::content_language::ContentLanguage;
pub use self::content_location::ContentLocation;
pub use self::content_range::ContentRange;
pub use self::content_security_policy::{ContentSecurityPolicy, CspDirective, CspPolicy};
pub use self::content_type::ContentType;
pub use self::cookie::Cookie;
pub use self::cross_origin::{
    CrossOriginEmbedderPolicy, CrossOriginOpenerPolicy, CrossOriginResourcePolicy,
};
pub use self::date::Date;
pub use self::etag::ETag;
pub use self::expect::Expect;
pub use self::expires::Expires;
pub use self::forwarded::{Forwarded, ForwardedElement, ForwardedNode, NodeName, NodePort};
pub use self::host::Host;
pub use self::if_match::IfMatch;
pub use self::if_modified_since::IfModifiedSince;
pub use self::if_none_match::IfNoneMatch;
pub use self::if_range::{IfRange, IfRangeValue};
pub use self::if_unmodified_since::IfUnmodifiedSince;
pub use self::last_modified::LastModified;
pub use self::location::Location;
pub use self::origin::Origin;
pub use self::permissions_policy::{Allowlist, AllowlistItem, PermissionsPolicy};
pub use self::range::{ByteRangeSpec, Range};
pub use self::referer::Referer;
pub use self::referrer_policy::ReferrerPolicy;
pub use self::retry_after::{After, RetryAfter};
pub use self::sec_fetch::{SecFetchDest, SecFetchMode, SecFetchSite};
pub use self::set_cookie::{ResponseCookie, SameSite, SetCookie};
pub use self::strict_transport_security::StrictTransportSecurity;
pub use self::te::Te;
pub use self::transfer_encoding::TransferEncoding;
pub use self::upgrade::{Protocol, Upgrade};
pub use self::vary::Vary;
pub use self::x_content_type_options::XContentTypeOptions;
pub use self::x_forwarded_for::XForwardedFor;
pub use self::x_frame_options::XFrameOptions;

#[cfg(test)]
fn test_decode<T: crate::HeaderDecode>(values: &[&str]) -> Option<T> {
    let mut values = values.iter().copied();
    T::decode(&mut values).ok()
}

#[cfg(test)]
fn test_encode<T: crate::TypedHeader>(header: T) -> vellum_http_types::Headers {
    use crate::MutableHeadersExt as _;

    vellum_http_types::Headers::build(|headers| headers.typed_insert(header))
}

mod accept;
mod accept_encoding;
mod accept_language;
mod accept_ranges;
mod access_control_allow_credentials;
mod access_control_allow_headers;
mod access_control_allow_methods;
mod access_control_allow_origin;
mod access_control_expose_headers;
mod access_control_max_age;
mod access_control_request_headers;
mod access_control_request_method;
mod age;
mod allow;
mod authorization;
mod cache_control;
mod clear_site_data;
mod connection;
mod content_disposition;
mod content_encoding;
mod content_language;
mod content_location;
mod content_range;
mod content_security_policy;
mod content_type;
mod cookie;
mod cross_origin;
mod date;
mod etag;
mod expect;
mod expires;
mod forwarded;
mod host;
mod if_match;
mod if_modified_since;
mod if_none_match;
mod if_range;
mod if_unmodified_since;
mod last_modified;
mod location;
mod origin;
mod permissions_policy;
mod range;
mod referer;
mod referrer_policy;
mod retry_after;
mod sec_fetch;
mod set_cookie;
mod strict_transport_security;
mod te;
mod transfer_encoding;
mod upgrade;
mod vary;
mod x_content_type_options;
mod x_forwarded_for;
mod x_frame_options;
