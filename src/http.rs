//! vellum http support
//!
//! mostly contains re-exports from
//! `vellum-http-types` and `vellum-http-headers`.

pub use ::vellum_http_types::{
    CacheKey, HeaderName, Headers, HeadersError, InvalidHeaderName, InvalidHeaderValue,
    LazyCacheKey, MutableHeaders, RawValues, TypedCache, dep, header,
};

pub mod headers {
    //! Typed http headers.
    //!
    //! Re-export of `vellum-http-headers`.

    #[doc(inline)]
    pub use ::vellum_http_headers::*;
}
