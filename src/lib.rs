//! Vellum gives HTTP servers strongly-typed headers on top of an immutable,
//! case-insensitive and multi-valued header map.
//!
//! The raw string map stays the single source of truth. A header is only
//! parsed when a typed accessor reads it, the result is cached in the
//! [`Headers`](http::Headers) instance it was read from, and writing a
//! typed value always goes through a builder that produces a new instance.
//!
//! | category | support list |
//! |-|-|
//! | ✅ [header map](http::Headers) | ✅ immutable [`Headers`](http::Headers) ⸱ ✅ [builder](http::MutableHeaders) ⸱ ✅ per instance [typed cache](http::TypedCache) ⸱ ✅ `http::HeaderMap` interop ⸱ ✅ serde |
//! | ✅ [accessors](http::headers::HeaderAccessor) | ✅ [codecs](http::headers::codec) ⸱ ✅ [typed reads](http::headers::HeadersExt) ⸱ ✅ [typed writes](http::headers::MutableHeadersExt) ⸱ ✅ [strict validation](http::headers::validate_headers) |
//! | ✅ [typed headers](http::headers) | ✅ content negotiation ⸱ ✅ caching and conditionals ⸱ ✅ CORS ⸱ ✅ security policies ⸱ ✅ cookies ⸱ ✅ forwarding |
//! | ✅ utilities | ✅ [error handling](crate::error) ⸱ ✅ [non-empty collections](crate::utils::collections) |
//!
//! ```
//! use vellum::http::Headers;
//! use vellum::http::headers::{ContentType, HeadersExt, MutableHeadersExt};
//!
//! let request = Headers::from_map([("content-type", ["application/json"])]).unwrap();
//! assert_eq!(request.typed_get::<ContentType>(), Some(ContentType::json()));
//!
//! let response = Headers::build(|h| h.typed_insert(ContentType::text_utf8()));
//! assert_eq!(
//!     response.get_str("Content-Type").unwrap().first(),
//!     "text/plain; charset=utf-8",
//! );
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![cfg_attr(not(test), warn(clippy::print_stdout, clippy::dbg_macro))]

pub mod error;

pub mod utils;

pub mod http;
