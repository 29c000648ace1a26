//! # Typed HTTP Headers
//!
//! vellum has the opinion that headers should be strongly-typed, while the
//! raw, case-insensitive and multi-valued string map stays the single source
//! of truth. A header is only parsed when a typed accessor actually reads
//! it, and the result is cached in the [`Headers`] instance it was read
//! from.
//!
//! Several common headers are already provided, such as [`Host`],
//! [`ContentType`], [`CacheControl`], [`SetCookie`] and others. Each of
//! them has a static [`HeaderAccessor`] in [`accessors`].
//!
//! ```
//! use vellum_http_headers::{CacheControl, ETag, HeadersExt, MutableHeadersExt};
//! use vellum_http_types::Headers;
//!
//! let headers = Headers::from_map([("ETag", ["\"v1\""])]).unwrap();
//! let etag: ETag = headers.typed_get().unwrap();
//! assert_eq!(etag.tag(), "v1");
//!
//! let headers = headers.transform(|h| h.typed_insert(CacheControl::new().with_no_store()));
//! assert_eq!(
//!     headers.typed_get::<CacheControl>().map(|cc| cc.no_store()),
//!     Some(true),
//! );
//! ```
//!
//! # Defining Custom Headers
//!
//! A header without dedicated type is declared as a static accessor with
//! one of the generic [`codec`]s. For a header of your own grammar,
//! implement [`HeaderDecode`] and [`HeaderEncode`] and declare the accessor
//! with [`Codec::typed`].
//!
//! Consider a Do Not Track header. It can be true or false, but it represents
//! that via the numerals `1` and `0`.
//!
//! ```
//! use vellum_error::OpaqueError;
//! use vellum_http_headers::codec::Codec;
//! use vellum_http_headers::{HeaderAccessor, HeaderDecode, HeaderEncode, TypedHeader};
//! use vellum_http_types::{HeaderName, Headers};
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct Dnt(bool);
//!
//! impl HeaderDecode for Dnt {
//!     fn decode<'i, I>(values: &mut I) -> Result<Self, OpaqueError>
//!     where
//!         I: Iterator<Item = &'i str>,
//!     {
//!         match values.next() {
//!             Some("0") => Ok(Dnt(false)),
//!             Some("1") => Ok(Dnt(true)),
//!             _ => Err(OpaqueError::from_display("invalid dnt value")),
//!         }
//!     }
//! }
//!
//! impl HeaderEncode for Dnt {
//!     fn encode<E: Extend<String>>(&self, values: &mut E) {
//!         let s = if self.0 { "1" } else { "0" };
//!         values.extend(std::iter::once(s.to_owned()));
//!     }
//! }
//!
//! static DNT: HeaderAccessor<Dnt> =
//!     HeaderAccessor::new(HeaderName::from_static("dnt"), Codec::typed());
//!
//! impl TypedHeader for Dnt {
//!     fn accessor() -> &'static HeaderAccessor<Self> {
//!         &DNT
//!     }
//! }
//!
//! let headers = Headers::build(|h| DNT.set(h, Dnt(true)));
//! assert_eq!(headers.get_str("dnt").unwrap().first(), "1");
//! assert_eq!(DNT.get(&headers).unwrap(), Some(Dnt(true)));
//! ```
//!
//! [`Headers`]: vellum_http_types::Headers

#![cfg_attr(docsrs, feature(doc_cfg))]
#![cfg_attr(not(test), warn(clippy::print_stdout, clippy::dbg_macro))]

mod error;
#[doc(inline)]
pub use error::Error;

mod header;
pub use header::{HeaderDecode, HeaderEncode, TypedHeader};

pub mod codec;
#[doc(inline)]
pub use codec::{Codec, CustomValue};

mod accessor;
pub use accessor::{Header, HeaderAccessor, HeaderMut, HeaderSource};

mod ext;
pub use ext::{HeadersExt, MutableHeadersExt};

pub mod accessors;

mod validate;
pub use validate::{ManagedHeader, ValidationMode, managed_headers, validate_headers};

pub use mime::Mime;

#[macro_use]
pub mod util;

mod common;
pub use self::common::*;

pub mod dep {
    //! dependencies vellum-http-headers

    pub use mime;
}
