//! vellum http header collections
//!
//! This crate holds the wire view of http headers: a case-insensitive,
//! multi-valued string map. [`Headers`] is the frozen, immutable map that is
//! shared between readers, [`MutableHeaders`] the consuming builder used to
//! produce a new [`Headers`] instance.
//!
//! Every [`Headers`] instance carries its own [`TypedCache`], a side table in
//! which typed header accessors store the result of their first decode.
//! The cache lives and dies with the instance it belongs to.
//!
//! ```
//! use vellum_http_types::{Headers, header};
//!
//! let headers = Headers::from_map([("Content-Length", ["42"])]).unwrap();
//! assert_eq!(headers.get(&header::CONTENT_LENGTH).unwrap().first(), "42");
//!
//! let updated = headers.transform(|h| {
//!     h.remove(&header::CONTENT_LENGTH);
//! });
//! assert!(headers.contains(&header::CONTENT_LENGTH));
//! assert!(!updated.contains(&header::CONTENT_LENGTH));
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![cfg_attr(not(test), warn(clippy::print_stdout, clippy::dbg_macro))]

pub mod header;
pub use header::HeaderName;

mod raw;
pub use raw::RawValues;

mod map;
pub use map::{Headers, MutableHeaders};

mod cache;
pub use cache::{CacheKey, LazyCacheKey, TypedCache};

mod error;
pub use error::{HeadersError, InvalidHeaderName, InvalidHeaderValue};

mod serde_impl;

pub mod dep {
    //! Dependencies for vellum http types.
    //!
    //! Exported for your convenience.

    pub mod http {
        //! Re-export of the [`http`] crate.
        //!
        //! Used for interop with [`http::HeaderMap`] based stacks.
        //!
        //! [`http`]: https://docs.rs/http

        #[doc(inline)]
        pub use http::*;
    }
}
