//! Error types for vellum.
//!
//! See [`vellum_error`] for the details, and
//! [`http::headers::Error`](crate::http::headers::Error) for the errors of
//! typed header access.

#[doc(inline)]
pub use ::vellum_error::*;
