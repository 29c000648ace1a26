//! Utilities in service of vellum.

#[doc(inline)]
pub use ::vellum_utils::*;
