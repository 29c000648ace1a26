//! Error utilities for vellum.
//!
//! Header grammars fail a lot, and most of those failures are only interesting
//! as a reason attached to a higher level error (e.g. "invalid `Cache-Control`
//! header"). This crate provides the small toolkit used for that:
//!
//! - [`BoxError`]: the type-erased error every fallible grammar can convert into;
//! - [`OpaqueError`]: a concrete wrapper around [`BoxError`] that still allows downcasting;
//! - [`ErrorContext`]: attach a (lazy) message to a `Result` or `Option`.
//!
//! ```
//! use vellum_error::{ErrorContext, OpaqueError};
//!
//! fn parse_port(s: &str) -> Result<u16, OpaqueError> {
//!     s.parse::<u16>().context("parse port as u16")
//! }
//!
//! let err = parse_port("http").unwrap_err();
//! assert!(err.to_string().starts_with("parse port as u16"));
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]

use std::fmt::{self, Debug, Display};

mod context;
pub use context::{ErrorContext, ErrorExt};

/// Alias for a type-erased error type.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[repr(transparent)]
/// A type-erased error type that still allows
/// the caller to inspect the original error.
pub struct OpaqueError(BoxError);

impl OpaqueError {
    /// create an [`OpaqueError`] from an std error
    pub fn from_std(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self(Box::new(error))
    }

    /// create an [`OpaqueError`] from a display object
    pub fn from_display(msg: impl Display + Debug + Send + Sync + 'static) -> Self {
        Self::from_std(MessageError(msg))
    }

    /// create an [`OpaqueError`] from a boxed error
    #[must_use]
    pub fn from_boxed(inner: BoxError) -> Self {
        Self(inner)
    }

    /// Returns true if the underlying error is of type `T`.
    #[must_use]
    pub fn is<T>(&self) -> bool
    where
        T: std::error::Error + 'static,
    {
        self.0.is::<T>()
    }

    /// Consumes the [`OpaqueError`] and returns it as a [`BoxError`].
    #[must_use]
    pub fn into_boxed(self) -> BoxError {
        self.0
    }

    /// Attempts to downcast the error to the concrete type `T`.
    pub fn downcast<T>(self) -> Result<T, Self>
    where
        T: std::error::Error + 'static,
    {
        match self.0.downcast::<T>() {
            Ok(error) => Ok(*error),
            Err(inner) => Err(Self(inner)),
        }
    }

    /// Attempts to downcast the error to a shared reference
    /// of the concrete type `T`.
    #[must_use]
    pub fn downcast_ref<T>(&self) -> Option<&T>
    where
        T: std::error::Error + 'static,
    {
        self.0.downcast_ref()
    }
}

impl Debug for OpaqueError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        Debug::fmt(&self.0, f)
    }
}

impl Display for OpaqueError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl std::error::Error for OpaqueError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl From<BoxError> for OpaqueError {
    fn from(error: BoxError) -> Self {
        Self(error)
    }
}

#[repr(transparent)]
/// An error type that wraps a message.
pub(crate) struct MessageError<M>(pub(crate) M);

impl<M: Debug> Debug for MessageError<M> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        Debug::fmt(&self.0, f)
    }
}

impl<M: Display> Display for MessageError<M> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl<M> std::error::Error for MessageError<M> where M: Display + Debug + 'static {}

#[cfg(test)]
mod tests {
    use std::num::ParseIntError;

    use super::*;

    fn parse_age(s: &str) -> Result<u64, OpaqueError> {
        s.parse::<u64>().map_err(OpaqueError::from_std)
    }

    #[test]
    fn keeps_the_concrete_error() {
        let err = parse_age("-1").unwrap_err();
        assert!(err.is::<ParseIntError>());
        assert!(err.downcast_ref::<ParseIntError>().is_some());
        assert!(err.downcast::<ParseIntError>().is_ok());
    }

    #[test]
    fn message_errors_only_display() {
        let err = OpaqueError::from_display("empty list");
        assert!(!err.is::<ParseIntError>());
        let err = err.downcast::<ParseIntError>().unwrap_err();
        assert_eq!(err.to_string(), "empty list");
        assert_eq!(format!("{err:?}"), "\"empty list\"");
    }

    #[test]
    fn boxed_round_trip() {
        let boxed: BoxError = "x".parse::<u8>().unwrap_err().into();
        let err = OpaqueError::from(boxed);
        assert!(err.into_boxed().is::<ParseIntError>());
    }
}
