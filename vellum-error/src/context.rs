use std::fmt::{self, Debug, Display};

use crate::{BoxError, MessageError, OpaqueError};

/// Attach a human readable context to a failure.
///
/// Implemented for `Result<T, E>` (with `E` convertible into a [`BoxError`])
/// and for `Option<T>` (where `None` becomes an error with the context as message).
pub trait ErrorContext: private::Sealed {
    /// The value type contained in the result or option.
    type Value;

    /// Wrap the failure with the given context.
    fn context<M>(self, context: M) -> Result<Self::Value, OpaqueError>
    where
        M: Display + Debug + Send + Sync + 'static;

    /// Wrap the failure with a context produced only when the failure happened.
    fn with_context<M, F>(self, context: F) -> Result<Self::Value, OpaqueError>
    where
        M: Display + Debug + Send + Sync + 'static,
        F: FnOnce() -> M;
}

impl<T, E> ErrorContext for Result<T, E>
where
    E: Into<BoxError>,
{
    type Value = T;

    fn context<M>(self, context: M) -> Result<T, OpaqueError>
    where
        M: Display + Debug + Send + Sync + 'static,
    {
        self.map_err(|error| error.context(context))
    }

    fn with_context<M, F>(self, context: F) -> Result<T, OpaqueError>
    where
        M: Display + Debug + Send + Sync + 'static,
        F: FnOnce() -> M,
    {
        self.map_err(|error| error.context(context()))
    }
}

impl<T> ErrorContext for Option<T> {
    type Value = T;

    fn context<M>(self, context: M) -> Result<T, OpaqueError>
    where
        M: Display + Debug + Send + Sync + 'static,
    {
        self.ok_or_else(|| OpaqueError::from_display(context))
    }

    fn with_context<M, F>(self, context: F) -> Result<T, OpaqueError>
    where
        M: Display + Debug + Send + Sync + 'static,
        F: FnOnce() -> M,
    {
        self.ok_or_else(|| OpaqueError::from_display(context()))
    }
}

/// Extends any error convertible into a [`BoxError`].
pub trait ErrorExt: private::SealedError {
    /// Wrap this error with the given context.
    fn context<M>(self, context: M) -> OpaqueError
    where
        M: Display + Debug + Send + Sync + 'static;

    /// Turn this error into an [`OpaqueError`].
    fn into_opaque(self) -> OpaqueError;
}

impl<E> ErrorExt for E
where
    E: Into<BoxError>,
{
    fn context<M>(self, context: M) -> OpaqueError
    where
        M: Display + Debug + Send + Sync + 'static,
    {
        OpaqueError::from_std(ContextError {
            context: MessageError(context),
            source: self.into(),
        })
    }

    fn into_opaque(self) -> OpaqueError {
        OpaqueError::from_boxed(self.into())
    }
}

struct ContextError<M> {
    context: MessageError<M>,
    source: BoxError,
}

impl<M: Debug> Debug for ContextError<M> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("ContextError")
            .field("context", &self.context)
            .field("source", &self.source)
            .finish()
    }
}

impl<M: Display> Display for ContextError<M> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.context, self.source)
    }
}

impl<M> std::error::Error for ContextError<M>
where
    M: Display + Debug + 'static,
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.source.as_ref())
    }
}

mod private {
    pub trait Sealed {}

    impl<T, E> Sealed for Result<T, E> {}
    impl<T> Sealed for Option<T> {}

    pub trait SealedError {}

    impl<E: Into<super::BoxError>> SealedError for E {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_context() {
        let err = None::<u8>.context("missing value").unwrap_err();
        assert_eq!(err.to_string(), "missing value");
        assert_eq!(Some(1u8).context("missing value").unwrap(), 1);
    }

    #[test]
    fn result_context_keeps_source() {
        let err = "x".parse::<u8>().context("parse digit").unwrap_err();
        let msg = err.to_string();
        assert!(msg.starts_with("parse digit: "), "{msg}");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn with_context_is_lazy() {
        let mut called = false;
        let value: Result<u8, OpaqueError> = Ok::<u8, BoxError>(3).with_context(|| {
            called = true;
            "never"
        });
        assert_eq!(value.unwrap(), 3);
        assert!(!called);
    }
}
