use vellum_http_types::{HeaderName, HeadersError, MutableHeaders};

use crate::accessor::HeaderSource;
use crate::codec::CustomValue;
use crate::{Error, TypedHeader};

/// Typed reads on a header collection.
pub trait HeadersExt: HeaderSource {
    /// Read a typed header, `None` if absent or invalid.
    fn typed_get<H: TypedHeader>(&self) -> Option<H>
    where
        Self: Sized,
    {
        H::accessor().get_or_none_if_invalid(self)
    }

    /// Read a typed header, `Ok(None)` if absent.
    fn typed_try_get<H: TypedHeader>(&self) -> Result<Option<H>, Error>
    where
        Self: Sized,
    {
        H::accessor().get(self)
    }

    /// Returns true if the header of `H` is present, valid or not.
    fn typed_contains<H: TypedHeader>(&self) -> bool
    where
        Self: Sized,
    {
        H::accessor().is_set(self)
    }
}

impl<S: HeaderSource> HeadersExt for S {}

/// Typed writes on a header builder.
pub trait MutableHeadersExt {
    /// Write a typed header, replacing any previous value.
    fn typed_insert<H: TypedHeader>(&mut self, header: H);

    /// Remove a typed header, returns true if it was present.
    fn typed_remove<H: TypedHeader>(&mut self) -> bool;

    /// Write a header without dedicated type, `None` removes it.
    fn set_custom(
        &mut self,
        name: HeaderName,
        value: Option<CustomValue>,
    ) -> Result<(), HeadersError>;
}

impl MutableHeadersExt for MutableHeaders {
    fn typed_insert<H: TypedHeader>(&mut self, header: H) {
        H::accessor().insert(self, header);
    }

    fn typed_remove<H: TypedHeader>(&mut self) -> bool {
        H::accessor().remove(self)
    }

    fn set_custom(
        &mut self,
        name: HeaderName,
        value: Option<CustomValue>,
    ) -> Result<(), HeadersError> {
        CustomValue::write(value.as_ref(), self, name)
    }
}
