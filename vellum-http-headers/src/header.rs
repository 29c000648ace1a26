use vellum_error::OpaqueError;
use vellum_http_types::HeaderName;

use crate::HeaderAccessor;

/// A type that can be decoded from the raw values of a header.
pub trait HeaderDecode: Sized {
    /// Decode this type from the raw values, in order.
    ///
    /// The iterator yields at least one value when called by an accessor.
    fn decode<'i, I>(values: &mut I) -> Result<Self, OpaqueError>
    where
        I: Iterator<Item = &'i str>;
}

/// A type that can be encoded into raw header values.
pub trait HeaderEncode {
    /// Encode this value and add the result to `values`.
    ///
    /// This function should be infallible. Anything that would produce an
    /// invalid value should have been rejected when constructing `self`.
    fn encode<E: Extend<String>>(&self, values: &mut E);

    /// Encode this value into a single string, joining multiple values
    /// with `", "`.
    fn encode_to_string(&self) -> String {
        let mut values = Vec::new();
        self.encode(&mut values);
        values.join(", ")
    }
}

/// A header type with a statically known name and accessor.
///
/// This is what makes [`HeadersExt::typed_get`] and friends work.
///
/// [`HeadersExt::typed_get`]: crate::HeadersExt::typed_get
pub trait TypedHeader: HeaderDecode + HeaderEncode + Clone + Send + Sync + 'static {
    /// The static accessor for this header.
    fn accessor() -> &'static HeaderAccessor<Self>;

    /// The name of this header.
    fn name() -> &'static HeaderName {
        Self::accessor().name()
    }
}
