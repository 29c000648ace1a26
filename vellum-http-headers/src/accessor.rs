//! Typed access to one named header on any header collection.

use std::fmt;

use vellum_error::OpaqueError;
use vellum_http_types::{
    CacheKey, HeaderName, Headers, InvalidHeaderValue, LazyCacheKey, MutableHeaders, RawValues,
    TypedCache,
};

use crate::Error;
use crate::codec::Codec;

/// A header collection a [`HeaderAccessor`] can read from.
///
/// Implemented for [`Headers`], which caches decoded values, and for
/// [`MutableHeaders`], which does not.
pub trait HeaderSource: private::Sealed {
    /// The raw values of `name`, `None` if absent.
    fn raw_values(&self, name: &HeaderName) -> Option<&RawValues>;

    /// The cache of decoded values, if this collection has one.
    fn typed_cache(&self) -> Option<&TypedCache>;
}

impl HeaderSource for Headers {
    fn raw_values(&self, name: &HeaderName) -> Option<&RawValues> {
        self.get(name)
    }

    fn typed_cache(&self) -> Option<&TypedCache> {
        Some(Self::typed_cache(self))
    }
}

impl HeaderSource for MutableHeaders {
    fn raw_values(&self, name: &HeaderName) -> Option<&RawValues> {
        self.get(name)
    }

    // the builder is still changing, nothing read from it can be trusted later
    fn typed_cache(&self) -> Option<&TypedCache> {
        None
    }
}

mod private {
    pub trait Sealed {}

    impl Sealed for vellum_http_types::Headers {}
    impl Sealed for vellum_http_types::MutableHeaders {}
}

/// Binds a header name to a [`Codec`].
///
/// An accessor is the only thing that knows how to read, write, validate
/// and remove *this* header, on any header collection. Accessors are meant
/// to be declared once, as `static` items:
///
/// ```
/// use vellum_http_headers::{HeaderAccessor, codec};
/// use vellum_http_types::{HeaderName, Headers};
///
/// static REQUEST_ID: HeaderAccessor<String> =
///     HeaderAccessor::new(HeaderName::from_static("x-request-id"), codec::TEXT);
///
/// let headers = Headers::build(|h| REQUEST_ID.set(h, "abc".to_owned()));
/// assert_eq!(REQUEST_ID.get(&headers).unwrap().as_deref(), Some("abc"));
/// ```
///
/// Reading from a frozen [`Headers`] caches the decoded value in that
/// instance, so the decoder runs at most once per accessor and instance.
/// The cache lives and dies with the instance.
pub struct HeaderAccessor<T> {
    name: HeaderName,
    codec: Codec<T>,
    key: LazyCacheKey,
}

impl<T> HeaderAccessor<T> {
    /// Create an accessor for the header `name`.
    #[must_use]
    pub const fn new(name: HeaderName, codec: Codec<T>) -> Self {
        Self {
            name,
            codec,
            key: LazyCacheKey::new(),
        }
    }

    /// The header name.
    #[must_use]
    pub fn name(&self) -> &HeaderName {
        &self.name
    }

    /// The codec.
    #[must_use]
    pub fn codec(&self) -> Codec<T> {
        self.codec
    }

    /// The key under which this accessor caches decoded values.
    pub fn cache_key(&self) -> CacheKey {
        self.key.get()
    }

    /// Returns true if the header is present, valid or not.
    pub fn is_set<S: HeaderSource>(&self, headers: &S) -> bool {
        headers.raw_values(&self.name).is_some()
    }

    /// Decode raw values with this accessor's codec, without caching.
    pub fn decode_raw(&self, values: &RawValues) -> Result<T, Error> {
        self.codec.decode(values).map_err(|err| {
            tracing::debug!(header = %self.name, "failed to decode typed header: {err}");
            Error::invalid(self.name.clone(), err)
        })
    }

    /// Encode a value with this accessor's codec.
    ///
    /// `Ok(None)` means the value encodes to nothing, which removes the
    /// header when written.
    pub fn encode_value(&self, value: &T) -> Result<Option<RawValues>, InvalidHeaderValue> {
        RawValues::try_from_iter(self.codec.encode(value))
    }

    /// Write `value` into `headers`, `None` removes the header.
    ///
    /// Fails if the encoded value is not a valid raw header value.
    pub fn try_set(
        &self,
        headers: &mut MutableHeaders,
        value: impl Into<Option<T>>,
    ) -> Result<(), Error> {
        let values = match value.into() {
            Some(value) => self
                .encode_value(&value)
                .map_err(|err| Error::invalid(self.name.clone(), OpaqueError::from_std(err)))?,
            None => None,
        };
        headers.set(self.name.clone(), values);
        Ok(())
    }

    /// Write `value` into `headers`, `None` removes the header.
    ///
    /// A value that can not be encoded into a valid raw value removes the
    /// header as well; use [`try_set`](Self::try_set) to observe that.
    pub fn set(&self, headers: &mut MutableHeaders, value: impl Into<Option<T>>) {
        if let Err(err) = self.try_set(headers, value) {
            tracing::debug!(header = %self.name, "failed to encode typed header: {err}");
            headers.remove(&self.name);
        }
    }

    /// Write `value` into `headers`.
    pub fn insert(&self, headers: &mut MutableHeaders, value: T) {
        self.set(headers, Some(value));
    }

    /// Remove the header, returns true if it was present.
    pub fn remove(&self, headers: &mut MutableHeaders) -> bool {
        headers.remove(&self.name).is_some()
    }

    /// A read view of this header on `headers`.
    pub fn header<'a, S: HeaderSource>(&'a self, headers: &'a S) -> Header<'a, T, S> {
        Header {
            accessor: self,
            headers,
        }
    }

    /// A read-write view of this header on `headers`.
    pub fn header_mut<'a>(&'a self, headers: &'a mut MutableHeaders) -> HeaderMut<'a, T> {
        HeaderMut {
            accessor: self,
            headers,
        }
    }
}

impl<T: Clone + Send + Sync + 'static> HeaderAccessor<T> {
    /// Read the header.
    ///
    /// `Ok(None)` if absent, an [`Error`] if present but invalid. Failures
    /// are never cached.
    pub fn get<S: HeaderSource>(&self, headers: &S) -> Result<Option<T>, Error> {
        let Some(values) = headers.raw_values(&self.name) else {
            return Ok(None);
        };
        let Some(cache) = headers.typed_cache() else {
            return self.decode_raw(values).map(Some);
        };

        let key = self.key.get();
        if let Some(value) = cache.get::<T>(key) {
            tracing::trace!(header = %self.name, %key, "typed header cache hit");
            return Ok(Some(value));
        }
        tracing::trace!(header = %self.name, %key, "typed header cache miss");
        let value = self.decode_raw(values)?;
        Ok(Some(cache.insert(key, value)))
    }

    /// Read the header, handing an invalid value to `fallback` instead of
    /// failing.
    pub fn get_or_else<S, F>(&self, headers: &S, fallback: F) -> Option<T>
    where
        S: HeaderSource,
        F: FnOnce(Error) -> Option<T>,
    {
        self.get(headers).unwrap_or_else(fallback)
    }

    /// Read the header, treating an invalid value as absent.
    pub fn get_or_none_if_invalid<S: HeaderSource>(&self, headers: &S) -> Option<T> {
        self.get_or_else(headers, |_| None)
    }

    /// Read a header that must be present.
    pub fn require<S: HeaderSource>(&self, headers: &S) -> Result<T, Error> {
        self.get(headers)?
            .ok_or_else(|| Error::missing(self.name.clone()))
    }

    /// Returns true if reading would not fail; an absent header is valid.
    pub fn is_valid<S: HeaderSource>(&self, headers: &S) -> bool {
        self.get(headers).is_ok()
    }
}

impl<T> fmt::Debug for HeaderAccessor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeaderAccessor")
            .field("name", &self.name)
            .field("codec", &self.codec)
            .field("key", &self.key)
            .finish()
    }
}

/// A short-lived pairing of one accessor with one header collection.
pub struct Header<'a, T, S = Headers> {
    accessor: &'a HeaderAccessor<T>,
    headers: &'a S,
}

impl<'a, T, S: HeaderSource> Header<'a, T, S> {
    /// The header name.
    #[must_use]
    pub fn name(&self) -> &'a HeaderName {
        self.accessor.name()
    }

    /// The raw values, `None` if absent.
    #[must_use]
    pub fn raw(&self) -> Option<&'a RawValues> {
        self.headers.raw_values(self.accessor.name())
    }

    /// Returns true if the header is present, valid or not.
    #[must_use]
    pub fn is_set(&self) -> bool {
        self.accessor.is_set(self.headers)
    }
}

impl<T: Clone + Send + Sync + 'static, S: HeaderSource> Header<'_, T, S> {
    /// Returns true if the header is absent or valid.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.accessor.is_valid(self.headers)
    }

    /// The value, failing if absent or invalid.
    pub fn value(&self) -> Result<T, Error> {
        self.accessor.require(self.headers)
    }

    /// The value, `None` if absent, failing if invalid.
    pub fn value_or_none(&self) -> Result<Option<T>, Error> {
        self.accessor.get(self.headers)
    }

    /// The value, `None` if absent or invalid.
    #[must_use]
    pub fn value_or_none_if_invalid(&self) -> Option<T> {
        self.accessor.get_or_none_if_invalid(self.headers)
    }
}

impl<T, S> Clone for Header<'_, T, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, S> Copy for Header<'_, T, S> {}

impl<T, S: fmt::Debug> fmt::Debug for Header<'_, T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Header")
            .field("accessor", self.accessor)
            .field("headers", self.headers)
            .finish()
    }
}

/// A short-lived pairing of one accessor with a header builder.
pub struct HeaderMut<'a, T> {
    accessor: &'a HeaderAccessor<T>,
    headers: &'a mut MutableHeaders,
}

impl<T> HeaderMut<'_, T> {
    /// The read view of this header.
    pub fn as_header(&self) -> Header<'_, T, MutableHeaders> {
        self.accessor.header(&*self.headers)
    }

    /// Returns true if the header is present, valid or not.
    #[must_use]
    pub fn is_set(&self) -> bool {
        self.accessor.is_set(&*self.headers)
    }

    /// Write `value`, `None` removes the header.
    pub fn set(&mut self, value: impl Into<Option<T>>) {
        self.accessor.set(self.headers, value);
    }

    /// Write `value`, failing if it can not be encoded.
    pub fn try_set(&mut self, value: impl Into<Option<T>>) -> Result<(), Error> {
        self.accessor.try_set(self.headers, value)
    }

    /// Remove the header, returns true if it was present.
    pub fn remove(&mut self) -> bool {
        self.accessor.remove(self.headers)
    }
}

impl<T: Clone + Send + Sync + 'static> HeaderMut<'_, T> {
    /// The current value, `None` if absent, failing if invalid.
    pub fn value_or_none(&self) -> Result<Option<T>, Error> {
        self.accessor.get(&*self.headers)
    }
}

impl<T> fmt::Debug for HeaderMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeaderMut")
            .field("accessor", self.accessor)
            .field("headers", &self.headers)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use vellum_http_types::header;

    use super::*;
    use crate::codec::{self, Decode, Encode};

    static CONTENT_LENGTH: HeaderAccessor<u64> = HeaderAccessor::new(header::CONTENT_LENGTH, codec::U64);

    fn headers(pairs: &[(&str, &[&str])]) -> Headers {
        Headers::from_map(pairs.iter().map(|(k, v)| (*k, v.to_vec()))).unwrap()
    }

    #[test]
    fn absent_invalid_and_valid() {
        let empty = Headers::empty();
        assert_eq!(CONTENT_LENGTH.get(&empty).unwrap(), None);
        assert!(!CONTENT_LENGTH.is_set(&empty));
        assert!(CONTENT_LENGTH.is_valid(&empty));
        assert!(CONTENT_LENGTH.require(&empty).unwrap_err().is_missing());

        let invalid = headers(&[("content-length", &["nope"])]);
        assert!(CONTENT_LENGTH.is_set(&invalid));
        assert!(!CONTENT_LENGTH.is_valid(&invalid));
        let err = CONTENT_LENGTH.get(&invalid).unwrap_err();
        assert!(err.is_invalid());
        assert_eq!(err.header_name(), &header::CONTENT_LENGTH);
        assert_eq!(CONTENT_LENGTH.get_or_none_if_invalid(&invalid), None);
        assert_eq!(CONTENT_LENGTH.get_or_else(&invalid, |_| Some(0)), Some(0));

        let valid = headers(&[("Content-Length", &["42"])]);
        assert_eq!(CONTENT_LENGTH.get(&valid).unwrap(), Some(42));
        assert_eq!(CONTENT_LENGTH.require(&valid).unwrap(), 42);
        assert_eq!(CONTENT_LENGTH.get_or_else(&valid, |_| Some(0)), Some(42));
    }

    #[test]
    fn set_and_remove() {
        let headers = Headers::build(|h| CONTENT_LENGTH.set(h, 42_u64));
        assert_eq!(CONTENT_LENGTH.get(&headers).unwrap(), Some(42));

        let cleared = headers.transform(|h| CONTENT_LENGTH.set(h, None));
        assert!(!CONTENT_LENGTH.is_set(&cleared));
        assert!(CONTENT_LENGTH.is_set(&headers));

        let mut builder = headers.to_mutable();
        assert!(CONTENT_LENGTH.remove(&mut builder));
        assert!(!CONTENT_LENGTH.remove(&mut builder));
    }

    static DECODES: AtomicUsize = AtomicUsize::new(0);

    fn counting_decode(value: &str) -> Result<String, OpaqueError> {
        DECODES.fetch_add(1, Ordering::SeqCst);
        Ok(value.to_owned())
    }

    static COUNTED: HeaderAccessor<String> = HeaderAccessor::new(
        HeaderName::from_static("x-counted"),
        Codec::new(Decode::Single(counting_decode), Encode::Single(String::clone)),
    );

    #[test]
    fn frozen_reads_are_cached_builder_reads_are_not() {
        let headers = headers(&[("x-counted", &["v"])]);
        let before = DECODES.load(Ordering::SeqCst);
        assert_eq!(COUNTED.get(&headers).unwrap().as_deref(), Some("v"));
        assert_eq!(COUNTED.get(&headers).unwrap().as_deref(), Some("v"));
        assert_eq!(DECODES.load(Ordering::SeqCst) - before, 1);
        assert!(headers.typed_cache().contains(COUNTED.cache_key()));

        let builder = headers.to_mutable();
        let before = DECODES.load(Ordering::SeqCst);
        COUNTED.get(&builder).unwrap();
        COUNTED.get(&builder).unwrap();
        assert_eq!(DECODES.load(Ordering::SeqCst) - before, 2);
    }

    #[test]
    fn failures_are_not_cached() {
        let invalid = headers(&[("content-length", &["-1"])]);
        assert!(CONTENT_LENGTH.get(&invalid).is_err());
        assert!(!invalid.typed_cache().contains(CONTENT_LENGTH.cache_key()));
    }

    #[test]
    fn invalid_encoding_removes_or_fails() {
        static TEXT: HeaderAccessor<String> =
            HeaderAccessor::new(HeaderName::from_static("x-text"), codec::TEXT);

        let mut builder = MutableHeaders::new();
        TEXT.set(&mut builder, "ok".to_owned());
        TEXT.set(&mut builder, "bad\r\nvalue".to_owned());
        assert!(!TEXT.is_set(&builder));

        let err = TEXT
            .try_set(&mut builder, "bad\0".to_owned())
            .unwrap_err();
        assert!(err.is_invalid());
    }

    #[test]
    fn views() {
        let headers = headers(&[("content-length", &["7"])]);
        let view = CONTENT_LENGTH.header(&headers);
        assert!(view.is_set());
        assert!(view.is_valid());
        assert_eq!(view.value().unwrap(), 7);
        assert_eq!(view.value_or_none().unwrap(), Some(7));
        assert_eq!(view.raw().unwrap().first(), "7");
        assert_eq!(view.name(), &header::CONTENT_LENGTH);

        let empty = Headers::empty();
        let view = CONTENT_LENGTH.header(&empty);
        assert!(view.value().unwrap_err().is_missing());
        assert_eq!(view.value_or_none().unwrap(), None);

        let mut builder = MutableHeaders::new();
        let mut view = CONTENT_LENGTH.header_mut(&mut builder);
        view.set(1_u64);
        assert_eq!(view.value_or_none().unwrap(), Some(1));
        assert!(view.as_header().is_valid());
        assert!(view.remove());
        assert!(!view.is_set());
    }
}
