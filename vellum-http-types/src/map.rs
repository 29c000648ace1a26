use std::fmt;
use std::sync::{Arc, LazyLock};

use indexmap::IndexMap;

use crate::header::parse_header_name;
use crate::{HeaderName, HeadersError, RawValues, TypedCache};

pub(crate) type RawMap = IndexMap<HeaderName, RawValues, ahash::RandomState>;

/// An immutable, case-insensitive, multi-valued header map.
///
/// Cloning is cheap and shares the instance: clones are the *same* headers,
/// including the typed cache. Every change goes through a
/// [`MutableHeaders`] builder and produces a new, independent instance.
///
/// Names keep the order in which they were first inserted.
#[derive(Clone)]
pub struct Headers(Arc<Inner>);

struct Inner {
    map: RawMap,
    cache: TypedCache,
}

static EMPTY: LazyLock<Headers> = LazyLock::new(|| Headers::from_raw_map(RawMap::default()));

impl Headers {
    /// The shared empty header collection.
    #[must_use]
    pub fn empty() -> Self {
        EMPTY.clone()
    }

    pub(crate) fn from_raw_map(map: RawMap) -> Self {
        Self(Arc::new(Inner {
            map,
            cache: TypedCache::default(),
        }))
    }

    /// Build headers from raw `name -> values` pairs.
    ///
    /// Names are matched case-insensitively: pairs whose names only differ
    /// in case are merged, values appended in input order. Names with an
    /// empty value list are dropped.
    pub fn from_map<I, K, V>(map: I) -> Result<Self, HeadersError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: IntoIterator<Item: Into<String>>,
    {
        let mut headers = MutableHeaders::new();
        for (name, values) in map {
            let name = parse_header_name(name.as_ref())?;
            for value in values {
                headers.append(name.clone(), value)?;
            }
        }
        Ok(headers.freeze())
    }

    /// Start from the empty collection, let `f` fill it and freeze the result.
    pub fn build<F>(f: F) -> Self
    where
        F: FnOnce(&mut MutableHeaders),
    {
        Self::empty().transform(f)
    }

    /// Fallible version of [`Headers::build`].
    pub fn try_build<F, E>(f: F) -> Result<Self, E>
    where
        F: FnOnce(&mut MutableHeaders) -> Result<(), E>,
    {
        Self::empty().try_transform(f)
    }

    /// Copy these headers into a builder, let `f` modify it and freeze the
    /// result into a new instance. `self` is left untouched.
    #[must_use]
    pub fn transform<F>(&self, f: F) -> Self
    where
        F: FnOnce(&mut MutableHeaders),
    {
        let mut headers = self.to_mutable();
        f(&mut headers);
        headers.freeze()
    }

    /// Fallible version of [`Headers::transform`].
    pub fn try_transform<F, E>(&self, f: F) -> Result<Self, E>
    where
        F: FnOnce(&mut MutableHeaders) -> Result<(), E>,
    {
        let mut headers = self.to_mutable();
        f(&mut headers)?;
        Ok(headers.freeze())
    }

    /// Create a builder holding a copy of these headers.
    #[must_use]
    pub fn to_mutable(&self) -> MutableHeaders {
        MutableHeaders {
            map: self.0.map.clone(),
        }
    }

    /// Get the raw values of a header.
    #[must_use]
    pub fn get(&self, name: &HeaderName) -> Option<&RawValues> {
        self.0.map.get(name)
    }

    /// Get the raw values of a header by a name given as str, in any case.
    #[must_use]
    pub fn get_str(&self, name: &str) -> Option<&RawValues> {
        get_str(&self.0.map, name)
    }

    /// Returns true if the header is present.
    #[must_use]
    pub fn contains(&self, name: &HeaderName) -> bool {
        self.0.map.contains_key(name)
    }

    /// Amount of distinct header names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.map.len()
    }

    /// Returns true if there are no headers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.map.is_empty()
    }

    /// Iterate over `(name, values)` in insertion order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&HeaderName, &RawValues)> + '_ {
        self.0.map.iter()
    }

    /// Iterate over the header names in insertion order.
    pub fn names(&self) -> impl ExactSizeIterator<Item = &HeaderName> + '_ {
        self.0.map.keys()
    }

    /// Returns true if both values are the same instance.
    ///
    /// This is identity, not equality: two instances holding the same
    /// headers compare equal with `==` but are not `ptr_eq`.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// The typed cache owned by this instance.
    #[must_use]
    pub fn typed_cache(&self) -> &TypedCache {
        &self.0.cache
    }
}

impl Default for Headers {
    fn default() -> Self {
        Self::empty()
    }
}

impl PartialEq for Headers {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.0.map == other.0.map
    }
}

impl Eq for Headers {}

impl fmt::Debug for Headers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.0.map.iter()).finish()
    }
}

impl<'a> IntoIterator for &'a Headers {
    type Item = (&'a HeaderName, &'a RawValues);
    type IntoIter = indexmap::map::Iter<'a, HeaderName, RawValues>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.map.iter()
    }
}

/// A builder over a private copy of a header map.
///
/// Obtained from [`Headers::to_mutable`] (or implicitly through
/// [`Headers::build`] and [`Headers::transform`]) and consumed by
/// [`MutableHeaders::freeze`]. Because freezing takes the builder by value,
/// a frozen [`Headers`] can never be changed through a builder that
/// outlives it.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct MutableHeaders {
    map: RawMap,
}

impl MutableHeaders {
    /// An empty builder, the same as `Headers::empty().to_mutable()`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the raw values of a header.
    #[must_use]
    pub fn get(&self, name: &HeaderName) -> Option<&RawValues> {
        self.map.get(name)
    }

    /// Get the raw values of a header by a name given as str, in any case.
    #[must_use]
    pub fn get_str(&self, name: &str) -> Option<&RawValues> {
        get_str(&self.map, name)
    }

    /// Replace the values of a header, returning the previous ones.
    pub fn insert(&mut self, name: HeaderName, values: RawValues) -> Option<RawValues> {
        self.map.insert(name, values)
    }

    /// Replace the values of a header, or remove it when `values` is `None`.
    pub fn set(&mut self, name: HeaderName, values: Option<RawValues>) {
        match values {
            Some(values) => {
                self.map.insert(name, values);
            }
            None => {
                self.map.shift_remove(&name);
            }
        }
    }

    /// Raw write by name given as str.
    ///
    /// An empty list of values removes the header.
    pub fn set_str<I>(&mut self, name: &str, values: I) -> Result<(), HeadersError>
    where
        I: IntoIterator<Item: Into<String>>,
    {
        let name = parse_header_name(name)?;
        let values = RawValues::try_from_iter(values)?;
        self.set(name, values);
        Ok(())
    }

    /// Append a value to a header, adding the header if absent.
    pub fn append(
        &mut self,
        name: HeaderName,
        value: impl Into<String>,
    ) -> Result<(), HeadersError> {
        match self.map.get_mut(&name) {
            Some(values) => values.push(value)?,
            None => {
                self.map.insert(name, RawValues::new(value)?);
            }
        }
        Ok(())
    }

    /// Remove a header, returning its values.
    pub fn remove(&mut self, name: &HeaderName) -> Option<RawValues> {
        self.map.shift_remove(name)
    }

    /// Returns true if the header is present.
    #[must_use]
    pub fn contains(&self, name: &HeaderName) -> bool {
        self.map.contains_key(name)
    }

    /// Amount of distinct header names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns true if there are no headers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Iterate over `(name, values)` in insertion order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&HeaderName, &RawValues)> + '_ {
        self.map.iter()
    }

    /// Remove all headers.
    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// Consume the builder into a new, immutable [`Headers`] instance.
    #[must_use]
    pub fn freeze(self) -> Headers {
        Headers::from_raw_map(self.map)
    }
}

impl fmt::Debug for MutableHeaders {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.map.iter()).finish()
    }
}

impl From<Headers> for MutableHeaders {
    fn from(headers: Headers) -> Self {
        headers.to_mutable()
    }
}

impl From<MutableHeaders> for Headers {
    fn from(headers: MutableHeaders) -> Self {
        headers.freeze()
    }
}

fn get_str<'a>(map: &'a RawMap, name: &str) -> Option<&'a RawValues> {
    let name = parse_header_name(name).ok()?;
    map.get(&name)
}

impl TryFrom<&http::HeaderMap> for Headers {
    type Error = HeadersError;

    fn try_from(map: &http::HeaderMap) -> Result<Self, Self::Error> {
        let mut headers = MutableHeaders::new();
        for (name, value) in map {
            let value = std::str::from_utf8(value.as_bytes())
                .map_err(|err| crate::InvalidHeaderValue::new(err.valid_up_to()))?;
            headers.append(name.clone(), value)?;
        }
        Ok(headers.freeze())
    }
}

impl From<&Headers> for http::HeaderMap {
    fn from(headers: &Headers) -> Self {
        let mut map = Self::with_capacity(headers.len());
        for (name, values) in headers {
            for value in values {
                match http::HeaderValue::from_str(value) {
                    Ok(value) => {
                        map.append(name.clone(), value);
                    }
                    Err(err) => {
                        tracing::debug!(
                            header.name = %name,
                            "skip header value that http::HeaderValue rejects: {err}"
                        );
                    }
                }
            }
        }
        map
    }
}
