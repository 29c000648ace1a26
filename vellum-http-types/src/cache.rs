use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

/// Identifies one typed accessor inside a [`TypedCache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey(u64);

impl CacheKey {
    /// The raw id, useful for logging.
    #[must_use]
    pub fn id(self) -> u64 {
        self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

static NEXT_CACHE_KEY: AtomicU64 = AtomicU64::new(1);

/// A [`CacheKey`] that is allocated the first time it is asked for.
///
/// This allows accessors, which own one of these, to be `const`
/// constructed and live in a `static`. Zero marks "not yet allocated".
pub struct LazyCacheKey(AtomicU64);

impl LazyCacheKey {
    /// Create a new key, which is allocated on first use.
    #[must_use]
    pub const fn new() -> Self {
        Self(AtomicU64::new(0))
    }

    /// Get the key, allocating it if this is the first call.
    pub fn get(&self) -> CacheKey {
        let id = self.0.load(Ordering::Acquire);
        if id != 0 {
            return CacheKey(id);
        }
        let fresh = NEXT_CACHE_KEY.fetch_add(1, Ordering::Relaxed);
        match self
            .0
            .compare_exchange(0, fresh, Ordering::AcqRel, Ordering::Acquire)
        {
            Ok(_) => CacheKey(fresh),
            // another thread won the race, the fresh id is simply never used
            Err(existing) => CacheKey(existing),
        }
    }
}

impl Default for LazyCacheKey {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LazyCacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.load(Ordering::Acquire) {
            0 => f.write_str("LazyCacheKey(<unallocated>)"),
            id => write!(f, "LazyCacheKey(#{id})"),
        }
    }
}

/// Side table of decoded values owned by a single frozen header collection.
///
/// Entries are type-erased and keyed by the [`CacheKey`] of the accessor
/// that produced them. The first value stored for a key wins; later stores
/// for the same key are ignored, which is sound as long as the decoder is a
/// pure function of the (immutable) raw values.
#[derive(Default)]
pub struct TypedCache {
    entries: RwLock<HashMap<CacheKey, Arc<dyn Any + Send + Sync>, ahash::RandomState>>,
}

impl TypedCache {
    /// Get a clone of the cached value for `key`, if any.
    ///
    /// A value of another type than `T` is treated as a miss.
    #[must_use]
    pub fn get<T>(&self, key: CacheKey) -> Option<T>
    where
        T: Clone + 'static,
    {
        self.entries.read().get(&key)?.downcast_ref::<T>().cloned()
    }

    /// Store `value` for `key` unless a value is already present.
    ///
    /// Returns the value that is cached after the call, which is the
    /// existing one when this call lost the race.
    pub fn insert<T>(&self, key: CacheKey, value: T) -> T
    where
        T: Clone + Send + Sync + 'static,
    {
        let mut entries = self.entries.write();
        let entry = entries.entry(key).or_insert_with(|| Arc::new(value.clone()));
        entry.downcast_ref::<T>().cloned().unwrap_or(value)
    }

    /// Returns true if a value is cached for `key`.
    #[must_use]
    pub fn contains(&self, key: CacheKey) -> bool {
        self.entries.read().contains_key(&key)
    }

    /// Amount of cached entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl fmt::Debug for TypedCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedCache")
            .field("len", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lazy_cache_key_is_stable_and_unique() {
        static A: LazyCacheKey = LazyCacheKey::new();
        static B: LazyCacheKey = LazyCacheKey::new();

        let a = A.get();
        assert_eq!(a, A.get());
        assert_ne!(a, B.get());
        assert_ne!(a.id(), 0);
    }

    #[test]
    fn lazy_cache_key_race_converges() {
        static KEY: LazyCacheKey = LazyCacheKey::new();

        let ids: Vec<CacheKey> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..8).map(|_| s.spawn(|| KEY.get())).collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        assert!(ids.iter().all(|id| *id == ids[0]));
    }

    #[test]
    fn first_insert_wins() {
        let cache = TypedCache::default();
        let key = LazyCacheKey::new().get();

        assert_eq!(cache.get::<u64>(key), None);
        assert_eq!(cache.insert(key, 1u64), 1);
        assert_eq!(cache.insert(key, 2u64), 1);
        assert_eq!(cache.get::<u64>(key), Some(1));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn type_mismatch_is_a_miss() {
        let cache = TypedCache::default();
        let key = LazyCacheKey::new().get();

        cache.insert(key, String::from("gzip"));
        assert_eq!(cache.get::<u64>(key), None);
        assert_eq!(cache.get::<String>(key).as_deref(), Some("gzip"));
    }
}
