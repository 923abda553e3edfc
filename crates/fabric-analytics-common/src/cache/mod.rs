use std::hash::Hash;
use std::time::{Duration, Instant};

use moka::sync::Cache;

/// A value with a hard deadline. The value is only handed out while more than
/// `margin` remains before the deadline, so a caller never receives something
/// that expires while it is still being used.
#[derive(Clone, Debug)]
struct Expiring<T> {
    expires_at: Instant,
    value: T,
}

impl<T> Expiring<T> {
    fn new(value: T, lifetime: Duration) -> Self {
        Self {
            expires_at: Instant::now() + lifetime,
            value,
        }
    }

    fn is_usable(&self, margin: Duration) -> bool {
        Instant::now() + margin < self.expires_at
    }
}

/// Small concurrent cache of values that carry their own lifetime, such as
/// access tokens. Lookups never return a value within `margin` of its expiry.
#[derive(Clone)]
pub struct ExpiringCache<K, V> {
    cache: Cache<K, Expiring<V>>,
    margin: Duration,
}

impl<K, V> ExpiringCache<K, V>
where
    K: 'static + Eq + Hash + Send + Sync,
    V: 'static + Clone + Send + Sync,
{
    pub fn new(capacity: u64, margin: Duration) -> Self {
        Self {
            cache: Cache::new(capacity),
            margin,
        }
    }

    pub fn get(&self, key: &K) -> Option<V> {
        self.cache.get(key).filter(|x| x.is_usable(self.margin)).map(|x| x.value)
    }

    pub fn insert(&self, key: K, value: V, lifetime: Duration) {
        self.cache.insert(key, Expiring::new(value, lifetime));
    }

    pub fn invalidate(&self, key: &K) {
        self.cache.invalidate(key);
    }
}
