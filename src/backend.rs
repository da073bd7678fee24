/*!
The storage substrate the engine is built on.

[`Storage`] is the only interface the engine depends on for persistence; it
knows nothing about expiry or eviction — those are the engine's job. A
single `Storage` implementation can back any number of logically separate
caches, distinguished by the `name` argument threaded through every method.

[`MemoryBackend`] is a reference, in-process implementation shipped so the
engine is usable without a caller supplying their own adapter, and so the
conformance tests in this crate have something concrete to run.
*/

use std::collections::HashMap;
use std::convert::Infallible;
use std::hash::Hash;

use async_trait::async_trait;

use crate::entry::Entry;

/// The storage interface the cache engine consumes.
///
/// Implementations are free to be as simple as an in-memory `HashMap` or as
/// involved as a networked KV store; every method is `async` so that the
/// engine never assumes a particular backend can answer without suspending.
#[async_trait]
pub trait Storage<K, V>: Send + Sync
where
    K: Clone + Send + Sync,
    V: Clone + Send + Sync,
{
    /// The error type this backend's operations can fail with.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Number of entries currently stored for `name`, expired or not.
    async fn size(&self, name: &str) -> Result<usize, Self::Error>;

    /// Whether `key` is stored for `name`. Does not consult expiry.
    async fn contains_key(&self, name: &str, key: &K) -> Result<bool, Self::Error>;

    /// The full entry record for `key`, if stored. Does not consult expiry.
    async fn get_entry(&self, name: &str, key: &K) -> Result<Option<Entry<V>>, Self::Error>;

    /// Unconditionally inserts or replaces the entry for `key`.
    async fn put_entry(&self, name: &str, key: K, entry: Entry<V>) -> Result<(), Self::Error>;

    /// Deletes `key`; a no-op if it is not stored.
    async fn remove(&self, name: &str, key: &K) -> Result<(), Self::Error>;

    /// Removes every entry stored for `name`.
    async fn clear(&self, name: &str) -> Result<(), Self::Error>;

    /// All keys currently stored for `name`.
    async fn keys(&self, name: &str) -> Result<Vec<K>, Self::Error>;

    /// All entries currently stored for `name`, used by full-scan sampling.
    async fn values(&self, name: &str) -> Result<Vec<Entry<V>>, Self::Error>;
}

/// An in-memory, in-process [`Storage`] implementation.
///
/// Keeps one `HashMap<K, Entry<V>>` per cache name behind a
/// [`parking_lot::Mutex`]; every operation resolves immediately (there is
/// nothing to suspend on), mirroring how `jaemk-cached`'s `UnboundCache`
/// wraps a plain `HashMap`. Its `Error` type is [`Infallible`]: nothing here
/// can fail.
#[derive(Debug)]
pub struct MemoryBackend<K, V> {
    caches: parking_lot::Mutex<HashMap<String, HashMap<K, Entry<V>>>>,
}

impl<K, V> Default for MemoryBackend<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        MemoryBackend::new()
    }
}

impl<K, V> MemoryBackend<K, V>
where
    K: Eq + Hash,
{
    /// Creates an empty backend with no caches yet registered.
    pub fn new() -> MemoryBackend<K, V> {
        MemoryBackend {
            caches: parking_lot::Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl<K, V> Storage<K, V> for MemoryBackend<K, V>
where
    K: Clone + Eq + Hash + Send + Sync,
    V: Clone + Send + Sync,
{
    type Error = Infallible;

    async fn size(&self, name: &str) -> Result<usize, Self::Error> {
        let caches = self.caches.lock();
        Ok(caches.get(name).map_or(0, HashMap::len))
    }

    async fn contains_key(&self, name: &str, key: &K) -> Result<bool, Self::Error> {
        let caches = self.caches.lock();
        Ok(caches.get(name).is_some_and(|c| c.contains_key(key)))
    }

    async fn get_entry(&self, name: &str, key: &K) -> Result<Option<Entry<V>>, Self::Error> {
        let caches = self.caches.lock();
        Ok(caches.get(name).and_then(|c| c.get(key)).cloned())
    }

    async fn put_entry(&self, name: &str, key: K, entry: Entry<V>) -> Result<(), Self::Error> {
        let mut caches = self.caches.lock();
        caches
            .entry(name.to_string())
            .or_default()
            .insert(key, entry);
        Ok(())
    }

    async fn remove(&self, name: &str, key: &K) -> Result<(), Self::Error> {
        let mut caches = self.caches.lock();
        if let Some(c) = caches.get_mut(name) {
            c.remove(key);
        }
        Ok(())
    }

    async fn clear(&self, name: &str) -> Result<(), Self::Error> {
        let mut caches = self.caches.lock();
        if let Some(c) = caches.get_mut(name) {
            c.clear();
        }
        Ok(())
    }

    async fn keys(&self, name: &str) -> Result<Vec<K>, Self::Error> {
        let caches = self.caches.lock();
        Ok(caches
            .get(name)
            .map(|c| c.keys().cloned().collect())
            .unwrap_or_default())
    }

    async fn values(&self, name: &str) -> Result<Vec<Entry<V>>, Self::Error> {
        let caches = self.caches.lock();
        Ok(caches
            .get(name)
            .map(|c| c.values().cloned().collect())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::Instant;
    use crate::entry::EntryMetadata;

    fn entry(v: &str) -> Entry<String> {
        Entry::new(
            v.to_string(),
            EntryMetadata {
                creation_time: Instant::ZERO,
                access_time: Instant::ZERO,
                update_time: Instant::ZERO,
                hit_count: 0,
                expiry_time: Instant::MAX,
            },
        )
    }

    #[tokio::test]
    async fn separates_entries_by_cache_name() {
        let backend: MemoryBackend<String, String> = MemoryBackend::new();
        backend
            .put_entry("a", "k".to_string(), entry("va"))
            .await
            .unwrap();
        backend
            .put_entry("b", "k".to_string(), entry("vb"))
            .await
            .unwrap();

        assert_eq!(backend.size("a").await.unwrap(), 1);
        assert_eq!(backend.size("b").await.unwrap(), 1);
        assert_eq!(
            backend
                .get_entry("a", &"k".to_string())
                .await
                .unwrap()
                .unwrap()
                .value,
            "va"
        );
        assert_eq!(
            backend
                .get_entry("b", &"k".to_string())
                .await
                .unwrap()
                .unwrap()
                .value,
            "vb"
        );
    }

    #[tokio::test]
    async fn remove_and_clear() {
        let backend: MemoryBackend<String, String> = MemoryBackend::new();
        backend
            .put_entry("a", "k1".to_string(), entry("v1"))
            .await
            .unwrap();
        backend
            .put_entry("a", "k2".to_string(), entry("v2"))
            .await
            .unwrap();

        backend.remove("a", &"k1".to_string()).await.unwrap();
        assert_eq!(backend.size("a").await.unwrap(), 1);

        backend.clear("a").await.unwrap();
        assert_eq!(backend.size("a").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn unknown_cache_name_behaves_empty() {
        let backend: MemoryBackend<String, String> = MemoryBackend::new();
        assert_eq!(backend.size("missing").await.unwrap(), 0);
        assert!(!backend
            .contains_key("missing", &"k".to_string())
            .await
            .unwrap());
        assert!(backend.keys("missing").await.unwrap().is_empty());
    }
}
