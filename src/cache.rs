/*!
The cache engine: orchestrates a [`Storage`] backend with an
[`ExpiryPolicy`], a [`Sampler`] + [`EvictionPolicy`] pair, and an optional
[`Loader`], and exposes the public read/write operations.

Every operation here resolves liveness first: a non-live entry encountered
by any operation is removed before the operation proceeds (lazy expiration,
invariant I3 of the contract this crate implements). Capacity is enforced
after every insertion that creates a new key (invariant I2): if it would
push `size()` past `max_entries`, exactly one victim is evicted first
(invariant I6).
*/

use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use crate::backend::Storage;
use crate::clock::{Clock, Instant, SystemClock};
use crate::entry::{Entry, EntryMetadata};
use crate::error::CacheError;
use crate::eviction::{EvictionPolicy, Lru};
use crate::expiry::{Eternal, ExpiryPolicy};
use crate::loader::Loader;
use crate::sampler::{FullSampler, Sampler};

/// An embeddable key-value cache: policy and orchestration over a pluggable
/// [`Storage`] backend.
///
/// Constructed via [`Cache::builder`]. Generic only over the key type `K`,
/// the value type `V`, and the backend `B` — the expiry, sampling, eviction
/// and loader policies are trait objects, so they can be swapped at
/// configuration time without new monomorphizations of the engine itself.
pub struct Cache<K, V, B>
where
    B: Storage<K, V>,
    K: Clone + Eq + Hash + fmt::Debug + Send + Sync,
    V: Clone + Send + Sync,
{
    pub(crate) backend: B,
    pub(crate) name: String,
    pub(crate) expiry: Box<dyn ExpiryPolicy>,
    pub(crate) sampler: Box<dyn Sampler<K>>,
    pub(crate) eviction: Box<dyn EvictionPolicy<K>>,
    pub(crate) max_entries: Option<u64>,
    pub(crate) loader: Option<Box<dyn Loader<K, V>>>,
    pub(crate) clock: Arc<dyn Clock>,
}

impl<K, V, B> fmt::Debug for Cache<K, V, B>
where
    B: Storage<K, V>,
    K: Clone + Eq + Hash + fmt::Debug + Send + Sync,
    V: Clone + Send + Sync,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cache")
            .field("name", &self.name)
            .field("expiry", &self.expiry)
            .field("sampler", &self.sampler)
            .field("eviction", &self.eviction)
            .field("max_entries", &self.max_entries)
            .field("loader", &self.loader.is_some())
            .finish_non_exhaustive()
    }
}

impl<K, V, B> Cache<K, V, B>
where
    B: Storage<K, V>,
    K: Clone + Eq + Hash + fmt::Debug + Send + Sync,
    V: Clone + Send + Sync,
{
    /// Starts building a cache named `name` over `backend`.
    ///
    /// Defaults: [`Eternal`] expiry, [`FullSampler`], [`Lru`] eviction,
    /// unbounded size, no loader, [`SystemClock`].
    pub fn builder<S: Into<String>>(backend: B, name: S) -> crate::builder::CacheBuilder<K, V, B> {
        crate::builder::CacheBuilder::new(backend, name)
    }

    /// The logical name this cache was configured with.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The configured maximum entry count, if any.
    pub fn max_entries(&self) -> Option<u64> {
        self.max_entries
    }

    /// Inserts or replaces the value for `key`.
    ///
    /// If a live entry exists, its value is replaced in place:
    /// `update_time` is refreshed, the *modified* expiry event fires, and
    /// `creation_time`/`access_time`/`hit_count` are preserved. Otherwise a
    /// new entry is created, subject to eviction if it would exceed
    /// `max_entries`.
    pub async fn put(&self, key: K, value: V) -> Result<(), CacheError<B::Error>> {
        let now = self.clock.now();
        match self.live_entry(&key, now).await? {
            Some(entry) => {
                let mut metadata = entry.metadata;
                metadata.update_time = now;
                if let Some(ttl) = self.expiry.on_modified() {
                    metadata.expiry_time = now.saturating_add(ttl);
                }
                self.store(key, value, metadata).await
            }
            None => self.insert_new(key, value, now).await,
        }
    }

    /// Inserts `value` for `key` only if no live entry exists for it.
    ///
    /// Returns `true` if the entry was created. If a live entry already
    /// exists, returns `false` without touching it at all — not even its
    /// access metadata.
    pub async fn put_if_absent(&self, key: K, value: V) -> Result<bool, CacheError<B::Error>> {
        let now = self.clock.now();
        match self.live_entry(&key, now).await? {
            Some(_) => Ok(false),
            None => {
                self.insert_new(key, value, now).await?;
                Ok(true)
            }
        }
    }

    /// Reads the value for `key`, refreshing access metadata on a hit.
    ///
    /// On a miss (absent or lazily expired), invokes the configured
    /// [`Loader`] if one is set; the loaded value, if any, is inserted as a
    /// new entry and returned. Without a loader, a miss returns `None`.
    pub async fn get(&self, key: &K) -> Result<Option<V>, CacheError<B::Error>> {
        let now = self.clock.now();
        match self.live_entry(key, now).await? {
            Some(entry) => {
                let mut metadata = entry.metadata;
                metadata.access_time = now;
                metadata.hit_count += 1;
                if let Some(ttl) = self.expiry.on_accessed() {
                    metadata.expiry_time = now.saturating_add(ttl);
                }
                let value = entry.value.clone();
                self.store(key.clone(), value.clone(), metadata).await?;
                Ok(Some(value))
            }
            None => self.load_on_miss(key, now).await,
        }
    }

    /// Atomically swaps in `value` for `key`, returning whatever value was
    /// previously live for it (or `None`, if this is a creation).
    pub async fn get_and_put(&self, key: K, value: V) -> Result<Option<V>, CacheError<B::Error>> {
        let now = self.clock.now();
        match self.live_entry(&key, now).await? {
            Some(entry) => {
                let previous = entry.value.clone();
                let mut metadata = entry.metadata;
                metadata.update_time = now;
                if let Some(ttl) = self.expiry.on_modified() {
                    metadata.expiry_time = now.saturating_add(ttl);
                }
                self.store(key, value, metadata).await?;
                Ok(Some(previous))
            }
            None => {
                self.insert_new(key, value, now).await?;
                Ok(None)
            }
        }
    }

    /// Removes and returns the current value for `key`, if it is live.
    ///
    /// No metadata update occurs before removal; a miss (absent or
    /// expired) returns `None`.
    pub async fn get_and_remove(&self, key: &K) -> Result<Option<V>, CacheError<B::Error>> {
        let now = self.clock.now();
        let live = self.live_entry(key, now).await?;
        self.backend
            .remove(&self.name, key)
            .await
            .map_err(CacheError::Backend)?;
        Ok(live.map(Entry::into_value))
    }

    /// Removes the entry for `key`, live or not. A no-op if absent.
    pub async fn remove(&self, key: &K) -> Result<(), CacheError<B::Error>> {
        self.backend
            .remove(&self.name, key)
            .await
            .map_err(CacheError::Backend)
    }

    /// Whether a live entry exists for `key`.
    ///
    /// Lazily expires an encountered stale entry, but is not itself an
    /// access: it never updates `access_time` or `hit_count`.
    pub async fn contains_key(&self, key: &K) -> Result<bool, CacheError<B::Error>> {
        let now = self.clock.now();
        Ok(self.live_entry(key, now).await?.is_some())
    }

    /// Current entry count as reported by the backend.
    ///
    /// Reflects what the backend currently stores, not the live count: a
    /// not-yet-observed expired entry still counts here, matching the
    /// backend-count contract this crate inherited from its source design
    /// (see `DESIGN.md`).
    pub async fn size(&self) -> Result<usize, CacheError<B::Error>> {
        self.backend.size(&self.name).await.map_err(CacheError::Backend)
    }

    /// All keys currently stored, expired or not.
    pub async fn keys(&self) -> Result<Vec<K>, CacheError<B::Error>> {
        self.backend.keys(&self.name).await.map_err(CacheError::Backend)
    }

    /// Removes every entry.
    pub async fn clear(&self) -> Result<(), CacheError<B::Error>> {
        self.backend.clear(&self.name).await.map_err(CacheError::Backend)
    }

    /// Fetches the entry for `key`, lazily expiring and removing it first
    /// if it is stored but stale. Returns `None` for both "absent" and
    /// "was expired".
    async fn live_entry(&self, key: &K, now: Instant) -> Result<Option<Entry<V>>, CacheError<B::Error>> {
        match self
            .backend
            .get_entry(&self.name, key)
            .await
            .map_err(CacheError::Backend)?
        {
            Some(entry) if entry.is_live_at(now) => Ok(Some(entry)),
            Some(_expired) => {
                self.backend
                    .remove(&self.name, key)
                    .await
                    .map_err(CacheError::Backend)?;
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn store(&self, key: K, value: V, metadata: EntryMetadata) -> Result<(), CacheError<B::Error>> {
        self.backend
            .put_entry(&self.name, key, Entry::new(value, metadata))
            .await
            .map_err(CacheError::Backend)
    }

    async fn load_on_miss(&self, key: &K, now: Instant) -> Result<Option<V>, CacheError<B::Error>> {
        let Some(loader) = &self.loader else {
            return Ok(None);
        };
        #[cfg(feature = "tracing")]
        tracing::debug!(cache = %self.name, key = ?key, "invoking loader on miss");
        let loaded = loader.load(key).await.map_err(CacheError::Loader)?;
        let Some(value) = loaded else {
            return Ok(None);
        };
        self.insert_new(key.clone(), value.clone(), now).await?;
        Ok(Some(value))
    }

    /// Creates a brand new entry for `key`, evicting a victim first if the
    /// insertion would exceed `max_entries`.
    async fn insert_new(&self, key: K, value: V, now: Instant) -> Result<(), CacheError<B::Error>> {
        if let Some(max) = self.max_entries {
            let current = self.backend.size(&self.name).await.map_err(CacheError::Backend)? as u64;
            if current >= max {
                if max == 0 {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(cache = %self.name, "rejected put: zero-capacity cache");
                    return Ok(());
                }
                self.evict_one().await?;
            }
        }
        let metadata = EntryMetadata {
            creation_time: now,
            access_time: now,
            update_time: now,
            hit_count: 0,
            expiry_time: now.saturating_add(self.expiry.on_created()),
        };
        self.store(key, value, metadata).await
    }

    /// Samples candidates, ranks them with the configured eviction policy,
    /// and removes exactly one victim.
    async fn evict_one(&self) -> Result<(), CacheError<B::Error>> {
        let keys = self.backend.keys(&self.name).await.map_err(CacheError::Backend)?;
        if keys.is_empty() {
            return Ok(());
        }
        let sampled = self.sampler.sample(&keys);
        let mut candidates = Vec::with_capacity(sampled.len());
        for k in &sampled {
            if let Some(entry) = self
                .backend
                .get_entry(&self.name, k)
                .await
                .map_err(CacheError::Backend)?
            {
                candidates.push((k.clone(), entry.metadata));
            }
        }
        if candidates.is_empty() {
            return Ok(());
        }
        let victim = self.eviction.select_victim(&candidates);
        #[cfg(feature = "tracing")]
        tracing::debug!(cache = %self.name, victim = ?victim, "evicting entry");
        self.backend
            .remove(&self.name, &victim)
            .await
            .map_err(CacheError::Backend)
    }
}

/// The default expiry policy: [`Eternal`].
pub(crate) fn default_expiry() -> Box<dyn ExpiryPolicy> {
    Box::new(Eternal)
}

/// The default sampler: [`FullSampler`].
pub(crate) fn default_sampler<K: Clone + 'static>() -> Box<dyn Sampler<K>> {
    Box::new(FullSampler)
}

/// The default eviction policy: [`Lru`].
pub(crate) fn default_eviction<K: Clone + 'static>() -> Box<dyn EvictionPolicy<K>> {
    Box::new(Lru)
}

/// The default clock: [`SystemClock`].
pub(crate) fn default_clock() -> Arc<dyn Clock> {
    Arc::new(SystemClock)
}
