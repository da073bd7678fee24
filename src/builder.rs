/*!
Chained-setter configuration surface for [`Cache`], following
`jaemk-cached`'s `DiskCacheBuilder`/`RedisCacheBuilder` shape: a builder
struct with `self`-consuming setters and a `build()` that can fail
synchronously.
*/

use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use crate::backend::Storage;
use crate::cache::{default_clock, default_eviction, default_expiry, default_sampler, Cache};
use crate::clock::Clock;
use crate::error::ConfigurationError;
use crate::eviction::EvictionPolicy;
use crate::expiry::ExpiryPolicy;
use crate::loader::Loader;
use crate::sampler::Sampler;

/// Builds a [`Cache`] over a given [`Storage`] backend.
///
/// Every option has a spec-mandated default (see each setter); `build()`
/// never fails today, but returns a `Result` so the configuration surface
/// has somewhere to grow validation into without a breaking change, exactly
/// as `DiskCacheBuilder::build` does in the teacher crate.
pub struct CacheBuilder<K, V, B>
where
    B: Storage<K, V>,
    K: Clone + Eq + Hash + fmt::Debug + Send + Sync,
    V: Clone + Send + Sync,
{
    backend: B,
    name: String,
    expiry: Box<dyn ExpiryPolicy>,
    sampler: Box<dyn Sampler<K>>,
    eviction: Box<dyn EvictionPolicy<K>>,
    max_entries: Option<u64>,
    loader: Option<Box<dyn Loader<K, V>>>,
    clock: Arc<dyn Clock>,
}

impl<K, V, B> CacheBuilder<K, V, B>
where
    B: Storage<K, V>,
    K: Clone + Eq + Hash + fmt::Debug + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    /// Starts a builder for a cache named `name` over `backend`, with every
    /// option at its spec-mandated default: [`crate::expiry::Eternal`]
    /// expiry, [`crate::sampler::FullSampler`] sampling,
    /// [`crate::eviction::Lru`] eviction, unbounded size, no loader, the
    /// real system clock.
    pub fn new<S: Into<String>>(backend: B, name: S) -> CacheBuilder<K, V, B> {
        CacheBuilder {
            backend,
            name: name.into(),
            expiry: default_expiry(),
            sampler: default_sampler(),
            eviction: default_eviction(),
            max_entries: None,
            loader: None,
            clock: default_clock(),
        }
    }

    /// Sets the expiry policy. Default: [`crate::expiry::Eternal`].
    pub fn expiry_policy(mut self, policy: impl ExpiryPolicy + 'static) -> Self {
        self.expiry = Box::new(policy);
        self
    }

    /// Sets the eviction-candidate sampler. Default:
    /// [`crate::sampler::FullSampler`].
    pub fn sampler(mut self, sampler: impl Sampler<K> + 'static) -> Self {
        self.sampler = Box::new(sampler);
        self
    }

    /// Sets the eviction policy. Default: [`crate::eviction::Lru`].
    pub fn eviction_policy(mut self, policy: impl EvictionPolicy<K> + 'static) -> Self {
        self.eviction = Box::new(policy);
        self
    }

    /// Sets the maximum number of entries this cache may hold. Unset
    /// (the default) means unbounded; `Some(0)` is a legal, if degenerate,
    /// zero-capacity cache where every insertion is rejected (see
    /// `DESIGN.md` for why this crate resolves the distilled spec's
    /// "`max_entries` ≤ 0" ambiguity this way).
    pub fn max_entries(mut self, max: u64) -> Self {
        self.max_entries = Some(max);
        self
    }

    /// Sets the on-miss loader. Default: none, so a miss simply returns
    /// absent.
    pub fn loader(mut self, loader: impl Loader<K, V> + 'static) -> Self {
        self.loader = Some(Box::new(loader));
        self
    }

    /// Sets the clock this cache reads "now" from. Default:
    /// [`crate::clock::SystemClock`].
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Finishes configuration, producing a usable [`Cache`].
    pub fn build(self) -> Result<Cache<K, V, B>, ConfigurationError> {
        #[cfg(feature = "tracing")]
        tracing::debug!(cache = %self.name, max_entries = ?self.max_entries, "constructing cache");
        Ok(Cache {
            backend: self.backend,
            name: self.name,
            expiry: self.expiry,
            sampler: self.sampler,
            eviction: self.eviction,
            max_entries: self.max_entries,
            loader: self.loader,
            clock: self.clock,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;
    use crate::eviction::Fifo;
    use crate::expiry::Created;
    use std::time::Duration;

    #[test]
    fn defaults_are_spec_mandated() {
        let backend: MemoryBackend<String, String> = MemoryBackend::new();
        let cache = CacheBuilder::new(backend, "defaults").build().unwrap();
        assert_eq!(cache.name(), "defaults");
        assert_eq!(cache.max_entries(), None);
    }

    #[test]
    fn setters_are_chainable() {
        let backend: MemoryBackend<String, String> = MemoryBackend::new();
        let cache = CacheBuilder::new(backend, "configured")
            .expiry_policy(Created::new(Duration::from_secs(5)))
            .eviction_policy(Fifo)
            .max_entries(10)
            .build()
            .unwrap();
        assert_eq!(cache.max_entries(), Some(10));
    }
}
