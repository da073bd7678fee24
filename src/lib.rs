/*!
An embeddable key-value cache engine.

`cachecore` sits between a caller and a pluggable [`Storage`] backend,
applying expiry, eviction, and size policies, and optionally loading values
on a miss. It composes three orthogonal policy dimensions — expiry over
time ([`ExpiryPolicy`]), eviction under capacity pressure
([`EvictionPolicy`]), and sampling strategy for eviction candidates
([`Sampler`]) — over an abstract storage substrate, while preserving:

- at most one entry per key,
- `size() <= max_entries` once configured,
- lazy expiration (an entry is only ever removed when some operation
  observes it past its `expiry_time`),
- monotonically non-decreasing `hit_count` per entry lifetime.

# Quick start

```
use std::time::Duration;
use cachecore::{Cache, MemoryBackend};
use cachecore::expiry::Accessed;
use cachecore::eviction::Lru;

# #[tokio::main(flavor = "current_thread")]
# async fn main() -> Result<(), Box<dyn std::error::Error>> {
let backend: MemoryBackend<String, String> = MemoryBackend::new();
let cache = Cache::builder(backend, "sessions")
    .expiry_policy(Accessed::new(Duration::from_secs(60 * 30)))
    .eviction_policy(Lru)
    .max_entries(10_000)
    .build()?;

cache.put("user:1".to_string(), "alice".to_string()).await?;
assert_eq!(cache.get(&"user:1".to_string()).await?, Some("alice".to_string()));
# Ok(())
# }
```

# Bringing your own backend

The engine never touches bytes on disk or over the wire itself; it asks a
[`Storage`] implementation to do that. Implement [`Storage`] for your own
substrate (an embedded KV store, a remote cache, a file) to use this crate's
policies against it; [`MemoryBackend`] is the in-process reference
implementation shipped for out-of-the-box use and for this crate's own
tests.
*/

pub mod backend;
pub mod builder;
pub mod cache;
pub mod clock;
pub mod entry;
pub mod error;
pub mod eviction;
pub mod expiry;
pub mod loader;
pub mod sampler;

pub use backend::{MemoryBackend, Storage};
pub use builder::CacheBuilder;
pub use cache::Cache;
pub use clock::{Clock, Instant, ManualClock, SystemClock};
pub use entry::{Entry, EntryMetadata};
pub use error::{CacheError, ConfigurationError};
pub use eviction::EvictionPolicy;
pub use expiry::ExpiryPolicy;
pub use loader::{BoxError, FnLoader, Loader};
pub use sampler::Sampler;
