/*!
Optional on-miss value manufacturer.
*/

use std::fmt;

use async_trait::async_trait;

/// A boxed, type-erased error, used so a [`Loader`] can be stored as a trait
/// object alongside the engine's other policy objects.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Caller-supplied function invoked on a cache miss to manufacture a value.
///
/// If `load` returns `Ok(Some(value))`, the engine inserts it as a new entry
/// (subject to the same overflow→evict→insert sequence as an explicit
/// `put`) and returns it to the original caller. `Ok(None)` means "no value
/// available"; the read returns absent without inserting anything. `Err`
/// propagates to the caller; the engine never caches a negative result.
#[async_trait]
pub trait Loader<K, V>: fmt::Debug + Send + Sync {
    /// Attempts to produce a value for `key`.
    async fn load(&self, key: &K) -> Result<Option<V>, BoxError>;
}

/// Wraps a plain closure as a [`Loader`], for callers who don't want to
/// define a named type.
///
/// A bare closure can't implement `Debug`, which every policy object in
/// this crate is required to (so that cache configuration is inspectable);
/// `FnLoader` supplies a stub `Debug` impl instead.
pub struct FnLoader<F>(pub F);

impl<F> fmt::Debug for FnLoader<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnLoader").finish_non_exhaustive()
    }
}

#[async_trait]
impl<K, V, F, Fut> Loader<K, V> for FnLoader<F>
where
    K: Sync,
    F: Fn(&K) -> Fut + Send + Sync,
    Fut: std::future::Future<Output = Result<Option<V>, BoxError>> + Send,
{
    async fn load(&self, key: &K) -> Result<Option<V>, BoxError> {
        (self.0)(key).await
    }
}
