/*!
The engine's error taxonomy.

Mirrors the shape of `jaemk-cached`'s per-backend error enums (e.g.
`DiskCacheError`/`DiskCacheBuildError`): `thiserror`-derived, one variant per
failure source, construction errors kept separate from operation errors.
*/

use thiserror::Error;

use crate::loader::BoxError;

/// Failure raised synchronously while building a [`crate::Cache`].
///
/// The engine currently has nothing that can go wrong at construction time
/// that isn't already rejected by the type system (an unbounded cache is
/// simply `max_entries: None`, and `max_entries == 0` is a legal, if
/// pointless, configuration handled at the operation level — see
/// `DESIGN.md`). This type exists so the builder's `build()` has a stable
/// `Result` signature to grow into, matching `DiskCacheBuilder::build`'s
/// contract in the teacher crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// Two options that cannot be combined were both supplied.
    #[error("mutually exclusive cache options were both supplied: {0}")]
    Conflicting(String),
}

/// The error type returned by every [`crate::Cache`] operation.
///
/// Generic over `E`, the backend's own associated error type, so that a
/// backend failure is never lossily converted — callers can match on
/// `CacheError::Backend` and recover the original error unchanged.
#[derive(Error, Debug)]
pub enum CacheError<E>
where
    E: std::error::Error + 'static,
{
    /// The storage backend failed.
    #[error("cache backend error: {0}")]
    Backend(#[source] E),

    /// The configured loader failed.
    #[error("cache loader error: {0}")]
    Loader(#[source] BoxError),

    /// The cache was misconfigured.
    #[error("cache configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
}
