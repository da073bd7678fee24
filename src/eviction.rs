/*!
Policies that pick a victim among sampled eviction candidates.

Every policy here is a pure ranking function over [`EntryMetadata`]; none of
them ever see the value, and none of them hold any state of their own.
*/

use std::fmt;

use crate::entry::EntryMetadata;

/// Selects a victim among the candidates a [`crate::Sampler`] produced.
///
/// Candidates are passed in sampler order; implementations must break ties
/// by keeping the first-encountered candidate, so that the overall eviction
/// choice is a deterministic function of sampler order.
pub trait EvictionPolicy<K: Clone>: fmt::Debug + Send + Sync {
    /// Picks the key to evict from `candidates`.
    ///
    /// Panics if `candidates` is empty; the engine never calls this without
    /// at least one candidate.
    fn select_victim(&self, candidates: &[(K, EntryMetadata)]) -> K;
}

fn best_by<K: Clone>(
    candidates: &[(K, EntryMetadata)],
    mut is_better: impl FnMut(&EntryMetadata, &EntryMetadata) -> bool,
) -> K {
    let mut iter = candidates.iter();
    let first = iter.next().expect("select_victim called with no candidates");
    let mut best = first;
    for candidate in iter {
        if is_better(&candidate.1, &best.1) {
            best = candidate;
        }
    }
    best.0.clone()
}

/// Evicts the entry with the smallest `creation_time` — first in, first out.
#[derive(Debug, Default, Clone, Copy)]
pub struct Fifo;

impl<K: Clone> EvictionPolicy<K> for Fifo {
    fn select_victim(&self, candidates: &[(K, EntryMetadata)]) -> K {
        best_by(candidates, |a, b| a.creation_time < b.creation_time)
    }
}

/// Evicts the entry with the largest `creation_time` — last in, first out.
#[derive(Debug, Default, Clone, Copy)]
pub struct Filo;

impl<K: Clone> EvictionPolicy<K> for Filo {
    fn select_victim(&self, candidates: &[(K, EntryMetadata)]) -> K {
        best_by(candidates, |a, b| a.creation_time > b.creation_time)
    }
}

/// Evicts the entry with the smallest `access_time` — least recently used.
#[derive(Debug, Default, Clone, Copy)]
pub struct Lru;

impl<K: Clone> EvictionPolicy<K> for Lru {
    fn select_victim(&self, candidates: &[(K, EntryMetadata)]) -> K {
        best_by(candidates, |a, b| a.access_time < b.access_time)
    }
}

/// Evicts the entry with the largest `access_time` — most recently used.
#[derive(Debug, Default, Clone, Copy)]
pub struct Mru;

impl<K: Clone> EvictionPolicy<K> for Mru {
    fn select_victim(&self, candidates: &[(K, EntryMetadata)]) -> K {
        best_by(candidates, |a, b| a.access_time > b.access_time)
    }
}

/// Evicts the entry with the smallest `hit_count`, breaking ties on the
/// smallest `access_time` — least frequently used.
#[derive(Debug, Default, Clone, Copy)]
pub struct Lfu;

impl<K: Clone> EvictionPolicy<K> for Lfu {
    fn select_victim(&self, candidates: &[(K, EntryMetadata)]) -> K {
        best_by(candidates, |a, b| {
            (a.hit_count, a.access_time) < (b.hit_count, b.access_time)
        })
    }
}

/// Evicts the entry with the largest `hit_count`, breaking ties on the
/// largest `access_time` — most frequently used.
#[derive(Debug, Default, Clone, Copy)]
pub struct Mfu;

impl<K: Clone> EvictionPolicy<K> for Mfu {
    fn select_victim(&self, candidates: &[(K, EntryMetadata)]) -> K {
        best_by(candidates, |a, b| {
            (a.hit_count, a.access_time) > (b.hit_count, b.access_time)
        })
    }
}
