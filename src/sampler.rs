/*!
Selects the candidate subset of keys an eviction policy ranks.
*/

use std::fmt;

use rand::seq::SliceRandom;
use rand::rngs::SmallRng;
use rand::SeedableRng;

/// Produces the candidate key subset passed to an [`crate::EvictionPolicy`].
pub trait Sampler<K: Clone>: fmt::Debug + Send + Sync {
    /// Selects the candidates to rank, given every key currently stored.
    /// Implementations must be deterministic given their input and
    /// (injected) random source, and must preserve the relative order
    /// candidates should be ranked in on ties.
    fn sample(&self, keys: &[K]) -> Vec<K>;
}

/// Samples every stored key. The default; correct but scans the whole
/// keyspace on every eviction.
#[derive(Debug, Default, Clone, Copy)]
pub struct FullSampler;

impl<K: Clone> Sampler<K> for FullSampler {
    fn sample(&self, keys: &[K]) -> Vec<K> {
        keys.to_vec()
    }
}

/// Samples up to `k` keys chosen uniformly without replacement.
///
/// The random source is injectable so that sampling is reproducible in
/// tests: construct with [`RandomSampler::with_rng`] to pin a seed, or
/// [`RandomSampler::new`] to seed from process entropy.
pub struct RandomSampler {
    k: usize,
    rng: parking_lot::Mutex<SmallRng>,
}

impl RandomSampler {
    /// Creates a sampler that draws up to `k` keys, seeded from process
    /// entropy.
    pub fn new(k: usize) -> RandomSampler {
        RandomSampler {
            k,
            rng: parking_lot::Mutex::new(SmallRng::from_entropy()),
        }
    }

    /// Creates a sampler that draws up to `k` keys using a specific,
    /// reproducible random source.
    pub fn with_rng(k: usize, rng: SmallRng) -> RandomSampler {
        RandomSampler {
            k,
            rng: parking_lot::Mutex::new(rng),
        }
    }

    /// Creates a sampler seeded deterministically from `seed`, for tests
    /// that need reproducible eviction candidate selection.
    pub fn with_seed(k: usize, seed: u64) -> RandomSampler {
        RandomSampler::with_rng(k, SmallRng::seed_from_u64(seed))
    }
}

impl fmt::Debug for RandomSampler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RandomSampler").field("k", &self.k).finish()
    }
}

impl<K: Clone> Sampler<K> for RandomSampler {
    fn sample(&self, keys: &[K]) -> Vec<K> {
        let mut rng = self.rng.lock();
        keys.choose_multiple(&mut *rng, self.k).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_sampler_returns_everything() {
        let keys = vec![1, 2, 3, 4];
        assert_eq!(FullSampler.sample(&keys), keys);
    }

    #[test]
    fn full_sampler_preserves_order() {
        let keys = vec!["a", "b", "c"];
        assert_eq!(FullSampler.sample(&keys), keys);
    }

    #[test]
    fn random_sampler_respects_k() {
        let keys: Vec<u32> = (0..100).collect();
        let sampler = RandomSampler::with_seed(10, 42);
        let sample = sampler.sample(&keys);
        assert_eq!(sample.len(), 10);
        for k in &sample {
            assert!(keys.contains(k));
        }
    }

    #[test]
    fn random_sampler_caps_at_available_keys() {
        let keys = vec![1, 2, 3];
        let sampler = RandomSampler::with_seed(10, 1);
        assert_eq!(sampler.sample(&keys).len(), 3);
    }

    #[test]
    fn random_sampler_is_deterministic_given_same_seed() {
        let keys: Vec<u32> = (0..50).collect();
        let a = RandomSampler::with_seed(5, 7).sample(&keys);
        let b = RandomSampler::with_seed(5, 7).sample(&keys);
        assert_eq!(a, b);
    }
}
