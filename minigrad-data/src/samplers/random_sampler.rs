// minigrad-data/src/samplers/random_sampler.rs

use super::traits::Sampler;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::sync::atomic::{AtomicU64, Ordering};

/// A sampler that visits every index once per epoch in a random order.
///
/// With a seed, epoch `k` is shuffled by an RNG derived from `(seed, k)`: every
/// epoch gets a different order, and two samplers with the same seed produce the
/// same sequence of orders. Without a seed, the thread RNG is used.
#[derive(Debug)]
pub struct RandomSampler {
    seed: Option<u64>,
    epoch: AtomicU64,
}

impl RandomSampler {
    /// Unseeded sampler.
    pub fn new() -> Self {
        RandomSampler {
            seed: None,
            epoch: AtomicU64::new(0),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        RandomSampler {
            seed: Some(seed),
            epoch: AtomicU64::new(0),
        }
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Number of epochs started so far.
    pub fn epochs_started(&self) -> u64 {
        self.epoch.load(Ordering::Relaxed)
    }
}

impl Default for RandomSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for RandomSampler {
    /// The clone continues from the same epoch.
    fn clone(&self) -> Self {
        RandomSampler {
            seed: self.seed,
            epoch: AtomicU64::new(self.epochs_started()),
        }
    }
}

/// Mixes the epoch into the seed so consecutive seeds do not share epochs.
fn epoch_seed(seed: u64, epoch: u64) -> u64 {
    seed ^ epoch.wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

impl Sampler for RandomSampler {
    fn iter(&self, dataset_len: usize) -> Box<dyn Iterator<Item = usize> + Send + Sync> {
        let epoch = self.epoch.fetch_add(1, Ordering::Relaxed);
        if dataset_len == 0 {
            return Box::new(std::iter::empty());
        }

        let mut indices: Vec<usize> = (0..dataset_len).collect();
        match self.seed {
            Some(seed) => {
                let mut rng = StdRng::seed_from_u64(epoch_seed(seed, epoch));
                indices.shuffle(&mut rng);
            }
            None => indices.shuffle(&mut rand::thread_rng()),
        }
        log::trace!("RandomSampler epoch {} over {} indices", epoch, dataset_len);
        Box::new(indices.into_iter())
    }

    fn len(&self, dataset_len: usize) -> usize {
        dataset_len
    }
}

#[cfg(test)]
#[path = "random_sampler_test.rs"]
mod tests;
