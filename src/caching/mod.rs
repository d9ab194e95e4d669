//! # Caching Module
//!
//! This module provides a memoizing wrapper for fitness functions.
//! Caching is particularly useful for expensive fitness functions, or when
//! elitism and crossover keep producing genotypes that were already scored.
//!
//! The engine itself already skips chromosomes that carry a cached fitness;
//! `CachedFitness` additionally recognizes a genotype that was rebuilt from
//! scratch, for example by crossover recombining the same genes.
//!
//! ## Example
//!
//! ```rust
//! use genetic_engine::caching::CachedFitness;
//! use genetic_engine::chromosome::{BinaryChromosome, Chromosome};
//! use genetic_engine::evolution::FitnessFunction;
//!
//! let fitness = CachedFitness::new(|c: &BinaryChromosome| c.count_ones() as f64);
//!
//! let first = BinaryChromosome::new(vec![1, 1, 0]).unwrap();
//! let twin = BinaryChromosome::new(vec![1, 1, 0]).unwrap();
//!
//! assert_eq!(fitness.evaluate(&first), 2.0);
//! assert_eq!(fitness.evaluate(&twin), 2.0);
//! assert_eq!(fitness.cache_size(), 1);
//! assert_eq!(fitness.evaluations(), 1);
//! ```

use std::collections::HashMap;
use std::fmt::{self, Debug};
use std::hash::Hash;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::chromosome::{BinaryChromosome, Chromosome, IntegerChromosome, RealChromosome};
use crate::evolution::FitnessFunction;

/// A trait for chromosomes that can be used as cache keys.
///
/// Chromosomes that would receive the same fitness score must produce the same key.
pub trait CacheKey: Chromosome {
    /// The type of the cache key.
    type Key: Eq + Hash + Clone + Debug + Send + Sync;

    /// Generates a cache key for this chromosome.
    fn cache_key(&self) -> Self::Key;
}

impl CacheKey for BinaryChromosome {
    type Key = Vec<u8>;

    fn cache_key(&self) -> Vec<u8> {
        self.to_vec()
    }
}

impl CacheKey for IntegerChromosome {
    type Key = Vec<i64>;

    fn cache_key(&self) -> Vec<i64> {
        self.to_vec()
    }
}

impl CacheKey for RealChromosome {
    /// Bit patterns of the genes, since `f64` is not `Eq`.
    type Key = Vec<u64>;

    fn cache_key(&self) -> Vec<u64> {
        self.genes().iter().map(|gene| gene.to_bits()).collect()
    }
}

/// A wrapper around a fitness function that caches its scores by genotype.
///
/// Clones share the same cache.
pub struct CachedFitness<C, F>
where
    C: CacheKey,
{
    /// The wrapped fitness function
    fitness: F,
    /// The cache of fitness evaluations
    cache: Arc<Mutex<HashMap<C::Key, f64>>>,
    /// How many times the wrapped function actually ran
    evaluations: Arc<AtomicUsize>,
    _marker: PhantomData<fn(&C)>,
}

impl<C, F> CachedFitness<C, F>
where
    C: CacheKey,
    F: FitnessFunction<C>,
{
    /// Creates a new cached fitness function wrapping the given one.
    pub fn new(fitness: F) -> Self {
        Self::with_cache(fitness, HashMap::new())
    }

    /// Creates a new cached fitness function with a pre-populated cache.
    pub fn with_cache(fitness: F, cache: HashMap<C::Key, f64>) -> Self {
        Self {
            fitness,
            cache: Arc::new(Mutex::new(cache)),
            evaluations: Arc::new(AtomicUsize::new(0)),
            _marker: PhantomData,
        }
    }

    /// Returns a reference to the wrapped fitness function.
    pub fn inner(&self) -> &F {
        &self.fitness
    }

    /// Returns the number of cached fitness evaluations.
    pub fn cache_size(&self) -> usize {
        self.lock().len()
    }

    /// Returns how often the wrapped function was called.
    pub fn evaluations(&self) -> usize {
        self.evaluations.load(Ordering::Relaxed)
    }

    /// Clears the cache.
    pub fn clear_cache(&self) {
        self.lock().clear();
    }

    /// Returns a copy of the cache.
    pub fn get_cache(&self) -> HashMap<C::Key, f64> {
        self.lock().clone()
    }

    /// A panic inside the wrapped function cannot leave the map half-written,
    /// so a poisoned lock is still safe to use.
    fn lock(&self) -> MutexGuard<'_, HashMap<C::Key, f64>> {
        self.cache
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<C, F> Clone for CachedFitness<C, F>
where
    C: CacheKey,
    F: Clone,
{
    fn clone(&self) -> Self {
        Self {
            fitness: self.fitness.clone(),
            cache: Arc::clone(&self.cache),
            evaluations: Arc::clone(&self.evaluations),
            _marker: PhantomData,
        }
    }
}

impl<C, F> Debug for CachedFitness<C, F>
where
    C: CacheKey,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CachedFitness")
            .field("evaluations", &self.evaluations.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

impl<C, F> FitnessFunction<C> for CachedFitness<C, F>
where
    C: CacheKey,
    F: FitnessFunction<C>,
{
    fn evaluate(&self, chromosome: &C) -> f64 {
        let key = chromosome.cache_key();

        if let Some(score) = self.lock().get(&key) {
            return *score;
        }

        // The lock is not held while the wrapped function runs
        let score = self.fitness.evaluate(chromosome);
        self.evaluations.fetch_add(1, Ordering::Relaxed);
        self.lock().insert(key, score);

        score
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_genotypes_hit_the_cache() {
        let fitness = CachedFitness::new(|c: &IntegerChromosome| c.sum() as f64);
        let a = IntegerChromosome::new(vec![1, 2, 3], 0, 9).unwrap();
        let b = IntegerChromosome::new(vec![3, 2, 1], 0, 9).unwrap();

        for _ in 0..5 {
            assert_eq!(fitness.evaluate(&a), 6.0);
            assert_eq!(fitness.evaluate(&b), 6.0);
        }

        assert_eq!(fitness.evaluations(), 2);
        assert_eq!(fitness.cache_size(), 2);
    }

    #[test]
    fn test_real_keys_use_bit_patterns() {
        let fitness = CachedFitness::new(|c: &RealChromosome| c.product());
        let a = RealChromosome::new(vec![0.5, 2.0], 0.0, 10.0).unwrap();
        let b = RealChromosome::new(vec![0.5, 2.0], 0.0, 10.0).unwrap();

        fitness.evaluate(&a);
        fitness.evaluate(&b);
        assert_eq!(fitness.evaluations(), 1);
        assert_eq!(a.cache_key(), vec![0.5f64.to_bits(), 2.0f64.to_bits()]);
    }

    #[test]
    fn test_clones_share_the_cache() {
        let fitness = CachedFitness::new(|c: &BinaryChromosome| c.count_ones() as f64);
        let copy = fitness.clone();
        let chromosome = BinaryChromosome::new(vec![1, 1, 1]).unwrap();

        fitness.evaluate(&chromosome);
        copy.evaluate(&chromosome);
        assert_eq!(copy.evaluations(), 1);

        copy.clear_cache();
        assert_eq!(fitness.cache_size(), 0);
    }

    #[test]
    fn test_prepopulated_cache() {
        let mut seeded = HashMap::new();
        seeded.insert(vec![0u8, 1], 42.0);
        let fitness = CachedFitness::with_cache(|_: &BinaryChromosome| 0.0, seeded);

        let chromosome = BinaryChromosome::new(vec![0, 1]).unwrap();
        assert_eq!(fitness.evaluate(&chromosome), 42.0);
        assert_eq!(fitness.evaluations(), 0);
        assert_eq!(fitness.get_cache().len(), 1);
    }
}
