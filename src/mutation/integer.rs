use crate::chromosome::{Chromosome, IntegerChromosome};
use crate::error::{ensure_probability, GeneticError, Result};
use crate::mutation::MutationStrategy;
use crate::rng::RandomNumberGenerator;

const DEFAULT_MAX_DELTA: i64 = 10;

/// Nudges one random gene by a bounded signed delta.
///
/// With probability `mutation_rate`, one gene is chosen uniformly and shifted by
/// a magnitude drawn from `0..=max_delta` in a random direction. The result is
/// clamped into the chromosome's `[min, max]`.
///
/// The delta perturbs the existing value; it is added to the gene, never written
/// over it.
#[derive(Debug, Clone)]
pub struct IntegerMutation {
    mutation_rate: f64,
    max_delta: i64,
    rng: RandomNumberGenerator,
}

impl IntegerMutation {
    pub fn new(mutation_rate: f64) -> Result<Self> {
        Ok(Self {
            mutation_rate: ensure_probability("Mutation rate", mutation_rate)?,
            max_delta: DEFAULT_MAX_DELTA,
            rng: RandomNumberGenerator::new(),
        })
    }

    /// Sets the largest step a gene can take in one mutation.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::InvalidArgument` if `max_delta` is negative.
    pub fn with_max_delta(mut self, max_delta: i64) -> Result<Self> {
        if max_delta < 0 {
            return Err(GeneticError::InvalidArgument(format!(
                "Maximum delta must be non-negative, got: {}",
                max_delta
            )));
        }
        self.max_delta = max_delta;
        Ok(self)
    }

    pub fn with_rng(mut self, rng: RandomNumberGenerator) -> Self {
        self.rng = rng;
        self
    }

    pub fn mutation_rate(&self) -> f64 {
        self.mutation_rate
    }

    pub fn max_delta(&self) -> i64 {
        self.max_delta
    }
}

impl MutationStrategy<IntegerChromosome> for IntegerMutation {
    fn mutate(&mut self, individual: &IntegerChromosome) -> Result<IntegerChromosome> {
        let mut mutant = individual.clone();
        if individual.is_empty() || !self.rng.chance(self.mutation_rate) {
            return Ok(mutant);
        }

        let index = self.rng.gen_index(individual.len());
        let magnitude = self.rng.gen_range(0..=self.max_delta);
        let delta = if self.rng.chance(0.5) {
            magnitude
        } else {
            -magnitude
        };

        let current = individual.genes()[index];
        let value = current
            .saturating_add(delta)
            .clamp(individual.min(), individual.max());
        if value != current {
            mutant.set_gene(index, value)?;
        }
        Ok(mutant)
    }
}
