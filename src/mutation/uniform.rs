use crate::chromosome::{Chromosome, RealChromosome};
use crate::error::{ensure_probability, GeneticError, Result};
use crate::mutation::MutationStrategy;
use crate::rng::RandomNumberGenerator;

/// Moves one random real gene a random step toward either bound.
///
/// With probability `mutation_rate`, one gene is chosen uniformly, shifted left
/// or right with equal odds by a step drawn from `[0, max_step)` and clamped to
/// the chromosome's bounds.
#[derive(Debug, Clone)]
pub struct UniformMutation {
    mutation_rate: f64,
    max_step: f64,
    rng: RandomNumberGenerator,
}

impl UniformMutation {
    pub fn new(mutation_rate: f64) -> Result<Self> {
        Ok(Self {
            mutation_rate: ensure_probability("Mutation rate", mutation_rate)?,
            max_step: 1.0,
            rng: RandomNumberGenerator::new(),
        })
    }

    /// # Errors
    ///
    /// Returns `GeneticError::InvalidArgument` unless `max_step` is finite and positive.
    pub fn with_max_step(mut self, max_step: f64) -> Result<Self> {
        if !max_step.is_finite() || max_step <= 0.0 {
            return Err(GeneticError::InvalidArgument(format!(
                "Maximum step must be finite and positive, got: {}",
                max_step
            )));
        }
        self.max_step = max_step;
        Ok(self)
    }

    pub fn with_rng(mut self, rng: RandomNumberGenerator) -> Self {
        self.rng = rng;
        self
    }

    pub fn mutation_rate(&self) -> f64 {
        self.mutation_rate
    }

    pub fn max_step(&self) -> f64 {
        self.max_step
    }
}

impl MutationStrategy<RealChromosome> for UniformMutation {
    fn mutate(&mut self, individual: &RealChromosome) -> Result<RealChromosome> {
        let mut mutant = individual.clone();
        if individual.is_empty() || !self.rng.chance(self.mutation_rate) {
            return Ok(mutant);
        }

        let index = self.rng.gen_index(individual.len());
        let step = self.rng.gen_range(0.0..self.max_step);
        let current = individual.genes()[index];
        let moved = if self.rng.chance(0.5) {
            current + step
        } else {
            current - step
        };

        mutant.set_gene(index, individual.clamp(moved))?;
        Ok(mutant)
    }
}
