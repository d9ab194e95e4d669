use crate::chromosome::{Chromosome, RealChromosome};
use crate::error::{ensure_probability, GeneticError, Result};
use crate::mutation::MutationStrategy;
use crate::rng::RandomNumberGenerator;

/// Real-valued mutation whose step size shrinks as the run progresses.
///
/// Every gene mutates independently with probability `mutation_rate`. A mutating
/// gene picks a direction, measures the distance `y` to that bound and moves by
///
/// ```text
/// delta = y * (1 - r^((1 - t / T)^b))
/// ```
///
/// where `r` is uniform in `[0, 1)`, `t` the current generation, `T` the
/// generation horizon and `b` the dependency factor. Early generations explore
/// the whole range; by `t = T` the step has shrunk to nothing.
#[derive(Debug, Clone)]
pub struct NonUniformMutation {
    mutation_rate: f64,
    max_generations: usize,
    dependency_factor: f64,
    generation: usize,
    rng: RandomNumberGenerator,
}

impl NonUniformMutation {
    /// # Errors
    ///
    /// Returns `GeneticError::InvalidArgument` if `mutation_rate` is not a probability,
    /// `max_generations` is zero, or `dependency_factor` is negative or not finite.
    pub fn new(mutation_rate: f64, max_generations: usize, dependency_factor: f64) -> Result<Self> {
        let mutation_rate = ensure_probability("Mutation rate", mutation_rate)?;
        if max_generations == 0 {
            return Err(GeneticError::InvalidArgument(
                "Maximum generations must be positive".to_string(),
            ));
        }
        if !dependency_factor.is_finite() || dependency_factor < 0.0 {
            return Err(GeneticError::InvalidArgument(format!(
                "Dependency factor must be finite and non-negative, got: {}",
                dependency_factor
            )));
        }

        Ok(Self {
            mutation_rate,
            max_generations,
            dependency_factor,
            generation: 0,
            rng: RandomNumberGenerator::new(),
        })
    }

    pub fn with_rng(mut self, rng: RandomNumberGenerator) -> Self {
        self.rng = rng;
        self
    }

    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Fraction of the original step size still available at the current generation.
    fn remaining(&self) -> f64 {
        let progress = self.generation.min(self.max_generations) as f64 / self.max_generations as f64;
        (1.0 - progress).powf(self.dependency_factor)
    }
}

impl MutationStrategy<RealChromosome> for NonUniformMutation {
    fn mutate(&mut self, individual: &RealChromosome) -> Result<RealChromosome> {
        let mut mutant = individual.clone();
        let exponent = self.remaining();

        for (index, &gene) in individual.genes().iter().enumerate() {
            if !self.rng.chance(self.mutation_rate) {
                continue;
            }

            let upward = self.rng.chance(0.5);
            let distance = if upward {
                individual.upper_bound() - gene
            } else {
                gene - individual.lower_bound()
            };
            let delta = distance * (1.0 - self.rng.next_f64().powf(exponent));
            let moved = if upward { gene + delta } else { gene - delta };

            mutant.set_gene(index, individual.clamp(moved))?;
        }

        Ok(mutant)
    }

    fn set_generation(&mut self, generation: usize) {
        self.generation = generation;
    }
}
