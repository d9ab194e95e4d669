use crate::chromosome::{Chromosome, ChromosomeFactory};
use crate::crossover::CrossoverStrategy;
use crate::error::{ensure_probability, ensure_same_length, Result};
use crate::rng::RandomNumberGenerator;

/// Swaps the segment between two cut points.
///
/// Two points are drawn uniformly from `[0, len]` and ordered so that
/// `a <= b`; the genes in `[a, b)` are exchanged between the children.
/// Equal points leave the children identical to the parents.
#[derive(Debug, Clone)]
pub struct TwoPointCrossover<F> {
    crossover_rate: f64,
    factory: F,
    rng: RandomNumberGenerator,
}

impl<F> TwoPointCrossover<F> {
    /// Creates a two point crossover applied with probability `crossover_rate`.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::InvalidArgument` if `crossover_rate` is outside `[0, 1]`.
    pub fn new(crossover_rate: f64, factory: F) -> Result<Self> {
        Ok(Self {
            crossover_rate: ensure_probability("Crossover rate", crossover_rate)?,
            factory,
            rng: RandomNumberGenerator::new(),
        })
    }

    pub fn with_rng(mut self, rng: RandomNumberGenerator) -> Self {
        self.rng = rng;
        self
    }

    pub fn crossover_rate(&self) -> f64 {
        self.crossover_rate
    }
}

impl<C, F> CrossoverStrategy<C> for TwoPointCrossover<F>
where
    C: Chromosome,
    F: ChromosomeFactory<C>,
{
    fn crossover(&mut self, parent1: &C, parent2: &C) -> Result<(C, C)> {
        let len = ensure_same_length(parent1.len(), parent2.len())?;
        if !self.rng.chance(self.crossover_rate) {
            return Ok((parent1.clone(), parent2.clone()));
        }

        let first = self.rng.gen_range(0..=len);
        let second = self.rng.gen_range(0..=len);
        let (start, end) = (first.min(second), first.max(second));

        let mut genes1 = parent1.to_vec();
        let mut genes2 = parent2.to_vec();
        genes1[start..end].swap_with_slice(&mut genes2[start..end]);

        Ok((self.factory.create(genes1)?, self.factory.create(genes2)?))
    }
}
