use crate::chromosome::{Chromosome, ChromosomeFactory};
use crate::crossover::CrossoverStrategy;
use crate::error::{ensure_probability, ensure_same_length, Result};
use crate::rng::RandomNumberGenerator;

/// Decides every gene position independently.
///
/// At each position, with probability `mixing_ratio` each child keeps the gene
/// of its same-index parent; otherwise the two genes are swapped. A mixing ratio
/// of `0.5` gives the classic fair-coin uniform crossover.
#[derive(Debug, Clone)]
pub struct UniformCrossover<F> {
    crossover_rate: f64,
    mixing_ratio: f64,
    factory: F,
    rng: RandomNumberGenerator,
}

impl<F> UniformCrossover<F> {
    /// # Errors
    ///
    /// Returns `GeneticError::InvalidArgument` if either probability is outside `[0, 1]`.
    pub fn new(crossover_rate: f64, factory: F, mixing_ratio: f64) -> Result<Self> {
        Ok(Self {
            crossover_rate: ensure_probability("Crossover rate", crossover_rate)?,
            mixing_ratio: ensure_probability("Mixing ratio", mixing_ratio)?,
            factory,
            rng: RandomNumberGenerator::new(),
        })
    }

    /// Creates a uniform crossover with rate `0.7` and a fair mixing ratio.
    pub fn with_defaults(factory: F) -> Self {
        Self {
            crossover_rate: 0.7,
            mixing_ratio: 0.5,
            factory,
            rng: RandomNumberGenerator::new(),
        }
    }

    pub fn with_rng(mut self, rng: RandomNumberGenerator) -> Self {
        self.rng = rng;
        self
    }

    pub fn crossover_rate(&self) -> f64 {
        self.crossover_rate
    }

    pub fn mixing_ratio(&self) -> f64 {
        self.mixing_ratio
    }
}

impl<C, F> CrossoverStrategy<C> for UniformCrossover<F>
where
    C: Chromosome,
    F: ChromosomeFactory<C>,
{
    fn crossover(&mut self, parent1: &C, parent2: &C) -> Result<(C, C)> {
        let len = ensure_same_length(parent1.len(), parent2.len())?;
        if !self.rng.chance(self.crossover_rate) {
            return Ok((parent1.clone(), parent2.clone()));
        }

        let mut genes1 = Vec::with_capacity(len);
        let mut genes2 = Vec::with_capacity(len);
        for (&gene1, &gene2) in parent1.genes().iter().zip(parent2.genes()) {
            if self.rng.chance(self.mixing_ratio) {
                genes1.push(gene1);
                genes2.push(gene2);
            } else {
                genes1.push(gene2);
                genes2.push(gene1);
            }
        }

        Ok((self.factory.create(genes1)?, self.factory.create(genes2)?))
    }
}
