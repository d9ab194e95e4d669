use crate::chromosome::Chromosome;
use crate::error::{GeneticError, Result};
use crate::rng::RandomNumberGenerator;
use crate::selection::selection_strategy::SelectionStrategy;

/// Picks every individual with equal probability, ignoring fitness.
#[derive(Debug, Clone, Default)]
pub struct RandomSelection {
    rng: RandomNumberGenerator,
}

impl RandomSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rng(mut self, rng: RandomNumberGenerator) -> Self {
        self.rng = rng;
        self
    }
}

impl<C> SelectionStrategy<C> for RandomSelection
where
    C: Chromosome,
{
    fn select_individual<'a>(&mut self, population: &'a [C]) -> Result<&'a C> {
        if population.is_empty() {
            return Err(GeneticError::EmptyPopulation);
        }
        Ok(&population[self.rng.gen_index(population.len())])
    }
}
