use std::fmt::Debug;

use crate::chromosome::Chromosome;
use crate::error::Result;

/// Trait for selection strategies in genetic algorithms.
///
/// A selection strategy picks one parent at a time from the current population.
/// Strategies only read the population; the returned reference points into it.
/// Each strategy owns its random number generator, so a seeded strategy
/// produces the same sequence of picks for the same population.
///
/// # Examples
///
/// ```
/// use genetic_engine::chromosome::{Chromosome, IntegerChromosome};
/// use genetic_engine::rng::RandomNumberGenerator;
/// use genetic_engine::selection::{SelectionStrategy, TournamentSelection};
/// use genetic_engine::error::Result;
///
/// fn main() -> Result<()> {
///     let mut population = Vec::new();
///     for (i, fitness) in [0.5, 0.8, 0.3].iter().enumerate() {
///         let mut chromosome = IntegerChromosome::new(vec![i as i64], 0, 10)?;
///         chromosome.set_fitness(*fitness);
///         population.push(chromosome);
///     }
///
///     let mut selection = TournamentSelection::new(2)?
///         .with_rng(RandomNumberGenerator::from_seed(42));
///     let parent = selection.select_individual(&population)?;
///
///     assert!(population.iter().any(|c| c.genes() == parent.genes()));
///     Ok(())
/// }
/// ```
pub trait SelectionStrategy<C>: Debug + Send
where
    C: Chromosome,
{
    /// Selects one individual from the population.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::EmptyPopulation` if the population is empty, and
    /// `GeneticError::InvalidArgument` if the population's fitness values are
    /// unusable for this strategy.
    fn select_individual<'a>(&mut self, population: &'a [C]) -> Result<&'a C>;

    /// Drops any table cached for a previous population.
    ///
    /// Strategies that cache per-population data rebuild it automatically when
    /// they see a different population slice; callers that change fitness values
    /// in place must clear the cache themselves.
    fn clear_cache(&mut self) {}
}

/// Identifies a population slice by address and length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PopulationKey {
    address: usize,
    len: usize,
}

impl PopulationKey {
    pub(crate) fn of<C>(population: &[C]) -> Self {
        Self {
            address: population.as_ptr() as usize,
            len: population.len(),
        }
    }
}
