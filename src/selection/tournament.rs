use crate::chromosome::Chromosome;
use crate::error::{GeneticError, Result};
use crate::rng::RandomNumberGenerator;
use crate::selection::selection_strategy::SelectionStrategy;

/// A selection strategy that selects individuals through tournament selection.
///
/// Tournament selection draws `tournament_size` individuals uniformly, with
/// replacement, and returns the fittest of them. The first drawn individual
/// wins ties.
///
/// Tournament selection provides a balance between exploration and exploitation:
/// - Smaller tournament sizes lead to more exploration (more random selection)
/// - Larger tournament sizes lead to more exploitation (more focus on the best individuals)
///
/// A tournament size of 1 is equivalent to random selection.
#[derive(Debug, Clone)]
pub struct TournamentSelection {
    tournament_size: usize,
    rng: RandomNumberGenerator,
}

impl TournamentSelection {
    /// Creates a new TournamentSelection strategy with the specified tournament size.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::InvalidArgument` if `tournament_size` is 0.
    pub fn new(tournament_size: usize) -> Result<Self> {
        if tournament_size < 1 {
            return Err(GeneticError::InvalidArgument(
                "Tournament size must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            tournament_size,
            rng: RandomNumberGenerator::new(),
        })
    }

    pub fn with_rng(mut self, rng: RandomNumberGenerator) -> Self {
        self.rng = rng;
        self
    }

    pub fn tournament_size(&self) -> usize {
        self.tournament_size
    }
}

impl<C> SelectionStrategy<C> for TournamentSelection
where
    C: Chromosome,
{
    fn select_individual<'a>(&mut self, population: &'a [C]) -> Result<&'a C> {
        if population.is_empty() {
            return Err(GeneticError::EmptyPopulation);
        }

        let mut best = &population[self.rng.gen_index(population.len())];
        for _ in 1..self.tournament_size {
            let candidate = &population[self.rng.gen_index(population.len())];
            if candidate.score() > best.score() {
                best = candidate;
            }
        }

        Ok(best)
    }
}
