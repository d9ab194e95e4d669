//! # Replacement
//!
//! A replacement strategy merges the current population with the offspring
//! bred from it and returns the next population.
//!
//! Every strategy honors the same contract:
//!
//! - an empty current population yields an empty result,
//! - empty offspring leave the current population unchanged,
//! - otherwise the next population has exactly as many members as the current one.

pub mod elitism;
pub mod full_generation;
pub mod steady_state;

use std::fmt::Debug;

use crate::chromosome::Chromosome;
use crate::error::{GeneticError, Result};

pub use elitism::ElitismReplacement;
pub use full_generation::FullGenerationReplacement;
pub use steady_state::{SteadyStateMode, SteadyStateReplacement};

/// Trait for strategies that form the next generation.
pub trait ReplacementStrategy<C>: Debug + Send
where
    C: Chromosome,
{
    /// Combines `current` and `offspring` into the next population.
    fn replace_population(&self, current: Vec<C>, offspring: Vec<C>) -> Result<Vec<C>>;
}

/// Sorts individuals from best to worst score. Equal scores keep their order.
pub(crate) fn sort_by_fitness_desc<C: Chromosome>(population: &mut [C]) {
    population.sort_by(|a, b| b.score().total_cmp(&a.score()));
}

/// Number of individuals covered by `percentage` of `population_size`, at least `minimum`.
pub(crate) fn count_from_percentage(
    population_size: usize,
    percentage: f64,
    minimum: usize,
) -> Result<usize> {
    if population_size == 0 {
        return Err(GeneticError::InvalidArgument(
            "Population size must be positive".to_string(),
        ));
    }
    if !(percentage > 0.0 && percentage < 1.0) {
        return Err(GeneticError::InvalidArgument(format!(
            "Percentage must be in (0.0, 1.0), got: {}",
            percentage
        )));
    }
    let count = (population_size as f64 * percentage).round() as usize;
    Ok(count.max(minimum))
}
