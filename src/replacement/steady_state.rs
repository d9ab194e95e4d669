use crate::chromosome::Chromosome;
use crate::error::{GeneticError, Result};
use crate::replacement::{count_from_percentage, sort_by_fitness_desc, ReplacementStrategy};

/// Which current individuals make room for offspring.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SteadyStateMode {
    /// The least fit individuals are replaced.
    #[default]
    Fitness,
    /// The oldest individuals are replaced. Chromosomes carry no age, so this
    /// currently behaves like `Fitness`.
    Age,
    /// Offspring replace their own parents. Parentage is not tracked, so this
    /// currently behaves like `Fitness`.
    Parent,
}

/// Replaces a small number of individuals each generation.
///
/// With `R = min(replacement_count, offspring.len())`, the next population is
/// the best `len - R` current individuals followed by the best `R` offspring.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SteadyStateReplacement {
    replacement_count: usize,
    mode: SteadyStateMode,
}

impl SteadyStateReplacement {
    /// Creates a fitness-based steady state replacement.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::InvalidArgument` if `replacement_count` is zero.
    pub fn new(replacement_count: usize) -> Result<Self> {
        Self::with_mode(replacement_count, SteadyStateMode::Fitness)
    }

    pub fn with_mode(replacement_count: usize, mode: SteadyStateMode) -> Result<Self> {
        if replacement_count == 0 {
            return Err(GeneticError::InvalidArgument(
                "Replacement count must be positive".to_string(),
            ));
        }
        if mode != SteadyStateMode::Fitness {
            tracing::warn!(
                ?mode,
                "Steady state mode is not supported, falling back to fitness-based replacement"
            );
        }
        Ok(Self {
            replacement_count,
            mode,
        })
    }

    /// Replaces `percentage` of `population_size` each generation, at least one.
    pub fn with_percentage(population_size: usize, percentage: f64) -> Result<Self> {
        Self::new(count_from_percentage(population_size, percentage, 1)?)
    }

    /// Replaces ten percent of `population_size` each generation, at least one.
    pub fn with_standard_rate(population_size: usize) -> Result<Self> {
        Self::new(count_from_percentage(population_size, 0.1, 1)?)
    }

    pub fn replacement_count(&self) -> usize {
        self.replacement_count
    }

    pub fn mode(&self) -> SteadyStateMode {
        self.mode
    }
}

impl<C> ReplacementStrategy<C> for SteadyStateReplacement
where
    C: Chromosome,
{
    fn replace_population(&self, mut current: Vec<C>, mut offspring: Vec<C>) -> Result<Vec<C>> {
        if current.is_empty() {
            return Ok(Vec::new());
        }
        if offspring.is_empty() {
            return Ok(current);
        }
        if self.replacement_count >= current.len() {
            return Err(GeneticError::InvalidArgument(format!(
                "Replacement count ({}) must be smaller than the population size ({})",
                self.replacement_count,
                current.len()
            )));
        }

        let replaced = self.replacement_count.min(offspring.len());
        sort_by_fitness_desc(&mut current);
        sort_by_fitness_desc(&mut offspring);

        current.truncate(current.len() - replaced);
        current.extend(offspring.into_iter().take(replaced));
        Ok(current)
    }
}
