use crate::chromosome::Chromosome;
use crate::error::{GeneticError, Result};
use crate::rng::RandomNumberGenerator;
use crate::selection::selection_strategy::{PopulationKey, SelectionStrategy};

/// Fitness values closer than this share a rank.
const TIE_TOLERANCE: f64 = 1e-10;

/// How a rank is turned into a selection weight.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RankingMode {
    /// `p(rank) = (2 - s) / n + 2 * rank * (s - 1) / (n * (n - 1))`
    #[default]
    Linear,
    /// `p(rank) = 1 - e^(-rank)`, normalized over the population.
    Exponential,
}

/// A selection strategy that selects individuals based on their rank in the population.
///
/// Rank-based selection assigns a selection probability to each individual based on its
/// rank in the population, rather than its absolute fitness value. This helps prevent
/// premature convergence when there are a few individuals with much higher fitness than
/// the rest of the population.
///
/// Individuals are sorted from worst to best, so the best individual holds rank `n`.
/// Individuals whose fitness differs by less than `1e-10` share the lower rank of their group.
/// Unlike roulette wheel selection, negative fitness values are fine.
///
/// # Examples
///
/// ```
/// use genetic_engine::chromosome::{Chromosome, RealChromosome};
/// use genetic_engine::selection::{RankSelection, RankingMode, SelectionStrategy};
/// use genetic_engine::error::Result;
///
/// fn main() -> Result<()> {
///     let mut population = Vec::new();
///     for fitness in [-3.0, 0.5, 12.0] {
///         let mut chromosome = RealChromosome::new(vec![0.0], -1.0, 1.0)?;
///         chromosome.set_fitness(fitness);
///         population.push(chromosome);
///     }
///
///     let mut selection = RankSelection::new(1.8, RankingMode::Linear, true)?;
///     let parent = selection.select_individual(&population)?;
///     assert!(parent.fitness().is_some());
///
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RankSelection {
    /// Higher values increase selection pressure.
    selection_pressure: f64,
    ranking_mode: RankingMode,
    maximize: bool,
    rng: RandomNumberGenerator,
    table: Option<RankTable>,
}

#[derive(Debug, Clone)]
struct RankTable {
    key: PopulationKey,
    /// Population indices from worst to best.
    order: Vec<usize>,
    cumulative: Vec<f64>,
}

impl RankSelection {
    /// Creates a new RankSelection strategy.
    ///
    /// # Arguments
    ///
    /// * `selection_pressure` - Must be in the range [1.0, 2.0].
    ///   - At 1.0, all individuals have equal selection probability (no selection pressure)
    ///   - At 2.0, selection pressure is at its maximum
    /// * `ranking_mode` - Linear or exponential rank weighting.
    /// * `maximize` - Whether higher fitness is better.
    ///
    /// # Errors
    ///
    /// Returns a `GeneticError::InvalidArgument` error if `selection_pressure` is not in the range [1.0, 2.0].
    pub fn new(selection_pressure: f64, ranking_mode: RankingMode, maximize: bool) -> Result<Self> {
        if !(1.0..=2.0).contains(&selection_pressure) {
            return Err(GeneticError::InvalidArgument(format!(
                "Selection pressure must be in the range [1.0, 2.0], got: {}",
                selection_pressure
            )));
        }

        Ok(Self {
            selection_pressure,
            ranking_mode,
            maximize,
            rng: RandomNumberGenerator::new(),
            table: None,
        })
    }

    pub fn with_rng(mut self, rng: RandomNumberGenerator) -> Self {
        self.rng = rng;
        self
    }

    pub fn selection_pressure(&self) -> f64 {
        self.selection_pressure
    }

    pub fn ranking_mode(&self) -> RankingMode {
        self.ranking_mode
    }

    pub fn maximize(&self) -> bool {
        self.maximize
    }

    /// Weight of a single rank in a population of `population_size`.
    fn rank_weight(&self, rank: usize, population_size: usize) -> f64 {
        let n = population_size as f64;
        let rank = rank as f64;
        match self.ranking_mode {
            RankingMode::Linear if population_size < 2 => 1.0,
            RankingMode::Linear => {
                (2.0 - self.selection_pressure) / n
                    + 2.0 * rank * (self.selection_pressure - 1.0) / (n * (n - 1.0))
            }
            RankingMode::Exponential => 1.0 - (-rank).exp(),
        }
    }

    fn build_table<C: Chromosome>(&self, population: &[C]) -> Result<RankTable> {
        let mut fitness = Vec::with_capacity(population.len());
        for (index, individual) in population.iter().enumerate() {
            let value = individual.fitness().ok_or_else(|| {
                GeneticError::InvalidArgument(format!(
                    "Rank selection requires evaluated individuals, individual {} has no fitness",
                    index
                ))
            })?;
            fitness.push(value);
        }

        let mut order: Vec<usize> = (0..population.len()).collect();
        if self.maximize {
            order.sort_by(|&a, &b| fitness[a].total_cmp(&fitness[b]));
        } else {
            order.sort_by(|&a, &b| fitness[b].total_cmp(&fitness[a]));
        }

        let sorted: Vec<f64> = order.iter().map(|&i| fitness[i]).collect();
        let weights: Vec<f64> = assign_ranks(&sorted)
            .into_iter()
            .map(|rank| self.rank_weight(rank, population.len()))
            .collect();

        let total: f64 = weights.iter().sum();
        let mut cumulative = Vec::with_capacity(weights.len());
        let mut running = 0.0;
        for weight in &weights {
            running += if total > 0.0 && total.is_finite() {
                weight / total
            } else {
                1.0 / weights.len() as f64
            };
            cumulative.push(running);
        }
        if let Some(last) = cumulative.last_mut() {
            *last = 1.0;
        }

        Ok(RankTable {
            key: PopulationKey::of(population),
            order,
            cumulative,
        })
    }
}

/// Assigns ranks `1..=n` to fitness values sorted from worst to best; ties share a rank.
fn assign_ranks(sorted: &[f64]) -> Vec<usize> {
    let mut ranks = Vec::with_capacity(sorted.len());
    for (position, &value) in sorted.iter().enumerate() {
        let rank = match (position.checked_sub(1), ranks.last()) {
            (Some(previous), Some(&previous_rank))
                if value == sorted[previous] || (value - sorted[previous]).abs() <= TIE_TOLERANCE =>
            {
                previous_rank
            }
            _ => position + 1,
        };
        ranks.push(rank);
    }
    ranks
}

impl Default for RankSelection {
    fn default() -> Self {
        Self {
            selection_pressure: 1.5,
            ranking_mode: RankingMode::Linear,
            maximize: true,
            rng: RandomNumberGenerator::new(),
            table: None,
        }
    }
}

impl<C> SelectionStrategy<C> for RankSelection
where
    C: Chromosome,
{
    fn select_individual<'a>(&mut self, population: &'a [C]) -> Result<&'a C> {
        if population.is_empty() {
            return Err(GeneticError::EmptyPopulation);
        }

        let key = PopulationKey::of(population);
        if self.table.as_ref().map_or(true, |table| table.key != key) {
            self.table = Some(self.build_table(population)?);
        }

        let r = self.rng.next_f64();
        let picked = self.table.as_ref().and_then(|table| {
            let position = table.cumulative.partition_point(|&upper| upper <= r);
            // Falls back to the best individual if rounding missed every interval
            table
                .order
                .get(position)
                .or_else(|| table.order.last())
                .copied()
        });

        match picked {
            Some(index) => Ok(&population[index]),
            None => Err(GeneticError::EmptyPopulation),
        }
    }

    fn clear_cache(&mut self) {
        self.table = None;
    }
}
