use crate::chromosome::Chromosome;
use crate::error::{GeneticError, Result};
use crate::rng::RandomNumberGenerator;
use crate::selection::selection_strategy::{PopulationKey, SelectionStrategy};

/// A selection strategy that selects individuals with probability proportional to their fitness.
///
/// Each individual owns the interval `[cumulative_before, cumulative_before + fitness / total)`
/// of the unit interval. A uniform draw in `[0, 1)` picks the individual whose interval
/// contains it. The table of interval bounds is built once per population and reused
/// until a different population is passed in or the cache is cleared.
///
/// Roulette wheel selection requires every fitness to be evaluated, finite and
/// non-negative, with a positive total.
///
/// # Examples
///
/// ```
/// use genetic_engine::chromosome::{Chromosome, IntegerChromosome};
/// use genetic_engine::rng::RandomNumberGenerator;
/// use genetic_engine::selection::{RouletteWheelSelection, SelectionStrategy};
///
/// let mut population = Vec::new();
/// for (i, fitness) in [0.0, 3.0, 0.0].iter().enumerate() {
///     let mut chromosome = IntegerChromosome::new(vec![i as i64], 0, 10).unwrap();
///     chromosome.set_fitness(*fitness);
///     population.push(chromosome);
/// }
///
/// let mut selection = RouletteWheelSelection::new().with_rng(RandomNumberGenerator::from_seed(1));
/// // Only the individual with non-zero fitness owns a slice of the wheel
/// let picked = selection.select_individual(&population).unwrap();
/// assert_eq!(picked.genes(), &[1]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RouletteWheelSelection {
    rng: RandomNumberGenerator,
    wheel: Option<Wheel>,
}

#[derive(Debug, Clone)]
struct Wheel {
    key: PopulationKey,
    /// Exclusive upper bound of each individual's interval.
    upper_bounds: Vec<f64>,
}

impl RouletteWheelSelection {
    /// Creates a new RouletteWheelSelection strategy seeded from system entropy.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rng(mut self, rng: RandomNumberGenerator) -> Self {
        self.rng = rng;
        self
    }

    /// Calculates the upper bound of each individual's interval on the wheel.
    ///
    /// # Errors
    ///
    /// Returns an error if any individual is unevaluated, if any fitness is negative
    /// or non-finite, or if all fitness values are zero.
    fn build_wheel<C: Chromosome>(population: &[C]) -> Result<Vec<f64>> {
        let mut fitness = Vec::with_capacity(population.len());
        for (index, individual) in population.iter().enumerate() {
            let value = individual.fitness().ok_or_else(|| {
                GeneticError::InvalidArgument(format!(
                    "Roulette wheel selection requires evaluated individuals, individual {} has no fitness",
                    index
                ))
            })?;
            if !value.is_finite() || value < 0.0 {
                return Err(GeneticError::InvalidArgument(format!(
                    "Roulette wheel selection requires finite non-negative fitness values, got: {}",
                    value
                )));
            }
            fitness.push(value);
        }

        let total: f64 = fitness.iter().sum();
        if total <= 0.0 {
            return Err(GeneticError::InvalidArgument(
                "Roulette wheel selection requires at least one individual with non-zero fitness"
                    .to_string(),
            ));
        }

        let mut cumulative = 0.0;
        Ok(fitness
            .iter()
            .map(|value| {
                cumulative += value / total;
                cumulative
            })
            .collect())
    }
}

impl<C> SelectionStrategy<C> for RouletteWheelSelection
where
    C: Chromosome,
{
    fn select_individual<'a>(&mut self, population: &'a [C]) -> Result<&'a C> {
        if population.is_empty() {
            return Err(GeneticError::EmptyPopulation);
        }

        let key = PopulationKey::of(population);
        if self.wheel.as_ref().map_or(true, |wheel| wheel.key != key) {
            let upper_bounds = Self::build_wheel(population)?;
            self.wheel = Some(Wheel { key, upper_bounds });
        }

        let r = self.rng.next_f64();
        let index = self.wheel.as_ref().map_or(population.len(), |wheel| {
            wheel.upper_bounds.partition_point(|&upper| upper <= r)
        });
        if index < population.len() {
            return Ok(&population[index]);
        }

        // Rounding left the last bound below the draw
        Ok(&population[self.rng.gen_index(population.len())])
    }

    fn clear_cache(&mut self) {
        self.wheel = None;
    }
}
