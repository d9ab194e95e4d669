use crate::chromosome::Chromosome;
use crate::error::{GeneticError, Result};
use crate::replacement::{count_from_percentage, sort_by_fitness_desc, ReplacementStrategy};

/// Carries the best individuals of the current generation over unchanged.
///
/// The next population is formed from:
///
/// 1. the top `elite_count` individuals of the current population,
/// 2. the best offspring, as many as there are free slots,
/// 3. the next-best current individuals, if the offspring ran out.
///
/// # Examples
///
/// ```
/// use genetic_engine::chromosome::{Chromosome, IntegerChromosome};
/// use genetic_engine::replacement::{ElitismReplacement, ReplacementStrategy};
///
/// let scored = |fitness: &[f64]| -> Vec<IntegerChromosome> {
///     fitness
///         .iter()
///         .map(|&f| {
///             let mut c = IntegerChromosome::new(vec![f as i64], 0, 100).unwrap();
///             c.set_fitness(f);
///             c
///         })
///         .collect()
/// };
///
/// let strategy = ElitismReplacement::new(1).unwrap();
/// let next = strategy
///     .replace_population(scored(&[9.0, 3.0]), scored(&[1.0, 2.0]))
///     .unwrap();
///
/// let fitness: Vec<f64> = next.iter().map(|c| c.score()).collect();
/// assert_eq!(fitness, vec![9.0, 2.0]);
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElitismReplacement {
    elite_count: usize,
}

impl ElitismReplacement {
    /// # Errors
    ///
    /// Returns `GeneticError::InvalidArgument` if `elite_count` is zero.
    pub fn new(elite_count: usize) -> Result<Self> {
        if elite_count == 0 {
            return Err(GeneticError::InvalidArgument(
                "Elite count must be positive".to_string(),
            ));
        }
        Ok(Self { elite_count })
    }

    /// Keeps `percentage` of `population_size` as elites, at least one.
    pub fn with_percentage(population_size: usize, percentage: f64) -> Result<Self> {
        Self::new(count_from_percentage(population_size, percentage, 1)?)
    }

    /// Keeps five percent of `population_size` as elites, at least two.
    pub fn with_standard_rate(population_size: usize) -> Result<Self> {
        Self::new(count_from_percentage(population_size, 0.05, 2)?)
    }

    pub fn elite_count(&self) -> usize {
        self.elite_count
    }
}

impl<C> ReplacementStrategy<C> for ElitismReplacement
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

        let size = current.len();
        sort_by_fitness_desc(&mut current);
        sort_by_fitness_desc(&mut offspring);

        let elites = self.elite_count.min(size);
        let mut rest = current.split_off(elites);
        let mut next = current;

        let open = size - elites;
        next.extend(offspring.into_iter().take(open));

        let missing = size - next.len();
        rest.truncate(missing);
        next.append(&mut rest);

        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chromosome::RealChromosome;

    fn scored(fitness: &[f64]) -> Vec<RealChromosome> {
        fitness
            .iter()
            .map(|&f| {
                let mut chromosome = RealChromosome::new(vec![f], 0.0, 100.0).unwrap();
                chromosome.set_fitness(f);
                chromosome
            })
            .collect()
    }

    fn fitness_of(population: &[RealChromosome]) -> Vec<f64> {
        population.iter().map(|c| c.score()).collect()
    }

    #[test]
    fn test_elites_survive() {
        let strategy = ElitismReplacement::new(2).unwrap();
        let next = strategy
            .replace_population(
                scored(&[90.0, 80.0, 85.0, 75.0, 70.0]),
                scored(&[10.0, 60.0, 20.0, 50.0, 40.0]),
            )
            .unwrap();

        assert_eq!(fitness_of(&next), vec![90.0, 85.0, 60.0, 50.0, 40.0]);
    }

    #[test]
    fn test_two_elites_with_two_offspring() {
        let strategy = ElitismReplacement::new(2).unwrap();
        let next = strategy
            .replace_population(
                scored(&[90.0, 80.0, 70.0, 60.0, 50.0]),
                scored(&[85.0, 75.0]),
            )
            .unwrap();

        assert_eq!(fitness_of(&next), vec![90.0, 80.0, 85.0, 75.0, 70.0]);
    }

    #[test]
    fn test_backfills_from_current_when_offspring_run_short() {
        let strategy = ElitismReplacement::new(1).unwrap();
        let next = strategy
            .replace_population(scored(&[90.0, 80.0, 85.0, 75.0, 70.0]), scored(&[95.0]))
            .unwrap();

        assert_eq!(fitness_of(&next), vec![90.0, 95.0, 85.0, 80.0, 75.0]);
    }

    #[test]
    fn test_elite_count_larger_than_population() {
        let strategy = ElitismReplacement::new(10).unwrap();
        let next = strategy
            .replace_population(scored(&[1.0, 3.0, 2.0]), scored(&[9.0, 9.0, 9.0]))
            .unwrap();

        assert_eq!(fitness_of(&next), vec![3.0, 2.0, 1.0]);
    }

    #[test]
    fn test_empty_inputs() {
        let strategy = ElitismReplacement::new(1).unwrap();
        assert!(strategy
            .replace_population(Vec::new(), scored(&[1.0]))
            .unwrap()
            .is_empty());
        assert_eq!(
            fitness_of(&strategy.replace_population(scored(&[2.0, 1.0]), Vec::new()).unwrap()),
            vec![2.0, 1.0]
        );
    }

    #[test]
    fn test_constructors() {
        assert!(ElitismReplacement::new(0).is_err());
        assert_eq!(ElitismReplacement::with_percentage(50, 0.1).unwrap().elite_count(), 5);
        assert_eq!(ElitismReplacement::with_percentage(10, 0.01).unwrap().elite_count(), 1);
        assert!(ElitismReplacement::with_percentage(10, 1.5).is_err());
        assert_eq!(ElitismReplacement::with_standard_rate(200).unwrap().elite_count(), 10);
        assert_eq!(ElitismReplacement::with_standard_rate(20).unwrap().elite_count(), 2);
    }
}
