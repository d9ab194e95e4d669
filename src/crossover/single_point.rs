use crate::chromosome::{Chromosome, ChromosomeFactory};
use crate::crossover::CrossoverStrategy;
use crate::error::{ensure_probability, ensure_same_length, GeneticError, Result};
use crate::rng::RandomNumberGenerator;

/// Cuts both parents at one point and swaps their tails.
///
/// The cut point `k` is drawn uniformly from `[1, len - 1]`; the first child
/// takes `parent1[..k]` followed by `parent2[k..]`, the second child the
/// opposite. Parents shorter than two genes cannot be cut and are copied.
#[derive(Debug, Clone)]
pub struct SinglePointCrossover<F> {
    crossover_rate: f64,
    factory: F,
    rng: RandomNumberGenerator,
}

impl<F> SinglePointCrossover<F> {
    /// Creates a single point crossover applied with probability `crossover_rate`.
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

    /// Recombines the parents at a known cut point, ignoring the crossover rate.
    ///
    /// # Errors
    ///
    /// Returns an error if the parents differ in length or if `point` lies
    /// outside `[1, len - 1]`.
    pub fn crossover_at<C>(&self, parent1: &C, parent2: &C, point: usize) -> Result<(C, C)>
    where
        C: Chromosome,
        F: ChromosomeFactory<C>,
    {
        let len = ensure_same_length(parent1.len(), parent2.len())?;
        if point == 0 || point >= len {
            return Err(GeneticError::InvalidArgument(format!(
                "Crossover point must be in [1, {}], got: {}",
                len.saturating_sub(1),
                point
            )));
        }

        let (head1, tail1) = parent1.genes().split_at(point);
        let (head2, tail2) = parent2.genes().split_at(point);

        let child1 = self.factory.create([head1, tail2].concat())?;
        let child2 = self.factory.create([head2, tail1].concat())?;
        Ok((child1, child2))
    }
}

impl<C, F> CrossoverStrategy<C> for SinglePointCrossover<F>
where
    C: Chromosome,
    F: ChromosomeFactory<C>,
{
    fn crossover(&mut self, parent1: &C, parent2: &C) -> Result<(C, C)> {
        let len = ensure_same_length(parent1.len(), parent2.len())?;
        if len < 2 || !self.rng.chance(self.crossover_rate) {
            return Ok((parent1.clone(), parent2.clone()));
        }

        let point = self.rng.gen_range(1..len);
        self.crossover_at(parent1, parent2, point)
    }
}
