use crate::chromosome::Chromosome;

/// Scores a chromosome. Higher is better.
///
/// Any closure `Fn(&C) -> f64` is a fitness function:
///
/// ```
/// use genetic_engine::chromosome::{BinaryChromosome, Chromosome};
/// use genetic_engine::evolution::FitnessFunction;
///
/// let ones = |c: &BinaryChromosome| c.count_ones() as f64;
/// let chromosome = BinaryChromosome::new(vec![1, 0, 1]).unwrap();
/// assert_eq!(ones.evaluate(&chromosome), 2.0);
/// ```
pub trait FitnessFunction<C>: Send + Sync
where
    C: Chromosome,
{
    fn evaluate(&self, chromosome: &C) -> f64;
}

impl<C, F> FitnessFunction<C> for F
where
    C: Chromosome,
    F: Fn(&C) -> f64 + Send + Sync,
{
    fn evaluate(&self, chromosome: &C) -> f64 {
        self(chromosome)
    }
}

/// Decides whether a mutated chromosome is an acceptable solution.
///
/// When the engine has a feasibility check, a mutant that fails it is dropped
/// and the child it was mutated from takes its place.
pub trait FeasibilityCheck<C>: Send + Sync
where
    C: Chromosome,
{
    fn is_feasible(&self, chromosome: &C) -> bool;
}

impl<C, F> FeasibilityCheck<C> for F
where
    C: Chromosome,
    F: Fn(&C) -> bool + Send + Sync,
{
    fn is_feasible(&self, chromosome: &C) -> bool {
        self(chromosome)
    }
}
