//! # Crossover
//!
//! Crossover recombines two parents into two children. Parents are only read;
//! every child is built through a [`ChromosomeFactory`](crate::chromosome::ChromosomeFactory),
//! so it passes the same validation as a freshly created chromosome.
//!
//! Each operator is gated by a crossover rate: with probability `1 - rate`
//! the children are plain copies of the parents.

pub mod single_point;
pub mod two_point;
pub mod uniform;

use std::fmt::Debug;

use crate::chromosome::Chromosome;
use crate::error::Result;

pub use single_point::SinglePointCrossover;
pub use two_point::TwoPointCrossover;
pub use uniform::UniformCrossover;

/// Trait for operators that recombine two parents into two children.
///
/// # Examples
///
/// ```
/// use genetic_engine::chromosome::{BinaryChromosomeFactory, ChromosomeFactory, Chromosome};
/// use genetic_engine::crossover::{CrossoverStrategy, SinglePointCrossover};
/// use genetic_engine::error::Result;
///
/// fn main() -> Result<()> {
///     let factory = BinaryChromosomeFactory::new();
///     let left = factory.create(vec![0, 0, 0, 0])?;
///     let right = factory.create(vec![1, 1, 1, 1])?;
///
///     let mut crossover = SinglePointCrossover::new(1.0, factory)?;
///     let (first, second) = crossover.crossover(&left, &right)?;
///
///     assert_eq!(first.len(), 4);
///     // Every position holds one bit from each parent
///     for i in 0..4 {
///         assert_eq!(first.genes()[i] + second.genes()[i], 1);
///     }
///     Ok(())
/// }
/// ```
pub trait CrossoverStrategy<C>: Debug + Send
where
    C: Chromosome,
{
    /// Produces two children from two parents.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::LengthMismatch` if the parents differ in length,
    /// or any error the factory raises while building a child.
    fn crossover(&mut self, parent1: &C, parent2: &C) -> Result<(C, C)>;
}
