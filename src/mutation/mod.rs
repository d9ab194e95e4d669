//! # Mutation
//!
//! Mutation operators introduce random variation into a single chromosome.
//! They never touch their input: `mutate` always returns a new chromosome.
//! Genes that change lose the cached fitness through
//! [`Chromosome::set_gene`](crate::chromosome::Chromosome::set_gene); a mutant whose
//! genes did not change keeps its parent's score.
//!
//! Each operator is tied to the encoding it understands:
//!
//! - [`BinaryMutation`] for [`BinaryChromosome`](crate::chromosome::BinaryChromosome)
//! - [`IntegerMutation`] for [`IntegerChromosome`](crate::chromosome::IntegerChromosome)
//! - [`UniformMutation`] and [`NonUniformMutation`] for [`RealChromosome`](crate::chromosome::RealChromosome)

pub mod binary;
pub mod integer;
pub mod non_uniform;
pub mod uniform;

use std::fmt::Debug;

use crate::chromosome::Chromosome;
use crate::error::Result;

pub use binary::BinaryMutation;
pub use integer::IntegerMutation;
pub use non_uniform::NonUniformMutation;
pub use uniform::UniformMutation;

/// Trait for operators that perturb one chromosome.
pub trait MutationStrategy<C>: Debug + Send
where
    C: Chromosome,
{
    /// Returns a mutated copy of `individual`.
    fn mutate(&mut self, individual: &C) -> Result<C>;

    /// Tells the operator which generation is being bred.
    ///
    /// The engine calls this once per generation. Operators whose behavior
    /// does not depend on time ignore it.
    fn set_generation(&mut self, _generation: usize) {}
}
