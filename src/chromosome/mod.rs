//! # Chromosomes
//!
//! A chromosome is one candidate solution: a fixed-length sequence of genes of
//! a single type, plus a cached fitness score.
//!
//! Fitness follows an explicit caching policy. `fitness()` is `None` until the
//! engine evaluates the chromosome and stores the score with `set_fitness`.
//! Operators never evaluate a chromosome themselves; they read [`Chromosome::score`],
//! which treats an unevaluated chromosome as the worst possible individual.
//! Changing a gene through `set_gene` clears the cached score.
//!
//! Three encodings are provided, each with a matching [`ChromosomeFactory`]:
//!
//! - [`BinaryChromosome`]: bits in `{0, 1}`
//! - [`IntegerChromosome`]: integers in `[min, max]`
//! - [`RealChromosome`]: reals in `[lower, upper]`
//!
//! ## Example
//!
//! ```rust
//! use genetic_engine::chromosome::{BinaryChromosomeFactory, Chromosome, ChromosomeFactory};
//!
//! let factory = BinaryChromosomeFactory::new();
//! let mut chromosome = factory.create(vec![1, 0, 1]).unwrap();
//! assert_eq!(chromosome.len(), 3);
//! assert_eq!(chromosome.fitness(), None);
//!
//! chromosome.set_fitness(5.0);
//! assert_eq!(chromosome.score(), 5.0);
//!
//! assert!(factory.create(vec![1, 2, 0]).is_err());
//! ```

pub mod binary;
pub mod integer;
pub mod real;

use std::fmt::Debug;

use crate::error::Result;
use crate::rng::RandomNumberGenerator;

pub use binary::{BinaryChromosome, BinaryChromosomeFactory};
pub use integer::{IntegerChromosome, IntegerChromosomeFactory};
pub use real::{RealChromosome, RealChromosomeFactory};

/// Trait for candidate solutions encoded as a fixed-length gene sequence.
///
/// The length of a chromosome never changes after construction. Implementors
/// must keep every gene inside the domain of their encoding.
pub trait Chromosome: Clone + Debug + Send + Sync {
    /// The type of a single gene.
    type Gene: Copy + Debug + PartialEq + Send + Sync;

    /// Returns the genes as a slice.
    fn genes(&self) -> &[Self::Gene];

    /// Replaces the gene at `index`.
    ///
    /// Fails if the index is out of range or the value lies outside the
    /// encoding's domain. A successful write clears the cached fitness.
    fn set_gene(&mut self, index: usize, value: Self::Gene) -> Result<()>;

    /// Returns the cached fitness, or `None` if the chromosome has not been evaluated.
    fn fitness(&self) -> Option<f64>;

    /// Stores an evaluated fitness score.
    fn set_fitness(&mut self, fitness: f64);

    /// Returns a copy of the genes.
    fn to_vec(&self) -> Vec<Self::Gene> {
        self.genes().to_vec()
    }

    /// Returns the number of genes.
    fn len(&self) -> usize {
        self.genes().len()
    }

    /// Returns `true` if the chromosome has no genes.
    fn is_empty(&self) -> bool {
        self.genes().is_empty()
    }

    /// Returns the gene at `index`, if any.
    fn gene(&self, index: usize) -> Option<Self::Gene> {
        self.genes().get(index).copied()
    }

    /// Returns the cached fitness, or negative infinity when unevaluated.
    ///
    /// This is the value every operator ranks by.
    fn score(&self) -> f64 {
        self.fitness().unwrap_or(f64::NEG_INFINITY)
    }
}

/// Builds chromosomes of one encoding.
///
/// Crossover operators produce every child through a factory, so a child is
/// always validated by the same rules as a freshly created chromosome.
pub trait ChromosomeFactory<C: Chromosome>: Debug + Send + Sync {
    /// Creates a chromosome from explicit genes.
    ///
    /// Fails if any gene lies outside the encoding's domain.
    fn create(&self, genes: Vec<C::Gene>) -> Result<C>;

    /// Creates a chromosome with `gene_length` uniformly random genes.
    fn random(&self, gene_length: usize, rng: &mut RandomNumberGenerator) -> Result<C>;

    /// Creates `size` random chromosomes of `gene_length` genes each.
    fn create_population(
        &self,
        size: usize,
        gene_length: usize,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<C>> {
        (0..size).map(|_| self.random(gene_length, rng)).collect()
    }
}

/// Formats a gene slice as `[a, b, c]` for `Display` implementations.
pub(crate) fn write_genes<G: std::fmt::Display>(
    f: &mut std::fmt::Formatter<'_>,
    genes: &[G],
) -> std::fmt::Result {
    write!(f, "[")?;
    for (i, gene) in genes.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", gene)?;
    }
    write!(f, "]")
}
