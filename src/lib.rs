//! # genetic-engine
//!
//! A generic evolutionary optimization engine. A population of chromosomes is
//! improved generation by generation through pluggable operators:
//!
//! - [`selection`] picks parents,
//! - [`crossover`] recombines them,
//! - [`mutation`] perturbs the children,
//! - [`replacement`] decides who survives.
//!
//! The [`evolution`] module ties the operators to a caller-supplied fitness
//! function and runs the loop. Higher fitness is always better.

pub mod caching;
pub mod chromosome;
pub mod crossover;
pub mod error;
pub mod evolution;
pub mod mutation;
pub mod replacement;
pub mod rng;
pub mod selection;

// Re-export commonly used types for convenience
pub use chromosome::{Chromosome, ChromosomeFactory};
pub use error::{GeneticError, OptionExt, Result};
pub use evolution::{EvolutionOptions, GeneticAlgorithm, GeneticAlgorithmBuilder, LogLevel};
