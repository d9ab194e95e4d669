//! # Evolution
//!
//! The generational engine and everything needed to configure it.

pub mod builder;
pub mod engine;
pub mod fitness;
pub mod options;

pub use builder::GeneticAlgorithmBuilder;
pub use engine::{EngineState, EvolutionResult, GenerationReport, GeneticAlgorithm, Termination};
pub use fitness::{FeasibilityCheck, FitnessFunction};
pub use options::{EvolutionOptions, EvolutionOptionsBuilder, LogLevel};
