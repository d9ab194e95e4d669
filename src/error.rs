//! # Error Types
//!
//! This module defines the error type shared by every part of the engine.
//! Errors fall into three groups:
//!
//! - configuration errors, raised while assembling an engine,
//! - argument errors, raised when an operator is constructed or called with
//!   values it cannot work with (mismatched parent lengths, probabilities
//!   outside `[0, 1]`, replacement counts that exceed the population),
//! - evaluation errors, raised when a fitness function produces an unusable score.
//!
//! An empty population at run time is not an error: the engine logs it and
//! terminates cleanly.
//!
//! ## Examples
//!
//! ```rust
//! use genetic_engine::error::{GeneticError, Result};
//!
//! fn checked_rate(rate: f64) -> Result<f64> {
//!     if !(0.0..=1.0).contains(&rate) {
//!         return Err(GeneticError::InvalidArgument(format!(
//!             "rate must be in [0.0, 1.0], got: {}",
//!             rate
//!         )));
//!     }
//!     Ok(rate)
//! }
//!
//! assert!(checked_rate(0.5).is_ok());
//! assert!(checked_rate(1.5).is_err());
//! ```
//!
//! Using the `OptionExt` trait to convert `Option` to `Result`:
//!
//! ```rust
//! use genetic_engine::error::{GeneticError, OptionExt};
//!
//! fn best_score(scores: &[i32]) -> genetic_engine::error::Result<i32> {
//!     scores.iter().max().cloned().ok_or_else_genetic(|| GeneticError::EmptyPopulation)
//! }
//!
//! assert_eq!(best_score(&[3, 9, 4]).unwrap(), 9);
//! assert!(best_score(&[]).is_err());
//! ```

use thiserror::Error;

/// Represents errors that can occur while configuring or running the engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeneticError {
    /// A required component is missing or a configuration value is invalid.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// An operator received a parameter or input it cannot work with.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Two chromosomes that must be combined have different lengths.
    #[error("Parents must have the same length: {left} != {right}")]
    LengthMismatch { left: usize, right: usize },

    /// A gene value lies outside the domain of its encoding.
    #[error("Invalid gene: {0}")]
    InvalidGene(String),

    /// An operator was asked to work on an empty population.
    #[error("Empty population error: Cannot operate on an empty population")]
    EmptyPopulation,

    /// The fitness function produced an unusable score.
    #[error("Fitness calculation error: {0}")]
    FitnessCalculation(String),

    /// The generational loop reached an inconsistent state.
    #[error("Evolution error: {0}")]
    Evolution(String),
}

/// A specialized Result type for engine operations.
pub type Result<T> = std::result::Result<T, GeneticError>;

/// Extension trait for Option to convert to Result with a custom error.
pub trait OptionExt<T> {
    /// Converts an `Option<T>` to a `Result<T, GeneticError>` using
    /// a closure to generate the error.
    fn ok_or_else_genetic<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> GeneticError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_else_genetic<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> GeneticError,
    {
        self.ok_or_else(err_fn)
    }
}

/// Checks that `value` is a probability, naming the offending parameter on failure.
pub(crate) fn ensure_probability(name: &str, value: f64) -> Result<f64> {
    if !(0.0..=1.0).contains(&value) {
        return Err(GeneticError::InvalidArgument(format!(
            "{} must be in [0.0, 1.0], got: {:.4}",
            name, value
        )));
    }
    Ok(value)
}

/// Checks that two chromosomes can be recombined and returns their shared length.
pub(crate) fn ensure_same_length(left: usize, right: usize) -> Result<usize> {
    if left != right {
        return Err(GeneticError::LengthMismatch { left, right });
    }
    Ok(left)
}
