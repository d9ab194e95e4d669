//! # EvolutionOptions
//!
//! The `EvolutionOptions` struct holds the run-level settings of the engine:
//! how many generations to run, how large the population is, when a solution
//! counts as good enough, how much to log, and an optional seed for the
//! engine's own random draws.
//!
//! ## Example
//!
//! ```rust
//! use genetic_engine::evolution::options::{EvolutionOptions, LogLevel};
//!
//! // Create a new EvolutionOptions instance with custom parameters
//! let custom_options = EvolutionOptions::new(200, 50, LogLevel::Minimal);
//! assert_eq!(custom_options.get_population_size(), 50);
//!
//! // Create a new EvolutionOptions instance with default parameters
//! let default_options = EvolutionOptions::default();
//! assert_eq!(default_options.get_max_generations(), 100);
//! assert_eq!(default_options.get_target_fitness(), f64::INFINITY);
//! ```
//!
//! ## Fields
//!
//! - `max_generations`: The number of generations after which the run stops.
//! - `population_size`: The number of individuals in every generation.
//! - `target_fitness`: The run stops as soon as the best fitness reaches this value.
//!   The default of positive infinity never triggers for finite scores.
//! - `log_level`: The logging level for the run, represented by the `LogLevel` enum.
//! - `seed`: Seeds the generator used to build a random initial population.
//!
//! ## LogLevel
//!
//! - `Verbose`: One `info` event per generation plus a `debug` event per individual.
//! - `Minimal`: One `info` event per generation and a summary at the end.
//! - `None`: Disables per-generation logging. Warnings and errors are still emitted.

/// Controls how much the engine reports through `tracing`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Verbose,
    Minimal,
    #[default]
    None,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct EvolutionOptions {
    max_generations: usize,
    population_size: usize,
    #[cfg_attr(feature = "serde", serde(with = "target_fitness_serde"))]
    target_fitness: f64,
    log_level: LogLevel,
    seed: Option<u64>,
}

impl EvolutionOptions {
    pub fn new(max_generations: usize, population_size: usize, log_level: LogLevel) -> Self {
        Self {
            max_generations,
            population_size,
            log_level,
            ..Self::default()
        }
    }

    pub fn get_max_generations(&self) -> usize {
        self.max_generations
    }

    pub fn get_population_size(&self) -> usize {
        self.population_size
    }

    pub fn get_target_fitness(&self) -> f64 {
        self.target_fitness
    }

    pub fn get_log_level(&self) -> LogLevel {
        self.log_level
    }

    pub fn get_seed(&self) -> Option<u64> {
        self.seed
    }

    /// Sets the number of generations.
    pub fn set_max_generations(&mut self, max_generations: usize) {
        self.max_generations = max_generations;
    }

    /// Sets the population size.
    pub fn set_population_size(&mut self, population_size: usize) {
        self.population_size = population_size;
    }

    /// Sets the fitness at which the run stops early.
    pub fn set_target_fitness(&mut self, target_fitness: f64) {
        self.target_fitness = target_fitness;
    }

    /// Sets the log level.
    pub fn set_log_level(&mut self, log_level: LogLevel) {
        self.log_level = log_level;
    }

    pub fn set_seed(&mut self, seed: Option<u64>) {
        self.seed = seed;
    }

    /// Returns a builder for creating an `EvolutionOptions` instance.
    ///
    /// # Example
    ///
    /// ```rust
    /// use genetic_engine::evolution::options::{EvolutionOptions, LogLevel};
    ///
    /// let options = EvolutionOptions::builder()
    ///     .max_generations(200)
    ///     .population_size(50)
    ///     .target_fitness(8.0)
    ///     .log_level(LogLevel::Minimal)
    ///     .seed(42)
    ///     .build();
    ///
    /// assert_eq!(options.get_seed(), Some(42));
    /// ```
    pub fn builder() -> EvolutionOptionsBuilder {
        EvolutionOptionsBuilder::default()
    }
}

impl Default for EvolutionOptions {
    fn default() -> Self {
        Self {
            max_generations: 100,
            population_size: 100,
            target_fitness: f64::INFINITY,
            log_level: LogLevel::None,
            seed: None,
        }
    }
}

/// Builder for `EvolutionOptions`.
///
/// Unset fields take the values of `EvolutionOptions::default()`.
#[derive(Debug, Clone, Default)]
pub struct EvolutionOptionsBuilder {
    max_generations: Option<usize>,
    population_size: Option<usize>,
    target_fitness: Option<f64>,
    log_level: Option<LogLevel>,
    seed: Option<u64>,
}

impl EvolutionOptionsBuilder {
    /// Sets the number of generations.
    pub fn max_generations(mut self, value: usize) -> Self {
        self.max_generations = Some(value);
        self
    }

    /// Sets the population size.
    pub fn population_size(mut self, value: usize) -> Self {
        self.population_size = Some(value);
        self
    }

    pub fn target_fitness(mut self, value: f64) -> Self {
        self.target_fitness = Some(value);
        self
    }

    /// Sets the log level.
    pub fn log_level(mut self, value: LogLevel) -> Self {
        self.log_level = Some(value);
        self
    }

    pub fn seed(mut self, value: u64) -> Self {
        self.seed = Some(value);
        self
    }

    /// Builds the `EvolutionOptions` instance.
    pub fn build(self) -> EvolutionOptions {
        let defaults = EvolutionOptions::default();
        EvolutionOptions {
            max_generations: self.max_generations.unwrap_or(defaults.max_generations),
            population_size: self.population_size.unwrap_or(defaults.population_size),
            target_fitness: self.target_fitness.unwrap_or(defaults.target_fitness),
            log_level: self.log_level.unwrap_or(defaults.log_level),
            seed: self.seed.or(defaults.seed),
        }
    }
}

/// Writes a target of positive infinity ("no target") as `null`, since JSON
/// has no representation for infinite numbers.
#[cfg(feature = "serde")]
mod target_fitness_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(target: &f64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let target = (*target != f64::INFINITY).then_some(*target);
        target.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::INFINITY))
    }
}
