use std::fmt;
use std::ops::ControlFlow;

use super::fitness::{FeasibilityCheck, FitnessFunction};
use super::options::{EvolutionOptions, LogLevel};
use crate::chromosome::Chromosome;
use crate::crossover::CrossoverStrategy;
use crate::error::{GeneticError, OptionExt, Result};
use crate::mutation::MutationStrategy;
use crate::replacement::ReplacementStrategy;
use crate::selection::SelectionStrategy;

/// Lifecycle of a [`GeneticAlgorithm`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// Built but not yet run.
    Idle,
    Running,
    /// The run has ended; the final population and best record stay readable.
    Terminated,
}

/// Why a run stopped.
#[derive(Debug, Clone, PartialEq)]
pub enum Termination {
    /// The configured number of generations was reached.
    MaxGenerations,
    /// The best fitness reached the target fitness.
    TargetReached,
    /// The observer asked the run to stop.
    Stopped,
    /// The run could not start.
    Aborted(String),
}

/// Summary of one generation, handed to the observer of [`GeneticAlgorithm::run_with`].
#[derive(Debug, Clone)]
pub struct GenerationReport<'a, C> {
    /// `0` for the initial population.
    pub generation: usize,
    pub best_fitness: f64,
    pub mean_fitness: f64,
    /// The fittest individual of this generation.
    pub best: &'a C,
}

/// Represents the result of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct EvolutionResult<C> {
    /// The fittest individual seen over the whole run, if any individual was evaluated.
    pub best: Option<C>,
    pub best_fitness: Option<f64>,
    /// The number of generations bred after the initial population.
    pub generations: usize,
    pub termination: Termination,
}

/// The generational loop.
///
/// Each generation the engine breeds `population_size` offspring
/// (select two parents, cross them over, mutate each child, evaluate it),
/// hands current population and offspring to the replacement strategy, and
/// records the best individual. The best individual ever seen is kept
/// separately and only replaced by a strictly fitter one, so it never gets worse
/// even when replacement discards it.
///
/// Engines are assembled with [`GeneticAlgorithmBuilder`](super::GeneticAlgorithmBuilder).
pub struct GeneticAlgorithm<C>
where
    C: Chromosome,
{
    selection: Box<dyn SelectionStrategy<C>>,
    crossover: Box<dyn CrossoverStrategy<C>>,
    mutation: Box<dyn MutationStrategy<C>>,
    replacement: Box<dyn ReplacementStrategy<C>>,
    fitness: Box<dyn FitnessFunction<C>>,
    feasibility: Option<Box<dyn FeasibilityCheck<C>>>,
    options: EvolutionOptions,
    population: Vec<C>,
    generation: usize,
    best: Option<C>,
    state: EngineState,
}

/// The operators and callbacks an engine is built from.
pub(crate) struct Operators<C: Chromosome> {
    pub(crate) selection: Box<dyn SelectionStrategy<C>>,
    pub(crate) crossover: Box<dyn CrossoverStrategy<C>>,
    pub(crate) mutation: Box<dyn MutationStrategy<C>>,
    pub(crate) replacement: Box<dyn ReplacementStrategy<C>>,
    pub(crate) fitness: Box<dyn FitnessFunction<C>>,
    pub(crate) feasibility: Option<Box<dyn FeasibilityCheck<C>>>,
}

impl<C> GeneticAlgorithm<C>
where
    C: Chromosome,
{
    pub(crate) fn new(operators: Operators<C>, options: EvolutionOptions, population: Vec<C>) -> Self {
        Self {
            selection: operators.selection,
            crossover: operators.crossover,
            mutation: operators.mutation,
            replacement: operators.replacement,
            fitness: operators.fitness,
            feasibility: operators.feasibility,
            options,
            population,
            generation: 0,
            best: None,
            state: EngineState::Idle,
        }
    }

    pub fn population(&self) -> &[C] {
        &self.population
    }

    /// The best fitness seen so far over all generations.
    pub fn best_fitness(&self) -> Option<f64> {
        self.best.as_ref().and_then(Chromosome::fitness)
    }

    /// The fittest individual seen so far over all generations.
    pub fn best_individual(&self) -> Option<&C> {
        self.best.as_ref()
    }

    /// The last generation that completed; `0` is the initial population.
    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn options(&self) -> &EvolutionOptions {
        &self.options
    }

    /// Runs the loop until a termination condition is met.
    pub fn run(&mut self) -> Result<EvolutionResult<C>> {
        self.run_with(|_| ControlFlow::Continue(()))
    }

    /// Runs the loop, calling `observer` after every generation.
    ///
    /// Returning `ControlFlow::Break(())` from the observer stops the run at
    /// that generation boundary.
    ///
    /// An empty population does not produce an error: the run is logged as
    /// aborted and the result carries [`Termination::Aborted`].
    ///
    /// # Errors
    ///
    /// Returns an error if an operator fails, if the fitness function returns
    /// NaN, if replacement changes the population size, or if the engine has
    /// already run.
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(
            population_size = self.options.get_population_size(),
            max_generations = self.options.get_max_generations()
        )
    )]
    pub fn run_with<F>(&mut self, observer: F) -> Result<EvolutionResult<C>>
    where
        F: FnMut(&GenerationReport<'_, C>) -> ControlFlow<()>,
    {
        if self.state != EngineState::Idle {
            return Err(GeneticError::Evolution(
                "Engine has already run; build a new engine to run again".to_string(),
            ));
        }

        if self.population.is_empty() {
            let reason = "Cannot run evolution on an empty population".to_string();
            tracing::error!("{}", reason);
            self.state = EngineState::Terminated;
            return Ok(self.result(Termination::Aborted(reason)));
        }

        self.state = EngineState::Running;
        let outcome = self.evolve(observer);
        self.state = EngineState::Terminated;
        let termination = outcome?;

        if self.options.get_log_level() != LogLevel::None {
            tracing::info!(
                generations = self.generation,
                best_fitness = ?self.best_fitness(),
                termination = ?termination,
                "Evolution finished"
            );
        }

        Ok(self.result(termination))
    }

    fn evolve<F>(&mut self, mut observer: F) -> Result<Termination>
    where
        F: FnMut(&GenerationReport<'_, C>) -> ControlFlow<()>,
    {
        for individual in self.population.iter_mut() {
            evaluate(self.fitness.as_ref(), individual)?;
        }
        if let Some(termination) = self.complete_generation(&mut observer)? {
            return Ok(termination);
        }

        while self.generation < self.options.get_max_generations() {
            let next = self.generation + 1;
            self.mutation.set_generation(next);
            self.selection.clear_cache();

            // The current population stays in place until its successor passes every check
            let offspring = self.breed()?;
            let mut population = self
                .replacement
                .replace_population(self.population.clone(), offspring)?;
            if population.len() != self.options.get_population_size() {
                return Err(GeneticError::Evolution(format!(
                    "Population size changed in generation {}: expected {}, got {}",
                    next,
                    self.options.get_population_size(),
                    population.len()
                )));
            }

            for individual in population.iter_mut() {
                evaluate(self.fitness.as_ref(), individual)?;
            }
            self.population = population;
            self.generation = next;

            if let Some(termination) = self.complete_generation(&mut observer)? {
                return Ok(termination);
            }
        }

        Ok(Termination::MaxGenerations)
    }

    /// Breeds one generation's worth of evaluated offspring.
    fn breed(&mut self) -> Result<Vec<C>> {
        let size = self.options.get_population_size();
        let mut offspring = Vec::with_capacity(size);

        while offspring.len() < size {
            let parent1 = self.selection.select_individual(&self.population)?;
            let parent2 = self.selection.select_individual(&self.population)?;
            let (child1, child2) = self.crossover.crossover(parent1, parent2)?;

            for child in [child1, child2] {
                if offspring.len() == size {
                    break;
                }
                let mut child = self.mutate(child)?;
                evaluate(self.fitness.as_ref(), &mut child)?;
                offspring.push(child);
            }
        }

        Ok(offspring)
    }

    /// Mutates a child, keeping the child itself if the mutant is infeasible.
    fn mutate(&mut self, child: C) -> Result<C> {
        let mutant = self.mutation.mutate(&child)?;
        match &self.feasibility {
            Some(check) if !check.is_feasible(&mutant) => {
                tracing::trace!("Discarding infeasible mutant");
                Ok(child)
            }
            _ => Ok(mutant),
        }
    }

    /// Records the best individual, reports the generation and checks the stop conditions.
    fn complete_generation<F>(&mut self, observer: &mut F) -> Result<Option<Termination>>
    where
        F: FnMut(&GenerationReport<'_, C>) -> ControlFlow<()>,
    {
        let best = self
            .population
            .iter()
            .max_by(|a, b| a.score().total_cmp(&b.score()))
            .ok_or_else_genetic(|| GeneticError::EmptyPopulation)?;
        let best_fitness = best.score();
        let mean_fitness =
            self.population.iter().map(Chromosome::score).sum::<f64>() / self.population.len() as f64;

        let improved = self
            .best
            .as_ref()
            .map_or(true, |overall| best_fitness > overall.score());
        if improved {
            self.best = Some(best.clone());
        }

        self.log_generation(best_fitness, mean_fitness);

        let report = GenerationReport {
            generation: self.generation,
            best_fitness,
            mean_fitness,
            best,
        };
        if observer(&report).is_break() {
            return Ok(Some(Termination::Stopped));
        }
        if best_fitness >= self.options.get_target_fitness() {
            return Ok(Some(Termination::TargetReached));
        }
        Ok(None)
    }

    fn log_generation(&self, best_fitness: f64, mean_fitness: f64) {
        match self.options.get_log_level() {
            LogLevel::None => {}
            LogLevel::Minimal => {
                tracing::info!(
                    generation = self.generation,
                    best_fitness,
                    mean_fitness,
                    "Generation complete"
                );
            }
            LogLevel::Verbose => {
                tracing::info!(
                    generation = self.generation,
                    best_fitness,
                    mean_fitness,
                    "Generation complete"
                );
                for (index, individual) in self.population.iter().enumerate() {
                    tracing::debug!(
                        generation = self.generation,
                        index,
                        fitness = individual.score(),
                        genes = ?individual.genes(),
                        "Individual"
                    );
                }
            }
        }
    }

    fn result(&self, termination: Termination) -> EvolutionResult<C> {
        EvolutionResult {
            best: self.best.clone(),
            best_fitness: self.best_fitness(),
            generations: self.generation,
            termination,
        }
    }
}

/// Scores a chromosome unless it already carries a fitness.
fn evaluate<C: Chromosome>(fitness: &dyn FitnessFunction<C>, chromosome: &mut C) -> Result<()> {
    if chromosome.fitness().is_some() {
        return Ok(());
    }
    let score = fitness.evaluate(chromosome);
    if score.is_nan() {
        return Err(GeneticError::FitnessCalculation(format!(
            "Fitness function returned NaN for genes {:?}",
            chromosome.genes()
        )));
    }
    chromosome.set_fitness(score);
    Ok(())
}

impl<C> fmt::Debug for GeneticAlgorithm<C>
where
    C: Chromosome,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneticAlgorithm")
            .field("selection", &self.selection)
            .field("crossover", &self.crossover)
            .field("mutation", &self.mutation)
            .field("replacement", &self.replacement)
            .field("options", &self.options)
            .field("state", &self.state)
            .field("generation", &self.generation)
            .field("population_size", &self.population.len())
            .finish_non_exhaustive()
    }
}
