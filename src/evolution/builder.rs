use crate::chromosome::{Chromosome, ChromosomeFactory};
use crate::crossover::CrossoverStrategy;
use crate::error::{GeneticError, Result};
use crate::mutation::MutationStrategy;
use crate::replacement::ReplacementStrategy;
use crate::rng::RandomNumberGenerator;
use crate::selection::SelectionStrategy;

use super::engine::{GeneticAlgorithm, Operators};
use super::fitness::{FeasibilityCheck, FitnessFunction};
use super::options::EvolutionOptions;

/// Assembles and validates a [`GeneticAlgorithm`].
///
/// Selection, crossover, mutation, replacement, a chromosome factory and a
/// fitness function are required. The starting population is either supplied
/// with [`with_population`](Self::with_population) or generated by the factory
/// when a gene length is given with [`with_gene_length`](Self::with_gene_length).
///
/// # Examples
///
/// ```
/// use genetic_engine::chromosome::{BinaryChromosome, BinaryChromosomeFactory};
/// use genetic_engine::crossover::SinglePointCrossover;
/// use genetic_engine::evolution::{EvolutionOptions, GeneticAlgorithmBuilder};
/// use genetic_engine::mutation::BinaryMutation;
/// use genetic_engine::replacement::ElitismReplacement;
/// use genetic_engine::selection::TournamentSelection;
/// use genetic_engine::error::Result;
///
/// fn main() -> Result<()> {
///     let factory = BinaryChromosomeFactory::new();
///     let mut engine = GeneticAlgorithmBuilder::<BinaryChromosome>::new()
///         .with_selection(TournamentSelection::new(3)?)
///         .with_crossover(SinglePointCrossover::new(0.8, factory)?)
///         .with_mutation(BinaryMutation::new(0.05)?)
///         .with_replacement(ElitismReplacement::new(2)?)
///         .with_factory(factory)
///         .with_fitness(|c: &BinaryChromosome| c.count_ones() as f64)
///         .with_options(EvolutionOptions::builder().population_size(20).max_generations(10).build())
///         .with_gene_length(16)
///         .build()?;
///
///     let result = engine.run()?;
///     assert!(result.best_fitness.is_some());
///     Ok(())
/// }
/// ```
pub struct GeneticAlgorithmBuilder<C>
where
    C: Chromosome,
{
    selection: Option<Box<dyn SelectionStrategy<C>>>,
    crossover: Option<Box<dyn CrossoverStrategy<C>>>,
    mutation: Option<Box<dyn MutationStrategy<C>>>,
    replacement: Option<Box<dyn ReplacementStrategy<C>>>,
    factory: Option<Box<dyn ChromosomeFactory<C>>>,
    fitness: Option<Box<dyn FitnessFunction<C>>>,
    feasibility: Option<Box<dyn FeasibilityCheck<C>>>,
    options: EvolutionOptions,
    population: Option<Vec<C>>,
    gene_length: Option<usize>,
}

impl<C> GeneticAlgorithmBuilder<C>
where
    C: Chromosome,
{
    pub fn new() -> Self {
        Self {
            selection: None,
            crossover: None,
            mutation: None,
            replacement: None,
            factory: None,
            fitness: None,
            feasibility: None,
            options: EvolutionOptions::default(),
            population: None,
            gene_length: None,
        }
    }

    pub fn with_selection<S>(mut self, selection: S) -> Self
    where
        S: SelectionStrategy<C> + 'static,
    {
        self.selection = Some(Box::new(selection));
        self
    }

    pub fn with_crossover<X>(mut self, crossover: X) -> Self
    where
        X: CrossoverStrategy<C> + 'static,
    {
        self.crossover = Some(Box::new(crossover));
        self
    }

    pub fn with_mutation<M>(mut self, mutation: M) -> Self
    where
        M: MutationStrategy<C> + 'static,
    {
        self.mutation = Some(Box::new(mutation));
        self
    }

    pub fn with_replacement<R>(mut self, replacement: R) -> Self
    where
        R: ReplacementStrategy<C> + 'static,
    {
        self.replacement = Some(Box::new(replacement));
        self
    }

    pub fn with_factory<F>(mut self, factory: F) -> Self
    where
        F: ChromosomeFactory<C> + 'static,
    {
        self.factory = Some(Box::new(factory));
        self
    }

    pub fn with_fitness<F>(mut self, fitness: F) -> Self
    where
        F: FitnessFunction<C> + 'static,
    {
        self.fitness = Some(Box::new(fitness));
        self
    }

    /// Rejects mutants that fail `check`; the un-mutated child is kept instead.
    pub fn with_feasibility<F>(mut self, check: F) -> Self
    where
        F: FeasibilityCheck<C> + 'static,
    {
        self.feasibility = Some(Box::new(check));
        self
    }

    pub fn with_options(mut self, options: EvolutionOptions) -> Self {
        self.options = options;
        self
    }

    /// Starts the run from an explicit population.
    pub fn with_population(mut self, population: Vec<C>) -> Self {
        self.population = Some(population);
        self
    }

    /// Lets the factory create a random starting population with this many genes per chromosome.
    pub fn with_gene_length(mut self, gene_length: usize) -> Self {
        self.gene_length = Some(gene_length);
        self
    }

    /// Validates the configuration and builds the engine.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::Configuration` naming the first missing component,
    /// or describing an invalid population size, generation count or starting
    /// population.
    pub fn build(self) -> Result<GeneticAlgorithm<C>> {
        let selection = self.selection.ok_or_else(|| {
            GeneticError::Configuration("Selection strategy not specified".to_string())
        })?;
        let crossover = self.crossover.ok_or_else(|| {
            GeneticError::Configuration("Crossover strategy not specified".to_string())
        })?;
        let mutation = self.mutation.ok_or_else(|| {
            GeneticError::Configuration("Mutation strategy not specified".to_string())
        })?;
        let replacement = self.replacement.ok_or_else(|| {
            GeneticError::Configuration("Replacement strategy not specified".to_string())
        })?;
        let factory = self.factory.ok_or_else(|| {
            GeneticError::Configuration("Chromosome factory not specified".to_string())
        })?;
        let fitness = self.fitness.ok_or_else(|| {
            GeneticError::Configuration("Fitness function not specified".to_string())
        })?;

        let population_size = self.options.get_population_size();
        if population_size == 0 {
            return Err(GeneticError::Configuration(
                "Population size must be positive".to_string(),
            ));
        }
        if self.options.get_max_generations() == 0 {
            return Err(GeneticError::Configuration(
                "Maximum generations must be positive".to_string(),
            ));
        }

        let population = match (self.population, self.gene_length) {
            (Some(population), _) => {
                if !population.is_empty() && population.len() != population_size {
                    return Err(GeneticError::Configuration(format!(
                        "Initial population has {} individuals, expected {}",
                        population.len(),
                        population_size
                    )));
                }
                population
            }
            (None, Some(gene_length)) => {
                let mut rng = self
                    .options
                    .get_seed()
                    .map(RandomNumberGenerator::from_seed)
                    .unwrap_or_default();
                factory.create_population(population_size, gene_length, &mut rng)?
            }
            (None, None) => Vec::new(),
        };

        let operators = Operators {
            selection,
            crossover,
            mutation,
            replacement,
            fitness,
            feasibility: self.feasibility,
        };
        Ok(GeneticAlgorithm::new(operators, self.options, population))
    }
}

impl<C> Default for GeneticAlgorithmBuilder<C>
where
    C: Chromosome,
{
    fn default() -> Self {
        Self::new()
    }
}
