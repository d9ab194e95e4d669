use std::ops::ControlFlow;
use std::sync::{Arc, Mutex};

use genetic_engine::{
    chromosome::{BinaryChromosome, BinaryChromosomeFactory, Chromosome, ChromosomeFactory},
    crossover::{SinglePointCrossover, UniformCrossover},
    error::{GeneticError, Result},
    evolution::{
        EngineState, EvolutionOptions, GeneticAlgorithm, GeneticAlgorithmBuilder, LogLevel,
        Termination,
    },
    mutation::{BinaryMutation, MutationStrategy},
    replacement::{
        ElitismReplacement, FullGenerationReplacement, ReplacementStrategy,
        SteadyStateReplacement,
    },
    rng::RandomNumberGenerator,
    selection::{RouletteWheelSelection, TournamentSelection},
};

const POPULATION_SIZE: usize = 30;
const GENE_LENGTH: usize = 20;

fn ones(chromosome: &BinaryChromosome) -> f64 {
    chromosome.count_ones() as f64
}

fn options(max_generations: usize) -> EvolutionOptions {
    EvolutionOptions::builder()
        .population_size(POPULATION_SIZE)
        .max_generations(max_generations)
        .seed(7)
        .build()
}

/// A fully configured builder for the "count the ones" problem.
fn builder(max_generations: usize) -> GeneticAlgorithmBuilder<BinaryChromosome> {
    let factory = BinaryChromosomeFactory::new();
    GeneticAlgorithmBuilder::<BinaryChromosome>::new()
        .with_selection(
            TournamentSelection::new(3)
                .unwrap()
                .with_rng(RandomNumberGenerator::from_seed(1)),
        )
        .with_crossover(
            SinglePointCrossover::new(0.9, factory)
                .unwrap()
                .with_rng(RandomNumberGenerator::from_seed(2)),
        )
        .with_mutation(
            BinaryMutation::new(0.05)
                .unwrap()
                .with_rng(RandomNumberGenerator::from_seed(3)),
        )
        .with_replacement(ElitismReplacement::new(2).unwrap())
        .with_factory(factory)
        .with_fitness(ones)
        .with_options(options(max_generations))
        .with_gene_length(GENE_LENGTH)
}

fn collect_best(engine: &mut GeneticAlgorithm<BinaryChromosome>) -> Vec<f64> {
    let mut history = Vec::new();
    engine
        .run_with(|report| {
            history.push(report.best_fitness);
            ControlFlow::Continue(())
        })
        .unwrap();
    history
}

/// Drops the last individual, breaking the size contract.
#[derive(Debug)]
struct ShrinkingReplacement;

impl ReplacementStrategy<BinaryChromosome> for ShrinkingReplacement {
    fn replace_population(
        &self,
        _current: Vec<BinaryChromosome>,
        mut offspring: Vec<BinaryChromosome>,
    ) -> Result<Vec<BinaryChromosome>> {
        offspring.pop();
        Ok(offspring)
    }
}

/// Records every generation the engine announces.
#[derive(Debug)]
struct RecordingMutation {
    generations: Arc<Mutex<Vec<usize>>>,
}

impl MutationStrategy<BinaryChromosome> for RecordingMutation {
    fn mutate(&mut self, individual: &BinaryChromosome) -> Result<BinaryChromosome> {
        Ok(individual.clone())
    }

    fn set_generation(&mut self, generation: usize) {
        self.generations.lock().unwrap().push(generation);
    }
}

fn assert_size_preserved<R>(replacement: R)
where
    R: ReplacementStrategy<BinaryChromosome> + 'static,
{
    let mut engine = builder(15).with_replacement(replacement).build().unwrap();
    let mut reports = 0;
    let result = engine
        .run_with(|_| {
            reports += 1;
            ControlFlow::Continue(())
        })
        .unwrap();

    assert_eq!(result.generations, 15);
    assert_eq!(reports, 16);
    assert_eq!(engine.population().len(), POPULATION_SIZE);
    assert!(engine
        .population()
        .iter()
        .all(|c| c.len() == GENE_LENGTH && c.fitness().is_some()));
}

#[test]
fn test_population_size_is_preserved() {
    assert_size_preserved(FullGenerationReplacement::new());
    assert_size_preserved(ElitismReplacement::new(3).unwrap());
    assert_size_preserved(SteadyStateReplacement::new(5).unwrap());
}

#[test]
fn test_size_violation_is_an_error() {
    let mut engine = builder(5)
        .with_replacement(ShrinkingReplacement)
        .build()
        .unwrap();

    match engine.run() {
        Err(GeneticError::Evolution(msg)) => assert!(msg.contains("Population size changed")),
        other => panic!("Expected Evolution error, got {:?}", other),
    }
    assert_eq!(engine.state(), EngineState::Terminated);
    assert_eq!(engine.population().len(), POPULATION_SIZE);
    assert!(engine.population().iter().all(|c| c.fitness().is_some()));
}

#[test]
fn test_failed_generation_keeps_the_last_population() {
    // Scores the initial population, then fails while scoring the first offspring
    let calls = Arc::new(Mutex::new(0usize));
    let counter = Arc::clone(&calls);
    let mut engine = builder(5)
        .with_fitness(move |c: &BinaryChromosome| {
            let mut calls = counter.lock().unwrap();
            *calls += 1;
            if *calls > POPULATION_SIZE {
                f64::NAN
            } else {
                c.count_ones() as f64
            }
        })
        .build()
        .unwrap();

    assert!(matches!(
        engine.run(),
        Err(GeneticError::FitnessCalculation(_))
    ));
    assert_eq!(engine.generation(), 0);
    assert_eq!(engine.population().len(), POPULATION_SIZE);
    assert!(engine.population().iter().all(|c| c.fitness().is_some()));
    assert!(engine.best_fitness().is_some());
}

#[test]
fn test_elitism_never_loses_the_best() {
    let mut engine = builder(40).build().unwrap();
    let history = collect_best(&mut engine);

    assert_eq!(history.len(), 41);
    for window in history.windows(2) {
        assert!(window[1] >= window[0], "best fitness dropped: {:?}", window);
    }
    assert_eq!(engine.best_fitness(), history.last().copied());
}

#[test]
fn test_overall_best_is_a_running_maximum() {
    // Full replacement may lose the best individual; the overall record may not
    let mut engine = builder(30)
        .with_replacement(FullGenerationReplacement::new())
        .with_mutation(
            BinaryMutation::new(0.3)
                .unwrap()
                .with_rng(RandomNumberGenerator::from_seed(8)),
        )
        .build()
        .unwrap();
    let history = collect_best(&mut engine);

    let maximum = history.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    assert_eq!(engine.best_fitness(), Some(maximum));
    let best = engine.best_individual().unwrap();
    assert_eq!(best.count_ones() as f64, maximum);
}

#[test]
fn test_missing_population_aborts_cleanly() {
    let factory = BinaryChromosomeFactory::new();
    let mut engine = GeneticAlgorithmBuilder::<BinaryChromosome>::new()
        .with_selection(TournamentSelection::new(2).unwrap())
        .with_crossover(SinglePointCrossover::new(0.5, factory).unwrap())
        .with_mutation(BinaryMutation::new(0.1).unwrap())
        .with_replacement(ElitismReplacement::new(1).unwrap())
        .with_factory(factory)
        .with_fitness(ones)
        .with_options(options(10))
        .build()
        .unwrap();

    assert_eq!(engine.state(), EngineState::Idle);
    let result = engine.run().unwrap();

    assert!(matches!(result.termination, Termination::Aborted(_)));
    assert_eq!(result.best, None);
    assert_eq!(result.generations, 0);
    assert_eq!(engine.state(), EngineState::Terminated);
}

#[test]
fn test_observer_stops_the_run() {
    let mut engine = builder(50).build().unwrap();
    let result = engine
        .run_with(|report| {
            if report.generation == 3 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        })
        .unwrap();

    assert_eq!(result.termination, Termination::Stopped);
    assert_eq!(result.generations, 3);
    assert_eq!(engine.generation(), 3);
}

#[test]
fn test_target_fitness_ends_the_run() {
    let options = EvolutionOptions::builder()
        .population_size(POPULATION_SIZE)
        .max_generations(50)
        .target_fitness(0.0)
        .build();
    let mut engine = builder(50).with_options(options).build().unwrap();

    let result = engine.run().unwrap();
    assert_eq!(result.termination, Termination::TargetReached);
    assert_eq!(result.generations, 0);
}

#[test]
fn test_engine_runs_only_once() {
    let mut engine = builder(2).build().unwrap();
    engine.run().unwrap();
    assert!(matches!(engine.run(), Err(GeneticError::Evolution(_))));
}

#[test]
fn test_mutation_sees_every_generation() {
    let generations = Arc::new(Mutex::new(Vec::new()));
    let mut engine = builder(4)
        .with_mutation(RecordingMutation {
            generations: Arc::clone(&generations),
        })
        .build()
        .unwrap();

    engine.run().unwrap();
    assert_eq!(*generations.lock().unwrap(), vec![1, 2, 3, 4]);
}

#[test]
fn test_infeasible_mutants_are_discarded() {
    let factory = BinaryChromosomeFactory::new();
    let zeros: Vec<BinaryChromosome> = (0..POPULATION_SIZE)
        .map(|_| factory.create(vec![0; GENE_LENGTH]).unwrap())
        .collect();

    // Every mutant gains ones, and no mutant with a one is feasible
    let mut engine = builder(10)
        .with_mutation(BinaryMutation::new(1.0).unwrap())
        .with_feasibility(|c: &BinaryChromosome| c.count_ones() == 0)
        .with_population(zeros)
        .build()
        .unwrap();

    let result = engine.run().unwrap();
    assert_eq!(result.best_fitness, Some(0.0));
    assert!(engine.population().iter().all(|c| c.count_ones() == 0));
}

#[test]
fn test_nan_fitness_is_an_error() {
    let mut engine = builder(3)
        .with_fitness(|_: &BinaryChromosome| f64::NAN)
        .build()
        .unwrap();

    assert!(matches!(
        engine.run(),
        Err(GeneticError::FitnessCalculation(_))
    ));
}

#[test]
fn test_roulette_and_uniform_crossover_run() {
    let mut engine = builder(20)
        .with_selection(RouletteWheelSelection::new().with_rng(RandomNumberGenerator::from_seed(5)))
        .with_crossover(
            UniformCrossover::with_defaults(BinaryChromosomeFactory::new())
                .with_rng(RandomNumberGenerator::from_seed(6)),
        )
        .build()
        .unwrap();

    let result = engine.run().unwrap();
    assert_eq!(result.termination, Termination::MaxGenerations);
    assert!(result.best_fitness.unwrap() > 0.0);
}

#[test]
fn test_seeded_runs_are_reproducible() {
    let first = builder(25).build().unwrap().run().unwrap();
    let second = builder(25).build().unwrap().run().unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_verbose_logging_run() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();

    let options = EvolutionOptions::builder()
        .population_size(POPULATION_SIZE)
        .max_generations(3)
        .log_level(LogLevel::Verbose)
        .build();
    let mut engine = builder(3).with_options(options).build().unwrap();

    assert!(engine.run().is_ok());
}

#[test]
fn test_builder_reports_missing_components() {
    let factory = BinaryChromosomeFactory::new();
    let cases: Vec<(GeneticAlgorithmBuilder<BinaryChromosome>, &str)> = vec![
        (
            GeneticAlgorithmBuilder::<BinaryChromosome>::new()
                .with_crossover(SinglePointCrossover::new(0.5, factory).unwrap())
                .with_mutation(BinaryMutation::new(0.1).unwrap())
                .with_replacement(ElitismReplacement::new(1).unwrap())
                .with_factory(factory)
                .with_fitness(ones),
            "Selection strategy",
        ),
        (
            GeneticAlgorithmBuilder::<BinaryChromosome>::new()
                .with_selection(TournamentSelection::new(2).unwrap())
                .with_mutation(BinaryMutation::new(0.1).unwrap())
                .with_replacement(ElitismReplacement::new(1).unwrap())
                .with_factory(factory)
                .with_fitness(ones),
            "Crossover strategy",
        ),
        (
            GeneticAlgorithmBuilder::<BinaryChromosome>::new()
                .with_selection(TournamentSelection::new(2).unwrap())
                .with_crossover(SinglePointCrossover::new(0.5, factory).unwrap())
                .with_replacement(ElitismReplacement::new(1).unwrap())
                .with_factory(factory)
                .with_fitness(ones),
            "Mutation strategy",
        ),
        (
            GeneticAlgorithmBuilder::<BinaryChromosome>::new()
                .with_selection(TournamentSelection::new(2).unwrap())
                .with_crossover(SinglePointCrossover::new(0.5, factory).unwrap())
                .with_mutation(BinaryMutation::new(0.1).unwrap())
                .with_factory(factory)
                .with_fitness(ones),
            "Replacement strategy",
        ),
        (
            GeneticAlgorithmBuilder::<BinaryChromosome>::new()
                .with_selection(TournamentSelection::new(2).unwrap())
                .with_crossover(SinglePointCrossover::new(0.5, factory).unwrap())
                .with_mutation(BinaryMutation::new(0.1).unwrap())
                .with_replacement(ElitismReplacement::new(1).unwrap())
                .with_fitness(ones),
            "Chromosome factory",
        ),
        (
            GeneticAlgorithmBuilder::<BinaryChromosome>::new()
                .with_selection(TournamentSelection::new(2).unwrap())
                .with_crossover(SinglePointCrossover::new(0.5, factory).unwrap())
                .with_mutation(BinaryMutation::new(0.1).unwrap())
                .with_replacement(ElitismReplacement::new(1).unwrap())
                .with_factory(factory),
            "Fitness function",
        ),
    ];

    for (builder, missing) in cases {
        match builder.build() {
            Err(GeneticError::Configuration(msg)) => assert!(
                msg.contains(missing),
                "expected '{}' in '{}'",
                missing,
                msg
            ),
            other => panic!("Expected Configuration error, got {:?}", other.map(|_| ())),
        }
    }
}

#[test]
fn test_builder_validates_sizes() {
    let zero_population = EvolutionOptions::builder().population_size(0).build();
    assert!(matches!(
        builder(5).with_options(zero_population).build(),
        Err(GeneticError::Configuration(_))
    ));

    let zero_generations = EvolutionOptions::builder()
        .population_size(POPULATION_SIZE)
        .max_generations(0)
        .build();
    assert!(builder(5).with_options(zero_generations).build().is_err());

    let factory = BinaryChromosomeFactory::new();
    let mut rng = RandomNumberGenerator::from_seed(9);
    let too_small = factory.create_population(3, GENE_LENGTH, &mut rng).unwrap();
    match builder(5).with_population(too_small).build() {
        Err(GeneticError::Configuration(msg)) => assert!(msg.contains("expected 30")),
        other => panic!("Expected Configuration error, got {:?}", other.map(|_| ())),
    }
}
