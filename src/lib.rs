//! # evors
//!
//! A general-purpose evolutionary optimization engine. Given a fitness
//! function mapping a fixed-length chromosome to one or more maximized
//! objectives, the engine evolves a population across generations and
//! returns the non-dominated solutions it found: the Pareto front for
//! multi-objective problems, the argmax set for single-objective ones.
//!
//! The crate is assembled from small, interchangeable pieces:
//!
//! * [`encoding`] – binary, integer, bounded-real and permutation
//!   chromosomes, with operator applicability enforced at compile time;
//! * [`operators`] – selection, crossover, mutation and survivor families,
//!   each behind a one-method-deep trait;
//! * [`pareto`] – fast non-dominated sorting, crowding distances and the
//!   NSGA-III reference-point machinery;
//! * [`algorithms`] – the single-objective driver plus NSGA-II and NSGA-III;
//! * [`engine`] – the generation loop, archive maintenance, parallel
//!   execution policy and the builder;
//! * [`stop`] – composable early-stopping conditions;
//! * [`random`] – the injected RNG capability that makes runs replayable
//!   from a seed.
//!
//! ## Example: OneMax
//!
//! ```rust,no_run
//! use evors::{
//!     BinaryEncoding, BitFlipMutation, GaBuilder, KeepBest, SingleObjective,
//!     TournamentSelection, UniformCrossover,
//! };
//! use ndarray::{Array1, ArrayView1, array};
//!
//! fn ones(genes: ArrayView1<'_, f64>) -> Array1<f64> {
//!     array![genes.sum()]
//! }
//!
//! let mut engine = GaBuilder::default()
//!     .encoding(BinaryEncoding)
//!     .algorithm(SingleObjective::new(
//!         TournamentSelection::new(2).unwrap(),
//!         KeepBest,
//!     ))
//!     .crossover(UniformCrossover::<BinaryEncoding>::new(0.9).unwrap())
//!     .mutation(BitFlipMutation::new(1.0 / 64.0).unwrap())
//!     .fitness_fn(ones as fn(ArrayView1<'_, f64>) -> Array1<f64>)
//!     .chrom_len(64)
//!     .population_size(100)
//!     .seed(42)
//!     .build()
//!     .unwrap();
//!
//! let solutions = engine.run(200).unwrap();
//! println!("best: {}", solutions[0].fitness[0]);
//! ```

pub mod algorithms;
pub mod encoding;
pub mod engine;
pub mod error;
pub mod genetic;
pub mod helpers;
pub mod operators;
pub mod pareto;
pub mod random;
pub mod stop;

pub use algorithms::{Algorithm, AlgorithmContext, Nsga2, Nsga3, SingleObjective};
pub use encoding::{
    BinaryEncoding, DiscreteEncoding, Encoding, IntegerEncoding, PermutationEncoding,
    RealEncoding, ReorderableEncoding,
};
pub use engine::{
    EngineView, FitnessFn, GaBuilder, GaBuilderError, GenerationCallback, GeneticAlgorithm,
    ParallelPolicy, RepairFn,
};
pub use error::{EngineError, EvaluationError, OperatorError, ParameterError};
pub use genetic::{Candidate, fitness_matrix};
pub use operators::crossover::{
    ArithmeticCrossover, BlxAlphaCrossover, CrossoverOperator, CycleCrossover,
    EdgeRecombinationCrossover, NPointCrossover, OrderCrossover, PartiallyMappedCrossover,
    SimulatedBinaryCrossover, SinglePointCrossover, TwoPointCrossover, UniformCrossover,
    WrightCrossover,
};
pub use operators::mutation::{
    BitFlipMutation, BoundaryMutation, GaussianMutation, InversionMutation, MutationOperator,
    NonUniformMutation, PolynomialMutation, RandomResetMutation, SwapMutation,
    UniformRealMutation,
};
pub use operators::selection::{
    BoltzmannSelection, RankSelection, RouletteSelection, SelectionOperator, SigmaSelection,
    TournamentSelection,
};
pub use operators::survival::{
    Elitism, KeepBest, KeepChildren, Nsga2Survival, Nsga3Survival, SurvivorStrategy,
};
pub use random::{EvoRandomGenerator, NoopRandomGenerator, RandomGenerator, TestDummyRng};
pub use stop::{
    And, BestFitnessStall, FitnessValueReached, MaxFitnessEvals, Or, StopCondition,
};
