//! # `operators` – Building Blocks for Evolution
//!
//! Every driver in *evors* is assembled from interchangeable operators, one
//! per stage of the evolutionary cycle:
//!
//! | Trait | Purpose | Typical Implementations |
//! |-------|---------|-------------------------|
//! | [`SelectionOperator`] | Pick parent indices from the fitness matrix. | `RouletteSelection`, `TournamentSelection`, … |
//! | [`CrossoverOperator`] | Recombine two parents into two children. | `SinglePointCrossover`, `SimulatedBinaryCrossover`, … |
//! | [`MutationOperator`]  | Perturb one chromosome in place. | `BitFlipMutation`, `PolynomialMutation`, … |
//! | [`SurvivorStrategy`]  | Choose the next generation from parents ∪ children. | `KeepBest`, `Nsga2Survival`, `Nsga3Survival` |
//!
//! Operators are cheap-to-clone values. Selection operators rebuild their
//! auxiliary state once per generation in `prepare`; afterwards `select` is
//! read-only so the engine may call it from parallel tasks. Crossover and
//! mutation operators carry their own trigger probability and their provided
//! `apply` methods maintain the candidate lifecycle invariant: `evaluated` is
//! cleared if and only if the chromosome actually changed.
//!
//! Each crossover and mutation type names its encoding through an `Enc`
//! associated type, so the engine rejects a mismatched pairing (say, bit-flip
//! on a real-valued chromosome) at compile time.

pub mod crossover;
pub mod mutation;
pub mod selection;
pub mod survival;

pub use crossover::CrossoverOperator;
pub use mutation::MutationOperator;
pub use selection::SelectionOperator;
pub use survival::SurvivorStrategy;
