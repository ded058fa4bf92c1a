//! # `algorithms` – Drivers
//!
//! An [`Algorithm`] couples parent selection with survivor selection and owns
//! whatever per-generation state that requires (selection CDFs, Pareto ranks,
//! crowding distances, niche assignments). The engine calls `prepare` once
//! per generation, `select` from parallel parent-pair tasks against the
//! prepared read-only state, and `next_population` on the combined
//! parents ∪ children fitness matrix.
//!
//! | Driver | Selection | Survival |
//! |--------|-----------|----------|
//! | [`SingleObjective`] | any [`SelectionOperator`](crate::operators::SelectionOperator) | any [`SurvivorStrategy`](crate::operators::SurvivorStrategy) |
//! | [`Nsga2`] | binary tournament on (rank, crowding) | [`Nsga2Survival`](crate::operators::survival::Nsga2Survival) |
//! | [`Nsga3`] | binary tournament on (rank, niche count, distance) | [`Nsga3Survival`](crate::operators::survival::Nsga3Survival) |
use ndarray::Array2;

use crate::random::RandomGenerator;

mod nsga2;
mod nsga3;
mod single_objective;

pub use nsga2::Nsga2;
pub use nsga3::Nsga3;
pub use single_objective::SingleObjective;

/// Runtime state shared with operators each generation; some operators adapt
/// their behavior to the generation counter (Boltzmann temperature,
/// non-uniform mutation).
#[derive(Debug, Clone)]
pub struct AlgorithmContext {
    pub chrom_len: usize,
    pub population_size: usize,
    pub num_objectives: usize,
    pub generation: usize,
    pub max_generations: usize,
}

pub trait Algorithm: Send + Sync {
    /// Builds the per-generation selection state from the current
    /// population's fitness matrix.
    fn prepare(
        &mut self,
        ctx: &AlgorithmContext,
        fitness: &Array2<f64>,
        rng: &mut impl RandomGenerator,
    );

    /// Returns one parent index. Read-only; called from parallel tasks.
    fn select(
        &self,
        ctx: &AlgorithmContext,
        fitness: &Array2<f64>,
        rng: &mut impl RandomGenerator,
    ) -> usize;

    /// Survivor selection: picks `ctx.population_size` indices from the
    /// combined fitness matrix, where rows `0..num_parents` are the parents.
    fn next_population(
        &mut self,
        ctx: &AlgorithmContext,
        fitness: &Array2<f64>,
        num_parents: usize,
    ) -> Vec<usize>;
}
