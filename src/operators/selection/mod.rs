//! Single-objective parent selection.
//!
//! A selection operator builds per-generation auxiliary state from the
//! fitness matrix in [`SelectionOperator::prepare`] (a CDF for the
//! fitness-proportionate family, a plain fitness vector for tournaments) and
//! then answers `2·⌈N/2⌉` calls to [`SelectionOperator::select`] per
//! generation. `select` takes `&self` so the engine can run it from parallel
//! parent-pair tasks against the read-only prepared state.
use ndarray::Array2;

use crate::algorithms::AlgorithmContext;
use crate::random::RandomGenerator;

mod boltzmann;
mod rank;
mod roulette;
mod sigma;
mod tournament;

pub use boltzmann::BoltzmannSelection;
pub use rank::RankSelection;
pub use roulette::RouletteSelection;
pub use sigma::SigmaSelection;
pub use tournament::TournamentSelection;

pub trait SelectionOperator: Clone + Send + Sync {
    /// Precomputes this generation's selection state.
    fn prepare(&mut self, ctx: &AlgorithmContext, fitness: &Array2<f64>);

    /// Returns one parent index. Must not mutate state; it is called from
    /// parallel tasks with the state built by `prepare`.
    fn select(&self, fitness: &Array2<f64>, rng: &mut impl RandomGenerator) -> usize;
}

/// The first-objective fitness column, which is what single-objective
/// selection schemes weigh candidates by.
pub(crate) fn first_objective(fitness: &Array2<f64>) -> Vec<f64> {
    fitness.column(0).to_vec()
}
