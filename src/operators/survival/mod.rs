//! Survivor selection over the combined parent and child populations.
//!
//! A survivor strategy receives the fitness matrix of `[parents…, children…]`
//! (parents occupy rows `0..num_parents`) and returns the
//! `ctx.population_size` row indices that form the next generation. All
//! strategies are deterministic: every tie is broken by index.

use ndarray::Array2;

use crate::algorithms::AlgorithmContext;

mod nsga2;
mod nsga3;
mod soo;

pub use nsga2::Nsga2Survival;
pub use nsga3::Nsga3Survival;
pub use soo::{Elitism, KeepBest, KeepChildren};

pub trait SurvivorStrategy: Clone + Send + Sync {
    /// Picks `ctx.population_size` indices from the combined fitness matrix.
    fn survive(
        &mut self,
        ctx: &AlgorithmContext,
        fitness: &Array2<f64>,
        num_parents: usize,
    ) -> Vec<usize>;
}
