use ndarray::Array2;
use ordered_float::OrderedFloat;

use crate::algorithms::{Algorithm, AlgorithmContext};
use crate::operators::SurvivorStrategy;
use crate::operators::survival::Nsga2Survival;
use crate::pareto::{crowding_distances, fronts, non_dominated_sort, pareto_ranks};
use crate::random::RandomGenerator;

/// NSGA-II driver (Deb et al., 2002): binary tournament on the
/// (rank ascending, crowding distance descending) lexicographic key, with the
/// rank-and-crowding survival of [`Nsga2Survival`].
#[derive(Debug, Clone, Default)]
pub struct Nsga2 {
    survival: Nsga2Survival,
    ranks: Vec<usize>,
    crowding: Vec<f64>,
}

impl Nsga2 {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Algorithm for Nsga2 {
    fn prepare(
        &mut self,
        _ctx: &AlgorithmContext,
        fitness: &Array2<f64>,
        _rng: &mut impl RandomGenerator,
    ) {
        let sorted = non_dominated_sort(fitness);
        let grouped = fronts(&sorted);
        self.ranks = pareto_ranks(&sorted);
        self.crowding = crowding_distances(fitness, &grouped);
    }

    fn select(
        &self,
        _ctx: &AlgorithmContext,
        fitness: &Array2<f64>,
        rng: &mut impl RandomGenerator,
    ) -> usize {
        let n = fitness.nrows();
        let left = rng.gen_range_usize(0, n);
        let right = rng.gen_range_usize(0, n);
        let key = |i: usize| (self.ranks[i], OrderedFloat(-self.crowding[i]));
        if key(right) < key(left) { right } else { left }
    }

    fn next_population(
        &mut self,
        ctx: &AlgorithmContext,
        fitness: &Array2<f64>,
        num_parents: usize,
    ) -> Vec<usize> {
        self.survival.survive(ctx, fitness, num_parents)
    }
}
