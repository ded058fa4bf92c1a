use ndarray::Array2;
use ordered_float::OrderedFloat;

use crate::algorithms::{Algorithm, AlgorithmContext};
use crate::operators::SurvivorStrategy;
use crate::operators::survival::Nsga3Survival;
use crate::pareto::{generate_reference_points, non_dominated_sort, pareto_ranks};
use crate::random::RandomGenerator;

/// NSGA-III driver (Deb & Jain, 2014): binary tournament on the
/// (rank ascending, niche count ascending, perpendicular distance ascending)
/// key, with the reference-point niching survival of [`Nsga3Survival`].
///
/// The reference directions are generated on the first `prepare`, once the
/// number of objectives is known, with as many directions as the population
/// has slots.
#[derive(Debug, Clone, Default)]
pub struct Nsga3 {
    survival: Option<Nsga3Survival>,
    ranks: Vec<usize>,
    niche_counts: Vec<usize>,
    distances: Vec<f64>,
}

impl Nsga3 {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses a caller-provided reference-point set instead of generating one.
    pub fn with_reference_points(reference_points: Array2<f64>) -> Self {
        Self {
            survival: Some(Nsga3Survival::new(reference_points)),
            ranks: Vec::new(),
            niche_counts: Vec::new(),
            distances: Vec::new(),
        }
    }
}

impl Algorithm for Nsga3 {
    fn prepare(
        &mut self,
        ctx: &AlgorithmContext,
        fitness: &Array2<f64>,
        rng: &mut impl RandomGenerator,
    ) {
        let survival = self.survival.get_or_insert_with(|| {
            Nsga3Survival::new(generate_reference_points(
                ctx.population_size,
                fitness.ncols(),
                rng,
            ))
        });

        self.ranks = pareto_ranks(&non_dominated_sort(fitness));

        let associations = survival.associate(fitness);
        let mut counts = vec![0usize; survival.num_references()];
        for &(reference, _) in &associations {
            counts[reference] += 1;
        }
        self.niche_counts = associations
            .iter()
            .map(|&(reference, _)| counts[reference])
            .collect();
        self.distances = associations.into_iter().map(|(_, d)| d).collect();
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
        let key = |i: usize| {
            (
                self.ranks[i],
                self.niche_counts[i],
                OrderedFloat(self.distances[i]),
            )
        };
        if key(right) < key(left) { right } else { left }
    }

    fn next_population(
        &mut self,
        ctx: &AlgorithmContext,
        fitness: &Array2<f64>,
        num_parents: usize,
    ) -> Vec<usize> {
        self.survival
            .as_mut()
            .expect("prepare runs before survivor selection")
            .survive(ctx, fitness, num_parents)
    }
}
