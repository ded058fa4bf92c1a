//! Generational replacement strategies for the single-objective driver.
use ndarray::Array2;
use ordered_float::OrderedFloat;

use crate::algorithms::AlgorithmContext;
use crate::operators::survival::SurvivorStrategy;

/// Keeps the first `N` children and discards every parent.
#[derive(Debug, Clone, Default)]
pub struct KeepChildren;

impl SurvivorStrategy for KeepChildren {
    fn survive(
        &mut self,
        ctx: &AlgorithmContext,
        fitness: &Array2<f64>,
        num_parents: usize,
    ) -> Vec<usize> {
        debug_assert!(fitness.nrows() - num_parents >= ctx.population_size);
        (num_parents..num_parents + ctx.population_size).collect()
    }
}

/// Carries the best `n` parents over to the next generation and fills the
/// remaining slots with children in order. `Elitism(0)` behaves like
/// [`KeepChildren`].
#[derive(Debug, Clone)]
pub struct Elitism {
    elite_count: usize,
}

impl Elitism {
    pub fn new(elite_count: usize) -> Self {
        Self { elite_count }
    }

    pub fn elite_count(&self) -> usize {
        self.elite_count
    }
}

impl Default for Elitism {
    fn default() -> Self {
        Self::new(1)
    }
}

impl SurvivorStrategy for Elitism {
    fn survive(
        &mut self,
        ctx: &AlgorithmContext,
        fitness: &Array2<f64>,
        num_parents: usize,
    ) -> Vec<usize> {
        let mut parents: Vec<usize> = (0..num_parents).collect();
        parents.sort_by_key(|&i| (OrderedFloat(-fitness[[i, 0]]), i));

        let elites = self.elite_count.min(ctx.population_size).min(num_parents);
        let mut survivors: Vec<usize> = parents[..elites].to_vec();
        survivors.extend(num_parents..num_parents + (ctx.population_size - elites));
        survivors
    }
}

/// Keeps the overall best `N` of parents ∪ children by first-objective
/// fitness, stable by index.
#[derive(Debug, Clone, Default)]
pub struct KeepBest;

impl SurvivorStrategy for KeepBest {
    fn survive(
        &mut self,
        ctx: &AlgorithmContext,
        fitness: &Array2<f64>,
        _num_parents: usize,
    ) -> Vec<usize> {
        let mut order: Vec<usize> = (0..fitness.nrows()).collect();
        order.sort_by_key(|&i| (OrderedFloat(-fitness[[i, 0]]), i));
        order.truncate(ctx.population_size);
        order
    }
}
