use ndarray::Array2;

use crate::algorithms::{Algorithm, AlgorithmContext};
use crate::operators::{SelectionOperator, SurvivorStrategy};
use crate::random::RandomGenerator;

/// Driver for single-objective optimization: any selection operator combined
/// with any survivor strategy. The fitness matrix must have exactly one
/// column; the archive then degenerates to the argmax set.
#[derive(Debug, Clone)]
pub struct SingleObjective<Sel, Sur>
where
    Sel: SelectionOperator,
    Sur: SurvivorStrategy,
{
    selection: Sel,
    survival: Sur,
}

impl<Sel, Sur> SingleObjective<Sel, Sur>
where
    Sel: SelectionOperator,
    Sur: SurvivorStrategy,
{
    pub fn new(selection: Sel, survival: Sur) -> Self {
        Self {
            selection,
            survival,
        }
    }
}

impl<Sel, Sur> Algorithm for SingleObjective<Sel, Sur>
where
    Sel: SelectionOperator,
    Sur: SurvivorStrategy,
{
    fn prepare(
        &mut self,
        ctx: &AlgorithmContext,
        fitness: &Array2<f64>,
        _rng: &mut impl RandomGenerator,
    ) {
        assert_eq!(
            fitness.ncols(),
            1,
            "the single-objective driver requires exactly one objective"
        );
        self.selection.prepare(ctx, fitness);
    }

    fn select(
        &self,
        _ctx: &AlgorithmContext,
        fitness: &Array2<f64>,
        rng: &mut impl RandomGenerator,
    ) -> usize {
        self.selection.select(fitness, rng)
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
