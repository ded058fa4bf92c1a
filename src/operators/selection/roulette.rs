use ndarray::Array2;
use ndarray_stats::QuantileExt;

use crate::algorithms::AlgorithmContext;
use crate::helpers::math::weights_to_cdf;
use crate::operators::selection::{SelectionOperator, first_objective};
use crate::random::RandomGenerator;

/// Fitness-proportionate selection over the first objective.
///
/// Negative fitness values are shifted by `offset = min(0, 2·min f)` so the
/// worst candidate still keeps a positive selection probability.
#[derive(Debug, Clone, Default)]
pub struct RouletteSelection {
    cdf: Vec<f64>,
}

impl RouletteSelection {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SelectionOperator for RouletteSelection {
    fn prepare(&mut self, _ctx: &AlgorithmContext, fitness: &Array2<f64>) {
        let fmin = *fitness
            .column(0)
            .min()
            .expect("selection requires a non-empty population");
        let offset = (2.0 * fmin).min(0.0);

        let mut weights = first_objective(fitness);
        for w in weights.iter_mut() {
            *w -= offset;
        }
        self.cdf = weights_to_cdf(&weights);
    }

    fn select(&self, _fitness: &Array2<f64>, rng: &mut impl RandomGenerator) -> usize {
        rng.sample_cdf(&self.cdf)
    }
}
