use ndarray::Array2;

use crate::algorithms::AlgorithmContext;
use crate::error::ParameterError;
use crate::helpers::math::{argsort, lerp, weights_to_cdf};
use crate::operators::selection::{SelectionOperator, first_objective};
use crate::random::RandomGenerator;

/// Rank-based selection: candidates are weighted by their fitness rank, with
/// the weights linearly interpolated between `min_weight` (worst) and
/// `max_weight` (best).
#[derive(Debug, Clone)]
pub struct RankSelection {
    min_weight: f64,
    max_weight: f64,
    cdf: Vec<f64>,
}

impl RankSelection {
    pub fn new(min_weight: f64, max_weight: f64) -> Result<Self, ParameterError> {
        if !(0.0 <= min_weight && min_weight <= max_weight && max_weight.is_finite()) {
            return Err(ParameterError::Invalid(format!(
                "rank weights must satisfy 0 ≤ min ≤ max, got [{min_weight}, {max_weight}]"
            )));
        }
        Ok(Self {
            min_weight,
            max_weight,
            cdf: Vec::new(),
        })
    }
}

impl Default for RankSelection {
    fn default() -> Self {
        Self::new(0.1, 1.1).expect("the default rank weights are valid")
    }
}

impl SelectionOperator for RankSelection {
    fn prepare(&mut self, _ctx: &AlgorithmContext, fitness: &Array2<f64>) {
        let fvec = first_objective(fitness);
        let indices = argsort(&fvec);

        let n = fvec.len();
        let denom = n.saturating_sub(1).max(1) as f64;
        let mut weights = vec![0.0; n];
        for (i, &idx) in indices.iter().enumerate() {
            weights[idx] = lerp(self.min_weight, self.max_weight, i as f64 / denom);
        }
        self.cdf = weights_to_cdf(&weights);
    }

    fn select(&self, _fitness: &Array2<f64>, rng: &mut impl RandomGenerator) -> usize {
        rng.sample_cdf(&self.cdf)
    }
}
