use ndarray::Array2;

use crate::algorithms::AlgorithmContext;
use crate::error::ParameterError;
use crate::helpers::math::{mean, std_dev, weights_to_cdf};
use crate::operators::selection::{SelectionOperator, first_objective};
use crate::random::RandomGenerator;

/// Sigma-scaled selection: weights are `max(0, 1 + (f − μ)/(s·σ))`, which
/// keeps the selection pressure roughly constant as the population converges.
/// `σ` is floored at `1e-6` to survive uniform populations.
#[derive(Debug, Clone)]
pub struct SigmaSelection {
    scale: f64,
    cdf: Vec<f64>,
}

impl SigmaSelection {
    pub fn new(scale: f64) -> Result<Self, ParameterError> {
        if !(scale > 1.0 && scale.is_finite()) {
            return Err(ParameterError::Invalid(format!(
                "the sigma scale must be greater than 1, got {scale}"
            )));
        }
        Ok(Self {
            scale,
            cdf: Vec::new(),
        })
    }
}

impl SelectionOperator for SigmaSelection {
    fn prepare(&mut self, _ctx: &AlgorithmContext, fitness: &Array2<f64>) {
        let fvec = first_objective(fitness);
        let fmean = mean(&fvec);
        let fdev = std_dev(&fvec, fmean).max(1e-6);

        let weights: Vec<f64> = fvec
            .iter()
            .map(|&f| (1.0 + (f - fmean) / (self.scale * fdev)).max(0.0))
            .collect();
        self.cdf = weights_to_cdf(&weights);
    }

    fn select(&self, _fitness: &Array2<f64>, rng: &mut impl RandomGenerator) -> usize {
        rng.sample_cdf(&self.cdf)
    }
}
