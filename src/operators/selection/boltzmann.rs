use std::fmt;
use std::sync::Arc;

use ndarray::Array2;
use ndarray_stats::QuantileExt;

use crate::algorithms::AlgorithmContext;
use crate::helpers::math::weights_to_cdf;
use crate::operators::selection::{SelectionOperator, first_objective};
use crate::random::RandomGenerator;

/// Temperature schedule: maps `(generation, max_generations)` to a
/// temperature.
pub type TemperatureFn = Arc<dyn Fn(usize, usize) -> f64 + Send + Sync>;

/// Boltzmann selection: weights are `exp(f̂ / T)` where `f̂` is the fitness
/// normalized into `[0, 1]` and `T` the scheduled temperature. Early high
/// temperatures keep the search explorative; the default schedule cools
/// towards greedy selection.
#[derive(Clone)]
pub struct BoltzmannSelection {
    temperature: TemperatureFn,
    cdf: Vec<f64>,
}

impl BoltzmannSelection {
    pub fn new(temperature: impl Fn(usize, usize) -> f64 + Send + Sync + 'static) -> Self {
        Self {
            temperature: Arc::new(temperature),
            cdf: Vec::new(),
        }
    }

    /// The default schedule `T(g, G) = −4/(1 + e^(−10·g/G + 3)) + 4.25`.
    pub fn default_temperature(generation: usize, max_generations: usize) -> f64 {
        let progress = generation as f64 / max_generations as f64;
        -4.0 / (1.0 + (-10.0 * progress + 3.0).exp()) + 4.25
    }
}

impl Default for BoltzmannSelection {
    fn default() -> Self {
        Self::new(Self::default_temperature)
    }
}

impl fmt::Debug for BoltzmannSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoltzmannSelection").finish_non_exhaustive()
    }
}

impl SelectionOperator for BoltzmannSelection {
    fn prepare(&mut self, ctx: &AlgorithmContext, fitness: &Array2<f64>) {
        let column = fitness.column(0);
        let fmin = *column
            .min()
            .expect("selection requires a non-empty population");
        let fmax = *column
            .max()
            .expect("selection requires a non-empty population");
        let df = (fmax - fmin).max(1e-6);

        let temperature = (self.temperature)(ctx.generation, ctx.max_generations);
        let weights: Vec<f64> = first_objective(fitness)
            .into_iter()
            .map(|f| ((f - fmin) / df / temperature).exp())
            .collect();
        self.cdf = weights_to_cdf(&weights);
    }

    fn select(&self, _fitness: &Array2<f64>, rng: &mut impl RandomGenerator) -> usize {
        rng.sample_cdf(&self.cdf)
    }
}
