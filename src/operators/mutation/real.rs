//! Real-coded mutations with per-locus bounds. Each operator perturbs genes
//! independently with probability `pm` and clamps the result to
//! `[lowᵢ, highᵢ]`.
use std::sync::Arc;

use ndarray::Array1;

use crate::algorithms::AlgorithmContext;
use crate::encoding::RealEncoding;
use crate::error::ParameterError;
use crate::helpers::validators::{validate_non_negative, validate_probability};
use crate::operators::mutation::MutationOperator;
use crate::random::RandomGenerator;

/// Replaces the gene with a uniform draw from its bounds.
#[derive(Debug, Clone)]
pub struct UniformRealMutation {
    rate: f64,
    bounds: Arc<Vec<(f64, f64)>>,
}

impl UniformRealMutation {
    pub fn new(rate: f64, bounds: Arc<Vec<(f64, f64)>>) -> Result<Self, ParameterError> {
        validate_probability(rate, "Mutation rate")?;
        Ok(Self { rate, bounds })
    }
}

impl MutationOperator for UniformRealMutation {
    type Enc = RealEncoding;

    fn rate(&self) -> f64 {
        self.rate
    }

    fn mutate(
        &self,
        genes: &mut Array1<f64>,
        _ctx: &AlgorithmContext,
        rng: &mut impl RandomGenerator,
    ) {
        for (gene, &(low, high)) in genes.iter_mut().zip(self.bounds.iter()) {
            if rng.gen_bool(self.rate) {
                *gene = if low == high {
                    low
                } else {
                    rng.gen_range_f64(low, high)
                };
            }
        }
    }
}

/// Snaps the gene to one of its bounds, chosen by a fair coin.
#[derive(Debug, Clone)]
pub struct BoundaryMutation {
    rate: f64,
    bounds: Arc<Vec<(f64, f64)>>,
}

impl BoundaryMutation {
    pub fn new(rate: f64, bounds: Arc<Vec<(f64, f64)>>) -> Result<Self, ParameterError> {
        validate_probability(rate, "Mutation rate")?;
        Ok(Self { rate, bounds })
    }
}

impl MutationOperator for BoundaryMutation {
    type Enc = RealEncoding;

    fn rate(&self) -> f64 {
        self.rate
    }

    fn mutate(
        &self,
        genes: &mut Array1<f64>,
        _ctx: &AlgorithmContext,
        rng: &mut impl RandomGenerator,
    ) {
        for (gene, &(low, high)) in genes.iter_mut().zip(self.bounds.iter()) {
            if rng.gen_bool(self.rate) {
                *gene = if rng.gen_bool(0.5) { low } else { high };
            }
        }
    }
}

/// Non-uniform mutation: the perturbation magnitude shrinks with the
/// generation count, scaled by `(1 − g/G)^b`. Early generations explore the
/// whole interval, late generations fine-tune.
#[derive(Debug, Clone)]
pub struct NonUniformMutation {
    rate: f64,
    b: f64,
    bounds: Arc<Vec<(f64, f64)>>,
}

impl NonUniformMutation {
    pub fn new(rate: f64, b: f64, bounds: Arc<Vec<(f64, f64)>>) -> Result<Self, ParameterError> {
        validate_probability(rate, "Mutation rate")?;
        validate_non_negative(b, "Non-uniform mutation parameter")?;
        Ok(Self { rate, b, bounds })
    }
}

impl MutationOperator for NonUniformMutation {
    type Enc = RealEncoding;

    fn rate(&self) -> f64 {
        self.rate
    }

    fn mutate(
        &self,
        genes: &mut Array1<f64>,
        ctx: &AlgorithmContext,
        rng: &mut impl RandomGenerator,
    ) {
        let progress = ctx.generation as f64 / ctx.max_generations as f64;
        let scale = (1.0 - progress).powf(self.b);
        for (gene, &(low, high)) in genes.iter_mut().zip(self.bounds.iter()) {
            if rng.gen_bool(self.rate) {
                let x = *gene;
                let interval = if rng.gen_bool(0.5) {
                    high - x
                } else {
                    low - x
                };
                *gene = (x + interval * rng.gen_probability() * scale).clamp(low, high);
            }
        }
    }
}

/// Deb's polynomial mutation with distribution index `η`.
#[derive(Debug, Clone)]
pub struct PolynomialMutation {
    rate: f64,
    eta: f64,
    bounds: Arc<Vec<(f64, f64)>>,
}

impl PolynomialMutation {
    pub fn new(rate: f64, eta: f64, bounds: Arc<Vec<(f64, f64)>>) -> Result<Self, ParameterError> {
        validate_probability(rate, "Mutation rate")?;
        validate_non_negative(eta, "Eta")?;
        Ok(Self { rate, eta, bounds })
    }
}

impl MutationOperator for PolynomialMutation {
    type Enc = RealEncoding;

    fn rate(&self) -> f64 {
        self.rate
    }

    fn mutate(
        &self,
        genes: &mut Array1<f64>,
        _ctx: &AlgorithmContext,
        rng: &mut impl RandomGenerator,
    ) {
        let eta = self.eta;
        for (gene, &(low, high)) in genes.iter_mut().zip(self.bounds.iter()) {
            if !rng.gen_bool(self.rate) {
                continue;
            }
            let dx = high - low;
            if dx == 0.0 {
                continue;
            }
            let u = rng.gen_probability();
            let x = *gene;
            let delta = if u < 0.5 {
                let bl = (x - low) / dx;
                let b = 2.0 * u + (1.0 - 2.0 * u) * (1.0 - bl).powf(eta + 1.0);
                b.powf(1.0 / (eta + 1.0)) - 1.0
            } else {
                let bu = (high - x) / dx;
                let b = 2.0 * (1.0 - u) + 2.0 * (u - 0.5) * (1.0 - bu).powf(eta + 1.0);
                1.0 - b.powf(1.0 / (eta + 1.0))
            };
            *gene = (x + delta * dx).clamp(low, high);
        }
    }
}

/// Additive Gaussian noise with `σᵢ = fraction · (highᵢ − lowᵢ)`.
#[derive(Debug, Clone)]
pub struct GaussianMutation {
    rate: f64,
    sigma_fraction: f64,
    bounds: Arc<Vec<(f64, f64)>>,
}

impl GaussianMutation {
    pub fn new(
        rate: f64,
        sigma_fraction: f64,
        bounds: Arc<Vec<(f64, f64)>>,
    ) -> Result<Self, ParameterError> {
        validate_probability(rate, "Mutation rate")?;
        if !(sigma_fraction > 0.0 && sigma_fraction.is_finite()) {
            return Err(ParameterError::Invalid(format!(
                "the gaussian sigma fraction must be positive, got {sigma_fraction}"
            )));
        }
        Ok(Self {
            rate,
            sigma_fraction,
            bounds,
        })
    }
}

impl MutationOperator for GaussianMutation {
    type Enc = RealEncoding;

    fn rate(&self) -> f64 {
        self.rate
    }

    fn mutate(
        &self,
        genes: &mut Array1<f64>,
        _ctx: &AlgorithmContext,
        rng: &mut impl RandomGenerator,
    ) {
        for (gene, &(low, high)) in genes.iter_mut().zip(self.bounds.iter()) {
            if rng.gen_bool(self.rate) {
                let sigma = self.sigma_fraction * (high - low);
                *gene = (*gene + rng.gen_normal() * sigma).clamp(low, high);
            }
        }
    }
}
