use ndarray::Array1;

use crate::algorithms::AlgorithmContext;
use crate::encoding::BinaryEncoding;
use crate::error::ParameterError;
use crate::helpers::validators::validate_probability;
use crate::operators::mutation::MutationOperator;
use crate::random::RandomGenerator;

/// Flips each bit independently with probability `pm`.
#[derive(Debug, Clone)]
pub struct BitFlipMutation {
    rate: f64,
}

impl BitFlipMutation {
    pub fn new(rate: f64) -> Result<Self, ParameterError> {
        validate_probability(rate, "Mutation rate")?;
        Ok(Self { rate })
    }
}

impl MutationOperator for BitFlipMutation {
    type Enc = BinaryEncoding;

    fn rate(&self) -> f64 {
        self.rate
    }

    fn mutate(
        &self,
        genes: &mut Array1<f64>,
        _ctx: &AlgorithmContext,
        rng: &mut impl RandomGenerator,
    ) {
        for gene in genes.iter_mut() {
            if rng.gen_bool(self.rate) {
                *gene = 1.0 - *gene;
            }
        }
    }
}
