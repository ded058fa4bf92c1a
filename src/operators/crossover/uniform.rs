use std::marker::PhantomData;

use ndarray::Array1;

use crate::encoding::{BinaryEncoding, DiscreteEncoding};
use crate::error::{OperatorError, ParameterError};
use crate::genetic::Candidate;
use crate::helpers::validators::validate_probability;
use crate::operators::crossover::CrossoverOperator;
use crate::random::RandomGenerator;

/// Uniform crossover: each locus is swapped between the two children with
/// probability 1/2.
#[derive(Debug, Clone)]
pub struct UniformCrossover<E: DiscreteEncoding = BinaryEncoding> {
    rate: f64,
    _encoding: PhantomData<E>,
}

impl<E: DiscreteEncoding> UniformCrossover<E> {
    pub fn new(rate: f64) -> Result<Self, ParameterError> {
        validate_probability(rate, "Crossover rate")?;
        Ok(Self {
            rate,
            _encoding: PhantomData,
        })
    }
}

impl<E: DiscreteEncoding> CrossoverOperator for UniformCrossover<E> {
    type Enc = E;

    fn rate(&self) -> f64 {
        self.rate
    }

    fn cross(
        &self,
        parent_a: &Candidate,
        parent_b: &Candidate,
        rng: &mut impl RandomGenerator,
    ) -> Result<(Array1<f64>, Array1<f64>), OperatorError> {
        let mut child_a = parent_a.genes.clone();
        let mut child_b = parent_b.genes.clone();
        for i in 0..child_a.len() {
            if rng.gen_bool(0.5) {
                child_a[i] = parent_b.genes[i];
                child_b[i] = parent_a.genes[i];
            }
        }
        Ok((child_a, child_b))
    }
}
