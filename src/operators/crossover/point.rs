use std::marker::PhantomData;

use ndarray::Array1;

use crate::encoding::{BinaryEncoding, DiscreteEncoding};
use crate::error::{OperatorError, ParameterError};
use crate::genetic::Candidate;
use crate::helpers::validators::validate_probability;
use crate::operators::crossover::CrossoverOperator;
use crate::random::RandomGenerator;

/// Swaps the segments between `n` unique cut points drawn from the interior
/// of the chromosome. When the chromosome is too short for `n` cuts, every
/// interior position becomes a cut.
fn n_point_cross(
    a: &Array1<f64>,
    b: &Array1<f64>,
    n: usize,
    rng: &mut impl RandomGenerator,
) -> (Array1<f64>, Array1<f64>) {
    let len = a.len();
    let interior = len.saturating_sub(1);
    let mut cuts: Vec<usize> = rng
        .sample_unique(interior, n.min(interior))
        .into_iter()
        .map(|c| c + 1)
        .collect();
    cuts.sort_unstable();

    let mut child_a = a.clone();
    let mut child_b = b.clone();
    let mut swapping = false;
    let mut next_cut = cuts.iter().peekable();
    for i in 0..len {
        if next_cut.peek() == Some(&&i) {
            swapping = !swapping;
            next_cut.next();
        }
        if swapping {
            child_a[i] = b[i];
            child_b[i] = a[i];
        }
    }
    (child_a, child_b)
}

macro_rules! point_crossover {
    ($(#[$doc:meta])* $name:ident, $num_points:expr) => {
        $(#[$doc])*
        #[derive(Debug, Clone)]
        pub struct $name<E: DiscreteEncoding = BinaryEncoding> {
            rate: f64,
            _encoding: PhantomData<E>,
        }

        impl<E: DiscreteEncoding> $name<E> {
            pub fn new(rate: f64) -> Result<Self, ParameterError> {
                validate_probability(rate, "Crossover rate")?;
                Ok(Self {
                    rate,
                    _encoding: PhantomData,
                })
            }
        }

        impl<E: DiscreteEncoding> CrossoverOperator for $name<E> {
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
                Ok(n_point_cross(
                    &parent_a.genes,
                    &parent_b.genes,
                    $num_points,
                    rng,
                ))
            }
        }
    };
}

point_crossover!(
    /// Single-point crossover for discrete chromosomes.
    SinglePointCrossover,
    1
);

point_crossover!(
    /// Two-point crossover for discrete chromosomes.
    TwoPointCrossover,
    2
);

/// n-point crossover for discrete chromosomes.
#[derive(Debug, Clone)]
pub struct NPointCrossover<E: DiscreteEncoding = BinaryEncoding> {
    rate: f64,
    num_points: usize,
    _encoding: PhantomData<E>,
}

impl<E: DiscreteEncoding> NPointCrossover<E> {
    pub fn new(rate: f64, num_points: usize) -> Result<Self, ParameterError> {
        validate_probability(rate, "Crossover rate")?;
        if num_points == 0 {
            return Err(ParameterError::NotPositive {
                name: "Number of crossover points",
            });
        }
        Ok(Self {
            rate,
            num_points,
            _encoding: PhantomData,
        })
    }
}

impl<E: DiscreteEncoding> CrossoverOperator for NPointCrossover<E> {
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
        Ok(n_point_cross(
            &parent_a.genes,
            &parent_b.genes,
            self.num_points,
            rng,
        ))
    }
}
