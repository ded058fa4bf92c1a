//! Mutation operators.
//!
//! `mutate` perturbs a chromosome in place; the provided `apply` wraps it
//! with the lifecycle bookkeeping: the candidate's `evaluated` flag is
//! cleared if and only if the chromosome actually changed (bit-exact
//! comparison against the pre-image).
use ndarray::Array1;

use crate::algorithms::AlgorithmContext;
use crate::encoding::Encoding;
use crate::genetic::Candidate;
use crate::random::RandomGenerator;

mod bitflip;
mod discrete;
mod real;

pub use bitflip::BitFlipMutation;
pub use discrete::{InversionMutation, RandomResetMutation, SwapMutation};
pub use real::{
    BoundaryMutation, GaussianMutation, NonUniformMutation, PolynomialMutation,
    UniformRealMutation,
};

pub trait MutationOperator: Clone + Send + Sync {
    /// The encoding this operator is statically paired with.
    type Enc: Encoding;

    /// Mutation probability `pm` (per gene for locus-wise operators).
    fn rate(&self) -> f64;

    /// Perturbs the chromosome in place. The result must satisfy the
    /// encoding's invariants (bounds clamping, permutation property).
    fn mutate(
        &self,
        genes: &mut Array1<f64>,
        ctx: &AlgorithmContext,
        rng: &mut impl RandomGenerator,
    );

    /// Mutates the candidate, clearing `evaluated` iff the genes changed.
    fn apply(
        &self,
        candidate: &mut Candidate,
        ctx: &AlgorithmContext,
        rng: &mut impl RandomGenerator,
    ) {
        let before = candidate.genes.clone();
        self.mutate(&mut candidate.genes, ctx, rng);
        if candidate.genes != before {
            candidate.evaluated = false;
        }
    }
}
