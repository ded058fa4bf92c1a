//! Crossover operators.
//!
//! `cross` recombines two parent chromosomes into two children; the provided
//! `apply` flips the `pc` coin, returns clones of the parents when crossover
//! is not triggered, and builds the children so that `evaluated` survives
//! exactly when a child's genes equal its source parent's.
use ndarray::Array1;

use crate::encoding::Encoding;
use crate::error::OperatorError;
use crate::genetic::Candidate;
use crate::random::RandomGenerator;

mod permutation;
mod point;
mod real;
mod uniform;

pub use permutation::{
    CycleCrossover, EdgeRecombinationCrossover, OrderCrossover, PartiallyMappedCrossover,
};
pub use point::{NPointCrossover, SinglePointCrossover, TwoPointCrossover};
pub use real::{
    ArithmeticCrossover, BlxAlphaCrossover, SimulatedBinaryCrossover, WrightCrossover,
};
pub use uniform::UniformCrossover;

pub trait CrossoverOperator: Clone + Send + Sync {
    /// The encoding this operator is statically paired with.
    type Enc: Encoding;

    /// Crossover probability `pc`.
    fn rate(&self) -> f64;

    /// Recombines two parents into two children chromosomes. The children
    /// must satisfy the encoding's invariants (bounds clamping included).
    fn cross(
        &self,
        parent_a: &Candidate,
        parent_b: &Candidate,
        rng: &mut impl RandomGenerator,
    ) -> Result<(Array1<f64>, Array1<f64>), OperatorError>;

    /// Applies the operator to one parent pair.
    fn apply(
        &self,
        parent_a: &Candidate,
        parent_b: &Candidate,
        rng: &mut impl RandomGenerator,
    ) -> Result<(Candidate, Candidate), OperatorError> {
        if parent_a.genes.len() != parent_b.genes.len() {
            return Err(OperatorError::ParentLengthMismatch {
                left: parent_a.genes.len(),
                right: parent_b.genes.len(),
            });
        }
        if rng.gen_probability() <= self.rate() {
            let (genes_a, genes_b) = self.cross(parent_a, parent_b, rng)?;
            Ok((
                Candidate::inherit(parent_a, genes_a),
                Candidate::inherit(parent_b, genes_b),
            ))
        } else {
            Ok((parent_a.clone(), parent_b.clone()))
        }
    }
}

/// Shared bounds-length check for the real-coded operators.
pub(crate) fn check_bounds_len(
    chrom_len: usize,
    bounds: &[(f64, f64)],
) -> Result<(), OperatorError> {
    if chrom_len != bounds.len() {
        return Err(OperatorError::BoundsLengthMismatch {
            chrom_len,
            bounds_len: bounds.len(),
        });
    }
    Ok(())
}
