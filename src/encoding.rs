//! # `encoding` – Chromosome Encodings
//!
//! An [`Encoding`] knows how to draw a random chromosome and which invariant
//! its chromosomes satisfy. Operator applicability is expressed through
//! marker traits ([`DiscreteEncoding`], [`ReorderableEncoding`]) and the
//! `Enc` associated type carried by every operator, so pairing a bit-flip
//! mutation with a real-valued encoding is a compile error rather than a
//! runtime surprise.
use std::fmt::Debug;
use std::sync::Arc;

use ndarray::Array1;

use crate::error::ParameterError;
use crate::random::RandomGenerator;

pub trait Encoding: Clone + Debug + Send + Sync {
    /// Draws one random chromosome of length `chrom_len`.
    fn sample(&self, chrom_len: usize, rng: &mut impl RandomGenerator) -> Array1<f64>;

    /// Checks encoding-specific configuration against the chromosome length.
    fn validate(&self, _chrom_len: usize) -> Result<(), ParameterError> {
        Ok(())
    }
}

/// Encodings whose genes take finitely many values at each locus
/// independently; point and uniform crossovers apply to these.
pub trait DiscreteEncoding: Encoding {}

/// Encodings whose chromosomes may be reordered without breaking their
/// invariant; swap and inversion mutations apply to these.
pub trait ReorderableEncoding: Encoding {}

/// Genes are bits, stored as 0.0 / 1.0.
#[derive(Debug, Clone, Default)]
pub struct BinaryEncoding;

impl Encoding for BinaryEncoding {
    fn sample(&self, chrom_len: usize, rng: &mut impl RandomGenerator) -> Array1<f64> {
        Array1::from_iter((0..chrom_len).map(|_| if rng.gen_bool(0.5) { 1.0 } else { 0.0 }))
    }
}

impl DiscreteEncoding for BinaryEncoding {}

/// Genes are integers in `[0, base)`, stored as whole floats.
#[derive(Debug, Clone)]
pub struct IntegerEncoding {
    base: u32,
}

impl IntegerEncoding {
    pub fn new(base: u32) -> Result<Self, ParameterError> {
        if base < 2 {
            return Err(ParameterError::Invalid(format!(
                "the integer base must be at least 2, got {base}"
            )));
        }
        Ok(Self { base })
    }

    pub fn base(&self) -> u32 {
        self.base
    }
}

impl Encoding for IntegerEncoding {
    fn sample(&self, chrom_len: usize, rng: &mut impl RandomGenerator) -> Array1<f64> {
        Array1::from_iter(
            (0..chrom_len).map(|_| rng.gen_range_usize(0, self.base as usize) as f64),
        )
    }
}

impl DiscreteEncoding for IntegerEncoding {}
impl ReorderableEncoding for IntegerEncoding {}

/// Genes are reals with per-locus bounds `[lowᵢ, highᵢ]`.
#[derive(Debug, Clone)]
pub struct RealEncoding {
    bounds: Arc<Vec<(f64, f64)>>,
}

impl RealEncoding {
    pub fn new(bounds: Vec<(f64, f64)>) -> Result<Self, ParameterError> {
        for &(low, high) in &bounds {
            if !(low <= high && low.is_finite() && high.is_finite()) {
                return Err(ParameterError::Invalid(format!(
                    "each lower bound must not exceed its upper bound, got [{low}, {high}]"
                )));
            }
        }
        Ok(Self {
            bounds: Arc::new(bounds),
        })
    }

    pub fn bounds(&self) -> &Arc<Vec<(f64, f64)>> {
        &self.bounds
    }
}

impl Encoding for RealEncoding {
    fn sample(&self, chrom_len: usize, rng: &mut impl RandomGenerator) -> Array1<f64> {
        assert_eq!(
            chrom_len,
            self.bounds.len(),
            "the bounds vector must have one entry per gene"
        );
        Array1::from_iter(self.bounds.iter().map(|&(low, high)| {
            if low == high {
                low
            } else {
                rng.gen_range_f64(low, high)
            }
        }))
    }

    fn validate(&self, chrom_len: usize) -> Result<(), ParameterError> {
        if self.bounds.len() != chrom_len {
            return Err(ParameterError::Invalid(format!(
                "the bounds vector has {} entries but the chromosome length is {chrom_len}",
                self.bounds.len()
            )));
        }
        Ok(())
    }
}

/// Chromosomes are permutations of `0..L-1`, stored as whole floats.
#[derive(Debug, Clone, Default)]
pub struct PermutationEncoding;

impl Encoding for PermutationEncoding {
    fn sample(&self, chrom_len: usize, rng: &mut impl RandomGenerator) -> Array1<f64> {
        let mut order: Vec<usize> = (0..chrom_len).collect();
        rng.shuffle_vec_usize(&mut order);
        Array1::from_iter(order.into_iter().map(|v| v as f64))
    }
}

impl ReorderableEncoding for PermutationEncoding {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::EvoRandomGenerator;

    fn rng() -> EvoRandomGenerator {
        EvoRandomGenerator::new_from_seed(Some(42))
    }

    #[test]
    fn test_binary_sampling_only_produces_bits() {
        let mut rng = rng();
        let genes = BinaryEncoding.sample(64, &mut rng);
        assert_eq!(genes.len(), 64);
        assert!(genes.iter().all(|&g| g == 0.0 || g == 1.0));
    }

    #[test]
    fn test_integer_sampling_respects_base() {
        let mut rng = rng();
        let encoding = IntegerEncoding::new(5).unwrap();
        let genes = encoding.sample(100, &mut rng);
        assert!(genes.iter().all(|&g| g >= 0.0 && g < 5.0 && g.fract() == 0.0));
    }

    #[test]
    fn test_integer_base_must_be_at_least_two() {
        assert!(IntegerEncoding::new(1).is_err());
        assert!(IntegerEncoding::new(2).is_ok());
    }

    #[test]
    fn test_real_sampling_stays_in_bounds() {
        let mut rng = rng();
        let bounds = vec![(-5.0, 5.0), (0.0, 1.0), (2.0, 2.0)];
        let encoding = RealEncoding::new(bounds).unwrap();
        for _ in 0..20 {
            let genes = encoding.sample(3, &mut rng);
            assert!(genes[0] >= -5.0 && genes[0] <= 5.0);
            assert!(genes[1] >= 0.0 && genes[1] <= 1.0);
            assert_eq!(genes[2], 2.0, "degenerate bounds pin the gene");
        }
    }

    #[test]
    fn test_real_bounds_must_be_ordered() {
        assert!(RealEncoding::new(vec![(1.0, 0.0)]).is_err());
    }

    #[test]
    fn test_real_validate_checks_length() {
        let encoding = RealEncoding::new(vec![(0.0, 1.0); 3]).unwrap();
        assert!(encoding.validate(3).is_ok());
        assert!(encoding.validate(4).is_err());
    }

    #[test]
    fn test_permutation_sampling_is_a_permutation() {
        let mut rng = rng();
        let genes = PermutationEncoding.sample(10, &mut rng);
        let mut seen = vec![false; 10];
        for &g in genes.iter() {
            seen[g as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }
}
