//! Real-coded crossovers with per-locus bounds. Every operator clamps the
//! children back into `[lowᵢ, highᵢ]` where the recombination formula can
//! leave the interval.
use std::sync::Arc;

use ndarray::Array1;

use crate::encoding::RealEncoding;
use crate::error::{OperatorError, ParameterError};
use crate::genetic::Candidate;
use crate::helpers::math::pareto_compare;
use crate::helpers::validators::{validate_non_negative, validate_probability};
use crate::operators::crossover::{CrossoverOperator, check_bounds_len};
use crate::random::RandomGenerator;

/// Convex combination of the parents with a single random `α ∈ [0, 1)`.
/// The children always stay within the parents' bounds.
#[derive(Debug, Clone)]
pub struct ArithmeticCrossover {
    rate: f64,
}

impl ArithmeticCrossover {
    pub fn new(rate: f64) -> Result<Self, ParameterError> {
        validate_probability(rate, "Crossover rate")?;
        Ok(Self { rate })
    }
}

impl CrossoverOperator for ArithmeticCrossover {
    type Enc = RealEncoding;

    fn rate(&self) -> f64 {
        self.rate
    }

    fn cross(
        &self,
        parent_a: &Candidate,
        parent_b: &Candidate,
        rng: &mut impl RandomGenerator,
    ) -> Result<(Array1<f64>, Array1<f64>), OperatorError> {
        let alpha = rng.gen_probability();
        let child_a = alpha * &parent_a.genes + (1.0 - alpha) * &parent_b.genes;
        let child_b = (1.0 - alpha) * &parent_a.genes + alpha * &parent_b.genes;
        Ok((child_a, child_b))
    }
}

/// BLX-α: each child gene is drawn uniformly from the parents' interval
/// extended by `α` times its width, then clamped to the bounds.
#[derive(Debug, Clone)]
pub struct BlxAlphaCrossover {
    rate: f64,
    alpha: f64,
    bounds: Arc<Vec<(f64, f64)>>,
}

impl BlxAlphaCrossover {
    pub fn new(rate: f64, alpha: f64, bounds: Arc<Vec<(f64, f64)>>) -> Result<Self, ParameterError> {
        validate_probability(rate, "Crossover rate")?;
        validate_non_negative(alpha, "Alpha")?;
        Ok(Self { rate, alpha, bounds })
    }
}

impl CrossoverOperator for BlxAlphaCrossover {
    type Enc = RealEncoding;

    fn rate(&self) -> f64 {
        self.rate
    }

    fn cross(
        &self,
        parent_a: &Candidate,
        parent_b: &Candidate,
        rng: &mut impl RandomGenerator,
    ) -> Result<(Array1<f64>, Array1<f64>), OperatorError> {
        check_bounds_len(parent_a.genes.len(), &self.bounds)?;

        let len = parent_a.genes.len();
        let mut child_a = parent_a.genes.clone();
        let mut child_b = parent_b.genes.clone();
        for i in 0..len {
            let (low, high) = self.bounds[i];
            let range_min = parent_a.genes[i].min(parent_b.genes[i]);
            let range_max = parent_a.genes[i].max(parent_b.genes[i]);
            let extension = self.alpha * (range_max - range_min);

            let sample_low = range_min - extension;
            let sample_high = range_max + extension;
            for child in [&mut child_a, &mut child_b] {
                let gene = if sample_low == sample_high {
                    sample_low
                } else {
                    rng.gen_range_f64(sample_low, sample_high)
                };
                child[i] = gene.clamp(low, high);
            }
        }
        Ok((child_a, child_b))
    }
}

/// Simulated binary crossover (Deb's SBX): a single spread factor `β` is
/// sampled per crossover from the polynomial distribution with index `η`.
#[derive(Debug, Clone)]
pub struct SimulatedBinaryCrossover {
    rate: f64,
    eta: f64,
    bounds: Arc<Vec<(f64, f64)>>,
}

impl SimulatedBinaryCrossover {
    pub fn new(rate: f64, eta: f64, bounds: Arc<Vec<(f64, f64)>>) -> Result<Self, ParameterError> {
        validate_probability(rate, "Crossover rate")?;
        validate_non_negative(eta, "Eta")?;
        Ok(Self { rate, eta, bounds })
    }
}

impl CrossoverOperator for SimulatedBinaryCrossover {
    type Enc = RealEncoding;

    fn rate(&self) -> f64 {
        self.rate
    }

    fn cross(
        &self,
        parent_a: &Candidate,
        parent_b: &Candidate,
        rng: &mut impl RandomGenerator,
    ) -> Result<(Array1<f64>, Array1<f64>), OperatorError> {
        check_bounds_len(parent_a.genes.len(), &self.bounds)?;

        let u = rng.gen_probability();
        let beta = if u <= 0.5 {
            (2.0 * u).powf(1.0 / (self.eta + 1.0))
        } else {
            (1.0 / (2.0 * (1.0 - u))).powf(1.0 / (self.eta + 1.0))
        };

        let len = parent_a.genes.len();
        let mut child_a = parent_a.genes.clone();
        let mut child_b = parent_b.genes.clone();
        for i in 0..len {
            let (low, high) = self.bounds[i];
            let x1 = parent_a.genes[i];
            let x2 = parent_b.genes[i];
            child_a[i] = (0.5 * ((1.0 - beta) * x1 + (1.0 + beta) * x2)).clamp(low, high);
            child_b[i] = (0.5 * ((1.0 + beta) * x1 + (1.0 - beta) * x2)).clamp(low, high);
        }
        Ok((child_a, child_b))
    }
}

/// Wright's heuristic crossover: both children are displaced from the better
/// parent along the difference of the parents, with random weights.
/// "Better" is decided by strict Pareto domination; when neither parent
/// dominates, the first parent is used.
#[derive(Debug, Clone)]
pub struct WrightCrossover {
    rate: f64,
    bounds: Arc<Vec<(f64, f64)>>,
}

impl WrightCrossover {
    pub fn new(rate: f64, bounds: Arc<Vec<(f64, f64)>>) -> Result<Self, ParameterError> {
        validate_probability(rate, "Crossover rate")?;
        Ok(Self { rate, bounds })
    }
}

impl CrossoverOperator for WrightCrossover {
    type Enc = RealEncoding;

    fn rate(&self) -> f64 {
        self.rate
    }

    fn cross(
        &self,
        parent_a: &Candidate,
        parent_b: &Candidate,
        rng: &mut impl RandomGenerator,
    ) -> Result<(Array1<f64>, Array1<f64>), OperatorError> {
        check_bounds_len(parent_a.genes.len(), &self.bounds)?;
        debug_assert!(
            parent_a.evaluated && parent_b.evaluated,
            "Wright crossover compares parent fitness"
        );

        let a_dominated =
            pareto_compare(parent_a.fitness.view(), parent_b.fitness.view()) == -1;
        let (better, worse) = if a_dominated {
            (&parent_b.genes, &parent_a.genes)
        } else {
            (&parent_a.genes, &parent_b.genes)
        };

        let w1 = rng.gen_probability();
        let w2 = rng.gen_probability();
        let len = better.len();
        let mut child_a = Array1::zeros(len);
        let mut child_b = Array1::zeros(len);
        for i in 0..len {
            let (low, high) = self.bounds[i];
            let direction = better[i] - worse[i];
            child_a[i] = (w1 * direction + better[i]).clamp(low, high);
            child_b[i] = (w2 * direction + better[i]).clamp(low, high);
        }
        Ok((child_a, child_b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{EvoRandomGenerator, RandomGenerator, TestDummyRng};
    use ndarray::array;

    struct FakeRandom {
        probabilities: Vec<f64>,
        index: usize,
        dummy: TestDummyRng,
    }

    impl FakeRandom {
        fn new(probabilities: Vec<f64>) -> Self {
            Self {
                probabilities,
                index: 0,
                dummy: TestDummyRng,
            }
        }
    }

    impl RandomGenerator for FakeRandom {
        type R = TestDummyRng;
        fn rng(&mut self) -> &mut TestDummyRng {
            &mut self.dummy
        }
        fn gen_probability(&mut self) -> f64 {
            let value = self.probabilities[self.index];
            self.index += 1;
            value
        }
    }

    fn evaluated(genes: Array1<f64>, fitness: Array1<f64>) -> Candidate {
        Candidate {
            genes,
            fitness,
            evaluated: true,
        }
    }

    #[test]
    fn test_arithmetic_is_a_convex_combination() {
        let a = Candidate::from_genes(array![0.0, 4.0]);
        let b = Candidate::from_genes(array![2.0, 0.0]);
        let operator = ArithmeticCrossover::new(1.0).unwrap();
        let mut rng = FakeRandom::new(vec![0.25]);
        let (child_a, child_b) = operator.cross(&a, &b, &mut rng).unwrap();
        assert_eq!(child_a, array![1.5, 1.0]);
        assert_eq!(child_b, array![0.5, 3.0]);
    }

    #[test]
    fn test_blx_alpha_stays_in_bounds() {
        let bounds = Arc::new(vec![(0.0, 1.0), (0.0, 1.0), (-1.0, 2.0)]);
        let a = Candidate::from_genes(array![0.1, 0.9, 0.0]);
        let b = Candidate::from_genes(array![0.9, 0.1, 1.5]);
        let operator = BlxAlphaCrossover::new(1.0, 0.5, bounds.clone()).unwrap();
        let mut rng = EvoRandomGenerator::new_from_seed(Some(42));
        for _ in 0..25 {
            let (child_a, child_b) = operator.cross(&a, &b, &mut rng).unwrap();
            for child in [child_a, child_b] {
                for (gene, &(low, high)) in child.iter().zip(bounds.iter()) {
                    assert!(*gene >= low && *gene <= high);
                }
            }
        }
    }

    #[test]
    fn test_blx_bounds_length_mismatch_is_reported() {
        let bounds = Arc::new(vec![(0.0, 1.0)]);
        let a = Candidate::from_genes(array![0.1, 0.9]);
        let b = Candidate::from_genes(array![0.9, 0.1]);
        let operator = BlxAlphaCrossover::new(1.0, 0.5, bounds).unwrap();
        let mut rng = FakeRandom::new(vec![]);
        let err = operator.cross(&a, &b, &mut rng).unwrap_err();
        assert_eq!(
            err,
            OperatorError::BoundsLengthMismatch {
                chrom_len: 2,
                bounds_len: 1
            }
        );
    }

    #[test]
    fn test_sbx_beta_one_reproduces_parents() {
        // u = 0.5 → β = 1 → the children equal the (swapped) parents
        let bounds = Arc::new(vec![(0.0, 10.0), (0.0, 10.0)]);
        let a = Candidate::from_genes(array![2.0, 6.0]);
        let b = Candidate::from_genes(array![4.0, 2.0]);
        let operator = SimulatedBinaryCrossover::new(1.0, 2.0, bounds).unwrap();
        let mut rng = FakeRandom::new(vec![0.5]);
        let (child_a, child_b) = operator.cross(&a, &b, &mut rng).unwrap();
        for i in 0..2 {
            assert!((child_a[i] - b.genes[i]).abs() < 1e-12);
            assert!((child_b[i] - a.genes[i]).abs() < 1e-12);
        }
    }

    #[test]
    fn test_sbx_contracts_towards_the_mean_for_small_u() {
        let bounds = Arc::new(vec![(0.0, 10.0)]);
        let a = Candidate::from_genes(array![2.0]);
        let b = Candidate::from_genes(array![6.0]);
        let operator = SimulatedBinaryCrossover::new(1.0, 2.0, bounds).unwrap();
        // u = 0.0625 → β = (0.125)^(1/3) = 0.5
        let mut rng = FakeRandom::new(vec![0.0625]);
        let (child_a, child_b) = operator.cross(&a, &b, &mut rng).unwrap();
        assert!((child_a[0] - 4.5).abs() < 1e-9);
        assert!((child_b[0] - 3.5).abs() < 1e-9);
    }

    #[test]
    fn test_wright_moves_away_from_the_dominated_parent() {
        let bounds = Arc::new(vec![(0.0, 10.0)]);
        // parent_b strictly dominates parent_a
        let a = evaluated(array![2.0], array![0.0]);
        let b = evaluated(array![4.0], array![1.0]);
        let operator = WrightCrossover::new(1.0, bounds).unwrap();
        let mut rng = FakeRandom::new(vec![0.5, 0.25]);
        let (child_a, child_b) = operator.cross(&a, &b, &mut rng).unwrap();
        // better = b at 4.0, direction = 4 − 2 = 2
        assert!((child_a[0] - 5.0).abs() < 1e-12);
        assert!((child_b[0] - 4.5).abs() < 1e-12);
    }

    #[test]
    fn test_wright_defaults_to_first_parent_when_incomparable() {
        let bounds = Arc::new(vec![(0.0, 10.0), (0.0, 10.0)]);
        let a = evaluated(array![2.0, 2.0], array![1.0, 0.0]);
        let b = evaluated(array![4.0, 4.0], array![0.0, 1.0]);
        let operator = WrightCrossover::new(1.0, bounds).unwrap();
        let mut rng = FakeRandom::new(vec![0.0, 0.0]);
        // w = 0 → both children sit exactly on the "better" parent, which
        // must be parent_a for incomparable fitness
        let (child_a, child_b) = operator.cross(&a, &b, &mut rng).unwrap();
        assert_eq!(child_a, a.genes);
        assert_eq!(child_b, a.genes);
    }
}
