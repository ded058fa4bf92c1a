//! # `random` – Unified RNG Abstraction
//!
//! Every stochastic operator in *evors* (sampling, selection, crossover,
//! mutation, reference-point generation) draws its randomness through the
//! [`RandomGenerator`] trait instead of touching the `rand` crate directly.
//! The trait is a thin façade over a raw `RngCore` handle with the handful of
//! draw shapes the engine actually needs:
//!
//! | Method | Purpose |
//! |--------|---------|
//! | `gen_range_usize(min, max)` | `usize` in `[min, max)` |
//! | `gen_range_f64(min, max)`   | `f64`  in `[min, max)` |
//! | `gen_bool(p)`               | Bernoulli(`p`) |
//! | `gen_probability()`         | uniform `[0, 1)` |
//! | `gen_normal()`              | standard normal |
//! | `sample_unique(n, k)`       | `k` unique indices from `[0, n)` (Floyd) |
//! | `sample_cdf(cdf)`           | index with `P(i) ∝ wᵢ` via binary search |
//! | `random_simplex_point(d)`   | uniform point on the standard `d`-simplex |
//! | `shuffle_vec_usize`         | in-place Fisher–Yates |
//!
//! ## Concrete generators
//!
//! | Type | Backed by | Intended for |
//! |------|-----------|--------------|
//! | [`EvoRandomGenerator`] | `rand::rngs::StdRng` | Production — reproducible with a seed. |
//! | [`NoopRandomGenerator`] + [`TestDummyRng`] | stub that panics on raw draws | Unit tests that override specific trait methods. |
//!
//! ## Sub-streams for parallel phases
//!
//! The generation loop runs selection, crossover, mutation and evaluation as
//! data-parallel phases. Each parallel task receives its own generator via
//! [`EvoRandomGenerator::stream`], derived from the engine seed, the current
//! generation, a phase tag and the task index with a SplitMix64 mix. The
//! resulting draws do not depend on thread scheduling, so a run is replayable
//! from its seed under any parallel policy.
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, RngCore, SeedableRng};
use rand_distr::StandardNormal;

/// A trait defining a unified interface for generating random values,
/// used across genetic operators and algorithms.
pub trait RandomGenerator {
    type R: RngCore + Rng;

    /// Returns a mutable reference to the underlying RNG implementing `RngCore`.
    fn rng(&mut self) -> &mut Self::R;

    /// Generates a random `usize` in the range `[min, max)`.
    fn gen_range_usize(&mut self, min: usize, max: usize) -> usize {
        self.rng().random_range(min..max)
    }

    /// Generates a random `f64` in the range `[min, max)`.
    fn gen_range_f64(&mut self, min: f64, max: f64) -> f64 {
        self.rng().random_range(min..max)
    }

    /// Generates a random boolean value with probability `p` of being `true`.
    fn gen_bool(&mut self, p: f64) -> bool {
        self.rng().random_bool(p)
    }

    /// Generates a uniform `f64` in the range `[0.0, 1.0)`.
    fn gen_probability(&mut self) -> f64 {
        self.rng().random::<f64>()
    }

    /// Draws a standard normal value.
    fn gen_normal(&mut self) -> f64 {
        let value: f64 = self.rng().sample(StandardNormal);
        value
    }

    fn shuffle_vec_usize(&mut self, vector: &mut Vec<usize>) {
        vector.shuffle(self.rng())
    }

    /// Samples `k` unique indices from `[0, n)` using Floyd's algorithm.
    ///
    /// The returned indices are in insertion order, not sorted.
    fn sample_unique(&mut self, n: usize, k: usize) -> Vec<usize> {
        assert!(k <= n, "cannot sample {k} unique values from [0, {n})");
        let mut picked: Vec<usize> = Vec::with_capacity(k);
        for j in (n - k)..n {
            let t = self.gen_range_usize(0, j + 1);
            if picked.contains(&t) {
                picked.push(j);
            } else {
                picked.push(t);
            }
        }
        picked
    }

    /// Samples an index from a precomputed CDF (prefix sums of normalized
    /// weights) with a binary search, so that `P(i) ∝ wᵢ`.
    fn sample_cdf(&mut self, cdf: &[f64]) -> usize {
        assert!(!cdf.is_empty(), "cannot sample from an empty CDF");
        let u = self.gen_probability();
        cdf.partition_point(|&c| c <= u).min(cdf.len() - 1)
    }

    /// Returns a uniformly random point on the standard `dim`-simplex,
    /// generated as normalized standard exponentials.
    fn random_simplex_point(&mut self, dim: usize) -> Vec<f64> {
        assert!(dim > 0, "the simplex dimension must be positive");
        let mut point: Vec<f64> = (0..dim)
            .map(|_| -(1.0 - self.gen_probability()).ln())
            .collect();
        let total: f64 = point.iter().sum();
        for x in point.iter_mut() {
            *x /= total;
        }
        point
    }
}

/// The production implementation of `RandomGenerator` using `StdRng`.
#[derive(Debug, Clone)]
pub struct EvoRandomGenerator {
    rng: StdRng,
}

impl EvoRandomGenerator {
    /// Creates a new `EvoRandomGenerator` from the provided `StdRng`.
    pub fn new(rng: StdRng) -> Self {
        Self { rng }
    }

    pub fn new_from_seed(seed: Option<u64>) -> Self {
        let rng = seed.map_or_else(|| StdRng::from_rng(&mut rand::rng()), StdRng::seed_from_u64);
        Self { rng }
    }

    /// Derives the deterministic sub-stream for one parallel task.
    ///
    /// The stream depends only on `(seed, generation, phase, index)`, never on
    /// thread scheduling, which is what makes parallel runs replayable.
    pub fn stream(seed: u64, generation: usize, phase: u64, index: usize) -> Self {
        let mut state = splitmix64(seed ^ (generation as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15));
        state = splitmix64(state ^ phase);
        state = splitmix64(state ^ index as u64);
        Self {
            rng: StdRng::seed_from_u64(state),
        }
    }
}

impl RandomGenerator for EvoRandomGenerator {
    type R = StdRng;

    fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }
}

fn splitmix64(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// A dummy RNG for testing purposes. It is used by fake generators that
/// override the trait methods they need; any draw reaching the raw RNG is a
/// test bug and panics.
pub struct TestDummyRng;

impl RngCore for TestDummyRng {
    fn next_u32(&mut self) -> u32 {
        unimplemented!("Not used in this test")
    }

    fn next_u64(&mut self) -> u64 {
        unimplemented!("Not used in this test")
    }

    fn fill_bytes(&mut self, _dest: &mut [u8]) {
        unimplemented!("Not used in this test")
    }
}

/// A `RandomGenerator` whose raw RNG panics on use. Handy when a code path
/// requires the trait but must not actually consume randomness.
pub struct NoopRandomGenerator {
    dummy: TestDummyRng,
}

impl Default for NoopRandomGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl NoopRandomGenerator {
    pub fn new() -> Self {
        Self {
            dummy: TestDummyRng,
        }
    }
}

impl RandomGenerator for NoopRandomGenerator {
    type R = TestDummyRng;

    fn rng(&mut self) -> &mut TestDummyRng {
        &mut self.dummy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn seeded() -> EvoRandomGenerator {
        EvoRandomGenerator::new(StdRng::seed_from_u64(42))
    }

    #[test]
    fn test_gen_range_f64() {
        let mut rng = seeded();
        let value = rng.gen_range_f64(3.0, 10.0);
        assert!(
            (3.0..10.0).contains(&value),
            "gen_range_f64 produced {value} outside [3, 10)"
        );
    }

    #[test]
    fn test_gen_bool_extremes() {
        let mut rng = seeded();
        assert!(rng.gen_bool(1.0));
        assert!(!rng.gen_bool(0.0));
    }

    #[test]
    fn test_sample_unique_returns_distinct_indices() {
        let mut rng = seeded();
        let picks = rng.sample_unique(100, 10);
        assert_eq!(picks.len(), 10);
        let mut sorted = picks.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), 10, "sample_unique returned duplicates");
        assert!(picks.iter().all(|&i| i < 100));
    }

    #[test]
    fn test_sample_unique_full_range() {
        let mut rng = seeded();
        let mut picks = rng.sample_unique(5, 5);
        picks.sort_unstable();
        assert_eq!(picks, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_sample_cdf_respects_weights() {
        // Index 1 owns the whole mass between 0.0 and 1.0 except a sliver.
        let cdf = [0.0, 1.0];
        let mut rng = seeded();
        for _ in 0..50 {
            assert_eq!(rng.sample_cdf(&cdf), 1);
        }
    }

    #[test]
    fn test_random_simplex_point_sums_to_one() {
        let mut rng = seeded();
        let point = rng.random_simplex_point(4);
        assert_eq!(point.len(), 4);
        let total: f64 = point.iter().sum();
        assert!((total - 1.0).abs() < 1e-12);
        assert!(point.iter().all(|&x| (0.0..=1.0).contains(&x)));
    }

    #[test]
    fn test_stream_is_deterministic() {
        let mut a = EvoRandomGenerator::stream(7, 3, 1, 42);
        let mut b = EvoRandomGenerator::stream(7, 3, 1, 42);
        for _ in 0..8 {
            assert_eq!(a.gen_probability(), b.gen_probability());
        }
    }

    #[test]
    fn test_stream_differs_across_indices() {
        let mut a = EvoRandomGenerator::stream(7, 3, 1, 0);
        let mut b = EvoRandomGenerator::stream(7, 3, 1, 1);
        let draws_a: Vec<f64> = (0..4).map(|_| a.gen_probability()).collect();
        let draws_b: Vec<f64> = (0..4).map(|_| b.gen_probability()).collect();
        assert_ne!(draws_a, draws_b);
    }
}
