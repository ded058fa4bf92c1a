//! Reordering and reset mutations for integer and permutation chromosomes.
use std::marker::PhantomData;

use ndarray::Array1;

use crate::algorithms::AlgorithmContext;
use crate::encoding::{IntegerEncoding, PermutationEncoding, ReorderableEncoding};
use crate::error::ParameterError;
use crate::helpers::validators::validate_probability;
use crate::operators::mutation::MutationOperator;
use crate::random::RandomGenerator;

/// Swaps two random positions with probability `pm`. Order-preserving for
/// every reorderable encoding, including permutations.
#[derive(Debug, Clone)]
pub struct SwapMutation<E: ReorderableEncoding = PermutationEncoding> {
    rate: f64,
    _encoding: PhantomData<E>,
}

impl<E: ReorderableEncoding> SwapMutation<E> {
    pub fn new(rate: f64) -> Result<Self, ParameterError> {
        validate_probability(rate, "Mutation rate")?;
        Ok(Self {
            rate,
            _encoding: PhantomData,
        })
    }
}

impl<E: ReorderableEncoding> MutationOperator for SwapMutation<E> {
    type Enc = E;

    fn rate(&self) -> f64 {
        self.rate
    }

    fn mutate(
        &self,
        genes: &mut Array1<f64>,
        _ctx: &AlgorithmContext,
        rng: &mut impl RandomGenerator,
    ) {
        if genes.len() < 2 || !rng.gen_bool(self.rate) {
            return;
        }
        let picks = rng.sample_unique(genes.len(), 2);
        genes.swap(picks[0], picks[1]);
    }
}

/// Reverses a random segment with probability `pm`.
#[derive(Debug, Clone)]
pub struct InversionMutation<E: ReorderableEncoding = PermutationEncoding> {
    rate: f64,
    _encoding: PhantomData<E>,
}

impl<E: ReorderableEncoding> InversionMutation<E> {
    pub fn new(rate: f64) -> Result<Self, ParameterError> {
        validate_probability(rate, "Mutation rate")?;
        Ok(Self {
            rate,
            _encoding: PhantomData,
        })
    }
}

impl<E: ReorderableEncoding> MutationOperator for InversionMutation<E> {
    type Enc = E;

    fn rate(&self) -> f64 {
        self.rate
    }

    fn mutate(
        &self,
        genes: &mut Array1<f64>,
        _ctx: &AlgorithmContext,
        rng: &mut impl RandomGenerator,
    ) {
        if genes.len() < 2 || !rng.gen_bool(self.rate) {
            return;
        }
        let mut start = rng.gen_range_usize(0, genes.len());
        let mut end = rng.gen_range_usize(0, genes.len());
        if start > end {
            std::mem::swap(&mut start, &mut end);
        }
        while start < end {
            genes.swap(start, end);
            start += 1;
            end -= 1;
        }
    }
}

/// Replaces each gene with a uniform draw from `[0, base)` independently with
/// probability `pm`.
#[derive(Debug, Clone)]
pub struct RandomResetMutation {
    rate: f64,
    base: u32,
}

impl RandomResetMutation {
    pub fn new(rate: f64, base: u32) -> Result<Self, ParameterError> {
        validate_probability(rate, "Mutation rate")?;
        if base < 2 {
            return Err(ParameterError::Invalid(format!(
                "the integer base must be at least 2, got {base}"
            )));
        }
        Ok(Self { rate, base })
    }
}

impl MutationOperator for RandomResetMutation {
    type Enc = IntegerEncoding;

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
                *gene = rng.gen_range_usize(0, self.base as usize) as f64;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{RandomGenerator, TestDummyRng};
    use ndarray::array;

    struct FakeRandom {
        bools: Vec<bool>,
        bool_index: usize,
        ranges: Vec<usize>,
        range_index: usize,
        unique: Vec<usize>,
        dummy: TestDummyRng,
    }

    impl FakeRandom {
        fn new(bools: Vec<bool>, ranges: Vec<usize>, unique: Vec<usize>) -> Self {
            Self {
                bools,
                bool_index: 0,
                ranges,
                range_index: 0,
                unique,
                dummy: TestDummyRng,
            }
        }
    }

    impl RandomGenerator for FakeRandom {
        type R = TestDummyRng;
        fn rng(&mut self) -> &mut TestDummyRng {
            &mut self.dummy
        }
        fn gen_bool(&mut self, _p: f64) -> bool {
            let value = self.bools[self.bool_index];
            self.bool_index += 1;
            value
        }
        fn gen_range_usize(&mut self, _min: usize, _max: usize) -> usize {
            let value = self.ranges[self.range_index];
            self.range_index += 1;
            value
        }
        fn sample_unique(&mut self, _n: usize, _k: usize) -> Vec<usize> {
            self.unique.clone()
        }
    }

    fn ctx() -> AlgorithmContext {
        AlgorithmContext {
            chrom_len: 5,
            population_size: 1,
            num_objectives: 1,
            generation: 0,
            max_generations: 1,
        }
    }

    #[test]
    fn test_swap_exchanges_two_positions() {
        let mut genes = array![0.0, 1.0, 2.0, 3.0, 4.0];
        let mutation = SwapMutation::<PermutationEncoding>::new(1.0).unwrap();
        let mut rng = FakeRandom::new(vec![true], vec![], vec![1, 3]);
        mutation.mutate(&mut genes, &ctx(), &mut rng);
        assert_eq!(genes, array![0.0, 3.0, 2.0, 1.0, 4.0]);
    }

    #[test]
    fn test_swap_not_triggered_leaves_genes_alone() {
        let mut genes = array![0.0, 1.0, 2.0];
        let mutation = SwapMutation::<PermutationEncoding>::new(0.5).unwrap();
        let mut rng = FakeRandom::new(vec![false], vec![], vec![]);
        mutation.mutate(&mut genes, &ctx(), &mut rng);
        assert_eq!(genes, array![0.0, 1.0, 2.0]);
    }

    #[test]
    fn test_inversion_reverses_a_segment() {
        let mut genes = array![0.0, 1.0, 2.0, 3.0, 4.0];
        let mutation = InversionMutation::<PermutationEncoding>::new(1.0).unwrap();
        let mut rng = FakeRandom::new(vec![true], vec![1, 3], vec![]);
        mutation.mutate(&mut genes, &ctx(), &mut rng);
        assert_eq!(genes, array![0.0, 3.0, 2.0, 1.0, 4.0]);
    }

    #[test]
    fn test_random_reset_respects_base() {
        let mut genes = array![0.0, 1.0, 2.0];
        let mutation = RandomResetMutation::new(1.0, 4).unwrap();
        let mut rng = FakeRandom::new(vec![true, false, true], vec![3, 0], vec![]);
        mutation.mutate(&mut genes, &ctx(), &mut rng);
        assert_eq!(genes, array![3.0, 1.0, 0.0]);
    }

    #[test]
    fn test_random_reset_base_validation() {
        assert!(RandomResetMutation::new(0.5, 1).is_err());
        assert!(RandomResetMutation::new(0.5, 2).is_ok());
    }
}
