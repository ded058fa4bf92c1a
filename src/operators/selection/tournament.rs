use ndarray::Array2;

use crate::algorithms::AlgorithmContext;
use crate::error::ParameterError;
use crate::operators::selection::{SelectionOperator, first_objective};
use crate::random::RandomGenerator;

/// Tournament selection: draw `size` unique candidates, keep the best by
/// first-objective fitness. Ties go to the first drawn candidate.
#[derive(Debug, Clone)]
pub struct TournamentSelection {
    size: usize,
    fvec: Vec<f64>,
}

impl TournamentSelection {
    pub fn new(size: usize) -> Result<Self, ParameterError> {
        if size < 2 {
            return Err(ParameterError::Invalid(format!(
                "the tournament size must be at least 2, got {size}"
            )));
        }
        Ok(Self {
            size,
            fvec: Vec::new(),
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }
}

impl SelectionOperator for TournamentSelection {
    fn prepare(&mut self, _ctx: &AlgorithmContext, fitness: &Array2<f64>) {
        assert!(
            fitness.nrows() >= self.size,
            "the population must be at least as large as the tournament"
        );
        self.fvec = first_objective(fitness);
    }

    fn select(&self, _fitness: &Array2<f64>, rng: &mut impl RandomGenerator) -> usize {
        let picks = rng.sample_unique(self.fvec.len(), self.size);
        let mut best = picks[0];
        for &idx in &picks[1..] {
            if self.fvec[idx] > self.fvec[best] {
                best = idx;
            }
        }
        best
    }
}
