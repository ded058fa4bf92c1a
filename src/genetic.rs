//! # `genetic` – Core Data Structures
//!
//! The types that flow through every stage of the engine: a [`Candidate`]
//! couples a chromosome with its fitness vector and an `evaluated` flag, and a
//! population is simply an ordered `Vec<Candidate>` of fixed size. Genes are
//! stored uniformly as `f64` in an `ndarray::Array1` regardless of encoding
//! (bits as 0.0/1.0, integers and permutation elements as whole floats), so
//! every operator family works on the same array type.
use std::cmp::Ordering;

use ndarray::{Array1, Array2};
use ordered_float::OrderedFloat;

/// One candidate solution: a fixed-length chromosome plus its fitness.
///
/// `fitness` must not be read while `evaluated` is `false`; the engine
/// re-evaluates such candidates before they reach any operator that consumes
/// fitness values.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub genes: Array1<f64>,
    pub fitness: Array1<f64>,
    pub evaluated: bool,
}

impl Candidate {
    /// A fresh, not-yet-evaluated candidate.
    pub fn from_genes(genes: Array1<f64>) -> Self {
        Self {
            genes,
            fitness: Array1::zeros(0),
            evaluated: false,
        }
    }

    /// A child built from `genes` that inherits `parent`'s fitness, which
    /// stays valid only when the chromosome is unchanged.
    pub fn inherit(parent: &Candidate, genes: Array1<f64>) -> Self {
        let evaluated = parent.evaluated && genes == parent.genes;
        Self {
            genes,
            fitness: parent.fitness.clone(),
            evaluated,
        }
    }

    /// Lexicographic total order over chromosomes, used to deduplicate the
    /// archive (chromosome equality is candidate identity).
    pub(crate) fn cmp_genes(&self, other: &Candidate) -> Ordering {
        self.genes
            .iter()
            .map(|&x| OrderedFloat(x))
            .cmp(other.genes.iter().map(|&x| OrderedFloat(x)))
    }
}

/// Stacks the fitness vectors of an evaluated population into the `N × M`
/// matrix handed to selection and survival operators, in population order.
pub fn fitness_matrix(population: &[Candidate]) -> Array2<f64> {
    debug_assert!(
        population.iter().all(|c| c.evaluated),
        "fitness matrices can only be built from evaluated candidates"
    );
    let n = population.len();
    let m = population.first().map_or(0, |c| c.fitness.len());
    Array2::from_shape_fn((n, m), |(i, j)| population[i].fitness[j])
}
