//! Deb's fast non-dominated sort.
//!
//! One pairwise pass over the fitness matrix counts, for every candidate, how
//! many others dominate it and which candidates it dominates (plain index
//! lists, discarded when the sort returns). Candidates with a zero count form
//! rank 0; removing a front decrements the counts of everything it dominates
//! and the indices that hit zero become the next rank.
use ndarray::Array2;

use crate::helpers::math::pareto_compare;
use crate::pareto::ParetoFronts;

/// Ranks every row of the fitness matrix by non-domination layer.
///
/// The output contains every index exactly once, grouped by rank in ascending
/// order; within a rank, indices are emitted in ascending order.
/// `O(M · N²)` time, `O(N²)` worst-case memory.
pub fn non_dominated_sort(fitness: &Array2<f64>) -> ParetoFronts {
    let n = fitness.nrows();
    let mut dominated_by_count = vec![0usize; n];
    let mut dominates: Vec<Vec<usize>> = vec![Vec::new(); n];

    for i in 0..n {
        for j in (i + 1)..n {
            match pareto_compare(fitness.row(i), fitness.row(j)) {
                1 => {
                    dominated_by_count[j] += 1;
                    dominates[i].push(j);
                }
                -1 => {
                    dominated_by_count[i] += 1;
                    dominates[j].push(i);
                }
                _ => {}
            }
        }
    }

    let mut sorted: ParetoFronts = Vec::with_capacity(n);
    let mut current_front: Vec<usize> = (0..n).filter(|&i| dominated_by_count[i] == 0).collect();

    let mut rank = 0;
    while !current_front.is_empty() {
        let mut next_front = Vec::new();
        for &idx in &current_front {
            for &worse in &dominates[idx] {
                dominated_by_count[worse] -= 1;
                if dominated_by_count[worse] == 0 {
                    next_front.push(worse);
                }
            }
        }
        next_front.sort_unstable();
        sorted.extend(current_front.drain(..).map(|idx| (idx, rank)));
        current_front = next_front;
        rank += 1;
    }

    debug_assert_eq!(sorted.len(), n, "every index must be ranked exactly once");
    sorted
}

/// Per-index ranks recovered from the sorted `(index, rank)` pairs.
pub fn pareto_ranks(sorted: &ParetoFronts) -> Vec<usize> {
    let mut ranks = vec![0usize; sorted.len()];
    for &(idx, rank) in sorted {
        ranks[idx] = rank;
    }
    ranks
}

/// Groups the sorted `(index, rank)` pairs into per-rank index lists.
pub fn fronts(sorted: &ParetoFronts) -> Vec<Vec<usize>> {
    let mut grouped: Vec<Vec<usize>> = Vec::new();
    for &(idx, rank) in sorted {
        if rank == grouped.len() {
            grouped.push(Vec::new());
        }
        grouped[rank].push(idx);
    }
    grouped
}

/// Indices of the rank-0 candidates only, in ascending order. Cheaper than a
/// full sort when callers (e.g. the archive) need just the Pareto front.
pub fn non_dominated_indices(fitness: &Array2<f64>) -> Vec<usize> {
    let n = fitness.nrows();
    (0..n)
        .filter(|&i| {
            (0..n).all(|j| j == i || pareto_compare(fitness.row(i), fitness.row(j)) != -1)
        })
        .collect()
}
