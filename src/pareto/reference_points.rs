//! NSGA-III reference directions.
//!
//! Instead of a structured lattice, the set is built greedily from random
//! simplex points: generate a large candidate pool, then repeatedly move the
//! candidate farthest from the chosen set into the output. The incremental
//! min-distance cache keeps the construction `O(ratio · n²)`.
use ndarray::{Array2, ArrayView1};
use rayon::prelude::*;

use crate::helpers::math::{euclidean_distance_sq, perpendicular_distance_sq};
use crate::random::RandomGenerator;

/// Generates exactly `n` maximally spaced points on the standard
/// `dim`-simplex, one per row.
pub fn generate_reference_points(
    n: usize,
    dim: usize,
    rng: &mut impl RandomGenerator,
) -> Array2<f64> {
    assert!(n > 0, "at least one reference point is required");
    assert!(dim > 1, "reference points need at least two objectives");

    let ratio = 10.max(2 * dim);
    let mut candidates: Vec<Vec<f64>> = (0..ratio * n - 1)
        .map(|_| rng.random_simplex_point(dim))
        .collect();

    let mut refs: Vec<Vec<f64>> = Vec::with_capacity(n);
    refs.push(rng.random_simplex_point(dim));

    let mut min_distances = vec![f64::INFINITY; candidates.len()];
    while refs.len() < n {
        // refresh each candidate's distance to the closest chosen point
        let newest = refs.last().expect("the set starts non-empty");
        for (candidate, dmin) in candidates.iter().zip(min_distances.iter_mut()) {
            *dmin = dmin.min(euclidean_distance_sq(candidate, newest));
        }

        // move the farthest candidate into the output; ties keep the first
        let mut farthest = 0;
        for (i, &d) in min_distances.iter().enumerate() {
            if d > min_distances[farthest] {
                farthest = i;
            }
        }
        refs.push(candidates.swap_remove(farthest));
        min_distances.swap_remove(farthest);
    }

    let mut points = Array2::zeros((n, dim));
    for (i, point) in refs.iter().enumerate() {
        for (j, &value) in point.iter().enumerate() {
            points[[i, j]] = value;
        }
    }
    points
}

/// Assigns each point (row) to the reference direction minimizing the squared
/// perpendicular distance; ties are broken by reference index. Points are
/// processed in parallel and the output preserves row order.
pub fn assign_to_references(points: &Array2<f64>, refs: &Array2<f64>) -> Vec<(usize, f64)> {
    let rows: Vec<ArrayView1<'_, f64>> = points.outer_iter().collect();
    rows.par_iter()
        .map(|point| {
            let mut best = 0;
            let mut best_distance = f64::INFINITY;
            for (r, reference) in refs.outer_iter().enumerate() {
                let distance = perpendicular_distance_sq(reference, *point);
                if distance < best_distance {
                    best = r;
                    best_distance = distance;
                }
            }
            (best, best_distance)
        })
        .collect()
}
