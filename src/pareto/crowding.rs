//! NSGA-II crowding distance.
//!
//! Distances are computed per front and per objective: the boundary members
//! of a front receive `+∞`, interior members accumulate the normalized gap
//! between their neighbors. Identical fitness values at a boundary still
//! yield `+∞`, which intentionally preserves boundary diversity.
use ndarray::Array2;
use ordered_float::OrderedFloat;
use rayon::prelude::*;

/// Crowding distance for every index covered by `fronts`.
///
/// The returned vector is indexed like the rows of `fitness`; entries not
/// covered by any front stay `0.0`. Fronts are processed in parallel, each
/// one independently, and merged deterministically.
pub fn crowding_distances(fitness: &Array2<f64>, fronts: &[Vec<usize>]) -> Vec<f64> {
    let per_front: Vec<Vec<(usize, f64)>> = fronts
        .par_iter()
        .map(|front| front_distances(fitness, front))
        .collect();

    let mut distances = vec![0.0; fitness.nrows()];
    for entries in per_front {
        for (idx, distance) in entries {
            distances[idx] = distance;
        }
    }
    distances
}

fn front_distances(fitness: &Array2<f64>, front: &[usize]) -> Vec<(usize, f64)> {
    let len = front.len();
    let mut local = vec![0.0_f64; len];

    for d in 0..fitness.ncols() {
        // positions into `front`, sorted by the objective value; ties by index
        let mut order: Vec<usize> = (0..len).collect();
        order.sort_by_key(|&p| (OrderedFloat(fitness[[front[p], d]]), front[p]));

        let first = order[0];
        let last = order[len - 1];
        let range = (fitness[[front[last], d]] - fitness[[front[first], d]]).max(1e-6);

        local[first] = f64::INFINITY;
        local[last] = f64::INFINITY;
        for w in order.windows(3) {
            let (prev, this, next) = (w[0], w[1], w[2]);
            local[this] += (fitness[[front[next], d]] - fitness[[front[prev], d]]) / range;
        }
    }

    front.iter().copied().zip(local).collect()
}
