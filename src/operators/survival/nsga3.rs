//! NSGA-III environmental selection (Deb & Jain, 2014), adapted to maximized
//! fitness: whole non-dominated fronts are filled as in NSGA-II, and the
//! overflowing front is split by reference-point niching instead of crowding
//! distance.
//!
//! Niching works on objectives normalized against the running ideal point:
//! values are translated so the ideal sits at the origin (`t = z* − f`, all
//! components ≥ 0), intercepts are derived from the per-axis ASF extreme
//! points, and each candidate is associated with the reference direction of
//! minimum perpendicular distance.
use ndarray::{Array1, Array2};

use crate::algorithms::AlgorithmContext;
use crate::helpers::math::asf;
use crate::operators::survival::SurvivorStrategy;
use crate::pareto::{assign_to_references, fronts, non_dominated_sort};

/// `(reference index, squared perpendicular distance)` per candidate.
pub(crate) type Associations = Vec<(usize, f64)>;

#[derive(Debug, Clone)]
pub struct Nsga3Survival {
    reference_points: Array2<f64>,
    ideal: Option<Array1<f64>>,
}

impl Nsga3Survival {
    /// Creates the survival operator around a fixed set of reference
    /// directions (one per row, on the objective simplex).
    pub fn new(reference_points: Array2<f64>) -> Self {
        Self {
            reference_points,
            ideal: None,
        }
    }

    pub fn reference_points(&self) -> &Array2<f64> {
        &self.reference_points
    }

    /// Number of reference directions.
    pub fn num_references(&self) -> usize {
        self.reference_points.nrows()
    }

    /// Folds the per-objective maxima of `fitness` into the running ideal
    /// point.
    fn update_ideal(&mut self, fitness: &Array2<f64>) {
        let m = fitness.ncols();
        let mut ideal = self
            .ideal
            .take()
            .unwrap_or_else(|| Array1::from_elem(m, f64::NEG_INFINITY));
        for row in fitness.outer_iter() {
            for (slot, &value) in ideal.iter_mut().zip(row.iter()) {
                *slot = slot.max(value);
            }
        }
        self.ideal = Some(ideal);
    }

    /// Normalizes the whole matrix against the running ideal point and the
    /// ASF-derived intercepts, then associates every row with its closest
    /// reference direction.
    pub(crate) fn associate(&mut self, fitness: &Array2<f64>) -> Associations {
        self.update_ideal(fitness);
        let ideal = self.ideal.as_ref().expect("the ideal point was just set");

        // translate into minimization form with the ideal at the origin
        let m = fitness.ncols();
        let mut translated = Array2::zeros(fitness.raw_dim());
        for (mut out, row) in translated.outer_iter_mut().zip(fitness.outer_iter()) {
            for j in 0..m {
                out[j] = ideal[j] - row[j];
            }
        }

        let intercepts = self.intercepts(&translated);
        let mut normalized = translated;
        for mut row in normalized.outer_iter_mut() {
            for j in 0..m {
                row[j] /= intercepts[j];
            }
        }

        assign_to_references(&normalized, &self.reference_points)
    }

    /// Intercepts of the hyperplane through the per-axis ASF extreme points.
    /// Falls back to the translated nadir when the system is degenerate.
    fn intercepts(&self, translated: &Array2<f64>) -> Vec<f64> {
        let m = translated.ncols();
        let zero = vec![0.0; m];

        let mut extremes = Array2::zeros((m, m));
        for axis in 0..m {
            let mut weights = vec![0.0; m];
            weights[axis] = 1.0;

            let mut best = 0;
            let mut best_value = f64::INFINITY;
            for (i, row) in translated.outer_iter().enumerate() {
                let value = asf(row, &zero, &weights);
                if value < best_value {
                    best = i;
                    best_value = value;
                }
            }
            extremes.row_mut(axis).assign(&translated.row(best));
        }

        if let Some(intercepts) = plane_intercepts(&extremes) {
            return intercepts;
        }

        // nadir fallback
        (0..m)
            .map(|j| {
                let worst = translated.column(j).iter().copied().fold(0.0_f64, f64::max);
                worst.max(1e-6)
            })
            .collect()
    }
}

/// Solves for the intercepts `a` of the plane `Σⱼ xⱼ/aⱼ = 1` through the `m`
/// extreme points (rows of `extremes`). Returns `None` when the system is
/// singular or produces non-positive intercepts.
fn plane_intercepts(extremes: &Array2<f64>) -> Option<Vec<f64>> {
    let m = extremes.nrows();
    let mut matrix = extremes.clone();
    let mut rhs = vec![1.0; m];

    // Gaussian elimination with partial pivoting
    for col in 0..m {
        let mut pivot = col;
        for row in (col + 1)..m {
            if matrix[[row, col]].abs() > matrix[[pivot, col]].abs() {
                pivot = row;
            }
        }
        if matrix[[pivot, col]].abs() < 1e-12 {
            return None;
        }
        if pivot != col {
            for j in 0..m {
                let tmp = matrix[[col, j]];
                matrix[[col, j]] = matrix[[pivot, j]];
                matrix[[pivot, j]] = tmp;
            }
            rhs.swap(col, pivot);
        }
        for row in (col + 1)..m {
            let factor = matrix[[row, col]] / matrix[[col, col]];
            for j in col..m {
                matrix[[row, j]] -= factor * matrix[[col, j]];
            }
            rhs[row] -= factor * rhs[col];
        }
    }

    let mut solution = vec![0.0; m];
    for row in (0..m).rev() {
        let mut value = rhs[row];
        for j in (row + 1)..m {
            value -= matrix[[row, j]] * solution[j];
        }
        solution[row] = value / matrix[[row, row]];
    }

    // the plane coefficients are 1/aⱼ
    let intercepts: Vec<f64> = solution.iter().map(|&b| 1.0 / b).collect();
    if intercepts.iter().all(|&a| a.is_finite() && a > 1e-12) {
        Some(intercepts)
    } else {
        None
    }
}

impl SurvivorStrategy for Nsga3Survival {
    fn survive(
        &mut self,
        ctx: &AlgorithmContext,
        fitness: &Array2<f64>,
        _num_parents: usize,
    ) -> Vec<usize> {
        let sorted = non_dominated_sort(fitness);
        let grouped = fronts(&sorted);

        let mut survivors: Vec<usize> = Vec::with_capacity(ctx.population_size);
        let mut splitting_front: Option<Vec<usize>> = None;
        for front in grouped {
            if survivors.len() + front.len() <= ctx.population_size {
                survivors.extend(front);
                if survivors.len() == ctx.population_size {
                    return survivors;
                }
            } else {
                splitting_front = Some(front);
                break;
            }
        }
        let Some(front) = splitting_front else {
            return survivors;
        };

        let associations = self.associate(fitness);

        // niche counts over the already confirmed survivors
        let mut niche_counts = vec![0usize; self.num_references()];
        for &idx in &survivors {
            niche_counts[associations[idx].0] += 1;
        }

        // members of the splitting front, grouped per reference direction and
        // ordered by (distance, index) so the closest candidate leaves first
        let mut members: Vec<Vec<(f64, usize)>> = vec![Vec::new(); self.num_references()];
        for &idx in &front {
            let (reference, distance) = associations[idx];
            members[reference].push((distance, idx));
        }
        for slot in members.iter_mut() {
            slot.sort_by(|a, b| {
                a.0.partial_cmp(&b.0)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then(a.1.cmp(&b.1))
            });
        }

        // one niche at a time: the least occupied reference direction that
        // still has members donates its closest candidate
        let remaining = ctx.population_size - survivors.len();
        for _ in 0..remaining {
            let reference = (0..self.num_references())
                .filter(|&r| !members[r].is_empty())
                .min_by_key(|&r| (niche_counts[r], r))
                .expect("the splitting front always covers the remaining slots");
            let (_, idx) = members[reference].remove(0);
            survivors.push(idx);
            niche_counts[reference] += 1;
        }

        survivors
    }
}
