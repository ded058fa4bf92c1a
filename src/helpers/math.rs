//! Small numeric helpers shared by the selection operators and the Pareto
//! primitives: domination comparison, deterministic argsort, weight-to-CDF
//! normalization and the distance/scalarization functions used by NSGA-III.
use ndarray::ArrayView1;
use ordered_float::OrderedFloat;

/// Strict-Pareto comparison of two fitness vectors, both maximized.
///
/// Returns `-1` if `a` is dominated by `b`, `+1` if `b` is dominated by `a`,
/// and `0` when neither dominates.
pub fn pareto_compare(a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>) -> i32 {
    debug_assert_eq!(a.len(), b.len());
    let mut a_better = false;
    let mut b_better = false;
    for (&x, &y) in a.iter().zip(b.iter()) {
        if x < y {
            b_better = true;
        } else if x > y {
            a_better = true;
        }
    }
    match (a_better, b_better) {
        (true, false) => 1,
        (false, true) => -1,
        _ => 0,
    }
}

/// Indices that sort `xs` ascending; ties are broken by index so the result
/// is deterministic.
pub fn argsort(xs: &[f64]) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..xs.len()).collect();
    indices.sort_by_key(|&i| (OrderedFloat(xs[i]), i));
    indices
}

pub fn mean(xs: &[f64]) -> f64 {
    debug_assert!(!xs.is_empty());
    xs.iter().sum::<f64>() / xs.len() as f64
}

pub fn std_dev(xs: &[f64], mean: f64) -> f64 {
    debug_assert!(!xs.is_empty());
    let variance = xs.iter().map(|&x| (x - mean) * (x - mean)).sum::<f64>() / xs.len() as f64;
    variance.sqrt()
}

pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Turns selection weights into a cumulative distribution whose last element
/// is ≈ 1, by dividing each weight by `mean(w) · len(w)` and accumulating.
///
/// The weights must have a positive mean; callers with possibly negative
/// weights add an offset first.
pub fn weights_to_cdf(weights: &[f64]) -> Vec<f64> {
    let wmean = mean(weights);
    debug_assert!(wmean > 0.0, "selection weights must have a positive mean");
    let n = weights.len() as f64;
    let mut cdf = 0.0;
    weights
        .iter()
        .map(|w| {
            cdf += w / wmean / n;
            cdf
        })
        .collect()
}

pub fn euclidean_distance_sq(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    a.iter()
        .zip(b.iter())
        .map(|(&x, &y)| (x - y) * (x - y))
        .sum()
}

/// Squared perpendicular distance from `point` to the line spanned by the
/// reference direction `direction` (not necessarily unit length).
pub fn perpendicular_distance_sq(direction: ArrayView1<'_, f64>, point: ArrayView1<'_, f64>) -> f64 {
    debug_assert_eq!(direction.len(), point.len());
    let dot = direction.dot(&point);
    let norm_sq = direction.dot(&direction);
    let point_sq = point.dot(&point);
    debug_assert!(norm_sq > 0.0, "reference directions must be non-zero");
    (point_sq - dot * dot / norm_sq).max(0.0)
}

/// Achievement scalarizing function: `maxⱼ |fⱼ − zⱼ| / wⱼ`, with zero
/// weights replaced by `1e-6`.
pub fn asf(f: ArrayView1<'_, f64>, z: &[f64], w: &[f64]) -> f64 {
    debug_assert!(!f.is_empty());
    debug_assert_eq!(f.len(), z.len());
    debug_assert_eq!(f.len(), w.len());
    let mut dmax = f64::NEG_INFINITY;
    for j in 0..f.len() {
        let weight = if w[j] == 0.0 { 1e-6 } else { w[j] };
        dmax = dmax.max((f[j] - z[j]).abs() / weight);
    }
    dmax
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use rstest::rstest;

    #[rstest(
        a, b, expected,
        case(vec![1.0, 0.0], vec![0.0, 1.0], 0),
        case(vec![0.5, 0.5], vec![0.0, 0.0], 1),
        case(vec![0.0, 0.0], vec![0.5, 0.5], -1),
        case(vec![1.0, 1.0], vec![1.0, 1.0], 0),
        case(vec![1.0, 2.0], vec![1.0, 3.0], -1)
    )]
    fn test_pareto_compare(a: Vec<f64>, b: Vec<f64>, expected: i32) {
        let a = ndarray::Array1::from_vec(a);
        let b = ndarray::Array1::from_vec(b);
        assert_eq!(pareto_compare(a.view(), b.view()), expected);
        // antisymmetry
        assert_eq!(pareto_compare(b.view(), a.view()), -expected);
    }

    #[test]
    fn test_argsort_breaks_ties_by_index() {
        let xs = [2.0, 1.0, 2.0, 0.5];
        assert_eq!(argsort(&xs), vec![3, 1, 0, 2]);
    }

    #[test]
    fn test_weights_to_cdf_is_nondecreasing_and_normalized() {
        let weights = [1.0, 3.0, 2.0, 4.0];
        let cdf = weights_to_cdf(&weights);
        assert_eq!(cdf.len(), weights.len());
        assert!((cdf[0] - weights[0] / mean(&weights) / 4.0).abs() < 1e-12);
        for pair in cdf.windows(2) {
            assert!(pair[0] <= pair[1]);
        }
        assert!((cdf.last().unwrap() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_mean_and_std_dev() {
        let xs = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let m = mean(&xs);
        assert!((m - 5.0).abs() < 1e-12);
        assert!((std_dev(&xs, m) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_perpendicular_distance_sq() {
        // Point (1, 1) against the x-axis direction: the perpendicular
        // component is the y coordinate.
        let direction = array![1.0, 0.0];
        let point = array![1.0, 1.0];
        assert!((perpendicular_distance_sq(direction.view(), point.view()) - 1.0).abs() < 1e-12);

        // A point on the line has distance zero.
        let diag = array![2.0, 2.0];
        let on_line = array![0.5, 0.5];
        assert!(perpendicular_distance_sq(diag.view(), on_line.view()).abs() < 1e-12);
    }

    #[test]
    fn test_asf_replaces_zero_weights() {
        let f = array![1.0, 2.0];
        let z = [0.0, 0.0];
        let w = [1.0, 0.0];
        // The zero weight becomes 1e-6, so the second term dominates.
        assert!((asf(f.view(), &z, &w) - 2.0e6).abs() < 1.0);
    }

    #[test]
    fn test_euclidean_distance_sq() {
        assert_eq!(euclidean_distance_sq(&[0.0, 0.0], &[3.0, 4.0]), 25.0);
    }
}
