//! # `pareto` – Multi-Objective Primitives
//!
//! The machinery NSGA-II and NSGA-III style survival is built from: fast
//! non-dominated sorting, crowding distances, reference-point generation on
//! the objective simplex and perpendicular-distance assignment.

pub mod crowding;
pub mod non_dominated_sort;
pub mod reference_points;

pub use crowding::crowding_distances;
pub use non_dominated_sort::{
    fronts, non_dominated_indices, non_dominated_sort, pareto_ranks,
};
pub use reference_points::{assign_to_references, generate_reference_points};

/// `(candidate index, rank)` pairs grouped by rank in ascending order, as
/// produced by [`non_dominated_sort`].
pub type ParetoFronts = Vec<(usize, usize)>;
