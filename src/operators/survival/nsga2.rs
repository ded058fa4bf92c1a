use ndarray::Array2;
use ordered_float::OrderedFloat;

use crate::algorithms::AlgorithmContext;
use crate::operators::survival::SurvivorStrategy;
use crate::pareto::{crowding_distances, fronts, non_dominated_sort};

/// NSGA-II environmental selection: fill whole non-dominated fronts until the
/// next one would overflow the population, then split that front by crowding
/// distance descending, ties by index.
#[derive(Debug, Clone, Default)]
pub struct Nsga2Survival;

impl SurvivorStrategy for Nsga2Survival {
    fn survive(
        &mut self,
        ctx: &AlgorithmContext,
        fitness: &Array2<f64>,
        _num_parents: usize,
    ) -> Vec<usize> {
        let sorted = non_dominated_sort(fitness);
        let grouped = fronts(&sorted);

        let mut survivors: Vec<usize> = Vec::with_capacity(ctx.population_size);
        for front in grouped {
            if survivors.len() + front.len() <= ctx.population_size {
                survivors.extend(front);
                if survivors.len() == ctx.population_size {
                    break;
                }
            } else {
                let remaining = ctx.population_size - survivors.len();
                let distances = crowding_distances(fitness, std::slice::from_ref(&front));
                let mut order = front;
                order.sort_by_key(|&i| (OrderedFloat(-distances[i]), i));
                survivors.extend(order.into_iter().take(remaining));
                break;
            }
        }
        survivors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn ctx(population_size: usize) -> AlgorithmContext {
        AlgorithmContext {
            chrom_len: 1,
            population_size,
            num_objectives: 2,
            generation: 0,
            max_generations: 1,
        }
    }

    #[test]
    fn test_whole_fronts_fill_first() {
        // rank 0: {0, 1}; rank 1: {2}; rank 2: {3}
        let fitness = array![[1.0, 0.0], [0.0, 1.0], [0.4, 0.4], [0.1, 0.1]];
        let survivors = Nsga2Survival.survive(&ctx(3), &fitness, 2);
        assert_eq!(survivors, vec![0, 1, 2]);
    }

    #[test]
    fn test_overflow_front_split_by_crowding() {
        // One big rank-0 front of five points on a line with uneven spacing;
        // N = 4 drops the most crowded interior point.
        let fitness = array![
            [0.0, 4.0],
            [1.0, 3.0],
            [1.5, 2.5],
            [2.0, 2.0],
            [4.0, 0.0]
        ];
        let survivors = Nsga2Survival.survive(&ctx(4), &fitness, 5);
        assert_eq!(survivors.len(), 4);
        // extremes always survive the split
        assert!(survivors.contains(&0));
        assert!(survivors.contains(&4));
        assert!(!survivors.contains(&2), "the most crowded point is dropped");
    }

    #[test]
    fn test_crowding_ties_break_by_index() {
        // Four duplicated points: all crowding values are equal (extremes
        // infinite, interiors zero), so the split keeps the lower indices
        // within each crowding class.
        let fitness = array![[1.0, 1.0], [1.0, 1.0], [1.0, 1.0], [1.0, 1.0]];
        let survivors = Nsga2Survival.survive(&ctx(2), &fitness, 4);
        assert_eq!(survivors, vec![0, 3]);
    }

    #[test]
    fn test_exact_fit_returns_all() {
        let fitness = array![[1.0, 0.0], [0.0, 1.0]];
        let survivors = Nsga2Survival.survive(&ctx(2), &fitness, 1);
        assert_eq!(survivors, vec![0, 1]);
    }
}
