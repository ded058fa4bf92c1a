//! Single-objective end-to-end scenarios, one per encoding.
use std::sync::Arc;

use ndarray::{Array1, ArrayView1, array};

use evors::{
    BinaryEncoding, BitFlipMutation, GaBuilder, IntegerEncoding, KeepBest, OrderCrossover,
    PermutationEncoding, PolynomialMutation, RandomResetMutation, RealEncoding,
    SimulatedBinaryCrossover, SinglePointCrossover, SingleObjective, SwapMutation,
    TournamentSelection, UniformCrossover,
};

fn one_max(genes: ArrayView1<'_, f64>) -> Array1<f64> {
    array![genes.sum()]
}

fn negative_sphere(genes: ArrayView1<'_, f64>) -> Array1<f64> {
    array![-genes.iter().map(|&x| x * x).sum::<f64>()]
}

/// Σ i·π(i), maximized by the identity permutation.
fn weighted_order(genes: ArrayView1<'_, f64>) -> Array1<f64> {
    array![
        genes
            .iter()
            .enumerate()
            .map(|(i, &v)| i as f64 * v)
            .sum::<f64>()
    ]
}

#[test]
fn one_max_reaches_the_optimum() {
    let mut engine = GaBuilder::default()
        .encoding(BinaryEncoding)
        .algorithm(SingleObjective::new(
            TournamentSelection::new(2).unwrap(),
            KeepBest,
        ))
        .crossover(UniformCrossover::<BinaryEncoding>::new(0.9).unwrap())
        .mutation(BitFlipMutation::new(1.0 / 64.0).unwrap())
        .fitness_fn(one_max as fn(ArrayView1<'_, f64>) -> Array1<f64>)
        .chrom_len(64)
        .population_size(100)
        .seed(42)
        .build()
        .expect("failed to build the engine");

    let solutions = engine.run(200).expect("run failed");
    assert_eq!(solutions[0].fitness[0], 64.0);
}

#[test]
fn sphere_converges_close_to_the_origin() {
    let bounds = Arc::new(vec![(-5.0, 5.0); 5]);
    let mut engine = GaBuilder::default()
        .encoding(RealEncoding::new(bounds.as_ref().clone()).unwrap())
        .algorithm(SingleObjective::new(
            TournamentSelection::new(2).unwrap(),
            KeepBest,
        ))
        .crossover(SimulatedBinaryCrossover::new(0.9, 15.0, bounds.clone()).unwrap())
        .mutation(PolynomialMutation::new(0.2, 20.0, bounds.clone()).unwrap())
        .fitness_fn(negative_sphere as fn(ArrayView1<'_, f64>) -> Array1<f64>)
        .chrom_len(5)
        .population_size(50)
        .seed(42)
        .build()
        .expect("failed to build the engine");

    let solutions = engine.run(200).expect("run failed");
    let best = solutions[0].fitness[0];
    assert!(best > -1e-3, "expected best > -1e-3, got {best}");
    for candidate in engine.population() {
        for &gene in candidate.genes.iter() {
            assert!((-5.0..=5.0).contains(&gene));
        }
    }
}

#[test]
fn integer_chromosomes_fill_with_the_largest_digit() {
    let mut engine = GaBuilder::default()
        .encoding(IntegerEncoding::new(5).unwrap())
        .algorithm(SingleObjective::new(
            TournamentSelection::new(2).unwrap(),
            KeepBest,
        ))
        .crossover(SinglePointCrossover::<IntegerEncoding>::new(0.9).unwrap())
        .mutation(RandomResetMutation::new(1.0 / 16.0, 5).unwrap())
        .fitness_fn(one_max as fn(ArrayView1<'_, f64>) -> Array1<f64>)
        .chrom_len(16)
        .population_size(80)
        .seed(42)
        .build()
        .expect("failed to build the engine");

    let solutions = engine.run(200).expect("run failed");
    assert_eq!(solutions[0].fitness[0], 64.0, "16 genes × digit 4");
    for candidate in engine.population() {
        for &gene in candidate.genes.iter() {
            assert!(gene >= 0.0 && gene < 5.0 && gene.fract() == 0.0);
        }
    }
}

#[test]
fn permutations_sort_themselves() {
    let mut engine = GaBuilder::default()
        .encoding(PermutationEncoding)
        .algorithm(SingleObjective::new(
            TournamentSelection::new(2).unwrap(),
            KeepBest,
        ))
        .crossover(OrderCrossover::new(0.9).unwrap())
        .mutation(SwapMutation::<PermutationEncoding>::new(0.3).unwrap())
        .fitness_fn(weighted_order as fn(ArrayView1<'_, f64>) -> Array1<f64>)
        .chrom_len(8)
        .population_size(100)
        .seed(42)
        .build()
        .expect("failed to build the engine");

    // Σ i² = 140 for the identity permutation of length 8
    let solutions = engine.run(300).expect("run failed");
    assert!(
        solutions[0].fitness[0] >= 139.0,
        "expected near-identity ordering, got {}",
        solutions[0].fitness[0]
    );

    // every candidate stayed a permutation
    for candidate in engine.population() {
        let mut seen = vec![false; 8];
        for &gene in candidate.genes.iter() {
            seen[gene as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }
}

#[test]
fn identical_seeds_reproduce_identical_archives() {
    let run = || {
        let mut engine = GaBuilder::default()
            .encoding(BinaryEncoding)
            .algorithm(SingleObjective::new(
                TournamentSelection::new(3).unwrap(),
                KeepBest,
            ))
            .crossover(UniformCrossover::<BinaryEncoding>::new(0.8).unwrap())
            .mutation(BitFlipMutation::new(0.02).unwrap())
            .fitness_fn(one_max as fn(ArrayView1<'_, f64>) -> Array1<f64>)
            .chrom_len(32)
            .population_size(40)
            .seed(7)
            .build()
            .expect("failed to build the engine");
        engine.run(50).expect("run failed");
        engine.archive().to_vec()
    };

    assert_eq!(run(), run());
}
