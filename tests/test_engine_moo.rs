//! Multi-objective end-to-end scenarios on a ZDT1 surrogate.
use std::sync::Arc;

use ndarray::{Array1, ArrayView1, array};

use evors::{
    Candidate, GaBuilder, Nsga2, Nsga3, PolynomialMutation, RealEncoding,
    SimulatedBinaryCrossover,
};

/// ZDT1 with both objectives negated, since the engine maximizes.
fn zdt1(genes: ArrayView1<'_, f64>) -> Array1<f64> {
    let f1 = genes[0];
    let tail_mean = genes.iter().skip(1).sum::<f64>() / (genes.len() - 1) as f64;
    let g = 1.0 + 9.0 * tail_mean;
    let f2 = g * (1.0 - (f1 / g).sqrt());
    array![-f1, -f2]
}

/// 2-D hypervolume of a minimized front against a reference point.
fn hypervolume(archive: &[Candidate], reference: (f64, f64)) -> f64 {
    // back to minimization space
    let mut points: Vec<(f64, f64)> = archive
        .iter()
        .map(|c| (-c.fitness[0], -c.fitness[1]))
        .filter(|&(f1, f2)| f1 < reference.0 && f2 < reference.1)
        .collect();
    points.sort_by(|a, b| a.partial_cmp(b).unwrap());

    // sweep left to right, keeping the staircase of best f2 values; each
    // point dominates a vertical slab up to the next kept point
    let mut best_f2 = f64::INFINITY;
    let staircase: Vec<(f64, f64)> = points
        .into_iter()
        .filter(|&(_, f2)| {
            if f2 < best_f2 {
                best_f2 = f2;
                true
            } else {
                false
            }
        })
        .collect();

    let mut volume = 0.0;
    for (i, &(f1, f2)) in staircase.iter().enumerate() {
        let next_f1 = staircase
            .get(i + 1)
            .map_or(reference.0, |&(next_f1, _)| next_f1);
        volume += (next_f1 - f1) * (reference.1 - f2);
    }
    volume
}

fn zdt1_engine_nsga2(seed: u64) -> Vec<Candidate> {
    let bounds = Arc::new(vec![(0.0, 1.0); 30]);
    let mut engine = GaBuilder::default()
        .encoding(RealEncoding::new(bounds.as_ref().clone()).unwrap())
        .algorithm(Nsga2::new())
        .crossover(SimulatedBinaryCrossover::new(0.9, 15.0, bounds.clone()).unwrap())
        .mutation(PolynomialMutation::new(1.0 / 30.0, 20.0, bounds.clone()).unwrap())
        .fitness_fn(zdt1 as fn(ArrayView1<'_, f64>) -> Array1<f64>)
        .chrom_len(30)
        .population_size(100)
        .seed(seed)
        .build()
        .expect("failed to build the engine");
    engine.run(250).expect("run failed");
    engine.archive().to_vec()
}

#[test]
fn nsga2_covers_the_zdt1_front() {
    let archive = zdt1_engine_nsga2(42);

    assert!(
        (50..=100).contains(&archive.len()),
        "archive size {} outside [50, 100]",
        archive.len()
    );

    // the archive is mutually non-dominated
    for a in &archive {
        for b in &archive {
            let dominates = a
                .fitness
                .iter()
                .zip(b.fitness.iter())
                .all(|(x, y)| x >= y)
                && a.fitness != b.fitness;
            assert!(!dominates, "archive contains a dominated candidate");
        }
    }

    let volume = hypervolume(&archive, (1.1, 1.1));
    assert!(volume >= 0.6, "hypervolume {volume} below 0.6");
}

#[test]
fn nsga2_is_deterministic_under_a_fixed_seed() {
    assert_eq!(zdt1_engine_nsga2(7), zdt1_engine_nsga2(7));
}

#[test]
fn nsga3_finds_a_spread_front() {
    let bounds = Arc::new(vec![(0.0, 1.0); 30]);
    let mut engine = GaBuilder::default()
        .encoding(RealEncoding::new(bounds.as_ref().clone()).unwrap())
        .algorithm(Nsga3::new())
        .crossover(SimulatedBinaryCrossover::new(0.9, 15.0, bounds.clone()).unwrap())
        .mutation(PolynomialMutation::new(1.0 / 30.0, 20.0, bounds.clone()).unwrap())
        .fitness_fn(zdt1 as fn(ArrayView1<'_, f64>) -> Array1<f64>)
        .chrom_len(30)
        .population_size(100)
        .seed(42)
        .build()
        .expect("failed to build the engine");
    let archive = engine.run(250).expect("run failed").to_vec();

    assert!(!archive.is_empty());
    assert!(archive.len() <= 100);
    for candidate in &archive {
        assert_eq!(candidate.fitness.len(), 2);
        assert!(candidate.fitness.iter().all(|f| f.is_finite()));
        // both objectives are negated minimization objectives
        assert!(candidate.fitness[0] <= 0.0 && candidate.fitness[0] >= -1.0);
    }

    // a reasonably converged, spread front still clears a loose bar
    let volume = hypervolume(&archive, (1.1, 1.1));
    assert!(volume >= 0.5, "hypervolume {volume} below 0.5");
}

#[test]
fn per_generation_archiving_accumulates_optima() {
    let bounds = Arc::new(vec![(0.0, 1.0); 10]);
    let mut engine = GaBuilder::default()
        .encoding(RealEncoding::new(bounds.as_ref().clone()).unwrap())
        .algorithm(Nsga2::new())
        .crossover(SimulatedBinaryCrossover::new(0.9, 15.0, bounds.clone()).unwrap())
        .mutation(PolynomialMutation::new(0.1, 20.0, bounds.clone()).unwrap())
        .fitness_fn(zdt1 as fn(ArrayView1<'_, f64>) -> Array1<f64>)
        .chrom_len(10)
        .population_size(40)
        .archive_enabled(true)
        .seed(3)
        .build()
        .expect("failed to build the engine");
    let archive = engine.run(50).expect("run failed");

    assert!(!archive.is_empty());
    // mutually non-dominated even when merged across generations
    for a in archive {
        for b in archive {
            let dominates = a
                .fitness
                .iter()
                .zip(b.fitness.iter())
                .all(|(x, y)| x >= y)
                && a.fitness != b.fitness;
            assert!(!dominates);
        }
    }
    // duplicate chromosomes are removed
    for (i, a) in archive.iter().enumerate() {
        for b in archive.iter().skip(i + 1) {
            assert_ne!(a.genes, b.genes);
        }
    }
}
