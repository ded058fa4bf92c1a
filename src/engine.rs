//! # `engine` – The Generation Loop
//!
//! [`GeneticAlgorithm`] owns the population, the archive of optimal
//! solutions, the generation and evaluation counters, and the injected
//! collaborators (fitness function, optional repair, optional stop condition
//! and end-of-generation callback). It is configured through [`GaBuilder`],
//! which validates every parameter eagerly.
//!
//! Each generation runs the same pipeline: build the fitness matrix →
//! `algorithm.prepare` → archive update → draw `⌈N/2⌉` parent pairs →
//! crossover → mutation → repair → evaluate the changed children → survivor
//! selection over parents ∪ children → callback. The strictly data-parallel
//! phases (pair construction, crossover, mutation, repair, evaluation) run
//! under `rayon` when the [`ParallelPolicy`] allows it; every parallel task
//! draws from its own deterministic RNG sub-stream, so a run is a pure
//! function of its seed under either policy.
use std::sync::atomic::{AtomicUsize, Ordering};

use derive_builder::Builder;
use ndarray::{Array1, Array2, ArrayView1, s};
use ordered_float::OrderedFloat;
use rand::Rng;
use rayon::prelude::*;

use crate::algorithms::{Algorithm, AlgorithmContext};
use crate::encoding::Encoding;
use crate::error::{EngineError, EvaluationError, OperatorError, ParameterError};
use crate::genetic::{Candidate, fitness_matrix};
use crate::helpers::printer::print_best_objectives;
use crate::helpers::validators::validate_positive;
use crate::operators::{CrossoverOperator, MutationOperator};
use crate::pareto::non_dominated_indices;
use crate::random::EvoRandomGenerator;
use crate::stop::StopCondition;

/// Whether the data-parallel phases of a generation actually run on the
/// rayon pool. Results are identical under both policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParallelPolicy {
    Sequential,
    #[default]
    DataParallel,
}

/// Maps a chromosome to its fitness vector. The function must be pure and
/// return the same number of finite objectives on every call.
pub trait FitnessFn: Send + Sync {
    fn call(&self, genes: ArrayView1<'_, f64>) -> Array1<f64>;
}

impl<F> FitnessFn for F
where
    F: Fn(ArrayView1<'_, f64>) -> Array1<f64> + Send + Sync,
{
    fn call(&self, genes: ArrayView1<'_, f64>) -> Array1<f64> {
        self(genes)
    }
}

/// Optional chromosome repair, applied to each child after mutation. Must
/// return a chromosome of the configured length.
pub type RepairFn = Box<dyn Fn(ArrayView1<'_, f64>) -> Array1<f64> + Send + Sync>;

/// Optional end-of-generation callback.
pub type GenerationCallback = Box<dyn FnMut(&EngineView<'_>)>;

/// Read-only snapshot of the engine state handed to stop conditions and the
/// end-of-generation callback.
pub struct EngineView<'a> {
    pub generation: usize,
    pub max_generations: usize,
    pub evaluations: usize,
    pub population: &'a [Candidate],
    pub archive: &'a [Candidate],
}

impl EngineView<'_> {
    /// The best first-objective fitness in the current population.
    pub fn best_fitness(&self) -> Option<f64> {
        self.population
            .iter()
            .filter(|c| c.evaluated)
            .map(|c| c.fitness[0])
            .max_by_key(|&f| OrderedFloat(f))
    }
}

// phase tags feeding the per-task RNG sub-streams
mod phase {
    pub const SELECTION: u64 = 1;
    pub const CROSSOVER: u64 = 2;
    pub const MUTATION: u64 = 3;
}

#[derive(Builder)]
#[builder(
    pattern = "owned",
    name = "GaBuilder",
    build_fn(name = "build_params", validate = "Self::validate")
)]
pub struct GaParams<E, A, Cross, Mut, F>
where
    E: Encoding,
    A: Algorithm,
    Cross: CrossoverOperator<Enc = E>,
    Mut: MutationOperator<Enc = E>,
    F: FitnessFn,
{
    encoding: E,
    algorithm: A,
    crossover: Cross,
    mutation: Mut,
    fitness_fn: F,
    chrom_len: usize,
    population_size: usize,
    #[builder(default)]
    parallel: ParallelPolicy,
    #[builder(setter(strip_option), default = "None")]
    seed: Option<u64>,
    #[builder(default = "false")]
    archive_enabled: bool,
    #[builder(default = "false")]
    dynamic_fitness: bool,
    #[builder(default = "false")]
    verbose: bool,
    #[builder(default = "Vec::new()")]
    initial_population: Vec<Array1<f64>>,
    #[builder(setter(strip_option), default = "None")]
    repair_fn: Option<RepairFn>,
    #[builder(setter(strip_option), default = "None")]
    stop_condition: Option<Box<dyn StopCondition>>,
    #[builder(setter(strip_option), default = "None")]
    end_of_generation: Option<GenerationCallback>,
}

impl<E, A, Cross, Mut, F> GaBuilder<E, A, Cross, Mut, F>
where
    E: Encoding,
    A: Algorithm,
    Cross: CrossoverOperator<Enc = E>,
    Mut: MutationOperator<Enc = E>,
    F: FitnessFn,
{
    fn validate(&self) -> Result<(), GaBuilderError> {
        let invalid = |e: ParameterError| GaBuilderError::ValidationError(e.to_string());

        if let Some(chrom_len) = self.chrom_len {
            validate_positive(chrom_len, "Chromosome length").map_err(invalid)?;
            if let Some(encoding) = &self.encoding {
                encoding.validate(chrom_len).map_err(invalid)?;
            }
            if let Some(preset) = &self.initial_population {
                for genes in preset {
                    if genes.len() != chrom_len {
                        return Err(invalid(ParameterError::Invalid(format!(
                            "preset chromosomes must have length {chrom_len}, got {}",
                            genes.len()
                        ))));
                    }
                }
            }
        }
        if let Some(population_size) = self.population_size {
            validate_positive(population_size, "Population size").map_err(invalid)?;
        }
        Ok(())
    }

    pub fn build(self) -> Result<GeneticAlgorithm<E, A, Cross, Mut, F>, GaBuilderError> {
        let params = self.build_params()?;
        let seed = params.seed.unwrap_or_else(|| rand::rng().random());
        Ok(GeneticAlgorithm {
            encoding: params.encoding,
            algorithm: params.algorithm,
            crossover: params.crossover,
            mutation: params.mutation,
            fitness_fn: params.fitness_fn,
            repair_fn: params.repair_fn,
            stop_condition: params.stop_condition,
            end_of_generation: params.end_of_generation,
            chrom_len: params.chrom_len,
            population_size: params.population_size,
            parallel: params.parallel,
            archive_enabled: params.archive_enabled,
            dynamic_fitness: params.dynamic_fitness,
            verbose: params.verbose,
            initial_population: params.initial_population,
            seed,
            rng: EvoRandomGenerator::new_from_seed(Some(seed)),
            population: Vec::new(),
            archive: Vec::new(),
            generation: 0,
            max_generations: 1,
            evaluations: AtomicUsize::new(0),
            num_objectives: None,
            can_continue: false,
        })
    }
}

pub struct GeneticAlgorithm<E, A, Cross, Mut, F>
where
    E: Encoding,
    A: Algorithm,
    Cross: CrossoverOperator<Enc = E>,
    Mut: MutationOperator<Enc = E>,
    F: FitnessFn,
{
    encoding: E,
    algorithm: A,
    crossover: Cross,
    mutation: Mut,
    fitness_fn: F,
    repair_fn: Option<RepairFn>,
    stop_condition: Option<Box<dyn StopCondition>>,
    end_of_generation: Option<GenerationCallback>,
    chrom_len: usize,
    population_size: usize,
    parallel: ParallelPolicy,
    archive_enabled: bool,
    dynamic_fitness: bool,
    verbose: bool,
    initial_population: Vec<Array1<f64>>,
    seed: u64,
    rng: EvoRandomGenerator,
    population: Vec<Candidate>,
    archive: Vec<Candidate>,
    generation: usize,
    max_generations: usize,
    evaluations: AtomicUsize,
    num_objectives: Option<usize>,
    can_continue: bool,
}

impl<E, A, Cross, Mut, F> GeneticAlgorithm<E, A, Cross, Mut, F>
where
    E: Encoding,
    A: Algorithm,
    Cross: CrossoverOperator<Enc = E>,
    Mut: MutationOperator<Enc = E>,
    F: FitnessFn,
{
    pub fn population(&self) -> &[Candidate] {
        &self.population
    }

    /// The archive of optimal solutions found so far: a deduplicated
    /// non-dominated set (the argmax set for single-objective runs).
    pub fn archive(&self) -> &[Candidate] {
        &self.archive
    }

    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn evaluations(&self) -> usize {
        self.evaluations.load(Ordering::Relaxed)
    }

    /// The seed this run is reproducible from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Replaces the driver. The engine must be re-run from scratch
    /// afterwards; `continue_for` falls back to `run`.
    pub fn set_algorithm(&mut self, algorithm: A) {
        self.algorithm = algorithm;
        self.can_continue = false;
    }

    /// Runs the algorithm for `num_generations` generations and returns the
    /// archive of optimal solutions.
    pub fn run(&mut self, num_generations: usize) -> Result<&[Candidate], EngineError> {
        validate_positive(num_generations, "Number of generations")?;
        self.max_generations = num_generations;
        self.initialize()?;
        while !self.should_stop() {
            self.advance()?;
            if self.verbose {
                print_best_objectives(&self.population, self.generation);
            }
        }
        self.update_archive();
        self.can_continue = true;
        Ok(&self.archive)
    }

    /// Resumes the loop for `num_generations` more generations without
    /// reinitializing. On an engine without resumable state this first
    /// delegates to [`run`](Self::run) and then continues for the additional
    /// generations, matching the established engine behavior.
    pub fn continue_for(&mut self, num_generations: usize) -> Result<&[Candidate], EngineError> {
        validate_positive(num_generations, "Number of generations")?;
        if !self.can_continue {
            self.run(num_generations)?;
        }
        self.max_generations += num_generations;
        while !self.should_stop() {
            self.advance()?;
            if self.verbose {
                print_best_objectives(&self.population, self.generation);
            }
        }
        self.update_archive();
        self.can_continue = true;
        Ok(&self.archive)
    }

    fn context(&self) -> AlgorithmContext {
        AlgorithmContext {
            chrom_len: self.chrom_len,
            population_size: self.population_size,
            num_objectives: self.num_objectives.unwrap_or(0),
            generation: self.generation,
            max_generations: self.max_generations,
        }
    }

    fn initialize(&mut self) -> Result<(), EngineError> {
        for genes in &self.initial_population {
            if genes.len() != self.chrom_len {
                return Err(ParameterError::Invalid(format!(
                    "preset chromosomes must have length {}, got {}",
                    self.chrom_len,
                    genes.len()
                ))
                .into());
            }
        }

        self.can_continue = false;
        self.generation = 0;
        self.evaluations.store(0, Ordering::Relaxed);
        self.archive.clear();
        self.num_objectives = None;

        let mut population: Vec<Candidate> = self
            .initial_population
            .iter()
            .take(self.population_size)
            .cloned()
            .map(Candidate::from_genes)
            .collect();
        while population.len() < self.population_size {
            let genes = self.encoding.sample(self.chrom_len, &mut self.rng);
            population.push(Candidate::from_genes(genes));
        }

        self.evaluate(&mut population)?;
        self.population = population;
        Ok(())
    }

    /// One generation: selection → crossover → mutation → repair →
    /// evaluation → survivor selection.
    fn advance(&mut self) -> Result<(), EngineError> {
        let ctx = self.context();
        let fitness = fitness_matrix(&self.population);

        self.algorithm.prepare(&ctx, &fitness, &mut self.rng);
        if self.archive_enabled {
            self.update_archive();
        }

        let num_children = self.population_size + self.population_size % 2;
        let num_pairs = num_children / 2;
        let seed = self.seed;
        let generation = self.generation;

        // parent pairs; each task draws both parents from its own sub-stream
        let algorithm = &self.algorithm;
        let population = &self.population;
        let pairs: Vec<(Candidate, Candidate)> = map_indexed(self.parallel, num_pairs, |i| {
            let mut rng = EvoRandomGenerator::stream(seed, generation, phase::SELECTION, i);
            let first = algorithm.select(&ctx, &fitness, &mut rng);
            let second = algorithm.select(&ctx, &fitness, &mut rng);
            (population[first].clone(), population[second].clone())
        });

        // crossover, one task per pair
        let crossover = &self.crossover;
        let crossed: Result<Vec<(Candidate, Candidate)>, OperatorError> =
            try_map_indexed(self.parallel, num_pairs, |i| {
                let mut rng = EvoRandomGenerator::stream(seed, generation, phase::CROSSOVER, i);
                crossover.apply(&pairs[i].0, &pairs[i].1, &mut rng)
            });
        let mut children: Vec<Candidate> = Vec::with_capacity(num_children);
        for (first, second) in crossed? {
            children.push(first);
            children.push(second);
        }

        // mutation, one task per child
        let mutation = &self.mutation;
        let ctx_ref = &ctx;
        for_each_indexed(self.parallel, &mut children, |i, child| {
            let mut rng = EvoRandomGenerator::stream(seed, generation, phase::MUTATION, i);
            mutation.apply(child, ctx_ref, &mut rng);
        });

        // repair, one task per child
        if let Some(repair_fn) = &self.repair_fn {
            let chrom_len = self.chrom_len;
            try_for_each_indexed(self.parallel, &mut children, |_, child| {
                let repaired = repair_fn(child.genes.view());
                if repaired.len() != chrom_len {
                    return Err(EvaluationError::WrongRepairLength {
                        expected: chrom_len,
                        got: repaired.len(),
                    });
                }
                if repaired != child.genes {
                    child.genes = repaired;
                    child.evaluated = false;
                }
                Ok(())
            })?;
        }

        self.evaluate(&mut children)?;

        // survivor selection over parents ∪ children
        let num_parents = self.population.len();
        let m = fitness.ncols();
        let mut combined_fitness = Array2::zeros((num_parents + children.len(), m));
        combined_fitness
            .slice_mut(s![..num_parents, ..])
            .assign(&fitness);
        for (i, child) in children.iter().enumerate() {
            combined_fitness
                .row_mut(num_parents + i)
                .assign(&child.fitness);
        }
        let survivors = self
            .algorithm
            .next_population(&ctx, &combined_fitness, num_parents);
        assert_eq!(
            survivors.len(),
            self.population_size,
            "survivor selection must return exactly the population size"
        );

        let mut pool = std::mem::take(&mut self.population);
        pool.append(&mut children);
        self.population = survivors.iter().map(|&i| pool[i].clone()).collect();

        if let Some(callback) = self.end_of_generation.as_mut() {
            callback(&EngineView {
                generation: self.generation,
                max_generations: self.max_generations,
                evaluations: self.evaluations.load(Ordering::Relaxed),
                population: &self.population,
                archive: &self.archive,
            });
        }
        self.generation += 1;
        Ok(())
    }

    /// Evaluates every not-yet-evaluated candidate (or all of them under
    /// `dynamic_fitness`) and enforces the fitness contract.
    fn evaluate(&mut self, candidates: &mut [Candidate]) -> Result<(), EvaluationError> {
        // the first evaluation fixes the number of objectives
        if self.num_objectives.is_none() {
            let first = candidates
                .first_mut()
                .expect("populations are never empty");
            if !first.evaluated || self.dynamic_fitness {
                first.fitness = self.fitness_fn.call(first.genes.view());
                first.evaluated = true;
                self.evaluations.fetch_add(1, Ordering::Relaxed);
            }
            self.num_objectives = Some(first.fitness.len());
        }
        let expected = self.num_objectives.expect("just fixed above");

        let fitness_fn = &self.fitness_fn;
        let counter = &self.evaluations;
        let dynamic = self.dynamic_fitness;
        for_each_indexed(self.parallel, candidates, |_, candidate| {
            if dynamic || !candidate.evaluated {
                candidate.fitness = fitness_fn.call(candidate.genes.view());
                candidate.evaluated = true;
                counter.fetch_add(1, Ordering::Relaxed);
            }
        });

        for candidate in candidates.iter() {
            if candidate.fitness.len() != expected {
                return Err(EvaluationError::WrongFitnessLength {
                    expected,
                    got: candidate.fitness.len(),
                });
            }
            for (objective, &value) in candidate.fitness.iter().enumerate() {
                if !value.is_finite() {
                    return Err(EvaluationError::NonFiniteFitness { objective, value });
                }
            }
        }
        Ok(())
    }

    /// Merges the current population into the archive, keeps the
    /// non-dominated candidates and removes duplicate chromosomes.
    fn update_archive(&mut self) {
        let mut pool = std::mem::take(&mut self.archive);
        pool.extend(self.population.iter().filter(|c| c.evaluated).cloned());
        if pool.is_empty() {
            return;
        }

        let fitness = fitness_matrix(&pool);
        let keep = non_dominated_indices(&fitness);
        let mut optimal: Vec<Candidate> = keep.into_iter().map(|i| pool[i].clone()).collect();

        optimal.sort_by(|a, b| a.cmp_genes(b));
        optimal.dedup_by(|a, b| a.genes == b.genes);
        self.archive = optimal;
    }

    fn should_stop(&mut self) -> bool {
        if self.generation >= self.max_generations - 1 {
            return true;
        }
        let Some(stop) = self.stop_condition.as_mut() else {
            return false;
        };
        stop.stop(&EngineView {
            generation: self.generation,
            max_generations: self.max_generations,
            evaluations: self.evaluations.load(Ordering::Relaxed),
            population: &self.population,
            archive: &self.archive,
        })
    }
}

fn map_indexed<T, OP>(policy: ParallelPolicy, count: usize, op: OP) -> Vec<T>
where
    T: Send,
    OP: Fn(usize) -> T + Send + Sync,
{
    match policy {
        ParallelPolicy::DataParallel => (0..count).into_par_iter().map(op).collect(),
        ParallelPolicy::Sequential => (0..count).map(op).collect(),
    }
}

fn try_map_indexed<T, E, OP>(
    policy: ParallelPolicy,
    count: usize,
    op: OP,
) -> Result<Vec<T>, E>
where
    T: Send,
    E: Send,
    OP: Fn(usize) -> Result<T, E> + Send + Sync,
{
    match policy {
        ParallelPolicy::DataParallel => (0..count).into_par_iter().map(op).collect(),
        ParallelPolicy::Sequential => (0..count).map(op).collect(),
    }
}

fn for_each_indexed<T, OP>(policy: ParallelPolicy, items: &mut [T], op: OP)
where
    T: Send,
    OP: Fn(usize, &mut T) + Send + Sync,
{
    match policy {
        ParallelPolicy::DataParallel => items
            .par_iter_mut()
            .enumerate()
            .for_each(|(i, item)| op(i, item)),
        ParallelPolicy::Sequential => items
            .iter_mut()
            .enumerate()
            .for_each(|(i, item)| op(i, item)),
    }
}

fn try_for_each_indexed<T, E, OP>(
    policy: ParallelPolicy,
    items: &mut [T],
    op: OP,
) -> Result<(), E>
where
    T: Send,
    E: Send,
    OP: Fn(usize, &mut T) -> Result<(), E> + Send + Sync,
{
    match policy {
        ParallelPolicy::DataParallel => items
            .par_iter_mut()
            .enumerate()
            .map(|(i, item)| op(i, item))
            .collect(),
        ParallelPolicy::Sequential => items
            .iter_mut()
            .enumerate()
            .map(|(i, item)| op(i, item))
            .collect(),
    }
}
