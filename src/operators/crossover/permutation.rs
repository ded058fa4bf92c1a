//! Permutation crossovers. Chromosomes hold the values `0..L-1` exactly once
//! each; every operator below emits children that keep that property.
use ndarray::Array1;

use crate::encoding::PermutationEncoding;
use crate::error::{OperatorError, ParameterError};
use crate::genetic::Candidate;
use crate::helpers::validators::validate_probability;
use crate::operators::crossover::CrossoverOperator;
use crate::random::RandomGenerator;

fn as_values(genes: &Array1<f64>) -> Vec<usize> {
    genes.iter().map(|&g| g as usize).collect()
}

fn as_genes(values: Vec<usize>) -> Array1<f64> {
    Array1::from_iter(values.into_iter().map(|v| v as f64))
}

/// Positions of each value, i.e. `positions[value] = index`.
fn positions(values: &[usize]) -> Vec<usize> {
    let mut positions = vec![0usize; values.len()];
    for (index, &value) in values.iter().enumerate() {
        positions[value] = index;
    }
    positions
}

/// Order crossover (OX): copy a random segment from one parent, then fill the
/// remaining positions with the other parent's values in circular order,
/// starting after the segment.
#[derive(Debug, Clone)]
pub struct OrderCrossover {
    rate: f64,
}

impl OrderCrossover {
    pub fn new(rate: f64) -> Result<Self, ParameterError> {
        validate_probability(rate, "Crossover rate")?;
        Ok(Self { rate })
    }
}

fn order_cross(a: &[usize], b: &[usize], start: usize, end: usize) -> Vec<usize> {
    let len = a.len();
    let mut child = vec![usize::MAX; len];
    let mut used = vec![false; len];
    for i in start..end {
        child[i] = a[i];
        used[a[i]] = true;
    }
    let mut fill = end % len;
    for offset in 0..len {
        let value = b[(end + offset) % len];
        if !used[value] {
            child[fill] = value;
            used[value] = true;
            fill = (fill + 1) % len;
        }
    }
    child
}

impl CrossoverOperator for OrderCrossover {
    type Enc = PermutationEncoding;

    fn rate(&self) -> f64 {
        self.rate
    }

    fn cross(
        &self,
        parent_a: &Candidate,
        parent_b: &Candidate,
        rng: &mut impl RandomGenerator,
    ) -> Result<(Array1<f64>, Array1<f64>), OperatorError> {
        let a = as_values(&parent_a.genes);
        let b = as_values(&parent_b.genes);
        let len = a.len();

        let mut start = rng.gen_range_usize(0, len);
        let mut end = rng.gen_range_usize(0, len);
        if start > end {
            std::mem::swap(&mut start, &mut end);
        }

        let child_a = order_cross(&a, &b, start, end);
        let child_b = order_cross(&b, &a, start, end);
        Ok((as_genes(child_a), as_genes(child_b)))
    }
}

/// Partially mapped crossover (PMX): copy a random segment from one parent;
/// every other position takes the other parent's value, remapped through the
/// segment until it is conflict-free.
#[derive(Debug, Clone)]
pub struct PartiallyMappedCrossover {
    rate: f64,
}

impl PartiallyMappedCrossover {
    pub fn new(rate: f64) -> Result<Self, ParameterError> {
        validate_probability(rate, "Crossover rate")?;
        Ok(Self { rate })
    }
}

fn pmx_cross(a: &[usize], b: &[usize], start: usize, end: usize) -> Vec<usize> {
    let len = a.len();
    let position_in_a = positions(a);
    let mut in_segment = vec![false; len];
    for i in start..end {
        in_segment[a[i]] = true;
    }

    let mut child = vec![usize::MAX; len];
    child[start..end].copy_from_slice(&a[start..end]);
    for i in (0..start).chain(end..len) {
        let mut value = b[i];
        while in_segment[value] {
            value = b[position_in_a[value]];
        }
        child[i] = value;
    }
    child
}

impl CrossoverOperator for PartiallyMappedCrossover {
    type Enc = PermutationEncoding;

    fn rate(&self) -> f64 {
        self.rate
    }

    fn cross(
        &self,
        parent_a: &Candidate,
        parent_b: &Candidate,
        rng: &mut impl RandomGenerator,
    ) -> Result<(Array1<f64>, Array1<f64>), OperatorError> {
        let a = as_values(&parent_a.genes);
        let b = as_values(&parent_b.genes);
        let len = a.len();

        let mut start = rng.gen_range_usize(0, len);
        let mut end = rng.gen_range_usize(0, len);
        if start > end {
            std::mem::swap(&mut start, &mut end);
        }

        let child_a = pmx_cross(&a, &b, start, end);
        let child_b = pmx_cross(&b, &a, start, end);
        Ok((as_genes(child_a), as_genes(child_b)))
    }
}

/// Cycle crossover (CX): positions are partitioned into cycles between the
/// parents; alternating cycles are copied from each parent, so every gene
/// keeps a position it had in one of them. Uses no randomness.
#[derive(Debug, Clone)]
pub struct CycleCrossover {
    rate: f64,
}

impl CycleCrossover {
    pub fn new(rate: f64) -> Result<Self, ParameterError> {
        validate_probability(rate, "Crossover rate")?;
        Ok(Self { rate })
    }
}

impl CrossoverOperator for CycleCrossover {
    type Enc = PermutationEncoding;

    fn rate(&self) -> f64 {
        self.rate
    }

    fn cross(
        &self,
        parent_a: &Candidate,
        parent_b: &Candidate,
        _rng: &mut impl RandomGenerator,
    ) -> Result<(Array1<f64>, Array1<f64>), OperatorError> {
        let a = as_values(&parent_a.genes);
        let b = as_values(&parent_b.genes);
        let len = a.len();
        let position_in_a = positions(&a);

        let mut cycle_of = vec![usize::MAX; len];
        let mut cycle = 0;
        for seed in 0..len {
            if cycle_of[seed] != usize::MAX {
                continue;
            }
            let mut index = seed;
            while cycle_of[index] == usize::MAX {
                cycle_of[index] = cycle;
                index = position_in_a[b[index]];
            }
            cycle += 1;
        }

        let mut child_a = vec![0usize; len];
        let mut child_b = vec![0usize; len];
        for i in 0..len {
            if cycle_of[i] % 2 == 0 {
                child_a[i] = a[i];
                child_b[i] = b[i];
            } else {
                child_a[i] = b[i];
                child_b[i] = a[i];
            }
        }
        Ok((as_genes(child_a), as_genes(child_b)))
    }
}

/// Edge recombination (ERX): children are rebuilt greedily from the union of
/// both parents' adjacency lists, preferring the neighbor with the fewest
/// remaining neighbors (ties by smallest value). When the current value has
/// no unvisited neighbor left, a random unvisited value restarts the tour.
#[derive(Debug, Clone)]
pub struct EdgeRecombinationCrossover {
    rate: f64,
}

impl EdgeRecombinationCrossover {
    pub fn new(rate: f64) -> Result<Self, ParameterError> {
        validate_probability(rate, "Crossover rate")?;
        Ok(Self { rate })
    }
}

fn adjacency(a: &[usize], b: &[usize]) -> Vec<Vec<usize>> {
    let len = a.len();
    let mut table: Vec<Vec<usize>> = vec![Vec::with_capacity(4); len];
    for parent in [a, b] {
        for i in 0..len {
            let value = parent[i];
            let prev = parent[(i + len - 1) % len];
            let next = parent[(i + 1) % len];
            for neighbor in [prev, next] {
                if !table[value].contains(&neighbor) {
                    table[value].push(neighbor);
                }
            }
        }
    }
    for neighbors in table.iter_mut() {
        neighbors.sort_unstable();
    }
    table
}

fn edge_cross(
    adjacency: &[Vec<usize>],
    start: usize,
    rng: &mut impl RandomGenerator,
) -> Vec<usize> {
    let len = adjacency.len();
    let mut remaining: Vec<Vec<usize>> = adjacency.to_vec();
    let mut visited = vec![false; len];
    let mut child = Vec::with_capacity(len);

    let mut current = start;
    loop {
        child.push(current);
        visited[current] = true;
        if child.len() == len {
            break;
        }
        for neighbors in remaining.iter_mut() {
            neighbors.retain(|&v| v != current);
        }

        let next = remaining[current]
            .iter()
            .copied()
            .min_by_key(|&v| (remaining[v].len(), v));
        current = match next {
            Some(value) => value,
            None => {
                // tour ran dry: restart from a random unvisited value
                let unvisited: Vec<usize> =
                    (0..len).filter(|&v| !visited[v]).collect();
                unvisited[rng.gen_range_usize(0, unvisited.len())]
            }
        };
    }
    child
}

impl CrossoverOperator for EdgeRecombinationCrossover {
    type Enc = PermutationEncoding;

    fn rate(&self) -> f64 {
        self.rate
    }

    fn cross(
        &self,
        parent_a: &Candidate,
        parent_b: &Candidate,
        rng: &mut impl RandomGenerator,
    ) -> Result<(Array1<f64>, Array1<f64>), OperatorError> {
        let a = as_values(&parent_a.genes);
        let b = as_values(&parent_b.genes);
        let table = adjacency(&a, &b);

        let child_a = edge_cross(&table, a[0], rng);
        let child_b = edge_cross(&table, b[0], rng);
        Ok((as_genes(child_a), as_genes(child_b)))
    }
}
