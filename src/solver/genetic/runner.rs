//! Evolutionary loop over permutation-encoded pairings.
//!
//! A chromosome is a permutation of the larger side's indices; entry `i`
//! of the first `n` genes is the partner of smaller-side entity `i`.
//! Every chromosome is therefore a valid one-to-one pairing, and the
//! operators only ever produce permutations.

use super::config::GeneticConfig;
use crate::matching::{CostMatrix, Matching};
use crate::model::ObjectiveFunction;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Result of a genetic run.
#[derive(Debug, Clone)]
pub(crate) struct GeneticOutcome {
    /// Best pairing found, in the orientation of the input matrix.
    pub matching: Matching,

    /// Objective value of `matching` (lower is better).
    pub fitness: f64,

    /// Generations executed.
    pub generations: usize,

    /// Whether the run stopped on stagnation.
    pub stagnated: bool,
}

#[derive(Debug, Clone)]
struct Chromosome {
    genes: Vec<usize>,
    fitness: f64,
}

/// Evolves pairings of `matrix` minimizing `objective` over matched costs.
///
/// A pairing that uses a forbidden cell, or whose objective is NaN, has
/// fitness `+inf`. `config` must be valid.
pub(crate) fn evolve(
    matrix: &CostMatrix,
    objective: &ObjectiveFunction,
    config: &GeneticConfig,
) -> GeneticOutcome {
    if matrix.is_empty() {
        return GeneticOutcome {
            matching: Matching::default(),
            fitness: objective.aggregate(&[]).unwrap_or(0.0),
            generations: 0,
            stagnated: false,
        };
    }

    let transposed = matrix.rows() > matrix.cols();
    let wide = if transposed {
        matrix.transposed()
    } else {
        matrix.clone()
    };
    let n = wide.rows();
    let m = wide.cols();

    let fitness = |genes: &[usize]| -> f64 {
        let costs: Vec<f64> = (0..n).map(|i| wide.get(i, genes[i])).collect();
        if costs.iter().any(|c| c.is_infinite()) {
            return f64::INFINITY;
        }
        match objective.aggregate(&costs) {
            Some(v) if !v.is_nan() => v,
            _ => f64::INFINITY,
        }
    };

    let mut rng = StdRng::seed_from_u64(config.seed.unwrap_or_else(rand::random));

    let mut population: Vec<Chromosome> = (0..config.population_size)
        .map(|_| {
            let mut genes: Vec<usize> = (0..m).collect();
            genes.shuffle(&mut rng);
            Chromosome {
                genes,
                fitness: f64::INFINITY,
            }
        })
        .collect();
    evaluate(&mut population, &fitness, config.parallel);

    let elite_count = config.elite_count();
    let mut best = best_of(&population).clone();
    let mut stagnation = 0usize;
    let mut generations = 0usize;
    let mut stagnated = false;

    for gen in 0..config.max_generations {
        population.sort_by(|a, b| a.fitness.total_cmp(&b.fitness));

        let mut next: Vec<Chromosome> = population[..elite_count].to_vec();
        while next.len() < config.population_size {
            let p1 = tournament(&population, config.tournament_size, &mut rng);
            let p2 = tournament(&population, config.tournament_size, &mut rng);

            let mut genes = if rng.random_bool(config.crossover_rate) {
                order_crossover(&population[p1].genes, &population[p2].genes, &mut rng)
            } else {
                population[p1].genes.clone()
            };
            if rng.random_bool(config.mutation_rate) {
                swap_mutation(&mut genes, &mut rng);
            }
            next.push(Chromosome {
                genes,
                fitness: f64::INFINITY,
            });
        }
        evaluate(&mut next[elite_count..], &fitness, config.parallel);
        population = next;
        generations = gen + 1;

        let gen_best = best_of(&population);
        if gen_best.fitness < best.fitness {
            best = gen_best.clone();
            stagnation = 0;
        } else {
            stagnation += 1;
        }
        trace!(generation = generations, best = best.fitness, "genetic generation");

        if config.stagnation_limit > 0 && stagnation >= config.stagnation_limit {
            stagnated = true;
            break;
        }
    }

    debug!(generations, stagnated, fitness = best.fitness, "genetic run finished");

    let pairs: Vec<(usize, usize)> = (0..n).map(|i| (i, best.genes[i])).collect();
    let matching = Matching::new(pairs);
    GeneticOutcome {
        matching: if transposed {
            matching.transposed()
        } else {
            matching
        },
        fitness: best.fitness,
        generations,
        stagnated,
    }
}

fn evaluate<F>(population: &mut [Chromosome], fitness: &F, parallel: bool)
where
    F: Fn(&[usize]) -> f64 + Sync,
{
    #[cfg(feature = "parallel")]
    {
        if parallel {
            population
                .par_iter_mut()
                .for_each(|c| c.fitness = fitness(&c.genes));
            return;
        }
    }
    #[cfg(not(feature = "parallel"))]
    let _ = parallel;

    for c in population.iter_mut() {
        c.fitness = fitness(&c.genes);
    }
}

fn best_of(population: &[Chromosome]) -> &Chromosome {
    population
        .iter()
        .min_by(|a, b| a.fitness.total_cmp(&b.fitness))
        .unwrap_or(&population[0])
}

/// Picks `k` random chromosomes and returns the index of the fittest.
fn tournament<R: Rng>(population: &[Chromosome], k: usize, rng: &mut R) -> usize {
    let n = population.len();
    let mut best = rng.random_range(0..n);
    for _ in 1..k.max(1) {
        let idx = rng.random_range(0..n);
        if population[idx].fitness < population[best].fitness {
            best = idx;
        }
    }
    best
}

/// Order crossover (OX): keeps a random segment of `template` in place
/// and fills the rest with `donor`'s genes in donor order, starting after
/// the segment and wrapping around.
///
/// Davis (1985), "Applying Adaptive Algorithms to Epistatic Domains"
fn order_crossover<R: Rng>(template: &[usize], donor: &[usize], rng: &mut R) -> Vec<usize> {
    let n = template.len();
    if n < 2 {
        return template.to_vec();
    }

    let a = rng.random_range(0..n);
    let b = rng.random_range(0..n);
    let (start, end) = (a.min(b), a.max(b));

    let mut child = vec![usize::MAX; n];
    let mut in_segment = vec![false; n];
    for i in start..=end {
        child[i] = template[i];
        in_segment[template[i]] = true;
    }

    let mut pos = (end + 1) % n;
    for offset in 0..n {
        let gene = donor[(end + 1 + offset) % n];
        if !in_segment[gene] {
            child[pos] = gene;
            pos = (pos + 1) % n;
        }
    }
    child
}

/// Swaps two random positions.
fn swap_mutation<R: Rng>(genes: &mut [usize], rng: &mut R) {
    let n = genes.len();
    if n < 2 {
        return;
    }
    let i = rng.random_range(0..n);
    let j = rng.random_range(0..n);
    genes.swap(i, j);
}
