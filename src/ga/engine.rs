//! Generation loop (spec.md §4.3.4, §4.3.8): initializes a population,
//! then repeatedly scores, selects, breeds and mutates it, reporting
//! progress and honoring cooperative cancellation between generations.
//!
//! Grounded on the teacher's `scheduler::generate_schedule`, which drives an
//! analogous named-phase pipeline with a progress callback in place of its
//! `indicatif::ProgressBar`.

use rand::prelude::*;
use rand::rngs::StdRng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::candidates::CandidateSets;
use super::chromosome::Chromosome;
use super::fitness::evaluate;
use super::operators::{crossover, mutate, random_gene, tournament_select};
use crate::demand::Demand;
use crate::resource_loader::ResourcePool;
use crate::types::GAParams;

/// A cheaply-cloneable handle the Orchestrator hands to a running GA task
/// so it can request cancellation from another task (spec.md §4.8).
#[derive(Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(false)))
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Per-generation progress, forwarded to the Progress Broker (spec.md §4.7).
#[derive(Debug, Clone)]
pub struct GenerationUpdate {
    pub generation: u32,
    pub best_fitness: f64,
    pub avg_fitness: f64,
}

/// The result of a complete (or cancelled) run.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub best_chromosome: Chromosome,
    pub best_fitness: f64,
    pub generations_run: u32,
    pub cancelled: bool,
}

fn random_chromosome(candidates: &CandidateSets, rng: &mut impl Rng) -> Chromosome {
    candidates
        .per_demand
        .iter()
        .map(|dc| random_gene(dc, &candidates.all_time_slots, rng))
        .collect()
}

/// Run the genetic algorithm to completion, or until `cancel` is observed
/// between generations. `on_generation` is called once per completed
/// generation — wiring it to the Progress Broker is the Orchestrator's job.
pub async fn run(
    demands: &[Demand],
    pool: &ResourcePool,
    params: &GAParams,
    cancel: &CancelToken,
    mut on_generation: impl FnMut(GenerationUpdate),
) -> RunOutcome {
    if demands.is_empty() {
        return RunOutcome {
            best_chromosome: Vec::new(),
            best_fitness: 1000.0,
            generations_run: 0,
            cancelled: false,
        };
    }

    let candidates = CandidateSets::build(pool, demands);
    let mut rng = StdRng::from_entropy();

    // A population of zero can't produce an individual to report; treat it
    // as the smallest valid population rather than indexing into an empty
    // Vec (callers that skip `GAParams::validate`, like the demo CLI, can
    // otherwise reach this with an unvalidated `population_size`).
    let population_size = params.population_size.max(1);

    let mut population: Vec<Chromosome> = (0..population_size)
        .map(|_| random_chromosome(&candidates, &mut rng))
        .collect();

    let mut best_chromosome = population[0].clone();
    let mut best_fitness = f64::MIN;
    let mut generations_run = 0;

    for generation in 0..params.generation_count {
        if cancel.is_cancelled() {
            return RunOutcome {
                best_chromosome,
                best_fitness,
                generations_run,
                cancelled: true,
            };
        }

        let scores: Vec<f64> = population
            .iter()
            .map(|c| evaluate(c, demands, pool, &candidates, params))
            .collect();

        let mut ranked: Vec<usize> = (0..population.len()).collect();
        ranked.sort_by(|&a, &b| scores[b].partial_cmp(&scores[a]).unwrap());

        if scores[ranked[0]] > best_fitness {
            best_fitness = scores[ranked[0]];
            best_chromosome = population[ranked[0]].clone();
        }

        let avg_fitness = scores.iter().sum::<f64>() / scores.len().max(1) as f64;
        generations_run += 1;
        on_generation(GenerationUpdate {
            generation,
            best_fitness,
            avg_fitness,
        });

        let elitism_count = (params.elitism_count as usize).min(population.len());
        let mut next_generation: Vec<Chromosome> = ranked[..elitism_count]
            .iter()
            .map(|&i| population[i].clone())
            .collect();

        while next_generation.len() < population.len() {
            let parent_a_idx = tournament_select(&scores, params.tournament_size, &mut rng);
            let child = if rng.gen_bool(params.crossover_rate) {
                let parent_b_idx = tournament_select(&scores, params.tournament_size, &mut rng);
                crossover(&population[parent_a_idx], &population[parent_b_idx], &mut rng)
            } else {
                population[parent_a_idx].clone()
            };
            let mut child = child;
            mutate(&mut child, &candidates, params.mutation_rate, &mut rng);
            next_generation.push(child);
        }

        population = next_generation;
        tokio::task::yield_now().await;
    }

    RunOutcome {
        best_chromosome,
        best_fitness,
        generations_run,
        cancelled: false,
    }
}
