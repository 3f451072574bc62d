use super::hall_of_fame::HallOfFame;
use super::individual::Individual;
use super::operators::{self, MutationParams};
use super::sharing::apply_fitness_sharing;
use crate::config::EvolutionConfig;
use crate::engines::evaluation::EvaluationContext;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

/// Lifecycle of an island. `Stagnant` and `Restarted` are transient states
/// around a partial restart; `Converged` ends the current block early.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IslandState {
    Running,
    Stagnant,
    Restarted,
    Converged,
}

/// Outcome of one generational block, for logging and run reports.
#[derive(Debug, Clone)]
pub struct BlockReport {
    pub island_id: usize,
    pub generations: usize,
    pub best_fitness_history: Vec<f64>,
    pub restarts: usize,
    pub converged: bool,
    pub final_mutation_rate: f64,
}

/// One subpopulation evolving independently between migration cycles.
pub struct Island {
    id: usize,
    population: Vec<Individual>,
    hall_of_fame: HallOfFame,
    state: IslandState,
    rng: StdRng,
}

impl Island {
    pub fn new(id: usize, size: usize, dimensions: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let population = (0..size)
            .map(|_| Individual::random(dimensions, &mut rng))
            .collect();
        Self {
            id,
            population,
            hall_of_fame: HallOfFame::new(1),
            state: IslandState::Running,
            rng,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn population(&self) -> &[Individual] {
        &self.population
    }

    pub fn state(&self) -> IslandState {
        self.state
    }

    pub fn hall_of_fame(&self) -> &HallOfFame {
        &self.hall_of_fame
    }

    /// Overwrite the first individuals with seeded candidates. Their fitness
    /// is invalidated so the block start evaluates them like everyone else.
    pub fn inject(&mut self, seeds: Vec<Individual>) {
        for (slot, seed) in self.population.iter_mut().zip(seeds) {
            let mut seed = seed;
            seed.invalidate_fitness();
            *slot = seed;
        }
    }

    /// Replace the worst-ranked individuals with incoming migrants.
    /// Population size is unchanged.
    pub fn replace_worst(&mut self, migrants: Vec<Individual>) {
        let mut indices: Vec<usize> = (0..self.population.len()).collect();
        indices.sort_by(|&a, &b| {
            self.population[a]
                .fitness_or_min()
                .partial_cmp(&self.population[b].fitness_or_min())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        for (migrant, &idx) in migrants.into_iter().zip(indices.iter()) {
            self.population[idx] = migrant;
        }
    }

    /// Run one generational block: tournament selection with elitism, blend
    /// crossover, adaptive Gaussian mutation, periodic fitness sharing,
    /// stagnation-triggered partial restarts and early stopping.
    pub fn evolve_block(&mut self, ctx: &EvaluationContext, config: &EvolutionConfig) -> BlockReport {
        let max_gen = config.generations_per_cycle;
        // a restart raises the mutation rate for the remainder of this block
        let mut mutation_rate = config.mutation_rate;
        let mut restarts = 0usize;
        self.state = IslandState::Running;

        evaluate_invalid(ctx, &mut self.population);
        self.hall_of_fame.update(&self.population);

        let mut best_history = vec![best_fitness(&self.population)];
        let mut best_individuals = vec![best_individual(&self.population).clone()];
        let mut generations = 0usize;

        for gen in 1..=max_gen {
            if self.state == IslandState::Restarted {
                self.state = IslandState::Running;
            }
            generations = gen;

            let improvement = trailing_improvement(&best_history, 5);

            // survivors via tournament; elites carried over untouched
            let survivor_count = self.population.len() - config.elite_count;
            let mut offspring: Vec<Individual> = (0..survivor_count)
                .map(|_| {
                    operators::tournament_selection(
                        &self.population,
                        config.tournament_size,
                        &mut self.rng,
                    )
                })
                .collect();
            let elites = operators::select_best(&self.population, config.elite_count);

            // crossover on adjacent pairs
            let mut i = 1;
            while i < offspring.len() {
                if self.rng.gen::<f64>() < config.crossover_rate {
                    let (left, right) = offspring.split_at_mut(i);
                    operators::blend_crossover(&mut left[i - 1], &mut right[0], 0.5, &mut self.rng);
                }
                i += 2;
            }

            let params = MutationParams::adaptive(
                config.mutation_sigma,
                config.mutation_indpb,
                gen,
                max_gen,
                improvement,
            );
            for ind in offspring.iter_mut() {
                if self.rng.gen::<f64>() < mutation_rate {
                    operators::gaussian_mutation(ind, params, &mut self.rng);
                }
            }

            evaluate_invalid(ctx, &mut offspring);

            offspring.extend(elites);

            if gen % config.sharing_interval == 0 {
                apply_fitness_sharing(&mut offspring, config.sharing_radius);
            }

            self.hall_of_fame.update(&offspring);
            self.population = offspring;

            let current_best = best_fitness(&self.population);
            best_history.push(current_best);
            best_individuals.push(best_individual(&self.population).clone());

            log::debug!(
                "island {}: gen {}/{} best {:.6}",
                self.id,
                gen,
                max_gen,
                current_best
            );

            if gen > config.stagnation_window
                && stagnation_triggered(&best_history, config.stagnation_window)
            {
                self.state = IslandState::Stagnant;
                log::info!(
                    "island {}: stagnation at generation {}, partial restart",
                    self.id,
                    gen
                );
                self.partial_restart(ctx, config);
                mutation_rate = config.restart_mutation_rate;
                restarts += 1;
                self.state = IslandState::Restarted;
            }

            if gen > config.early_stop_patience {
                if let Some(window_gain) =
                    window_improvement(&best_history, config.early_stop_patience)
                {
                    if window_gain < config.early_stop_threshold {
                        self.state = IslandState::Converged;
                        log::info!(
                            "island {}: early stop at generation {} (improvement {:.6})",
                            self.id,
                            gen,
                            window_gain
                        );
                        break;
                    }
                }
            }
        }

        self.restore_best(&best_history, &best_individuals);

        BlockReport {
            island_id: self.id,
            generations,
            best_fitness_history: best_history,
            restarts,
            converged: self.state == IslandState::Converged,
            final_mutation_rate: mutation_rate,
        }
    }

    /// Keep the top (1 - restart_fraction) of the population, refill with
    /// fresh random individuals and evaluate them immediately.
    fn partial_restart(&mut self, ctx: &EvaluationContext, config: &EvolutionConfig) {
        let size = self.population.len();
        let keep = (size as f64 * (1.0 - config.restart_fraction)) as usize;
        let dimensions = ctx.dimensions();

        let mut next = operators::select_best(&self.population, keep);
        let mut fresh: Vec<Individual> = (0..size - keep)
            .map(|_| Individual::random(dimensions, &mut self.rng))
            .collect();
        evaluate_invalid(ctx, &mut fresh);
        next.extend(fresh);
        self.population = next;
    }

    /// The block must never return a population that lost its best-known
    /// solution: if the best generation was not the final one, clone that
    /// individual over the current worst.
    fn restore_best(&mut self, best_history: &[f64], best_individuals: &[Individual]) {
        let mut best_idx = 0;
        for (i, &fitness) in best_history.iter().enumerate() {
            if fitness > best_history[best_idx] {
                best_idx = i;
            }
        }
        if best_idx < best_history.len() - 1 {
            log::debug!(
                "island {}: best individual from generation {} missing from final population, restoring",
                self.id,
                best_idx
            );
            let worst_idx = worst_index(&self.population);
            self.population[worst_idx] = best_individuals[best_idx].clone();
        }
    }
}

/// Evaluate every individual with an invalid fitness cache. Evaluation is a
/// pure function of the shared context, so a parallel map is safe.
fn evaluate_invalid(ctx: &EvaluationContext, population: &mut [Individual]) {
    population
        .par_iter_mut()
        .filter(|ind| !ind.has_valid_fitness())
        .for_each(|ind| {
            let fitness = ctx.significance(ind.thresholds());
            ind.set_fitness(fitness);
        });
}

fn best_fitness(population: &[Individual]) -> f64 {
    population
        .iter()
        .map(|ind| ind.fitness_or_min())
        .fold(f64::NEG_INFINITY, f64::max)
}

fn best_individual(population: &[Individual]) -> &Individual {
    population
        .iter()
        .max_by(|a, b| {
            a.fitness_or_min()
                .partial_cmp(&b.fitness_or_min())
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .expect("population is never empty")
}

fn worst_index(population: &[Individual]) -> usize {
    let mut worst = 0;
    for (i, ind) in population.iter().enumerate() {
        if ind.fitness_or_min() < population[worst].fitness_or_min() {
            worst = i;
        }
    }
    worst
}

/// Fractional best-fitness gain over the trailing `window` generations, 1.0
/// while the history is too short or the base value is not positive.
fn trailing_improvement(history: &[f64], window: usize) -> f64 {
    if history.len() < window {
        return 1.0;
    }
    let base = history[history.len() - window];
    if base <= 0.0 {
        return 1.0;
    }
    (history[history.len() - 1] - base) / base
}

/// Fractional gain over the trailing early-stop window, `None` while the
/// history is too short or the base value is not positive.
fn window_improvement(history: &[f64], patience: usize) -> Option<f64> {
    if history.len() <= patience {
        return None;
    }
    let base = history[history.len() - patience];
    if base <= 0.0 {
        return None;
    }
    Some((history[history.len() - 1] - base) / base)
}

/// No improvement over the trailing window and the current best matches the
/// value at the window start. The equality check is tolerance-based: exact
/// float equality would rarely miss a genuine stall on last-bit noise.
fn stagnation_triggered(history: &[f64], window: usize) -> bool {
    if history.len() <= window {
        return false;
    }
    let current = *history.last().expect("history is never empty");
    let tail = &history[history.len() - window..];
    let recent_best = tail.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let anchor = history[history.len() - window];
    current <= recent_best && approx_eq(current, anchor)
}

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * b.abs().max(1.0)
}
