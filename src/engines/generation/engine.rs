use super::hall_of_fame::HallOfFame;
use super::island::Island;
use super::migration::migrate_ring;
use super::seeding::educated_guesses;
use crate::config::{ConfigSection, EvolutionConfig, IslandModelConfig};
use crate::engines::evaluation::EvaluationContext;
use crate::error::{CutoptError, Result};
use rayon::prelude::*;

/// Final outcome of an island-model run.
#[derive(Debug, Clone)]
pub struct OptimizationResult {
    pub best_thresholds: Vec<f64>,
    /// Canonical significance of the best thresholds, re-evaluated after the
    /// run so periodic fitness sharing cannot distort the reported value.
    pub best_significance: f64,
    /// Per-island best-fitness history, blocks concatenated in cycle order.
    pub island_histories: Vec<Vec<f64>>,
    pub total_generations: usize,
    pub restarts: usize,
}

/// Island-model optimizer: several populations evolve independently per
/// migration cycle, then exchange their best individuals along a ring.
/// Island 0 starts from heuristic threshold guesses instead of pure noise.
pub struct IslandModelEngine<'a> {
    ctx: &'a EvaluationContext,
    evolution: EvolutionConfig,
    topology: IslandModelConfig,
    islands: Vec<Island>,
    global_hof: HallOfFame,
}

impl<'a> IslandModelEngine<'a> {
    pub fn new(
        ctx: &'a EvaluationContext,
        evolution: EvolutionConfig,
        topology: IslandModelConfig,
    ) -> Result<Self> {
        evolution.validate()?;
        topology.validate()?;

        let base_seed = evolution.seed.unwrap_or_else(rand::random);
        let dimensions = ctx.dimensions();
        let mut islands: Vec<Island> = (0..topology.n_islands)
            .map(|i| {
                Island::new(
                    i,
                    evolution.island_size,
                    dimensions,
                    base_seed.wrapping_add(i as u64),
                )
            })
            .collect();

        let n_guesses = 5.min(evolution.island_size / 2);
        if n_guesses > 0 {
            islands[0].inject(educated_guesses(ctx, n_guesses));
        }

        Ok(Self {
            ctx,
            evolution,
            topology,
            islands,
            global_hof: HallOfFame::new(1),
        })
    }

    pub fn run(&mut self) -> Result<OptimizationResult> {
        let cycles = self.topology.migration_cycles;
        let mut island_histories: Vec<Vec<f64>> = vec![Vec::new(); self.islands.len()];
        let mut total_generations = 0usize;
        let mut restarts = 0usize;

        for cycle in 0..cycles {
            log::info!("migration cycle {}/{}", cycle + 1, cycles);

            let ctx = self.ctx;
            let evolution = &self.evolution;
            let reports: Vec<_> = self
                .islands
                .par_iter_mut()
                .map(|island| island.evolve_block(ctx, evolution))
                .collect();

            for report in &reports {
                log::info!(
                    "island {}: {} generations, best {:.6}{}{}",
                    report.island_id,
                    report.generations,
                    report
                        .best_fitness_history
                        .iter()
                        .cloned()
                        .fold(f64::NEG_INFINITY, f64::max),
                    if report.restarts > 0 { ", restarted" } else { "" },
                    if report.converged { ", converged" } else { "" },
                );
                island_histories[report.island_id]
                    .extend_from_slice(&report.best_fitness_history);
                total_generations += report.generations;
                restarts += report.restarts;
            }

            for island in &self.islands {
                self.global_hof.update(island.population());
            }

            if cycle < cycles - 1 {
                migrate_ring(&mut self.islands, &self.topology);
            }
        }

        let best = self
            .global_hof
            .best()
            .ok_or_else(|| CutoptError::Generation("optimization produced no candidate".into()))?;
        let best_thresholds = best.thresholds().to_vec();
        let best_significance = self.ctx.significance(&best_thresholds);

        log::info!("best significance across all islands: {:.6}", best_significance);

        Ok(OptimizationResult {
            best_thresholds,
            best_significance,
            island_histories,
            total_generations,
            restarts,
        })
    }

    pub fn global_best_fitness(&self) -> Option<f64> {
        self.global_hof.best_fitness()
    }
}
