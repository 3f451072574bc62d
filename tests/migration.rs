use cutopt::config::{EvolutionConfig, IslandModelConfig};
use cutopt::data::ScoreTable;
use cutopt::engines::evaluation::EvaluationContext;
use cutopt::engines::generation::Island;
use cutopt::engines::generation::migration::{migrate_ring, migration_rate, population_diversity};

fn context() -> EvaluationContext {
    let signal_rows: Vec<Vec<f64>> = (0..40).map(|i| vec![0.5 + 0.01 * i as f64]).collect();
    let bg_rows: Vec<Vec<f64>> = (0..40).map(|i| vec![0.01 * i as f64]).collect();
    let signal = ScoreTable::new("signal", vec!["bdt".into()], signal_rows).unwrap();
    let bg = ScoreTable::new("Bqq", vec!["bdt".into()], bg_rows).unwrap();
    EvaluationContext::new(signal, 1.0, vec![(bg, 1.0)]).unwrap()
}

fn evolved_islands(n: usize, size: usize) -> Vec<Island> {
    let ctx = context();
    let config = EvolutionConfig {
        island_size: size,
        generations_per_cycle: 4,
        elite_count: 2,
        seed: Some(3),
        ..Default::default()
    };
    let mut islands: Vec<Island> = (0..n)
        .map(|i| Island::new(i, size, ctx.dimensions(), 3 + i as u64))
        .collect();
    for island in islands.iter_mut() {
        island.evolve_block(&ctx, &config);
    }
    islands
}

#[test]
fn migration_preserves_population_sizes_across_cycles() {
    let config = IslandModelConfig::default();
    let mut islands = evolved_islands(4, 16);

    for _ in 0..3 {
        migrate_ring(&mut islands, &config);
        for island in &islands {
            assert_eq!(island.population().len(), 16);
        }
    }
}

#[test]
fn global_best_survives_migration() {
    let config = IslandModelConfig::default();
    let mut islands = evolved_islands(3, 16);

    let global_best = islands
        .iter()
        .flat_map(|island| island.population())
        .map(|ind| ind.fitness_or_min())
        .fold(f64::NEG_INFINITY, f64::max);

    migrate_ring(&mut islands, &config);

    // the best individual is cloned to its neighbor, never removed at home
    let best_after = islands
        .iter()
        .flat_map(|island| island.population())
        .map(|ind| ind.fitness_or_min())
        .fold(f64::NEG_INFINITY, f64::max);
    assert_eq!(best_after, global_best);
}

#[test]
fn homogeneous_islands_export_more() {
    let config = IslandModelConfig::default();
    let low_diversity = migration_rate(0.05, &config);
    let high_diversity = migration_rate(0.9, &config);
    assert!(low_diversity > high_diversity);
    assert!(low_diversity <= config.max_migration_rate);
    assert!(high_diversity >= config.min_migration_rate);
}

#[test]
fn diversity_shrinks_as_an_island_converges() {
    let ctx = context();
    let config = EvolutionConfig {
        island_size: 16,
        generations_per_cycle: 10,
        elite_count: 2,
        stagnation_window: 50,
        seed: Some(13),
        ..Default::default()
    };

    let mut island = Island::new(0, 16, ctx.dimensions(), 13);
    let before = population_diversity(&island);
    island.evolve_block(&ctx, &config);
    let after = population_diversity(&island);

    // selection pressure concentrates the population around good thresholds
    assert!(after < before);
}
