use cutopt::config::{EvolutionConfig, IslandModelConfig};
use cutopt::data::ScoreTable;
use cutopt::engines::evaluation::{total_background, EvaluationContext};
use cutopt::engines::generation::IslandModelEngine;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::env;

/// Synthetic score table: `center`-biased values, clipped to [0, 1].
fn synthetic_table(name: &str, rows: usize, dims: usize, center: f64, rng: &mut StdRng) -> ScoreTable {
    let columns: Vec<String> = (0..dims).map(|d| format!("bdt_{}", d)).collect();
    let data: Vec<Vec<f64>> = (0..rows)
        .map(|_| {
            (0..dims)
                .map(|_| (center + 0.35 * (rng.gen::<f64>() - 0.5)).clamp(0.0, 1.0))
                .collect()
        })
        .collect();
    ScoreTable::new(name, columns, data).expect("synthetic rows are valid")
}

fn main() {
    env_logger::init();
    println!("=== Threshold Optimizer Demo ===\n");

    let args: Vec<String> = env::args().collect();
    let n_islands = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(3);
    let island_size = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(50);
    let generations = args.get(3).and_then(|s| s.parse().ok()).unwrap_or(20);

    println!("Configuration:");
    println!("  Islands: {}", n_islands);
    println!("  Island size: {}", island_size);
    println!("  Generations per cycle: {}", generations);
    println!();

    println!("Generating synthetic score tables...");
    let mut rng = StdRng::seed_from_u64(7);
    let signal = synthetic_table("signal", 2000, 3, 0.75, &mut rng);
    let bqq = synthetic_table("Bqq", 4000, 3, 0.35, &mut rng);
    let btt = synthetic_table("Btt", 4000, 3, 0.45, &mut rng);
    println!("  signal: {} rows", signal.len());
    println!("  Bqq:    {} rows", bqq.len());
    println!("  Btt:    {} rows", btt.len());
    println!();

    let ctx = match EvaluationContext::new(signal, 0.01, vec![(bqq, 0.05), (btt, 0.2)]) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Failed to build evaluation context: {}", e);
            std::process::exit(1);
        }
    };

    let evolution = EvolutionConfig {
        island_size,
        generations_per_cycle: generations,
        elite_count: (island_size / 10).max(1),
        seed: Some(7),
        ..Default::default()
    };
    let topology = IslandModelConfig {
        n_islands,
        migration_cycles: 3,
        ..Default::default()
    };

    println!("Running island-model optimization...\n");
    let start = std::time::Instant::now();
    let result = match IslandModelEngine::new(&ctx, evolution, topology).and_then(|mut e| e.run()) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Optimization failed: {}", e);
            std::process::exit(1);
        }
    };

    println!("Optimization completed in {:.2}s", start.elapsed().as_secs_f64());
    println!();
    println!("Best significance: {:.6}", result.best_significance);
    println!("Optimal thresholds:");
    for (column, threshold) in ctx.columns().iter().zip(&result.best_thresholds) {
        println!("  {}: {:.6}", column, threshold);
    }

    let survival = ctx.survival_statistics(&result.best_thresholds);
    println!("\nEvent survival:");
    for category in &survival {
        println!(
            "  {}: {}/{} events ({:.2}%), weighted {:.4}/{:.4}",
            category.category,
            category.surviving_events,
            category.initial_events,
            category.survival_fraction() * 100.0,
            category.surviving_weighted,
            category.initial_weighted
        );
    }

    let (initial_bg, surviving_bg) = total_background(&survival, "signal");
    println!(
        "\nTotal weighted background: {:.4} -> {:.4}",
        initial_bg, surviving_bg
    );
    println!(
        "Generations run: {}, restarts: {}",
        result.total_generations, result.restarts
    );
}
