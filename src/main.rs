use anyhow::Context;
use cutopt::config::AppConfig;
use cutopt::data::{ScoreTableLoader, TableValidator};
use cutopt::engines::evaluation::EvaluationContext;
use cutopt::engines::generation::IslandModelEngine;
use cutopt::report::{self, RunSummary};
use std::time::Instant;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let start = Instant::now();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "cutopt.toml".to_string());
    let config = AppConfig::load_from_file(&config_path)
        .with_context(|| format!("loading configuration from {}", config_path))?;

    log::info!("loading score tables");
    let signal = ScoreTableLoader::load("signal", &config.data.signal_path)?;
    let mut backgrounds = Vec::with_capacity(config.data.backgrounds.len());
    for category in &config.data.backgrounds {
        backgrounds.push(ScoreTableLoader::load(&category.name, &category.path)?);
    }
    TableValidator::validate_consistency(&signal, &backgrounds)?;

    let weighted: Vec<_> = backgrounds
        .into_iter()
        .zip(&config.data.backgrounds)
        .map(|(table, category)| (table, category.weight))
        .collect();
    let ctx = EvaluationContext::new(signal, config.data.signal_weight, weighted)?;

    log::info!(
        "starting island-model optimization: {} islands, {} cycles",
        config.islands.n_islands,
        config.islands.migration_cycles
    );
    let mut engine = IslandModelEngine::new(&ctx, config.evolution, config.islands)?;
    let result = engine.run()?;

    let survival = ctx.survival_statistics(&result.best_thresholds);
    let columns = ctx.columns().to_vec();

    std::fs::create_dir_all(&config.data.output_dir)
        .with_context(|| format!("creating output dir {}", config.data.output_dir.display()))?;
    report::write_summary(
        &config.data.output_dir.join("ga_results.txt"),
        &RunSummary {
            best_significance: result.best_significance,
            columns: &columns,
            best_thresholds: &result.best_thresholds,
            survival: &survival,
            signal_name: ctx.signal().name(),
            total_generations: result.total_generations,
            restarts: result.restarts,
            execution_time: start.elapsed(),
        },
    )?;
    report::write_thresholds_csv(
        &config.data.output_dir.join("optimal_thresholds.csv"),
        &columns,
        &result.best_thresholds,
    )?;
    report::write_survival_csv(
        &config.data.output_dir.join("survival_statistics.csv"),
        &survival,
    )?;

    log::info!(
        "best significance {:.6}, results written to {}",
        result.best_significance,
        config.data.output_dir.display()
    );
    Ok(())
}
