use crate::engines::evaluation::{total_background, CategorySurvival};
use crate::error::{CutoptError, Result};
use chrono::Local;
use std::fs;
use std::path::Path;
use std::time::Duration;

fn write_file(path: &Path, contents: String) -> Result<()> {
    fs::write(path, contents)
        .map_err(|e| CutoptError::Report(format!("Failed to write {}: {}", path.display(), e)))
}

/// Everything the text report needs about a finished run.
pub struct RunSummary<'a> {
    pub best_significance: f64,
    pub columns: &'a [String],
    pub best_thresholds: &'a [f64],
    pub survival: &'a [CategorySurvival],
    pub signal_name: &'a str,
    pub total_generations: usize,
    pub restarts: usize,
    pub execution_time: Duration,
}

/// Human-readable results file: best significance, optimal thresholds,
/// per-category event survival, total background and timing.
pub fn write_summary(path: &Path, summary: &RunSummary) -> Result<()> {
    write_file(path, render_summary(summary))
}

fn render_summary(summary: &RunSummary) -> String {
    let mut out = String::new();
    out.push_str("=== GENETIC ALGORITHM RESULTS ===\n");
    out.push_str(&format!(
        "Generated: {}\n\n",
        Local::now().format("%Y-%m-%d %H:%M:%S")
    ));
    out.push_str(&format!(
        "Best Significance: {:.6}\n\n",
        summary.best_significance
    ));

    out.push_str("Optimal Thresholds:\n");
    for (column, threshold) in summary.columns.iter().zip(summary.best_thresholds) {
        out.push_str(&format!("{}: {:.6}\n", column, threshold));
    }

    out.push_str("\nEvent Statistics:\n");
    for category in summary.survival {
        out.push_str(&format!("\n{}:\n", category.category));
        out.push_str(&format!("  Initial events: {}\n", category.initial_events));
        out.push_str(&format!(
            "  Surviving events: {} ({:.2}%)\n",
            category.surviving_events,
            category.survival_fraction() * 100.0
        ));
        out.push_str(&format!(
            "  Initial weighted: {:.6}\n",
            category.initial_weighted
        ));
        out.push_str(&format!(
            "  Surviving weighted: {:.6} ({:.2}%)\n",
            category.surviving_weighted,
            category.weighted_survival_fraction() * 100.0
        ));
    }

    let (initial_bg, surviving_bg) = total_background(summary.survival, summary.signal_name);
    out.push_str("\nTotal Background:\n");
    out.push_str(&format!("  Initial weighted: {:.6}\n", initial_bg));
    let bg_fraction = if initial_bg > 0.0 {
        surviving_bg / initial_bg * 100.0
    } else {
        0.0
    };
    out.push_str(&format!(
        "  Surviving weighted: {:.6} ({:.2}%)\n",
        surviving_bg, bg_fraction
    ));

    out.push_str(&format!(
        "\nTotal generations: {}\n",
        summary.total_generations
    ));
    out.push_str(&format!("Partial restarts: {}\n", summary.restarts));
    out.push_str(&format!(
        "Execution time: {}\n",
        format_duration(summary.execution_time)
    ));
    out
}

/// One header row of score column names, one row of optimal thresholds.
pub fn write_thresholds_csv(path: &Path, columns: &[String], thresholds: &[f64]) -> Result<()> {
    let mut out = String::new();
    out.push_str(&columns.join(","));
    out.push('\n');
    let row: Vec<String> = thresholds.iter().map(|t| format!("{:.6}", t)).collect();
    out.push_str(&row.join(","));
    out.push('\n');
    write_file(path, out)
}

/// Per-category survival table, one row per category, signal first.
pub fn write_survival_csv(path: &Path, survival: &[CategorySurvival]) -> Result<()> {
    let mut out = String::from(
        "category,initial_events,surviving_events,initial_weighted,surviving_weighted\n",
    );
    for category in survival {
        out.push_str(&format!(
            "{},{},{},{:.6},{:.6}\n",
            category.category,
            category.initial_events,
            category.surviving_events,
            category.initial_weighted,
            category.surviving_weighted
        ));
    }
    write_file(path, out)
}

fn format_duration(elapsed: Duration) -> String {
    let total = elapsed.as_secs_f64();
    let hours = (total / 3600.0) as u64;
    let minutes = ((total % 3600.0) / 60.0) as u64;
    let seconds = total % 60.0;
    format!("{}h {}m {:.2}s", hours, minutes, seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn survival() -> Vec<CategorySurvival> {
        vec![
            CategorySurvival {
                category: "signal".into(),
                initial_events: 100,
                surviving_events: 80,
                initial_weighted: 50.0,
                surviving_weighted: 40.0,
            },
            CategorySurvival {
                category: "Bqq".into(),
                initial_events: 200,
                surviving_events: 10,
                initial_weighted: 400.0,
                surviving_weighted: 20.0,
            },
        ]
    }

    #[test]
    fn summary_lists_thresholds_and_background_totals() {
        let columns = vec!["bdt_a".to_string(), "bdt_b".to_string()];
        let thresholds = [0.512345, 0.7];
        let stats = survival();
        let text = render_summary(&RunSummary {
            best_significance: 5.163978,
            columns: &columns,
            best_thresholds: &thresholds,
            survival: &stats,
            signal_name: "signal",
            total_generations: 200,
            restarts: 1,
            execution_time: Duration::from_secs(3725),
        });

        assert!(text.contains("Best Significance: 5.163978"));
        assert!(text.contains("bdt_a: 0.512345"));
        assert!(text.contains("Surviving events: 80 (80.00%)"));
        assert!(text.contains("Initial weighted: 400.000000"));
        assert!(text.contains("Surviving weighted: 20.000000 (5.00%)"));
        assert!(text.contains("Execution time: 1h 2m 5.00s"));
    }

    #[test]
    fn thresholds_csv_has_header_and_one_row() {
        let dir = std::env::temp_dir().join("cutopt_report_test");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("optimal_thresholds.csv");

        let columns = vec!["bdt_a".to_string(), "bdt_b".to_string()];
        write_thresholds_csv(&path, &columns, &[0.25, 0.75]).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, "bdt_a,bdt_b\n0.250000,0.750000\n");
    }

    #[test]
    fn survival_csv_keeps_category_order() {
        let dir = std::env::temp_dir().join("cutopt_report_test");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("survival.csv");

        write_survival_csv(&path, &survival()).unwrap();
        let written = fs::read_to_string(&path).unwrap();
        let mut lines = written.lines();
        assert_eq!(
            lines.next().unwrap(),
            "category,initial_events,surviving_events,initial_weighted,surviving_weighted"
        );
        assert!(lines.next().unwrap().starts_with("signal,100,80,"));
        assert!(lines.next().unwrap().starts_with("Bqq,200,10,"));
    }

    #[test]
    fn duration_formatting_rolls_over_units() {
        assert_eq!(format_duration(Duration::from_secs(59)), "0h 0m 59.00s");
        assert_eq!(format_duration(Duration::from_secs(3600)), "1h 0m 0.00s");
        assert_eq!(format_duration(Duration::from_millis(90_500)), "0h 1m 30.50s");
    }
}
