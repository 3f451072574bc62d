use crate::data::{ScoreTable, TableValidator};
use crate::error::{CutoptError, Result};

#[derive(Debug)]
struct WeightedTable {
    table: ScoreTable,
    weight: f64,
}

/// Immutable evaluation context: the validated score tables and their
/// category weights, prepared once and shared by reference across islands
/// and evaluation workers.
///
/// Significance is a pure function of (thresholds, tables, weights), so
/// concurrent calls are safe.
#[derive(Debug)]
pub struct EvaluationContext {
    signal: ScoreTable,
    signal_weight: f64,
    backgrounds: Vec<WeightedTable>,
}

impl EvaluationContext {
    /// Build the context, failing fast on shape mismatches or bad weights.
    pub fn new(
        signal: ScoreTable,
        signal_weight: f64,
        backgrounds: Vec<(ScoreTable, f64)>,
    ) -> Result<Self> {
        let tables: Vec<ScoreTable> = backgrounds.iter().map(|(t, _)| t.clone()).collect();
        TableValidator::validate_consistency(&signal, &tables)?;

        if !(signal_weight.is_finite() && signal_weight >= 0.0) {
            return Err(CutoptError::Validation(
                "Signal weight must be a non-negative number".to_string(),
            ));
        }
        for (table, weight) in &backgrounds {
            if !(weight.is_finite() && *weight >= 0.0) {
                return Err(CutoptError::Validation(format!(
                    "Weight for category '{}' must be a non-negative number",
                    table.name()
                )));
            }
        }

        Ok(Self {
            signal,
            signal_weight,
            backgrounds: backgrounds
                .into_iter()
                .map(|(table, weight)| WeightedTable { table, weight })
                .collect(),
        })
    }

    /// Number of score dimensions D shared by all tables.
    pub fn dimensions(&self) -> usize {
        self.signal.dimensions()
    }

    /// Score column names, in threshold order.
    pub fn columns(&self) -> &[String] {
        self.signal.columns()
    }

    pub fn signal(&self) -> &ScoreTable {
        &self.signal
    }

    pub fn signal_weight(&self) -> f64 {
        self.signal_weight
    }

    pub fn backgrounds(&self) -> impl Iterator<Item = (&ScoreTable, f64)> {
        self.backgrounds.iter().map(|wt| (&wt.table, wt.weight))
    }

    /// Weighted significance s / sqrt(s + b) of a threshold vector, or 0.0
    /// when nothing survives the cuts.
    pub fn significance(&self, thresholds: &[f64]) -> f64 {
        let surviving_signal = self.signal.surviving(thresholds) as f64 * self.signal_weight;

        let mut surviving_background = 0.0;
        for wt in &self.backgrounds {
            surviving_background += wt.table.surviving(thresholds) as f64 * wt.weight;
        }

        let total = surviving_signal + surviving_background;
        if total > 0.0 {
            surviving_signal / total.sqrt()
        } else {
            0.0
        }
    }
}
