use crate::error::{CutoptError, Result};

/// A named table of classifier scores: one row per event, one column per
/// score dimension, every value in [0, 1].
#[derive(Debug, Clone)]
pub struct ScoreTable {
    name: String,
    columns: Vec<String>,
    rows: Vec<Vec<f64>>,
}

impl ScoreTable {
    pub fn new(name: &str, columns: Vec<String>, rows: Vec<Vec<f64>>) -> Result<Self> {
        if columns.is_empty() {
            return Err(CutoptError::Validation(format!(
                "Score table '{}' has no columns",
                name
            )));
        }
        if rows.is_empty() {
            return Err(CutoptError::Validation(format!(
                "Score table '{}' has no rows",
                name
            )));
        }
        for (i, row) in rows.iter().enumerate() {
            if row.len() != columns.len() {
                return Err(CutoptError::Validation(format!(
                    "Score table '{}': row {} has {} values, expected {}",
                    name,
                    i,
                    row.len(),
                    columns.len()
                )));
            }
            for (value, column) in row.iter().zip(&columns) {
                if !value.is_finite() || !(0.0..=1.0).contains(value) {
                    return Err(CutoptError::Validation(format!(
                        "Score table '{}': column '{}' row {} holds {} outside [0, 1]",
                        name, column, i, value
                    )));
                }
            }
        }
        Ok(Self {
            name: name.to_string(),
            columns,
            rows,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of score dimensions D.
    pub fn dimensions(&self) -> usize {
        self.columns.len()
    }

    /// Number of events.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Count of events whose scores strictly exceed every threshold.
    pub fn surviving(&self, thresholds: &[f64]) -> usize {
        debug_assert_eq!(thresholds.len(), self.dimensions());
        self.rows
            .iter()
            .filter(|row| row.iter().zip(thresholds).all(|(score, t)| score > t))
            .count()
    }

    pub fn column_mean(&self, dim: usize) -> f64 {
        let sum: f64 = self.rows.iter().map(|row| row[dim]).sum();
        sum / self.rows.len() as f64
    }

    pub fn column_std(&self, dim: usize) -> f64 {
        let mean = self.column_mean(dim);
        let variance: f64 = self
            .rows
            .iter()
            .map(|row| (row[dim] - mean).powi(2))
            .sum::<f64>()
            / self.rows.len() as f64;
        variance.sqrt()
    }

    /// Linearly interpolated percentile of one score column.
    pub fn column_percentile(&self, dim: usize, percentile: f64) -> f64 {
        let mut values: Vec<f64> = self.rows.iter().map(|row| row[dim]).collect();
        values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let rank = percentile / 100.0 * (values.len() - 1) as f64;
        let low = rank.floor() as usize;
        let high = rank.ceil() as usize;
        if low == high {
            values[low]
        } else {
            values[low] + (rank - low as f64) * (values[high] - values[low])
        }
    }
}
