use super::score_table::ScoreTable;
use crate::error::{CutoptError, Result};
use polars::prelude::*;
use std::path::Path;

pub struct ScoreTableLoader;

impl ScoreTableLoader {
    /// Load a CSV of classifier scores into a ScoreTable.
    pub fn load<P: AsRef<Path>>(name: &str, path: P) -> Result<ScoreTable> {
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .try_into_reader_with_file_path(Some(path.as_ref().to_path_buf()))?
            .finish()
            .map_err(|e| {
                CutoptError::DataLoading(format!(
                    "Failed to read CSV {}: {}",
                    path.as_ref().display(),
                    e
                ))
            })?;

        log::debug!(
            "loaded table '{}' from {}: {} rows x {} columns",
            name,
            path.as_ref().display(),
            df.height(),
            df.width()
        );

        Self::from_dataframe(name, &df)
    }

    /// Convert a DataFrame into a row-major score matrix, rejecting
    /// non-numeric columns and null entries.
    pub fn from_dataframe(name: &str, df: &DataFrame) -> Result<ScoreTable> {
        if df.height() == 0 {
            return Err(CutoptError::DataLoading(format!(
                "Score table '{}' is empty",
                name
            )));
        }

        let columns: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();

        let mut column_data: Vec<Vec<f64>> = Vec::with_capacity(df.width());
        for col_name in df.get_column_names() {
            let series = df.column(col_name)?.cast(&DataType::Float64).map_err(|_| {
                CutoptError::DataLoading(format!(
                    "Column '{}' in table '{}' is not numeric",
                    col_name, name
                ))
            })?;
            let values = series.f64()?;
            if values.null_count() > 0 {
                return Err(CutoptError::DataLoading(format!(
                    "Column '{}' in table '{}' contains {} null values",
                    col_name,
                    name,
                    values.null_count()
                )));
            }
            column_data.push(values.into_no_null_iter().collect());
        }

        let rows: Vec<Vec<f64>> = (0..df.height())
            .map(|i| column_data.iter().map(|column| column[i]).collect())
            .collect();

        ScoreTable::new(name, columns, rows)
    }
}
