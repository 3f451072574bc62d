use super::traits::ConfigSection;
use crate::error::CutoptError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One background category: a score table on disk plus its event weight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryConfig {
    pub name: String,
    pub path: PathBuf,
    pub weight: f64,
}

/// Input tables, category weights and output location.
///
/// Weights are explicit run parameters here; the category->weight mapping is
/// fixed for the whole run and handed to the evaluation context up front.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    pub signal_path: PathBuf,
    pub signal_weight: f64,
    pub backgrounds: Vec<CategoryConfig>,
    pub output_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            signal_path: PathBuf::from("signal_predictions.csv"),
            signal_weight: 1.0,
            backgrounds: Vec::new(),
            output_dir: PathBuf::from("."),
        }
    }
}

impl ConfigSection for DataConfig {
    fn section_name() -> &'static str {
        "data"
    }

    fn validate(&self) -> Result<(), CutoptError> {
        if !(self.signal_weight.is_finite() && self.signal_weight >= 0.0) {
            return Err(CutoptError::Configuration(
                "Signal weight must be a non-negative number".to_string(),
            ));
        }
        if self.backgrounds.is_empty() {
            return Err(CutoptError::Configuration(
                "At least one background category is required".to_string(),
            ));
        }
        for category in &self.backgrounds {
            if category.name.is_empty() || category.name == "signal" {
                return Err(CutoptError::Configuration(format!(
                    "Invalid background category name '{}'",
                    category.name
                )));
            }
            if !(category.weight.is_finite() && category.weight >= 0.0) {
                return Err(CutoptError::Configuration(format!(
                    "Weight for category '{}' must be a non-negative number",
                    category.name
                )));
            }
        }
        let mut names: Vec<&str> = self.backgrounds.iter().map(|c| c.name.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        if names.len() != self.backgrounds.len() {
            return Err(CutoptError::Configuration(
                "Background category names must be unique".to_string(),
            ));
        }
        Ok(())
    }
}
