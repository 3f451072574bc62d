use super::{
    data::DataConfig, evolution::EvolutionConfig, islands::IslandModelConfig,
    traits::ConfigSection,
};
use crate::error::CutoptError;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub evolution: EvolutionConfig,
    #[serde(default)]
    pub islands: IslandModelConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), CutoptError> {
        self.data.validate()?;
        self.evolution.validate()?;
        self.islands.validate()?;
        Ok(())
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, CutoptError> {
        let contents = std::fs::read_to_string(&path).map_err(|e| {
            CutoptError::Configuration(format!(
                "Failed to read config {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        let config: AppConfig = toml::from_str(&contents)
            .map_err(|e| CutoptError::Configuration(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), CutoptError> {
        let toml_str = toml::to_string_pretty(self)
            .map_err(|e| CutoptError::Configuration(format!("Failed to serialize: {}", e)))?;

        std::fs::write(path, toml_str)
            .map_err(|e| CutoptError::Configuration(format!("Failed to write config: {}", e)))?;

        Ok(())
    }
}
