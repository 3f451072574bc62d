use super::traits::ConfigSection;
use crate::error::CutoptError;
use serde::{Deserialize, Serialize};

/// Island-model topology and migration parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IslandModelConfig {
    pub n_islands: usize,
    /// Number of generational blocks; migration runs between consecutive blocks.
    pub migration_cycles: usize,
    /// Base fraction of an island exported per migration, before the
    /// diversity adjustment.
    pub base_migration_rate: f64,
    pub min_migration_rate: f64,
    pub max_migration_rate: f64,
}

impl Default for IslandModelConfig {
    fn default() -> Self {
        Self {
            n_islands: 5,
            migration_cycles: 5,
            base_migration_rate: 0.1,
            min_migration_rate: 0.05,
            max_migration_rate: 0.3,
        }
    }
}

impl ConfigSection for IslandModelConfig {
    fn section_name() -> &'static str {
        "islands"
    }

    fn validate(&self) -> Result<(), CutoptError> {
        if self.n_islands == 0 {
            return Err(CutoptError::Configuration(
                "At least one island is required".to_string(),
            ));
        }
        if self.migration_cycles == 0 {
            return Err(CutoptError::Configuration(
                "At least one migration cycle is required".to_string(),
            ));
        }
        if self.base_migration_rate <= 0.0 || self.base_migration_rate > 1.0 {
            return Err(CutoptError::Configuration(
                "Base migration rate must be in (0, 1]".to_string(),
            ));
        }
        if self.min_migration_rate <= 0.0
            || self.min_migration_rate > self.max_migration_rate
            || self.max_migration_rate > 1.0
        {
            return Err(CutoptError::Configuration(
                "Migration rate bounds must satisfy 0 < min <= max <= 1".to_string(),
            ));
        }
        Ok(())
    }
}
