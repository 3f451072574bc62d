use super::traits::ConfigSection;
use crate::error::CutoptError;
use serde::{Deserialize, Serialize};

/// Per-island evolutionary parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionConfig {
    /// Individuals per island (constant across generations).
    pub island_size: usize,
    /// Generations per migration block.
    pub generations_per_cycle: usize,
    pub crossover_rate: f64,
    pub mutation_rate: f64,
    /// Base std of the Gaussian mutation noise, annealed per generation.
    pub mutation_sigma: f64,
    /// Base per-coordinate mutation probability, annealed per generation.
    pub mutation_indpb: f64,
    pub elite_count: usize,
    pub tournament_size: usize,
    /// Niche radius in threshold space for fitness sharing.
    pub sharing_radius: f64,
    /// Fitness sharing runs every this many generations.
    pub sharing_interval: usize,
    /// Trailing window without improvement that triggers a partial restart.
    pub stagnation_window: usize,
    /// Fraction of the population replaced by fresh individuals on restart.
    pub restart_fraction: f64,
    /// Mutation rate for the remainder of a block after a restart.
    pub restart_mutation_rate: f64,
    pub early_stop_patience: usize,
    pub early_stop_threshold: f64,
    /// Base RNG seed; islands derive their own seeds from it.
    pub seed: Option<u64>,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            island_size: 100,
            generations_per_cycle: 40,
            crossover_rate: 0.7,
            mutation_rate: 0.3,
            mutation_sigma: 0.4,
            mutation_indpb: 0.4,
            elite_count: 15,
            tournament_size: 7,
            sharing_radius: 0.1,
            sharing_interval: 5,
            stagnation_window: 15,
            restart_fraction: 0.7,
            restart_mutation_rate: 0.5,
            early_stop_patience: 20,
            early_stop_threshold: 0.001,
            seed: None,
        }
    }
}

impl ConfigSection for EvolutionConfig {
    fn section_name() -> &'static str {
        "evolution"
    }

    fn validate(&self) -> Result<(), CutoptError> {
        if self.island_size < 2 {
            return Err(CutoptError::Configuration(
                "Island size must be at least 2".to_string(),
            ));
        }
        if self.elite_count >= self.island_size {
            return Err(CutoptError::Configuration(format!(
                "Elite count ({}) must be smaller than the island size ({})",
                self.elite_count, self.island_size
            )));
        }
        if self.generations_per_cycle == 0 {
            return Err(CutoptError::Configuration(
                "Generations per cycle must be at least 1".to_string(),
            ));
        }
        for (name, rate) in [
            ("Crossover rate", self.crossover_rate),
            ("Mutation rate", self.mutation_rate),
            ("Restart mutation rate", self.restart_mutation_rate),
        ] {
            if !(0.0..=1.0).contains(&rate) {
                return Err(CutoptError::Configuration(format!(
                    "{} must be between 0 and 1",
                    name
                )));
            }
        }
        if self.mutation_sigma <= 0.0 || self.mutation_indpb <= 0.0 {
            return Err(CutoptError::Configuration(
                "Mutation sigma and indpb must be positive".to_string(),
            ));
        }
        if self.tournament_size == 0 {
            return Err(CutoptError::Configuration(
                "Tournament size must be at least 1".to_string(),
            ));
        }
        if self.sharing_radius <= 0.0 {
            return Err(CutoptError::Configuration(
                "Sharing radius must be positive".to_string(),
            ));
        }
        if self.sharing_interval == 0 {
            return Err(CutoptError::Configuration(
                "Sharing interval must be at least 1".to_string(),
            ));
        }
        if self.stagnation_window == 0 {
            return Err(CutoptError::Configuration(
                "Stagnation window must be at least 1".to_string(),
            ));
        }
        if !(0.0..1.0).contains(&self.restart_fraction) || self.restart_fraction == 0.0 {
            return Err(CutoptError::Configuration(
                "Restart fraction must be strictly between 0 and 1".to_string(),
            ));
        }
        if self.early_stop_threshold < 0.0 {
            return Err(CutoptError::Configuration(
                "Early-stop threshold must be non-negative".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(EvolutionConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_elite_count_at_island_size() {
        let config = EvolutionConfig {
            island_size: 15,
            elite_count: 15,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_out_of_range_rates() {
        let config = EvolutionConfig {
            mutation_rate: 1.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
