pub mod data;
pub mod evolution;
pub mod islands;
pub mod manager;
pub mod traits;

pub use data::{CategoryConfig, DataConfig};
pub use evolution::EvolutionConfig;
pub use islands::IslandModelConfig;
pub use manager::AppConfig;
pub use traits::ConfigSection;
