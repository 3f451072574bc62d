pub mod engine;
pub mod hall_of_fame;
pub mod individual;
pub mod island;
pub mod migration;
pub mod operators;
pub mod seeding;
pub mod sharing;

pub use engine::{IslandModelEngine, OptimizationResult};
pub use hall_of_fame::HallOfFame;
pub use individual::Individual;
pub use island::{BlockReport, Island, IslandState};
