pub mod significance;
pub mod statistics;

pub use significance::EvaluationContext;
pub use statistics::{total_background, CategorySurvival};
