pub mod loader;
pub mod score_table;
pub mod validator;

pub use loader::ScoreTableLoader;
pub use score_table::ScoreTable;
pub use validator::TableValidator;
