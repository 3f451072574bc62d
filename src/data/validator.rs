use super::score_table::ScoreTable;
use crate::error::{CutoptError, Result};

pub struct TableValidator;

impl TableValidator {
    /// Every table must carry the same score columns in the same order.
    /// Runs before any island is created; a mismatch is fatal.
    pub fn validate_consistency(signal: &ScoreTable, backgrounds: &[ScoreTable]) -> Result<()> {
        if backgrounds.is_empty() {
            return Err(CutoptError::Validation(
                "At least one background table is required".to_string(),
            ));
        }
        for background in backgrounds {
            if background.columns() != signal.columns() {
                return Err(CutoptError::Validation(format!(
                    "Score columns of '{}' ({:?}) do not match signal columns ({:?})",
                    background.name(),
                    background.columns(),
                    signal.columns()
                )));
            }
        }
        Ok(())
    }
}
