use super::traits::ConfigSection;
use crate::error::FoldcastError;
use serde::{Deserialize, Serialize};

/// Fold-generation settings. Both overrides default to auto-derived
/// values: `num_folds` from the available history, `total_months` from
/// the longest target sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoldConfig {
    pub num_folds: Option<usize>,
    pub total_months: Option<usize>,
    pub obfuscate_names: bool,
}

impl Default for FoldConfig {
    fn default() -> Self {
        Self {
            num_folds: None,
            total_months: None,
            obfuscate_names: false,
        }
    }
}

impl ConfigSection for FoldConfig {
    fn section_name() -> &'static str {
        "folds"
    }

    fn validate(&self) -> Result<(), FoldcastError> {
        if self.num_folds == Some(0) {
            return Err(FoldcastError::Configuration(
                "num_folds override must be a positive integer".to_string(),
            ));
        }
        if self.total_months == Some(0) {
            return Err(FoldcastError::Configuration(
                "total_months override must be a positive integer".to_string(),
            ));
        }
        Ok(())
    }
}
