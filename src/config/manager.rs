use super::{folds::FoldConfig, traits::ConfigSection};
use crate::error::FoldcastError;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub folds: FoldConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), FoldcastError> {
        self.folds.validate()?;
        Ok(())
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, FoldcastError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| FoldcastError::Configuration(format!("Failed to read config: {}", e)))?;

        let config: AppConfig = toml::from_str(&contents)
            .map_err(|e| FoldcastError::Configuration(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), FoldcastError> {
        let toml_str = toml::to_string_pretty(self)
            .map_err(|e| FoldcastError::Configuration(format!("Failed to serialize: {}", e)))?;

        std::fs::write(path, toml_str)
            .map_err(|e| FoldcastError::Configuration(format!("Failed to write config: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_toml_section() {
        let config: AppConfig = toml::from_str(
            r#"
            [folds]
            num_folds = 5
            obfuscate_names = true
            "#,
        )
        .unwrap();
        assert_eq!(config.folds.num_folds, Some(5));
        assert_eq!(config.folds.total_months, None);
        assert!(config.folds.obfuscate_names);
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.folds.num_folds, None);
        assert!(!config.folds.obfuscate_names);
    }
}
