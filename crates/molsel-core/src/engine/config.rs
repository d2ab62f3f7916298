use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

pub const DEFAULT_SELECTION_NAME: &str = "selection";
pub const DEFAULT_SPATIAL_INDEX_THRESHOLD: usize = 64;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
}

/// Settings for the selection entry points.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct EngineConfig {
    /// Name given to selections built from a query.
    pub selection_name: String,
    /// Reference-set size at which `around` switches from brute force to a k-d tree.
    pub spatial_index_threshold: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            selection_name: DEFAULT_SELECTION_NAME.to_string(),
            spatial_index_threshold: DEFAULT_SPATIAL_INDEX_THRESHOLD,
        }
    }
}

impl EngineConfig {
    /// Reads a config from a TOML file. Missing keys take their default value.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        let config: EngineConfig = toml::from_str(&content).map_err(|e| ConfigError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.selection_name.trim().is_empty() {
            return Err(ConfigError::InvalidParameter {
                name: "selection_name",
                reason: "must not be empty".to_string(),
            });
        }
        if self.spatial_index_threshold == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "spatial_index_threshold",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct EngineConfigBuilder {
    selection_name: Option<String>,
    spatial_index_threshold: Option<usize>,
}

impl EngineConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection_name(mut self, name: &str) -> Self {
        self.selection_name = Some(name.to_string());
        self
    }
    pub fn spatial_index_threshold(mut self, threshold: usize) -> Self {
        self.spatial_index_threshold = Some(threshold);
        self
    }

    pub fn build(self) -> Result<EngineConfig, ConfigError> {
        let config = EngineConfig {
            selection_name: self
                .selection_name
                .unwrap_or_else(|| DEFAULT_SELECTION_NAME.to_string()),
            spatial_index_threshold: self
                .spatial_index_threshold
                .unwrap_or(DEFAULT_SPATIAL_INDEX_THRESHOLD),
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn builder_fills_defaults() {
        let config = EngineConfigBuilder::new().build().unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.selection_name, "selection");
        assert_eq!(config.spatial_index_threshold, 64);
    }

    #[test]
    fn builder_applies_overrides() {
        let config = EngineConfigBuilder::new()
            .selection_name("pocket")
            .spatial_index_threshold(8)
            .build()
            .unwrap();
        assert_eq!(config.selection_name, "pocket");
        assert_eq!(config.spatial_index_threshold, 8);
    }

    #[test]
    fn builder_rejects_invalid_values() {
        let result = EngineConfigBuilder::new().spatial_index_threshold(0).build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidParameter {
                name: "spatial_index_threshold",
                ..
            })
        ));
        let result = EngineConfigBuilder::new().selection_name("  ").build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidParameter {
                name: "selection_name",
                ..
            })
        ));
    }

    #[test]
    fn load_reads_kebab_case_keys_and_defaults_the_rest() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("engine.toml");
        fs::write(&file_path, "spatial-index-threshold = 16\n").unwrap();

        let config = EngineConfig::load(&file_path).unwrap();
        assert_eq!(config.spatial_index_threshold, 16);
        assert_eq!(config.selection_name, "selection");
    }

    #[test]
    fn load_fails_for_missing_file() {
        let dir = tempdir().unwrap();
        let result = EngineConfig::load(&dir.path().join("missing.toml"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn load_rejects_unknown_keys() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("engine.toml");
        fs::write(&file_path, "selection-name = \"site\"\ncutoff = 3.0\n").unwrap();
        assert!(matches!(
            EngineConfig::load(&file_path),
            Err(ConfigError::Toml { .. })
        ));
    }

    #[test]
    fn load_validates_values() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("engine.toml");
        fs::write(&file_path, "spatial-index-threshold = 0\n").unwrap();
        assert!(matches!(
            EngineConfig::load(&file_path),
            Err(ConfigError::InvalidParameter { .. })
        ));
    }
}
