//! Pipeline configuration.
//!
//! Configuration is always per-call: the CLI loads a `PipelineConfig` from a
//! TOML file (or falls back to defaults) and hands it to the library. Nothing
//! here is global state.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::detect::engine::DetectionOptions;
use crate::fusion::FusionOptions;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub detection: DetectionOptions,
    pub fusion: FusionOptions,
}

impl PipelineConfig {
    /// Load configuration from a TOML file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("failed to parse config file: {}", path.display()))?;
        info!(path = %path.display(), "loaded pipeline configuration");
        Ok(config)
    }

    /// Load from `path` when given, warning and falling back to defaults if
    /// the file cannot be loaded.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        match path {
            Some(path) => match Self::load(path) {
                Ok(config) => config,
                Err(e) => {
                    warn!(
                        path = %path.display(),
                        error = %e,
                        "config file could not be loaded, using defaults"
                    );
                    Self::default()
                }
            },
            None => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.detection.numeric.z_score_threshold, 2.5);
        assert_eq!(config.detection.numeric.mad_threshold, 3.5);
        assert!(config.detection.keyword.keywords.is_empty());
        assert_eq!(config.detection.keyword.surge_factor, 2.0);
        assert_eq!(config.fusion.window_minutes, 5);
        assert_eq!(config.fusion.prior, 0.2);
    }

    #[test]
    fn test_load_partial_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[detection.numeric]
z_score_threshold = 1.5

[detection.keyword]
keywords = ["jamming", "interference"]
surge_factor = 1.2

[fusion]
prior = 0.25
"#
        )
        .unwrap();

        let config = PipelineConfig::load(file.path()).unwrap();
        assert_eq!(config.detection.numeric.z_score_threshold, 1.5);
        // Unspecified fields keep their defaults.
        assert_eq!(config.detection.numeric.mad_threshold, 3.5);
        assert_eq!(config.detection.keyword.keywords.len(), 2);
        assert_eq!(config.fusion.prior, 0.25);
        assert_eq!(config.fusion.window_minutes, 5);
    }

    #[test]
    fn test_load_or_default_with_missing_file() {
        let config = PipelineConfig::load_or_default(Some(Path::new("/nonexistent/config.toml")));
        assert_eq!(config.fusion.window_minutes, 5);
    }

    #[test]
    fn test_load_rejects_invalid_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "not valid toml [").unwrap();
        assert!(PipelineConfig::load(file.path()).is_err());
    }
}
