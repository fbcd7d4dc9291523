// Engine settings, loaded from a JSON file and overridden by command-line flags
use crate::error::{EngineError, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct EngineSettings {
    /// Number of trailing samples fed to the price and volume slope estimators.
    pub slope_window: usize,
    /// Width of one sample on the x-axis; scales reported slopes.
    pub x_step: f64,
    /// When set, the close series is also split into this many chunks.
    pub partitions: Option<usize>,
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings {
            slope_window: 5,
            x_step: 1.0,
            partitions: None,
        }
    }
}

impl EngineSettings {
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let settings: EngineSettings = serde_json::from_str(&raw).map_err(|e| {
            EngineError::ConfigError(format!("Invalid settings file '{}': {}", path.display(), e))
        })?;
        tracing::debug!(path = %path.display(), ?settings, "Loaded engine settings");
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.slope_window < 2 {
            return Err(EngineError::ConfigError(format!(
                "slope_window must be at least 2, got {}",
                self.slope_window
            )));
        }
        if !self.x_step.is_finite() || self.x_step == 0.0 {
            return Err(EngineError::ConfigError(format!(
                "x_step must be a non-zero finite number, got {}",
                self.x_step
            )));
        }
        if self.partitions == Some(0) {
            return Err(EngineError::ConfigError("partitions must be greater than 0".to_string()));
        }
        Ok(())
    }
}
