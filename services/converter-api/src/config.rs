//! Service configuration loading.

use std::path::Path;

use anyhow::{Context, Result};
use overlay_common::ConversionDefaults;
use serde::{Deserialize, Serialize};

const DEFAULT_MAX_UPLOAD_MB: usize = 64;

/// Service configuration, optionally loaded from a YAML file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Overrides for conversion constants.
    #[serde(default)]
    pub conversion: ConversionDefaults,

    /// Maximum multipart request size in megabytes.
    #[serde(default = "default_max_upload_mb")]
    pub max_upload_mb: usize,
}

fn default_max_upload_mb() -> usize {
    DEFAULT_MAX_UPLOAD_MB
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            conversion: ConversionDefaults::default(),
            max_upload_mb: DEFAULT_MAX_UPLOAD_MB,
        }
    }
}

impl ServiceConfig {
    /// Load configuration from a YAML file.
    ///
    /// A missing file falls back to defaults with a warning; a file that
    /// exists but does not parse is an error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::warn!(
                "Converter config {:?} does not exist, using defaults",
                path
            );
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read: {:?}", path))?;
        let config: ServiceConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse converter config: {:?}", path))?;

        tracing::info!(
            max_upload_mb = config.max_upload_mb,
            final_end = ?config.conversion.final_end,
            "Loaded converter config from {:?}",
            path
        );
        Ok(config)
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb.saturating_mul(1024 * 1024)
    }
}
