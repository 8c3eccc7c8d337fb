//! Config loading, validation, and utility operations.

use super::DEFAULT_CONFIG_FILE;
use super::model::Config;
use super::types::StoreKind;
use crate::error::{CaptionError, Result};
use std::path::Path;

impl Config {
    /// Load config from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            CaptionError::UserError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Resolve the config for a run.
    ///
    /// An explicit path must exist. Without one, `captioner.yaml` in the
    /// working directory is used when present, otherwise the defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_FILE);
                if fallback.is_file() {
                    Self::load(fallback)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Parse config from a YAML string.
    ///
    /// Unknown fields in the YAML are silently ignored.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)
            .map_err(|e| CaptionError::UserError(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Serialize config to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| {
            CaptionError::UserError(format!("failed to serialize config to YAML: {}", e))
        })
    }

    /// Validate config values.
    ///
    /// Validation rules:
    /// - `endpoint` must be non-empty when `store` is `http`
    /// - `image_extensions` must be non-empty, with non-empty entries and no leading dots
    /// - `event_log_dir` must be non-empty when `event_log` is enabled
    pub fn validate(&self) -> Result<()> {
        if self.store == StoreKind::Http && self.endpoint.trim().is_empty() {
            return Err(CaptionError::UserError(
                "config validation failed: endpoint must be set when store is 'http'".to_string(),
            ));
        }

        if self.image_extensions.is_empty() {
            return Err(CaptionError::UserError(
                "config validation failed: image_extensions must list at least one extension"
                    .to_string(),
            ));
        }

        for ext in &self.image_extensions {
            if ext.is_empty() {
                return Err(CaptionError::UserError(
                    "config validation failed: image_extensions entries must be non-empty"
                        .to_string(),
                ));
            }
            if ext.starts_with('.') {
                return Err(CaptionError::UserError(format!(
                    "config validation failed: image_extensions entries must not have leading dots (found '{}'). Use '{}' instead.",
                    ext,
                    ext.trim_start_matches('.')
                )));
            }
        }

        if self.event_log && self.event_log_dir.trim().is_empty() {
            return Err(CaptionError::UserError(
                "config validation failed: event_log_dir must be set when event_log is enabled"
                    .to_string(),
            ));
        }

        Ok(())
    }

    /// The separator character for caption paths.
    pub fn separator(&self) -> char {
        self.path_separator.as_char()
    }
}
