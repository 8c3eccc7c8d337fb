//! Config struct definition and default implementation.

use super::types::*;
use serde::{Deserialize, Serialize};

/// Configuration for captioner, read from `captioner.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Endpoint receiving `{filename, caption}` POSTs when `store` is `http`.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Where saved captions go.
    #[serde(default)]
    pub store: StoreKind,

    /// Separator joining the image folder and the caption filename.
    #[serde(default)]
    pub path_separator: PathSeparator,

    /// Extensions (no leading dots) treated as images when scanning a folder.
    #[serde(default = "default_image_extensions")]
    pub image_extensions: Vec<String>,

    /// Whether session events are appended to the event log.
    #[serde(default = "default_true")]
    pub event_log: bool,

    /// Event log directory, relative to the image folder.
    #[serde(default = "default_event_log_dir")]
    pub event_log_dir: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            store: StoreKind::default(),
            path_separator: PathSeparator::default(),
            image_extensions: default_image_extensions(),
            event_log: default_true(),
            event_log_dir: default_event_log_dir(),
        }
    }
}
