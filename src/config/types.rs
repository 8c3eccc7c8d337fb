//! Configuration types and defaults for captioner.

use serde::{Deserialize, Serialize};

/// Where saved captions go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StoreKind {
    /// POST the caption record to the configured endpoint (default).
    #[default]
    Http,
    /// Write the caption file directly.
    File,
}

/// Separator used to join the image folder and the caption filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PathSeparator {
    /// The separator of the machine running captioner.
    #[default]
    Host,
    /// Always `\`.
    Windows,
    /// Always `/`.
    Posix,
}

impl PathSeparator {
    pub fn as_char(self) -> char {
        match self {
            PathSeparator::Host => std::path::MAIN_SEPARATOR,
            PathSeparator::Windows => '\\',
            PathSeparator::Posix => '/',
        }
    }
}

pub fn default_endpoint() -> String {
    "http://localhost:3000/api/captions".to_string()
}

pub fn default_image_extensions() -> Vec<String> {
    ["png", "jpg", "jpeg", "webp", "gif", "bmp"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

pub fn default_event_log_dir() -> String {
    ".captioner".to_string()
}

pub fn default_true() -> bool {
    true
}
