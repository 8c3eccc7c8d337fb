//! Configuration model for captioner.
//!
//! This module defines the Config struct that represents `captioner.yaml`.
//! Unknown fields are ignored, every field has a default, and values are
//! validated after parsing.

mod model;
mod operations;
pub mod types;

#[cfg(test)]
mod tests;

// Re-export public API
pub use model::Config;
pub use types::{PathSeparator, StoreKind};

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "captioner.yaml";
