//! Session event log.
//!
//! Session actions are appended to `<folder>/<event_log_dir>/events.ndjson`,
//! one JSON object per line:
//!
//! - `ts`: RFC3339 timestamp
//! - `action`: what happened (create_fields, generate_caption, save, ...)
//! - `actor`: `user@HOST`
//! - `image`: the selected image, when the action concerns one
//! - `details`: action-specific object
//!
//! The log is an audit trail, not state: a failed append is reported as a
//! warning and never fails the user's action.

use crate::config::Config;
use crate::error::{CaptionError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Actions that can be logged as events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventAction {
    /// Fields regenerated from the template
    CreateFields,
    /// Caption rendered from the fields
    GenerateCaption,
    /// A different image was selected
    SelectImage,
    /// Caption stored
    Save,
    /// Caption store rejected the save
    SaveFailed,
    /// Session cleared
    Reset,
}

impl std::fmt::Display for EventAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventAction::CreateFields => write!(f, "create_fields"),
            EventAction::GenerateCaption => write!(f, "generate_caption"),
            EventAction::SelectImage => write!(f, "select_image"),
            EventAction::Save => write!(f, "save"),
            EventAction::SaveFailed => write!(f, "save_failed"),
            EventAction::Reset => write!(f, "reset"),
        }
    }
}

/// An event record for the session log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub ts: DateTime<Utc>,
    pub action: EventAction,
    pub actor: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub details: Value,
}

impl Event {
    /// Create a new event stamped with the current time and actor.
    pub fn new(action: EventAction) -> Self {
        Self {
            ts: Utc::now(),
            action,
            actor: get_actor_string(),
            image: None,
            details: Value::Object(serde_json::Map::new()),
        }
    }

    pub fn with_image(mut self, filename: impl Into<String>) -> Self {
        self.image = Some(filename.into());
        self
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = details;
        self
    }

    /// Serialize the event to a single-line JSON string.
    pub fn to_ndjson_line(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| {
            CaptionError::UserError(format!("failed to serialize event to JSON: {}", e))
        })
    }
}

fn get_actor_string() -> String {
    let user = std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown".to_string());

    let host = hostname::get()
        .map(|h| h.to_string_lossy().to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    format!("{}@{}", user, host)
}

/// Append-only event log for one image folder.
#[derive(Debug, Clone)]
pub struct EventLog {
    path: Option<PathBuf>,
}

impl EventLog {
    /// The log for `folder`, or a disabled log when the config turns it off.
    pub fn for_folder<P: AsRef<Path>>(folder: P, config: &Config) -> Self {
        let path = config.event_log.then(|| {
            folder
                .as_ref()
                .join(&config.event_log_dir)
                .join("events.ndjson")
        });
        Self { path }
    }

    /// A log that drops every event.
    pub fn disabled() -> Self {
        Self { path: None }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Append an event, creating the log directory and file as needed.
    pub fn append(&self, event: &Event) -> Result<()> {
        let Some(events_file) = &self.path else {
            return Ok(());
        };

        let json_line = event.to_ndjson_line()?;

        if let Some(events_dir) = events_file.parent()
            && !events_dir.exists()
        {
            fs::create_dir_all(events_dir).map_err(|e| {
                CaptionError::UserError(format!(
                    "failed to create events directory '{}': {}",
                    events_dir.display(),
                    e
                ))
            })?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(events_file)
            .map_err(|e| {
                CaptionError::UserError(format!(
                    "failed to open events file '{}': {}",
                    events_file.display(),
                    e
                ))
            })?;

        writeln!(file, "{}", json_line).map_err(|e| {
            CaptionError::UserError(format!(
                "failed to write event to '{}': {}",
                events_file.display(),
                e
            ))
        })
    }

    /// Append an event, printing a warning instead of failing.
    pub fn record(&self, event: Event) {
        if let Err(e) = self.append(&event) {
            eprintln!("Warning: event '{}' not logged: {}", event.action, e);
        }
    }
}
