//! Caption persistence.
//!
//! A save hands a [`CaptionRecord`] to a [`CaptionStore`]. The record's
//! `filename` is the caption file's full path: the image folder joined with
//! the image filename whose extension is replaced by `.txt`.
//!
//! - **Http**: POSTs the record as JSON to the captions endpoint
//! - **File**: writes the caption file directly (atomic write)

mod file;
mod http;

pub use file::FileCaptionStore;
pub use http::HttpCaptionStore;

use crate::config::{Config, StoreKind};
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Body of a caption save: where the caption goes and what it says.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptionRecord {
    pub filename: String,
    pub caption: String,
}

/// Destination for saved captions.
pub trait CaptionStore {
    /// Store one caption.
    ///
    /// Returns the store's response text (the endpoint body, or a short
    /// confirmation), which callers only log.
    fn persist(&self, record: &CaptionRecord) -> Result<String>;

    /// Human-readable destination, used in log lines.
    fn describe(&self) -> String;
}

/// Build the store selected by the config.
pub fn store_for(config: &Config) -> Result<Box<dyn CaptionStore>> {
    Ok(match config.store {
        StoreKind::Http => Box::new(HttpCaptionStore::new(&config.endpoint)?),
        StoreKind::File => Box::new(FileCaptionStore),
    })
}

/// The caption filename for an image: its final extension becomes `.txt`.
///
/// An extension is the text after the last `.` when that text is non-empty
/// and contains no path separator. Without one, `.txt` is appended.
pub fn caption_filename(image_filename: &str) -> String {
    let stem = match image_filename.rfind('.') {
        Some(dot) => {
            let ext = &image_filename[dot + 1..];
            if ext.is_empty() || ext.contains(['/', '\\']) {
                image_filename
            } else {
                &image_filename[..dot]
            }
        }
        None => image_filename,
    };
    format!("{}.txt", stem)
}

/// Full caption path for an image in `folder`, joined with `separator`.
///
/// An empty folder leaves the caption filename unjoined.
pub fn caption_path(folder: &str, image_filename: &str, separator: char) -> String {
    let filename = caption_filename(image_filename);
    if folder.is_empty() {
        return filename;
    }
    let folder = folder.trim_end_matches(['/', '\\']);
    format!("{}{}{}", folder, separator, filename)
}
