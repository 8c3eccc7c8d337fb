//! Image catalog: the folder of images being captioned and the current
//! selection.
//!
//! Each image may have a sibling caption file with the same stem and a
//! `.txt` extension. The session reads the selected entry's caption when
//! the selection changes and writes an updated collection back after a
//! successful save.

use crate::config::Config;
use crate::error::{CaptionError, Result};
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// One image and its stored caption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageEntry {
    pub filename: String,
    #[serde(default)]
    pub caption: String,
}

/// The files collection plus its count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptionFiles {
    pub files: Vec<ImageEntry>,
    pub total: usize,
}

impl CaptionFiles {
    pub fn new(files: Vec<ImageEntry>) -> Self {
        let total = files.len();
        Self { files, total }
    }
}

/// Images in one folder and which of them is selected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageCatalog {
    /// The folder as given by the user.
    pub path: String,
    pub files: CaptionFiles,
    pub selected_image_index: usize,
}

impl ImageCatalog {
    /// Build a catalog from an in-memory list.
    pub fn new(path: impl Into<String>, files: Vec<ImageEntry>) -> Self {
        Self {
            path: path.into(),
            files: CaptionFiles::new(files),
            selected_image_index: 0,
        }
    }

    /// Scan `folder` for images matching the configured extensions.
    ///
    /// Entries are sorted by filename. Existing caption files are read; a
    /// caption file that cannot be read as UTF-8 is treated as absent. The
    /// catalog path is always absolute.
    pub fn scan<P: AsRef<Path>>(folder: P, config: &Config) -> Result<Self> {
        let folder = std::path::absolute(folder.as_ref()).map_err(|e| {
            CaptionError::UserError(format!(
                "failed to resolve image folder '{}': {}",
                folder.as_ref().display(),
                e
            ))
        })?;
        let folder = folder.as_path();
        let matcher = image_matcher(&config.image_extensions)?;

        let entries = fs::read_dir(folder).map_err(|e| {
            CaptionError::UserError(format!(
                "failed to read image folder '{}': {}",
                folder.display(),
                e
            ))
        })?;

        let mut files = Vec::new();
        for entry in entries.filter_map(|e| e.ok()) {
            let is_file = entry.file_type().map(|t| t.is_file()).unwrap_or(false);
            let name = entry.file_name().to_string_lossy().to_string();
            if !is_file || !matcher.is_match(&name) {
                continue;
            }

            let caption = fs::read_to_string(caption_file_for(&entry.path())).unwrap_or_default();
            files.push(ImageEntry {
                filename: name,
                caption,
            });
        }
        files.sort_by(|a, b| a.filename.cmp(&b.filename));

        Ok(Self::new(folder.to_string_lossy(), files))
    }

    pub fn entries(&self) -> &[ImageEntry] {
        &self.files.files
    }

    pub fn is_empty(&self) -> bool {
        self.files.files.is_empty()
    }

    /// Select the image at `index`.
    pub fn select(&mut self, index: usize) -> Result<&ImageEntry> {
        let total = self.files.files.len();
        if index >= total {
            return Err(CaptionError::UserError(format!(
                "image index {} is out of range ({} image(s) in '{}')",
                index, total, self.path
            )));
        }
        self.selected_image_index = index;
        Ok(&self.files.files[index])
    }

    /// The selected image, if the catalog is not empty.
    pub fn selected(&self) -> Option<&ImageEntry> {
        self.files.files.get(self.selected_image_index)
    }

    /// A copy of the files collection with one caption replaced.
    pub fn with_caption(&self, index: usize, caption: &str) -> CaptionFiles {
        let files = self
            .files
            .files
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                if i == index {
                    ImageEntry {
                        filename: entry.filename.clone(),
                        caption: caption.to_string(),
                    }
                } else {
                    entry.clone()
                }
            })
            .collect();
        CaptionFiles::new(files)
    }

    /// Replace the files collection.
    pub fn set_files(&mut self, updated: CaptionFiles) {
        self.files = CaptionFiles::new(updated.files);
    }
}

fn image_matcher(extensions: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for ext in extensions {
        let glob = GlobBuilder::new(&format!("*.{}", ext))
            .case_insensitive(true)
            .literal_separator(true)
            .build()
            .map_err(|e| {
                CaptionError::UserError(format!("invalid image extension '{}': {}", ext, e))
            })?;
        builder.add(glob);
    }
    builder
        .build()
        .map_err(|e| CaptionError::UserError(format!("failed to build image matcher: {}", e)))
}

fn caption_file_for(image: &Path) -> PathBuf {
    image.with_extension("txt")
}
