//! Store captions by writing the caption file directly.

use super::{CaptionRecord, CaptionStore};
use crate::error::{CaptionError, Result};
use crate::fs::atomic_write_file;

/// Writes `record.caption` to `record.filename`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileCaptionStore;

impl CaptionStore for FileCaptionStore {
    fn persist(&self, record: &CaptionRecord) -> Result<String> {
        atomic_write_file(&record.filename, &record.caption).map_err(|e| match e {
            CaptionError::UserError(message) => CaptionError::PersistenceFailure(message),
            other => other,
        })?;
        Ok(format!("wrote {}", record.filename))
    }

    fn describe(&self) -> String {
        "caption files".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_writes_caption_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("cat1.txt");
        let record = CaptionRecord {
            filename: path.to_string_lossy().to_string(),
            caption: "a photo of a cat".to_string(),
        };

        let response = FileCaptionStore.persist(&record).unwrap();

        assert!(response.starts_with("wrote "));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "a photo of a cat");
    }

    #[test]
    fn test_unwritable_target_is_persistence_failure() {
        let temp_dir = TempDir::new().unwrap();
        // A directory where the file should be.
        let path = temp_dir.path().join("cat1.txt");
        std::fs::create_dir(&path).unwrap();
        let record = CaptionRecord {
            filename: path.to_string_lossy().to_string(),
            caption: "x".to_string(),
        };

        let err = FileCaptionStore.persist(&record).unwrap_err();
        assert!(matches!(err, CaptionError::PersistenceFailure(_)));
    }
}
