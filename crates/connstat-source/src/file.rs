//! Local JSON file record source
//!
//! Reads the same JSON array the HTTP endpoint returns, for offline use or
//! for replaying a saved export.

use async_trait::async_trait;
use connstat_core::{RawRecord, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::record_source::{RecordSource, decode_records};

/// Reads records from a JSON file on disk
pub struct FileRecordSource {
    path: PathBuf,
}

impl FileRecordSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl RecordSource for FileRecordSource {
    async fn fetch(&self) -> Result<Vec<RawRecord>> {
        debug!("Reading records from {}", self.path.display());
        let content = tokio::fs::read_to_string(&self.path).await?;
        let payload: serde_json::Value = serde_json::from_str(&content)?;
        decode_records(payload)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use connstat_core::ConnstatError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_reads_json_array() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"day":"2024-01-05","hour":1,"connections":5}},{{"day":"2024-01-20","hour":2,"connections":7}}]"#
        )
        .unwrap();

        let records = FileRecordSource::new(file.path()).fetch().await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1], RawRecord::new("2024-01-20", 2.0, 7.0));
    }

    #[tokio::test]
    async fn test_bad_record_does_not_drop_the_rest() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"day":"2024-01-05","hour":1,"connections":5}},{{"day":"2024-01-06","hour":null,"connections":7}},{{"connections":9}}]"#
        )
        .unwrap();

        let records = FileRecordSource::new(file.path()).fetch().await.unwrap();
        assert_eq!(
            records,
            vec![
                RawRecord::new("2024-01-05", 1.0, 5.0),
                RawRecord::new("2024-01-06", 0.0, 7.0),
            ]
        );
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileRecordSource::new(dir.path().join("absent.json"));
        assert!(matches!(source.fetch().await, Err(ConnstatError::Io(_))));
    }

    #[tokio::test]
    async fn test_malformed_file_is_json_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{\"not\": \"an array\"}}").unwrap();

        let source = FileRecordSource::new(file.path());
        assert!(matches!(source.fetch().await, Err(ConnstatError::Json(_))));
    }
}
