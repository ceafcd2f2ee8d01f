// Dataset loading: header-mapped rows as produced by a CSV tokenizer,
// stored as JSON.
use crate::model::{RawRecord, SourceError};
use std::path::{Path, PathBuf};
use tracing::debug;

#[async_trait::async_trait]
pub trait DatasetSource: Send + Sync {
    async fn load(&self) -> Result<Vec<RawRecord>, SourceError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordFormat {
    /// A single JSON array of objects.
    JsonArray,
    /// One JSON object per line; blank lines are skipped.
    JsonLines,
}

impl RecordFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext)
                if ext.eq_ignore_ascii_case("jsonl") || ext.eq_ignore_ascii_case("ndjson") =>
            {
                RecordFormat::JsonLines
            }
            _ => RecordFormat::JsonArray,
        }
    }
}

pub struct JsonFileSource {
    path: PathBuf,
    format: RecordFormat,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let format = RecordFormat::from_path(&path);
        Self { path, format }
    }
}

/// Parses `content` in the given format; `path` is only used in errors.
pub fn parse_records(
    content: &str,
    format: RecordFormat,
    path: &Path,
) -> Result<Vec<RawRecord>, SourceError> {
    match format {
        RecordFormat::JsonArray => {
            serde_json::from_str(content).map_err(|source| SourceError::Format {
                path: path.to_path_buf(),
                source,
            })
        }
        RecordFormat::JsonLines => content
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(index, line)| {
                serde_json::from_str(line).map_err(|source| SourceError::Line {
                    path: path.to_path_buf(),
                    line: index + 1,
                    source,
                })
            })
            .collect(),
    }
}

#[async_trait::async_trait]
impl DatasetSource for JsonFileSource {
    async fn load(&self) -> Result<Vec<RawRecord>, SourceError> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| SourceError::Io {
                path: self.path.clone(),
                source,
            })?;
        let records = parse_records(&content, self.format, &self.path)?;
        debug!("Loaded {} records from {}", records.len(), self.path.display());
        Ok(records)
    }
}
