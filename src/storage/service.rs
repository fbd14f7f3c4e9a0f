//! JSON storage over a [`FileSystemAdapter`]
//!
//! Writes are atomic from a reader's point of view: content goes to
//! `<path>.tmp` first and is then renamed over `<path>`.

use super::adapter::FileSystemAdapter;
use crate::error::StorageError;
use log::debug;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

const TMP_SUFFIX: &str = ".tmp";

/// Reads and writes human-readable JSON documents through an owned adapter handle
#[derive(Clone)]
pub struct StorageService {
    adapter: Arc<dyn FileSystemAdapter>,
}

impl StorageService {
    pub fn new(adapter: Arc<dyn FileSystemAdapter>) -> Self {
        Self { adapter }
    }

    /// Reads and deserializes `path`.
    ///
    /// Fails when the file is missing or its content does not deserialize into `T`.
    pub async fn read_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, StorageError> {
        let content = self.adapter.read_file(path).await?;
        serde_json::from_str(&content).map_err(|source| StorageError::Json {
            path: path.to_string(),
            source,
        })
    }

    /// Reads `path` as stored, without parsing
    pub async fn read_text(&self, path: &str) -> Result<String, StorageError> {
        self.adapter.read_file(path).await
    }

    /// Reads `path` without interpreting it beyond JSON syntax
    pub async fn read_raw(&self, path: &str) -> Result<serde_json::Value, StorageError> {
        self.read_json(path).await
    }

    /// Serializes `data` with 2-space indentation and replaces `path` atomically
    pub async fn write_json<T: Serialize + ?Sized>(
        &self,
        path: &str,
        data: &T,
    ) -> Result<(), StorageError> {
        let content = serde_json::to_string_pretty(data).map_err(|source| StorageError::Json {
            path: path.to_string(),
            source,
        })?;
        self.write_raw(path, &content).await
    }

    /// Replaces `path` atomically with `content` exactly as given
    pub async fn write_raw(&self, path: &str, content: &str) -> Result<(), StorageError> {
        let tmp_path = format!("{}{}", path, TMP_SUFFIX);

        self.adapter.write_file(&tmp_path, content).await?;
        self.adapter.rename(&tmp_path, path).await?;

        debug!("Wrote {} ({} bytes)", path, content.len());
        Ok(())
    }

    /// True if something is stored at `path`
    pub async fn exists(&self, path: &str) -> Result<bool, StorageError> {
        match self.adapter.read_file(path).await {
            Ok(_) => Ok(true),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Paths matching `pattern`, oldest write first
    pub async fn list_files(&self, pattern: &Regex) -> Result<Vec<String>, StorageError> {
        self.adapter.list_files(pattern).await
    }

    pub async fn delete_file(&self, path: &str) -> Result<(), StorageError> {
        self.adapter.delete_file(path).await?;
        debug!("Deleted {}", path);
        Ok(())
    }
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;
