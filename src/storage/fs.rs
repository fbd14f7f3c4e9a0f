//! Filesystem adapter rooted at a data directory
//!
//! Logical paths are file names inside the root directory.

use super::adapter::FileSystemAdapter;
use crate::error::StorageError;
use async_trait::async_trait;
use regex::Regex;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// [`FileSystemAdapter`] over real files using `tokio::fs`
#[derive(Debug, Clone)]
pub struct FsAdapter {
    root: PathBuf,
}

fn io_error(path: &str, source: std::io::Error) -> StorageError {
    if source.kind() == ErrorKind::NotFound {
        StorageError::NotFound(path.to_string())
    } else {
        StorageError::Io {
            path: path.to_string(),
            source,
        }
    }
}

impl FsAdapter {
    /// Create an adapter over `root`. The directory is created on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn full_path(&self, path: &str) -> PathBuf {
        self.root.join(path)
    }
}

#[async_trait]
impl FileSystemAdapter for FsAdapter {
    async fn read_file(&self, path: &str) -> Result<String, StorageError> {
        tokio::fs::read_to_string(self.full_path(path))
            .await
            .map_err(|e| io_error(path, e))
    }

    async fn write_file(&self, path: &str, content: &str) -> Result<(), StorageError> {
        let full_path = self.full_path(path);
        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| io_error(path, e))?;
        }
        tokio::fs::write(&full_path, content)
            .await
            .map_err(|e| io_error(path, e))
    }

    async fn rename(&self, old_path: &str, new_path: &str) -> Result<(), StorageError> {
        tokio::fs::rename(self.full_path(old_path), self.full_path(new_path))
            .await
            .map_err(|e| io_error(old_path, e))
    }

    async fn list_files(&self, pattern: &Regex) -> Result<Vec<String>, StorageError> {
        let root_name = self.root.to_string_lossy().to_string();
        let mut entries = match tokio::fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(io_error(&root_name, e)),
        };

        let mut matching: Vec<(SystemTime, String)> = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| io_error(&root_name, e))?
        {
            let name = entry.file_name().to_string_lossy().to_string();
            if !pattern.is_match(&name) {
                continue;
            }
            let metadata = match entry.metadata().await {
                Ok(metadata) => metadata,
                Err(e) => {
                    log::debug!("Skipping {} while listing: {}", name, e);
                    continue;
                }
            };
            if !metadata.is_file() {
                continue;
            }
            let modified = metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH);
            matching.push((modified, name));
        }

        matching.sort();
        Ok(matching.into_iter().map(|(_, name)| name).collect())
    }

    async fn delete_file(&self, path: &str) -> Result<(), StorageError> {
        tokio::fs::remove_file(self.full_path(path))
            .await
            .map_err(|e| io_error(path, e))
    }
}
