//! In-memory adapter for tests and for hosts without a writable disk

use super::adapter::FileSystemAdapter;
use crate::error::StorageError;
use async_trait::async_trait;
use regex::Regex;
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Debug, Clone)]
struct FileRecord {
    content: String,
    /// Write sequence number, used to list files oldest first
    written: u64,
}

#[derive(Debug, Default)]
struct Store {
    files: HashMap<String, FileRecord>,
    next_write: u64,
}

/// Volatile [`FileSystemAdapter`] backed by a map
#[derive(Debug, Default)]
pub struct InMemoryAdapter {
    store: RwLock<Store>,
}

impl InMemoryAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored files
    pub async fn len(&self) -> usize {
        self.store.read().await.files.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl FileSystemAdapter for InMemoryAdapter {
    async fn read_file(&self, path: &str) -> Result<String, StorageError> {
        let store = self.store.read().await;
        store
            .files
            .get(path)
            .map(|record| record.content.clone())
            .ok_or_else(|| StorageError::NotFound(path.to_string()))
    }

    async fn write_file(&self, path: &str, content: &str) -> Result<(), StorageError> {
        let mut store = self.store.write().await;
        let written = store.next_write;
        store.next_write += 1;
        store.files.insert(
            path.to_string(),
            FileRecord {
                content: content.to_string(),
                written,
            },
        );
        Ok(())
    }

    async fn rename(&self, old_path: &str, new_path: &str) -> Result<(), StorageError> {
        let mut store = self.store.write().await;
        let record = store
            .files
            .remove(old_path)
            .ok_or_else(|| StorageError::NotFound(old_path.to_string()))?;
        store.files.insert(new_path.to_string(), record);
        Ok(())
    }

    async fn list_files(&self, pattern: &Regex) -> Result<Vec<String>, StorageError> {
        let store = self.store.read().await;
        let mut matching: Vec<(&String, u64)> = store
            .files
            .iter()
            .filter(|(path, _)| pattern.is_match(path))
            .map(|(path, record)| (path, record.written))
            .collect();
        matching.sort_by_key(|(_, written)| *written);
        Ok(matching.into_iter().map(|(path, _)| path.clone()).collect())
    }

    async fn delete_file(&self, path: &str) -> Result<(), StorageError> {
        let mut store = self.store.write().await;
        store
            .files
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| StorageError::NotFound(path.to_string()))
    }
}
