use crate::error::StorageError;
use async_trait::async_trait;
use regex::Regex;

/// Host-provided file access.
///
/// Paths are logical names relative to the adapter's own root. A read must
/// observe the most recently completed write to the same path.
#[async_trait]
pub trait FileSystemAdapter: Send + Sync {
    /// Returns the content at `path`, or [`StorageError::NotFound`]
    async fn read_file(&self, path: &str) -> Result<String, StorageError>;

    /// Creates or overwrites `path`
    async fn write_file(&self, path: &str, content: &str) -> Result<(), StorageError>;

    /// Moves `old_path` over `new_path`, replacing it in one step
    async fn rename(&self, old_path: &str, new_path: &str) -> Result<(), StorageError>;

    /// Paths matching `pattern`, oldest write first
    async fn list_files(&self, pattern: &Regex) -> Result<Vec<String>, StorageError>;

    /// Removes `path`. Missing files are an error.
    async fn delete_file(&self, path: &str) -> Result<(), StorageError>;
}
