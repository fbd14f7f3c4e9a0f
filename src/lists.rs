//! Custom decklist persistence.
//!
//! Each list is stored as `<sanitized name>.json`. `listasEnUso.json` caches
//! the names of lists marked in use and is rebuilt after every change.

use crate::backup::INVENTORY_FILENAME;
use crate::error::{Error, Result};
use crate::models::CustomList;
use crate::settings::SETTINGS_FILENAME;
use crate::storage::StorageService;
use lazy_static::lazy_static;
use log::{debug, warn};
use regex::Regex;

/// Names of lists currently marked in use
pub const LISTS_IN_USE_FILENAME: &str = "listasEnUso.json";

lazy_static! {
    static ref UNSAFE_FILENAME_CHARS: Regex = Regex::new(r"[^A-Za-z0-9_-]").unwrap();
    static ref JSON_FILE: Regex = Regex::new(r"\.json$").unwrap();
}

/// Replaces every character outside `[A-Za-z0-9_-]` with `_`
pub fn sanitize_list_name(name: &str) -> String {
    UNSAFE_FILENAME_CHARS.replace_all(name, "_").into_owned()
}

/// Storage file for a list called `name`
pub fn list_filename(name: &str) -> String {
    format!("{}.json", sanitize_list_name(name))
}

fn is_list_file(path: &str) -> bool {
    path != LISTS_IN_USE_FILENAME
        && path != SETTINGS_FILENAME
        && !path.starts_with(INVENTORY_FILENAME.trim_end_matches(".json"))
}

#[derive(Clone)]
pub struct CustomListsService {
    storage: StorageService,
}

impl CustomListsService {
    pub fn new(storage: StorageService) -> Self {
        Self { storage }
    }

    /// The stored list, or `None` if missing or unreadable
    pub async fn load_list(&self, name: &str) -> Option<CustomList> {
        match self.storage.read_json(&list_filename(name)).await {
            Ok(list) => Some(list),
            Err(e) => {
                if !e.is_not_found() {
                    warn!("Failed to read list '{}': {}", name, e);
                }
                None
            }
        }
    }

    pub async fn list_exists(&self, name: &str) -> bool {
        self.load_list(name).await.is_some()
    }

    /// Creates or overwrites the list stored under `list.name`
    pub async fn save_list(&self, list: &CustomList) -> Result<()> {
        self.storage
            .write_json(&list_filename(&list.name), list)
            .await?;
        debug!("Saved list '{}' ({} entries)", list.name, list.decklist.len());
        self.rebuild_lists_in_use().await;
        Ok(())
    }

    /// Saves a new list, failing if one with the same name is already stored
    pub async fn create_list(&self, list: &CustomList) -> Result<()> {
        if self.list_exists(&list.name).await {
            return Err(Error::ListExists(list.name.clone()));
        }
        self.save_list(list).await
    }

    pub async fn delete_list(&self, name: &str) -> Result<()> {
        self.storage.delete_file(&list_filename(name)).await?;
        debug!("Deleted list '{}'", name);
        self.rebuild_lists_in_use().await;
        Ok(())
    }

    /// Renames a list by deleting the old file and saving under the new name
    pub async fn rename_list(&self, old_name: &str, new_name: &str) -> Result<CustomList> {
        let mut list = self
            .load_list(old_name)
            .await
            .ok_or_else(|| Error::ListNotFound(old_name.to_string()))?;

        let same_file = list_filename(old_name) == list_filename(new_name);
        if !same_file && self.list_exists(new_name).await {
            return Err(Error::ListExists(new_name.to_string()));
        }

        list.name = new_name.to_string();
        if !same_file {
            self.storage.delete_file(&list_filename(old_name)).await?;
        }
        self.storage
            .write_json(&list_filename(new_name), &list)
            .await?;
        self.replace_in_use_name(old_name, new_name, list.in_use).await;
        Ok(list)
    }

    /// Marks a list as in use or not. Missing lists are ignored.
    pub async fn set_in_use(&self, name: &str, in_use: bool) -> Result<()> {
        let Some(mut list) = self.load_list(name).await else {
            debug!("Cannot mark missing list '{}'", name);
            return Ok(());
        };
        list.in_use = in_use;
        self.save_list(&list).await
    }

    /// Names from `listasEnUso.json`; empty when it is missing
    pub async fn lists_in_use(&self) -> Vec<String> {
        self.storage
            .read_json(LISTS_IN_USE_FILENAME)
            .await
            .unwrap_or_default()
    }

    /// Every readable list, skipping system and malformed files
    pub async fn all_lists(&self) -> Result<Vec<CustomList>> {
        let files = self.storage.list_files(&JSON_FILE).await?;
        let mut lists = Vec::new();
        for file in files.iter().filter(|f| is_list_file(f)) {
            match self.storage.read_json::<CustomList>(file).await {
                Ok(list) if !list.name.is_empty() => lists.push(list),
                Ok(_) => debug!("Skipping {}: list has no name", file),
                Err(e) => debug!("Skipping {}: {}", file, e),
            }
        }
        Ok(lists)
    }

    /// Rewrites `listasEnUso.json` from the list files. Failures are logged only.
    async fn rebuild_lists_in_use(&self) {
        let lists = match self.all_lists().await {
            Ok(lists) => lists,
            Err(e) => {
                warn!("Failed to enumerate lists: {}", e);
                return;
            }
        };
        let names: Vec<String> = lists
            .into_iter()
            .filter(|list| list.in_use)
            .map(|list| list.name)
            .collect();

        if let Err(e) = self.storage.write_json(LISTS_IN_USE_FILENAME, &names).await {
            warn!("Failed to write {}: {}", LISTS_IN_USE_FILENAME, e);
        }
    }

    /// Swaps `old_name` for `new_name` in the in-use cache, falling back to a rebuild
    async fn replace_in_use_name(&self, old_name: &str, new_name: &str, in_use: bool) {
        let mut names: Vec<String> = self
            .lists_in_use()
            .await
            .into_iter()
            .filter(|name| name != old_name)
            .collect();
        if in_use && !names.iter().any(|name| name == new_name) {
            names.push(new_name.to_string());
        }

        if let Err(e) = self.storage.write_json(LISTS_IN_USE_FILENAME, &names).await {
            warn!("Failed to update {} in place: {}", LISTS_IN_USE_FILENAME, e);
            self.rebuild_lists_in_use().await;
        }
    }
}

#[cfg(test)]
#[path = "lists_tests.rs"]
mod tests;
