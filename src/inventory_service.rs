//! Inventory persistence with backup rotation.
//!
//! Every save first snapshots the current `inventory.json` into
//! `inventory_backup_DD_MM_YY_HH_MM.json`, then writes the new state sorted
//! by name and tag, then prunes at most one of today's backups when the
//! count exceeds `maxBackupsPerDay`. Pruning failures are only logged.
//!
//! The snapshot and the overwrite are two separate writes. A crash in
//! between leaves a backup with no matching new state, which load tolerates.

use crate::backup::{
    backup_filename, is_backup_filename, is_backup_of_day, parse_backup_filename, Clock,
    LocalClock, BACKUP_FILE, INVENTORY_FILENAME,
};
use crate::error::{Error, Result, StorageError};
use crate::importer::import_json_inventory;
use crate::inventory_ops::{merge_items, remove_items};
use crate::models::{sort_inventory, Inventory, Item};
use crate::parser::parse_text;
use crate::settings::SettingsService;
use crate::storage::StorageService;
use chrono::NaiveDate;
use log::{debug, info, warn};
use std::sync::Arc;

/// Snapshot content when there is no inventory file yet
const EMPTY_INVENTORY: &str = "[]";

/// Counts shown by backup administration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BackupStats {
    pub total_backups: usize,
    pub today_backups: usize,
    pub has_inventory: bool,
}

/// Result of applying removal text to the stored inventory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovalOutcome {
    /// Inventory after the removal
    pub inventory: Inventory,
    /// Requested removals that matched nothing, in input order
    pub unmatched: Vec<Item>,
}

#[derive(Clone)]
pub struct InventoryService {
    storage: StorageService,
    settings: SettingsService,
    clock: Arc<dyn Clock>,
}

impl InventoryService {
    pub fn new(storage: StorageService) -> Self {
        Self::with_clock(storage, Arc::new(LocalClock))
    }

    /// Service whose backup names and "today" come from `clock`
    pub fn with_clock(storage: StorageService, clock: Arc<dyn Clock>) -> Self {
        let settings = SettingsService::new(storage.clone());
        Self {
            storage,
            settings,
            clock,
        }
    }

    /// Loads `inventory.json`.
    ///
    /// When it is missing, the newest backup is loaded and written back as
    /// `inventory.json`. With no backups either, the inventory is empty.
    /// A corrupt file is an error in both cases.
    pub async fn load_inventory(&self) -> Result<Inventory> {
        match self.storage.read_json::<Inventory>(INVENTORY_FILENAME).await {
            Ok(inventory) => Ok(inventory),
            Err(e) if e.is_not_found() => self.recover_from_backup().await,
            Err(e) => Err(e.into()),
        }
    }

    async fn recover_from_backup(&self) -> Result<Inventory> {
        let Some(latest) = self.list_backups().await?.into_iter().next() else {
            debug!("No inventory and no backups, starting empty");
            return Ok(Vec::new());
        };

        warn!("{} is missing, restoring from {}", INVENTORY_FILENAME, latest);
        let inventory: Inventory = self.storage.read_json(&latest).await?;
        self.storage
            .write_json(INVENTORY_FILENAME, &inventory)
            .await?;
        Ok(inventory)
    }

    /// Snapshots the current state, then stores `inventory` sorted by name and tag
    pub async fn save_inventory(&self, inventory: &[Item]) -> Result<()> {
        let now = self.clock.now();
        let backup_name = backup_filename(now);

        let current = match self.storage.read_text(INVENTORY_FILENAME).await {
            Ok(current) => current,
            Err(e) if e.is_not_found() => EMPTY_INVENTORY.to_string(),
            Err(e) => return Err(e.into()),
        };
        self.storage.write_raw(&backup_name, &current).await?;
        debug!("Backed up previous inventory to {}", backup_name);

        let sorted = sort_inventory(inventory);
        self.storage.write_json(INVENTORY_FILENAME, &sorted).await?;
        info!("Saved inventory with {} entries", sorted.len());

        if let Err(e) = self.cleanup_old_backups(now.date()).await {
            warn!("Failed to cleanup old backups: {}", e);
        }
        Ok(())
    }

    /// Deletes the oldest backup of `today` if that day has more than the configured cap.
    ///
    /// Removes at most one file per call.
    async fn cleanup_old_backups(
        &self,
        today: NaiveDate,
    ) -> std::result::Result<(), StorageError> {
        let max_backups_per_day = self.settings.load_settings().await.max_backups_per_day;

        let mut todays: Vec<String> = self
            .storage
            .list_files(&BACKUP_FILE)
            .await?
            .into_iter()
            .filter(|name| is_backup_of_day(name, today))
            .collect();

        if todays.len() <= max_backups_per_day as usize {
            return Ok(());
        }

        todays.sort_by_key(|name| parse_backup_filename(name));
        let oldest = &todays[0];
        self.storage.delete_file(oldest).await?;
        info!(
            "Deleted backup {} ({} today, limit {})",
            oldest,
            todays.len(),
            max_backups_per_day
        );
        Ok(())
    }

    /// All backup names, newest first
    pub async fn list_backups(&self) -> Result<Vec<String>> {
        let mut backups = self.storage.list_files(&BACKUP_FILE).await?;
        // Stable sort keeps write order among equal stamps; reverse makes newest first
        backups.sort_by_key(|name| parse_backup_filename(name));
        backups.reverse();
        Ok(backups)
    }

    pub async fn backup_stats(&self) -> Result<BackupStats> {
        let backups = self.list_backups().await?;
        let today = self.clock.now().date();
        Ok(BackupStats {
            total_backups: backups.len(),
            today_backups: backups
                .iter()
                .filter(|name| is_backup_of_day(name, today))
                .count(),
            has_inventory: self.storage.exists(INVENTORY_FILENAME).await?,
        })
    }

    /// Contents of one backup
    pub async fn read_backup(&self, name: &str) -> Result<Inventory> {
        if !is_backup_filename(name) {
            return Err(Error::NotABackup(name.to_string()));
        }
        Ok(self.storage.read_json(name).await?)
    }

    /// Makes a backup the current inventory. The replaced state is backed up as usual.
    pub async fn restore_backup(&self, name: &str) -> Result<Inventory> {
        let inventory = self.read_backup(name).await?;
        self.save_inventory(&inventory).await?;
        info!("Restored inventory from {}", name);
        Ok(inventory)
    }

    /// Deletes a backup.
    ///
    /// Passing `inventory.json` replaces it with the newest backup instead,
    /// or deletes it when there is none.
    pub async fn delete_backup(&self, name: &str) -> Result<()> {
        if name == INVENTORY_FILENAME {
            return match self.list_backups().await?.first() {
                Some(latest) => {
                    let content = self.storage.read_raw(latest).await?;
                    self.storage.write_json(INVENTORY_FILENAME, &content).await?;
                    info!("Replaced {} with {}", INVENTORY_FILENAME, latest);
                    Ok(())
                }
                None => Ok(self.storage.delete_file(INVENTORY_FILENAME).await?),
            };
        }

        if !is_backup_filename(name) {
            return Err(Error::NotABackup(name.to_string()));
        }
        self.storage.delete_file(name).await?;
        Ok(())
    }

    /// Deletes every backup, returning how many were removed
    pub async fn delete_all_backups(&self) -> Result<usize> {
        let backups = self.storage.list_files(&BACKUP_FILE).await?;
        for backup in &backups {
            self.storage.delete_file(backup).await?;
        }
        info!("Deleted {} backup(s)", backups.len());
        Ok(backups.len())
    }

    /// Deletes all backups and `inventory.json`.
    ///
    /// Individual backup failures are logged and skipped; failing to delete
    /// the inventory itself is an error.
    pub async fn wipe(&self) -> Result<usize> {
        let backups = self.storage.list_files(&BACKUP_FILE).await?;
        let mut deleted = 0;
        for backup in &backups {
            match self.storage.delete_file(backup).await {
                Ok(()) => deleted += 1,
                Err(e) => warn!("Failed to delete backup {}: {}", backup, e),
            }
        }

        match self.storage.delete_file(INVENTORY_FILENAME).await {
            Ok(()) => {}
            Err(e) if e.is_not_found() => {}
            Err(e) => return Err(e.into()),
        }
        info!("Wiped inventory and {} backup(s)", deleted);
        Ok(deleted)
    }

    /// Parses `text` and adds its items to the stored inventory
    pub async fn add_from_text(&self, text: &str) -> Result<Inventory> {
        let items = parse_text(text)?;
        let inventory = self.load_inventory().await?;
        let merged = merge_items(&inventory, &items);
        self.save_inventory(&merged).await?;
        Ok(sort_inventory(&merged))
    }

    /// Parses `text` and removes its items from the stored inventory.
    ///
    /// Nothing is saved when no requested item matched.
    pub async fn remove_from_text(&self, text: &str) -> Result<RemovalOutcome> {
        let items = parse_text(text)?;
        let inventory = self.load_inventory().await?;
        let result = remove_items(&inventory, &items);

        let unmatched: Vec<Item> = items
            .into_iter()
            .filter(|item| !result.was_applied(item))
            .collect();

        if result.removed_keys.is_empty() {
            debug!("No requested removal matched the inventory");
            return Ok(RemovalOutcome {
                inventory,
                unmatched,
            });
        }

        self.save_inventory(&result.inventory).await?;
        Ok(RemovalOutcome {
            inventory: sort_inventory(&result.inventory),
            unmatched,
        })
    }

    /// Validates an export and makes it the whole inventory
    pub async fn import_json(&self, text: &str) -> Result<Inventory> {
        let inventory = import_json_inventory(text)?;
        self.save_inventory(&inventory).await?;
        info!("Imported {} items", inventory.len());
        Ok(sort_inventory(&inventory))
    }
}

#[cfg(test)]
#[path = "inventory_service_tests.rs"]
mod tests;
