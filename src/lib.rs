//! List Manager - personal inventory and decklist manager
//!
//! Parses `Qx Name #tag` text into inventory changes, keeps the inventory in
//! `inventory.json` with rotating backups, stores named decklists and
//! compares desired lists against available stock.

pub mod backup;
pub mod comparison;
pub mod error;
pub mod format;
pub mod importer;
pub mod inventory_ops;
pub mod inventory_service;
pub mod lists;
pub mod models;
pub mod parser;
pub mod settings;
pub mod storage;

pub use backup::{Clock, LocalClock, INVENTORY_FILENAME};
pub use comparison::{compare, Comparison, ComparisonEntry};
pub use error::{Error, ImportError, ParseError, Result, StorageError};
pub use format::{format_item, format_list_item, to_title_case};
pub use importer::import_json_inventory;
pub use inventory_ops::{merge_items, remove_items, RemoveResult};
pub use inventory_service::{BackupStats, InventoryService, RemovalOutcome};
pub use lists::CustomListsService;
pub use models::{AppSettings, CustomList, Inventory, Item, ItemKey, ListItem};
pub use parser::{parse_list_text, parse_text};
pub use settings::SettingsService;
pub use storage::{FileSystemAdapter, FsAdapter, InMemoryAdapter, StorageService};
