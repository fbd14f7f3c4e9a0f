use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Default cap on backups kept for a single day
pub const DEFAULT_MAX_BACKUPS_PER_DAY: u32 = 10;

/// A stock entry: quantity, name and an optional tag (e.g. a set code or "foil")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub quantity: u32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

impl Item {
    pub fn new(quantity: u32, name: impl Into<String>) -> Self {
        Self {
            quantity,
            name: name.into(),
            tag: None,
        }
    }

    pub fn with_tag(quantity: u32, name: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            quantity,
            name: name.into(),
            tag: Some(tag.into()),
        }
    }

    /// Identity used when merging into or removing from an inventory
    pub fn key(&self) -> ItemKey {
        ItemKey::new(&self.name, self.tag.as_deref())
    }
}

/// Case-insensitive `(name, tag)` identity of an [`Item`].
///
/// An absent tag and an empty tag are the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemKey {
    name: String,
    tag: String,
}

impl ItemKey {
    pub fn new(name: &str, tag: Option<&str>) -> Self {
        Self {
            name: name.to_lowercase(),
            tag: tag.unwrap_or("").to_lowercase(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }
}

impl std::fmt::Display for ItemKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}|{}", self.name, self.tag)
    }
}

/// The canonical collection of all items
pub type Inventory = Vec<Item>;

/// Orders items by name, then tag, ignoring case
pub fn compare_items(a: &Item, b: &Item) -> Ordering {
    a.name
        .to_lowercase()
        .cmp(&b.name.to_lowercase())
        .then_with(|| {
            let tag_a = a.tag.as_deref().unwrap_or("").to_lowercase();
            let tag_b = b.tag.as_deref().unwrap_or("").to_lowercase();
            tag_a.cmp(&tag_b)
        })
}

/// Returns a copy of the inventory in persisted order
pub fn sort_inventory(inventory: &[Item]) -> Inventory {
    let mut sorted = inventory.to_vec();
    sorted.sort_by(compare_items);
    sorted
}

/// A decklist entry. Lists never carry tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListItem {
    pub quantity: u32,
    pub name: String,
}

impl ListItem {
    pub fn new(quantity: u32, name: impl Into<String>) -> Self {
        Self {
            quantity,
            name: name.into(),
        }
    }
}

/// A named decklist. `in_use` marks it as reserving inventory quantities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomList {
    pub name: String,
    #[serde(rename = "inUse", default)]
    pub in_use: bool,
    pub decklist: Vec<ListItem>,
}

impl CustomList {
    pub fn new(name: impl Into<String>, decklist: Vec<ListItem>) -> Self {
        Self {
            name: name.into(),
            in_use: false,
            decklist,
        }
    }

    /// Total number of cards in the decklist
    pub fn total_quantity(&self) -> u32 {
        self.decklist.iter().map(|item| item.quantity).sum()
    }
}

/// Application settings persisted in `app_settings.json`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(rename = "maxBackupsPerDay")]
    pub max_backups_per_day: u32,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            max_backups_per_day: DEFAULT_MAX_BACKUPS_PER_DAY,
        }
    }
}
