//! Pure inventory arithmetic: merging additions and applying removals.
//!
//! Both operations key items by [`ItemKey`], i.e. case-insensitive name and tag.

use crate::models::{Inventory, Item, ItemKey};
use std::collections::{HashMap, HashSet};

/// Outcome of [`remove_items`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveResult {
    /// Surviving entries, in their original relative order
    pub inventory: Inventory,
    /// Keys that matched an inventory entry and were reduced or deleted
    pub removed_keys: HashSet<ItemKey>,
}

impl RemoveResult {
    /// True if the removal of `item` touched the inventory
    pub fn was_applied(&self, item: &Item) -> bool {
        self.removed_keys.contains(&item.key())
    }
}

/// Returns a new inventory with `to_add` merged in.
///
/// Matching keys have their quantities summed; the existing entry keeps its
/// spelling. Unmatched items are appended in input order.
pub fn merge_items(inventory: &[Item], to_add: &[Item]) -> Inventory {
    let mut merged: Inventory = Vec::with_capacity(inventory.len() + to_add.len());
    let mut index_by_key: HashMap<ItemKey, usize> = HashMap::new();

    for item in inventory.iter().chain(to_add) {
        match index_by_key.get(&item.key()) {
            Some(&index) => {
                merged[index].quantity = merged[index].quantity.saturating_add(item.quantity);
            }
            None => {
                index_by_key.insert(item.key(), merged.len());
                merged.push(item.clone());
            }
        }
    }

    merged
}

/// Returns a new inventory with `to_remove` subtracted.
///
/// Entries reaching zero or less are deleted. Requests for keys not in the
/// inventory are ignored and left out of `removed_keys`.
pub fn remove_items(inventory: &[Item], to_remove: &[Item]) -> RemoveResult {
    let mut slots: Vec<Option<Item>> = inventory.iter().cloned().map(Some).collect();
    let mut index_by_key: HashMap<ItemKey, usize> = HashMap::new();
    for (index, item) in inventory.iter().enumerate() {
        index_by_key.insert(item.key(), index);
    }

    let mut removed_keys = HashSet::new();

    for item in to_remove {
        let key = item.key();
        let Some(&index) = index_by_key.get(&key) else {
            continue;
        };
        let Some(existing) = slots[index].as_mut() else {
            continue;
        };

        if existing.quantity <= item.quantity {
            slots[index] = None;
            index_by_key.remove(&key);
        } else {
            existing.quantity -= item.quantity;
        }
        removed_keys.insert(key);
    }

    RemoveResult {
        inventory: slots.into_iter().flatten().collect(),
        removed_keys,
    }
}

#[cfg(test)]
#[path = "inventory_ops_tests.rs"]
mod tests;
