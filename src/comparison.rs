//! Desired list vs stock comparison.
//!
//! Stock is grouped by name only (tags ignored). Lists marked in use reserve
//! their quantities, so only the remainder counts as available.

use crate::models::{CustomList, Item};
use std::collections::HashMap;

/// Inventory quantity summed over all tags of one name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupedItem {
    pub name: String,
    pub quantity: u32,
}

/// One desired item with what the inventory holds for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonEntry {
    pub item: Item,
    pub in_inventory: u32,
    pub reserved: u32,
}

impl ComparisonEntry {
    /// Copies not reserved by lists in use; never negative
    pub fn available(&self) -> u32 {
        self.in_inventory.saturating_sub(self.reserved)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Comparison {
    /// Desired items fully covered by available stock
    pub have: Vec<ComparisonEntry>,
    /// Desired items needing more than is available
    pub missing: Vec<ComparisonEntry>,
}

fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Sums inventory quantities per name, keeping the first spelling seen
pub fn group_by_name(inventory: &[Item]) -> Vec<GroupedItem> {
    let mut grouped: Vec<GroupedItem> = Vec::new();
    let mut index_by_name: HashMap<String, usize> = HashMap::new();

    for item in inventory {
        let key = name_key(&item.name);
        match index_by_name.get(&key) {
            Some(&index) => {
                let total = &mut grouped[index].quantity;
                *total = total.saturating_add(item.quantity);
            }
            None => {
                index_by_name.insert(key, grouped.len());
                grouped.push(GroupedItem {
                    name: item.name.clone(),
                    quantity: item.quantity,
                });
            }
        }
    }

    grouped
}

/// Case-insensitive substring search over grouped names. A blank query keeps everything.
pub fn filter_by_name<'a>(grouped: &'a [GroupedItem], query: &str) -> Vec<&'a GroupedItem> {
    let query = query.trim().to_lowercase();
    grouped
        .iter()
        .filter(|item| query.is_empty() || item.name.to_lowercase().contains(&query))
        .collect()
}

/// Quantities reserved per lower-cased name by lists marked in use
pub fn reserved_totals(lists: &[CustomList]) -> HashMap<String, u32> {
    let mut totals: HashMap<String, u32> = HashMap::new();
    for list in lists.iter().filter(|list| list.in_use) {
        for item in &list.decklist {
            let total = totals.entry(name_key(&item.name)).or_insert(0);
            *total = total.saturating_add(item.quantity);
        }
    }
    totals
}

/// In-use lists whose decklist mentions `name`
pub fn lists_containing<'a>(lists: &'a [CustomList], name: &str) -> Vec<&'a CustomList> {
    let key = name_key(name);
    lists
        .iter()
        .filter(|list| list.in_use)
        .filter(|list| list.decklist.iter().any(|item| name_key(&item.name) == key))
        .collect()
}

/// Splits `desired` into items the available stock covers and items it does not
pub fn compare(desired: &[Item], inventory: &[Item], lists: &[CustomList]) -> Comparison {
    let stock: HashMap<String, u32> = group_by_name(inventory)
        .into_iter()
        .map(|item| (name_key(&item.name), item.quantity))
        .collect();
    let reserved = reserved_totals(lists);

    let mut comparison = Comparison::default();
    for item in desired {
        let key = name_key(&item.name);
        let entry = ComparisonEntry {
            item: item.clone(),
            in_inventory: stock.get(&key).copied().unwrap_or(0),
            reserved: reserved.get(&key).copied().unwrap_or(0),
        };

        if item.quantity <= entry.available() {
            comparison.have.push(entry);
        } else {
            comparison.missing.push(entry);
        }
    }

    comparison
}

#[cfg(test)]
#[path = "comparison_tests.rs"]
mod tests;
