//! Text rendering of items for display and export

use crate::comparison::ComparisonEntry;
use crate::models::{Item, ListItem};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
}

/// Capitalizes the first letter of every word and lower-cases the rest.
///
/// `"card name"` becomes `"Card Name"`. Runs of whitespace collapse to one space.
pub fn to_title_case(text: &str) -> String {
    let lower = text.to_lowercase();
    WHITESPACE_RUN
        .split(&lower)
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// `Qx Title Cased Name #tag`
pub fn format_item(item: &Item) -> String {
    match &item.tag {
        Some(tag) => format!("{}x {} #{}", item.quantity, to_title_case(&item.name), tag),
        None => format!("{}x {}", item.quantity, to_title_case(&item.name)),
    }
}

/// `Qx Name`, name as written
pub fn format_list_item(item: &ListItem) -> String {
    format!("{}x {}", item.quantity, item.name)
}

/// One formatted item per line
pub fn format_items(items: &[Item]) -> String {
    items.iter().map(format_item).collect::<Vec<_>>().join("\n")
}

/// Comparison entries as `Qx Name` lines, tags dropped
pub fn format_comparison_entries(entries: &[ComparisonEntry]) -> String {
    entries
        .iter()
        .map(|entry| format!("{}x {}", entry.item.quantity, to_title_case(&entry.item.name)))
        .collect::<Vec<_>>()
        .join("\n")
}
