//! Validation of inventory JSON supplied from outside the application.
//!
//! Expects `[{ "quantity": 3, "name": "Island", "tag": "foil" }, ...]`.
//! Items are checked one by one against the shape; nothing is merged or
//! normalized.

use crate::error::ImportError;
use crate::models::{Inventory, Item};
use log::{debug, warn};
use serde_json::{Map, Value};

/// Checks one array element and converts it into an [`Item`].
///
/// Quantities must be positive integers that fit in `u32`; fractional
/// numbers are rejected.
fn validate_item(value: &Value) -> Option<Item> {
    let obj: &Map<String, Value> = value.as_object()?;

    let quantity = obj.get("quantity")?.as_u64()?;
    if quantity == 0 {
        return None;
    }
    let quantity = u32::try_from(quantity).ok()?;

    let name = obj.get("name")?.as_str()?;
    if name.trim().is_empty() {
        return None;
    }

    let tag = match obj.get("tag") {
        None => None,
        Some(Value::String(tag)) => Some(tag.clone()),
        Some(_) => return None,
    };

    Some(Item {
        quantity,
        name: name.to_string(),
        tag,
    })
}

/// Parses and validates an inventory export.
///
/// The first invalid element aborts with its 0-based index.
pub fn import_json_inventory(text: &str) -> Result<Inventory, ImportError> {
    let parsed: Value = serde_json::from_str(text).map_err(|e| {
        warn!("Rejected import, not valid JSON: {}", e);
        ImportError::InvalidJson(e.to_string())
    })?;

    let Value::Array(elements) = parsed else {
        warn!("Rejected import, top level is not an array");
        return Err(ImportError::NotAnArray);
    };

    let mut inventory = Vec::with_capacity(elements.len());
    for (index, element) in elements.iter().enumerate() {
        match validate_item(element) {
            Some(item) => inventory.push(item),
            None => {
                warn!("Rejected import, item {} has an invalid shape", index);
                return Err(ImportError::InvalidItem { index });
            }
        }
    }

    debug!("Validated import of {} items", inventory.len());
    Ok(inventory)
}

#[cfg(test)]
#[path = "importer_tests.rs"]
mod tests;
