//! Line parsers for item text.
//!
//! Accepted line shapes:
//! - items: `5x Lightning Bolt #foil` or `5 Lightning Bolt #foil` (tag optional)
//! - list items: `4x Counterspell` or `4 Counterspell` (no tag clause)
//!
//! Blank lines are ignored. The first invalid line aborts the whole parse.

use crate::error::ParseError;
use crate::models::{Item, ListItem};
use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

/// Largest quantity a single line may carry
pub const MAX_LINE_QUANTITY: u32 = 999;

lazy_static! {
    static ref ITEM_LINE: Regex = Regex::new(r"^(\d{1,3})x\s+(.+?)(?:\s+#(\S+))?$").unwrap();
    static ref ITEM_LINE_NO_X: Regex = Regex::new(r"^(\d{1,3})\s+(.+?)(?:\s+#(\S+))?$").unwrap();
    static ref LIST_LINE: Regex = Regex::new(r"^(\d{1,3})x\s+(.+?)$").unwrap();
    static ref LIST_LINE_NO_X: Regex = Regex::new(r"^(\d{1,3})\s+(.+?)$").unwrap();
}

/// Validates the digit token captured by the line grammar.
///
/// Rejects zero and anything written with a leading zero (`05`, `007`).
fn parse_quantity(digits: &str) -> Option<u32> {
    if digits.starts_with('0') {
        return None;
    }
    let quantity = digits.parse::<u32>().ok()?;
    if quantity == 0 || quantity > MAX_LINE_QUANTITY {
        return None;
    }
    Some(quantity)
}

/// Parses one trimmed, non-blank line into an [`Item`]
fn parse_item_line(line: &str) -> Option<Item> {
    let caps = ITEM_LINE
        .captures(line)
        .or_else(|| ITEM_LINE_NO_X.captures(line))?;

    let quantity = parse_quantity(caps.get(1)?.as_str())?;
    let name = caps.get(2)?.as_str().trim();
    if name.is_empty() {
        return None;
    }
    let tag = caps.get(3).map(|m| m.as_str().to_string());

    Some(Item {
        quantity,
        name: name.to_string(),
        tag,
    })
}

/// Parses one trimmed, non-blank line into a [`ListItem`]
fn parse_list_item_line(line: &str) -> Option<ListItem> {
    let caps = LIST_LINE
        .captures(line)
        .or_else(|| LIST_LINE_NO_X.captures(line))?;

    let quantity = parse_quantity(caps.get(1)?.as_str())?;
    let name = caps.get(2)?.as_str().trim();
    if name.is_empty() {
        return None;
    }

    Some(ListItem::new(quantity, name))
}

fn parse_lines<T>(text: &str, parse_line: fn(&str) -> Option<T>) -> Result<Vec<T>, ParseError> {
    let mut items = Vec::new();

    for (index, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        match parse_line(trimmed) {
            Some(item) => items.push(item),
            None => {
                debug!("Rejecting line {}: '{}'", index + 1, trimmed);
                return Err(ParseError::invalid_format(index + 1));
            }
        }
    }

    Ok(items)
}

/// Parses inventory change text into items.
///
/// Returns every item or, on the first bad line, only the error.
pub fn parse_text(text: &str) -> Result<Vec<Item>, ParseError> {
    parse_lines(text, parse_item_line)
}

/// Parses decklist text into list items. A trailing `#word` stays part of the name.
pub fn parse_list_text(text: &str) -> Result<Vec<ListItem>, ParseError> {
    parse_lines(text, parse_list_item_line)
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
