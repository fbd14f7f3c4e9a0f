//! Backup file naming: `inventory_backup_DD_MM_YY_HH_MM.json`
//!
//! Names have minute resolution, so two saves in the same local minute
//! write to the same backup file and the later one wins.

use chrono::{Local, NaiveDate, NaiveDateTime};
use lazy_static::lazy_static;
use regex::Regex;

/// Main inventory document
pub const INVENTORY_FILENAME: &str = "inventory.json";

const BACKUP_PREFIX: &str = "inventory_backup_";
const BACKUP_STAMP_FORMAT: &str = "%d_%m_%y_%H_%M";

lazy_static! {
    /// Any backup file
    pub static ref BACKUP_FILE: Regex = Regex::new(r"^inventory_backup_.+\.json$").unwrap();
    static ref BACKUP_STAMP: Regex =
        Regex::new(r"^inventory_backup_(\d{2}_\d{2}_\d{2}_\d{2}_\d{2})\.json$").unwrap();
}

/// Source of the current local time
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// Wall clock in the local time zone
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// `DD_MM_YY_HH_MM` for `time`
pub fn backup_stamp(time: NaiveDateTime) -> String {
    time.format(BACKUP_STAMP_FORMAT).to_string()
}

/// Backup file name for a save at `time`
pub fn backup_filename(time: NaiveDateTime) -> String {
    format!("{}{}.json", BACKUP_PREFIX, backup_stamp(time))
}

/// True if `name` is a backup taken on `day`
pub fn is_backup_of_day(name: &str, day: NaiveDate) -> bool {
    parse_backup_filename(name).is_some_and(|time| time.date() == day)
}

/// Timestamp encoded in a backup file name, if it is one
pub fn parse_backup_filename(name: &str) -> Option<NaiveDateTime> {
    let caps = BACKUP_STAMP.captures(name)?;
    NaiveDateTime::parse_from_str(caps.get(1)?.as_str(), BACKUP_STAMP_FORMAT).ok()
}

pub fn is_backup_filename(name: &str) -> bool {
    BACKUP_FILE.is_match(name)
}

/// Display form of a backup name, e.g. `17-10-2026 09:05`
pub fn describe_backup(name: &str) -> String {
    match parse_backup_filename(name) {
        Some(time) => time.format("%d-%m-%Y %H:%M").to_string(),
        None => "Unknown date".to_string(),
    }
}

#[cfg(test)]
#[path = "backup_tests.rs"]
mod tests;
