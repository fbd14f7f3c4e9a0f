//! List Manager - command line front end
//!
//! Applies inventory changes from text files, manages decklists and backups,
//! and compares desired lists against available stock.

use clap::{Parser, Subcommand};
use list_manager::backup::describe_backup;
use list_manager::comparison::{
    compare, filter_by_name, group_by_name, lists_containing, reserved_totals,
};
use list_manager::format::{format_comparison_entries, format_item, format_list_item, to_title_case};
use list_manager::{
    parse_list_text, parse_text, AppSettings, CustomList, CustomListsService, Error, FsAdapter,
    InventoryService, SettingsService, StorageService, INVENTORY_FILENAME,
};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::AsyncReadExt;

/// Personal inventory and decklist manager
#[derive(Parser, Debug)]
#[command(name = "list_manager")]
#[command(version, about, long_about = None)]
struct Args {
    /// Directory holding inventory.json, backups, lists and settings
    #[arg(short, long, default_value_t = default_data_dir())]
    data_dir: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the inventory
    Show {
        /// Sum tags per name and show how many copies lists in use reserve
        #[arg(long)]
        grouped: bool,
        /// Only names containing this text (with --grouped)
        #[arg(long)]
        search: Option<String>,
    },
    /// Add items from a file of `Qx Name #tag` lines ("-" for stdin)
    Add { input: String },
    /// Remove items listed in a file ("-" for stdin)
    Remove { input: String },
    /// Replace the inventory with a JSON export
    Import { input: String },
    /// List backups, newest first
    Backups,
    /// Make a backup the current inventory
    Restore { backup: String },
    /// Delete a backup (inventory.json is replaced by the newest backup)
    DeleteBackup { name: String },
    /// Show or change settings
    Settings {
        /// Maximum number of backups kept per day
        #[arg(long)]
        max_backups_per_day: Option<u32>,
    },
    /// Manage decklists
    Lists {
        #[command(subcommand)]
        command: ListsCommand,
    },
    /// Compare a desired list ("-" for stdin) against available stock
    Compare { input: String },
    /// Delete the inventory and all backups
    Wipe,
}

#[derive(Subcommand, Debug)]
enum ListsCommand {
    /// Print all lists, or one list with its contents
    Show { name: Option<String> },
    /// Create or replace a list from a file of `Qx Name` lines ("-" for stdin)
    Save { name: String, input: String },
    /// Delete a list
    Delete { name: String },
    /// Rename a list
    Rename { old_name: String, new_name: String },
    /// Mark a list as in use
    Use { name: String },
    /// Clear the in-use mark
    Unuse { name: String },
}

/// Returns the default data directory: ~/.local/share/list_manager
fn default_data_dir() -> String {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("list_manager")
        .to_string_lossy()
        .to_string()
}

/// Reads a whole file, or stdin when `input` is "-"
async fn read_input(input: &str) -> std::io::Result<String> {
    if input == "-" {
        let mut text = String::new();
        tokio::io::stdin().read_to_string(&mut text).await?;
        Ok(text)
    } else {
        tokio::fs::read_to_string(input).await
    }
}

struct Services {
    inventory: InventoryService,
    lists: CustomListsService,
    settings: SettingsService,
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let data_dir = PathBuf::from(&args.data_dir);
    log::debug!("Data directory: {}", data_dir.display());

    let storage = StorageService::new(Arc::new(FsAdapter::new(data_dir)));
    let services = Services {
        inventory: InventoryService::new(storage.clone()),
        lists: CustomListsService::new(storage.clone()),
        settings: SettingsService::new(storage),
    };

    if let Err(e) = run(args.command, &services).await {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

async fn run(command: Command, services: &Services) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Command::Show { grouped, search } => {
            let inventory = services.inventory.load_inventory().await?;
            if inventory.is_empty() {
                println!("Inventory is empty");
            } else if grouped {
                let lists = services.lists.all_lists().await?;
                let reserved = reserved_totals(&lists);
                let grouped = group_by_name(&inventory);
                for item in filter_by_name(&grouped, search.as_deref().unwrap_or("")) {
                    let in_use = reserved
                        .get(&item.name.trim().to_lowercase())
                        .copied()
                        .unwrap_or(0);
                    println!("{}  {}/{}", to_title_case(&item.name), in_use, item.quantity);
                }
            } else {
                for item in &inventory {
                    println!("{}", format_item(item));
                }
            }
        }
        Command::Add { input } => {
            let text = read_input(&input).await?;
            let inventory = services.inventory.add_from_text(&text).await?;
            log::info!("Inventory now has {} entries", inventory.len());
        }
        Command::Remove { input } => {
            let text = read_input(&input).await?;
            let outcome = services.inventory.remove_from_text(&text).await?;
            if !outcome.unmatched.is_empty() {
                println!("Not in inventory:");
                for item in &outcome.unmatched {
                    println!("{}", format_item(item));
                }
            }
            log::info!("Inventory now has {} entries", outcome.inventory.len());
        }
        Command::Import { input } => {
            let text = read_input(&input).await?;
            let inventory = services.inventory.import_json(&text).await?;
            println!("Imported {} items", inventory.len());
        }
        Command::Backups => {
            let stats = services.inventory.backup_stats().await?;
            println!(
                "{} backup(s), {} today",
                stats.total_backups, stats.today_backups
            );
            if stats.has_inventory {
                println!("{}  (current)", INVENTORY_FILENAME);
            }
            for backup in services.inventory.list_backups().await? {
                println!("{}  {}", backup, describe_backup(&backup));
            }
        }
        Command::Restore { backup } => {
            let inventory = services.inventory.restore_backup(&backup).await?;
            println!("Restored {} entries from {}", inventory.len(), backup);
        }
        Command::DeleteBackup { name } => {
            services.inventory.delete_backup(&name).await?;
            println!("Deleted {}", name);
        }
        Command::Settings {
            max_backups_per_day,
        } => {
            if let Some(max_backups_per_day) = max_backups_per_day {
                services
                    .settings
                    .save_settings(&AppSettings {
                        max_backups_per_day,
                    })
                    .await?;
            }
            let settings = services.settings.load_settings().await;
            println!("maxBackupsPerDay = {}", settings.max_backups_per_day);
        }
        Command::Lists { command } => run_lists(command, &services.lists).await?,
        Command::Compare { input } => {
            let text = read_input(&input).await?;
            let desired = parse_text(&text)?;
            let inventory = services.inventory.load_inventory().await?;
            let lists = services.lists.all_lists().await?;

            let comparison = compare(&desired, &inventory, &lists);
            println!("Cards you have ({}):", comparison.have.len());
            println!("{}", format_comparison_entries(&comparison.have));
            println!();
            println!("Cards missing ({}):", comparison.missing.len());
            for entry in &comparison.missing {
                println!(
                    "{}x {}  ({} available)",
                    entry.item.quantity,
                    to_title_case(&entry.item.name),
                    entry.available()
                );
            }
        }
        Command::Wipe => {
            let deleted = services.inventory.wipe().await?;
            println!("Deleted inventory and {} backup(s)", deleted);
        }
    }
    Ok(())
}

async fn run_lists(
    command: ListsCommand,
    lists: &CustomListsService,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        ListsCommand::Show { name: None } => {
            for list in lists.all_lists().await? {
                let marker = if list.in_use { "*" } else { " " };
                println!("{} {} ({} cards)", marker, list.name, list.total_quantity());
            }
        }
        ListsCommand::Show { name: Some(name) } => {
            let list = lists
                .load_list(&name)
                .await
                .ok_or_else(|| Error::ListNotFound(name.clone()))?;
            println!("{}{}", list.name, if list.in_use { " (in use)" } else { "" });
            for item in &list.decklist {
                println!("{}", format_list_item(item));
            }
        }
        ListsCommand::Save { name, input } => {
            let text = read_input(&input).await?;
            let decklist = parse_list_text(&text)?;
            let in_use = lists
                .load_list(&name)
                .await
                .map(|existing| existing.in_use)
                .unwrap_or(false);
            let list = CustomList {
                name,
                in_use,
                decklist,
            };
            lists.save_list(&list).await?;
            println!("Saved '{}' with {} entries", list.name, list.decklist.len());
        }
        ListsCommand::Delete { name } => {
            lists.delete_list(&name).await?;
            println!("Deleted '{}'", name);
        }
        ListsCommand::Rename { old_name, new_name } => {
            lists.rename_list(&old_name, &new_name).await?;
            println!("Renamed '{}' to '{}'", old_name, new_name);
        }
        ListsCommand::Use { name } => {
            require_list(lists, &name).await?;
            lists.set_in_use(&name, true).await?;
            print_conflicts(lists, &name).await?;
        }
        ListsCommand::Unuse { name } => {
            require_list(lists, &name).await?;
            lists.set_in_use(&name, false).await?;
        }
    }
    Ok(())
}

async fn require_list(lists: &CustomListsService, name: &str) -> Result<(), Error> {
    if lists.list_exists(name).await {
        Ok(())
    } else {
        Err(Error::ListNotFound(name.to_string()))
    }
}

/// Prints the other in-use lists sharing cards with `name`
async fn print_conflicts(
    lists: &CustomListsService,
    name: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let all = lists.all_lists().await?;
    let Some(list) = all.iter().find(|list| list.name == name) else {
        return Ok(());
    };
    for item in &list.decklist {
        let others: Vec<&str> = lists_containing(&all, &item.name)
            .into_iter()
            .filter(|other| other.name != name)
            .map(|other| other.name.as_str())
            .collect();
        if !others.is_empty() {
            println!("{} also used by: {}", item.name, others.join(", "));
        }
    }
    Ok(())
}
