//! Unit tests for custom list persistence.

use super::*;
use crate::models::ListItem;
use crate::storage::{FileSystemAdapter, InMemoryAdapter};
use std::sync::Arc;

fn service() -> (Arc<InMemoryAdapter>, CustomListsService) {
    let adapter = Arc::new(InMemoryAdapter::new());
    let service = CustomListsService::new(StorageService::new(adapter.clone()));
    (adapter, service)
}

fn deck(name: &str, in_use: bool) -> CustomList {
    CustomList {
        name: name.to_string(),
        in_use,
        decklist: vec![ListItem::new(4, "Counterspell"), ListItem::new(1, "Island")],
    }
}

mod sanitize_tests {
    use super::*;

    #[test]
    fn keeps_safe_characters() {
        assert_eq!(sanitize_list_name("Mono-Blue_v2"), "Mono-Blue_v2");
    }

    #[test]
    fn replaces_everything_else() {
        assert_eq!(sanitize_list_name("My Deck (v2)!"), "My_Deck__v2__");
        assert_eq!(sanitize_list_name("Übung"), "_bung");
    }

    #[test]
    fn builds_json_filename() {
        assert_eq!(list_filename("Burn deck"), "Burn_deck.json");
    }
}

mod persistence_tests {
    use super::*;

    #[tokio::test]
    async fn save_then_load() {
        let (adapter, service) = service();
        service.save_list(&deck("Burn deck", false)).await.unwrap();

        assert_eq!(service.load_list("Burn deck").await, Some(deck("Burn deck", false)));
        let raw = adapter.read_file("Burn_deck.json").await.unwrap();
        assert!(raw.contains("\"inUse\": false"));
        assert!(raw.contains("\"decklist\""));
    }

    #[tokio::test]
    async fn missing_list_loads_as_none() {
        let (_, service) = service();
        assert_eq!(service.load_list("nope").await, None);
        assert!(!service.list_exists("nope").await);
    }

    #[tokio::test]
    async fn create_rejects_duplicate_name() {
        let (_, service) = service();
        service.create_list(&deck("Burn", false)).await.unwrap();
        let err = service.create_list(&deck("Burn", true)).await.unwrap_err();
        assert!(matches!(err, Error::ListExists(name) if name == "Burn"));
    }

    #[tokio::test]
    async fn delete_removes_file_and_in_use_entry() {
        let (_, service) = service();
        service.save_list(&deck("Burn", true)).await.unwrap();
        assert_eq!(service.lists_in_use().await, vec!["Burn".to_string()]);

        service.delete_list("Burn").await.unwrap();
        assert!(!service.list_exists("Burn").await);
        assert!(service.lists_in_use().await.is_empty());
    }

    #[tokio::test]
    async fn all_lists_skips_system_and_invalid_files() {
        let (adapter, service) = service();
        service.save_list(&deck("Burn", false)).await.unwrap();
        service.save_list(&deck("Control", true)).await.unwrap();
        adapter.write_file("inventory.json", "[]").await.unwrap();
        adapter
            .write_file("inventory_backup_17_10_26_09_00.json", "[]")
            .await
            .unwrap();
        adapter
            .write_file("app_settings.json", r#"{"maxBackupsPerDay": 4}"#)
            .await
            .unwrap();
        adapter.write_file("garbage.json", "{nope").await.unwrap();
        adapter
            .write_file("other.json", r#"{"something": "else"}"#)
            .await
            .unwrap();

        let mut names: Vec<String> = service
            .all_lists()
            .await
            .unwrap()
            .into_iter()
            .map(|l| l.name)
            .collect();
        names.sort();
        assert_eq!(names, vec!["Burn".to_string(), "Control".to_string()]);
    }
}

mod in_use_tests {
    use super::*;

    #[tokio::test]
    async fn lists_in_use_empty_without_cache_file() {
        let (_, service) = service();
        assert!(service.lists_in_use().await.is_empty());
    }

    #[tokio::test]
    async fn set_in_use_updates_list_and_cache() {
        let (_, service) = service();
        service.save_list(&deck("Burn", false)).await.unwrap();
        service.save_list(&deck("Control", false)).await.unwrap();

        service.set_in_use("Control", true).await.unwrap();
        assert!(service.load_list("Control").await.unwrap().in_use);
        assert_eq!(service.lists_in_use().await, vec!["Control".to_string()]);

        service.set_in_use("Control", false).await.unwrap();
        assert!(service.lists_in_use().await.is_empty());
    }

    #[tokio::test]
    async fn set_in_use_on_missing_list_is_ignored() {
        let (adapter, service) = service();
        service.set_in_use("Ghost", true).await.unwrap();
        assert!(adapter.is_empty().await);
    }
}

mod rename_tests {
    use super::*;

    #[tokio::test]
    async fn rename_moves_file_and_in_use_entry() {
        let (_, service) = service();
        service.save_list(&deck("Burn", true)).await.unwrap();

        let renamed = service.rename_list("Burn", "Red Burn").await.unwrap();
        assert_eq!(renamed.name, "Red Burn");
        assert!(service.load_list("Burn").await.is_none());
        assert_eq!(service.load_list("Red Burn").await.unwrap().decklist.len(), 2);
        assert_eq!(service.lists_in_use().await, vec!["Red Burn".to_string()]);
    }

    #[tokio::test]
    async fn rename_onto_existing_list_fails() {
        let (_, service) = service();
        service.save_list(&deck("Burn", false)).await.unwrap();
        service.save_list(&deck("Control", false)).await.unwrap();

        let err = service.rename_list("Burn", "Control").await.unwrap_err();
        assert!(matches!(err, Error::ListExists(_)));
        assert!(service.list_exists("Burn").await);
    }

    #[tokio::test]
    async fn rename_to_same_file_keeps_list() {
        let (_, service) = service();
        service.save_list(&deck("Burn deck", false)).await.unwrap();

        service.rename_list("Burn deck", "Burn_deck").await.unwrap();
        assert_eq!(service.load_list("Burn_deck").await.unwrap().name, "Burn_deck");
    }

    #[tokio::test]
    async fn rename_missing_list_fails() {
        let (_, service) = service();
        assert!(matches!(
            service.rename_list("Ghost", "Spirit").await,
            Err(Error::ListNotFound(_))
        ));
    }
}
