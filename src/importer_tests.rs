//! Unit tests for the JSON import validator.

use super::*;

mod accepted_input_tests {
    use super::*;

    #[test]
    fn accepts_items_with_and_without_tags() {
        let inventory = import_json_inventory(
            r#"[
                {"quantity": 3, "name": "Island"},
                {"quantity": 1, "name": "Sol Ring", "tag": "foil"}
            ]"#,
        )
        .unwrap();

        assert_eq!(
            inventory,
            vec![Item::new(3, "Island"), Item::with_tag(1, "Sol Ring", "foil")]
        );
    }

    #[test]
    fn accepts_empty_array() {
        assert!(import_json_inventory("[]").unwrap().is_empty());
    }

    #[test]
    fn does_not_merge_duplicates() {
        let inventory = import_json_inventory(
            r#"[{"quantity": 1, "name": "Island"}, {"quantity": 2, "name": "Island"}]"#,
        )
        .unwrap();
        assert_eq!(inventory.len(), 2);
    }

    #[test]
    fn accepts_quantities_above_line_cap() {
        let inventory = import_json_inventory(r#"[{"quantity": 1500, "name": "Island"}]"#).unwrap();
        assert_eq!(inventory[0].quantity, 1500);
    }
}

mod rejected_input_tests {
    use super::*;

    #[test]
    fn rejects_syntax_errors_with_parser_message() {
        let err = import_json_inventory("[{").unwrap_err();
        assert!(matches!(err, ImportError::InvalidJson(_)));
        assert!(err.to_string().starts_with("Invalid JSON: "));
    }

    #[test]
    fn rejects_non_array_top_level() {
        let err = import_json_inventory(r#"{"quantity": 1, "name": "Island"}"#).unwrap_err();
        assert_eq!(err, ImportError::NotAnArray);
        assert_eq!(err.to_string(), "JSON must be an array of items");
    }

    #[test]
    fn rejects_negative_quantity_with_index() {
        let err = import_json_inventory(
            r#"[{"quantity": 1, "name": "Island"}, {"quantity": -1, "name": "Forest"}]"#,
        )
        .unwrap_err();
        assert_eq!(err, ImportError::InvalidItem { index: 1 });
        assert_eq!(
            err.to_string(),
            "Item 1: invalid format. Expected { quantity: number, name: string, tag?: string }"
        );
    }

    #[test]
    fn rejects_zero_quantity() {
        let err = import_json_inventory(r#"[{"quantity": 0, "name": "Island"}]"#).unwrap_err();
        assert_eq!(err, ImportError::InvalidItem { index: 0 });
    }

    #[test]
    fn rejects_fractional_quantity() {
        assert!(import_json_inventory(r#"[{"quantity": 2.5, "name": "Island"}]"#).is_err());
    }

    #[test]
    fn rejects_string_quantity() {
        assert!(import_json_inventory(r#"[{"quantity": "2", "name": "Island"}]"#).is_err());
    }

    #[test]
    fn rejects_blank_name() {
        let err = import_json_inventory(r#"[{"quantity": 2, "name": "   "}]"#).unwrap_err();
        assert_eq!(err, ImportError::InvalidItem { index: 0 });
    }

    #[test]
    fn rejects_missing_name() {
        assert!(import_json_inventory(r#"[{"quantity": 2}]"#).is_err());
    }

    #[test]
    fn rejects_non_string_tag() {
        assert!(import_json_inventory(r#"[{"quantity": 2, "name": "Island", "tag": 5}]"#).is_err());
        assert!(
            import_json_inventory(r#"[{"quantity": 2, "name": "Island", "tag": null}]"#).is_err()
        );
    }

    #[test]
    fn rejects_non_object_element() {
        let err = import_json_inventory(r#"[{"quantity": 2, "name": "Island"}, 7]"#).unwrap_err();
        assert_eq!(err, ImportError::InvalidItem { index: 1 });
    }
}
