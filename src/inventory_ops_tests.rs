//! Unit tests for merge and removal.

use super::*;

mod merge_items_tests {
    use super::*;

    #[test]
    fn sums_matching_keys() {
        let merged = merge_items(&[Item::new(5, "Sword")], &[Item::new(3, "Sword")]);
        assert_eq!(merged, vec![Item::new(8, "Sword")]);
    }

    #[test]
    fn appends_new_keys_after_existing() {
        let inventory = vec![Item::new(1, "Bolt"), Item::new(2, "Island")];
        let merged = merge_items(&inventory, &[Item::new(4, "Forest")]);
        assert_eq!(
            merged,
            vec![
                Item::new(1, "Bolt"),
                Item::new(2, "Island"),
                Item::new(4, "Forest")
            ]
        );
    }

    #[test]
    fn different_tags_are_different_keys() {
        let merged = merge_items(
            &[Item::with_tag(1, "Sol Ring", "foil")],
            &[Item::new(1, "Sol Ring")],
        );
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn matching_ignores_case_and_keeps_existing_spelling() {
        let merged = merge_items(
            &[Item::with_tag(2, "Sol Ring", "Foil")],
            &[Item::with_tag(3, "sol ring", "FOIL")],
        );
        assert_eq!(merged, vec![Item::with_tag(5, "Sol Ring", "Foil")]);
    }

    #[test]
    fn sums_past_line_cap() {
        let merged = merge_items(&[Item::new(999, "Island")], &[Item::new(999, "Island")]);
        assert_eq!(merged[0].quantity, 1998);
    }

    #[test]
    fn merges_duplicates_within_additions() {
        let merged = merge_items(&[], &[Item::new(1, "Bolt"), Item::new(2, "bolt")]);
        assert_eq!(merged, vec![Item::new(3, "Bolt")]);
    }

    #[test]
    fn does_not_mutate_inputs() {
        let inventory = vec![Item::new(5, "Sword")];
        let additions = vec![Item::new(3, "Sword")];
        let _ = merge_items(&inventory, &additions);
        assert_eq!(inventory, vec![Item::new(5, "Sword")]);
        assert_eq!(additions, vec![Item::new(3, "Sword")]);
    }

    #[test]
    fn merge_is_associative_for_additions() {
        let base = vec![Item::new(1, "Bolt")];
        let a = vec![Item::new(2, "Bolt"), Item::new(1, "Island")];
        let b = vec![Item::new(4, "Island"), Item::new(3, "Forest")];

        let left = merge_items(&merge_items(&base, &a), &b);
        let right = merge_items(&base, &merge_items(&a, &b));
        assert_eq!(left, right);
    }
}

mod remove_items_tests {
    use super::*;

    #[test]
    fn reduces_quantity() {
        let result = remove_items(&[Item::new(5, "Sword")], &[Item::new(2, "Sword")]);
        assert_eq!(result.inventory, vec![Item::new(3, "Sword")]);
        assert!(result.removed_keys.contains(&ItemKey::new("Sword", None)));
    }

    #[test]
    fn deletes_entry_reaching_zero() {
        let result = remove_items(&[Item::new(5, "Sword")], &[Item::new(5, "Sword")]);
        assert!(result.inventory.is_empty());
        assert_eq!(result.removed_keys.len(), 1);
    }

    #[test]
    fn over_removal_deletes_and_still_reports_key() {
        let result = remove_items(&[Item::new(3, "Sword")], &[Item::new(5, "Sword")]);
        assert!(result.inventory.is_empty());
        assert!(result.was_applied(&Item::new(5, "Sword")));
    }

    #[test]
    fn ignores_unknown_keys() {
        let inventory = vec![Item::new(3, "Sword")];
        let result = remove_items(&inventory, &[Item::new(1, "Shield")]);
        assert_eq!(result.inventory, inventory);
        assert!(result.removed_keys.is_empty());
        assert!(!result.was_applied(&Item::new(1, "Shield")));
    }

    #[test]
    fn tag_must_match() {
        let inventory = vec![Item::with_tag(3, "Sword", "foil")];
        let result = remove_items(&inventory, &[Item::new(1, "Sword")]);
        assert_eq!(result.inventory, inventory);
        assert!(result.removed_keys.is_empty());
    }

    #[test]
    fn matching_ignores_case() {
        let result = remove_items(
            &[Item::with_tag(3, "Sword", "Foil")],
            &[Item::with_tag(1, "SWORD", "foil")],
        );
        assert_eq!(result.inventory, vec![Item::with_tag(2, "Sword", "Foil")]);
    }

    #[test]
    fn keeps_relative_order_of_survivors() {
        let inventory = vec![
            Item::new(1, "A"),
            Item::new(2, "B"),
            Item::new(3, "C"),
        ];
        let result = remove_items(&inventory, &[Item::new(2, "B")]);
        assert_eq!(result.inventory, vec![Item::new(1, "A"), Item::new(3, "C")]);
    }

    #[test]
    fn second_request_after_deletion_is_a_no_op() {
        let result = remove_items(
            &[Item::new(2, "Sword")],
            &[Item::new(2, "Sword"), Item::new(1, "Sword")],
        );
        assert!(result.inventory.is_empty());
        assert_eq!(result.removed_keys.len(), 1);
    }
}
