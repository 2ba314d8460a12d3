//! Property-based tests using proptest
//!
//! These tests verify the correctness of the view binding (record -> table
//! row) and of the client-side filter using randomized inputs.

use proptest::prelude::*;
use serde_json::{json, Value};
use tbib::resource::client::{extract_json_value, record_id};
use tbib::resource::get_resource;
use tbib::ui::build_row_cells;

/// Generate arbitrary category records for testing
fn arb_category() -> impl Strategy<Value = Value> {
    (
        "[a-z0-9]{1,8}",            // id
        "[A-Za-z][A-Za-z ]{0,30}",  // name
        "[A-Za-z0-9 ,.]{0,60}",     // description
    )
        .prop_map(|(id, name, description)| {
            json!({
                "id": id,
                "nomeCategoria": name,
                "descricaoCategoria": description
            })
        })
}

/// Generate a collection of categories
fn arb_collection() -> impl Strategy<Value = Vec<Value>> {
    prop::collection::vec(arb_category(), 0..100)
}

/// Client-side filter mirror: case-insensitive substring match across all
/// columns, order-preserving
fn filter_items(items: &[Value], filter: &str) -> Vec<Value> {
    if filter.is_empty() {
        return items.to_vec();
    }

    let def = get_resource("categorias").unwrap();
    let filter_lower = filter.to_lowercase();
    items
        .iter()
        .filter(|item| {
            def.columns.iter().any(|col| {
                extract_json_value(item, &col.json_path)
                    .to_lowercase()
                    .contains(&filter_lower)
            })
        })
        .cloned()
        .collect()
}

proptest! {
    /// One rendered row per record, no more, no less
    #[test]
    fn row_count_equals_record_count(items in arb_collection()) {
        let def = get_resource("categorias").unwrap();
        let rows: Vec<Vec<String>> = items.iter().map(|i| build_row_cells(def, i)).collect();
        prop_assert_eq!(rows.len(), items.len());
    }

    /// Every row carries exactly one cell per column definition
    #[test]
    fn row_width_equals_column_count(item in arb_category()) {
        let def = get_resource("categorias").unwrap();
        let row = build_row_cells(def, &item);
        prop_assert_eq!(row.len(), def.columns.len());
    }

    /// Each row's id cell is that record's own id, the one its actions
    /// address
    #[test]
    fn rows_carry_their_own_id(items in arb_collection()) {
        let def = get_resource("categorias").unwrap();
        for item in &items {
            let row = build_row_cells(def, item);
            let id = record_id(item, def).expect("generated records have ids");
            prop_assert_eq!(&row[0], &id);
        }
    }

    /// Empty filter returns all items
    #[test]
    fn empty_filter_returns_all(items in arb_collection()) {
        let filtered = filter_items(&items, "");
        prop_assert_eq!(filtered.len(), items.len());
    }

    /// Filtering is idempotent - filtering twice gives the same result
    #[test]
    fn filter_is_idempotent(
        items in arb_collection(),
        filter in "[a-z]{0,10}"
    ) {
        let filtered_once = filter_items(&items, &filter);
        let filtered_twice = filter_items(&filtered_once, &filter);
        prop_assert_eq!(filtered_once, filtered_twice);
    }

    /// Filtering never increases the number of items
    #[test]
    fn filter_never_increases_count(
        items in arb_collection(),
        filter in ".*"
    ) {
        let filtered = filter_items(&items, &filter);
        prop_assert!(filtered.len() <= items.len());
    }

    /// Filtering preserves the server-defined relative order
    #[test]
    fn filter_preserves_order(
        items in arb_collection(),
        filter in "[a-z]{0,5}"
    ) {
        let filtered = filter_items(&items, &filter);
        let ids_all: Vec<String> = items
            .iter()
            .map(|i| extract_json_value(i, "id"))
            .collect();
        let ids_filtered: Vec<String> = filtered
            .iter()
            .map(|i| extract_json_value(i, "id"))
            .collect();

        // filtered ids appear as a subsequence of the original order
        let mut cursor = 0;
        for id in &ids_filtered {
            let pos = ids_all[cursor..].iter().position(|x| x == id);
            prop_assert!(pos.is_some(), "filtered id not found in original order");
            cursor += pos.unwrap() + 1;
        }
    }

    /// Case-insensitive filtering matches regardless of filter case
    #[test]
    fn filter_is_case_insensitive(
        items in arb_collection(),
        filter in "[a-zA-Z]{1,5}"
    ) {
        let filtered_lower = filter_items(&items, &filter.to_lowercase());
        let filtered_upper = filter_items(&items, &filter.to_uppercase());
        prop_assert_eq!(filtered_lower.len(), filtered_upper.len());
    }
}

/// Tests for JSON path extraction
mod json_path_tests {
    use super::*;

    proptest! {
        /// Extracting the name always returns the generated string
        #[test]
        fn name_extraction_returns_value(item in arb_category()) {
            let name = extract_json_value(&item, "nomeCategoria");
            prop_assert_eq!(Some(name.as_str()), item["nomeCategoria"].as_str());
        }

        /// Extracting a non-existent path returns the placeholder
        #[test]
        fn nonexistent_path_returns_placeholder(item in arb_category()) {
            let value = extract_json_value(&item, "nonexistent.deeply.nested");
            prop_assert_eq!(value, "-");
        }
    }

    /// Records without an id cannot be addressed by row actions
    #[test]
    fn missing_id_yields_no_record_id() {
        let def = get_resource("categorias").unwrap();
        assert_eq!(record_id(&json!({"nomeCategoria": "x"}), def), None);
        assert_eq!(record_id(&json!({"id": ""}), def), None);
    }
}
