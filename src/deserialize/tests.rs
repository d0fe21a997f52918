//! Tests for the deserialize module

use super::*;
use crate::types::JsonValue;
use pretty_assertions::assert_eq;
use serde::Deserialize;
use serde_json::json;
use std::cell::Cell;

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct Item {
    k: String,
}

#[test]
fn test_all_valid_records() {
    let records = vec![json!({"k": "o1"}), json!({"k": "o2"}), json!({"k": "o3"})];

    let items: Vec<Item> = deserialize_records(&records, &SerdeValidator::new());

    assert_eq!(
        items,
        vec![
            Item { k: "o1".into() },
            Item { k: "o2".into() },
            Item { k: "o3".into() },
        ]
    );
}

#[test]
fn test_invalid_record_skipped() {
    let records = vec![json!({"k": "o1"}), json!({"k": 2}), json!({"k": "o3"})];

    let items: Vec<Item> = deserialize_records(&records, &SerdeValidator::new());

    assert_eq!(
        items,
        vec![Item { k: "o1".into() }, Item { k: "o3".into() }]
    );
}

#[test]
fn test_closure_validator_called_once_per_record_in_order() {
    let records = vec![json!({"k": "o1"}), json!({"k": "o2"}), json!({"k": "o3"})];
    let calls = Cell::new(0);
    let seen = std::cell::RefCell::new(Vec::new());

    let validator = |record: &JsonValue| {
        calls.set(calls.get() + 1);
        let k = record["k"].as_str()?.to_string();
        seen.borrow_mut().push(k.clone());
        (k != "o2").then_some(k)
    };

    let objects = deserialize_records(&records, &validator);

    assert_eq!(objects, vec!["o1".to_string(), "o3".to_string()]);
    assert_eq!(calls.get(), 3);
    assert_eq!(
        seen.into_inner(),
        vec!["o1".to_string(), "o2".to_string(), "o3".to_string()]
    );
}

#[test]
fn test_empty_input() {
    let items: Vec<Item> = deserialize_records(&[], &SerdeValidator::new());
    assert!(items.is_empty());
}

#[test]
fn test_custom_validator_struct() {
    struct PositiveIds;

    impl RecordValidator<u64> for PositiveIds {
        fn validate_and_construct(&self, record: &JsonValue) -> Option<u64> {
            record["id"].as_u64().filter(|id| *id > 0)
        }
    }

    let records = vec![json!({"id": 3}), json!({"id": 0}), json!({"name": "x"}), json!({"id": 9})];
    let ids = deserialize_records(&records, &PositiveIds);
    assert_eq!(ids, vec![3, 9]);

    let dyn_validator: &dyn RecordValidator<u64> = &PositiveIds;
    assert_eq!(deserialize_records(&records, dyn_validator), vec![3, 9]);
}
