#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::*;
use crate::storage::{KeyValueStore, MemoryStore};

fn storage() -> TransactionStorage {
    let kv: Box<dyn KeyValueStore> = Box::new(MemoryStore::default());
    TransactionStorage::new(kv)
}

fn run(command: Command, storage: &mut TransactionStorage) -> Result<String> {
    let mut out = Vec::new();
    run_command(command, storage, &mut out)?;
    Ok(String::from_utf8(out).unwrap())
}

fn add(amount: &str, category: &str, month: &str) -> Command {
    Command::Add {
        amount: amount.into(),
        category: category.into(),
        month: Some(month.into()),
    }
}

#[test]
fn test_add_persists() {
    let mut storage = storage();
    let out = run(add("12.5", "food", "2024-05"), &mut storage).unwrap();
    assert_eq!(out.trim(), "Added 12.50 to food for 2024-05");

    let saved = storage.load();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].amount, dec!(12.5));
}

#[test]
fn test_add_appends_after_existing() {
    let mut storage = storage();
    run(add("1", "a", "2024-05"), &mut storage).unwrap();
    run(add("2", "b", "2024-06"), &mut storage).unwrap();
    let saved = storage.load();
    assert_eq!(saved.len(), 2);
    assert_eq!(saved[1].category, "b");
    assert!(saved[1].id > saved[0].id);
}

#[test]
fn test_add_rejects_empty_category() {
    let mut storage = storage();
    assert!(run(add("5", "", "2024-05"), &mut storage).is_err());
    assert!(storage.load().is_empty());
}

#[test]
fn test_add_rejects_non_numeric_amount() {
    let mut storage = storage();
    assert!(run(add("lots", "food", "2024-05"), &mut storage).is_err());
    assert!(storage.load().is_empty());
}

#[test]
fn test_add_rejects_bad_month() {
    let mut storage = storage();
    let err = run(add("5", "food", "2024-5"), &mut storage).unwrap_err();
    assert!(err.to_string().contains("Invalid month"));
}

#[test]
fn test_add_defaults_to_current_month() {
    let mut storage = storage();
    let cmd = Command::Add {
        amount: "3".into(),
        category: "tea".into(),
        month: None,
    };
    run(cmd, &mut storage).unwrap();
    assert_eq!(storage.load()[0].date, current_month());
}

#[test]
fn test_summary_for_month() {
    let mut storage = storage();
    run(add("10", "food", "2024-05"), &mut storage).unwrap();
    run(add("5", "food", "2024-05"), &mut storage).unwrap();
    run(add("20", "fuel", "2024-06"), &mut storage).unwrap();

    let out = run(
        Command::Summary {
            month: Some("2024-05".into()),
        },
        &mut storage,
    )
    .unwrap();
    assert!(out.contains("SpendTUI — 2024-05"));
    assert!(out.contains("Total:        15.00"));
    assert!(out.contains("food"));
    assert!(!out.contains("fuel"));
}

#[test]
fn test_summary_all_months() {
    let mut storage = storage();
    run(add("10", "food", "2024-05"), &mut storage).unwrap();
    run(add("20", "fuel", "2024-06"), &mut storage).unwrap();
    let out = run(Command::Summary { month: None }, &mut storage).unwrap();
    assert!(out.contains("All months"));
    assert!(out.contains("Total:        30.00"));
}

#[test]
fn test_summary_empty_month() {
    let mut storage = storage();
    let out = run(
        Command::Summary {
            month: Some("2030-01".into()),
        },
        &mut storage,
    )
    .unwrap();
    assert!(out.contains("Total:        0.00"));
    assert!(!out.contains("By Category"));
}

#[test]
fn test_list_in_insertion_order() {
    let mut storage = storage();
    run(add("1", "zeta", "2024-05"), &mut storage).unwrap();
    run(add("2", "alpha", "2024-05"), &mut storage).unwrap();
    let out = run(Command::List { month: None }, &mut storage).unwrap();
    let zeta = out.find("zeta").unwrap();
    let alpha = out.find("alpha").unwrap();
    assert!(zeta < alpha);
}

#[test]
fn test_list_empty() {
    let mut storage = storage();
    let out = run(
        Command::List {
            month: Some("2024-05".into()),
        },
        &mut storage,
    )
    .unwrap();
    assert_eq!(out.trim(), "No transactions for 2024-05");
}

#[test]
fn test_months_first_seen_order() {
    let mut storage = storage();
    run(add("1", "a", "2024-06"), &mut storage).unwrap();
    run(add("1", "a", "2024-05"), &mut storage).unwrap();
    run(add("1", "a", "2024-06"), &mut storage).unwrap();
    let out = run(Command::Months, &mut storage).unwrap();
    assert_eq!(out, "2024-06\n2024-05\n");
}
