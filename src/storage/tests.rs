#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::*;
use crate::models::TransactionDraft;
use crate::store::TransactionStore;

const SAVED: &str = r#"[{"id":1715000000000,"amount":10,"category":"food","date":"2024-05"},{"id":1715000000001,"amount":5.25,"category":"Food","date":"2024-05"},{"id":1715000000002,"amount":-20,"category":"fuel","date":"2024-06"}]"#;

fn sample() -> Vec<Transaction> {
    vec![
        Transaction::new(1, dec!(10), "food".into(), "2024-05".into()),
        Transaction::new(2, dec!(5), "food".into(), "2024-05".into()),
        Transaction::new(3, dec!(20), "fuel".into(), "2024-06".into()),
    ]
}

// ── TransactionStorage ────────────────────────────────────────

#[test]
fn test_load_missing_slot_is_empty() {
    let storage = TransactionStorage::new(MemoryStore::default());
    assert!(storage.load().is_empty());
}

#[test]
fn test_load_malformed_json_is_empty() {
    let storage = TransactionStorage::new(MemoryStore::with_slot(TRANSACTIONS_KEY, "[{oops"));
    assert!(storage.load().is_empty());
}

#[test]
fn test_load_wrong_shape_is_empty() {
    let storage =
        TransactionStorage::new(MemoryStore::with_slot(TRANSACTIONS_KEY, r#"{"id":1}"#));
    assert!(storage.load().is_empty());
}

#[test]
fn test_load_reads_saved_list_in_order() {
    let storage = TransactionStorage::new(MemoryStore::with_slot(TRANSACTIONS_KEY, SAVED));
    let txns = storage.load();
    assert_eq!(txns.len(), 3);
    assert_eq!(txns[0].category, "food");
    assert_eq!(txns[1].category, "Food");
    assert_eq!(txns[1].amount, dec!(5.25));
    assert_eq!(txns[2].amount, dec!(-20));
}

#[test]
fn test_save_then_load() {
    let mut storage = TransactionStorage::new(MemoryStore::default());
    storage.save(&sample()).unwrap();
    assert_eq!(storage.load(), sample());
}

#[test]
fn test_save_replaces_previous_value() {
    let mut storage = TransactionStorage::new(MemoryStore::default());
    storage.save(&sample()).unwrap();
    storage.save(&sample()[..1]).unwrap();
    assert_eq!(storage.load().len(), 1);
    assert_eq!(storage.kv().writes, 2);
}

#[test]
fn test_save_of_load_is_byte_identical() {
    let mut storage = TransactionStorage::new(MemoryStore::with_slot(TRANSACTIONS_KEY, SAVED));
    let loaded = storage.load();
    storage.save(&loaded).unwrap();
    let raw = storage.kv().get(TRANSACTIONS_KEY).unwrap().unwrap();
    assert_eq!(raw, SAVED);
}

#[test]
fn test_unstorable_amount_never_reaches_the_slot() {
    let mut store = TransactionStore::default();
    assert!(store.append(&TransactionDraft::new("10", "food", "2024-05")).is_some());
    assert!(store
        .append(&TransactionDraft::new("79228162514264337593543950335", "food", "2024-05"))
        .is_none());

    let mut storage = TransactionStorage::new(MemoryStore::default());
    storage.save(store.transactions()).unwrap();
    assert_eq!(storage.load(), store.transactions());
}

#[test]
fn test_whole_amount_past_i64_round_trips() {
    let mut store = TransactionStore::default();
    store
        .append(&TransactionDraft::new("10000000000000000000000000000", "house", "2024-05"))
        .unwrap();

    let mut storage = TransactionStorage::new(MemoryStore::default());
    storage.save(store.transactions()).unwrap();
    let first = storage.kv().get(TRANSACTIONS_KEY).unwrap().unwrap();
    let loaded = storage.load();
    assert_eq!(loaded, store.transactions());

    storage.save(&loaded).unwrap();
    assert_eq!(storage.kv().get(TRANSACTIONS_KEY).unwrap().unwrap(), first);
}

#[test]
fn test_save_empty_list() {
    let mut storage = TransactionStorage::new(MemoryStore::default());
    storage.save(&[]).unwrap();
    assert_eq!(storage.kv().get(TRANSACTIONS_KEY).unwrap().unwrap(), "[]");
    assert!(storage.load().is_empty());
}

// ── SqliteStore ───────────────────────────────────────────────

#[test]
fn test_sqlite_missing_key() {
    let store = SqliteStore::open_in_memory().unwrap();
    assert_eq!(store.get("nothing").unwrap(), None);
}

#[test]
fn test_sqlite_set_then_get() {
    let mut store = SqliteStore::open_in_memory().unwrap();
    store.set("transactions", "[]").unwrap();
    assert_eq!(store.get("transactions").unwrap().as_deref(), Some("[]"));
}

#[test]
fn test_sqlite_set_overwrites() {
    let mut store = SqliteStore::open_in_memory().unwrap();
    store.set("k", "one").unwrap();
    store.set("k", "two").unwrap();
    assert_eq!(store.get("k").unwrap().as_deref(), Some("two"));
}

#[test]
fn test_sqlite_schema_version() {
    let store = SqliteStore::open_in_memory().unwrap();
    assert_eq!(store.schema_version().unwrap(), schema::CURRENT_VERSION);
}

#[test]
fn test_sqlite_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("spendtui.db");
    {
        let mut store = SqliteStore::open(&path).unwrap();
        store.set("transactions", SAVED).unwrap();
    }
    let store = SqliteStore::open(&path).unwrap();
    assert_eq!(store.get("transactions").unwrap().as_deref(), Some(SAVED));
    assert_eq!(store.schema_version().unwrap(), schema::CURRENT_VERSION);
}

#[test]
fn test_sqlite_refuses_newer_schema() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("spendtui.db");
    drop(SqliteStore::open(&path).unwrap());

    let conn = rusqlite::Connection::open(&path).unwrap();
    conn.execute(
        "UPDATE schema_version SET version = ?1",
        [schema::CURRENT_VERSION + 1],
    )
    .unwrap();
    drop(conn);

    let err = SqliteStore::open(&path).err().unwrap();
    assert!(format!("{err:#}").contains("newer than supported"));
}

#[test]
fn test_sqlite_reopen_keeps_single_version_row() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("spendtui.db");
    drop(SqliteStore::open(&path).unwrap());
    drop(SqliteStore::open(&path).unwrap());

    let conn = rusqlite::Connection::open(&path).unwrap();
    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM schema_version", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);
}

// ── FileStore ─────────────────────────────────────────────────

#[test]
fn test_file_missing_key() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::open(dir.path()).unwrap();
    assert_eq!(store.get("transactions").unwrap(), None);
}

#[test]
fn test_file_set_then_get() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = FileStore::open(dir.path()).unwrap();
    store.set("transactions", SAVED).unwrap();
    assert_eq!(store.get("transactions").unwrap().as_deref(), Some(SAVED));
    assert!(dir.path().join("transactions.json").is_file());
    assert!(!dir.path().join(".transactions.json.tmp").exists());
}

#[test]
fn test_file_creates_nested_dir() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("a").join("b");
    let mut store = FileStore::open(&nested).unwrap();
    store.set("k", "v").unwrap();
    assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
}

// ── Backend selection ─────────────────────────────────────────

#[test]
fn test_open_backend_round_trip() {
    for backend in [Backend::Sqlite, Backend::File] {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = TransactionStorage::new(open_backend(backend, dir.path()).unwrap());
        storage.save(&sample()).unwrap();

        let reopened = TransactionStorage::new(open_backend(backend, dir.path()).unwrap());
        assert_eq!(reopened.load(), sample(), "backend {backend}");
    }
}
