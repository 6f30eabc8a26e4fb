// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, Utc};
use rusqlite::Connection;
use sproutbook::backup::{self, FORMAT_VERSION};
use sproutbook::db;
use sproutbook::error::BackupError;
use sproutbook::models::{Account, AccountKind, Category, CategoryKind, Transaction, TxKind};
use sproutbook::money;
use sproutbook::restore;
use sproutbook::store;
use tempfile::tempdir;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn
}

fn seed_scenario(conn: &Connection) -> (i64, i64) {
    let cat_id = store::insert_category(
        conn,
        &Category {
            id: 0,
            name: "飲食".into(),
            icon: "fork.knife".into(),
            color_hex: "#FF9F45".into(),
            kind: CategoryKind::Expense,
            sort_order: 0,
            is_default: true,
        },
    )
    .unwrap();
    let acct_id = store::insert_account(
        conn,
        &Account {
            id: 0,
            name: "現金".into(),
            kind: AccountKind::Cash,
            icon: "wallet.pass.fill".into(),
            color_hex: "#58C2A9".into(),
            initial_balance: money::parse_amount("1000"),
            sort_order: 0,
            is_default: true,
        },
    )
    .unwrap();
    store::insert_transaction(
        conn,
        &Transaction {
            id: 0,
            amount: money::parse_amount("120"),
            kind: TxKind::Expense,
            category_id: Some(cat_id),
            account_id: Some(acct_id),
            note: "午餐".into(),
            occurred_at: NaiveDate::parse_from_str("2025-06-01", "%Y-%m-%d").unwrap(),
            created_at: Utc::now(),
            is_sample: false,
        },
    )
    .unwrap();
    (cat_id, acct_id)
}

#[test]
fn create_backup_resolves_references_through_export_ids() {
    let conn = setup();
    seed_scenario(&conn);

    let doc = backup::create_backup(&conn).unwrap();
    assert_eq!(doc.format_version, FORMAT_VERSION);
    assert_eq!(doc.summary.total_categories, 1);
    assert_eq!(doc.summary.total_accounts, 1);
    assert_eq!(doc.summary.total_transactions, 1);

    let tx = &doc.transactions[0];
    assert_eq!(
        tx.category_backup_id.as_deref(),
        Some(doc.categories[0].backup_id.as_str())
    );
    assert_eq!(
        tx.account_backup_id.as_deref(),
        Some(doc.accounts[0].backup_id.as_str())
    );
    assert_eq!(tx.amount, "120");
}

#[test]
fn export_ids_are_fresh_per_call() {
    let conn = setup();
    seed_scenario(&conn);
    let a = backup::create_backup(&conn).unwrap();
    let b = backup::create_backup(&conn).unwrap();
    assert_ne!(a.categories[0].backup_id, b.categories[0].backup_id);
    assert_ne!(a.accounts[0].backup_id, b.accounts[0].backup_id);
}

#[test]
fn backup_excludes_samples() {
    let conn = setup();
    seed_scenario(&conn);
    store::insert_transaction(
        &conn,
        &Transaction {
            id: 0,
            amount: money::parse_amount("59"),
            kind: TxKind::Expense,
            category_id: None,
            account_id: None,
            note: "demo".into(),
            occurred_at: NaiveDate::parse_from_str("2025-06-02", "%Y-%m-%d").unwrap(),
            created_at: Utc::now(),
            is_sample: true,
        },
    )
    .unwrap();

    let doc = backup::create_backup(&conn).unwrap();
    assert_eq!(doc.summary.total_transactions, 1);
}

#[test]
fn transaction_without_category_exports_null_reference() {
    let conn = setup();
    let (_cat, acct_id) = seed_scenario(&conn);
    store::insert_transaction(
        &conn,
        &Transaction {
            id: 0,
            amount: money::parse_amount("300"),
            kind: TxKind::Income,
            category_id: None,
            account_id: Some(acct_id),
            note: String::new(),
            occurred_at: NaiveDate::parse_from_str("2025-06-03", "%Y-%m-%d").unwrap(),
            created_at: Utc::now(),
            is_sample: false,
        },
    )
    .unwrap();

    let doc = backup::create_backup(&conn).unwrap();
    let uncategorized = doc
        .transactions
        .iter()
        .find(|t| t.category_backup_id.is_none())
        .unwrap();
    assert!(uncategorized.account_backup_id.is_some());
}

#[test]
fn backup_then_restore_reproduces_the_store() {
    let conn = setup();
    seed_scenario(&conn);
    let doc = backup::create_backup(&conn).unwrap();

    let mut fresh = setup();
    restore::restore(&mut fresh, &doc).unwrap();

    let accounts = store::all_accounts(&fresh).unwrap();
    assert_eq!(accounts.len(), 1);
    assert_eq!(accounts[0].name, "現金");
    assert_eq!(
        store::account_balance(&fresh, accounts[0].id).unwrap(),
        money::parse_amount("880")
    );

    let txs = store::real_transactions(&fresh).unwrap();
    assert_eq!(txs.len(), 1);
    assert_eq!(txs[0].category_id, Some(store::all_categories(&fresh).unwrap()[0].id));
}

#[test]
fn load_backup_rejects_newer_format_version() {
    let conn = setup();
    seed_scenario(&conn);
    let doc = backup::create_backup(&conn).unwrap();
    let json = backup::to_json(&doc)
        .unwrap()
        .replace("\"format_version\": 1", "\"format_version\": 99");

    match backup::load_backup(json.as_bytes()) {
        Err(BackupError::Version { found, supported }) => {
            assert_eq!(found, 99);
            assert_eq!(supported, FORMAT_VERSION);
        }
        other => panic!("expected Version error, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn load_backup_rejects_malformed_bytes() {
    match backup::load_backup(b"not json at all") {
        Err(BackupError::Decode(_)) => {}
        other => panic!("expected Decode error, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn backup_file_round_trip_and_missing_file() {
    let conn = setup();
    seed_scenario(&conn);
    let doc = backup::create_backup(&conn).unwrap();

    let dir = tempdir().unwrap();
    let path = dir.path().join("backup.json");
    backup::write_backup_file(&doc, &path).unwrap();

    let loaded = backup::read_backup_file(&path).unwrap();
    assert_eq!(loaded.summary.total_transactions, 1);
    assert_eq!(loaded.categories[0].backup_id, doc.categories[0].backup_id);

    match backup::read_backup_file(&dir.path().join("missing.json")) {
        Err(BackupError::NotFound(_)) => {}
        other => panic!("expected NotFound error, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn backup_json_has_sorted_keys() {
    let conn = setup();
    seed_scenario(&conn);
    let doc = backup::create_backup(&conn).unwrap();
    let json = backup::to_json(&doc).unwrap();

    let accounts = json.find("\"accounts\"").unwrap();
    let categories = json.find("\"categories\"").unwrap();
    let format_version = json.find("\"format_version\"").unwrap();
    let transactions = json.find("\"transactions\"").unwrap();
    assert!(accounts < categories);
    assert!(categories < format_version);
    assert!(format_version < transactions);
}
