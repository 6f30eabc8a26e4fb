// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, Utc};
use rusqlite::Connection;
use sproutbook::backup::{
    self, AccountRecord, BackupDocument, CategoryRecord, Summary, TransactionRecord,
    FORMAT_VERSION,
};
use sproutbook::db;
use sproutbook::error::BackupError;
use sproutbook::models::{Account, AccountKind, Category, CategoryKind, Transaction, TxKind};
use sproutbook::money;
use sproutbook::restore;
use sproutbook::store;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn
}

fn seed(conn: &Connection, category: &str, account: &str, amounts: &[&str]) {
    let cat_id = store::insert_category(
        conn,
        &Category {
            id: 0,
            name: category.into(),
            icon: "tag.fill".into(),
            color_hex: "#FF9F45".into(),
            kind: CategoryKind::Expense,
            sort_order: 0,
            is_default: false,
        },
    )
    .unwrap();
    let acct_id = store::insert_account(
        conn,
        &Account {
            id: 0,
            name: account.into(),
            kind: AccountKind::Cash,
            icon: "wallet.pass.fill".into(),
            color_hex: "#58C2A9".into(),
            initial_balance: money::parse_amount("0"),
            sort_order: 0,
            is_default: false,
        },
    )
    .unwrap();
    for (i, amount) in amounts.iter().enumerate() {
        store::insert_transaction(
            conn,
            &Transaction {
                id: 0,
                amount: money::parse_amount(amount),
                kind: TxKind::Expense,
                category_id: Some(cat_id),
                account_id: Some(acct_id),
                note: String::new(),
                occurred_at: NaiveDate::parse_from_str("2025-06-01", "%Y-%m-%d").unwrap()
                    + chrono::Duration::days(i as i64),
                created_at: Utc::now(),
                is_sample: false,
            },
        )
        .unwrap();
    }
}

#[test]
fn restore_replaces_the_existing_store() {
    let mut conn = setup();
    seed(&conn, "舊分類", "舊帳戶", &["10", "20"]);

    let donor = setup();
    seed(&donor, "飲食", "現金", &["120"]);
    let doc = backup::create_backup(&donor).unwrap();

    restore::restore(&mut conn, &doc).unwrap();

    let categories = store::all_categories(&conn).unwrap();
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0].name, "飲食");
    let (c, a, t) = store::entity_counts(&conn).unwrap();
    assert_eq!((c, a, t), (1, 1, 1));
}

#[test]
fn restore_twice_yields_equivalent_state() {
    let donor = setup();
    seed(&donor, "飲食", "現金", &["120", "59"]);
    let doc = backup::create_backup(&donor).unwrap();

    let mut conn = setup();
    restore::restore(&mut conn, &doc).unwrap();
    let first_counts = store::entity_counts(&conn).unwrap();
    let first_balance = {
        let accounts = store::all_accounts(&conn).unwrap();
        store::account_balance(&conn, accounts[0].id).unwrap()
    };

    restore::restore(&mut conn, &doc).unwrap();
    assert_eq!(store::entity_counts(&conn).unwrap(), first_counts);
    let accounts = store::all_accounts(&conn).unwrap();
    assert_eq!(
        store::account_balance(&conn, accounts[0].id).unwrap(),
        first_balance
    );
    // Every transaction still resolves its category after the second pass.
    for t in store::real_transactions(&conn).unwrap() {
        assert!(t.category_id.is_some());
        assert!(t.account_id.is_some());
    }
}

#[test]
fn failed_restore_rolls_back_to_the_old_state() {
    let mut conn = setup();
    seed(&conn, "舊分類", "舊帳戶", &["10"]);

    let donor = setup();
    seed(&donor, "飲食", "現金", &["120", "13"]);
    let doc = backup::create_backup(&donor).unwrap();

    // Abort the insert of the second incoming transaction, mid step 4.
    conn.execute_batch(
        "CREATE TRIGGER boom BEFORE INSERT ON transactions
         WHEN NEW.amount='13' BEGIN SELECT RAISE(ABORT, 'injected failure'); END;",
    )
    .unwrap();

    match restore::restore(&mut conn, &doc) {
        Err(BackupError::Restore(_)) => {}
        other => panic!("expected Restore error, got {:?}", other),
    }

    // Old state fully intact, no half-restored mix.
    let categories = store::all_categories(&conn).unwrap();
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0].name, "舊分類");
    let (c, a, t) = store::entity_counts(&conn).unwrap();
    assert_eq!((c, a, t), (1, 1, 1));
    for tx in store::real_transactions(&conn).unwrap() {
        assert_eq!(tx.category_id, Some(categories[0].id));
    }
}

#[test]
fn unresolvable_export_ids_restore_as_null() {
    let doc = BackupDocument {
        format_version: FORMAT_VERSION,
        created_at: Utc::now(),
        producer_version: "0.1.0".into(),
        summary: Summary {
            total_categories: 1,
            total_accounts: 1,
            total_transactions: 2,
        },
        categories: vec![CategoryRecord {
            backup_id: "cat-1".into(),
            name: "飲食".into(),
            icon: "fork.knife".into(),
            color_hex: "#FF9F45".into(),
            kind: CategoryKind::Expense,
            sort_order: 0,
            is_default: false,
        }],
        accounts: vec![AccountRecord {
            backup_id: "acct-1".into(),
            name: "現金".into(),
            kind: AccountKind::Cash,
            icon: "wallet.pass.fill".into(),
            color_hex: "#58C2A9".into(),
            initial_balance: "1000".into(),
            sort_order: 0,
            is_default: true,
        }],
        transactions: vec![
            TransactionRecord {
                amount: "120".into(),
                kind: TxKind::Expense,
                category_backup_id: Some("cat-1".into()),
                account_backup_id: Some("acct-1".into()),
                note: String::new(),
                occurred_at: NaiveDate::parse_from_str("2025-06-01", "%Y-%m-%d").unwrap(),
                created_at: Utc::now(),
            },
            // References nothing in this document; restores with both NULL.
            TransactionRecord {
                amount: "42".into(),
                kind: TxKind::Expense,
                category_backup_id: Some("no-such-category".into()),
                account_backup_id: None,
                note: String::new(),
                occurred_at: NaiveDate::parse_from_str("2025-06-02", "%Y-%m-%d").unwrap(),
                created_at: Utc::now(),
            },
        ],
    };

    let mut conn = setup();
    restore::restore(&mut conn, &doc).unwrap();

    let txs = store::real_transactions(&conn).unwrap();
    assert_eq!(txs.len(), 2);
    assert!(txs[0].category_id.is_some());
    assert_eq!(txs[1].category_id, None);
    assert_eq!(txs[1].account_id, None);
}
