// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, Utc};
use rusqlite::Connection;
use rust_decimal::Decimal;
use sproutbook::db;
use sproutbook::models::{Account, AccountKind, Category, CategoryKind, Transaction, TxKind};
use sproutbook::money;
use sproutbook::store;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn
}

fn category(name: &str, sort_order: i64) -> Category {
    Category {
        id: 0,
        name: name.into(),
        icon: "tag.fill".into(),
        color_hex: "#FF9F45".into(),
        kind: CategoryKind::Expense,
        sort_order,
        is_default: false,
    }
}

fn account(name: &str, initial: &str) -> Account {
    Account {
        id: 0,
        name: name.into(),
        kind: AccountKind::Cash,
        icon: "wallet.pass.fill".into(),
        color_hex: "#58C2A9".into(),
        initial_balance: money::parse_amount(initial),
        sort_order: 0,
        is_default: false,
    }
}

fn transaction(
    amount: &str,
    kind: TxKind,
    category_id: Option<i64>,
    account_id: Option<i64>,
    date: &str,
) -> Transaction {
    Transaction {
        id: 0,
        amount: money::parse_amount(amount),
        kind,
        category_id,
        account_id,
        note: String::new(),
        occurred_at: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        created_at: Utc::now(),
        is_sample: false,
    }
}

#[test]
fn deleting_category_nullifies_transaction_reference() {
    let conn = setup();
    let cat_id = store::insert_category(&conn, &category("飲食", 0)).unwrap();
    let tx_id = store::insert_transaction(
        &conn,
        &transaction("120", TxKind::Expense, Some(cat_id), None, "2025-06-01"),
    )
    .unwrap();

    store::delete_category(&conn, cat_id).unwrap();

    let txs = store::real_transactions(&conn).unwrap();
    assert_eq!(txs.len(), 1);
    assert_eq!(txs[0].id, tx_id);
    assert_eq!(txs[0].category_id, None);
}

#[test]
fn deleting_account_nullifies_transaction_reference() {
    let conn = setup();
    let acct_id = store::insert_account(&conn, &account("現金", "0")).unwrap();
    store::insert_transaction(
        &conn,
        &transaction("59", TxKind::Expense, None, Some(acct_id), "2025-06-02"),
    )
    .unwrap();

    store::delete_account(&conn, acct_id).unwrap();

    let txs = store::real_transactions(&conn).unwrap();
    assert_eq!(txs.len(), 1);
    assert_eq!(txs[0].account_id, None);
}

#[test]
fn fetches_follow_sort_order() {
    let conn = setup();
    store::insert_category(&conn, &category("second", 1)).unwrap();
    store::insert_category(&conn, &category("first", 0)).unwrap();
    let names: Vec<String> = store::all_categories(&conn)
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, vec!["first", "second"]);
}

#[test]
fn derived_balance_tracks_transactions() {
    let conn = setup();
    let acct_id = store::insert_account(&conn, &account("現金", "1000")).unwrap();
    store::insert_transaction(
        &conn,
        &transaction("200", TxKind::Income, None, Some(acct_id), "2025-06-01"),
    )
    .unwrap();
    let tx_id = store::insert_transaction(
        &conn,
        &transaction("120", TxKind::Expense, None, Some(acct_id), "2025-06-02"),
    )
    .unwrap();

    assert_eq!(
        store::account_balance(&conn, acct_id).unwrap(),
        money::parse_amount("1080")
    );

    // Balance is derived, so deleting a transaction is immediately reflected.
    store::delete_transaction(&conn, tx_id).unwrap();
    assert_eq!(
        store::account_balance(&conn, acct_id).unwrap(),
        money::parse_amount("1200")
    );
}

#[test]
fn malformed_stored_amount_reads_as_zero() {
    let conn = setup();
    conn.execute(
        "INSERT INTO transactions(amount, kind, note, occurred_at, created_at, is_sample)
         VALUES ('garbage', 'expense', '', '2025-06-01', ?1, 0)",
        [Utc::now().to_rfc3339()],
    )
    .unwrap();
    let txs = store::real_transactions(&conn).unwrap();
    assert_eq!(txs.len(), 1);
    assert_eq!(txs[0].amount, Decimal::ZERO);
}

#[test]
fn real_transactions_excludes_samples_and_orders_ascending() {
    let conn = setup();
    let mut newer = transaction("10", TxKind::Expense, None, None, "2025-06-05");
    store::insert_transaction(&conn, &newer).unwrap();
    let older = transaction("20", TxKind::Expense, None, None, "2025-06-01");
    store::insert_transaction(&conn, &older).unwrap();
    newer.is_sample = true;
    newer.occurred_at = NaiveDate::parse_from_str("2025-06-03", "%Y-%m-%d").unwrap();
    store::insert_transaction(&conn, &newer).unwrap();

    let txs = store::real_transactions(&conn).unwrap();
    assert_eq!(txs.len(), 2);
    assert_eq!(txs[0].occurred_at.to_string(), "2025-06-01");
    assert_eq!(txs[1].occurred_at.to_string(), "2025-06-05");
}

#[test]
fn default_account_round_trip() {
    let conn = setup();
    let a = store::insert_account(&conn, &account("現金", "0")).unwrap();
    let b = store::insert_account(&conn, &account("銀行", "0")).unwrap();
    assert_eq!(store::default_account(&conn).unwrap(), None);

    store::set_default_account(&conn, b).unwrap();
    assert_eq!(store::default_account(&conn).unwrap(), Some(b));

    // Exactly one default at a time.
    store::set_default_account(&conn, a).unwrap();
    let accounts = store::all_accounts(&conn).unwrap();
    let defaults: Vec<i64> = accounts
        .iter()
        .filter(|x| x.is_default)
        .map(|x| x.id)
        .collect();
    assert_eq!(defaults, vec![a]);
}
