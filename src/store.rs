// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Account, AccountKind, Category, CategoryKind, Transaction, TxKind};
use crate::money;
use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{Connection, OptionalExtension, Row, params};
use rust_decimal::Decimal;

const CATEGORY_COLS: &str = "id, name, icon, color_hex, kind, sort_order, is_default";
const ACCOUNT_COLS: &str = "id, name, kind, icon, color_hex, initial_balance, sort_order, is_default";
const TRANSACTION_COLS: &str =
    "id, amount, kind, category_id, account_id, note, occurred_at, created_at, is_sample";

// Kind columns carry a CHECK constraint, so the fallbacks below only fire on
// a store edited outside the app; amounts are lenient by contract.
fn category_from_row(r: &Row) -> rusqlite::Result<Category> {
    let kind: String = r.get(4)?;
    Ok(Category {
        id: r.get(0)?,
        name: r.get(1)?,
        icon: r.get(2)?,
        color_hex: r.get(3)?,
        kind: CategoryKind::parse(&kind).unwrap_or(CategoryKind::Expense),
        sort_order: r.get(5)?,
        is_default: r.get(6)?,
    })
}

fn account_from_row(r: &Row) -> rusqlite::Result<Account> {
    let kind: String = r.get(2)?;
    let initial: String = r.get(5)?;
    Ok(Account {
        id: r.get(0)?,
        name: r.get(1)?,
        kind: AccountKind::parse(&kind).unwrap_or(AccountKind::Cash),
        icon: r.get(3)?,
        color_hex: r.get(4)?,
        initial_balance: money::parse_amount(&initial),
        sort_order: r.get(6)?,
        is_default: r.get(7)?,
    })
}

fn transaction_from_row(r: &Row) -> rusqlite::Result<Transaction> {
    let amount: String = r.get(1)?;
    let kind: String = r.get(2)?;
    Ok(Transaction {
        id: r.get(0)?,
        amount: money::parse_amount(&amount),
        kind: TxKind::parse(&kind).unwrap_or(TxKind::Expense),
        category_id: r.get(3)?,
        account_id: r.get(4)?,
        note: r.get(5)?,
        occurred_at: r.get::<_, NaiveDate>(6)?,
        created_at: r.get::<_, DateTime<Utc>>(7)?,
        is_sample: r.get(8)?,
    })
}

pub fn all_categories(conn: &Connection) -> Result<Vec<Category>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM categories ORDER BY sort_order, id",
        CATEGORY_COLS
    ))?;
    let rows = stmt.query_map([], category_from_row)?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

pub fn all_accounts(conn: &Connection) -> Result<Vec<Account>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM accounts ORDER BY sort_order, id",
        ACCOUNT_COLS
    ))?;
    let rows = stmt.query_map([], account_from_row)?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

/// Every non-sample transaction, oldest first. This is the backup- and
/// export-facing fetch; sample rows never leave the device.
pub fn real_transactions(conn: &Connection) -> Result<Vec<Transaction>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM transactions WHERE is_sample=0 ORDER BY occurred_at, id",
        TRANSACTION_COLS
    ))?;
    let rows = stmt.query_map([], transaction_from_row)?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

pub fn insert_category(conn: &Connection, c: &Category) -> Result<i64> {
    conn.execute(
        "INSERT INTO categories(name, icon, color_hex, kind, sort_order, is_default)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            c.name,
            c.icon,
            c.color_hex,
            c.kind.as_str(),
            c.sort_order,
            c.is_default
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn insert_account(conn: &Connection, a: &Account) -> Result<i64> {
    conn.execute(
        "INSERT INTO accounts(name, kind, icon, color_hex, initial_balance, sort_order, is_default)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            a.name,
            a.kind.as_str(),
            a.icon,
            a.color_hex,
            money::format_amount(&a.initial_balance),
            a.sort_order,
            a.is_default
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn insert_transaction(conn: &Connection, t: &Transaction) -> Result<i64> {
    conn.execute(
        "INSERT INTO transactions(amount, kind, category_id, account_id, note, occurred_at, created_at, is_sample)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            money::format_amount(&t.amount),
            t.kind.as_str(),
            t.category_id,
            t.account_id,
            t.note,
            t.occurred_at,
            t.created_at.to_rfc3339(),
            t.is_sample
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Dependent transactions keep their rows; the FK nullifies the reference.
pub fn delete_category(conn: &Connection, id: i64) -> Result<()> {
    conn.execute("DELETE FROM categories WHERE id=?1", params![id])?;
    Ok(())
}

pub fn delete_account(conn: &Connection, id: i64) -> Result<()> {
    conn.execute("DELETE FROM accounts WHERE id=?1", params![id])?;
    Ok(())
}

pub fn delete_transaction(conn: &Connection, id: i64) -> Result<()> {
    conn.execute("DELETE FROM transactions WHERE id=?1", params![id])?;
    Ok(())
}

pub fn id_for_category(conn: &Connection, name: &str) -> Result<i64> {
    let mut stmt = conn.prepare("SELECT id FROM categories WHERE name=?1")?;
    let id: i64 = stmt
        .query_row(params![name], |r| r.get(0))
        .with_context(|| format!("Category '{}' not found", name))?;
    Ok(id)
}

pub fn id_for_account(conn: &Connection, name: &str) -> Result<i64> {
    let mut stmt = conn.prepare("SELECT id FROM accounts WHERE name=?1")?;
    let id: i64 = stmt
        .query_row(params![name], |r| r.get(0))
        .with_context(|| format!("Account '{}' not found", name))?;
    Ok(id)
}

pub fn default_account(conn: &Connection) -> Result<Option<i64>> {
    let id: Option<i64> = conn
        .query_row(
            "SELECT id FROM accounts WHERE is_default=1 ORDER BY sort_order, id LIMIT 1",
            [],
            |r| r.get(0),
        )
        .optional()?;
    Ok(id)
}

pub fn set_default_account(conn: &Connection, id: i64) -> Result<()> {
    conn.execute("UPDATE accounts SET is_default=(id=?1)", params![id])?;
    Ok(())
}

pub fn next_category_sort(conn: &Connection) -> Result<i64> {
    let n: i64 = conn.query_row(
        "SELECT IFNULL(MAX(sort_order), -1) + 1 FROM categories",
        [],
        |r| r.get(0),
    )?;
    Ok(n)
}

pub fn next_account_sort(conn: &Connection) -> Result<i64> {
    let n: i64 = conn.query_row(
        "SELECT IFNULL(MAX(sort_order), -1) + 1 FROM accounts",
        [],
        |r| r.get(0),
    )?;
    Ok(n)
}

/// Derived balance: initial balance plus income minus expense, summed in
/// decimal space. Never persisted.
pub fn account_balance(conn: &Connection, account_id: i64) -> Result<Decimal> {
    let initial: String = conn.query_row(
        "SELECT initial_balance FROM accounts WHERE id=?1",
        params![account_id],
        |r| r.get(0),
    )?;
    let mut balance = money::parse_amount(&initial);
    let mut stmt =
        conn.prepare("SELECT amount, kind FROM transactions WHERE account_id=?1")?;
    let mut rows = stmt.query(params![account_id])?;
    while let Some(r) = rows.next()? {
        let amount: String = r.get(0)?;
        let kind: String = r.get(1)?;
        let d = money::parse_amount(&amount);
        match TxKind::parse(&kind).unwrap_or(TxKind::Expense) {
            TxKind::Income => balance += d,
            TxKind::Expense => balance -= d,
        }
    }
    Ok(balance)
}

pub fn entity_counts(conn: &Connection) -> Result<(i64, i64, i64)> {
    let categories: i64 = conn.query_row("SELECT COUNT(*) FROM categories", [], |r| r.get(0))?;
    let accounts: i64 = conn.query_row("SELECT COUNT(*) FROM accounts", [], |r| r.get(0))?;
    let transactions: i64 =
        conn.query_row("SELECT COUNT(*) FROM transactions", [], |r| r.get(0))?;
    Ok((categories, accounts, transactions))
}

pub fn real_transaction_count_in_month(conn: &Connection, month: &str) -> Result<i64> {
    let n: i64 = conn.query_row(
        "SELECT COUNT(*) FROM transactions WHERE is_sample=0 AND substr(occurred_at,1,7)=?1",
        params![month],
        |r| r.get(0),
    )?;
    Ok(n)
}
