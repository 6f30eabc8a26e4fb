// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db;
use crate::models::{AccountKind, TxKind};
use crate::money;
use crate::store;
use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{Connection, params};
use rust_decimal::Decimal;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const RECENT_LIMIT: usize = 5;
const TOP_CATEGORIES: usize = 3;

/// Projection consumed by the read-only widget surface. Not part of the
/// backup format; rebuilt after every mutating command.
#[derive(Debug, Serialize)]
pub struct WidgetSnapshot {
    pub generated_at: DateTime<Utc>,
    pub month: String,
    pub income: String,
    pub expense: String,
    pub balance: String,
    pub top_categories: Vec<TopCategory>,
    pub recent: Vec<RecentEntry>,
    pub accounts: Vec<AccountBalance>,
}

#[derive(Debug, Serialize)]
pub struct TopCategory {
    pub name: String,
    pub icon: String,
    pub color_hex: String,
    pub amount: String,
    pub share: f64,
}

#[derive(Debug, Serialize)]
pub struct RecentEntry {
    pub occurred_at: NaiveDate,
    pub kind: TxKind,
    pub category: Option<String>,
    pub amount: String,
    pub note: String,
}

#[derive(Debug, Serialize)]
pub struct AccountBalance {
    pub name: String,
    pub kind: AccountKind,
    pub balance: String,
}

/// Income and expense totals for a `YYYY-MM` month, summed in decimal space.
pub fn month_totals(conn: &Connection, month: &str) -> Result<(Decimal, Decimal)> {
    let mut stmt = conn
        .prepare("SELECT amount, kind FROM transactions WHERE substr(occurred_at,1,7)=?1")?;
    let mut rows = stmt.query(params![month])?;
    let mut income = Decimal::ZERO;
    let mut expense = Decimal::ZERO;
    while let Some(r) = rows.next()? {
        let amount: String = r.get(0)?;
        let kind: String = r.get(1)?;
        let d = money::parse_amount(&amount);
        match TxKind::parse(&kind).unwrap_or(TxKind::Expense) {
            TxKind::Income => income += d,
            TxKind::Expense => expense += d,
        }
    }
    Ok((income, expense))
}

/// Expense categories of the month ranked by spend; share is a percentage of
/// the month's total expense, computed at the last step.
pub fn top_expense_categories(
    conn: &Connection,
    month: &str,
    limit: usize,
) -> Result<Vec<TopCategory>> {
    let mut stmt = conn.prepare(
        "SELECT c.name, c.icon, c.color_hex, t.amount
         FROM transactions t LEFT JOIN categories c ON t.category_id=c.id
         WHERE substr(t.occurred_at,1,7)=?1 AND t.kind='expense'",
    )?;
    let mut rows = stmt.query(params![month])?;
    let mut agg: Vec<(String, String, String, Decimal)> = Vec::new();
    let mut total = Decimal::ZERO;
    while let Some(r) = rows.next()? {
        let name: Option<String> = r.get(0)?;
        let icon: Option<String> = r.get(1)?;
        let color_hex: Option<String> = r.get(2)?;
        let amount: String = r.get(3)?;
        let d = money::parse_amount(&amount);
        total += d;
        let name = name.unwrap_or_else(|| "未分類".to_string());
        match agg.iter_mut().find(|(n, _, _, _)| *n == name) {
            Some(entry) => entry.3 += d,
            None => agg.push((
                name,
                icon.unwrap_or_default(),
                color_hex.unwrap_or_default(),
                d,
            )),
        }
    }
    agg.sort_by(|a, b| b.3.cmp(&a.3));
    Ok(agg
        .into_iter()
        .take(limit)
        .map(|(name, icon, color_hex, amount)| TopCategory {
            name,
            icon,
            color_hex,
            amount: money::format_amount(&amount),
            share: money::percent_share(amount, total),
        })
        .collect())
}

pub fn recent_transactions(conn: &Connection, limit: usize) -> Result<Vec<RecentEntry>> {
    let mut stmt = conn.prepare(
        "SELECT t.occurred_at, t.kind, c.name, t.amount, t.note
         FROM transactions t LEFT JOIN categories c ON t.category_id=c.id
         ORDER BY t.occurred_at DESC, t.id DESC LIMIT ?1",
    )?;
    let mut rows = stmt.query(params![limit as i64])?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        let kind: String = r.get(1)?;
        let amount: String = r.get(3)?;
        out.push(RecentEntry {
            occurred_at: r.get::<_, NaiveDate>(0)?,
            kind: TxKind::parse(&kind).unwrap_or(TxKind::Expense),
            category: r.get(2)?,
            amount: money::format_amount(&money::parse_amount(&amount)),
            note: r.get(4)?,
        });
    }
    Ok(out)
}

pub fn account_balances(conn: &Connection) -> Result<Vec<AccountBalance>> {
    let mut out = Vec::new();
    for a in store::all_accounts(conn)? {
        let balance = store::account_balance(conn, a.id)?;
        out.push(AccountBalance {
            name: a.name,
            kind: a.kind,
            balance: money::format_amount(&balance),
        });
    }
    Ok(out)
}

pub fn build(conn: &Connection, month: &str) -> Result<WidgetSnapshot> {
    let (income, expense) = month_totals(conn, month)?;
    Ok(WidgetSnapshot {
        generated_at: Utc::now(),
        month: month.to_string(),
        income: money::format_amount(&income),
        expense: money::format_amount(&expense),
        balance: money::format_amount(&(income - expense)),
        top_categories: top_expense_categories(conn, month, TOP_CATEGORIES)?,
        recent: recent_transactions(conn, RECENT_LIMIT)?,
        accounts: account_balances(conn)?,
    })
}

pub fn write(snap: &WidgetSnapshot, path: &Path) -> Result<()> {
    fs::write(path, serde_json::to_string_pretty(snap)?)?;
    Ok(())
}

/// Rebuild the current month's snapshot at the well-known path.
pub fn refresh(conn: &Connection) -> Result<PathBuf> {
    let month = Utc::now().format("%Y-%m").to_string();
    let snap = build(conn, &month)?;
    let path = db::snapshot_path()?;
    write(&snap, &path)?;
    Ok(path)
}
