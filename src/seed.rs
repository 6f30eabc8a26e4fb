// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{CategoryKind, TxKind};
use anyhow::Result;
use chrono::{Duration, Utc};
use rusqlite::{Connection, OptionalExtension, params};

const DEFAULT_CATEGORIES: &[(&str, &str, &str, CategoryKind)] = &[
    ("飲食", "fork.knife", "#FF9F45", CategoryKind::Expense),
    ("交通", "car.fill", "#4F9DFF", CategoryKind::Expense),
    ("購物", "bag.fill", "#FF6B81", CategoryKind::Expense),
    ("娛樂", "gamecontroller.fill", "#9B6BFF", CategoryKind::Expense),
    ("居住", "house.fill", "#58C2A9", CategoryKind::Expense),
    ("醫療", "cross.case.fill", "#FF5E5E", CategoryKind::Expense),
    ("薪資", "banknote.fill", "#39C27B", CategoryKind::Income),
    ("獎金", "gift.fill", "#FFC53D", CategoryKind::Income),
    ("投資", "chart.line.uptrend.xyaxis", "#2FB3A8", CategoryKind::Income),
];

// (amount, kind, category name, note, days before today)
const SAMPLES: &[(&str, TxKind, &str, &str, i64)] = &[
    ("120", TxKind::Expense, "飲食", "午餐", 0),
    ("59", TxKind::Expense, "飲食", "咖啡", 1),
    ("250", TxKind::Expense, "交通", "加油", 2),
    ("899", TxKind::Expense, "購物", "日用品", 4),
    ("43000", TxKind::Income, "薪資", "薪資入帳", 5),
];

/// First-run defaults: the stock category set and a cash account. No-op when
/// the store already has either.
pub fn ensure_defaults(conn: &Connection) -> Result<bool> {
    let categories: i64 = conn.query_row("SELECT COUNT(*) FROM categories", [], |r| r.get(0))?;
    let accounts: i64 = conn.query_row("SELECT COUNT(*) FROM accounts", [], |r| r.get(0))?;
    if categories > 0 || accounts > 0 {
        return Ok(false);
    }
    for (i, (name, icon, color_hex, kind)) in DEFAULT_CATEGORIES.iter().enumerate() {
        conn.execute(
            "INSERT INTO categories(name, icon, color_hex, kind, sort_order, is_default)
             VALUES (?1, ?2, ?3, ?4, ?5, 1)",
            params![name, icon, color_hex, kind.as_str(), i as i64],
        )?;
    }
    conn.execute(
        "INSERT INTO accounts(name, kind, icon, color_hex, initial_balance, sort_order, is_default)
         VALUES ('現金', 'cash', 'wallet.pass.fill', '#58C2A9', '0', 0, 1)",
        [],
    )?;
    Ok(true)
}

/// Demo rows so a fresh install doesn't look empty. Flagged `is_sample`, so
/// they never leave the device through a backup or CSV export.
pub fn insert_samples(conn: &Connection) -> Result<usize> {
    let account_id: Option<i64> = conn
        .query_row(
            "SELECT id FROM accounts WHERE is_default=1 ORDER BY sort_order, id LIMIT 1",
            [],
            |r| r.get(0),
        )
        .optional()?;
    let today = Utc::now().date_naive();
    let now = Utc::now().to_rfc3339();
    for (amount, kind, category, note, days_ago) in SAMPLES {
        let category_id: Option<i64> = conn
            .query_row(
                "SELECT id FROM categories WHERE name=?1",
                params![category],
                |r| r.get(0),
            )
            .optional()?;
        let occurred_at = today - Duration::days(*days_ago);
        conn.execute(
            "INSERT INTO transactions(amount, kind, category_id, account_id, note, occurred_at, created_at, is_sample)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, 1)",
            params![amount, kind.as_str(), category_id, account_id, note, occurred_at, now],
        )?;
    }
    Ok(SAMPLES.len())
}

/// Remove demo rows once the user starts entering real data.
pub fn clear_samples(conn: &Connection) -> Result<usize> {
    let n = conn.execute("DELETE FROM transactions WHERE is_sample=1", [])?;
    Ok(n)
}
