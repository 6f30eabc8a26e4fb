// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;

pub fn handle(conn: &Connection) -> Result<()> {
    let mut rows = Vec::new();

    // 1) Amount strings that don't parse as decimals (they read as zero).
    let mut stmt = conn.prepare("SELECT id, amount FROM transactions")?;
    let mut cur = stmt.query([])?;
    while let Some(r) = cur.next()? {
        let id: i64 = r.get(0)?;
        let amount: String = r.get(1)?;
        match amount.trim().parse::<Decimal>() {
            Ok(d) if d <= Decimal::ZERO => {
                rows.push(vec!["non_positive_amount".into(), format!("#{} '{}'", id, amount)]);
            }
            Ok(_) => {}
            Err(_) => {
                rows.push(vec!["malformed_amount".into(), format!("#{} '{}'", id, amount)]);
            }
        }
    }

    // 2) Transactions whose category or account reference was dropped.
    let uncategorized: i64 = conn.query_row(
        "SELECT COUNT(*) FROM transactions WHERE category_id IS NULL",
        [],
        |r| r.get(0),
    )?;
    if uncategorized > 0 {
        rows.push(vec![
            "uncategorized".into(),
            format!("{} transactions", uncategorized),
        ]);
    }
    let unaccounted: i64 = conn.query_row(
        "SELECT COUNT(*) FROM transactions WHERE account_id IS NULL",
        [],
        |r| r.get(0),
    )?;
    if unaccounted > 0 {
        rows.push(vec![
            "no_account".into(),
            format!("{} transactions", unaccounted),
        ]);
    }

    // 3) No default account means `tx add` without --account records nothing
    // against any account.
    let defaults: i64 = conn.query_row(
        "SELECT COUNT(*) FROM accounts WHERE is_default=1",
        [],
        |r| r.get(0),
    )?;
    if defaults == 0 {
        rows.push(vec!["no_default_account".into(), String::new()]);
    }

    if rows.is_empty() {
        println!("doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
