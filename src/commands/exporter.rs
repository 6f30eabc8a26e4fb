// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::TxKind;
use crate::money;
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("csv", sub)) => export_csv(conn, sub),
        _ => Ok(()),
    }
}

fn export_csv(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let out = sub.get_one::<String>("out").unwrap();

    let mut stmt = conn.prepare(
        "SELECT t.occurred_at, t.kind, c.name, a.name, t.amount, t.note
         FROM transactions t
         LEFT JOIN categories c ON t.category_id=c.id
         LEFT JOIN accounts a ON t.account_id=a.id
         WHERE t.is_sample=0
         ORDER BY t.occurred_at DESC, t.id DESC",
    )?;
    let rows = stmt.query_map([], |r| {
        Ok((
            r.get::<_, String>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, Option<String>>(2)?,
            r.get::<_, Option<String>>(3)?,
            r.get::<_, String>(4)?,
            r.get::<_, String>(5)?,
        ))
    })?;

    let mut wtr = csv::Writer::from_path(out)?;
    wtr.write_record(["日期", "類型", "分類", "帳戶", "金額", "備註"])?;
    for row in rows {
        let (date, kind, category, account, amount, note) = row?;
        let kind_label = match TxKind::parse(&kind).unwrap_or(TxKind::Expense) {
            TxKind::Income => "收入",
            TxKind::Expense => "支出",
        };
        // Half-width commas in free text would shift columns in consumers
        // that split naively; swap them for the full-width form.
        let note = note.replace(',', "，");
        wtr.write_record([
            date,
            kind_label.to_string(),
            category.unwrap_or_default(),
            account.unwrap_or_default(),
            money::format_amount(&money::parse_amount(&amount)),
            note,
        ])?;
    }
    wtr.flush()?;
    println!("Exported transactions to {}", out);
    Ok(())
}
