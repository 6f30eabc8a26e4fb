// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Transaction, TxKind};
use crate::money;
use crate::store;
use crate::utils::{maybe_print_json, parse_date, pretty_table};
use anyhow::Result;
use chrono::Utc;
use rusqlite::Connection;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            store::delete_transaction(conn, id)?;
            println!("Deleted transaction #{}", id);
        }
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let amount = money::parse_positive(sub.get_one::<String>("amount").unwrap())?;
    let kind = TxKind::parse(sub.get_one::<String>("kind").unwrap()).unwrap_or(TxKind::Expense);
    let occurred_at = parse_date(sub.get_one::<String>("date").unwrap())?;
    let note = sub
        .get_one::<String>("note")
        .cloned()
        .unwrap_or_default();

    let category_id = match sub.get_one::<String>("category") {
        Some(name) => Some(store::id_for_category(conn, name)?),
        None => None,
    };
    // No --account falls back to the default account; a transaction with no
    // account at all is still valid.
    let account_id = match sub.get_one::<String>("account") {
        Some(name) => Some(store::id_for_account(conn, name)?),
        None => store::default_account(conn)?,
    };

    let t = Transaction {
        id: 0,
        amount,
        kind,
        category_id,
        account_id,
        note,
        occurred_at,
        created_at: Utc::now(),
        is_sample: false,
    };
    store::insert_transaction(conn, &t)?;
    println!(
        "Recorded {} {} on {}",
        kind.as_str(),
        money::format_amount(&amount),
        occurred_at
    );
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.occurred_at.clone(),
                    r.kind.clone(),
                    r.category.clone(),
                    r.account.clone(),
                    r.amount.clone(),
                    r.note.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["#", "Date", "Kind", "Category", "Account", "Amount", "Note"],
                rows,
            )
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: i64,
    pub occurred_at: String,
    pub kind: String,
    pub category: String,
    pub account: String,
    pub amount: String,
    pub note: String,
}

pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let mut sql = String::from(
        "SELECT t.id, t.occurred_at, t.kind, c.name, a.name, t.amount, t.note
         FROM transactions t
         LEFT JOIN categories c ON t.category_id=c.id
         LEFT JOIN accounts a ON t.account_id=a.id
         WHERE 1=1",
    );
    let mut params_vec: Vec<String> = Vec::new();

    if let Some(month) = sub.get_one::<String>("month") {
        sql.push_str(" AND substr(t.occurred_at,1,7)=?");
        params_vec.push(month.into());
    }
    if let Some(cat) = sub.get_one::<String>("category") {
        sql.push_str(" AND c.name=?");
        params_vec.push(cat.into());
    }
    if let Some(acct) = sub.get_one::<String>("account") {
        sql.push_str(" AND a.name=?");
        params_vec.push(acct.into());
    }
    sql.push_str(" ORDER BY t.occurred_at DESC, t.id DESC");
    if let Some(limit) = sub.get_one::<usize>("limit") {
        sql.push_str(" LIMIT ?");
        params_vec.push(limit.to_string());
    }

    let mut stmt = conn.prepare(&sql)?;
    let mut rows = if params_vec.is_empty() {
        stmt.query([])?
    } else {
        let params: Vec<&dyn rusqlite::ToSql> = params_vec
            .iter()
            .map(|s| s as &dyn rusqlite::ToSql)
            .collect();
        stmt.query(rusqlite::params_from_iter(params))?
    };

    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        let id: i64 = r.get(0)?;
        let occurred_at: String = r.get(1)?;
        let kind: String = r.get(2)?;
        let category: Option<String> = r.get(3)?;
        let account: Option<String> = r.get(4)?;
        let amount: String = r.get(5)?;
        let note: String = r.get(6)?;
        data.push(TransactionRow {
            id,
            occurred_at,
            kind,
            category: category.unwrap_or_default(),
            account: account.unwrap_or_default(),
            amount: money::format_amount(&money::parse_amount(&amount)),
            note,
        });
    }
    Ok(data)
}
