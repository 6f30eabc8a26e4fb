// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::money;
use crate::snapshot;
use crate::utils::{current_month, maybe_print_json, parse_month, pretty_table};
use anyhow::Result;
use rusqlite::Connection;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("month", sub)) => month(conn, sub)?,
        Some(("categories", sub)) => categories(conn, sub)?,
        Some(("balances", sub)) => balances(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn month_arg(sub: &clap::ArgMatches) -> Result<String> {
    match sub.get_one::<String>("month") {
        Some(m) => parse_month(m),
        None => Ok(current_month()),
    }
}

#[derive(Serialize)]
struct MonthRow {
    month: String,
    income: String,
    expense: String,
    net: String,
}

fn month(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let month = month_arg(sub)?;

    let (income, expense) = snapshot::month_totals(conn, &month)?;
    let data = MonthRow {
        month: month.clone(),
        income: money::format_amount(&income),
        expense: money::format_amount(&expense),
        net: money::format_amount(&(income - expense)),
    };
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows = vec![vec![data.month, data.income, data.expense, data.net]];
        println!(
            "{}",
            pretty_table(&["Month", "Income", "Expense", "Net"], rows)
        );
    }
    Ok(())
}

fn categories(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let month = month_arg(sub)?;

    let data = snapshot::top_expense_categories(conn, &month, usize::MAX)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|c| {
                vec![
                    c.name.clone(),
                    c.amount.clone(),
                    format!("{:.1}%", c.share),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Category", "Spent", "Share"], rows)
        );
    }
    Ok(())
}

fn balances(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");

    let data = snapshot::account_balances(conn)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|a| {
                vec![
                    a.name.clone(),
                    a.kind.as_str().to_string(),
                    a.balance.clone(),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Account", "Kind", "Balance"], rows));
    }
    Ok(())
}
