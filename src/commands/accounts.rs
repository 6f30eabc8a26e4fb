// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Account, AccountKind};
use crate::money;
use crate::store;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("rm", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let id = store::id_for_account(conn, name)?;
            store::delete_account(conn, id)?;
            println!("Removed account '{}' (its transactions were kept)", name);
        }
        Some(("set-default", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let id = store::id_for_account(conn, name)?;
            store::set_default_account(conn, id)?;
            println!("'{}' is now the default account", name);
        }
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let kind = sub.get_one::<String>("kind").unwrap();
    let icon = sub.get_one::<String>("icon").unwrap();
    let color_hex = sub.get_one::<String>("color").unwrap();
    let initial_balance = money::parse_strict(sub.get_one::<String>("initial-balance").unwrap())?;

    let account = Account {
        id: 0,
        name: name.clone(),
        kind: AccountKind::parse(kind).unwrap_or(AccountKind::Cash),
        icon: icon.clone(),
        color_hex: color_hex.clone(),
        initial_balance,
        sort_order: store::next_account_sort(conn)?,
        is_default: false,
    };
    store::insert_account(conn, &account)?;
    println!("Added account '{}' ({})", name, kind);
    Ok(())
}

#[derive(Serialize)]
struct AccountRow {
    name: String,
    kind: String,
    balance: String,
    default: bool,
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");

    let mut data = Vec::new();
    for a in store::all_accounts(conn)? {
        let balance = store::account_balance(conn, a.id)?;
        data.push(AccountRow {
            name: a.name,
            kind: a.kind.as_str().to_string(),
            balance: money::format_amount(&balance),
            default: a.is_default,
        });
    }

    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .into_iter()
            .map(|r| {
                vec![
                    r.name,
                    r.kind,
                    r.balance,
                    if r.default { "✓".into() } else { String::new() },
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Account", "Kind", "Balance", "Default"], rows)
        );
    }
    Ok(())
}
