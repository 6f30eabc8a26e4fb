// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Category, CategoryKind};
use crate::store;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let kind = sub.get_one::<String>("kind").unwrap();
            let category = Category {
                id: 0,
                name: name.clone(),
                icon: sub.get_one::<String>("icon").unwrap().clone(),
                color_hex: sub.get_one::<String>("color").unwrap().clone(),
                kind: CategoryKind::parse(kind).unwrap_or(CategoryKind::Expense),
                sort_order: store::next_category_sort(conn)?,
                is_default: false,
            };
            store::insert_category(conn, &category)?;
            println!("Added category '{}' ({})", name, kind);
        }
        Some(("list", sub)) => list(conn, sub)?,
        Some(("rm", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let id = store::id_for_category(conn, name)?;
            store::delete_category(conn, id)?;
            println!("Removed category '{}' (its transactions were kept)", name);
        }
        _ => {}
    }
    Ok(())
}

#[derive(Serialize)]
struct CategoryRow {
    name: String,
    kind: String,
    icon: String,
    color_hex: String,
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");

    let data: Vec<CategoryRow> = store::all_categories(conn)?
        .into_iter()
        .map(|c| CategoryRow {
            name: c.name,
            kind: c.kind.as_str().to_string(),
            icon: c.icon,
            color_hex: c.color_hex,
        })
        .collect();

    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .into_iter()
            .map(|c| vec![c.name, c.kind, c.icon, c.color_hex])
            .collect();
        println!(
            "{}",
            pretty_table(&["Category", "Kind", "Icon", "Color"], rows)
        );
    }
    Ok(())
}
