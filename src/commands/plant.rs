// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::plant::{PlantMood, PlantStage};
use crate::snapshot;
use crate::store;
use crate::utils::{current_month, parse_month, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("status", sub)) => status(conn, sub),
        _ => Ok(()),
    }
}

fn status(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let month = match sub.get_one::<String>("month") {
        Some(m) => parse_month(m)?,
        None => current_month(),
    };

    // Demo rows don't grow the plant; only real entries count.
    let entries = store::real_transaction_count_in_month(conn, &month)? as u32;
    let (income, expense) = snapshot::month_totals(conn, &month)?;

    let stage = PlantStage::for_entry_count(entries);
    let mood = PlantMood::for_net_balance(income - expense);
    let to_next = PlantStage::entries_to_next(entries)
        .map(|n| n.to_string())
        .unwrap_or_else(|| "-".to_string());

    let rows = vec![
        vec!["month".into(), month],
        vec!["entries".into(), entries.to_string()],
        vec!["stage".into(), stage.label().into()],
        vec!["mood".into(), mood.label().into()],
        vec!["entries to next stage".into(), to_next],
    ];
    println!("{}", pretty_table(&["Plant", "Value"], rows));
    Ok(())
}
