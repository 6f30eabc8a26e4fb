// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::backup;
use crate::restore;
use crate::store;
use crate::utils::pretty_table;
use anyhow::{Result, bail};
use rusqlite::Connection;
use std::path::Path;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("create", sub)) => create(conn, sub),
        Some(("inspect", sub)) => inspect(sub),
        Some(("restore", sub)) => run_restore(conn, sub),
        _ => Ok(()),
    }
}

fn create(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let out = sub.get_one::<String>("out").unwrap();
    let doc = backup::create_backup(conn)?;
    backup::write_backup_file(&doc, Path::new(out))?;
    println!(
        "Backed up {} categories, {} accounts, {} transactions to {}",
        doc.summary.total_categories,
        doc.summary.total_accounts,
        doc.summary.total_transactions,
        out
    );
    Ok(())
}

fn inspect(sub: &clap::ArgMatches) -> Result<()> {
    let file = sub.get_one::<String>("file").unwrap();
    let doc = backup::read_backup_file(Path::new(file))?;
    let rows = vec![
        vec!["format_version".into(), doc.format_version.to_string()],
        vec!["created_at".into(), doc.created_at.to_rfc3339()],
        vec!["producer_version".into(), doc.producer_version.clone()],
        vec![
            "categories".into(),
            doc.summary.total_categories.to_string(),
        ],
        vec!["accounts".into(), doc.summary.total_accounts.to_string()],
        vec![
            "transactions".into(),
            doc.summary.total_transactions.to_string(),
        ],
    ];
    println!("{}", pretty_table(&["Field", "Value"], rows));
    Ok(())
}

fn run_restore(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let file = sub.get_one::<String>("file").unwrap();
    let yes = sub.get_flag("yes");

    let doc = backup::read_backup_file(Path::new(file))?;
    let (categories, accounts, transactions) = store::entity_counts(conn)?;
    if (categories + accounts + transactions) > 0 && !yes {
        bail!(
            "Store has {} categories, {} accounts, {} transactions; restore replaces everything. Re-run with --yes.",
            categories,
            accounts,
            transactions
        );
    }
    restore::restore(conn, &doc)?;
    println!(
        "Restored {} categories, {} accounts, {} transactions from {}",
        doc.summary.total_categories,
        doc.summary.total_accounts,
        doc.summary.total_transactions,
        file
    );
    Ok(())
}
