// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db;
use crate::migrate::{self, MigrationOutcome};
use anyhow::Result;
use rusqlite::Connection;
use std::path::PathBuf;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("run", sub)) => run(conn, sub),
        _ => Ok(()),
    }
}

fn run(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let legacy_path = match sub.get_one::<String>("legacy") {
        Some(p) => PathBuf::from(p),
        None => db::legacy_db_path()?,
    };
    match migrate::run_legacy_migration(conn, &legacy_path)? {
        MigrationOutcome::AlreadyDone => println!("Legacy migration already completed"),
        MigrationOutcome::NoLegacyStore => {
            println!("No legacy store at {}; nothing to do", legacy_path.display())
        }
        MigrationOutcome::Migrated {
            categories,
            accounts,
            transactions,
        } => println!(
            "Migrated {} categories, {} accounts, {} transactions from the legacy store",
            categories, accounts, transactions
        ),
    }
    Ok(())
}
