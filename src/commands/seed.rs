// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::seed;
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("defaults", _)) => {
            if seed::ensure_defaults(conn)? {
                println!("Seeded default categories and a cash account");
            } else {
                println!("Store already has categories or accounts; nothing seeded");
            }
        }
        Some(("samples", _)) => {
            let n = seed::insert_samples(conn)?;
            println!("Inserted {} demo transactions (excluded from backups)", n);
        }
        Some(("clear-samples", _)) => {
            let n = seed::clear_samples(conn)?;
            println!("Removed {} demo transactions", n);
        }
        _ => {}
    }
    Ok(())
}
