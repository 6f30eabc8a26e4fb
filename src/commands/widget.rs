// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db;
use crate::snapshot;
use crate::utils::current_month;
use anyhow::Result;
use rusqlite::Connection;
use std::path::PathBuf;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("refresh", sub)) => {
            let path = match sub.get_one::<String>("out") {
                Some(p) => {
                    let path = PathBuf::from(p);
                    let snap = snapshot::build(conn, &current_month())?;
                    snapshot::write(&snap, &path)?;
                    path
                }
                None => snapshot::refresh(conn)?,
            };
            println!("Wrote widget snapshot to {}", path.display());
        }
        _ => {}
    }
    Ok(())
}
