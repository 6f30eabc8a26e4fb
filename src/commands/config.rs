// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config;
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("get", sub)) => {
            let key = sub.get_one::<String>("key").unwrap();
            println!("{}", config::get_raw(conn, key)?);
        }
        Some(("set", sub)) => {
            let key = sub.get_one::<String>("key").unwrap();
            let value = sub.get_one::<String>("value").unwrap();
            config::set_raw(conn, key, value)?;
            println!("{} = {}", key, config::get_raw(conn, key)?);
        }
        _ => {
            println!("Known keys: {}", config::KNOWN_KEYS.join(", "));
        }
    }
    Ok(())
}
