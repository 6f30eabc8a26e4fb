// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use sproutbook::{cli, commands, config, db, seed, snapshot};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let mut conn = db::open_or_init()?;
    let mut mutated = false;

    match matches.subcommand() {
        Some(("init", _)) => {
            let seeded = seed::ensure_defaults(&conn)?;
            config::set_onboarding_completed(&conn, true)?;
            println!("Database initialized at {}", db::db_path()?.display());
            if seeded {
                println!("Seeded default categories and a cash account");
            }
            mutated = true;
        }
        Some(("account", sub)) => {
            commands::accounts::handle(&conn, sub)?;
            mutated = true;
        }
        Some(("category", sub)) => {
            commands::categories::handle(&conn, sub)?;
            mutated = true;
        }
        Some(("tx", sub)) => {
            commands::transactions::handle(&conn, sub)?;
            mutated = true;
        }
        Some(("report", sub)) => commands::reports::handle(&conn, sub)?,
        Some(("backup", sub)) => {
            commands::backup::handle(&mut conn, sub)?;
            mutated = true;
        }
        Some(("export", sub)) => commands::exporter::handle(&conn, sub)?,
        Some(("widget", sub)) => commands::widget::handle(&conn, sub)?,
        Some(("migrate", sub)) => {
            commands::migrate::handle(&mut conn, sub)?;
            mutated = true;
        }
        Some(("seed", sub)) => {
            commands::seed::handle(&conn, sub)?;
            mutated = true;
        }
        Some(("config", sub)) => commands::config::handle(&conn, sub)?,
        Some(("plant", sub)) => commands::plant::handle(&conn, sub)?,
        Some(("doctor", _)) => commands::doctor::handle(&conn)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }

    if mutated {
        // The widget reads a pre-rendered projection; keep it in step with
        // every mutation.
        if let Err(err) = snapshot::refresh(&conn) {
            tracing::warn!(%err, "widget snapshot refresh failed");
        }
    }
    Ok(())
}
