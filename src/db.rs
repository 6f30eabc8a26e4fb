// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::Connection;
use std::fs;
use std::path::PathBuf;

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Sproutbook", "sproutbook"));

fn data_dir() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let dir = proj.data_dir().to_path_buf();
    fs::create_dir_all(&dir).context("Failed to create data dir")?;
    Ok(dir)
}

pub fn db_path() -> Result<PathBuf> {
    Ok(data_dir()?.join("sproutbook.sqlite"))
}

/// Location of the pre-sync, local-only store. Present only on installs that
/// last ran a build older than the synced store layout.
pub fn legacy_db_path() -> Result<PathBuf> {
    Ok(data_dir()?.join("sproutbook-local.sqlite"))
}

/// Where the widget snapshot projection is written for the read-only
/// home-screen surface.
pub fn snapshot_path() -> Result<PathBuf> {
    Ok(data_dir()?.join("widget-snapshot.json"))
}

pub fn open_or_init() -> Result<Connection> {
    let path = db_path()?;
    let conn =
        Connection::open(&path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&conn)?;
    Ok(conn)
}

/// Ordered schema upgrades. `PRAGMA user_version` records the last step
/// applied, so a store created by any released build replays only the steps
/// it is missing.
const MIGRATIONS: &[fn(&Connection) -> rusqlite::Result<()>] = &[schema_v1, schema_v2];

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    let mut version: i64 = conn.query_row("PRAGMA user_version", [], |r| r.get(0))?;
    while (version as usize) < MIGRATIONS.len() {
        MIGRATIONS[version as usize](conn)
            .with_context(|| format!("Schema upgrade to v{}", version + 1))?;
        version += 1;
        conn.pragma_update(None, "user_version", version)?;
    }
    Ok(())
}

fn schema_v1(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS settings(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS categories(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        icon TEXT NOT NULL,
        color_hex TEXT NOT NULL,
        kind TEXT NOT NULL CHECK(kind IN ('income','expense')),
        sort_order INTEGER NOT NULL DEFAULT 0,
        is_default INTEGER NOT NULL DEFAULT 0
    );

    CREATE TABLE IF NOT EXISTS accounts(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        kind TEXT NOT NULL CHECK(kind IN ('cash','bank','credit_card','e_wallet')),
        icon TEXT NOT NULL,
        color_hex TEXT NOT NULL,
        initial_balance TEXT NOT NULL DEFAULT '0',
        sort_order INTEGER NOT NULL DEFAULT 0,
        is_default INTEGER NOT NULL DEFAULT 0
    );

    -- amount is an exact decimal string; sign lives in kind, not the value.
    -- Deleting a category or account nullifies the reference, never the row.
    CREATE TABLE IF NOT EXISTS transactions(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        amount TEXT NOT NULL,
        kind TEXT NOT NULL CHECK(kind IN ('income','expense')),
        category_id INTEGER,
        account_id INTEGER,
        note TEXT NOT NULL DEFAULT '',
        occurred_at TEXT NOT NULL,
        created_at TEXT NOT NULL,
        is_sample INTEGER NOT NULL DEFAULT 0,
        FOREIGN KEY(category_id) REFERENCES categories(id) ON DELETE SET NULL,
        FOREIGN KEY(account_id) REFERENCES accounts(id) ON DELETE SET NULL
    );
    CREATE INDEX IF NOT EXISTS idx_transactions_occurred_at ON transactions(occurred_at);
    "#,
    )
}

// The 0.1 -> 0.2 release changed nothing in the store layout; the step exists
// so user_version stays aligned with released builds.
fn schema_v2(_conn: &Connection) -> rusqlite::Result<()> {
    Ok(())
}
