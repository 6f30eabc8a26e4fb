// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, bail};
use rusqlite::{Connection, OptionalExtension, params};

pub const KEY_ONBOARDING_COMPLETED: &str = "onboarding_completed";
pub const KEY_LEGACY_MIGRATION_DONE: &str = "legacy_migration_done";
pub const KEY_THEME: &str = "theme";

pub const KNOWN_KEYS: &[&str] = &[
    KEY_ONBOARDING_COMPLETED,
    KEY_LEGACY_MIGRATION_DONE,
    KEY_THEME,
];

const THEMES: &[&str] = &["system", "light", "dark"];

fn get(conn: &Connection, key: &str) -> Result<Option<String>> {
    let v: Option<String> = conn
        .query_row("SELECT value FROM settings WHERE key=?1", params![key], |r| {
            r.get(0)
        })
        .optional()?;
    Ok(v)
}

fn set(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![key, value],
    )?;
    Ok(())
}

fn get_bool(conn: &Connection, key: &str) -> Result<bool> {
    Ok(matches!(get(conn, key)?.as_deref(), Some("1") | Some("true")))
}

fn set_bool(conn: &Connection, key: &str, value: bool) -> Result<()> {
    set(conn, key, if value { "1" } else { "0" })
}

pub fn onboarding_completed(conn: &Connection) -> Result<bool> {
    get_bool(conn, KEY_ONBOARDING_COMPLETED)
}

pub fn set_onboarding_completed(conn: &Connection, done: bool) -> Result<()> {
    set_bool(conn, KEY_ONBOARDING_COMPLETED, done)
}

pub fn legacy_migration_done(conn: &Connection) -> Result<bool> {
    get_bool(conn, KEY_LEGACY_MIGRATION_DONE)
}

pub fn set_legacy_migration_done(conn: &Connection, done: bool) -> Result<()> {
    set_bool(conn, KEY_LEGACY_MIGRATION_DONE, done)
}

pub fn theme(conn: &Connection) -> Result<String> {
    Ok(get(conn, KEY_THEME)?.unwrap_or_else(|| "system".to_string()))
}

pub fn set_theme(conn: &Connection, theme: &str) -> Result<()> {
    if !THEMES.contains(&theme) {
        bail!("Unknown theme '{}' (use system|light|dark)", theme);
    }
    set(conn, KEY_THEME, theme)
}

/// Raw accessors for the `config` CLI command; restricted to the known keys
/// and validated per key.
pub fn get_raw(conn: &Connection, key: &str) -> Result<String> {
    match key {
        KEY_ONBOARDING_COMPLETED => Ok(format_bool(onboarding_completed(conn)?)),
        KEY_LEGACY_MIGRATION_DONE => Ok(format_bool(legacy_migration_done(conn)?)),
        KEY_THEME => theme(conn),
        _ => bail!("Unknown config key '{}'", key),
    }
}

pub fn set_raw(conn: &Connection, key: &str, value: &str) -> Result<()> {
    match key {
        KEY_ONBOARDING_COMPLETED => set_onboarding_completed(conn, parse_bool(value)?),
        KEY_LEGACY_MIGRATION_DONE => set_legacy_migration_done(conn, parse_bool(value)?),
        KEY_THEME => set_theme(conn, value),
        _ => bail!("Unknown config key '{}'", key),
    }
}

fn format_bool(value: bool) -> String {
    if value { "1" } else { "0" }.to_string()
}

fn parse_bool(value: &str) -> Result<bool> {
    match value {
        "1" | "true" => Ok(true),
        "0" | "false" => Ok(false),
        _ => bail!("Expected a boolean (1|0|true|false), got '{}'", value),
    }
}
