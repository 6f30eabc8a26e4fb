// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::backup;
use crate::config;
use crate::restore;
use anyhow::{Context, Result};
use rusqlite::{Connection, OpenFlags};
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationOutcome {
    AlreadyDone,
    NoLegacyStore,
    Migrated {
        categories: usize,
        accounts: usize,
        transactions: usize,
    },
}

/// One-time migration of the pre-sync local store: export it through the
/// backup codec and restore the document into the current store. The done
/// flag is written only after the restore commits, so a failed run retries
/// on the next launch.
pub fn run_legacy_migration(
    conn: &mut Connection,
    legacy_path: &Path,
) -> Result<MigrationOutcome> {
    if config::legacy_migration_done(conn)? {
        return Ok(MigrationOutcome::AlreadyDone);
    }
    if !legacy_path.exists() {
        // Nothing to migrate. The flag stays unset in case the legacy file
        // shows up later (delayed file sync).
        return Ok(MigrationOutcome::NoLegacyStore);
    }

    let legacy = Connection::open_with_flags(legacy_path, OpenFlags::SQLITE_OPEN_READ_ONLY)
        .with_context(|| format!("Open legacy store at {}", legacy_path.display()))?;
    let doc = backup::create_backup(&legacy)
        .with_context(|| format!("Export legacy store at {}", legacy_path.display()))?;
    restore::restore(conn, &doc).context("Restore legacy data into current store")?;
    config::set_legacy_migration_done(conn, true)?;
    info!(
        categories = doc.summary.total_categories,
        accounts = doc.summary.total_accounts,
        transactions = doc.summary.total_transactions,
        "legacy store migrated"
    );
    Ok(MigrationOutcome::Migrated {
        categories: doc.summary.total_categories,
        accounts: doc.summary.total_accounts,
        transactions: doc.summary.total_transactions,
    })
}
