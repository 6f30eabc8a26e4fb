// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::backup::BackupDocument;
use crate::error::BackupError;
use rusqlite::{Connection, params};
use std::collections::HashMap;
use tracing::info;

/// Destructive full replace: the incoming document becomes the entire store.
/// A merge is deliberately not offered; partial merges cannot answer what an
/// existing transaction referencing an absent category should become.
///
/// Everything runs inside one sqlite transaction, so a failure at any step
/// rolls the store back to its previous state.
pub fn restore(conn: &mut Connection, doc: &BackupDocument) -> Result<(), BackupError> {
    let tx = conn.transaction().map_err(BackupError::Restore)?;

    // Children first, then the entities they reference, so the wipe never
    // passes through a transient dangling-reference state.
    tx.execute("DELETE FROM transactions", [])
        .map_err(BackupError::Restore)?;
    tx.execute("DELETE FROM categories", [])
        .map_err(BackupError::Restore)?;
    tx.execute("DELETE FROM accounts", [])
        .map_err(BackupError::Restore)?;

    let mut category_ids: HashMap<&str, i64> = HashMap::new();
    for rec in &doc.categories {
        tx.execute(
            "INSERT INTO categories(name, icon, color_hex, kind, sort_order, is_default)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                rec.name,
                rec.icon,
                rec.color_hex,
                rec.kind.as_str(),
                rec.sort_order,
                rec.is_default
            ],
        )
        .map_err(BackupError::Restore)?;
        category_ids.insert(rec.backup_id.as_str(), tx.last_insert_rowid());
    }

    let mut account_ids: HashMap<&str, i64> = HashMap::new();
    for rec in &doc.accounts {
        tx.execute(
            "INSERT INTO accounts(name, kind, icon, color_hex, initial_balance, sort_order, is_default)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                rec.name,
                rec.kind.as_str(),
                rec.icon,
                rec.color_hex,
                rec.initial_balance,
                rec.sort_order,
                rec.is_default
            ],
        )
        .map_err(BackupError::Restore)?;
        account_ids.insert(rec.backup_id.as_str(), tx.last_insert_rowid());
    }

    for rec in &doc.transactions {
        // An export id that resolves to nothing restores as NULL; the
        // reference is dropped, not treated as corruption.
        let category_id = rec
            .category_backup_id
            .as_deref()
            .and_then(|id| category_ids.get(id))
            .copied();
        let account_id = rec
            .account_backup_id
            .as_deref()
            .and_then(|id| account_ids.get(id))
            .copied();
        tx.execute(
            "INSERT INTO transactions(amount, kind, category_id, account_id, note, occurred_at, created_at, is_sample)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, 0)",
            params![
                rec.amount,
                rec.kind.as_str(),
                category_id,
                account_id,
                rec.note,
                rec.occurred_at,
                rec.created_at.to_rfc3339()
            ],
        )
        .map_err(BackupError::Restore)?;
    }

    tx.commit().map_err(BackupError::Restore)?;
    info!(
        categories = doc.categories.len(),
        accounts = doc.accounts.len(),
        transactions = doc.transactions.len(),
        "restore complete"
    );
    Ok(())
}
