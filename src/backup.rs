// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::BackupError;
use crate::models::{AccountKind, CategoryKind, TxKind};
use crate::money;
use crate::store;
use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::info;
use uuid::Uuid;

/// Newest document layout this build can read, and the one it writes.
pub const FORMAT_VERSION: u32 = 1;

/// Portable snapshot of the whole store. Relationships are expressed through
/// document-scoped export ids, never through live rowids, so a document
/// survives any number of restores into stores with different identities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupDocument {
    pub format_version: u32,
    pub created_at: DateTime<Utc>,
    pub producer_version: String,
    pub summary: Summary,
    pub categories: Vec<CategoryRecord>,
    pub accounts: Vec<AccountRecord>,
    pub transactions: Vec<TransactionRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    pub total_categories: usize,
    pub total_accounts: usize,
    pub total_transactions: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRecord {
    pub backup_id: String,
    pub name: String,
    pub icon: String,
    pub color_hex: String,
    pub kind: CategoryKind,
    pub sort_order: i64,
    pub is_default: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountRecord {
    pub backup_id: String,
    pub name: String,
    pub kind: AccountKind,
    pub icon: String,
    pub color_hex: String,
    pub initial_balance: String,
    pub sort_order: i64,
    pub is_default: bool,
}

/// Nullable export-id references: a transaction whose category or account was
/// deleted exports with `None` here, and that is not an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub amount: String,
    pub kind: TxKind,
    pub category_backup_id: Option<String>,
    pub account_backup_id: Option<String>,
    pub note: String,
    pub occurred_at: NaiveDate,
    pub created_at: DateTime<Utc>,
}

fn export_id() -> String {
    Uuid::new_v4().to_string()
}

/// Read-only export of the live store. Export ids are generated fresh on every
/// call; the rowid-to-export-id mapping never leaves this function.
pub fn create_backup(conn: &Connection) -> Result<BackupDocument> {
    let categories = store::all_categories(conn)?;
    let accounts = store::all_accounts(conn)?;
    let transactions = store::real_transactions(conn)?;

    let mut category_ids: HashMap<i64, String> = HashMap::new();
    let mut category_records = Vec::with_capacity(categories.len());
    for c in &categories {
        let backup_id = export_id();
        category_ids.insert(c.id, backup_id.clone());
        category_records.push(CategoryRecord {
            backup_id,
            name: c.name.clone(),
            icon: c.icon.clone(),
            color_hex: c.color_hex.clone(),
            kind: c.kind,
            sort_order: c.sort_order,
            is_default: c.is_default,
        });
    }

    let mut account_ids: HashMap<i64, String> = HashMap::new();
    let mut account_records = Vec::with_capacity(accounts.len());
    for a in &accounts {
        let backup_id = export_id();
        account_ids.insert(a.id, backup_id.clone());
        account_records.push(AccountRecord {
            backup_id,
            name: a.name.clone(),
            kind: a.kind,
            icon: a.icon.clone(),
            color_hex: a.color_hex.clone(),
            initial_balance: money::format_amount(&a.initial_balance),
            sort_order: a.sort_order,
            is_default: a.is_default,
        });
    }

    let mut transaction_records = Vec::with_capacity(transactions.len());
    for t in &transactions {
        transaction_records.push(TransactionRecord {
            amount: money::format_amount(&t.amount),
            kind: t.kind,
            category_backup_id: t.category_id.and_then(|id| category_ids.get(&id).cloned()),
            account_backup_id: t.account_id.and_then(|id| account_ids.get(&id).cloned()),
            note: t.note.clone(),
            occurred_at: t.occurred_at,
            created_at: t.created_at,
        });
    }

    let doc = BackupDocument {
        format_version: FORMAT_VERSION,
        created_at: Utc::now(),
        producer_version: env!("CARGO_PKG_VERSION").to_string(),
        summary: Summary {
            total_categories: category_records.len(),
            total_accounts: account_records.len(),
            total_transactions: transaction_records.len(),
        },
        categories: category_records,
        accounts: account_records,
        transactions: transaction_records,
    };
    info!(
        categories = doc.summary.total_categories,
        accounts = doc.summary.total_accounts,
        transactions = doc.summary.total_transactions,
        "created backup document"
    );
    Ok(doc)
}

/// Pure parse + validate; never touches a store. Rejects documents written by
/// a newer producer.
pub fn load_backup(bytes: &[u8]) -> Result<BackupDocument, BackupError> {
    let doc: BackupDocument = serde_json::from_slice(bytes).map_err(BackupError::Decode)?;
    if doc.format_version > FORMAT_VERSION {
        return Err(BackupError::Version {
            found: doc.format_version,
            supported: FORMAT_VERSION,
        });
    }
    Ok(doc)
}

/// Pretty-printed JSON with sorted keys: serializing through `Value` puts
/// every object behind a BTreeMap, so key order is stable across producers.
pub fn to_json(doc: &BackupDocument) -> Result<String, BackupError> {
    let value = serde_json::to_value(doc).map_err(BackupError::Decode)?;
    serde_json::to_string_pretty(&value).map_err(BackupError::Decode)
}

pub fn write_backup_file(doc: &BackupDocument, path: &Path) -> Result<(), BackupError> {
    let json = to_json(doc)?;
    fs::write(path, json).map_err(BackupError::FileIo)?;
    info!(path = %path.display(), "wrote backup file");
    Ok(())
}

pub fn read_backup_file(path: &Path) -> Result<BackupDocument, BackupError> {
    let bytes = fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => BackupError::NotFound(path.to_path_buf()),
        _ => BackupError::FileIo(e),
    })?;
    load_backup(&bytes)
}
