// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::PathBuf;
use thiserror::Error;

/// Failures of the backup codec and the destructive restore. The command
/// layer decides what is user-facing; only the migration path is allowed to
/// treat `NotFound` as a no-op.
#[derive(Debug, Error)]
pub enum BackupError {
    #[error("Malformed backup document: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("Backup format version {found} is newer than this build supports (max {supported})")]
    Version { found: u32, supported: u32 },

    #[error("Backup file not found: {0}")]
    NotFound(PathBuf),

    #[error("Backup file I/O error: {0}")]
    FileIo(#[source] std::io::Error),

    #[error("Restore failed, store rolled back: {0}")]
    Restore(#[source] rusqlite::Error),
}
