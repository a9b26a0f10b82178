// SPDX-FileCopyrightText: 2025 Verdant contributors
// SPDX-License-Identifier: MIT

//! Error types for garden database operations.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for garden database operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during garden database operations.
///
/// The store performs no retries; the retry/ignore policy belongs to the
/// caller.
#[derive(Error, Debug)]
pub enum Error {
    /// SQLite error
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Failed to open database with context
    #[error("Failed to open database at '{path}': {source}")]
    DatabaseOpen {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// A serialized array column could not be encoded or decoded
    #[error("Invalid JSON in column '{column}': {source}")]
    ColumnJson {
        column: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// A stored enum column holds text no variant matches
    #[error("Invalid value in column '{column}': {value}")]
    ColumnValue { column: &'static str, value: String },
}
