// SPDX-FileCopyrightText: 2025 Verdant contributors
// SPDX-License-Identifier: MIT

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GardenError {
    #[error("Store database error: {0}")]
    StoreDb(#[from] verdant_store_db::Error),

    #[error("Settings serialization error: {0}")]
    SettingsJson(#[from] serde_json::Error),

    #[error("Background write task failed: {0}")]
    TaskJoin(String),

    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl GardenError {
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }
}

/// Helper trait for adding context to IO errors
pub trait IoContext<T> {
    fn io_context<F>(self, f: F) -> Result<T, GardenError>
    where
        F: FnOnce() -> String;
}

impl<T> IoContext<T> for std::io::Result<T> {
    fn io_context<F>(self, f: F) -> Result<T, GardenError>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| GardenError::io(f(), e))
    }
}
