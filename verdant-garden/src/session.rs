// SPDX-FileCopyrightText: 2025 Verdant contributors
// SPDX-License-Identifier: MIT

//! Application session bootstrap.
//!
//! The one place the database is opened: a single connection shared by
//! reference between both stores, constructed once at application start and
//! handed to the UI layer. There is no ambient global; callers that need the
//! stores receive them from here.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{error, info};

use verdant_store_db::GardenDb;

use crate::config::Config;
use crate::garden::GardenStore;
use crate::persist::DbHandle;
use crate::settings::SettingsStore;

/// The running application session: one garden store, one settings store,
/// one shared database connection (or none, in a degraded session).
pub struct Session {
    pub garden: GardenStore,
    pub settings: SettingsStore,
}

impl Session {
    /// Open the database and construct both stores around it, then run
    /// their initial loads.
    ///
    /// If the database cannot be opened the session still starts, detached:
    /// everything works in memory for the rest of the session, nothing
    /// survives a restart, and every dispatched write is a no-op.
    pub async fn start(config: &Config) -> Self {
        let db: Option<DbHandle> = match GardenDb::open(&config.db_path) {
            Ok(db) => {
                info!(path = %config.db_path.display(), "opened garden database");
                Some(Arc::new(Mutex::new(db)))
            }
            Err(e) => {
                error!(error = %e, "could not open garden database; running non-durable session");
                None
            }
        };

        let garden = GardenStore::new(db.clone());
        let settings = SettingsStore::new(db);
        garden.load().await;
        settings.load().await;
        Self { garden, settings }
    }

    /// Whether this session persists anything.
    pub fn is_durable(&self) -> bool {
        self.garden.is_durable()
    }
}
