// SPDX-FileCopyrightText: 2025 Verdant contributors
// SPDX-License-Identifier: MIT

//! The user preferences service.
//!
//! A smaller sibling of [`GardenStore`](crate::garden::GardenStore) with the
//! same optimistic-write pattern: patches apply to memory immediately and
//! the whole serialized record is persisted under one key in the key-value
//! sub-store. Loading merges the stored record on top of hard-coded defaults
//! field by field, so fields introduced after the record was written come
//! back with their defaults instead of failing the read.

use std::sync::{Mutex, MutexGuard};

use tracing::{debug, error};

use verdant_store_core::settings::{Settings, SettingsPatch};

use crate::persist::{DbHandle, Persist, WriteQueue};

/// Key under which the serialized settings record lives in `kv_store`.
const SETTINGS_KEY: &str = "settings";

/// In-memory authoritative settings state.
pub struct SettingsStore {
    db: Option<DbHandle>,
    queue: Option<WriteQueue>,
    state: Mutex<Settings>,
}

impl SettingsStore {
    /// Requires a running Tokio runtime when a database handle is given.
    pub fn new(db: Option<DbHandle>) -> Self {
        let queue = db.clone().map(WriteQueue::new);
        Self {
            db,
            queue,
            state: Mutex::new(Settings::default()),
        }
    }

    fn state(&self) -> MutexGuard<'_, Settings> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Seed settings from the durable store. Absent or unreadable records
    /// yield the defaults.
    pub async fn load(&self) {
        let Some(db) = &self.db else {
            return;
        };

        let db = db.clone();
        let stored = tokio::task::spawn_blocking(move || {
            let db = db.blocking_lock();
            db.kv_get(SETTINGS_KEY)
        })
        .await;

        let settings = match stored {
            Ok(Ok(Some(json))) => match serde_json::from_str::<Settings>(&json) {
                Ok(settings) => settings,
                Err(e) => {
                    error!(error = %e, "stored settings unreadable; using defaults");
                    Settings::default()
                }
            },
            Ok(Ok(None)) => Settings::default(),
            Ok(Err(e)) => {
                error!(error = %e, "failed to load settings; using defaults");
                Settings::default()
            }
            Err(e) => {
                error!(error = %e, "settings load task failed; using defaults");
                Settings::default()
            }
        };
        debug!(?settings, "loaded settings");
        *self.state() = settings;
    }

    /// Current settings snapshot.
    pub fn get(&self) -> Settings {
        self.state().clone()
    }

    /// Merge a patch into the current settings, apply it in memory
    /// immediately, and persist the whole record.
    pub fn update(&self, patch: &SettingsPatch) -> Persist {
        let mut state = self.state();
        state.apply(patch);
        let snapshot = state.clone();
        drop(state);

        let json = match serde_json::to_string(&snapshot) {
            Ok(json) => json,
            Err(e) => {
                error!(error = %e, "failed to serialize settings; not persisted");
                return Persist::noop();
            }
        };
        match &self.queue {
            Some(queue) => queue.submit("kv_set_settings", move |db| {
                db.kv_set(SETTINGS_KEY, &json)
            }),
            None => Persist::noop(),
        }
    }
}
