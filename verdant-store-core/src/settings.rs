// SPDX-FileCopyrightText: 2025 Verdant contributors
// SPDX-License-Identifier: MIT

//! User preference record.
//!
//! Every field carries a serde default so that a stored record written by an
//! older version deserializes with hard-coded defaults for any field it is
//! missing - never null.

use serde::{Deserialize, Serialize};

fn default_reminders_enabled() -> bool {
    false
}

fn default_reminder_hour() -> u32 {
    9
}

fn default_reminder_minute() -> u32 {
    0
}

/// The flat preferences record, persisted as one JSON document under a single
/// key-value key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default = "default_reminders_enabled")]
    pub reminders_enabled: bool,
    #[serde(default = "default_reminder_hour")]
    pub reminder_hour: u32,
    #[serde(default = "default_reminder_minute")]
    pub reminder_minute: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            reminders_enabled: default_reminders_enabled(),
            reminder_hour: default_reminder_hour(),
            reminder_minute: default_reminder_minute(),
        }
    }
}

/// A partial update: only present fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsPatch {
    pub reminders_enabled: Option<bool>,
    pub reminder_hour: Option<u32>,
    pub reminder_minute: Option<u32>,
}

impl Settings {
    /// Merge a patch into this record, field by field.
    pub fn apply(&mut self, patch: &SettingsPatch) {
        if let Some(enabled) = patch.reminders_enabled {
            self.reminders_enabled = enabled;
        }
        if let Some(hour) = patch.reminder_hour {
            self.reminder_hour = hour;
        }
        if let Some(minute) = patch.reminder_minute {
            self.reminder_minute = minute;
        }
    }
}
