// SPDX-FileCopyrightText: 2025 Verdant contributors
// SPDX-License-Identifier: MIT

//! The in-memory garden state service with optimistic persistence.
//!
//! This crate holds the application's source of truth while it runs: the
//! [`garden::GardenStore`] for areas, plants, journals and custom catalog
//! entries, and the [`settings::SettingsStore`] for preferences. Mutations
//! apply to memory synchronously and dispatch their durable writes in the
//! background; [`persist::Persist`] handles expose the write outcomes
//! without making the UI path block on them.

pub mod config;
pub mod error;
pub mod garden;
pub mod persist;
pub mod session;
pub mod settings;

mod ids;

pub use config::Config;
pub use error::GardenError;
pub use garden::GardenStore;
pub use persist::{DbHandle, Persist};
pub use session::Session;
pub use settings::SettingsStore;
