// SPDX-FileCopyrightText: 2025 Verdant contributors
// SPDX-License-Identifier: MIT

//! Core domain types for the Verdant garden tracker.
//!
//! This crate provides the fundamental types and pure computation logic for
//! gardens: areas, plants, the growth-stage lifecycle, journal entries, the
//! plant catalog, and user settings. It is intentionally IO-free - all
//! operations are pure functions that operate on values, enabling easy
//! testing and composition.
//!
//! # Key Modules
//!
//! - `stage` - The fixed growth lifecycle and its transition rules
//! - `garden` - Areas, plants and journal entries
//! - `catalog` - Built-in and user-submitted plant reference records
//! - `settings` - User preferences with forward-compatible defaults
//!
//! # Design Principles
//!
//! 1. **No IO**: No filesystem, no database, no `async`
//! 2. **Pure functions**: Deterministic, testable, referentially transparent
//! 3. **Explicit errors**: All fallible operations return `Result`

pub mod catalog;
pub mod garden;
pub mod settings;
pub mod stage;

pub use catalog::{CUSTOM_ID_PREFIX, CatalogEntry, NewCatalogEntry, merged_catalog};
pub use garden::{Area, EntryKind, JournalEntry, Plant, total_plant_count};
pub use settings::{Settings, SettingsPatch};
pub use stage::GrowthStage;
