// SPDX-FileCopyrightText: 2025 Verdant contributors
// SPDX-License-Identifier: MIT

//! SQLite persistence for the Verdant garden tracker.
//!
//! This crate owns the durable on-device store: idempotent schema setup with
//! cascade integrity, row-level CRUD per entity with the column coercions
//! between flat rows and the nested domain shapes, the hierarchical bulk
//! load, and a generic key-value sub-store.
//!
//! # Key Features
//!
//! - Create-if-absent schema, WAL durability, foreign-key enforcement
//! - Hierarchical `load_all_areas` (no flat joins)
//! - One multi-statement transaction: `insert_area_with_plants`
//! - In-memory database for testing
//!
//! # Example
//!
//! ```ignore
//! use verdant_store_db::GardenDb;
//!
//! let db = GardenDb::open("garden.sqlite")?;
//! for area in db.load_all_areas()? {
//!     println!("{} {} ({} plants)", area.emoji, area.name, area.plants.len());
//! }
//! ```

mod connection;
mod error;
mod kv;
mod query;
mod schema;
mod types;
mod write;

pub use connection::GardenDb;
pub use error::{Error, Result};
pub use schema::SCHEMA_SQL;
