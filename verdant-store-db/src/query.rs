// SPDX-FileCopyrightText: 2025 Verdant contributors
// SPDX-License-Identifier: MIT

//! Read query operations for the garden database.

use rusqlite::params;

use verdant_store_core::catalog::CatalogEntry;
use verdant_store_core::garden::{Area, JournalEntry, Plant};

use crate::connection::GardenDb;
use crate::error::Result;
use crate::types::{int_to_bool, json_to_array, text_to_kind, text_to_stage};

impl GardenDb {
    /// Load every area with its plants nested inside, each plant with its
    /// journal nested inside; all sibling lists in insertion (`seq`) order.
    ///
    /// This deliberately runs hierarchical per-parent fetches rather than one
    /// flat three-way join: a join would duplicate area and plant columns
    /// once per journal row and the reassembly costs more than the extra
    /// statements on a local database.
    pub fn load_all_areas(&self) -> Result<Vec<Area>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT id, name, emoji, created_at, seq FROM areas ORDER BY seq",
        )?;

        let mut areas = Vec::new();
        let mut rows = stmt.query([])?;
        while let Some(row) = rows.next()? {
            areas.push(Area {
                id: row.get(0)?,
                name: row.get(1)?,
                emoji: row.get(2)?,
                created_at: row.get(3)?,
                seq: row.get(4)?,
                plants: Vec::new(),
            });
        }
        drop(rows);
        drop(stmt);

        for area in &mut areas {
            area.plants = self.load_plants(&area.id)?;
        }
        Ok(areas)
    }

    /// Load the plants of one area, in insertion order.
    fn load_plants(&self, area_id: &str) -> Result<Vec<Plant>> {
        let mut stmt = self.conn.prepare_cached(
            r#"
            SELECT id, seed_id, seed_title, seed_category, seed_image,
                   planted_date, stage, seq
            FROM plants
            WHERE area_id = ?1
            ORDER BY seq
            "#,
        )?;

        let mut plants = Vec::new();
        let mut rows = stmt.query(params![area_id])?;
        while let Some(row) = rows.next()? {
            plants.push(Plant {
                id: row.get(0)?,
                seed_id: row.get(1)?,
                seed_title: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                seed_category: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
                seed_image: row.get(4)?,
                planted_date: row.get(5)?,
                stage: text_to_stage(row.get(6)?)?,
                seq: row.get(7)?,
                journal: Vec::new(),
            });
        }
        drop(rows);
        drop(stmt);

        for plant in &mut plants {
            plant.journal = self.load_journal(&plant.id)?;
        }
        Ok(plants)
    }

    /// Load the journal of one plant, in insertion order.
    fn load_journal(&self, plant_id: &str) -> Result<Vec<JournalEntry>> {
        let mut stmt = self.conn.prepare_cached(
            r#"
            SELECT id, date, text, type, seq
            FROM journal_entries
            WHERE plant_id = ?1
            ORDER BY seq
            "#,
        )?;

        let mut entries = Vec::new();
        let mut rows = stmt.query(params![plant_id])?;
        while let Some(row) = rows.next()? {
            let kind: String = row.get(3)?;
            entries.push(JournalEntry {
                id: row.get(0)?,
                date: row.get(1)?,
                text: row.get(2)?,
                kind: text_to_kind(&kind)?,
                seq: row.get(4)?,
            });
        }
        Ok(entries)
    }

    /// Load every user-submitted catalog entry, in insertion order, with
    /// JSON-text arrays deserialized and 0/1 integers decoded to booleans.
    pub fn load_custom_entries(&self) -> Result<Vec<CatalogEntry>> {
        let mut stmt = self.conn.prepare_cached(
            r#"
            SELECT id, title, category, scientific_name, description, image_url,
                   planting_seasons, best_months, sun_requirements, watering,
                   frost_tolerance, difficulty, plant_life, suitable_for_containers,
                   requires_trellis, days_to_germination, days_to_harvest,
                   sowing_depth, spacing, companion_plants, plant_height,
                   drought_tolerant, is_custom
            FROM custom_catalog_entries
            ORDER BY seq
            "#,
        )?;

        let mut entries = Vec::new();
        let mut rows = stmt.query([])?;
        while let Some(row) = rows.next()? {
            entries.push(CatalogEntry {
                id: row.get(0)?,
                title: row.get(1)?,
                category: row.get(2)?,
                scientific_name: row.get(3)?,
                description: row.get(4)?,
                image_url: row.get(5)?,
                planting_seasons: json_to_array("planting_seasons", row.get(6)?)?,
                best_months: row.get(7)?,
                sun_requirements: row.get(8)?,
                watering: row.get(9)?,
                frost_tolerance: row.get(10)?,
                difficulty: row.get(11)?,
                plant_life: row.get(12)?,
                suitable_for_containers: int_to_bool(row.get(13)?),
                requires_trellis: int_to_bool(row.get(14)?),
                days_to_germination: row.get(15)?,
                days_to_harvest: row.get(16)?,
                sowing_depth: row.get(17)?,
                spacing: row.get(18)?,
                companion_plants: row.get(19)?,
                plant_height: row.get(20)?,
                drought_tolerant: int_to_bool(row.get(21)?),
                is_custom: int_to_bool(row.get(22)?),
            });
        }
        Ok(entries)
    }

    /// The highest `seq` assigned across all ordered tables, or -1 when the
    /// database is empty. Used to seed the in-memory sequence counter at
    /// load.
    pub fn max_seq(&self) -> Result<i64> {
        let max: Option<i64> = self.conn.query_row(
            r#"
            SELECT MAX(seq) FROM (
                SELECT seq FROM areas
                UNION ALL SELECT seq FROM plants
                UNION ALL SELECT seq FROM journal_entries
                UNION ALL SELECT seq FROM custom_catalog_entries
            )
            "#,
            [],
            |row| row.get(0),
        )?;
        Ok(max.unwrap_or(-1))
    }

    /// Count plant rows (for consistency checks in tests).
    pub fn count_plants(&self) -> Result<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM plants", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    /// Count journal rows for one plant.
    pub fn count_journal_entries(&self, plant_id: &str) -> Result<u64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM journal_entries WHERE plant_id = ?1",
            params![plant_id],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }
}
