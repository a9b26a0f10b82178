// SPDX-FileCopyrightText: 2025 Verdant contributors
// SPDX-License-Identifier: MIT

//! Write operations for the garden database.
//!
//! One method per entity operation. Deletes lean on the schema's cascades:
//! removing an area removes its plants and their journals durably without
//! further statements. The only multi-statement transaction is
//! [`GardenDb::insert_area_with_plants`], backing the "create area and add
//! plant" composite where a partial write would leave an area row without
//! its plant.

use rusqlite::params;

use verdant_store_core::catalog::CatalogEntry;
use verdant_store_core::garden::{Area, JournalEntry, Plant};
use verdant_store_core::stage::GrowthStage;

use crate::connection::GardenDb;
use crate::error::Result;
use crate::types::{array_to_json, bool_to_int, stage_to_text};

impl GardenDb {
    /// Insert an area row. Plants the area may already hold in memory are
    /// not written; use [`GardenDb::insert_area_with_plants`] for that.
    pub fn insert_area(&self, area: &Area) -> Result<()> {
        self.conn.execute(
            r#"
            INSERT INTO areas (id, name, emoji, created_at, seq)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![area.id, area.name, area.emoji, area.created_at, area.seq],
        )?;
        Ok(())
    }

    /// Insert an area together with its nested plants and their journals,
    /// atomically: either every row commits or none do.
    pub fn insert_area_with_plants(&mut self, area: &Area) -> Result<()> {
        let tx = self.conn.transaction()?;

        tx.execute(
            r#"
            INSERT INTO areas (id, name, emoji, created_at, seq)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![area.id, area.name, area.emoji, area.created_at, area.seq],
        )?;

        for plant in &area.plants {
            tx.execute(
                r#"
                INSERT INTO plants
                    (id, area_id, seed_id, seed_title, seed_category, seed_image,
                     planted_date, stage, seq)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
                "#,
                params![
                    plant.id,
                    area.id,
                    plant.seed_id,
                    plant.seed_title,
                    plant.seed_category,
                    plant.seed_image,
                    plant.planted_date,
                    stage_to_text(plant.stage),
                    plant.seq,
                ],
            )?;

            for entry in &plant.journal {
                tx.execute(
                    r#"
                    INSERT INTO journal_entries (id, plant_id, date, text, type, seq)
                    VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                    "#,
                    params![
                        entry.id,
                        plant.id,
                        entry.date,
                        entry.text,
                        entry.kind.as_str(),
                        entry.seq,
                    ],
                )?;
            }
        }

        tx.commit()?;
        Ok(())
    }

    /// Update an area's name and emoji.
    pub fn update_area(&self, area_id: &str, name: &str, emoji: &str) -> Result<()> {
        self.conn.execute(
            "UPDATE areas SET name = ?2, emoji = ?3 WHERE id = ?1",
            params![area_id, name, emoji],
        )?;
        Ok(())
    }

    /// Delete an area. Cascades to its plants and their journal entries.
    pub fn delete_area(&self, area_id: &str) -> Result<bool> {
        let rows = self
            .conn
            .execute("DELETE FROM areas WHERE id = ?1", params![area_id])?;
        Ok(rows > 0)
    }

    /// Insert a plant row under an area.
    pub fn insert_plant(&self, area_id: &str, plant: &Plant) -> Result<()> {
        self.conn.execute(
            r#"
            INSERT INTO plants
                (id, area_id, seed_id, seed_title, seed_category, seed_image,
                 planted_date, stage, seq)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
            params![
                plant.id,
                area_id,
                plant.seed_id,
                plant.seed_title,
                plant.seed_category,
                plant.seed_image,
                plant.planted_date,
                stage_to_text(plant.stage),
                plant.seq,
            ],
        )?;
        Ok(())
    }

    /// Update a plant's current stage column.
    pub fn update_plant_stage(&self, plant_id: &str, stage: Option<GrowthStage>) -> Result<()> {
        self.conn.execute(
            "UPDATE plants SET stage = ?2 WHERE id = ?1",
            params![plant_id, stage_to_text(stage)],
        )?;
        Ok(())
    }

    /// Delete a plant. Cascades to its journal entries.
    pub fn delete_plant(&self, plant_id: &str) -> Result<bool> {
        let rows = self
            .conn
            .execute("DELETE FROM plants WHERE id = ?1", params![plant_id])?;
        Ok(rows > 0)
    }

    /// Insert a journal entry under a plant.
    pub fn insert_journal_entry(&self, plant_id: &str, entry: &JournalEntry) -> Result<()> {
        self.conn.execute(
            r#"
            INSERT INTO journal_entries (id, plant_id, date, text, type, seq)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                entry.id,
                plant_id,
                entry.date,
                entry.text,
                entry.kind.as_str(),
                entry.seq,
            ],
        )?;
        Ok(())
    }

    /// Delete a journal entry by id.
    pub fn delete_journal_entry(&self, entry_id: &str) -> Result<bool> {
        let rows = self.conn.execute(
            "DELETE FROM journal_entries WHERE id = ?1",
            params![entry_id],
        )?;
        Ok(rows > 0)
    }

    /// Delete the most recently inserted stage-type journal entry for a
    /// plant. "Most recent" is last-in by `seq`, not by date: several
    /// entries can share a calendar date. No-op if the plant has no stage
    /// entries.
    pub fn delete_last_stage_entry(&self, plant_id: &str) -> Result<bool> {
        let rows = self.conn.execute(
            r#"
            DELETE FROM journal_entries
            WHERE id = (
                SELECT id FROM journal_entries
                WHERE plant_id = ?1 AND type = 'stage'
                ORDER BY seq DESC
                LIMIT 1
            )
            "#,
            params![plant_id],
        )?;
        Ok(rows > 0)
    }

    /// Insert a user-submitted catalog entry.
    ///
    /// Custom entries are create-only; there is no update or delete.
    pub fn insert_custom_entry(&self, entry: &CatalogEntry, seq: i64) -> Result<()> {
        self.conn.execute(
            r#"
            INSERT INTO custom_catalog_entries
                (id, title, category, scientific_name, description, image_url,
                 planting_seasons, best_months, sun_requirements, watering,
                 frost_tolerance, difficulty, plant_life, suitable_for_containers,
                 requires_trellis, days_to_germination, days_to_harvest,
                 sowing_depth, spacing, companion_plants, plant_height,
                 drought_tolerant, is_custom, seq)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14,
                    ?15, ?16, ?17, ?18, ?19, ?20, ?21, ?22, ?23, ?24)
            "#,
            params![
                entry.id,
                entry.title,
                entry.category,
                entry.scientific_name,
                entry.description,
                entry.image_url,
                array_to_json("planting_seasons", &entry.planting_seasons)?,
                entry.best_months,
                entry.sun_requirements,
                entry.watering,
                entry.frost_tolerance,
                entry.difficulty,
                entry.plant_life,
                bool_to_int(entry.suitable_for_containers),
                bool_to_int(entry.requires_trellis),
                entry.days_to_germination,
                entry.days_to_harvest,
                entry.sowing_depth,
                entry.spacing,
                entry.companion_plants,
                entry.plant_height,
                bool_to_int(entry.drought_tolerant),
                bool_to_int(entry.is_custom),
                seq,
            ],
        )?;
        Ok(())
    }
}
