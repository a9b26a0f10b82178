// SPDX-FileCopyrightText: 2025 Verdant contributors
// SPDX-License-Identifier: MIT

//! The in-memory garden state service.
//!
//! [`GardenStore`] owns the canonical area/plant/journal state for the
//! lifetime of the app session. Every mutation applies to memory
//! synchronously - the UI re-renders against the new state in the same pass -
//! and dispatches the matching durable write in the background (see
//! [`Persist`]). On conflict, memory wins until overwritten by a fresh
//! [`GardenStore::load`].
//!
//! All mutations originate from one UI thread of control, so in-memory
//! updates are strictly ordered by call order; concurrent writes race only
//! at the persistence layer.

use std::sync::{Mutex, MutexGuard};

use tracing::{debug, error};

use verdant_store_core::catalog::{CatalogEntry, NewCatalogEntry, merged_catalog};
use verdant_store_core::garden::{Area, EntryKind, JournalEntry, Plant, total_plant_count};
use verdant_store_core::stage::GrowthStage;

use crate::ids::{new_custom_id, new_id, today};
use crate::persist::{DbHandle, Persist, WriteQueue};

const DEFAULT_AREA_EMOJI: &str = "🌱";
const FREEHAND_CATEGORY: &str = "Other";

#[derive(Default)]
struct GardenState {
    areas: Vec<Area>,
    custom_entries: Vec<CatalogEntry>,
    /// Next insertion sequence, shared across all scopes. Seeded from the
    /// stored maximum at load so restarts keep appending after existing rows.
    next_seq: i64,
    loaded: bool,
}

/// The application's single authoritative garden state.
///
/// Constructed once at application start (see
/// [`Session::start`](crate::session::Session::start)) and passed by
/// reference to whatever consumes it. A store built without a database
/// handle runs a degraded, non-durable session: every mutation still works
/// in memory and returns a no-op [`Persist`].
pub struct GardenStore {
    db: Option<DbHandle>,
    queue: Option<WriteQueue>,
    state: Mutex<GardenState>,
}

impl GardenStore {
    /// Requires a running Tokio runtime when a database handle is given
    /// (the background writer task is spawned here).
    pub fn new(db: Option<DbHandle>) -> Self {
        let queue = db.clone().map(WriteQueue::new);
        Self {
            db,
            queue,
            state: Mutex::new(GardenState::default()),
        }
    }

    fn state(&self) -> MutexGuard<'_, GardenState> {
        // Single-writer model: poisoning would take a panic mid-mutation on
        // the one UI thread; recover with whatever state is there.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Seed the in-memory state from the durable store.
    ///
    /// A load failure surfaces as an empty initial state with the loaded
    /// flag still set, rather than blocking startup; the session continues
    /// (non-durably for whatever failed to load).
    pub async fn load(&self) {
        let Some(db) = &self.db else {
            self.state().loaded = true;
            return;
        };

        let db = db.clone();
        let loaded = tokio::task::spawn_blocking(move || {
            let db = db.blocking_lock();
            let areas = db.load_all_areas()?;
            let custom = db.load_custom_entries()?;
            let max_seq = db.max_seq()?;
            Ok::<_, verdant_store_db::Error>((areas, custom, max_seq))
        })
        .await;

        let mut state = self.state();
        match loaded {
            Ok(Ok((areas, custom, max_seq))) => {
                debug!(
                    areas = areas.len(),
                    custom_entries = custom.len(),
                    "loaded garden state"
                );
                state.areas = areas;
                state.custom_entries = custom;
                state.next_seq = max_seq + 1;
            }
            Ok(Err(e)) => {
                error!(error = %e, "failed to load garden state; starting empty");
                *state = GardenState::default();
            }
            Err(e) => {
                error!(error = %e, "garden load task failed; starting empty");
                *state = GardenState::default();
            }
        }
        state.loaded = true;
    }

    /// Whether the initial load has completed (successfully or not).
    pub fn is_loaded(&self) -> bool {
        self.state().loaded
    }

    /// Whether this store has a database behind it. False in a degraded
    /// session: mutations then only live in memory.
    pub fn is_durable(&self) -> bool {
        self.db.is_some()
    }

    // ── Reads ───────────────────────────────────────────────────────────

    /// Snapshot of all areas, in insertion order.
    pub fn areas(&self) -> Vec<Area> {
        self.state().areas.clone()
    }

    /// Snapshot of the user-submitted catalog entries, in insertion order.
    pub fn custom_entries(&self) -> Vec<CatalogEntry> {
        self.state().custom_entries.clone()
    }

    /// One logical catalog: the static built-in entries plus the current
    /// custom entries.
    pub fn merged_catalog(&self, builtin: &[CatalogEntry]) -> Vec<CatalogEntry> {
        merged_catalog(builtin, &self.state().custom_entries)
    }

    /// Total plant count across all areas, recomputed from current state.
    pub fn total_plant_count(&self) -> usize {
        total_plant_count(&self.state().areas)
    }

    // ── Area mutations ──────────────────────────────────────────────────

    /// Create a new, empty area. Returns the created area so a caller can
    /// reference its generated id immediately; `None` if the name is blank.
    pub fn create_area(&self, name: &str, emoji: Option<&str>) -> Option<(Area, Persist)> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }

        let mut state = self.state();
        let area = Area {
            id: new_id(),
            name: name.to_owned(),
            emoji: emoji.unwrap_or(DEFAULT_AREA_EMOJI).to_owned(),
            created_at: today(),
            seq: next_seq(&mut state),
            plants: Vec::new(),
        };
        state.areas.push(area.clone());
        drop(state);

        let persist = self.dispatch("insert_area", {
            let area = area.clone();
            move |db| db.insert_area(&area)
        });
        Some((area, persist))
    }

    /// Rename an area; the emoji is only replaced when one is given.
    pub fn rename_area(&self, area_id: &str, new_name: &str, new_emoji: Option<&str>) -> Persist {
        let new_name = new_name.trim();
        if new_name.is_empty() {
            return Persist::noop();
        }

        let mut state = self.state();
        let Some(area) = state.areas.iter_mut().find(|a| a.id == area_id) else {
            return Persist::noop();
        };
        area.name = new_name.to_owned();
        if let Some(emoji) = new_emoji {
            area.emoji = emoji.to_owned();
        }
        let (id, name, emoji) = (area.id.clone(), area.name.clone(), area.emoji.clone());
        drop(state);

        self.dispatch("update_area", move |db| db.update_area(&id, &name, &emoji))
    }

    /// Delete an area with everything in it. The durable delete relies on
    /// cascades for the dependent plant and journal rows.
    pub fn delete_area(&self, area_id: &str) -> Persist {
        let mut state = self.state();
        let before = state.areas.len();
        state.areas.retain(|a| a.id != area_id);
        if state.areas.len() == before {
            return Persist::noop();
        }
        drop(state);

        let id = area_id.to_owned();
        self.dispatch("delete_area", move |db| db.delete_area(&id).map(|_| ()))
    }

    // ── Plant mutations ─────────────────────────────────────────────────

    /// Add a plant from a catalog entry. Display fields are denormalized
    /// from the entry at this instant so the plant's history stays stable
    /// even if the catalog entry later changes or disappears.
    pub fn add_plant_to_area(
        &self,
        area_id: &str,
        item: &CatalogEntry,
    ) -> Option<(Plant, Persist)> {
        let plant = Plant {
            id: new_id(),
            seed_id: Some(item.id.clone()),
            seed_title: item.title.clone(),
            seed_category: item.category.clone(),
            seed_image: item.image_url.clone(),
            planted_date: today(),
            stage: None,
            seq: 0,
            journal: Vec::new(),
        };
        self.push_plant(area_id, plant)
    }

    /// Add a freehand plant with no catalog linkage.
    pub fn add_custom_plant_to_area(
        &self,
        area_id: &str,
        name: &str,
        category: Option<&str>,
    ) -> Option<(Plant, Persist)> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }

        let plant = Plant {
            id: new_id(),
            seed_id: None,
            seed_title: name.to_owned(),
            seed_category: category
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .unwrap_or(FREEHAND_CATEGORY)
                .to_owned(),
            seed_image: None,
            planted_date: today(),
            stage: None,
            seq: 0,
            journal: Vec::new(),
        };
        self.push_plant(area_id, plant)
    }

    fn push_plant(&self, area_id: &str, mut plant: Plant) -> Option<(Plant, Persist)> {
        let mut state = self.state();
        plant.seq = next_seq(&mut state);
        let area = state.areas.iter_mut().find(|a| a.id == area_id)?;
        area.plants.push(plant.clone());
        drop(state);

        let persist = self.dispatch("insert_plant", {
            let area_id = area_id.to_owned();
            let plant = plant.clone();
            move |db| db.insert_plant(&area_id, &plant)
        });
        Some((plant, persist))
    }

    /// Atomic composite: create an area already containing its first plant.
    ///
    /// The in-memory update is one state transition - no observer ever sees
    /// the area without the plant - and the durable write is one
    /// transaction over both rows.
    pub fn create_area_and_add_plant(
        &self,
        name: &str,
        emoji: Option<&str>,
        item: &CatalogEntry,
    ) -> Option<(Area, Persist)> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }

        let mut state = self.state();
        let area_seq = next_seq(&mut state);
        let plant_seq = next_seq(&mut state);
        let area = Area {
            id: new_id(),
            name: name.to_owned(),
            emoji: emoji.unwrap_or(DEFAULT_AREA_EMOJI).to_owned(),
            created_at: today(),
            seq: area_seq,
            plants: vec![Plant {
                id: new_id(),
                seed_id: Some(item.id.clone()),
                seed_title: item.title.clone(),
                seed_category: item.category.clone(),
                seed_image: item.image_url.clone(),
                planted_date: today(),
                stage: None,
                seq: plant_seq,
                journal: Vec::new(),
            }],
        };
        state.areas.push(area.clone());
        drop(state);

        let persist = self.dispatch("insert_area_with_plants", {
            let area = area.clone();
            move |db| db.insert_area_with_plants(&area)
        });
        Some((area, persist))
    }

    /// Remove a plant from its area. Cascades cover its journal durably.
    pub fn remove_plant_from_area(&self, area_id: &str, plant_id: &str) -> Persist {
        let mut state = self.state();
        let Some(area) = state.areas.iter_mut().find(|a| a.id == area_id) else {
            return Persist::noop();
        };
        let before = area.plants.len();
        area.plants.retain(|p| p.id != plant_id);
        if area.plants.len() == before {
            return Persist::noop();
        }
        drop(state);

        let id = plant_id.to_owned();
        self.dispatch("delete_plant", move |db| db.delete_plant(&id).map(|_| ()))
    }

    // ── Stage mutations ─────────────────────────────────────────────────

    /// Advance a plant one stage forward, appending exactly one
    /// system-generated journal entry for the new stage. A no-op once the
    /// plant is done.
    pub fn advance_plant_stage(&self, area_id: &str, plant_id: &str) -> Persist {
        let mut state = self.state();
        let Some(current) = plant_stage(&state, area_id, plant_id) else {
            return Persist::noop();
        };
        let Some(target) = GrowthStage::advance(current) else {
            return Persist::noop();
        };
        self.apply_stage_advance(&mut state, area_id, plant_id, target)
    }

    /// Set a plant's stage to an explicit target, which must be the
    /// immediately next stage (no skipping); otherwise a no-op.
    pub fn update_plant_stage(
        &self,
        area_id: &str,
        plant_id: &str,
        new_stage: GrowthStage,
    ) -> Persist {
        let mut state = self.state();
        let Some(current) = plant_stage(&state, area_id, plant_id) else {
            return Persist::noop();
        };
        if GrowthStage::advance(current) != Some(new_stage) {
            return Persist::noop();
        }
        self.apply_stage_advance(&mut state, area_id, plant_id, new_stage)
    }

    fn apply_stage_advance(
        &self,
        state: &mut MutexGuard<'_, GardenState>,
        area_id: &str,
        plant_id: &str,
        target: GrowthStage,
    ) -> Persist {
        let entry_seq = next_seq(state);
        let Some(plant) = find_plant(state, area_id, plant_id) else {
            return Persist::noop();
        };
        plant.stage = Some(target);
        let entry = JournalEntry {
            id: new_id(),
            date: today(),
            text: target.label().to_owned(),
            kind: EntryKind::Stage,
            seq: entry_seq,
        };
        plant.journal.push(entry.clone());

        // Two independent writes, not a transaction; the queue keeps them in
        // dispatch order and both must eventually complete.
        let stage_write = self.dispatch("update_plant_stage", {
            let id = plant_id.to_owned();
            move |db| db.update_plant_stage(&id, Some(target))
        });
        let journal_write = self.dispatch("insert_journal_entry", {
            let id = plant_id.to_owned();
            move |db| db.insert_journal_entry(&id, &entry)
        });
        Persist::all([stage_write, journal_write])
    }

    /// Roll a plant back one stage, removing the most recently added
    /// stage-type journal entry instead of logging a new one: the journal
    /// reflects only transitions the user actually experienced moving
    /// forward. `previous_stage` must be the immediate predecessor of the
    /// current stage (`None` for "back to not started"); otherwise a no-op.
    pub fn rollback_plant_stage(
        &self,
        area_id: &str,
        plant_id: &str,
        previous_stage: Option<GrowthStage>,
    ) -> Persist {
        let mut state = self.state();
        let Some(current) = plant_stage(&state, area_id, plant_id) else {
            return Persist::noop();
        };
        if GrowthStage::rollback(current) != Some(previous_stage) {
            return Persist::noop();
        }

        let Some(plant) = find_plant(&mut state, area_id, plant_id) else {
            return Persist::noop();
        };
        plant.stage = previous_stage;
        if let Some(last) = plant.last_stage_entry().map(|e| e.id.clone()) {
            plant.journal.retain(|e| e.id != last);
        }
        drop(state);

        let stage_write = self.dispatch("update_plant_stage", {
            let id = plant_id.to_owned();
            move |db| db.update_plant_stage(&id, previous_stage)
        });
        let journal_delete = self.dispatch("delete_last_stage_entry", {
            let id = plant_id.to_owned();
            move |db| db.delete_last_stage_entry(&id).map(|_| ())
        });
        Persist::all([stage_write, journal_delete])
    }

    // ── Journal mutations ───────────────────────────────────────────────

    /// Append a user-authored note. The text is trimmed; a note that is
    /// empty after trimming is rejected locally and nothing is dispatched.
    pub fn add_journal_entry(
        &self,
        area_id: &str,
        plant_id: &str,
        text: &str,
    ) -> Option<(JournalEntry, Persist)> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let mut state = self.state();
        let entry_seq = next_seq(&mut state);
        let plant = find_plant(&mut state, area_id, plant_id)?;
        let entry = JournalEntry {
            id: new_id(),
            date: today(),
            text: text.to_owned(),
            kind: EntryKind::Note,
            seq: entry_seq,
        };
        plant.journal.push(entry.clone());
        drop(state);

        let persist = self.dispatch("insert_journal_entry", {
            let plant_id = plant_id.to_owned();
            let entry = entry.clone();
            move |db| db.insert_journal_entry(&plant_id, &entry)
        });
        Some((entry, persist))
    }

    /// Remove a user-authored note. Stage entries are system-owned and
    /// refuse removal here; they only disappear through
    /// [`GardenStore::rollback_plant_stage`].
    pub fn remove_journal_entry(&self, area_id: &str, plant_id: &str, entry_id: &str) -> Persist {
        let mut state = self.state();
        let Some(plant) = find_plant(&mut state, area_id, plant_id) else {
            return Persist::noop();
        };
        let removable = plant
            .journal
            .iter()
            .any(|e| e.id == entry_id && e.kind == EntryKind::Note);
        if !removable {
            return Persist::noop();
        }
        plant.journal.retain(|e| e.id != entry_id);
        drop(state);

        let id = entry_id.to_owned();
        self.dispatch("delete_journal_entry", move |db| {
            db.delete_journal_entry(&id).map(|_| ())
        })
    }

    // ── Catalog mutations ───────────────────────────────────────────────

    /// Add a user-submitted catalog entry (create-only: entries are never
    /// edited or deleted). Returns `None` if the title is blank.
    pub fn add_custom_seed_to_catalog(
        &self,
        form: NewCatalogEntry,
    ) -> Option<(CatalogEntry, Persist)> {
        if form.title.trim().is_empty() {
            return None;
        }

        let entry = CatalogEntry::from_form(new_custom_id(), form);
        let mut state = self.state();
        let seq = next_seq(&mut state);
        state.custom_entries.push(entry.clone());
        drop(state);

        let persist = self.dispatch("insert_custom_entry", {
            let entry = entry.clone();
            move |db| db.insert_custom_entry(&entry, seq)
        });
        Some((entry, persist))
    }

    fn dispatch<F>(&self, op: &'static str, work: F) -> Persist
    where
        F: FnOnce(&mut verdant_store_db::GardenDb) -> verdant_store_db::Result<()>
            + Send
            + 'static,
    {
        match &self.queue {
            Some(queue) => queue.submit(op, work),
            None => Persist::noop(),
        }
    }
}

fn next_seq(state: &mut GardenState) -> i64 {
    let seq = state.next_seq;
    state.next_seq += 1;
    seq
}

fn plant_stage(
    state: &GardenState,
    area_id: &str,
    plant_id: &str,
) -> Option<Option<GrowthStage>> {
    state
        .areas
        .iter()
        .find(|a| a.id == area_id)?
        .plant(plant_id)
        .map(|p| p.stage)
}

fn find_plant<'a>(
    state: &'a mut GardenState,
    area_id: &str,
    plant_id: &str,
) -> Option<&'a mut Plant> {
    state
        .areas
        .iter_mut()
        .find(|a| a.id == area_id)?
        .plant_mut(plant_id)
}
