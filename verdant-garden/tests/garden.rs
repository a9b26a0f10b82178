// SPDX-FileCopyrightText: 2025 Verdant contributors
// SPDX-License-Identifier: MIT

//! End-to-end tests for the garden store against a real database file.
//!
//! Each test awaits the `Persist` handles it cares about, then loads the
//! same database into a fresh store to check what actually survived.

use std::path::Path;
use std::sync::Arc;

use tokio::sync::Mutex;

use verdant_garden::garden::GardenStore;
use verdant_garden::persist::DbHandle;
use verdant_garden::{Config, Session};
use verdant_store_core::catalog::{CatalogEntry, NewCatalogEntry};
use verdant_store_core::garden::EntryKind;
use verdant_store_core::stage::GrowthStage;
use verdant_store_db::GardenDb;

fn catalog_item(id: &str, title: &str, category: &str) -> CatalogEntry {
    CatalogEntry {
        id: id.into(),
        title: title.into(),
        category: category.into(),
        scientific_name: None,
        description: None,
        image_url: Some(format!("https://img.example/{id}.jpg")),
        planting_seasons: vec!["Spring".into()],
        best_months: None,
        sun_requirements: None,
        watering: None,
        frost_tolerance: None,
        difficulty: None,
        plant_life: None,
        suitable_for_containers: false,
        requires_trellis: false,
        days_to_germination: None,
        days_to_harvest: None,
        sowing_depth: None,
        spacing: None,
        companion_plants: None,
        plant_height: None,
        drought_tolerant: false,
        is_custom: false,
    }
}

fn open_handle(path: &Path) -> DbHandle {
    Arc::new(Mutex::new(GardenDb::open(path).unwrap()))
}

async fn fresh_store(db: &DbHandle) -> GardenStore {
    let store = GardenStore::new(Some(db.clone()));
    store.load().await;
    store
}

/// Expected number of stage journal entries for a given current stage: one
/// per net forward transition.
fn expected_stage_entries(stage: Option<GrowthStage>) -> usize {
    match stage {
        None => 0,
        Some(s) => GrowthStage::ORDER.iter().position(|o| *o == s).unwrap() + 1,
    }
}

#[tokio::test]
async fn test_create_area_and_add_plant_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let db = open_handle(&dir.path().join("garden.sqlite"));
    let store = fresh_store(&db).await;

    let (area, persist) = store.create_area("Planter Box 1", Some("🪴")).unwrap();
    persist.wait().await.unwrap();

    let item = catalog_item("c1", "Lettuce", "Vegetable");
    let (plant, persist) = store.add_plant_to_area(&area.id, &item).unwrap();
    persist.wait().await.unwrap();

    assert_eq!(plant.stage, None);
    assert_eq!(plant.seed_title, "Lettuce");
    assert_eq!(plant.seed_id.as_deref(), Some("c1"));
    assert!(plant.journal.is_empty());
    assert_eq!(store.total_plant_count(), 1);

    // Reload from disk into a fresh store: structure must match exactly.
    let reloaded = fresh_store(&db).await;
    let areas = reloaded.areas();
    assert_eq!(areas.len(), 1);
    assert_eq!(areas[0].name, "Planter Box 1");
    assert_eq!(areas[0].emoji, "🪴");
    assert_eq!(areas[0].plants, vec![plant]);
}

#[tokio::test]
async fn test_stage_advance_appends_one_entry() {
    let dir = tempfile::tempdir().unwrap();
    let db = open_handle(&dir.path().join("garden.sqlite"));
    let store = fresh_store(&db).await;

    let item = catalog_item("c1", "Lettuce", "Vegetable");
    let (area, persist) = store
        .create_area_and_add_plant("Bed", None, &item)
        .unwrap();
    persist.wait().await.unwrap();
    let plant_id = area.plants[0].id.clone();

    store
        .advance_plant_stage(&area.id, &plant_id)
        .wait()
        .await
        .unwrap();

    let areas = store.areas();
    let plant = &areas[0].plants[0];
    assert_eq!(plant.stage, Some(GrowthStage::Planted));
    assert_eq!(plant.journal.len(), 1);
    assert_eq!(plant.journal[0].kind, EntryKind::Stage);
    assert_eq!(plant.journal[0].text, "Planted");

    let reloaded = fresh_store(&db).await;
    let areas = reloaded.areas();
    let plant = &areas[0].plants[0];
    assert_eq!(plant.stage, Some(GrowthStage::Planted));
    assert_eq!(plant.stage_entry_count(), 1);
}

#[tokio::test]
async fn test_stage_rollback_removes_the_entry() {
    let dir = tempfile::tempdir().unwrap();
    let db = open_handle(&dir.path().join("garden.sqlite"));
    let store = fresh_store(&db).await;

    let item = catalog_item("c1", "Lettuce", "Vegetable");
    let (area, persist) = store
        .create_area_and_add_plant("Bed", None, &item)
        .unwrap();
    persist.wait().await.unwrap();
    let plant_id = area.plants[0].id.clone();

    store
        .advance_plant_stage(&area.id, &plant_id)
        .wait()
        .await
        .unwrap();
    store
        .rollback_plant_stage(&area.id, &plant_id, None)
        .wait()
        .await
        .unwrap();

    let areas = store.areas();
    let plant = &areas[0].plants[0];
    assert_eq!(plant.stage, None);
    assert_eq!(plant.stage_entry_count(), 0);

    let reloaded = fresh_store(&db).await;
    let areas = reloaded.areas();
    let plant = &areas[0].plants[0];
    assert_eq!(plant.stage, None);
    assert!(plant.journal.is_empty());
}

#[tokio::test]
async fn test_journal_tracks_net_forward_transitions() {
    let dir = tempfile::tempdir().unwrap();
    let db = open_handle(&dir.path().join("garden.sqlite"));
    let store = fresh_store(&db).await;

    let item = catalog_item("c1", "Tomato", "Vegetable");
    let (area, persist) = store
        .create_area_and_add_plant("Bed", None, &item)
        .unwrap();
    persist.wait().await.unwrap();
    let plant_id = area.plants[0].id.clone();

    // A user note must never be touched by stage bookkeeping.
    let (_, persist) = store
        .add_journal_entry(&area.id, &plant_id, "first true leaves")
        .unwrap();
    persist.wait().await.unwrap();

    // Walk forward to done, back twice, forward once; check the invariant
    // after every step.
    let mut writes = Vec::new();
    for _ in 0..5 {
        writes.push(store.advance_plant_stage(&area.id, &plant_id));
    }
    let check = |store: &GardenStore| {
        let plant = store.areas()[0].plants[0].clone();
        assert_eq!(plant.stage_entry_count(), expected_stage_entries(plant.stage));
    };
    check(&store);

    let plant = store.areas()[0].plants[0].clone();
    assert_eq!(plant.stage, Some(GrowthStage::Done));
    // Advancing past the terminal stage is a no-op.
    writes.push(store.advance_plant_stage(&area.id, &plant_id));
    assert_eq!(store.areas()[0].plants[0].stage, Some(GrowthStage::Done));

    writes.push(store.rollback_plant_stage(&area.id, &plant_id, Some(GrowthStage::Harvesting)));
    check(&store);
    writes.push(store.rollback_plant_stage(&area.id, &plant_id, Some(GrowthStage::Growing)));
    check(&store);
    writes.push(store.advance_plant_stage(&area.id, &plant_id));
    check(&store);

    for persist in writes {
        persist.wait().await.unwrap();
    }

    let reloaded = fresh_store(&db).await;
    let areas = reloaded.areas();
    let plant = &areas[0].plants[0];
    assert_eq!(plant.stage, Some(GrowthStage::Harvesting));
    assert_eq!(plant.stage_entry_count(), 4);
    // The note survived every rollback.
    assert_eq!(
        plant
            .journal
            .iter()
            .filter(|e| e.kind == EntryKind::Note)
            .count(),
        1
    );
}

#[tokio::test]
async fn test_stage_transitions_reject_skips() {
    let dir = tempfile::tempdir().unwrap();
    let db = open_handle(&dir.path().join("garden.sqlite"));
    let store = fresh_store(&db).await;

    let item = catalog_item("c1", "Lettuce", "Vegetable");
    let (area, persist) = store
        .create_area_and_add_plant("Bed", None, &item)
        .unwrap();
    persist.wait().await.unwrap();
    let plant_id = area.plants[0].id.clone();

    // Not-started plants can only move to planted.
    store
        .update_plant_stage(&area.id, &plant_id, GrowthStage::Growing)
        .wait()
        .await
        .unwrap();
    assert_eq!(store.areas()[0].plants[0].stage, None);

    // Rollback from not-started is a no-op.
    store
        .rollback_plant_stage(&area.id, &plant_id, None)
        .wait()
        .await
        .unwrap();
    assert_eq!(store.areas()[0].plants[0].stage_entry_count(), 0);

    // The explicit-target form accepts exactly the successor.
    store
        .update_plant_stage(&area.id, &plant_id, GrowthStage::Planted)
        .wait()
        .await
        .unwrap();
    assert_eq!(store.areas()[0].plants[0].stage, Some(GrowthStage::Planted));

    // Rollback must name the immediate predecessor.
    store
        .rollback_plant_stage(&area.id, &plant_id, Some(GrowthStage::Done))
        .wait()
        .await
        .unwrap();
    assert_eq!(store.areas()[0].plants[0].stage, Some(GrowthStage::Planted));
}

#[tokio::test]
async fn test_delete_area_leaves_no_orphans() {
    let dir = tempfile::tempdir().unwrap();
    let db = open_handle(&dir.path().join("garden.sqlite"));
    let store = fresh_store(&db).await;

    let item = catalog_item("c1", "Lettuce", "Vegetable");
    let (area, persist) = store
        .create_area_and_add_plant("Bed", None, &item)
        .unwrap();
    persist.wait().await.unwrap();
    let plant_id = area.plants[0].id.clone();
    let (_, persist) = store
        .add_journal_entry(&area.id, &plant_id, "sprouting nicely")
        .unwrap();
    persist.wait().await.unwrap();

    store.delete_area(&area.id).wait().await.unwrap();
    assert!(store.areas().is_empty());
    assert_eq!(store.total_plant_count(), 0);

    let reloaded = fresh_store(&db).await;
    assert!(reloaded.areas().is_empty());

    // No orphaned plant or journal rows behind the area.
    let guard = db.lock().await;
    assert_eq!(guard.count_plants().unwrap(), 0);
    assert_eq!(guard.count_journal_entries(&plant_id).unwrap(), 0);
}

#[tokio::test]
async fn test_composite_is_one_state_transition() {
    let dir = tempfile::tempdir().unwrap();
    let db = open_handle(&dir.path().join("garden.sqlite"));
    let store = fresh_store(&db).await;

    let item = catalog_item("c1", "Lettuce", "Vegetable");
    let (area, persist) = store
        .create_area_and_add_plant("Planter Box 1", Some("🪴"), &item)
        .unwrap();

    // The very first observable snapshot already holds the plant.
    let snapshot = store.areas();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].plants.len(), 1);
    assert_eq!(area.plants[0].seed_title, "Lettuce");

    persist.wait().await.unwrap();
    let reloaded = fresh_store(&db).await;
    assert_eq!(reloaded.areas()[0].plants.len(), 1);
}

#[tokio::test]
async fn test_note_validation_and_removal_rules() {
    let dir = tempfile::tempdir().unwrap();
    let db = open_handle(&dir.path().join("garden.sqlite"));
    let store = fresh_store(&db).await;

    let item = catalog_item("c1", "Lettuce", "Vegetable");
    let (area, persist) = store
        .create_area_and_add_plant("Bed", None, &item)
        .unwrap();
    persist.wait().await.unwrap();
    let plant_id = area.plants[0].id.clone();

    // Whitespace-only notes are rejected before any dispatch.
    assert!(store.add_journal_entry(&area.id, &plant_id, "   ").is_none());

    store
        .advance_plant_stage(&area.id, &plant_id)
        .wait()
        .await
        .unwrap();
    let (note, persist) = store
        .add_journal_entry(&area.id, &plant_id, "  watered deeply  ")
        .unwrap();
    persist.wait().await.unwrap();
    assert_eq!(note.text, "watered deeply");

    // Stage entries are system-owned: removal through the note path refuses.
    let stage_entry_id = store.areas()[0].plants[0].journal[0].id.clone();
    store
        .remove_journal_entry(&area.id, &plant_id, &stage_entry_id)
        .wait()
        .await
        .unwrap();
    assert_eq!(store.areas()[0].plants[0].journal.len(), 2);

    store
        .remove_journal_entry(&area.id, &plant_id, &note.id)
        .wait()
        .await
        .unwrap();
    let reloaded = fresh_store(&db).await;
    let areas = reloaded.areas();
    let journal = &areas[0].plants[0].journal;
    assert_eq!(journal.len(), 1);
    assert_eq!(journal[0].kind, EntryKind::Stage);
}

#[tokio::test]
async fn test_custom_seed_and_freehand_plant() {
    let dir = tempfile::tempdir().unwrap();
    let db = open_handle(&dir.path().join("garden.sqlite"));
    let store = fresh_store(&db).await;

    let (entry, persist) = store
        .add_custom_seed_to_catalog(NewCatalogEntry {
            title: "Grandma's Pole Bean".into(),
            requires_trellis: Some(true),
            planting_seasons: vec!["Spring".into()],
            ..Default::default()
        })
        .unwrap();
    persist.wait().await.unwrap();
    assert!(entry.id.starts_with("custom-"));
    assert_eq!(entry.category, "Vegetable");
    assert!(entry.is_custom);

    // Blank titles never reach the catalog.
    assert!(store.add_custom_seed_to_catalog(NewCatalogEntry::default()).is_none());

    let builtin = vec![catalog_item("c1", "Lettuce", "Vegetable")];
    let merged = store.merged_catalog(&builtin);
    assert_eq!(merged.len(), 2);
    assert_eq!(merged[0].id, "c1");
    assert_eq!(merged[1].id, entry.id);

    let (area, persist) = store.create_area("Bed", None).unwrap();
    persist.wait().await.unwrap();
    let (plant, persist) = store
        .add_custom_plant_to_area(&area.id, "Mystery vine", None)
        .unwrap();
    persist.wait().await.unwrap();
    assert_eq!(plant.seed_id, None);
    assert_eq!(plant.seed_category, "Other");

    let reloaded = fresh_store(&db).await;
    assert_eq!(reloaded.custom_entries(), vec![entry]);
    assert_eq!(reloaded.areas()[0].plants[0].seed_category, "Other");
}

#[tokio::test]
async fn test_rename_area_keeps_emoji_unless_given() {
    let dir = tempfile::tempdir().unwrap();
    let db = open_handle(&dir.path().join("garden.sqlite"));
    let store = fresh_store(&db).await;

    let (area, persist) = store.create_area("Bed", Some("🪴")).unwrap();
    persist.wait().await.unwrap();

    store
        .rename_area(&area.id, "Raised Bed", None)
        .wait()
        .await
        .unwrap();
    let areas = store.areas();
    let renamed = &areas[0];
    assert_eq!(renamed.name, "Raised Bed");
    assert_eq!(renamed.emoji, "🪴");

    // Blank names are rejected locally.
    store.rename_area(&area.id, "  ", None).wait().await.unwrap();
    assert_eq!(store.areas()[0].name, "Raised Bed");

    store
        .rename_area(&area.id, "Raised Bed", Some("🌻"))
        .wait()
        .await
        .unwrap();
    let reloaded = fresh_store(&db).await;
    assert_eq!(reloaded.areas()[0].emoji, "🌻");
}

#[tokio::test]
async fn test_detached_store_runs_in_memory() {
    let store = GardenStore::new(None);
    store.load().await;
    assert!(store.is_loaded());
    assert!(!store.is_durable());

    let item = catalog_item("c1", "Lettuce", "Vegetable");
    let (area, persist) = store
        .create_area_and_add_plant("Bed", None, &item)
        .unwrap();
    persist.wait().await.unwrap();
    store
        .advance_plant_stage(&area.id, &area.plants[0].id)
        .wait()
        .await
        .unwrap();

    assert_eq!(store.total_plant_count(), 1);
    assert_eq!(
        store.areas()[0].plants[0].stage,
        Some(GrowthStage::Planted)
    );
}

#[tokio::test]
async fn test_session_degrades_when_db_unopenable() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("garden.sqlite");
    std::fs::write(&path, "this is not a database").unwrap();

    let config = Config {
        db_path: path,
        ..Default::default()
    };
    let session = Session::start(&config).await;
    assert!(!session.is_durable());
    assert!(session.garden.is_loaded());

    // The session stays usable, non-durably.
    assert!(session.garden.create_area("Bed", None).is_some());
    assert_eq!(session.garden.areas().len(), 1);
}

#[tokio::test]
async fn test_session_start_bootstraps_both_stores() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        db_path: dir.path().join("garden.sqlite"),
        ..Default::default()
    };

    let session = Session::start(&config).await;
    assert!(session.is_durable());
    let (_, persist) = session.garden.create_area("Bed", None).unwrap();
    persist.wait().await.unwrap();

    let session = Session::start(&config).await;
    assert_eq!(session.garden.areas().len(), 1);
    assert_eq!(session.settings.get(), Default::default());
}
