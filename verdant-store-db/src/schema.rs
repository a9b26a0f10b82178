// SPDX-FileCopyrightText: 2025 Verdant contributors
// SPDX-License-Identifier: MIT

//! Database schema definitions for the garden store.
//!
//! Setup is idempotent (`create table if not exists` throughout, no
//! migrations). Ownership cascades down the hierarchy: deleting an area
//! deletes its plants, deleting a plant deletes its journal entries.
//!
//! Every user-ordered table carries an explicit `seq` column assigned by the
//! writer; sibling order is ascending `seq`, never rowids and never calendar
//! dates (multiple rows can share a date).

/// Garden schema SQL (areas, plants, journal_entries, custom_catalog_entries,
/// kv_store).
pub const SCHEMA_SQL: &str = r#"
create table if not exists areas (
    id         text primary key not null,
    name       text not null,
    emoji      text not null default '🌱',
    created_at text not null,
    seq        integer not null
);

create table if not exists plants (
    id            text primary key not null,
    area_id       text not null,
    seed_id       text,
    seed_title    text,
    seed_category text,
    seed_image    text,
    planted_date  text not null,
    stage         text,
    seq           integer not null,
    foreign key (area_id) references areas(id) on delete cascade
);

create index if not exists IndexPlantsArea on plants(area_id);

create table if not exists journal_entries (
    id       text primary key not null,
    plant_id text not null,
    date     text not null,
    text     text not null,
    type     text not null default 'note',
    seq      integer not null,
    foreign key (plant_id) references plants(id) on delete cascade
);

create index if not exists IndexJournalEntriesPlant on journal_entries(plant_id);

create table if not exists custom_catalog_entries (
    id                      text primary key not null,
    title                   text not null,
    category                text not null default 'Vegetable',
    scientific_name         text,
    description             text,
    image_url               text,
    planting_seasons        text,
    best_months             text,
    sun_requirements        text,
    watering                text,
    frost_tolerance         text,
    difficulty              text,
    plant_life              text,
    suitable_for_containers integer not null default 0,
    requires_trellis        integer not null default 0,
    days_to_germination     text,
    days_to_harvest         text,
    sowing_depth            text,
    spacing                 text,
    companion_plants        text,
    plant_height            text,
    drought_tolerant        integer not null default 0,
    is_custom               integer not null default 1,
    seq                     integer not null
);

create table if not exists kv_store (
    key   text primary key not null,
    value text not null
);
"#;
