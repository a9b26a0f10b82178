// SPDX-FileCopyrightText: 2025 Verdant contributors
// SPDX-License-Identifier: MIT

//! Plant catalog reference records.
//!
//! The catalog is the combined list of built-in entries (a static data source
//! loaded once at startup, never mutated here) and user-submitted custom
//! entries. A catalog entry describes a kind of plant; it is distinct from a
//! [`Plant`](crate::garden::Plant), which is one tracked instance growing in
//! an area.

use serde::{Deserialize, Serialize};

/// Prefix marking user-submitted catalog ids, so they can never collide with
/// built-in catalog ids.
pub const CUSTOM_ID_PREFIX: &str = "custom-";

/// Default category applied when a custom entry form leaves it blank.
pub const DEFAULT_CATEGORY: &str = "Vegetable";

/// One plant reference record, built-in or user-submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub id: String,
    pub title: String,
    pub category: String,
    pub scientific_name: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    #[serde(default)]
    pub planting_seasons: Vec<String>,
    pub best_months: Option<String>,
    pub sun_requirements: Option<String>,
    pub watering: Option<String>,
    pub frost_tolerance: Option<String>,
    pub difficulty: Option<String>,
    pub plant_life: Option<String>,
    #[serde(default)]
    pub suitable_for_containers: bool,
    #[serde(default)]
    pub requires_trellis: bool,
    pub days_to_germination: Option<String>,
    pub days_to_harvest: Option<String>,
    pub sowing_depth: Option<String>,
    pub spacing: Option<String>,
    pub companion_plants: Option<String>,
    pub plant_height: Option<String>,
    #[serde(default)]
    pub drought_tolerant: bool,
    #[serde(default)]
    pub is_custom: bool,
}

/// Payload of the "add your own seed" form. Everything except the title is
/// optional; defaults are applied in [`CatalogEntry::from_form`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewCatalogEntry {
    pub title: String,
    pub category: Option<String>,
    pub scientific_name: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub planting_seasons: Vec<String>,
    pub best_months: Option<String>,
    pub sun_requirements: Option<String>,
    pub watering: Option<String>,
    pub frost_tolerance: Option<String>,
    pub difficulty: Option<String>,
    pub plant_life: Option<String>,
    pub suitable_for_containers: Option<bool>,
    pub requires_trellis: Option<bool>,
    pub days_to_germination: Option<String>,
    pub days_to_harvest: Option<String>,
    pub sowing_depth: Option<String>,
    pub spacing: Option<String>,
    pub companion_plants: Option<String>,
    pub plant_height: Option<String>,
    pub drought_tolerant: Option<bool>,
}

/// Trim a free-text form field; whitespace-only input counts as absent.
fn clean(field: Option<String>) -> Option<String> {
    field
        .map(|s| s.trim().to_owned())
        .filter(|s| !s.is_empty())
}

impl CatalogEntry {
    /// Whether an id belongs to a user-submitted entry.
    pub fn is_custom_id(id: &str) -> bool {
        id.starts_with(CUSTOM_ID_PREFIX)
    }

    /// Build a custom entry from form input, applying field-level defaults:
    /// blank category becomes [`DEFAULT_CATEGORY`], missing flags become
    /// false, text fields are trimmed with empty collapsing to `None`.
    pub fn from_form(id: String, form: NewCatalogEntry) -> Self {
        Self {
            id,
            title: form.title.trim().to_owned(),
            category: clean(form.category).unwrap_or_else(|| DEFAULT_CATEGORY.to_owned()),
            scientific_name: clean(form.scientific_name),
            description: clean(form.description),
            image_url: clean(form.image_url),
            planting_seasons: form.planting_seasons,
            best_months: clean(form.best_months),
            sun_requirements: clean(form.sun_requirements),
            watering: clean(form.watering),
            frost_tolerance: clean(form.frost_tolerance),
            difficulty: clean(form.difficulty),
            plant_life: clean(form.plant_life),
            suitable_for_containers: form.suitable_for_containers.unwrap_or(false),
            requires_trellis: form.requires_trellis.unwrap_or(false),
            days_to_germination: clean(form.days_to_germination),
            days_to_harvest: clean(form.days_to_harvest),
            sowing_depth: clean(form.sowing_depth),
            spacing: clean(form.spacing),
            companion_plants: clean(form.companion_plants),
            plant_height: clean(form.plant_height),
            drought_tolerant: form.drought_tolerant.unwrap_or(false),
            is_custom: true,
        }
    }
}

/// One logical catalog: built-in entries followed by custom entries.
///
/// Recomputed by the caller whenever the custom list changes; filtering and
/// search live in the UI layer.
pub fn merged_catalog(builtin: &[CatalogEntry], custom: &[CatalogEntry]) -> Vec<CatalogEntry> {
    let mut merged = Vec::with_capacity(builtin.len() + custom.len());
    merged.extend_from_slice(builtin);
    merged.extend_from_slice(custom);
    merged
}
