// SPDX-FileCopyrightText: 2025 Verdant contributors
// SPDX-License-Identifier: MIT

//! Areas, plants and journal entries.
//!
//! These are the in-memory shapes owned by the garden store: nested,
//! camelCase-on-the-wire, with native booleans and arrays. The persistence
//! layer flattens them into rows and back.
//!
//! Sibling order (areas in the garden, plants in an area, entries in a
//! journal) is carried by an explicit monotonic `seq` assigned at insertion
//! time. Calendar dates are display strings and may collide, so they are
//! never used for ordering.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::stage::GrowthStage;

/// A user-named container for plants (a planter box, a bed, a windowsill).
///
/// An area owns its plants: deleting the area deletes every plant in it and
/// their journals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Area {
    pub id: String,
    pub name: String,
    pub emoji: String,
    /// Display-formatted creation date.
    pub created_at: String,
    /// Insertion sequence; areas are listed in ascending order.
    pub seq: i64,
    pub plants: Vec<Plant>,
}

/// One tracked instance of something growing inside an area.
///
/// The `seed_*` fields are denormalized from the catalog entry at add time so
/// historical display stays stable even if the catalog entry later changes or
/// is deleted. `seed_id` is `None` for freehand plants with no catalog
/// linkage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plant {
    pub id: String,
    pub seed_id: Option<String>,
    pub seed_title: String,
    pub seed_category: String,
    pub seed_image: Option<String>,
    /// Display-formatted date the plant was added.
    pub planted_date: String,
    /// Current lifecycle stage; `None` means "not started".
    pub stage: Option<GrowthStage>,
    /// Insertion sequence within the owning area.
    pub seq: i64,
    pub journal: Vec<JournalEntry>,
}

/// A dated record attached to a plant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    pub id: String,
    /// Display-formatted date.
    pub date: String,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    /// Insertion sequence within the owning plant's journal.
    pub seq: i64,
}

/// Who wrote a journal entry.
///
/// `Stage` entries are system-generated, exactly one per forward stage
/// transition, and read-only to the user. `Note` entries are user-authored
/// and user-deletable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Stage,
    Note,
}

/// Error returned when parsing an unknown entry kind.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown journal entry kind: {0}")]
pub struct ParseEntryKindError(pub String);

impl EntryKind {
    /// Stable column text for this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            EntryKind::Stage => "stage",
            EntryKind::Note => "note",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryKind {
    type Err = ParseEntryKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stage" => Ok(EntryKind::Stage),
            "note" => Ok(EntryKind::Note),
            other => Err(ParseEntryKindError(other.to_owned())),
        }
    }
}

impl Area {
    /// Find a plant in this area by id.
    pub fn plant(&self, plant_id: &str) -> Option<&Plant> {
        self.plants.iter().find(|p| p.id == plant_id)
    }

    /// Find a plant in this area by id, mutably.
    pub fn plant_mut(&mut self, plant_id: &str) -> Option<&mut Plant> {
        self.plants.iter_mut().find(|p| p.id == plant_id)
    }
}

impl Plant {
    /// Count of system-generated stage entries in this plant's journal.
    ///
    /// Always equals the number of net forward stage transitions currently
    /// reflected in `stage`.
    pub fn stage_entry_count(&self) -> usize {
        self.journal
            .iter()
            .filter(|e| e.kind == EntryKind::Stage)
            .count()
    }

    /// The most recently added stage entry, by insertion order.
    pub fn last_stage_entry(&self) -> Option<&JournalEntry> {
        self.journal
            .iter()
            .filter(|e| e.kind == EntryKind::Stage)
            .max_by_key(|e| e.seq)
    }
}

/// Total number of plants across all areas, recomputed from current state.
pub fn total_plant_count(areas: &[Area]) -> usize {
    areas.iter().map(|a| a.plants.len()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, kind: EntryKind, seq: i64) -> JournalEntry {
        JournalEntry {
            id: id.into(),
            date: "1 Mar 2025".into(),
            text: "text".into(),
            kind,
            seq,
        }
    }

    fn plant(id: &str, journal: Vec<JournalEntry>) -> Plant {
        Plant {
            id: id.into(),
            seed_id: None,
            seed_title: "Lettuce".into(),
            seed_category: "Vegetable".into(),
            seed_image: None,
            planted_date: "1 Mar 2025".into(),
            stage: None,
            seq: 0,
            journal,
        }
    }

    #[test]
    fn test_total_plant_count() {
        let areas = vec![
            Area {
                id: "a1".into(),
                name: "Bed".into(),
                emoji: "🪴".into(),
                created_at: "1 Mar 2025".into(),
                seq: 0,
                plants: vec![plant("p1", vec![]), plant("p2", vec![])],
            },
            Area {
                id: "a2".into(),
                name: "Box".into(),
                emoji: "🪴".into(),
                created_at: "1 Mar 2025".into(),
                seq: 1,
                plants: vec![plant("p3", vec![])],
            },
        ];
        assert_eq!(total_plant_count(&areas), 3);
        assert_eq!(total_plant_count(&[]), 0);
    }

    #[test]
    fn test_last_stage_entry_is_by_insertion_order() {
        // Same calendar date on every entry: only seq decides recency.
        let p = plant(
            "p1",
            vec![
                entry("e1", EntryKind::Stage, 0),
                entry("e2", EntryKind::Note, 1),
                entry("e3", EntryKind::Stage, 2),
                entry("e4", EntryKind::Note, 3),
            ],
        );
        assert_eq!(p.stage_entry_count(), 2);
        assert_eq!(p.last_stage_entry().map(|e| e.id.as_str()), Some("e3"));
    }

    #[test]
    fn test_entry_kind_text_roundtrip() {
        assert_eq!("stage".parse::<EntryKind>().unwrap(), EntryKind::Stage);
        assert_eq!("note".parse::<EntryKind>().unwrap(), EntryKind::Note);
        assert!("reminder".parse::<EntryKind>().is_err());
    }
}
