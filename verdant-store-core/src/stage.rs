// SPDX-FileCopyrightText: 2025 Verdant contributors
// SPDX-License-Identifier: MIT

//! The growth-stage lifecycle.
//!
//! A plant moves through a fixed, totally ordered sequence of stages:
//! `planted → sprouted → growing → harvesting → done`. The pre-stage
//! "not started" is represented as `Option::<GrowthStage>::None` everywhere.
//! Transitions only ever step to the immediately adjacent stage; `done` is
//! terminal in the forward direction but can still be rolled back.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One stage in the fixed growth lifecycle of a plant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GrowthStage {
    Planted,
    Sprouted,
    Growing,
    Harvesting,
    Done,
}

/// Error returned when parsing an unknown stage name.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown growth stage: {0}")]
pub struct ParseStageError(pub String);

impl GrowthStage {
    /// All stages in lifecycle order.
    pub const ORDER: [GrowthStage; 5] = [
        GrowthStage::Planted,
        GrowthStage::Sprouted,
        GrowthStage::Growing,
        GrowthStage::Harvesting,
        GrowthStage::Done,
    ];

    /// The first stage entered from "not started".
    pub fn first() -> Self {
        GrowthStage::Planted
    }

    /// The immediately following stage, or `None` from the terminal stage.
    pub fn next(self) -> Option<Self> {
        let idx = Self::ORDER.iter().position(|s| *s == self)?;
        Self::ORDER.get(idx + 1).copied()
    }

    /// The immediately preceding stage, or `None` from the first stage
    /// (rolling back from `planted` returns the plant to "not started").
    pub fn prev(self) -> Option<Self> {
        let idx = Self::ORDER.iter().position(|s| *s == self)?;
        idx.checked_sub(1).map(|i| Self::ORDER[i])
    }

    /// Stable column text for this stage.
    pub fn as_str(self) -> &'static str {
        match self {
            GrowthStage::Planted => "planted",
            GrowthStage::Sprouted => "sprouted",
            GrowthStage::Growing => "growing",
            GrowthStage::Harvesting => "harvesting",
            GrowthStage::Done => "done",
        }
    }

    /// Human-readable label used in system journal entries.
    pub fn label(self) -> &'static str {
        match self {
            GrowthStage::Planted => "Planted",
            GrowthStage::Sprouted => "Sprouted",
            GrowthStage::Growing => "Growing",
            GrowthStage::Harvesting => "Harvesting",
            GrowthStage::Done => "Done",
        }
    }

    /// The stage reached by advancing one step from `current`.
    ///
    /// Returns `None` when no forward transition exists, i.e. the plant is
    /// already `done`.
    pub fn advance(current: Option<GrowthStage>) -> Option<GrowthStage> {
        match current {
            None => Some(GrowthStage::first()),
            Some(stage) => stage.next(),
        }
    }

    /// The stage reached by rolling back one step from `current`.
    ///
    /// The outer `None` means no backward transition exists (the plant never
    /// started); `Some(None)` means the rollback lands on "not started".
    pub fn rollback(current: Option<GrowthStage>) -> Option<Option<GrowthStage>> {
        current.map(GrowthStage::prev)
    }
}

impl fmt::Display for GrowthStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GrowthStage {
    type Err = ParseStageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "planted" => Ok(GrowthStage::Planted),
            "sprouted" => Ok(GrowthStage::Sprouted),
            "growing" => Ok(GrowthStage::Growing),
            "harvesting" => Ok(GrowthStage::Harvesting),
            "done" => Ok(GrowthStage::Done),
            other => Err(ParseStageError(other.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn test_advance_walks_full_order() {
        let mut stage = None;
        let mut visited = Vec::new();
        while let Some(next) = GrowthStage::advance(stage) {
            visited.push(next);
            stage = Some(next);
        }
        assert_eq!(visited, GrowthStage::ORDER);
        // Terminal stage: advancing again yields no transition.
        assert_eq!(GrowthStage::advance(stage), None);
    }

    #[test]
    fn test_rollback_returns_to_not_started() {
        let mut stage = Some(GrowthStage::Done);
        let mut steps = 0;
        while let Some(prev) = GrowthStage::rollback(stage) {
            stage = prev;
            steps += 1;
        }
        assert_eq!(stage, None);
        assert_eq!(steps, GrowthStage::ORDER.len());
        // Rolling back from "not started" is a no-op.
        assert_eq!(GrowthStage::rollback(None), None);
    }

    #[rstest]
    #[case(GrowthStage::Planted, None, Some(GrowthStage::Sprouted))]
    #[case(GrowthStage::Sprouted, Some(GrowthStage::Planted), Some(GrowthStage::Growing))]
    #[case(GrowthStage::Growing, Some(GrowthStage::Sprouted), Some(GrowthStage::Harvesting))]
    #[case(GrowthStage::Harvesting, Some(GrowthStage::Growing), Some(GrowthStage::Done))]
    #[case(GrowthStage::Done, Some(GrowthStage::Harvesting), None)]
    fn test_adjacency(
        #[case] stage: GrowthStage,
        #[case] prev: Option<GrowthStage>,
        #[case] next: Option<GrowthStage>,
    ) {
        assert_eq!(stage.prev(), prev);
        assert_eq!(stage.next(), next);
    }

    #[test]
    fn test_text_roundtrip() {
        for stage in GrowthStage::ORDER {
            assert_eq!(stage.as_str().parse::<GrowthStage>().unwrap(), stage);
        }
        assert!("germinated".parse::<GrowthStage>().is_err());
    }
}
