// SPDX-FileCopyrightText: 2025 Verdant contributors
// SPDX-License-Identifier: MIT

//! Column coercions between row shapes and domain shapes.
//!
//! The durable rows are flat: booleans stored as 0/1 integers, string arrays
//! as JSON text, enums as their stable text, absent optionals as NULL. The
//! domain shapes use native types throughout. Every rule lives here so the
//! statement code in `write`/`query` stays mechanical.

use std::str::FromStr;

use verdant_store_core::garden::EntryKind;
use verdant_store_core::stage::GrowthStage;

use crate::error::{Error, Result};

/// Encode a boolean for a 0/1 integer column.
pub(crate) fn bool_to_int(value: bool) -> i64 {
    if value { 1 } else { 0 }
}

/// Decode a 0/1 integer column; NULL reads as false.
pub(crate) fn int_to_bool(value: Option<i64>) -> bool {
    value.unwrap_or(0) != 0
}

/// Encode a string array as JSON text; empty arrays are stored as NULL.
pub(crate) fn array_to_json(column: &'static str, values: &[String]) -> Result<Option<String>> {
    if values.is_empty() {
        return Ok(None);
    }
    serde_json::to_string(values)
        .map(Some)
        .map_err(|source| Error::ColumnJson { column, source })
}

/// Decode a JSON text column back to a string array; NULL reads as empty.
pub(crate) fn json_to_array(column: &'static str, text: Option<String>) -> Result<Vec<String>> {
    match text {
        None => Ok(Vec::new()),
        Some(text) => {
            serde_json::from_str(&text).map_err(|source| Error::ColumnJson { column, source })
        }
    }
}

/// Encode an optional stage for a nullable text column.
pub(crate) fn stage_to_text(stage: Option<GrowthStage>) -> Option<&'static str> {
    stage.map(GrowthStage::as_str)
}

/// Decode a nullable stage column; unknown text is an error, not a panic.
pub(crate) fn text_to_stage(text: Option<String>) -> Result<Option<GrowthStage>> {
    match text {
        None => Ok(None),
        Some(text) => GrowthStage::from_str(&text)
            .map(Some)
            .map_err(|_| Error::ColumnValue {
                column: "stage",
                value: text,
            }),
    }
}

/// Decode the journal entry `type` column.
pub(crate) fn text_to_kind(text: &str) -> Result<EntryKind> {
    EntryKind::from_str(text).map_err(|_| Error::ColumnValue {
        column: "type",
        value: text.to_owned(),
    })
}
