// SPDX-FileCopyrightText: 2025 Verdant contributors
// SPDX-License-Identifier: MIT

//! Id and display-date generation.

use verdant_store_core::catalog::CUSTOM_ID_PREFIX;

/// A fresh random id: 16 hex characters.
pub(crate) fn new_id() -> String {
    let mut bytes = [0u8; 8];
    getrandom::fill(&mut bytes).expect("system RNG unavailable");
    hex::encode(bytes)
}

/// A fresh id for a user-submitted catalog entry, prefixed so it can never
/// collide with built-in catalog ids.
pub(crate) fn new_custom_id() -> String {
    format!("{CUSTOM_ID_PREFIX}{}", new_id())
}

/// Today's date as the display string used throughout the journal,
/// e.g. "6 Aug 2026".
pub(crate) fn today() -> String {
    chrono::Local::now().format("%-d %b %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique_and_prefixed() {
        let a = new_id();
        let b = new_id();
        assert_eq!(a.len(), 16);
        assert_ne!(a, b);

        let custom = new_custom_id();
        assert!(custom.starts_with(CUSTOM_ID_PREFIX));
    }

    #[test]
    fn test_today_is_display_formatted() {
        let date = today();
        // "6 Aug 2026" shape: day without padding, month name, year.
        let parts: Vec<&str> = date.split(' ').collect();
        assert_eq!(parts.len(), 3);
        assert!(parts[0].parse::<u32>().is_ok());
        assert!(!parts[0].starts_with('0'));
        assert_eq!(parts[2].len(), 4);
    }
}
