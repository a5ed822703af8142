//! Key generation for new catalog entries.

use std::collections::HashSet;

use crate::constants::FALLBACK_KEY_BASE;

/// Generates a unique slug-form key from a display label.
///
/// The label is lowercased, whitespace runs collapse to a single underscore,
/// and everything outside `[a-z0-9_]` is stripped. An empty result falls back
/// to `new_item`. If the base is taken, `_1`, `_2`, … are appended until an
/// unused key is found.
///
/// The returned key is guaranteed absent from `existing_keys` at call time;
/// the caller must register it before generating again.
#[must_use]
pub fn generate_key(label: &str, existing_keys: &HashSet<String>) -> String {
    let base: String = label
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_')
        .collect();

    let base = if base.is_empty() {
        FALLBACK_KEY_BASE.to_string()
    } else {
        base
    };

    if !existing_keys.contains(&base) {
        return base;
    }

    let mut counter = 1;
    loop {
        let candidate = format!("{base}_{counter}");
        if !existing_keys.contains(&candidate) {
            return candidate;
        }
        counter += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(items: &[&str]) -> HashSet<String> {
        items.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_slugs_label() {
        assert_eq!(generate_key("Relaxing Sounds", &HashSet::new()), "relaxing_sounds");
        assert_eq!(generate_key("  Two   Words ", &HashSet::new()), "two_words");
        assert_eq!(generate_key("Vol. 1 (Remix)!", &HashSet::new()), "vol_1_remix");
    }

    #[test]
    fn test_empty_label_falls_back() {
        assert_eq!(generate_key("", &HashSet::new()), "new_item");
        assert_eq!(generate_key("!!!", &HashSet::new()), "new_item");
    }

    #[test]
    fn test_collision_appends_counter() {
        let existing = keys(&["music", "music_1"]);
        assert_eq!(generate_key("Music", &existing), "music_2");
    }

    #[test]
    fn test_idempotent_against_own_output() {
        let label = "New Item";
        let mut existing = keys(&["new_item"]);
        let first = generate_key(label, &existing);
        existing.insert(first.clone());
        let second = generate_key(label, &existing);
        assert_ne!(first, second);
        assert!(!existing.contains(&second));
    }
}
