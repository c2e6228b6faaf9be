//! Tag-name similarity for competition
//!
//! A cheap heuristic, not edit distance: normalization, substring
//! containment, then character-overlap ratio for near-equal lengths. Good
//! enough to absorb typos and casing variants of an existing concept
//! without a dependency on a string-metrics crate.

use crate::constants::{SIMILARITY_MAX_LEN_DIFF, SIMILARITY_OVERLAP_THRESHOLD};

/// Normalize a tag name for comparison: lowercase, alphanumerics only.
pub fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(|c| c.to_lowercase())
        .collect()
}

/// Whether two tag names refer to the same concept.
///
/// Rules, in order:
/// 1. equal after normalization;
/// 2. one normalized name contains the other;
/// 3. lengths within 2 of each other and more than 70% of the shorter
///    name's characters appear somewhere in the longer one.
pub fn names_similar(a: &str, b: &str) -> bool {
    let a = normalize(a);
    let b = normalize(b);

    if a.is_empty() || b.is_empty() {
        return false;
    }

    if a == b {
        return true;
    }

    if a.contains(&b) || b.contains(&a) {
        return true;
    }

    if a.len().abs_diff(b.len()) > SIMILARITY_MAX_LEN_DIFF {
        return false;
    }

    let (shorter, longer) = if a.len() <= b.len() { (&a, &b) } else { (&b, &a) };
    let overlap = shorter.chars().filter(|c| longer.contains(*c)).count();
    let ratio = overlap as f32 / shorter.len() as f32;

    ratio > SIMILARITY_OVERLAP_THRESHOLD
}
