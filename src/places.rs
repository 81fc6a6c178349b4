//! Place normalization.
//!
//! Raw place strings may encode a hierarchy with `/` separators, e.g.
//! `Region / District / City`. Cleaning reduces each to one display-level
//! location.

/// Sentinel for a place string with no usable segments. Excluded from the
/// location aggregate but kept in a report's `places_clean`.
pub const UNKNOWN_PLACE: &str = "Unknown";

/// Reduce a raw hierarchical place string to its display-level location.
///
/// Segments are split on `/`, trimmed, and empty ones dropped. With one or
/// two surviving segments the first is taken; with three or more, the
/// third-from-last. The third-from-last rule is load-bearing for every
/// location aggregate downstream; changing it would silently reshuffle the
/// location view.
pub fn clean_place(raw: &str) -> String {
    let segments: Vec<&str> = raw
        .split('/')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    match segments.len() {
        0 => UNKNOWN_PLACE.to_string(),
        1 | 2 => segments[0].to_string(),
        n => segments[n - 3].to_string(),
    }
}
