//! Materialized-path segment algebra.
//!
//! Paths are strings of fixed-width base-36 segments, one segment per
//! ancestry level. Segment values start at 1, so the first slot under any
//! parent is `"0001"`. Because segments are fixed-width and drawn from a
//! sorted alphabet, lexicographic path order equals traversal order and a
//! prefix match selects an entire subtree.

use docindex_core::{AppError, AppResult};

/// Characters per path segment.
pub const STEPLEN: usize = 4;

/// Segment alphabet, sorted ascending.
pub const ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Largest value a single segment can hold (36^4 - 1).
pub const MAX_SEGMENT: u32 = 1_679_615;

/// Encode a segment value as a fixed-width base-36 string.
///
/// Values start at 1; 0 is reserved so that every encoded segment sorts
/// after the bare parent prefix.
pub fn encode_segment(value: u32) -> AppResult<String> {
    if value == 0 || value > MAX_SEGMENT {
        return Err(AppError::internal(format!(
            "Path segment value {value} out of range"
        )));
    }
    let base = ALPHABET.len() as u32;
    let mut chars = [b'0'; STEPLEN];
    let mut rest = value;
    for slot in chars.iter_mut().rev() {
        *slot = ALPHABET[(rest % base) as usize];
        rest /= base;
    }
    if rest != 0 {
        return Err(AppError::internal(format!(
            "Path segment value {value} does not fit in {STEPLEN} characters"
        )));
    }
    // chars is built from ALPHABET, always valid UTF-8
    Ok(String::from_utf8_lossy(&chars).into_owned())
}

/// Decode a fixed-width base-36 segment back to its value.
pub fn decode_segment(segment: &str) -> AppResult<u32> {
    if segment.len() != STEPLEN {
        return Err(AppError::internal(format!(
            "Malformed path segment '{segment}'"
        )));
    }
    let mut value: u32 = 0;
    for byte in segment.bytes() {
        let digit = ALPHABET
            .iter()
            .position(|c| *c == byte)
            .ok_or_else(|| AppError::internal(format!("Malformed path segment '{segment}'")))?;
        value = value * ALPHABET.len() as u32 + digit as u32;
    }
    Ok(value)
}

/// Depth encoded by a path (roots at 1).
pub fn depth_of(path: &str) -> i64 {
    (path.len() / STEPLEN) as i64
}

/// Whether the path denotes a root node.
pub fn is_root(path: &str) -> bool {
    path.len() == STEPLEN
}

/// The parent's path, or `None` for a root.
pub fn parent_path(path: &str) -> Option<&str> {
    if path.len() > STEPLEN {
        Some(&path[..path.len() - STEPLEN])
    } else {
        None
    }
}

/// The final segment of a path.
pub fn last_segment(path: &str) -> &str {
    &path[path.len().saturating_sub(STEPLEN)..]
}

/// The path occupying the next sibling slot after `path`.
pub fn next_sibling(path: &str) -> AppResult<String> {
    let prefix = parent_path(path).unwrap_or("");
    let segment = encode_segment(decode_segment(last_segment(path))? + 1)?;
    Ok(format!("{prefix}{segment}"))
}

/// The first child slot under `parent` (empty string for root level).
pub fn first_child(parent: &str) -> AppResult<String> {
    Ok(format!("{parent}{}", encode_segment(1)?))
}

/// Whether `ancestor` is a strict ancestor path of `descendant`.
pub fn is_ancestor(ancestor: &str, descendant: &str) -> bool {
    descendant.len() > ancestor.len() && descendant.starts_with(ancestor)
}
