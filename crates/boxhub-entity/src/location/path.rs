//! Materialized-path arithmetic for the location hierarchy.
//!
//! A location's position in the tree is encoded as a dot-separated path of
//! normalized labels, anchored at [`PATH_ANCHOR`]: `root.basement.shelf_a`.
//! Ancestry is plain string prefixing, so descendant lookups are prefix
//! queries and renames are prefix rewrites. Everything in this module is
//! pure; the persistence-aware orchestration lives in `boxhub-service`.

/// The synthetic top-of-tree segment prefixing every path.
pub const PATH_ANCHOR: &str = "root";

/// Separator between path segments.
pub const PATH_SEPARATOR: char = '.';

/// Maximum number of segments in a path, anchor included.
///
/// The anchor plus five levels of nesting. Creation of anything deeper is
/// rejected before it reaches the store.
pub const MAX_PATH_DEPTH: usize = 6;

/// Normalize a display name into a path label.
///
/// Transliterates to ASCII, lowercases, replaces every maximal run of
/// characters outside `[a-z0-9_]` with a single underscore, and trims
/// leading/trailing underscores. The result is empty when the input has no
/// usable characters; callers must reject an empty label before building a
/// path with it.
///
/// Normalization is idempotent: feeding the output back in returns it
/// unchanged.
pub fn normalize_label(raw: &str) -> String {
    let ascii = deunicode::deunicode(raw).to_ascii_lowercase();

    let mut label = String::with_capacity(ascii.len());
    for ch in ascii.chars() {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            label.push(ch);
        } else if !label.is_empty() && !label.ends_with('_') {
            label.push('_');
        }
    }
    if label.ends_with('_') {
        label.pop();
    }
    label
}

/// Build a child path from an optional parent path and a normalized label.
///
/// With no parent the child hangs off the anchor. The label is used as-is;
/// charset and non-emptiness are the caller's responsibility.
pub fn build_path(parent_path: Option<&str>, label: &str) -> String {
    match parent_path {
        Some(parent) => format!("{parent}{PATH_SEPARATOR}{label}"),
        None => format!("{PATH_ANCHOR}{PATH_SEPARATOR}{label}"),
    }
}

/// Number of segments in a path, anchor included.
pub fn depth(path: &str) -> usize {
    path.split(PATH_SEPARATOR).count()
}

/// All segments except the last, joined by the separator.
///
/// Returns the empty string for a single-segment path (no parent).
pub fn parent_path(path: &str) -> &str {
    path.rsplit_once(PATH_SEPARATOR)
        .map_or("", |(parent, _)| parent)
}

/// Recompute a path's final segment from a new display name, preserving
/// ancestry.
///
/// A single-segment path (legacy, no anchor prefix) renames to the bare
/// label. The caller must have verified that the name normalizes to a
/// non-empty label.
pub fn regenerate_path(old_path: &str, new_display_name: &str) -> String {
    let label = normalize_label(new_display_name);
    match parent_path(old_path) {
        "" => label,
        parent => build_path(Some(parent), &label),
    }
}

/// Whether `path` is a strict descendant of `ancestor`.
pub fn is_descendant(path: &str, ancestor: &str) -> bool {
    path.len() > ancestor.len()
        && path.starts_with(ancestor)
        && path[ancestor.len()..].starts_with(PATH_SEPARATOR)
}

/// Rewrite a descendant path after its ancestor moved from `old_prefix` to
/// `new_prefix`, leaving the remainder untouched.
pub fn rewrite_prefix(path: &str, old_prefix: &str, new_prefix: &str) -> String {
    debug_assert!(is_descendant(path, old_prefix));
    format!("{new_prefix}{}", &path[old_prefix.len()..])
}
