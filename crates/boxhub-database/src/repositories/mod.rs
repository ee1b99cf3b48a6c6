//! Repository implementations for all BoxHub entities.

pub mod item;
pub mod location;
pub mod workspace;

pub use item::ItemRepository;
pub use location::LocationRepository;
pub use workspace::WorkspaceRepository;

/// Escape LIKE wildcards in a path so labels containing underscores match
/// literally (`_` is a single-character wildcard in SQL LIKE).
pub(crate) fn escape_like(path: &str) -> String {
    path.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// LIKE pattern matching all strict descendants of `path`.
pub(crate) fn descendant_pattern(path: &str) -> String {
    format!("{}.%", escape_like(path))
}

/// LIKE pattern matching descendants two or more levels below `path`.
pub(crate) fn grandchild_pattern(path: &str) -> String {
    format!("{}.%.%", escape_like(path))
}
