//! Directory exclusion rules.
//!
//! Exclusion entries are path prefixes relative to the scan root. Matching is
//! done per path component, so `foo` excludes `foo` and `foo/bar` but never
//! `foobar`. Before matching, a single leading segment (by default
//! `ui.apps`) is stripped from the relative path so the same rules work when
//! the scan root is the package folder or its parent.

use std::path::{Component, Path, PathBuf};

/// Leading path segment stripped before matching exclusion entries.
pub const DEFAULT_STRIP_PREFIX: &str = "ui.apps";

/// Normalize a user-supplied exclusion entry into a relative path.
///
/// Backslashes are treated as separators, and `.` components as well as
/// leading or trailing separators are dropped. Returns `None` for entries
/// that normalize to an empty path, since those would match everything.
#[must_use]
pub fn normalize_entry(entry: &str) -> Option<PathBuf> {
    let normalized: PathBuf = entry
        .split(['/', '\\'])
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect();

    if normalized.as_os_str().is_empty() {
        None
    } else {
        Some(normalized)
    }
}

/// Decide whether a directory should be pruned from the traversal.
///
/// # Arguments
///
/// * `candidate` - The directory being considered
/// * `root` - The scan root `candidate` lives under
/// * `strip_prefix` - Segment removed from the front of the relative path, if present
/// * `excludes` - Normalized exclusion entries (see [`normalize_entry`])
///
/// # Returns
///
/// `true` when the stripped relative path equals an entry or lies below one.
/// Paths outside `root` and the root itself are never excluded.
#[must_use]
pub fn should_exclude(
    candidate: &Path,
    root: &Path,
    strip_prefix: Option<&str>,
    excludes: &[PathBuf],
) -> bool {
    let Ok(relative) = candidate.strip_prefix(root) else {
        return false;
    };

    let stripped = strip_prefix
        .and_then(|prefix| relative.strip_prefix(prefix).ok())
        .unwrap_or(relative);

    if stripped.components().next().is_none() {
        return false;
    }

    excludes
        .iter()
        .any(|entry| !entry.as_os_str().is_empty() && stripped.starts_with(entry))
}

/// Render a root-relative path with `/` separators under a display prefix.
///
/// `prefix` of `ui.apps` and a relative path of `apps/site/clientlibs` gives
/// `ui.apps/apps/site/clientlibs`. An empty relative path gives the prefix
/// alone.
#[must_use]
pub fn display_path(prefix: &str, relative: &Path) -> String {
    let mut segments: Vec<String> = Vec::new();
    if !prefix.is_empty() {
        segments.push(prefix.trim_end_matches(['/', '\\']).to_string());
    }

    segments.extend(relative.components().filter_map(|component| match component {
        Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
        _ => None,
    }));

    segments.join("/")
}
