//! Base-name correlation between image files and annotation files.
//!
//! Images and their annotation records live in different directories with
//! different extensions; the file name with directory and extension stripped
//! is the key that ties them together.

use std::collections::HashSet;
use std::path::Path;

/// Extract the base name of a path: file name without directory or extension.
///
/// Only the final extension is stripped, so `scan.tar.gz` yields `scan.tar`.
/// Paths without a file name component yield an empty string.
pub fn base_name(path: &Path) -> String {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .map(String::from)
        .unwrap_or_default()
}

/// Return the subset of `names` that also occurs in `against`, preserving
/// the relative order of `names`.
///
/// Used to prune the annotation index down to entries that have a matching
/// image. Duplicates in `names` are kept if they match.
pub fn matching(names: &[String], against: &[String]) -> Vec<String> {
    let lookup: HashSet<&str> = against.iter().map(String::as_str).collect();
    names
        .iter()
        .filter(|name| lookup.contains(name.as_str()))
        .cloned()
        .collect()
}
