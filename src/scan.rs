//! Directory scanning for images and annotation files.

use std::io;
use std::path::{Path, PathBuf};

/// Supported image extensions.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "tiff", "tif", "webp"];

/// Extensions recognized as annotation record files.
pub const ANNOTATION_EXTENSIONS: &[&str] = &["json"];

/// Check if a path has one of the given extensions (case-insensitive).
fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| extensions.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// List the files in `dir` with one of the given extensions, non-recursively.
///
/// Results are sorted by path so the ordering is deterministic and stable
/// across calls on an unchanged directory. Unreadable entries are skipped.
pub fn list_files(dir: &Path, extensions: &[&str]) -> io::Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && has_extension(path, extensions))
        .collect();

    files.sort();

    log::debug!(
        "Scanned {:?}: {} files matching {:?}",
        dir,
        files.len(),
        extensions
    );

    Ok(files)
}
