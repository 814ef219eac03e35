use crate::error::Result;
use log::{debug, warn};
use std::cmp::Reverse;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Directories never descended into
pub const AVOID_DIRS: &[&str] = &[".git", ".idea", "venv", "__pycache__"];

/// Files whose path below the scanned directory contains this are earlier reports
pub const SELF_OUTPUT_TAG: &str = "tagdump";

/// Collects dump files under a directory, recursively
///
/// Files match when their extension equals `ext` (case-insensitive, with
/// or without a leading dot). Deeper files come first, then paths in
/// lexicographic order.
///
/// # Errors
///
/// Returns an error if `directory` is not a readable directory. Errors on
/// individual entries are logged and skipped.
pub fn collect_dump_files(directory: &Path, ext: &str) -> Result<Vec<PathBuf>> {
    if !directory.is_dir() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("{} is not a directory", directory.display()),
        )
        .into());
    }

    let ext = ext.trim_start_matches('.');
    let mut files: Vec<(usize, PathBuf)> = Vec::new();

    let walker = WalkDir::new(directory)
        .into_iter()
        .filter_entry(|entry| !is_avoided_dir(entry));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Error walking directory: {}", e);
                continue;
            }
        };

        let path = entry.path();
        if !entry.file_type().is_file() || !has_extension(path, ext) {
            continue;
        }
        let relative = path.strip_prefix(directory).unwrap_or(path);
        if relative.to_string_lossy().contains(SELF_OUTPUT_TAG) {
            debug!("Skipping previous output: {}", path.display());
            continue;
        }
        files.push((entry.depth(), entry.into_path()));
    }

    files.sort_by(|(a_depth, a_path), (b_depth, b_path)| {
        (Reverse(a_depth), a_path).cmp(&(Reverse(b_depth), b_path))
    });

    Ok(files.into_iter().map(|(_, path)| path).collect())
}

fn is_avoided_dir(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .map(|name| AVOID_DIRS.contains(&name))
            .unwrap_or(false)
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .map(|e| e.eq_ignore_ascii_case(ext))
        .unwrap_or(false)
}
