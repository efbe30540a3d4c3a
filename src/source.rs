// src/source.rs

//! Image discovery.
//!
//! Walks a directory (one level deep unless `recursive`) and returns the
//! paths of files whose extension matches a raster format the decoder is
//! built with. Ordering is deterministic: entries are visited in file-name
//! order, so two runs over the same tree render the same grid.

use anyhow::{Context, Result};
use log::debug;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Extensions accepted by discovery, matching the decoder's enabled
/// formats. Compared ASCII-case-insensitively.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "webp"];

/// One image in display order. The record list is immutable for the
/// duration of a session; `index` is the 0-based position used for both
/// grid placement and navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRecord {
    pub path: PathBuf,
    pub index: usize,
}

impl ImageRecord {
    /// Assigns display indices to an already-ordered, already-truncated
    /// list of paths.
    pub fn from_paths(paths: Vec<PathBuf>) -> Vec<ImageRecord> {
        paths
            .into_iter()
            .enumerate()
            .map(|(index, path)| ImageRecord { path, index })
            .collect()
    }
}

/// Returns the supported image files under `root`, in file-name order.
/// Non-recursive mode scans only the directory itself. Any I/O error while
/// walking is fatal to discovery.
pub fn discover(root: &Path, recursive: bool) -> Result<Vec<PathBuf>> {
    let max_depth = if recursive { usize::MAX } else { 1 };
    let mut paths = Vec::new();

    for entry in WalkDir::new(root)
        .max_depth(max_depth)
        .sort_by_file_name()
    {
        let entry = entry.with_context(|| format!("failed to scan {}", root.display()))?;
        if entry.file_type().is_file() && has_supported_extension(entry.path()) {
            paths.push(entry.into_path());
        }
    }

    debug!(
        "discovered {} image(s) under {} (recursive: {})",
        paths.len(),
        root.display(),
        recursive
    );
    Ok(paths)
}

fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .map(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| ext.eq_ignore_ascii_case(supported))
        })
        .unwrap_or(false)
}
