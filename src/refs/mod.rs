//! Image reference building for the chat hand-off.
//!
//! A reference string is the space-joined list of `@`-prefixed image paths,
//! relative to the working directory, e.g.
//! `@docshot/page_001.png @docshot/page_002.png`.

use crate::domain::REFERENCE_MARKER;
use crate::error::{DocshotError, DocshotResult};
use crate::utils::{display_path, relative_to};
use std::fs;
use std::path::{Path, PathBuf};

/// Validate `dir` and list its `.png` files (case-insensitive), sorted by name.
///
/// Only immediate children are considered. Returned paths are absolute.
pub fn collect_images(dir: &Path) -> DocshotResult<Vec<PathBuf>> {
    if !dir.exists() {
        return Err(DocshotError::DirectoryNotFound(dir.to_path_buf()));
    }
    if !dir.is_dir() {
        return Err(DocshotError::NotADirectory(dir.to_path_buf()));
    }

    let root = dir.canonicalize()?;
    let mut images: Vec<(String, PathBuf)> = Vec::new();
    for entry in fs::read_dir(&root)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.to_ascii_lowercase().ends_with(".png") {
            images.push((name, path));
        }
    }

    if images.is_empty() {
        return Err(DocshotError::NoImagesFound(dir.to_path_buf()));
    }

    images.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(images.into_iter().map(|(_, path)| path).collect())
}

/// Format absolute `images` as reference tokens relative to `base`.
pub fn format_references(images: &[PathBuf], base: &Path) -> String {
    images
        .iter()
        .map(|path| format!("{}{}", REFERENCE_MARKER, display_path(&relative_to(path, base))))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Build the reference string for `dir` relative to `base`.
pub fn build_references_from(dir: &Path, base: &Path) -> DocshotResult<String> {
    let images = collect_images(dir)?;
    let base = base.canonicalize()?;
    tracing::debug!("found {} image(s) in {}", images.len(), dir.display());
    Ok(format_references(&images, &base))
}

/// Build the reference string for `dir` relative to the working directory.
pub fn build_references(dir: &Path) -> DocshotResult<String> {
    let cwd = std::env::current_dir()?;
    build_references_from(dir, &cwd)
}
