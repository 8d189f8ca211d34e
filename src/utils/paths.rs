//! Path normalization

use std::path::{Component, Path, PathBuf};

pub fn normalize_path(path: &str) -> String {
    // Convert backslashes to forward slashes and normalize
    path.replace('\\', "/")
}

/// Express `path` relative to `base`, walking up with `..` where needed.
///
/// Both paths should be absolute (ideally canonical). When they share no
/// common root, as with different Windows drives, `path` is returned as is.
pub fn relative_to(path: &Path, base: &Path) -> PathBuf {
    let path_parts: Vec<Component> = path.components().collect();
    let base_parts: Vec<Component> = base.components().collect();

    let common = path_parts.iter().zip(&base_parts).take_while(|(a, b)| a == b).count();
    if common == 0 {
        return path.to_path_buf();
    }

    let mut relative = PathBuf::new();
    for _ in common..base_parts.len() {
        relative.push("..");
    }
    for part in &path_parts[common..] {
        relative.push(part.as_os_str());
    }
    relative
}

/// Display form of a path used in references: forward slashes, `.` for empty.
pub fn display_path(path: &Path) -> String {
    let text = normalize_path(&path.to_string_lossy());
    if text.is_empty() {
        ".".to_string()
    } else {
        text
    }
}
