//! Error taxonomy shared by the library modules.
//!
//! Command handlers wrap these in `anyhow::Error` with extra context; the
//! variants themselves stay matchable so tests and callers can tell a missing
//! directory from an empty one.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocshotError {
    /// A source file, directory or glob that should exist does not.
    #[error("input not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// An input expanded to nothing renderable (no files, or only binary files).
    #[error("no content found: {0}")]
    NoContentFound(String),

    #[error("directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("no images found in {}", .0.display())]
    NoImagesFound(PathBuf),

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("external process error: {0}")]
    ExternalProcessError(String),

    #[error("failed to encode image: {0}")]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type DocshotResult<T> = std::result::Result<T, DocshotError>;
