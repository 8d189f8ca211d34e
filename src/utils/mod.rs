//! Shared helpers: text decoding, line classification, path handling.

pub mod classify;
pub mod encoding;
pub mod paths;

pub use classify::classify_line;
pub use encoding::{decode_bytes, is_binary_file, read_text_file};
pub use paths::{display_path, normalize_path, relative_to};
