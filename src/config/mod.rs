//! Settings resolution
//!
//! Values come from, in order of precedence: command-line flags, their
//! `DOCSHOT_*` environment variables, a `docshot.toml`/`docshot.yml` file,
//! and built-in defaults.

pub mod loader;
pub mod merge;

pub use loader::load_config;
pub use merge::{merge_cli_with_config, CliOverrides};
