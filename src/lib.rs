//! docshot library: pagination, page rendering and image references.
//!
//! The binary in `main.rs` is a thin wrapper around [`cli::run`].

pub mod chunk;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod exec;
pub mod refs;
pub mod render;
pub mod scan;
pub mod utils;

pub use domain::{ColorCategory, Document, Page, RenderConfig, RenderedImage};
pub use error::{DocshotError, DocshotResult};
