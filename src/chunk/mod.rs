//! Document pagination

use crate::domain::{Document, Page, RenderConfig};

pub mod line_chunker;

pub use line_chunker::LineChunker;

/// Paginate a document with the page size from `config`.
pub fn paginate<'a>(document: &'a Document, config: &RenderConfig) -> Vec<Page<'a>> {
    LineChunker::new(config.lines_per_page()).chunk(document)
}
