//! Fixed-size line chunking.

use crate::domain::{Document, Page};
use std::num::NonZeroUsize;

pub struct LineChunker {
    lines_per_page: NonZeroUsize,
}

impl LineChunker {
    pub fn new(lines_per_page: NonZeroUsize) -> Self {
        Self { lines_per_page }
    }

    /// Split `document` into consecutive pages of `lines_per_page` lines.
    ///
    /// Only the last page may be short. An empty document yields a single
    /// empty page so that every input still produces one image.
    pub fn chunk<'a>(&self, document: &'a Document) -> Vec<Page<'a>> {
        let lines = document.lines();
        if lines.is_empty() {
            return vec![Page { index: 0, start_line: 1, lines }];
        }

        let size = self.lines_per_page.get();
        lines
            .chunks(size)
            .enumerate()
            .map(|(index, slice)| Page { index, start_line: index * size + 1, lines: slice })
            .collect()
    }

    /// Number of pages `chunk` will produce for a document of `line_count` lines.
    pub fn page_count(&self, line_count: usize) -> usize {
        line_count.div_ceil(self.lines_per_page.get()).max(1)
    }
}
