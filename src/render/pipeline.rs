//! Document-to-directory rendering loop.

use super::font::FontFace;
use super::naming::is_page_file_name;
use super::page::PageRenderer;
use super::theme::Theme;
use crate::chunk::paginate;
use crate::domain::{Document, RenderConfig};
use crate::error::DocshotResult;
use std::fs;
use std::path::{Path, PathBuf};

/// Progress notifications emitted while a document is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderEvent<'a> {
    Started { total_pages: usize },
    PageWritten { index: usize, total_pages: usize, path: &'a Path },
    Finished { total_pages: usize },
}

/// Receives [`RenderEvent`]s. Implemented for any `FnMut(RenderEvent)`.
pub trait RenderObserver {
    fn on_event(&mut self, event: RenderEvent<'_>);
}

impl<F> RenderObserver for F
where
    F: FnMut(RenderEvent<'_>),
{
    fn on_event(&mut self, event: RenderEvent<'_>) {
        self(event)
    }
}

/// Observer that ignores every event.
pub struct SilentObserver;

impl RenderObserver for SilentObserver {
    fn on_event(&mut self, _event: RenderEvent<'_>) {}
}

/// Result of rendering one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOutcome {
    pub output_dir: PathBuf,
    /// Written page files, in page order.
    pub pages: Vec<PathBuf>,
    pub line_count: usize,
}

/// Renders whole documents into a directory of page images.
pub struct DocumentRenderer<'a> {
    config: RenderConfig,
    theme: Theme,
    font: &'a FontFace,
}

impl<'a> DocumentRenderer<'a> {
    pub fn new(config: RenderConfig, theme: Theme, font: &'a FontFace) -> Self {
        Self { config, theme, font }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Paginate `document`, render each page and write it to `output_dir`.
    ///
    /// Pages are rendered and written one at a time; only one canvas is
    /// alive at any point. Page files left over from an earlier run in the
    /// same directory are removed first.
    pub fn render_to_dir(
        &self,
        document: &Document,
        title: &str,
        output_dir: &Path,
        observer: &mut dyn RenderObserver,
    ) -> DocshotResult<RenderOutcome> {
        fs::create_dir_all(output_dir)?;
        let removed = remove_page_files(output_dir)?;
        if removed > 0 {
            tracing::debug!("removed {} stale page(s) from {}", removed, output_dir.display());
        }

        let pages = paginate(document, &self.config);
        let total_pages = pages.len();
        let renderer = PageRenderer::new(self.config, self.theme, self.font, title);
        observer.on_event(RenderEvent::Started { total_pages });

        let mut written = Vec::with_capacity(total_pages);
        for page in &pages {
            let image = renderer.render(page, total_pages)?;
            let path = output_dir.join(&image.file_name);
            write_atomic(&path, &image.bytes)?;
            tracing::debug!(
                "wrote {} (lines {}-{})",
                path.display(),
                page.start_line,
                page.start_line + page.lines.len().saturating_sub(1)
            );
            observer.on_event(RenderEvent::PageWritten { index: page.index, total_pages, path: &path });
            written.push(path);
        }

        observer.on_event(RenderEvent::Finished { total_pages });
        Ok(RenderOutcome {
            output_dir: output_dir.to_path_buf(),
            pages: written,
            line_count: document.len(),
        })
    }
}

/// Write through a hidden temporary sibling and rename into place, so a
/// page file is either absent or complete.
fn write_atomic(path: &Path, bytes: &[u8]) -> DocshotResult<()> {
    let file_name = path.file_name().and_then(|n| n.to_str()).unwrap_or("page.png");
    let tmp = path.with_file_name(format!(".{file_name}.tmp"));
    fs::write(&tmp, bytes)?;
    if let Err(err) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(err.into());
    }
    Ok(())
}

/// Delete every `page_NNN.png` directly inside `dir`. Returns how many were removed.
pub fn remove_page_files(dir: &Path) -> DocshotResult<usize> {
    let mut removed = 0;
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        if is_page_file_name(name) && entry.file_type()?.is_file() {
            fs::remove_file(entry.path())?;
            removed += 1;
        }
    }
    Ok(removed)
}
