//! Single-page rasterization.

use super::font::FontFace;
use super::naming::page_file_name;
use super::theme::Theme;
use crate::domain::{Page, RenderConfig, RenderedImage, PADDING};
use crate::error::DocshotResult;
use crate::utils::classify_line;
use image::{DynamicImage, ImageFormat, RgbImage};
use std::io::Cursor;

/// Width of the right-aligned line-number column, in characters.
const LINE_NUMBER_WIDTH: usize = 5;

/// Draws pages of one document with fixed settings.
pub struct PageRenderer<'a> {
    config: RenderConfig,
    theme: Theme,
    font: &'a FontFace,
    title: String,
}

impl<'a> PageRenderer<'a> {
    pub fn new(config: RenderConfig, theme: Theme, font: &'a FontFace, title: impl Into<String>) -> Self {
        Self { config, theme, font, title: title.into() }
    }

    /// Rasterize `page` and encode it as PNG.
    pub fn render(&self, page: &Page<'_>, total_pages: usize) -> DocshotResult<RenderedImage> {
        let canvas = self.draw(page, total_pages);
        let bytes = encode_png(canvas)?;
        Ok(RenderedImage { file_name: page_file_name(page.index), bytes })
    }

    /// Lay out header, gutter and text on a fresh canvas.
    pub fn draw(&self, page: &Page<'_>, total_pages: usize) -> RgbImage {
        let size = self.config.font_size();
        let line_height = self.config.line_height();
        let mut canvas = RgbImage::from_pixel(
            self.config.image_width(),
            self.config.canvas_height(),
            self.theme.background,
        );

        let header = header_text(&self.title, page.index, total_pages);
        self.font.draw(&mut canvas, &header, PADDING, PADDING, size, self.theme.muted);

        let mut y = PADDING + 2.0 * line_height;
        for (number, line) in page.numbered_lines() {
            let prefix = line_prefix(number);
            self.font.draw(&mut canvas, &prefix, PADDING, y, size, self.theme.muted);

            let text_x = PADDING + self.font.measure(&prefix, size);
            let color = self.theme.color_for(classify_line(line));
            self.font.draw(&mut canvas, line, text_x, y, size, color);

            y += line_height;
        }

        canvas
    }
}

/// `"<title> - Page <n>/<total>"` with a 1-based page number.
pub fn header_text(title: &str, index: usize, total_pages: usize) -> String {
    format!("{} - Page {}/{}", title, index + 1, total_pages)
}

/// Gutter text for a line: right-aligned number followed by an arrow.
pub fn line_prefix(number: usize) -> String {
    format!("{:>width$} → ", number, width = LINE_NUMBER_WIDTH)
}

fn encode_png(canvas: RgbImage) -> DocshotResult<Vec<u8>> {
    let mut bytes = Vec::new();
    DynamicImage::ImageRgb8(canvas).write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}
