//! Monospace font loading, measurement and drawing.

use crate::error::{DocshotError, DocshotResult};
use ab_glyph::{Font, FontVec, PxScale, ScaleFont};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_text_mut};
use imageproc::rect::Rect;
use std::path::{Path, PathBuf};

/// Well-known locations of monospace fonts, tried in order.
const SYSTEM_MONOSPACE_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSansMono.ttf",
    "/usr/share/fonts/TTF/DejaVuSansMono.ttf",
    "/usr/share/fonts/dejavu/DejaVuSansMono.ttf",
    "/usr/share/fonts/dejavu-sans-mono-fonts/DejaVuSansMono.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationMono-Regular.ttf",
    "/usr/share/fonts/liberation-mono/LiberationMono-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSansMono-Regular.ttf",
    "/usr/share/fonts/noto/NotoSansMono-Regular.ttf",
    "/System/Library/Fonts/Menlo.ttc",
    "/System/Library/Fonts/Monaco.ttf",
    "/Library/Fonts/Courier New.ttf",
    "C:\\Windows\\Fonts\\consola.ttf",
    "C:\\Windows\\Fonts\\cour.ttf",
];

/// Advance of a placeholder cell, as a fraction of the font size.
const PLACEHOLDER_ADVANCE: f32 = 0.6;

/// Tab stops used when drawing source text.
const TAB_WIDTH: usize = 4;

/// Glyph source for the page renderer.
///
/// When no font file can be loaded, text is drawn as solid cells on a fixed
/// monospace grid so the layout stays intact.
pub enum FontFace {
    Glyphs { font: FontVec, source: PathBuf },
    Placeholder,
}

impl FontFace {
    /// Load a TrueType/OpenType font (the first face of a collection).
    pub fn load(path: &Path) -> DocshotResult<Self> {
        let data = std::fs::read(path).map_err(|err| {
            DocshotError::InvalidConfiguration(format!(
                "cannot read font {}: {err}",
                path.display()
            ))
        })?;
        let font = FontVec::try_from_vec_and_index(data, 0).map_err(|_| {
            DocshotError::InvalidConfiguration(format!("invalid font file: {}", path.display()))
        })?;
        Ok(Self::Glyphs { font, source: path.to_path_buf() })
    }

    /// Load `explicit` if given (failing loudly), otherwise the first usable
    /// system monospace font, otherwise the placeholder face.
    pub fn discover(explicit: Option<&Path>) -> DocshotResult<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        for candidate in SYSTEM_MONOSPACE_FONTS {
            let path = Path::new(candidate);
            if !path.is_file() {
                continue;
            }
            match Self::load(path) {
                Ok(face) => {
                    tracing::debug!("using font {}", path.display());
                    return Ok(face);
                }
                Err(err) => tracing::debug!("skipping font {}: {}", path.display(), err),
            }
        }

        tracing::warn!("no monospace font found; drawing text as placeholder cells (use --font)");
        Ok(Self::Placeholder)
    }

    pub fn source(&self) -> Option<&Path> {
        match self {
            Self::Glyphs { source, .. } => Some(source),
            Self::Placeholder => None,
        }
    }

    /// Horizontal advance of `text` in pixels at `size`.
    pub fn measure(&self, text: &str, size: f32) -> f32 {
        let text = expand_tabs(text);
        match self {
            Self::Glyphs { font, .. } => {
                let scaled = font.as_scaled(em_scale(font, size));
                let mut width = 0.0;
                let mut previous = None;
                for c in text.chars() {
                    let id = scaled.glyph_id(c);
                    if let Some(prev) = previous {
                        width += scaled.kern(prev, id);
                    }
                    width += scaled.h_advance(id);
                    previous = Some(id);
                }
                width
            }
            Self::Placeholder => text.chars().count() as f32 * size * PLACEHOLDER_ADVANCE,
        }
    }

    /// Draw `text` with its top-left corner at `(x, y)`. Pixels past the
    /// canvas edge are dropped.
    pub fn draw(&self, canvas: &mut RgbImage, text: &str, x: f32, y: f32, size: f32, color: Rgb<u8>) {
        let text = expand_tabs(text);
        match self {
            Self::Glyphs { font, .. } => {
                let scale = em_scale(font, size);
                draw_text_mut(canvas, color, x.round() as i32, y.round() as i32, scale, font, &text);
            }
            Self::Placeholder => draw_placeholder(canvas, &text, x, y, size, color),
        }
    }
}

/// Scale so that one em equals `size` pixels, matching CSS pixel font sizes.
fn em_scale(font: &FontVec, size: f32) -> PxScale {
    font.pt_to_px_scale(size * 0.75).unwrap_or_else(|| PxScale::from(size))
}

fn draw_placeholder(canvas: &mut RgbImage, text: &str, x: f32, y: f32, size: f32, color: Rgb<u8>) {
    let advance = size * PLACEHOLDER_ADVANCE;
    let cell_width = ((advance * 0.8).round() as u32).max(1);
    let cell_height = ((size * 0.8).round() as u32).max(1);
    let canvas_width = canvas.width() as f32;

    for (i, c) in text.chars().enumerate() {
        let left = x + i as f32 * advance;
        if left >= canvas_width {
            break;
        }
        if c.is_whitespace() {
            continue;
        }
        let rect = Rect::at((left + advance * 0.1).round() as i32, (y + size * 0.15).round() as i32)
            .of_size(cell_width, cell_height);
        draw_filled_rect_mut(canvas, rect, color);
    }
}

fn expand_tabs(text: &str) -> std::borrow::Cow<'_, str> {
    if !text.contains('\t') {
        return std::borrow::Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len() + TAB_WIDTH);
    let mut column = 0;
    for c in text.chars() {
        if c == '\t' {
            let fill = TAB_WIDTH - column % TAB_WIDTH;
            out.extend(std::iter::repeat(' ').take(fill));
            column += fill;
        } else {
            out.push(c);
            column += 1;
        }
    }
    std::borrow::Cow::Owned(out)
}
