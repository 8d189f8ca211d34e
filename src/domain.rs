//! Core data types: documents, pages, render settings and file configuration.

use crate::error::{DocshotError, DocshotResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::str::FromStr;

/// Margin around the drawable area, in pixels.
pub const PADDING: f32 = 40.0;

/// Line height as a multiple of the font size.
pub const LINE_HEIGHT_FACTOR: f32 = 1.6;

pub const DEFAULT_OUTPUT_DIR: &str = "docshot";
pub const DEFAULT_DENSITY: &str = "medium";
pub const DEFAULT_IMAGE_WIDTH: u32 = 1400;
pub const DEFAULT_CHAT_PROGRAM: &str = "claude";

/// Largest canvas, in pixels, a single page may allocate (about 300 MB as RGB).
pub const MAX_CANVAS_PIXELS: u64 = 100_000_000;

/// Marker placed in front of every image path handed to the chat program.
pub const REFERENCE_MARKER: char = '@';

/// An immutable, ordered sequence of text lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    lines: Vec<String>,
}

impl Document {
    /// Split raw text on line feeds.
    ///
    /// A final newline does not produce a trailing empty line, and a carriage
    /// return left over from CRLF endings is stripped from each line.
    pub fn from_text(text: &str) -> Self {
        if text.is_empty() {
            return Self::default();
        }

        let body = text.strip_suffix('\n').unwrap_or(text);
        let lines = body
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
            .collect();

        Self { lines }
    }

    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { lines: lines.into_iter().map(Into::into).collect() }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// A contiguous slice of a document rendered to one image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page<'a> {
    /// 0-based position among the document's pages.
    pub index: usize,
    /// 1-based number of the first line on this page.
    pub start_line: usize,
    pub lines: &'a [String],
}

impl<'a> Page<'a> {
    /// Lines paired with their 1-based line numbers.
    pub fn numbered_lines(&self) -> impl Iterator<Item = (usize, &'a str)> + 'a {
        let start = self.start_line;
        self.lines.iter().enumerate().map(move |(offset, line)| (start + offset, line.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Named `(lines per page, font size)` pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DensityPreset {
    High,
    Medium,
    Low,
}

impl DensityPreset {
    pub fn all() -> &'static [DensityPreset] {
        &[DensityPreset::High, DensityPreset::Medium, DensityPreset::Low]
    }

    pub fn name(&self) -> &'static str {
        match self {
            DensityPreset::High => "high",
            DensityPreset::Medium => "medium",
            DensityPreset::Low => "low",
        }
    }

    pub fn lines_per_page(&self) -> usize {
        match self {
            DensityPreset::High => 100,
            DensityPreset::Medium => 80,
            DensityPreset::Low => 60,
        }
    }

    pub fn font_size(&self) -> f32 {
        match self {
            DensityPreset::High => 12.0,
            DensityPreset::Medium => 14.0,
            DensityPreset::Low => 16.0,
        }
    }
}

impl fmt::Display for DensityPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DensityPreset {
    type Err = DocshotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(DensityPreset::High),
            "medium" => Ok(DensityPreset::Medium),
            "low" => Ok(DensityPreset::Low),
            other => Err(DocshotError::InvalidConfiguration(format!(
                "Invalid density '{other}' (expected high, medium or low)"
            ))),
        }
    }
}

/// Validated layout settings for one render run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RenderConfig {
    lines_per_page: NonZeroUsize,
    font_size: f32,
    image_width: u32,
}

impl RenderConfig {
    pub fn new(lines_per_page: usize, font_size: f32, image_width: u32) -> DocshotResult<Self> {
        let lines_per_page = NonZeroUsize::new(lines_per_page).ok_or_else(|| {
            DocshotError::InvalidConfiguration("lines per page must be at least 1".to_string())
        })?;
        if !font_size.is_finite() || font_size <= 0.0 {
            return Err(DocshotError::InvalidConfiguration(format!(
                "font size must be a positive number, got {font_size}"
            )));
        }
        if image_width == 0 {
            return Err(DocshotError::InvalidConfiguration(
                "image width must be greater than zero".to_string(),
            ));
        }

        let height = canvas_height_px(lines_per_page.get(), font_size);
        let pixels = height * f64::from(image_width);
        if height > f64::from(u32::MAX) || pixels > MAX_CANVAS_PIXELS as f64 {
            return Err(DocshotError::InvalidConfiguration(format!(
                "page canvas of {image_width}x{height:.0} pixels exceeds the limit of \
                 {MAX_CANVAS_PIXELS} pixels; lower the lines per page, font size or width"
            )));
        }
        Ok(Self { lines_per_page, font_size, image_width })
    }

    pub fn from_preset(preset: DensityPreset, image_width: u32) -> DocshotResult<Self> {
        Self::new(preset.lines_per_page(), preset.font_size(), image_width)
    }

    /// Combine a density name with optional explicit overrides.
    ///
    /// The density name is only consulted for values that are not overridden,
    /// so an unknown name is accepted when both overrides are present.
    pub fn resolve(
        density: &str,
        lines_per_page: Option<usize>,
        font_size: Option<f32>,
        image_width: u32,
    ) -> DocshotResult<Self> {
        let (lines, size) = match (lines_per_page, font_size) {
            (Some(lines), Some(size)) => (lines, size),
            (lines, size) => {
                let preset: DensityPreset = density.parse()?;
                (
                    lines.unwrap_or_else(|| preset.lines_per_page()),
                    size.unwrap_or_else(|| preset.font_size()),
                )
            }
        };
        Self::new(lines, size, image_width)
    }

    pub fn lines_per_page(&self) -> NonZeroUsize {
        self.lines_per_page
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn image_width(&self) -> u32 {
        self.image_width
    }

    pub fn line_height(&self) -> f32 {
        line_height_px(self.font_size)
    }

    /// Header plus a blank line plus a full page of content, framed by padding.
    pub fn canvas_height(&self) -> u32 {
        // Bounded by the check in `new`.
        canvas_height_px(self.lines_per_page.get(), self.font_size) as u32
    }
}

fn line_height_px(font_size: f32) -> f32 {
    (font_size * LINE_HEIGHT_FACTOR).floor()
}

fn canvas_height_px(lines_per_page: usize, font_size: f32) -> f64 {
    let line_height = f64::from(line_height_px(font_size));
    2.0 * f64::from(PADDING) + line_height * (lines_per_page as f64 + 2.0)
}

/// Display color class of a single line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorCategory {
    Comment,
    Keyword,
    Default,
}

/// One encoded page, ready to be written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedImage {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Settings read from a `docshot.toml` / `docshot.yml` file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub output_dir: PathBuf,
    pub density: String,
    pub lines_per_page: Option<usize>,
    pub font_size: Option<f32>,
    pub image_width: u32,
    pub font: Option<PathBuf>,
    pub chat_program: String,
    pub chat_args: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            density: DEFAULT_DENSITY.to_string(),
            lines_per_page: None,
            font_size: None,
            image_width: DEFAULT_IMAGE_WIDTH,
            font: None,
            chat_program: DEFAULT_CHAT_PROGRAM.to_string(),
            chat_args: Vec::new(),
        }
    }
}

impl Config {
    pub fn render_config(&self) -> DocshotResult<RenderConfig> {
        RenderConfig::resolve(&self.density, self.lines_per_page, self.font_size, self.image_width)
    }
}
