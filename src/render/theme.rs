//! Color theme for rendered pages.

use crate::domain::ColorCategory;
use image::Rgb;

/// Immutable set of colors handed to the page renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub background: Rgb<u8>,
    /// Header and line-number gutter.
    pub muted: Rgb<u8>,
    pub comment: Rgb<u8>,
    pub keyword: Rgb<u8>,
    pub text: Rgb<u8>,
}

impl Theme {
    /// Dark terminal palette used by default.
    pub const DARK: Theme = Theme {
        background: Rgb([30, 30, 30]),
        muted: Rgb([128, 128, 128]),
        comment: Rgb([106, 153, 85]),
        keyword: Rgb([86, 156, 214]),
        text: Rgb([212, 212, 212]),
    };

    pub fn color_for(&self, category: ColorCategory) -> Rgb<u8> {
        match category {
            ColorCategory::Comment => self.comment,
            ColorCategory::Keyword => self.keyword,
            ColorCategory::Default => self.text,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::DARK
    }
}
