//! Presets command implementation

use anyhow::Result;
use std::process::ExitCode;

use super::render::describe;
use crate::domain::{DensityPreset, RenderConfig, DEFAULT_DENSITY, DEFAULT_IMAGE_WIDTH};

pub fn run() -> Result<ExitCode> {
    for preset in DensityPreset::all() {
        let config = RenderConfig::from_preset(*preset, DEFAULT_IMAGE_WIDTH)?;
        let marker = if preset.name() == DEFAULT_DENSITY { " (default)" } else { "" };
        println!("{:<8}{}{}", preset.name(), describe(&config), marker);
    }
    Ok(ExitCode::SUCCESS)
}
