//! Merge command-line overrides over file configuration.

use crate::domain::Config;
use std::path::PathBuf;

/// Values given on the command line (or through their environment
/// variables). `None` and empty lists leave the file value untouched.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub output_dir: Option<PathBuf>,
    pub density: Option<String>,
    pub lines_per_page: Option<usize>,
    pub font_size: Option<f32>,
    pub image_width: Option<u32>,
    pub font: Option<PathBuf>,
    pub chat_program: Option<String>,
    pub chat_args: Vec<String>,
}

pub fn merge_cli_with_config(mut config: Config, cli: CliOverrides) -> Config {
    if let Some(dir) = cli.output_dir {
        config.output_dir = dir;
    }
    if let Some(density) = cli.density {
        config.density = density;
    }
    if cli.lines_per_page.is_some() {
        config.lines_per_page = cli.lines_per_page;
    }
    if cli.font_size.is_some() {
        config.font_size = cli.font_size;
    }
    if let Some(width) = cli.image_width {
        config.image_width = width;
    }
    if cli.font.is_some() {
        config.font = cli.font;
    }
    if let Some(program) = cli.chat_program {
        config.chat_program = program;
    }
    if !cli.chat_args.is_empty() {
        config.chat_args = cli.chat_args;
    }
    config
}
