//! Refs command implementation

use anyhow::{Context, Result};
use clap::Args;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::config::load_config;
use crate::refs::build_references;

#[derive(Args)]
pub struct RefsArgs {
    /// Directory containing page images (defaults to the configured output directory)
    #[arg(value_name = "DIR", env = "DOCSHOT_OUTPUT_DIR")]
    pub dir: Option<PathBuf>,
}

pub fn run(args: RefsArgs, config_path: Option<&Path>) -> Result<ExitCode> {
    let dir = match args.dir {
        Some(dir) => dir,
        None => {
            let cwd = std::env::current_dir().context("Cannot determine working directory")?;
            load_config(&cwd, config_path)?.output_dir
        }
    };

    println!("{}", build_references(&dir)?);
    Ok(ExitCode::SUCCESS)
}
