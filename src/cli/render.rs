//! Render command implementation

use anyhow::{Context, Result};
use clap::Args;
use console::style;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use super::utils::{unique_subdir, ProgressReporter};
use crate::config::{load_config, merge_cli_with_config, CliOverrides};
use crate::domain::{Document, RenderConfig};
use crate::refs::build_references;
use crate::render::{
    remove_page_files, write_manifest, DocumentRenderer, FontFace, Theme, MANIFEST_FILE_NAME,
};
use crate::scan::InputScanner;
use crate::utils::read_text_file;

#[derive(Args)]
pub struct RenderArgs {
    /// Files, directories or glob patterns to render
    #[arg(value_name = "INPUT", required = true)]
    pub inputs: Vec<String>,

    /// Directory for page images
    #[arg(short, long, value_name = "DIR", env = "DOCSHOT_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Density preset: high|medium|low
    #[arg(short, long, value_name = "PRESET", env = "DOCSHOT_DENSITY")]
    pub density: Option<String>,

    /// Lines per page (overrides the preset)
    #[arg(short, long = "lines", value_name = "N")]
    pub lines: Option<usize>,

    /// Font size in pixels (overrides the preset)
    #[arg(short, long, value_name = "PX")]
    pub font_size: Option<f32>,

    /// Image width in pixels
    #[arg(short, long = "width", value_name = "PX")]
    pub width: Option<u32>,

    /// Monospace TrueType/OpenType font to draw with
    #[arg(long, value_name = "PATH", env = "DOCSHOT_FONT")]
    pub font: Option<PathBuf>,

    /// Header title (defaults to the input file name)
    #[arg(long, value_name = "TEXT")]
    pub title: Option<String>,

    /// Keep rendering remaining inputs after a failure
    #[arg(long)]
    pub keep_going: bool,

    /// Write manifest.json next to the pages
    #[arg(long)]
    pub manifest: bool,

    /// Omit timestamps from the manifest
    #[arg(long)]
    pub no_timestamp: bool,

    /// Ignore .gitignore rules when expanding globs
    #[arg(long)]
    pub no_gitignore: bool,

    /// Do not show a progress bar
    #[arg(long)]
    pub no_progress: bool,
}

struct RenderSettings<'a> {
    renderer: DocumentRenderer<'a>,
    title: Option<String>,
    manifest: bool,
    timestamp: bool,
    progress: bool,
}

pub fn run(args: RenderArgs, config_path: Option<&Path>) -> Result<ExitCode> {
    let cwd = std::env::current_dir().context("Cannot determine working directory")?;
    let config = load_config(&cwd, config_path)?;
    let config = merge_cli_with_config(
        config,
        CliOverrides {
            output_dir: args.output_dir.clone(),
            density: args.density.clone(),
            lines_per_page: args.lines,
            font_size: args.font_size,
            image_width: args.width,
            font: args.font.clone(),
            ..CliOverrides::default()
        },
    );

    let render_config = config.render_config()?;
    let inputs = InputScanner::new().respect_gitignore(!args.no_gitignore).expand(&args.inputs)?;
    tracing::info!("rendering {} input(s) into {}", inputs.len(), config.output_dir.display());

    let font = FontFace::discover(config.font.as_deref())?;
    match font.source() {
        Some(path) => tracing::info!("drawing text with {}", path.display()),
        None => tracing::info!("drawing text as placeholder cells"),
    }
    let settings = RenderSettings {
        renderer: DocumentRenderer::new(render_config, Theme::default(), &font),
        title: args.title.clone(),
        manifest: args.manifest,
        timestamp: !args.no_timestamp,
        progress: !args.no_progress,
    };

    let batch = inputs.len() > 1;
    if batch && config.output_dir.is_dir() {
        // Top-level pages are left over from a single-file run.
        let removed = remove_page_files(&config.output_dir)?;
        tracing::debug!("removed {} top-level page(s) from {}", removed, config.output_dir.display());
    }
    let mut used_dirs = HashSet::new();
    let mut failed = 0usize;

    for input in &inputs {
        let target = if batch {
            config.output_dir.join(unique_subdir(input, &mut used_dirs))
        } else {
            config.output_dir.clone()
        };

        match render_input(input, &target, &settings) {
            Ok(()) => {}
            Err(err) if args.keep_going => {
                eprintln!("{} {}: {:#}", style("Failed").red().bold(), input.display(), err);
                failed += 1;
            }
            Err(err) => return Err(err),
        }
    }

    if failed > 0 {
        anyhow::bail!("{} of {} input(s) failed to render", failed, inputs.len());
    }

    if batch {
        println!(
            "{} {} documents under {}",
            style("Done:").green().bold(),
            inputs.len(),
            config.output_dir.display()
        );
    }
    Ok(ExitCode::SUCCESS)
}

fn render_input(input: &Path, target: &Path, settings: &RenderSettings<'_>) -> Result<()> {
    let (content, encoding) = read_text_file(input)?;
    let document = Document::from_text(&content);
    let title = settings.title.clone().unwrap_or_else(|| default_title(input));

    let mut progress = ProgressReporter::new(&title, settings.progress);
    let outcome = settings
        .renderer
        .render_to_dir(&document, &title, target, &mut progress)
        .with_context(|| format!("Failed to render {}", input.display()))?;

    if settings.manifest {
        write_manifest(
            &target.join(MANIFEST_FILE_NAME),
            input,
            &encoding,
            settings.renderer.config(),
            &outcome,
            settings.timestamp,
        )?;
    }

    println!(
        "{} {} ({} lines) -> {} page(s) in {}",
        style("Rendered").green().bold(),
        input.display(),
        outcome.line_count,
        outcome.pages.len(),
        target.display()
    );
    println!("{}", build_references(target)?);
    Ok(())
}

fn default_title(input: &Path) -> String {
    input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| input.display().to_string())
}

/// Effective render settings for `presets` output and tests.
pub fn describe(config: &RenderConfig) -> String {
    format!(
        "{} lines/page, {}px font, {}px wide, {}px line height",
        config.lines_per_page(),
        config.font_size(),
        config.image_width(),
        config.line_height()
    )
}
