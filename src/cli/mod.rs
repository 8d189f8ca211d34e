//! Command-line interface for docshot
//!
//! Provides `render`, `refs`, `chat` and `presets` subcommands.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod chat;
mod presets;
mod refs;
mod render;
mod utils;

/// Render text documents as terminal-styled PNG pages and hand them to a chat CLI
#[derive(Parser)]
#[command(name = "docshot")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to a config file (docshot.toml or docshot.yml)
    #[arg(short = 'c', long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Paginate documents and write one PNG per page
    Render(Box<render::RenderArgs>),

    /// Print @-references for the images in a directory
    Refs(refs::RefsArgs),

    /// Launch the chat program with the page images attached
    Chat(chat::ChatArgs),

    /// List density presets
    Presets,
}

/// Parse arguments, run the selected command and map the outcome to an exit code.
///
/// Usage errors, including malformed flag values, exit with 1. Help and
/// version output exit with 0.
pub fn run() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() { ExitCode::FAILURE } else { ExitCode::SUCCESS };
        }
    };

    init_tracing(cli.verbose);

    match dispatch(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let filter = if verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}

fn dispatch(cli: Cli) -> Result<ExitCode> {
    let config = cli.config.as_deref();
    match cli.command {
        Commands::Render(args) => render::run(*args, config),
        Commands::Refs(args) => refs::run(args, config),
        Commands::Chat(args) => chat::run(args, config),
        Commands::Presets => presets::run(),
    }
}
