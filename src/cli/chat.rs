//! Chat command implementation

use anyhow::{Context, Result};
use clap::Args;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use super::utils::{exit_code_from, quote_arg};
use crate::config::{load_config, merge_cli_with_config, CliOverrides};
use crate::exec::{wants_help, ChatCommand};
use crate::refs::build_references;

#[derive(Args)]
pub struct ChatArgs {
    /// Directory containing page images (defaults to the configured output directory)
    #[arg(short, long, value_name = "DIR", env = "DOCSHOT_OUTPUT_DIR")]
    pub dir: Option<PathBuf>,

    /// Chat program to launch
    #[arg(short, long, value_name = "PROGRAM", env = "DOCSHOT_CHAT_PROGRAM")]
    pub program: Option<String>,

    /// Print the command line instead of running it
    #[arg(long)]
    pub dry_run: bool,

    /// Arguments passed to the chat program before the image references
    #[arg(value_name = "ARGS", trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

pub fn run(args: ChatArgs, config_path: Option<&Path>) -> Result<ExitCode> {
    let cwd = std::env::current_dir().context("Cannot determine working directory")?;
    let config = merge_cli_with_config(
        load_config(&cwd, config_path)?,
        CliOverrides {
            chat_program: args.program,
            chat_args: args.args,
            ..CliOverrides::default()
        },
    );
    let dir = args.dir.unwrap_or_else(|| config.output_dir.clone());

    let mut command = ChatCommand::new(config.chat_program.clone()).args(config.chat_args.clone());
    if wants_help(&config.chat_args) {
        // Help goes straight through; no images are required.
        tracing::debug!("passing help request through to {}", config.chat_program);
    } else {
        command = command.arg(build_references(&dir)?);
    }

    if args.dry_run {
        let line: Vec<String> = std::iter::once(command.program())
            .chain(command.arguments().iter().map(String::as_str))
            .map(quote_arg)
            .collect();
        println!("{}", line.join(" "));
        return Ok(ExitCode::SUCCESS);
    }

    let code = command.run()?;
    if code != 0 {
        eprintln!("Error: '{}' exited with status {}", command.program(), code);
    }
    Ok(exit_code_from(code))
}
