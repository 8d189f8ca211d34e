//! Launching the external chat program.

use crate::error::{DocshotError, DocshotResult};
use std::io::ErrorKind;
use std::process::{Command, Stdio};

/// One invocation of the chat program: `program args...`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatCommand {
    program: String,
    args: Vec<String>,
}

impl ChatCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self { program: program.into(), args: Vec::new() }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn arguments(&self) -> &[String] {
        &self.args
    }

    /// Run to completion with inherited stdio and return the exit code.
    ///
    /// Fails when the program cannot be started or is killed by a signal.
    /// A non-zero exit code is returned as is.
    pub fn run(&self) -> DocshotResult<i32> {
        tracing::debug!("running {} with {} argument(s)", self.program, self.args.len());

        let status = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|err| match err.kind() {
                ErrorKind::NotFound => DocshotError::ExternalProcessError(format!(
                    "'{}' was not found on PATH",
                    self.program
                )),
                _ => DocshotError::ExternalProcessError(format!(
                    "failed to start '{}': {}",
                    self.program, err
                )),
            })?;

        status.code().ok_or_else(|| {
            DocshotError::ExternalProcessError(format!("'{}' was terminated by a signal", self.program))
        })
    }
}

/// Whether the forwarded arguments ask the chat program for its own help.
pub fn wants_help(args: &[String]) -> bool {
    args.iter().any(|arg| arg == "-h" || arg == "--help")
}
