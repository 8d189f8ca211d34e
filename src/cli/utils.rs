//! Shared CLI utilities.

use crate::render::{RenderEvent, RenderObserver};
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashSet;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Progress bar on stderr driven by render events.
pub struct ProgressReporter {
    bar: ProgressBar,
}

impl ProgressReporter {
    /// A visible bar when stderr is a terminal and `enabled` is set,
    /// otherwise a hidden one.
    pub fn new(label: &str, enabled: bool) -> Self {
        let bar = if enabled && std::io::stderr().is_terminal() {
            ProgressBar::new(0)
        } else {
            ProgressBar::hidden()
        };
        let style = ProgressStyle::with_template("{msg} [{bar:30}] {pos}/{len} pages")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> ");
        bar.set_style(style);
        bar.set_message(label.to_string());
        Self { bar }
    }
}

impl RenderObserver for ProgressReporter {
    fn on_event(&mut self, event: RenderEvent<'_>) {
        match event {
            RenderEvent::Started { total_pages } => {
                self.bar.set_length(total_pages as u64);
                self.bar.set_position(0);
            }
            RenderEvent::PageWritten { .. } => self.bar.inc(1),
            RenderEvent::Finished { .. } => self.bar.finish_and_clear(),
        }
    }
}

/// Pick a per-input subdirectory name that is unique within one batch.
///
/// Uses the file stem, falls back to the full file name when two inputs share
/// a stem, then appends a counter.
pub fn unique_subdir(input: &Path, used: &mut HashSet<String>) -> PathBuf {
    let stem = input.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
    let full = input.file_name().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
    let stem = if stem.is_empty() { "document".to_string() } else { stem };

    for candidate in [stem.clone(), full] {
        if !candidate.is_empty() && used.insert(candidate.clone()) {
            return PathBuf::from(candidate);
        }
    }

    let mut n = 2;
    loop {
        let candidate = format!("{stem}-{n}");
        if used.insert(candidate.clone()) {
            return PathBuf::from(candidate);
        }
        n += 1;
    }
}

/// Quote an argument for display in a shell-like command line.
pub fn quote_arg(arg: &str) -> String {
    let plain = !arg.is_empty()
        && arg.chars().all(|c| c.is_ascii_alphanumeric() || "-_./@=:,+%".contains(c));
    if plain {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}

/// Map a child exit code onto this process's exit code.
pub fn exit_code_from(code: i32) -> ExitCode {
    match u8::try_from(code) {
        Ok(code) => ExitCode::from(code),
        Err(_) => ExitCode::FAILURE,
    }
}
