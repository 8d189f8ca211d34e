//! Input expansion: files, directories and glob patterns.

use crate::error::{DocshotError, DocshotResult};
use crate::utils::{is_binary_file, normalize_path};
use globset::{GlobBuilder, GlobMatcher};
use ignore::WalkBuilder;
use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

const GLOB_META: &[char] = &['*', '?', '[', '{'];

/// Resolves command-line inputs to an ordered list of text files.
///
/// - an existing file is taken as is
/// - an existing directory contributes its immediate, non-hidden text files
/// - anything with glob metacharacters is matched against a walk of its
///   literal base directory, honouring `.gitignore` by default
pub struct InputScanner {
    respect_gitignore: bool,
}

impl Default for InputScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl InputScanner {
    pub fn new() -> Self {
        Self { respect_gitignore: true }
    }

    /// Set whether glob walks respect gitignore files
    pub fn respect_gitignore(mut self, respect: bool) -> Self {
        self.respect_gitignore = respect;
        self
    }

    /// Expand every input in order. Duplicates keep their first position.
    pub fn expand<S: AsRef<str>>(&self, inputs: &[S]) -> DocshotResult<Vec<PathBuf>> {
        let mut seen = HashSet::new();
        let mut files = Vec::new();

        for input in inputs {
            for path in self.expand_one(input.as_ref())? {
                let key = path.canonicalize().unwrap_or_else(|_| path.clone());
                if seen.insert(key) {
                    files.push(path);
                }
            }
        }

        Ok(files)
    }

    fn expand_one(&self, input: &str) -> DocshotResult<Vec<PathBuf>> {
        let path = Path::new(input);

        if path.is_file() {
            if is_binary_file(path) {
                return Err(DocshotError::NoContentFound(format!(
                    "{} looks like a binary file",
                    path.display()
                )));
            }
            return Ok(vec![path.to_path_buf()]);
        }

        if path.is_dir() {
            let files = directory_text_files(path)?;
            if files.is_empty() {
                return Err(DocshotError::NoContentFound(format!(
                    "no text files in {}",
                    path.display()
                )));
            }
            return Ok(files);
        }

        if input.contains(GLOB_META) {
            let files = self.glob(input)?;
            if files.is_empty() {
                return Err(DocshotError::NoContentFound(format!("no files match '{input}'")));
            }
            return Ok(files);
        }

        Err(DocshotError::InputNotFound(path.to_path_buf()))
    }

    fn glob(&self, pattern: &str) -> DocshotResult<Vec<PathBuf>> {
        let normalized = normalize_path(pattern);
        let normalized = normalized.strip_prefix("./").unwrap_or(&normalized).to_string();
        let matcher = compile_glob(&normalized)?;
        let base = literal_base(&normalized);
        if !base.is_dir() {
            return Err(DocshotError::InputNotFound(base));
        }

        let mut builder = WalkBuilder::new(&base);
        builder
            .git_ignore(self.respect_gitignore)
            .git_global(self.respect_gitignore)
            .git_exclude(self.respect_gitignore)
            .follow_links(false)
            .hidden(true)
            .parents(true);

        let mut files = Vec::new();
        for entry in builder.build() {
            let entry = match entry {
                Ok(e) => e,
                Err(err) => {
                    tracing::debug!("skipping unreadable entry: {}", err);
                    continue;
                }
            };
            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }

            let candidate = normalize_path(&entry.path().to_string_lossy());
            let candidate = candidate.strip_prefix("./").unwrap_or(&candidate);
            if !matcher.is_match(candidate) {
                continue;
            }
            if is_binary_file(entry.path()) {
                tracing::debug!("skipping binary file {}", entry.path().display());
                continue;
            }
            files.push(entry.into_path());
        }

        files.sort();
        Ok(files)
    }
}

fn compile_glob(pattern: &str) -> DocshotResult<GlobMatcher> {
    GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map(|glob| glob.compile_matcher())
        .map_err(|err| DocshotError::InvalidConfiguration(format!("invalid glob '{pattern}': {err}")))
}

/// Leading directory components of `pattern` that contain no glob syntax.
fn literal_base(pattern: &str) -> PathBuf {
    let mut base = PathBuf::new();
    let path = Path::new(pattern);
    let components: Vec<Component> = path.components().collect();

    // The last component is the file part; only directories count as base.
    for component in components.iter().take(components.len().saturating_sub(1)) {
        if component.as_os_str().to_string_lossy().contains(GLOB_META) {
            break;
        }
        base.push(component.as_os_str());
    }

    if base.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        base
    }
}

fn directory_text_files(dir: &Path) -> DocshotResult<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let hidden = entry.file_name().to_string_lossy().starts_with('.');
        if hidden || !path.is_file() {
            continue;
        }
        if is_binary_file(&path) {
            tracing::debug!("skipping binary file {}", path.display());
            continue;
        }
        files.push(path);
    }
    files.sort();
    Ok(files)
}
