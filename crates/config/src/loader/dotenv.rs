//! Layered dotenv file loading.
//!
//! Responsibilities:
//! - Compute the layered candidate files for an environment name.
//! - Parse each existing file with `dotenvy` and merge them, later files winning.
//!
//! Does NOT handle:
//! - Reading the live process environment (see env.rs).
//! - Mutating the process environment: files are parsed, never exported.
//!
//! Invariants:
//! - A missing file is skipped silently; an existing but malformed one is fatal.
//! - Errors report path and line number only, never line contents.
//! - Each file is read fully and closed before it is parsed.

use std::io::{self, ErrorKind, Read};
use std::path::{Path, PathBuf};

use super::error::ConfigError;
use super::raw::RawEnvironment;
use crate::constants::{DOTENV_BASE_FILE, DOTENV_LOCAL_SUFFIX};

/// Loads the dotenv layers of one environment from one directory.
#[derive(Debug, Clone)]
pub struct DotenvLoader {
    base_dir: PathBuf,
    environment: String,
}

impl DotenvLoader {
    pub fn new(base_dir: impl Into<PathBuf>, environment: impl Into<String>) -> Self {
        Self {
            base_dir: base_dir.into(),
            environment: environment.into(),
        }
    }

    /// Candidate files, lowest precedence first:
    /// `.env`, `.env.{env}`, `.env.local`, `.env.{env}.local`.
    pub fn candidates(&self) -> Vec<PathBuf> {
        let env = &self.environment;
        [
            DOTENV_BASE_FILE.to_string(),
            format!("{DOTENV_BASE_FILE}.{env}"),
            format!("{DOTENV_BASE_FILE}.{DOTENV_LOCAL_SUFFIX}"),
            format!("{DOTENV_BASE_FILE}.{env}.{DOTENV_LOCAL_SUFFIX}"),
        ]
        .into_iter()
        .map(|name| self.base_dir.join(name))
        .collect()
    }

    /// Merge every existing candidate into one mapping.
    pub fn load(&self) -> Result<RawEnvironment, ConfigError> {
        load_files(&self.candidates())
    }
}

/// Merge `paths` in order; a later file's key overwrites an earlier one's.
pub fn load_files<P: AsRef<Path>>(paths: &[P]) -> Result<RawEnvironment, ConfigError> {
    let mut merged = RawEnvironment::new();
    for path in paths {
        if let Some(layer) = parse_file(path.as_ref())? {
            merged.merge(layer);
        }
    }
    Ok(merged)
}

/// Parse one dotenv file; `Ok(None)` if it does not exist.
pub fn parse_file(path: &Path) -> Result<Option<RawEnvironment>, ConfigError> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::trace!(path = %path.display(), "dotenv file not present");
            return Ok(None);
        }
        Err(e) => {
            return Err(ConfigError::DotenvIo {
                path: path.to_path_buf(),
                kind: e.kind(),
            });
        }
    };

    let layer = parse_str(&contents, path)?;
    tracing::debug!(path = %path.display(), keys = layer.len(), "loaded dotenv file");
    Ok(Some(layer))
}

/// Parse dotenv text; `path` is only used to label errors.
pub fn parse_str(contents: &str, path: &Path) -> Result<RawEnvironment, ConfigError> {
    let mut reader = LineReader::new(contents);
    let mut layer = RawEnvironment::new();
    let mut failure = None;

    for item in dotenvy::from_read_iter(&mut reader) {
        match item {
            Ok((key, value)) => layer.insert(key, value),
            Err(e) => {
                failure = Some(e);
                break;
            }
        }
    }

    match failure {
        None => Ok(layer),
        Some(dotenvy::Error::LineParse(rejected, _)) => Err(ConfigError::Parse {
            path: path.to_path_buf(),
            line: start_line(reader.lines_read(), &rejected),
        }),
        Some(dotenvy::Error::Io(io_err)) => Err(ConfigError::DotenvIo {
            path: path.to_path_buf(),
            kind: io_err.kind(),
        }),
        Some(_) => Err(ConfigError::DotenvUnknown {
            path: path.to_path_buf(),
        }),
    }
}

/// Hands out at most one physical line per `read` call and counts the
/// completed ones.
///
/// dotenvy buffers its input and pulls lines only until a logical line is
/// complete, so when it reports an error `lines_read` is the last physical
/// line of the rejected entry.
struct LineReader<'a> {
    remaining: &'a [u8],
    lines: usize,
}

impl<'a> LineReader<'a> {
    fn new(contents: &'a str) -> Self {
        Self {
            remaining: contents.as_bytes(),
            lines: 0,
        }
    }

    fn lines_read(&self) -> usize {
        self.lines
    }
}

impl Read for LineReader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.remaining.is_empty() || buf.is_empty() {
            return Ok(0);
        }

        let line_len = self
            .remaining
            .iter()
            .position(|&b| b == b'\n')
            .map_or(self.remaining.len(), |i| i + 1);
        let n = line_len.min(buf.len());
        buf[..n].copy_from_slice(&self.remaining[..n]);
        self.remaining = &self.remaining[n..];
        if n == line_len {
            self.lines += 1;
        }
        Ok(n)
    }
}

/// 1-based line on which the rejected entry starts, given the last physical
/// line dotenvy consumed for it.
fn start_line(last_line: usize, rejected: &str) -> usize {
    let body = rejected.strip_suffix('\n').unwrap_or(rejected);
    let spanned = body.matches('\n').count() + 1;
    (last_line + 1).saturating_sub(spanned).max(1)
}
