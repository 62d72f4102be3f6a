use crate::cli::source::LineSource;
use crate::core::{Result, ShellError};
use std::io::Write;
use std::path::PathBuf;

/// Environment variable holding the data file path.
pub const DATA_FILE_ENV: &str = "FILENAME";

/// Nested `execute_script` calls allowed before the guard trips.
pub const DEFAULT_MAX_SCRIPT_DEPTH: usize = 16;

/// Session configuration
#[derive(Debug, Clone)]
pub struct ShellConfig {
    /// Data file loaded at startup and written by `save`
    pub data_file: PathBuf,

    /// Maximum nesting of `execute_script`
    pub max_script_depth: usize,
}

impl ShellConfig {
    pub fn new(data_file: impl Into<PathBuf>) -> Self {
        Self {
            data_file: data_file.into(),
            max_script_depth: DEFAULT_MAX_SCRIPT_DEPTH,
        }
    }

    /// Set the script nesting limit
    pub fn max_script_depth(mut self, depth: usize) -> Self {
        self.max_script_depth = depth;
        self
    }

    /// Use `data_file` when present, otherwise ask for it on `source`.
    pub fn resolve<W: Write>(
        data_file: Option<PathBuf>,
        source: &mut dyn LineSource,
        out: &mut W,
    ) -> Result<Self> {
        if let Some(path) = data_file.filter(|p| !p.as_os_str().is_empty()) {
            return Ok(Self::new(path));
        }

        writeln!(out, "Data file path is not set, enter it manually:")?;
        out.flush()?;
        loop {
            let line = source.next_line()?.ok_or_else(|| {
                ShellError::Io("input ended before a data file path was given".to_string())
            })?;
            let path = line.trim();
            if !path.is_empty() {
                return Ok(Self::new(path));
            }
            writeln!(out, "The path must not be empty, try again:")?;
            out.flush()?;
        }
    }
}
