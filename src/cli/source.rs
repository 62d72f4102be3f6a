use crate::core::{Result, ShellError};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// "Give me the next line" capability.
///
/// Commands that need more input (building a vehicle field by field) pull
/// from the same source their command line came from: console commands
/// read the console, script commands read the script.
pub trait LineSource {
    /// `Ok(None)` at end of input.
    fn next_line(&mut self) -> Result<Option<String>>;

    /// Interactive sources get prompts printed before each read.
    fn is_interactive(&self) -> bool;

    fn name(&self) -> &str;
}

pub struct ReaderSource<R: BufRead> {
    reader: R,
    name: String,
    interactive: bool,
    lines_read: usize,
}

impl<R: BufRead> ReaderSource<R> {
    pub fn console(reader: R) -> Self {
        Self {
            reader,
            name: "<stdin>".to_string(),
            interactive: true,
            lines_read: 0,
        }
    }

    pub fn script(reader: R, name: impl Into<String>) -> Self {
        Self {
            reader,
            name: name.into(),
            interactive: false,
            lines_read: 0,
        }
    }

    pub fn lines_read(&self) -> usize {
        self.lines_read
    }
}

impl ReaderSource<BufReader<File>> {
    pub fn open_script(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| {
            ShellError::Io(format!("Cannot open script '{}': {}", path.display(), e))
        })?;
        Ok(Self::script(
            BufReader::new(file),
            path.display().to_string(),
        ))
    }
}

impl<R: BufRead> LineSource for ReaderSource<R> {
    fn next_line(&mut self) -> Result<Option<String>> {
        let mut buf = Vec::new();
        let read = self.reader.read_until(b'\n', &mut buf).map_err(|e| {
            ShellError::Io(format!("Failed to read from {}: {}", self.name, e))
        })?;
        if read == 0 {
            return Ok(None);
        }
        self.lines_read += 1;
        // невалидный UTF-8 заменяется на U+FFFD, поток не обрывается
        let mut line = String::from_utf8_lossy(&buf).into_owned();
        let trimmed_len = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed_len);
        Ok(Some(line))
    }

    fn is_interactive(&self) -> bool {
        self.interactive
    }

    fn name(&self) -> &str {
        &self.name
    }
}
