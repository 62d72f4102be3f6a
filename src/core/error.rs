use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShellError {
    #[error("Invalid value for '{field}': {reason}")]
    Validation { field: &'static str, reason: String },

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Data file is corrupted at line {line}: {reason}")]
    Corrupted { line: usize, reason: String },

    #[error("Element with id {0} not found")]
    NotFound(i64),

    #[error("Duplicate element: {0}")]
    Duplicate(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Usage: {0}")]
    Usage(String),

    #[error("Unknown command '{0}'. Type help to see the list of available commands.")]
    UnknownCommand(String),

    #[error("Script nesting is deeper than {0} levels")]
    ScriptDepth(usize),
}

pub type Result<T> = std::result::Result<T, ShellError>;

impl ShellError {
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }
}

impl From<std::io::Error> for ShellError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
