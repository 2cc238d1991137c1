//! Crate-level error types.

use std::fmt;

use crate::movie::ValidationReport;

/// Errors produced by the phylocine crate.
#[derive(Debug)]
pub enum PhylocineError {
    /// The movie payload failed invariant validation at load.
    InvalidMovie(ValidationReport),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// Movie payload JSON parsing failure.
    MovieParse(String),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// An external facade reported a failure during an update fan-out.
    Facade(String),
}

impl fmt::Display for PhylocineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidMovie(report) => {
                write!(f, "invalid movie data: {report}")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::MovieParse(msg) => {
                write!(f, "movie parse error: {msg}")
            }
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Facade(msg) => write!(f, "facade error: {msg}"),
        }
    }
}

impl std::error::Error for PhylocineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for PhylocineError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
