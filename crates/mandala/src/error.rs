//! Error type shared by the fallible parts of the crate.
//!
//! Geometry never fails: bad geometric input is a caller bug and panics in
//! the generators. What can fail is everything touching the outside world:
//! config files, user-supplied colors and writing SVGs to disk.

use std::fmt;
use std::io;
use std::path::PathBuf;

use crate::svg::SvgError;

#[derive(Debug)]
pub enum MandalaError {
    /// A config value would break a generator precondition.
    InvalidConfig(String),
    /// A config file could not be deserialized.
    Config { path: PathBuf, message: String },
    /// A CSS color string could not be parsed.
    Color { input: String, message: String },
    /// Creating the output directory or writing a file failed.
    Io { path: PathBuf, source: io::Error },
    /// A generated or loaded SVG document did not parse.
    Svg(SvgError),
}

impl MandalaError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        MandalaError::Io { path: path.into(), source }
    }
}

impl fmt::Display for MandalaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MandalaError::InvalidConfig(msg) => write!(f, "invalid pattern config: {}", msg),
            MandalaError::Config { path, message } => {
                write!(f, "failed to load config {}: {}", path.display(), message)
            }
            MandalaError::Color { input, message } => {
                write!(f, "invalid color '{}': {}", input, message)
            }
            MandalaError::Io { path, source } => write!(f, "{}: {}", path.display(), source),
            MandalaError::Svg(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for MandalaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MandalaError::Io { source, .. } => Some(source),
            MandalaError::Svg(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SvgError> for MandalaError {
    fn from(e: SvgError) -> Self {
        MandalaError::Svg(e)
    }
}
