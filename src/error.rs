use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while loading a straps file or reading typed values.
///
/// Load-phase variants (`FileNotFound` through `UnknownEnvironment`) are
/// unrecoverable by intent: the expected caller response is startup failure,
/// not retry. Accessor-phase variants are per-call and deterministic.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StrapsError {
    #[error("straps file not found; searched {searched:?}")]
    FileNotFound { searched: Vec<PathBuf> },

    #[error("base directory variable '{0}' is unset or empty")]
    MissingBaseDir(String),

    #[error("failed to read straps file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse straps document: {0}")]
    ParseError(#[from] quick_xml::DeError),

    #[error("environment selector variable '{0}' is unset or empty")]
    MissingSelector(String),

    #[error("no environment named '{0}' in straps document")]
    UnknownEnvironment(String),

    #[error("strap key not found: {0}")]
    MissingKey(String),

    #[error("invalid key pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("strap '{key}' has value '{value}', expected a boolean")]
    InvalidBool { key: String, value: String },

    #[error("strap '{key}' has value '{value}', expected a base-10 integer")]
    InvalidInt { key: String, value: String },
}
