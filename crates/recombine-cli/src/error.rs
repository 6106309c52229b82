use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors loading a document or its configuration from disk.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{path} is encoded as {encoding}; only UTF-8 is supported")]
    UnsupportedEncoding {
        path: PathBuf,
        encoding: &'static str,
    },

    #[error("{path} is not valid UTF-8: {source}")]
    InvalidUtf8 {
        path: PathBuf,
        #[source]
        source: std::string::FromUtf8Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
