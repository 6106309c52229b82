//! Non-fatal diagnostics collected during a generation run.

use serde::Serialize;
use thiserror::Error;

/// A recoverable problem with a single token.
///
/// The engine logs each warning when it happens and keeps going with a
/// best-effort substitution (unchanged text or an empty string).
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    /// A modifier names a function the registry does not know.
    #[error("unknown function '{name}'")]
    UnknownFunction { name: String },

    /// A numeral token points past the last data block.
    #[error("data block index {index} is out of range ({len} blocks)")]
    IndexOutOfRange { index: String, len: usize },

    /// The token stream ended inside a sequence.
    #[error("sequence opened by '{opener}' was never closed")]
    UnterminatedSequence { opener: String },
}

impl Warning {
    /// Short machine-friendly code, used in summaries.
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownFunction { .. } => "unknown-function",
            Self::IndexOutOfRange { .. } => "index-out-of-range",
            Self::UnterminatedSequence { .. } => "unterminated-sequence",
        }
    }
}
