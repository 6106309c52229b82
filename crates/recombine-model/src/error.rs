use thiserror::Error;

/// Errors that abort a generation run.
///
/// Per-token problems are reported as [`crate::Warning`] instead, so a single
/// bad token never stops the rest of the document from being produced.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// A data block starting with the set sentinel has no item lines.
    #[error("data block {index} declares a set but has no line break after its name")]
    MalformedSet { index: usize },

    /// A set reference matched neither a set index nor a set name.
    #[error("unknown set reference '{reference}'")]
    UnknownSet { reference: String },

    /// A truncation modifier asked for more items than the set holds.
    #[error("set reference '{reference}' requests {requested} items but the set has {available}")]
    TruncationExceedsSet {
        reference: String,
        requested: usize,
        available: usize,
    },

    /// The prompt collaborator failed to return an answer.
    #[error("failed to obtain a value for prompt '{prompt}': {source}")]
    Prompt {
        prompt: String,
        #[source]
        source: std::io::Error,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TemplateError>;
