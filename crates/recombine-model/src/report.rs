use serde::Serialize;

use crate::warning::Warning;

/// Counters and diagnostics for one generation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GenerationSummary {
    /// Tokens written individually outside any sequence.
    pub tokens: usize,
    /// Interactive prompt sequences answered.
    pub prompts: usize,
    /// Combination sequences expanded.
    pub combination_sequences: usize,
    /// Lines produced by all combination sequences.
    pub combination_lines: usize,
    /// Bytes written to the output sink.
    pub bytes_written: usize,
    pub warnings: Vec<Warning>,
}

impl GenerationSummary {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }
}
