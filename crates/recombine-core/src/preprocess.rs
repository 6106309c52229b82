//! Splits a source document into data blocks and syntax tokens.
//!
//! The document starts in data mode. Separator lines (`%` followed by a
//! space or the end of the line) open a new data block; a line starting with
//! `%%` switches to syntax mode for the rest of the document. Syntax lines
//! are trimmed and split on single spaces into one flat token stream.

use recombine_model::EngineOptions;
use recombine_model::syntax::{DATA_SEPARATOR, SECTION_SEPARATOR};
use tracing::debug;

/// The data blocks and tokens of one source document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub blocks: Vec<String>,
    pub tokens: Vec<String>,
}

impl Document {
    /// Parse `text` into blocks and tokens. Never fails; malformed input
    /// yields a degenerate document.
    pub fn parse(text: &str, options: &EngineOptions) -> Self {
        let mut blocks = Vec::new();
        let mut current = String::new();
        let mut syntax_lines: Vec<&str> = Vec::new();
        let mut in_syntax = false;

        for raw in text.split_inclusive('\n') {
            let line = raw.trim_end_matches('\n').trim_end_matches('\r');
            let terminated = raw.ends_with('\n');

            if in_syntax {
                syntax_lines.push(line);
                continue;
            }
            if is_data_separator(line) {
                blocks.push(std::mem::take(&mut current));
                continue;
            }
            if line.starts_with(SECTION_SEPARATOR) {
                in_syntax = true;
                continue;
            }

            current.push_str(line);
            if terminated {
                current.push('\n');
            }
        }
        blocks.push(current);

        if options.trim_trailing_newlines {
            for block in &mut blocks {
                *block = block.trim().to_string();
            }
        }

        let tokens: Vec<String> = syntax_lines
            .iter()
            .flat_map(|line| line.trim().split(' '))
            .map(str::to_string)
            .collect();

        debug!(
            blocks = blocks.len(),
            tokens = tokens.len(),
            found_syntax = in_syntax,
            "document parsed"
        );

        Self { blocks, tokens }
    }
}

fn is_data_separator(line: &str) -> bool {
    let mut chars = line.chars();
    chars.next() == Some(DATA_SEPARATOR) && matches!(chars.next(), None | Some(' '))
}
