//! Resolution of a single syntax token.

use recombine_model::syntax::{char_code, is_numeral, split_token};
use recombine_model::{EngineOptions, Warning};

use crate::diagnostics::Diagnostics;
use crate::functions::FunctionRegistry;

/// Resolves tokens against the data blocks of one document.
pub struct Interpreter<'a> {
    blocks: &'a [String],
    functions: &'a FunctionRegistry,
    apply_transforms: bool,
}

impl<'a> Interpreter<'a> {
    pub fn new(
        blocks: &'a [String],
        functions: &'a FunctionRegistry,
        options: &EngineOptions,
    ) -> Self {
        Self {
            blocks,
            functions,
            apply_transforms: options.apply_transforms,
        }
    }

    /// Resolve `token` to text.
    ///
    /// The atom is a character code (`s`, `t`, `n`), a data block index, or
    /// literal text, in that priority. An index past the last block is
    /// reported and resolves to the empty string. The token's modifiers are
    /// then applied unless transforms are disabled.
    pub fn interpret(&self, token: &str, diagnostics: &mut Diagnostics) -> String {
        let (atom, _) = split_token(token);
        let resolved = self.resolve_atom(atom, diagnostics);
        if self.apply_transforms {
            self.functions.transform(resolved, token, diagnostics)
        } else {
            resolved.to_string()
        }
    }

    fn resolve_atom<'t>(&self, atom: &'t str, diagnostics: &mut Diagnostics) -> &'t str
    where
        'a: 't,
    {
        if let Some(text) = char_code(atom) {
            return text;
        }
        if is_numeral(atom) {
            let block = atom
                .parse::<usize>()
                .ok()
                .and_then(|index| self.blocks.get(index));
            return match block {
                Some(block) => block.as_str(),
                None => {
                    diagnostics.report(Warning::IndexOutOfRange {
                        index: atom.to_string(),
                        len: self.blocks.len(),
                    });
                    ""
                }
            };
        }
        atom
    }
}
