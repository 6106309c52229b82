//! Transform functions addressable from token modifiers.
//!
//! A token such as `2.strip.caps` resolves its atom first and then runs the
//! named functions left to right. The set of functions is fixed; the
//! registry is built once and shared.
//!
//! # Built-in functions
//!
//! | Name          | Effect                                                  |
//! |---------------|---------------------------------------------------------|
//! | `strip`       | trim surrounding whitespace                             |
//! | `caps`        | uppercase                                               |
//! | `lower`       | lowercase                                               |
//! | `title`       | capitalize the first letter of every word               |
//! | `linktitle`   | title-case the first line and prefix it with `- `       |
//! | `rpl_newline` | drop one space directly after each newline              |
//! | `gametag`     | wrap each word as `[as-word]`, `None` for empty input   |

use std::collections::BTreeMap;
use std::sync::OnceLock;

use recombine_model::Warning;
use recombine_model::syntax::split_token;

use crate::diagnostics::Diagnostics;

/// A pure text-to-text transform.
pub type TransformFn = fn(&str) -> String;

/// Prefix placed inside the brackets by `gametag`.
pub const TAG_PREFIX: &str = "as-";

/// Returned by `gametag` for empty or `none` input.
pub const NO_TAG: &str = "None";

/// A registered transform and its human-readable description.
#[derive(Clone, Copy)]
pub struct FunctionEntry {
    pub name: &'static str,
    pub description: &'static str,
    pub function: TransformFn,
}

/// Immutable name-to-function lookup table.
pub struct FunctionRegistry {
    functions: BTreeMap<&'static str, FunctionEntry>,
}

static BUILTIN: OnceLock<FunctionRegistry> = OnceLock::new();

impl FunctionRegistry {
    /// Returns the shared registry of built-in functions.
    pub fn builtin() -> &'static FunctionRegistry {
        BUILTIN.get_or_init(build_builtin_registry)
    }

    pub fn get(&self, name: &str) -> Option<TransformFn> {
        self.functions.get(name).map(|entry| entry.function)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Entries in name order.
    pub fn entries(&self) -> impl Iterator<Item = &FunctionEntry> + '_ {
        self.functions.values()
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Apply `names` to `text` in order.
    ///
    /// Unknown names are reported and skipped; the text passes through that
    /// step unchanged.
    pub fn apply<S: AsRef<str>>(
        &self,
        text: &str,
        names: &[S],
        diagnostics: &mut Diagnostics,
    ) -> String {
        let mut result = text.to_string();
        for name in names {
            let name = name.as_ref();
            match self.get(name) {
                Some(function) => result = function(&result),
                None => diagnostics.report(Warning::UnknownFunction {
                    name: name.to_string(),
                }),
            }
        }
        result
    }

    /// Apply the modifiers found after the first dot of `token` to `text`.
    pub fn transform(&self, text: &str, token: &str, diagnostics: &mut Diagnostics) -> String {
        let (_, names) = split_token(token);
        if names.is_empty() {
            return text.to_string();
        }
        self.apply(text, &names, diagnostics)
    }

    fn register(&mut self, name: &'static str, description: &'static str, function: TransformFn) {
        self.functions.insert(
            name,
            FunctionEntry {
                name,
                description,
                function,
            },
        );
    }
}

fn build_builtin_registry() -> FunctionRegistry {
    let mut registry = FunctionRegistry {
        functions: BTreeMap::new(),
    };
    registry.register("strip", "Trim surrounding whitespace", strip);
    registry.register("caps", "Convert to uppercase", caps);
    registry.register("lower", "Convert to lowercase", lower);
    registry.register("title", "Capitalize the first letter of every word", title);
    registry.register(
        "linktitle",
        "Title-case the first line and prefix it with \"- \"",
        link_title,
    );
    registry.register(
        "rpl_newline",
        "Remove a single space after each newline",
        collapse_newline_indent,
    );
    registry.register(
        "gametag",
        "Wrap each word as [as-word]; \"None\" for empty input",
        game_tag,
    );
    registry
}

pub fn strip(text: &str) -> String {
    text.trim().to_string()
}

pub fn caps(text: &str) -> String {
    text.to_uppercase()
}

pub fn lower(text: &str) -> String {
    text.to_lowercase()
}

/// Uppercase the first letter of every run of letters, lowercase the rest.
///
/// Any non-letter starts a new word, so `they're` becomes `They'Re`.
pub fn title(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut in_word = false;
    for ch in text.chars() {
        if ch.is_alphabetic() {
            if in_word {
                result.extend(ch.to_lowercase());
            } else {
                result.extend(ch.to_uppercase());
            }
            in_word = true;
        } else {
            result.push(ch);
            in_word = false;
        }
    }
    result
}

pub fn link_title(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    match text.split_once('\n') {
        Some((first, rest)) => format!("- {}\n{rest}", title(first)),
        None => format!("- {}", title(text)),
    }
}

pub fn collapse_newline_indent(text: &str) -> String {
    text.replace("\n ", "\n")
}

pub fn game_tag(text: &str) -> String {
    if text.is_empty() || text == "none" {
        return NO_TAG.to_string();
    }
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() > 1 {
        words
            .iter()
            .map(|word| format!("[{TAG_PREFIX}{word}]"))
            .collect()
    } else {
        format!("[{TAG_PREFIX}{text}]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_registry_has_every_function() {
        let registry = FunctionRegistry::builtin();
        for name in [
            "strip",
            "caps",
            "lower",
            "title",
            "linktitle",
            "rpl_newline",
            "gametag",
        ] {
            assert!(registry.contains(name), "missing {name}");
        }
        assert_eq!(registry.len(), 7);
    }

    #[test]
    fn title_handles_word_boundaries() {
        assert_eq!(title("hello wORLD"), "Hello World");
        assert_eq!(title("they're"), "They'Re");
        assert_eq!(title("1st place"), "1St Place");
        assert_eq!(title(""), "");
    }

    #[test]
    fn link_title_only_touches_first_line() {
        assert_eq!(link_title("some link\nsecond line"), "- Some Link\nsecond line");
        assert_eq!(link_title("one"), "- One");
        assert_eq!(link_title(""), "");
    }

    #[test]
    fn collapse_newline_indent_removes_one_space() {
        assert_eq!(collapse_newline_indent("a\n b\n  c"), "a\nb\n c");
    }

    #[test]
    fn game_tag_formats_words() {
        assert_eq!(game_tag(""), "None");
        assert_eq!(game_tag("none"), "None");
        assert_eq!(game_tag("mono"), "[as-mono]");
        assert_eq!(game_tag("mono pro"), "[as-mono][as-pro]");
        assert_eq!(game_tag("  mono   pro "), "[as-mono][as-pro]");
    }

    #[test]
    fn transform_applies_in_order() {
        let registry = FunctionRegistry::builtin();
        let mut diagnostics = Diagnostics::new();
        assert_eq!(
            registry.transform("  mixed Case ", "x.strip.caps", &mut diagnostics),
            "MIXED CASE"
        );
        assert_eq!(
            registry.transform("hello", "x.caps.linktitle", &mut diagnostics),
            "- Hello"
        );
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn unknown_function_passes_text_through() {
        let registry = FunctionRegistry::builtin();
        let mut diagnostics = Diagnostics::new();
        let result = registry.transform("text", "text.foo", &mut diagnostics);
        assert_eq!(result, "text");
        assert_eq!(
            diagnostics.warnings(),
            &[Warning::UnknownFunction {
                name: "foo".to_string()
            }]
        );
    }

    #[test]
    fn unknown_function_does_not_stop_later_steps() {
        let registry = FunctionRegistry::builtin();
        let mut diagnostics = Diagnostics::new();
        let result = registry.transform("text", "text.foo.caps", &mut diagnostics);
        assert_eq!(result, "TEXT");
        assert_eq!(diagnostics.warnings().len(), 1);
    }
}
