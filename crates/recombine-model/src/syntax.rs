//! Sentinel characters and the character-code table of the template syntax.
//!
//! # Document layout
//!
//! ```text
//! first data block
//! %
//! second data block
//! %
//! #colors
//! red, blue, red
//! %%
//! 0 s 1 n @ #colors.caps @
//! ```

/// A line starting with this character followed by a space or line end
/// opens a new data block.
pub const DATA_SEPARATOR: char = '%';

/// A line starting with this prefix ends the data section.
pub const SECTION_SEPARATOR: &str = "%%";

/// First character of a data block that declares a set, and of a set
/// reference inside a combination template.
pub const SET_SENTINEL: char = '#';

/// Opens and closes an interactive prompt sequence.
pub const USER_PROMPT_SENTINEL: char = '~';

/// Opens and closes a combination sequence.
pub const SET_PROMPT_SENTINEL: char = '@';

/// Separates a token's atom from its modifiers.
pub const MODIFIER_SEPARATOR: char = '.';

/// Resolve a single-character code atom.
pub fn char_code(atom: &str) -> Option<&'static str> {
    match atom {
        "s" => Some(" "),
        "t" => Some("\t"),
        "n" => Some("\n"),
        _ => None,
    }
}

/// True when `atom` is a non-empty run of ASCII digits.
pub fn is_numeral(atom: &str) -> bool {
    !atom.is_empty() && atom.bytes().all(|b| b.is_ascii_digit())
}

/// Split a token into its atom and the modifier names that follow it.
///
/// `"3.strip.caps"` yields `("3", ["strip", "caps"])`; a trailing dot yields
/// an empty modifier name.
pub fn split_token(token: &str) -> (&str, Vec<&str>) {
    let mut parts = token.split(MODIFIER_SEPARATOR);
    let atom = parts.next().unwrap_or_default();
    (atom, parts.collect())
}
