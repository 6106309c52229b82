//! Splits the token stream into plain tokens and bracketed sequences.
//!
//! A token whose first character is `~` or `@` opens a sequence; the next
//! token starting with the same character closes it. Sequences do not nest
//! and a token starting with the other sentinel is an ordinary member.

use recombine_model::syntax::{SET_PROMPT_SENTINEL, USER_PROMPT_SENTINEL};
use tracing::trace;

/// Which collaborator a sequence is dispatched to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceKind {
    /// `~ ... ~`: ask the prompter for a value.
    User,
    /// `@ ... @`: expand set combinations.
    Set,
}

impl SequenceKind {
    /// The kind of sequence `token` opens or closes, if any.
    pub fn of(token: &str) -> Option<Self> {
        match token.chars().next() {
            Some(USER_PROMPT_SENTINEL) => Some(Self::User),
            Some(SET_PROMPT_SENTINEL) => Some(Self::Set),
            _ => None,
        }
    }
}

/// A bracketed run of tokens, boundary tokens included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sequence<'t> {
    pub kind: SequenceKind,
    pub tokens: &'t [String],
}

impl<'t> Sequence<'t> {
    pub fn opener(&self) -> &'t str {
        self.tokens.first().map(String::as_str).unwrap_or_default()
    }

    pub fn closer(&self) -> &'t str {
        self.tokens.last().map(String::as_str).unwrap_or_default()
    }

    /// Tokens between the two boundary tokens.
    pub fn middle(&self) -> &'t [String] {
        match self.tokens.len() {
            0 | 1 => &[],
            len => &self.tokens[1..len - 1],
        }
    }
}

/// One unit of work produced by [`Segments`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'t> {
    /// A token outside any sequence.
    Token(&'t str),
    /// A closed sequence.
    Sequence(Sequence<'t>),
    /// A sequence still open when the stream ended.
    Unterminated(Sequence<'t>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    InUserSequence,
    InSetSequence,
}

impl State {
    fn entered(kind: SequenceKind) -> Self {
        match kind {
            SequenceKind::User => Self::InUserSequence,
            SequenceKind::Set => Self::InSetSequence,
        }
    }

    fn closes_on(self, kind: SequenceKind) -> bool {
        matches!(
            (self, kind),
            (Self::InUserSequence, SequenceKind::User) | (Self::InSetSequence, SequenceKind::Set)
        )
    }
}

/// Iterator over the [`Segment`]s of a token stream, in order.
pub struct Segments<'t> {
    tokens: &'t [String],
    position: usize,
}

impl<'t> Segments<'t> {
    pub fn new(tokens: &'t [String]) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }
}

impl<'t> Iterator for Segments<'t> {
    type Item = Segment<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        let tokens = self.tokens;
        let start = self.position;
        let mut state = State::Idle;
        let mut opened = SequenceKind::User;

        while let Some(token) = tokens.get(self.position) {
            self.position += 1;
            let kind = SequenceKind::of(token);
            match (state, kind) {
                (State::Idle, None) => return Some(Segment::Token(token)),
                (State::Idle, Some(kind)) => {
                    trace!(token = %token, ?kind, "sequence opened");
                    state = State::entered(kind);
                    opened = kind;
                }
                (current, Some(kind)) if current.closes_on(kind) => {
                    trace!(token = %token, ?kind, "sequence closed");
                    return Some(Segment::Sequence(Sequence {
                        kind,
                        tokens: &tokens[start..self.position],
                    }));
                }
                _ => {}
            }
        }

        match state {
            State::Idle => None,
            State::InUserSequence | State::InSetSequence => {
                Some(Segment::Unterminated(Sequence {
                    kind: opened,
                    tokens: &tokens[start..],
                }))
            }
        }
    }
}
