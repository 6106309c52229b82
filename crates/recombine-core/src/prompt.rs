//! The interactive value collaborator.
//!
//! A `~ prompt text ~` sequence blocks generation until a [`Prompter`]
//! returns a value. The terminal implementation lives in the CLI; this
//! module provides the trait and a scripted implementation.

use std::collections::VecDeque;
use std::io;

/// Supplies a value for a prompt, synchronously.
pub trait Prompter {
    /// Return the answer to `text`.
    ///
    /// # Errors
    ///
    /// Returns an error when no answer can be obtained (closed input, no
    /// scripted answers left).
    fn prompt(&mut self, text: &str) -> io::Result<String>;
}

impl<F> Prompter for F
where
    F: FnMut(&str) -> io::Result<String>,
{
    fn prompt(&mut self, text: &str) -> io::Result<String> {
        self(text)
    }
}

/// Answers prompts from a fixed list, in order, and records what was asked.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    asked: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            asked: Vec::new(),
        }
    }

    /// Prompts received so far, in order.
    pub fn asked(&self) -> &[String] {
        &self.asked
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl Prompter for ScriptedPrompter {
    fn prompt(&mut self, text: &str) -> io::Result<String> {
        self.asked.push(text.to_string());
        self.answers.pop_front().ok_or_else(|| {
            io::Error::new(io::ErrorKind::UnexpectedEof, "no scripted answers left")
        })
    }
}
