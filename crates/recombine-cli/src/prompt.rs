//! Terminal prompting for `~ ... ~` sequences.

use std::io::{self, BufRead, Write};

use recombine_core::{Prompter, ScriptedPrompter};
use tracing::debug;

/// Uses scripted answers first, then asks on the terminal.
///
/// The prompt is written to stderr as `"{prompt}: "` so stdout stays free for
/// generated output.
pub struct TerminalPrompter<R, W> {
    scripted: ScriptedPrompter,
    input: R,
    echo: W,
}

impl TerminalPrompter<io::StdinLock<'static>, io::Stderr> {
    pub fn stdio<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(answers, io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> TerminalPrompter<R, W> {
    pub fn new<I, S>(answers: I, input: R, echo: W) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            scripted: ScriptedPrompter::new(answers),
            input,
            echo,
        }
    }

    fn read_line(&mut self, text: &str) -> io::Result<String> {
        write!(self.echo, "{text}: ")?;
        self.echo.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed before an answer was given",
            ));
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(line)
    }
}

impl<R: BufRead, W: Write> Prompter for TerminalPrompter<R, W> {
    fn prompt(&mut self, text: &str) -> io::Result<String> {
        if self.scripted.remaining() > 0 {
            debug!(prompt = text, "using scripted answer");
            return self.scripted.prompt(text);
        }
        self.read_line(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_answers_come_first() {
        let mut echo = Vec::new();
        let mut prompter = TerminalPrompter::new(["a"], "b\r\n".as_bytes(), &mut echo);
        assert_eq!(prompter.prompt("first").unwrap(), "a");
        assert_eq!(prompter.prompt("second").unwrap(), "b");
        drop(prompter);
        assert_eq!(String::from_utf8(echo).unwrap(), "second: ");
    }

    #[test]
    fn closed_input_is_an_error() {
        let mut prompter = TerminalPrompter::new(Vec::<String>::new(), "".as_bytes(), io::sink());
        let error = prompter.prompt("name").unwrap_err();
        assert_eq!(error.kind(), io::ErrorKind::UnexpectedEof);
    }
}
