//! Loads a document once and generates output from it.

use std::io::Write;

use recombine_model::{EngineOptions, GenerationSummary, Result, TemplateError, Warning};
use tracing::{debug, debug_span, info_span};

use crate::combinations::CombinationPlan;
use crate::diagnostics::Diagnostics;
use crate::functions::FunctionRegistry;
use crate::interpret::Interpreter;
use crate::preprocess::Document;
use crate::prompt::Prompter;
use crate::sequence::{Segment, Segments, Sequence, SequenceKind};
use crate::sets::SetRegistry;

/// A loaded document: data blocks, sets and tokens, read-only afterwards.
pub struct Engine {
    options: EngineOptions,
    document: Document,
    sets: SetRegistry,
    functions: &'static FunctionRegistry,
}

impl Engine {
    /// Parse `text` and build its sets.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::MalformedSet`] when a set block cannot be
    /// parsed.
    pub fn load(text: &str, options: EngineOptions) -> Result<Self> {
        let document = Document::parse(text, &options);
        let sets = SetRegistry::build(&document.blocks, &options)?;
        debug!(
            blocks = document.blocks.len(),
            sets = sets.len(),
            tokens = document.tokens.len(),
            "engine loaded"
        );
        Ok(Self {
            options,
            document,
            sets,
            functions: FunctionRegistry::builtin(),
        })
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn sets(&self) -> &SetRegistry {
        &self.sets
    }

    pub fn functions(&self) -> &'static FunctionRegistry {
        self.functions
    }

    /// Interpret the token stream, writing results to `out` in token order.
    ///
    /// Plain tokens are written as they are resolved, prompt sequences ask
    /// `prompter` and write the transformed answer, combination sequences
    /// write one line per combination.
    ///
    /// # Errors
    ///
    /// Unknown sets, oversized truncations, prompter failures and write
    /// failures abort the run. Per-token problems are returned as warnings in
    /// the summary instead.
    pub fn generate<W, P>(&self, out: &mut W, prompter: &mut P) -> Result<GenerationSummary>
    where
        W: Write + ?Sized,
        P: Prompter + ?Sized,
    {
        let _span = info_span!("generate", tokens = self.document.tokens.len()).entered();
        let interpreter = Interpreter::new(&self.document.blocks, self.functions, &self.options);
        let mut run = Run {
            out,
            diagnostics: Diagnostics::new(),
            summary: GenerationSummary::default(),
        };

        for segment in Segments::new(&self.document.tokens) {
            match segment {
                Segment::Token(token) => {
                    let text = interpreter.interpret(token, &mut run.diagnostics);
                    run.write(&text)?;
                    run.summary.tokens += 1;
                }
                Segment::Sequence(sequence) => match sequence.kind {
                    SequenceKind::User => self.answer_prompt(sequence, prompter, &mut run)?,
                    SequenceKind::Set => self.expand_combinations(sequence, &mut run)?,
                },
                Segment::Unterminated(sequence) => {
                    run.diagnostics.report(Warning::UnterminatedSequence {
                        opener: sequence.opener().to_string(),
                    });
                }
            }
        }
        run.out.flush()?;

        let mut summary = run.summary;
        summary.warnings = run.diagnostics.into_warnings();
        Ok(summary)
    }

    /// Generate into a string.
    pub fn generate_to_string<P>(&self, prompter: &mut P) -> Result<(String, GenerationSummary)>
    where
        P: Prompter + ?Sized,
    {
        let mut buffer = Vec::new();
        let summary = self.generate(&mut buffer, prompter)?;
        let text = String::from_utf8(buffer).map_err(|error| {
            TemplateError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, error))
        })?;
        Ok((text, summary))
    }

    fn answer_prompt<W, P>(
        &self,
        sequence: Sequence<'_>,
        prompter: &mut P,
        run: &mut Run<'_, W>,
    ) -> Result<()>
    where
        W: Write + ?Sized,
        P: Prompter + ?Sized,
    {
        let _span = debug_span!("sequence", kind = "prompt").entered();
        let question = sequence.middle().join(" ");
        let question = self
            .functions
            .transform(&question, sequence.opener(), &mut run.diagnostics);
        let answer = prompter
            .prompt(&question)
            .map_err(|source| TemplateError::Prompt {
                prompt: question.clone(),
                source,
            })?;
        let value = self
            .functions
            .transform(&answer, sequence.closer(), &mut run.diagnostics);
        run.write(&value)?;
        run.summary.prompts += 1;
        Ok(())
    }

    fn expand_combinations<W>(&self, sequence: Sequence<'_>, run: &mut Run<'_, W>) -> Result<()>
    where
        W: Write + ?Sized,
    {
        let _span = debug_span!("sequence", kind = "combination").entered();
        let plan = CombinationPlan::new(
            sequence.middle(),
            &self.sets,
            self.functions,
            &mut run.diagnostics,
        )?;
        let mut lines = 0usize;
        for line in plan.lines() {
            run.write(&line)?;
            run.write("\n")?;
            lines += 1;
        }
        debug!(template = plan.template(), lines, "combinations written");
        run.summary.combination_sequences += 1;
        run.summary.combination_lines += lines;
        Ok(())
    }
}

/// Mutable state of one generation run.
struct Run<'o, W: ?Sized> {
    out: &'o mut W,
    diagnostics: Diagnostics,
    summary: GenerationSummary,
}

impl<W: Write + ?Sized> Run<'_, W> {
    fn write(&mut self, text: &str) -> Result<()> {
        self.out.write_all(text.as_bytes())?;
        self.summary.bytes_written += text.len();
        Ok(())
    }
}
