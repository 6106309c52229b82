use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::{info, info_span};

use recombine_cli::config::{EngineOverrides, discover_config, resolve_options};
use recombine_cli::io::{SourceDocument, open_output, read_document};
use recombine_cli::prompt::TerminalPrompter;
use recombine_core::{Engine, FunctionRegistry};
use recombine_model::{EngineOptions, SetOrder};

use crate::cli::{EngineArgs, GenerateArgs, InspectArgs, SetOrderArg};
use crate::summary::apply_table_style;
use crate::types::{BlockInfo, BlockKind, GenerateResult, InspectReport};

const PREVIEW_CHARS: usize = 48;

pub fn run_functions() -> Result<()> {
    let registry = FunctionRegistry::builtin();
    let mut table = Table::new();
    table.set_header(vec!["Function", "Description"]);
    apply_table_style(&mut table);
    for entry in registry.entries() {
        table.add_row(vec![entry.name, entry.description]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_generate(args: &GenerateArgs) -> Result<GenerateResult> {
    let start = Instant::now();
    let span = info_span!("generate_command", input = %args.input.display());
    let _guard = span.enter();

    let loaded = load_engine(&args.input, &args.engine)?;
    let mut out = match &args.output {
        Some(path) => open_output(Some(path), loaded.document.had_bom)
            .with_context(|| format!("create {}", path.display()))?,
        None => open_output(None, loaded.document.had_bom).context("open stdout")?,
    };
    let mut prompter = TerminalPrompter::stdio(args.answers.iter().cloned());
    let summary = loaded
        .engine
        .generate(out.as_mut(), &mut prompter)
        .with_context(|| format!("generate {}", args.input.display()))?;
    drop(out);

    info!(
        tokens = summary.tokens,
        prompts = summary.prompts,
        lines = summary.combination_lines,
        bytes = summary.bytes_written,
        warnings = summary.warning_count(),
        duration_ms = start.elapsed().as_millis(),
        "generation complete"
    );

    Ok(GenerateResult {
        input: args.input.clone(),
        output: args.output.clone(),
        config: loaded.config,
        options: loaded.engine.options().clone(),
        summary,
    })
}

pub fn run_inspect(args: &InspectArgs) -> Result<InspectReport> {
    let loaded = load_engine(&args.input, &args.engine)?;
    let engine = &loaded.engine;
    let blocks = engine
        .document()
        .blocks
        .iter()
        .enumerate()
        .map(|(index, block)| BlockInfo {
            index,
            kind: if engine.sets().get(index).is_some() {
                BlockKind::Set
            } else {
                BlockKind::Text
            },
            lines: block.lines().count(),
            preview: preview(block),
        })
        .collect();
    Ok(InspectReport {
        input: args.input.clone(),
        config: loaded.config,
        options: engine.options().clone(),
        blocks,
        sets: engine.sets().iter().cloned().collect(),
        tokens: engine.document().tokens.clone(),
    })
}

struct LoadedEngine {
    document: SourceDocument,
    config: Option<PathBuf>,
    engine: Engine,
}

fn load_engine(input: &Path, args: &EngineArgs) -> Result<LoadedEngine> {
    let document = read_document(input)?;
    let (config, options) = engine_options(input, args)?;
    let engine = Engine::load(&document.text, options)
        .with_context(|| format!("load {}", input.display()))?;
    Ok(LoadedEngine {
        document,
        config,
        engine,
    })
}

fn engine_options(input: &Path, args: &EngineArgs) -> Result<(Option<PathBuf>, EngineOptions)> {
    let discovered = discover_config(args.config.as_deref(), input)?;
    let (path, config) = match discovered {
        Some((path, config)) => (Some(path), Some(config)),
        None => (None, None),
    };
    let overrides = EngineOverrides {
        set_order: args.set_order.map(|order| match order {
            SetOrderArg::Sorted => SetOrder::Sorted,
            SetOrderArg::Random => SetOrder::Random,
        }),
        seed: args.seed,
        trim_trailing_newlines: args.trim_trailing_newlines,
        no_transforms: args.no_transforms,
    };
    Ok((path, resolve_options(config, &overrides)))
}

fn preview(block: &str) -> String {
    let flat = block.trim_end().replace('\n', " \u{21b5} ");
    if flat.chars().count() <= PREVIEW_CHARS {
        return flat;
    }
    let mut cut: String = flat.chars().take(PREVIEW_CHARS).collect();
    cut.push('\u{2026}');
    cut
}
