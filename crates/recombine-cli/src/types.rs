use std::path::PathBuf;

use recombine_model::{EngineOptions, GenerationSummary, ValueSet};
use serde::Serialize;

#[derive(Debug)]
pub struct GenerateResult {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub options: EngineOptions,
    pub summary: GenerationSummary,
}

#[derive(Debug, Serialize)]
pub struct InspectReport {
    pub input: PathBuf,
    pub config: Option<PathBuf>,
    pub options: EngineOptions,
    pub blocks: Vec<BlockInfo>,
    pub sets: Vec<ValueSet>,
    pub tokens: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct BlockInfo {
    pub index: usize,
    pub kind: BlockKind,
    pub lines: usize,
    pub preview: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    Text,
    Set,
}
