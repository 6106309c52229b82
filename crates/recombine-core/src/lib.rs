//! Template interpretation engine.
//!
//! This crate turns a loaded document into generated text:
//!
//! - **preprocess**: split the source into data blocks and syntax tokens
//! - **sets**: named value sets declared by data blocks
//! - **functions**: the fixed registry of text transforms
//! - **interpret**: resolve one token against the data blocks
//! - **sequence**: group prompt (`~`) and combination (`@`) sequences
//! - **combinations**: odometer-driven expansion of set references
//! - **engine**: the facade tying everything to an output sink
//!
//! # Example
//!
//! ```ignore
//! use recombine_core::{Engine, ScriptedPrompter};
//! use recombine_model::EngineOptions;
//!
//! let engine = Engine::load("#colors\nred, blue\n%%\n@ #colors.caps @\n", EngineOptions::default())?;
//! let (text, summary) = engine.generate_to_string(&mut ScriptedPrompter::default())?;
//! assert_eq!(text, "BLUE\nRED\n");
//! ```

pub mod combinations;
pub mod diagnostics;
pub mod engine;
pub mod functions;
pub mod interpret;
pub mod preprocess;
pub mod prompt;
pub mod sequence;
pub mod sets;

pub use combinations::{CombinationPlan, Odometer, SetReference};
pub use diagnostics::Diagnostics;
pub use engine::Engine;
pub use functions::FunctionRegistry;
pub use interpret::Interpreter;
pub use preprocess::Document;
pub use prompt::{Prompter, ScriptedPrompter};
pub use sets::SetRegistry;
