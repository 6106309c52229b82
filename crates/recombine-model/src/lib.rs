pub mod error;
pub mod options;
pub mod report;
pub mod set;
pub mod syntax;
pub mod warning;

pub use error::{Result, TemplateError};
pub use options::{EngineOptions, SetOrder};
pub use report::GenerationSummary;
pub use set::ValueSet;
pub use warning::Warning;
