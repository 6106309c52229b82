//! Configuration options for template generation.

use serde::{Deserialize, Serialize};

/// How the items of a set are ordered once de-duplicated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SetOrder {
    /// Lexicographic (byte-wise) order.
    #[default]
    Sorted,
    /// Shuffled once at load time.
    Random,
}

/// Options controlling document loading and generation.
///
/// Fixed when the engine is constructed; nothing here changes during a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineOptions {
    /// Ordering applied to every set.
    pub set_order: SetOrder,

    /// Seed for [`SetOrder::Random`]. Without one the shuffle differs per run.
    pub seed: Option<u64>,

    /// Trim surrounding whitespace, trailing newlines included, from every
    /// data block after reading.
    pub trim_trailing_newlines: bool,

    /// Apply the modifier pipeline of plain tokens.
    ///
    /// Sequences always apply their modifiers.
    pub apply_transforms: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            set_order: SetOrder::Sorted,
            seed: None,
            trim_trailing_newlines: false,
            apply_transforms: true,
        }
    }
}

impl EngineOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_set_order(mut self, order: SetOrder) -> Self {
        self.set_order = order;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_trim_trailing_newlines(mut self, enable: bool) -> Self {
        self.trim_trailing_newlines = enable;
        self
    }

    #[must_use]
    pub fn with_apply_transforms(mut self, enable: bool) -> Self {
        self.apply_transforms = enable;
        self
    }
}
