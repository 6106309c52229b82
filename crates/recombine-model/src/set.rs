use serde::Serialize;

use crate::options::SetOrder;

/// A named, de-duplicated, ordered collection of items declared by a data block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueSet {
    /// Position of the owning data block.
    pub index: usize,
    pub name: String,
    /// Unique items in their final order.
    pub items: Vec<String>,
    pub order: SetOrder,
}

impl ValueSet {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
