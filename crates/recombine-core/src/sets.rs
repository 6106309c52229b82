//! Named value sets declared by data blocks.
//!
//! A block whose first character is `#` declares a set: the first line holds
//! the name, every following line holds comma-separated items.
//!
//! ```text
//! #colors
//! red, blue
//! green, red
//! ```
//!
//! Items are trimmed, empty entries dropped and duplicates collapsed, then
//! sorted or shuffled according to [`EngineOptions::set_order`].

use std::collections::{BTreeMap, BTreeSet, HashMap};

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use recombine_model::syntax::{SET_SENTINEL, is_numeral};
use recombine_model::{EngineOptions, Result, SetOrder, TemplateError, ValueSet};
use tracing::{debug, warn};

/// Sets addressable by owning block index or by name.
#[derive(Debug, Clone, Default)]
pub struct SetRegistry {
    by_index: BTreeMap<usize, ValueSet>,
    by_name: HashMap<String, usize>,
}

impl SetRegistry {
    /// Build every set declared in `blocks`.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::MalformedSet`] for a set block without a line
    /// break after its name.
    pub fn build<S: AsRef<str>>(blocks: &[S], options: &EngineOptions) -> Result<Self> {
        let mut rng = match (options.set_order, options.seed) {
            (SetOrder::Random, Some(seed)) => Some(StdRng::seed_from_u64(seed)),
            (SetOrder::Random, None) => Some(StdRng::from_entropy()),
            (SetOrder::Sorted, _) => None,
        };

        let mut registry = Self::default();
        for (index, block) in blocks.iter().enumerate() {
            let block = block.as_ref();
            if !block.starts_with(SET_SENTINEL) {
                continue;
            }
            let (name, mut items) = parse_set_block(index, block)?;
            match rng.as_mut() {
                Some(rng) => items.shuffle(rng),
                None => items.sort(),
            }
            debug!(index, name = %name, items = items.len(), "set loaded");

            if let Some(previous) = registry.by_name.insert(name.clone(), index) {
                warn!(
                    name = %name,
                    previous,
                    index,
                    "set name declared twice; the later block wins"
                );
            }
            registry.by_index.insert(
                index,
                ValueSet {
                    index,
                    name,
                    items,
                    order: options.set_order,
                },
            );
        }
        Ok(registry)
    }

    pub fn get(&self, index: usize) -> Option<&ValueSet> {
        self.by_index.get(&index)
    }

    pub fn get_by_name(&self, name: &str) -> Option<&ValueSet> {
        self.by_name
            .get(name)
            .and_then(|index| self.by_index.get(index))
    }

    /// Look a set up by block index first (for numerals), then by name.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::UnknownSet`] when both lookups miss.
    pub fn resolve(&self, reference: &str) -> Result<&ValueSet> {
        let by_index = if is_numeral(reference) {
            reference
                .parse::<usize>()
                .ok()
                .and_then(|index| self.get(index))
        } else {
            None
        };
        by_index
            .or_else(|| self.get_by_name(reference))
            .ok_or_else(|| TemplateError::UnknownSet {
                reference: reference.to_string(),
            })
    }

    /// Sets in block order.
    pub fn iter(&self) -> impl Iterator<Item = &ValueSet> + '_ {
        self.by_index.values()
    }

    pub fn len(&self) -> usize {
        self.by_index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_index.is_empty()
    }
}

/// Split a set block into its name and unique, unordered items.
fn parse_set_block(index: usize, block: &str) -> Result<(String, Vec<String>)> {
    let (header, rest) = block
        .split_once('\n')
        .ok_or(TemplateError::MalformedSet { index })?;
    let name = header
        .split(SET_SENTINEL)
        .nth(1)
        .unwrap_or_default()
        .trim()
        .to_string();

    let unique: BTreeSet<&str> = rest
        .lines()
        .flat_map(|line| line.split(','))
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .collect();
    let items = unique.into_iter().map(str::to_string).collect();
    Ok((name, items))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted() -> EngineOptions {
        EngineOptions::default()
    }

    #[test]
    fn builds_sorted_unique_items() {
        let blocks = ["intro\n", "#colors\nred, blue\ngreen,red,, \n"];
        let registry = SetRegistry::build(&blocks, &sorted()).unwrap();

        let set = registry.get(1).unwrap();
        assert_eq!(set.name, "colors");
        assert_eq!(set.items, vec!["blue", "green", "red"]);
        assert!(registry.get(0).is_none());
    }

    #[test]
    fn resolves_by_index_and_name() {
        let blocks = ["#a\nx\n", "#b\ny, z\n"];
        let registry = SetRegistry::build(&blocks, &sorted()).unwrap();

        assert_eq!(registry.resolve("1").unwrap().name, "b");
        assert_eq!(registry.resolve("a").unwrap().index, 0);
        assert!(matches!(
            registry.resolve("missing"),
            Err(TemplateError::UnknownSet { .. })
        ));
        assert!(matches!(
            registry.resolve("7"),
            Err(TemplateError::UnknownSet { .. })
        ));
    }

    #[test]
    fn numeral_name_falls_back_to_name_lookup() {
        let blocks = ["plain\n", "#5\nfive\n"];
        let registry = SetRegistry::build(&blocks, &sorted()).unwrap();
        assert_eq!(registry.resolve("5").unwrap().items, vec!["five"]);
    }

    #[test]
    fn name_stops_at_second_sentinel() {
        let blocks = ["#colors# primary\nred\n"];
        let registry = SetRegistry::build(&blocks, &sorted()).unwrap();
        assert!(registry.get_by_name("colors").is_some());
    }

    #[test]
    fn block_without_item_lines_is_malformed() {
        let blocks = ["text\n", "#colors"];
        let error = SetRegistry::build(&blocks, &sorted()).unwrap_err();
        assert!(matches!(error, TemplateError::MalformedSet { index: 1 }));
    }

    #[test]
    fn header_only_block_is_an_empty_set() {
        let blocks = ["#empty\n"];
        let registry = SetRegistry::build(&blocks, &sorted()).unwrap();
        assert!(registry.get(0).unwrap().is_empty());
    }

    #[test]
    fn later_duplicate_name_wins() {
        let blocks = ["#dup\na\n", "#dup\nb\n"];
        let registry = SetRegistry::build(&blocks, &sorted()).unwrap();
        assert_eq!(registry.get_by_name("dup").unwrap().index, 1);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn seeded_random_order_is_reproducible() {
        let blocks = ["#n\na, b, c, d, e, f, g, h\n"];
        let options = EngineOptions::default()
            .with_set_order(SetOrder::Random)
            .with_seed(Some(11));

        let first = SetRegistry::build(&blocks, &options).unwrap();
        let second = SetRegistry::build(&blocks, &options).unwrap();
        let items = &first.get(0).unwrap().items;
        assert_eq!(items, &second.get(0).unwrap().items);

        let mut sorted_items = items.clone();
        sorted_items.sort();
        assert_eq!(sorted_items, vec!["a", "b", "c", "d", "e", "f", "g", "h"]);
        assert_eq!(first.get(0).unwrap().order, SetOrder::Random);
    }
}
