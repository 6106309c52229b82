//! Combinatorial expansion of set references inside a template.
//!
//! A template is the token run between two `@` sentinels. Every token of
//! the form `#ref[.truncate][.fn]*` refers to a set (by block index or by
//! name). The generator walks a mixed-radix counter over the effective set
//! lengths, first reference varying fastest, and yields one line per
//! combination:
//!
//! ```text
//! template  "#size #color"   sizes = [L, S], colors = [blue, red]
//! lines     "L blue", "S blue", "L red", "S red"
//! ```
//!
//! Substitution replaces every occurrence of a reference's exact token text.
//! Two references written identically therefore always receive the same
//! item. References are replaced in template order, so one reference must
//! not be a substring of a later one (`#c` inside `#c#`) if the two are
//! meant to vary independently; use distinct text such as `#colors` and `#2`.

use recombine_model::syntax::{MODIFIER_SEPARATOR, SET_SENTINEL, is_numeral};
use recombine_model::{Result, TemplateError, Warning};
use tracing::{debug, trace};

use crate::diagnostics::Diagnostics;
use crate::functions::{FunctionRegistry, TransformFn};
use crate::sets::SetRegistry;

/// A set reference token split into its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetReference<'t> {
    /// The full token text, which is what gets substituted.
    pub token: &'t str,
    /// Set index or name.
    pub reference: &'t str,
    /// Modifiers after the reference, truncation included.
    pub modifiers: Vec<&'t str>,
}

impl<'t> SetReference<'t> {
    /// Recognize `#ref`, `#ref#` and either form followed by `.modifier`s.
    pub fn parse(token: &'t str) -> Option<Self> {
        let body = token.strip_prefix(SET_SENTINEL)?;
        let (head, modifiers) = match body.split_once(MODIFIER_SEPARATOR) {
            Some((head, rest)) => (head, rest.split(MODIFIER_SEPARATOR).collect()),
            None => (body, Vec::new()),
        };
        let reference = head.split(SET_SENTINEL).next().unwrap_or_default();
        Some(Self {
            token,
            reference,
            modifiers,
        })
    }
}

/// A reference bound to the already-transformed items it can take.
#[derive(Debug, Clone)]
struct BoundReference<'t> {
    token: &'t str,
    values: Vec<String>,
}

/// A template with every set reference resolved, ready to enumerate.
#[derive(Debug, Clone)]
pub struct CombinationPlan<'t> {
    template: String,
    references: Vec<BoundReference<'t>>,
}

impl<'t> CombinationPlan<'t> {
    /// Resolve the set references found in `tokens`.
    ///
    /// Unknown transform names are reported once here rather than per line.
    ///
    /// # Errors
    ///
    /// - [`TemplateError::UnknownSet`] when a reference matches no set.
    /// - [`TemplateError::TruncationExceedsSet`] when a truncation modifier
    ///   is larger than the set.
    pub fn new<S: AsRef<str>>(
        tokens: &'t [S],
        sets: &SetRegistry,
        functions: &FunctionRegistry,
        diagnostics: &mut Diagnostics,
    ) -> Result<Self> {
        let template = tokens
            .iter()
            .map(S::as_ref)
            .collect::<Vec<&str>>()
            .join(" ");

        let mut references = Vec::new();
        for token in tokens {
            let Some(parsed) = SetReference::parse(token.as_ref()) else {
                continue;
            };
            references.push(bind_reference(&parsed, sets, functions, diagnostics)?);
        }

        debug!(
            template = %template,
            references = references.len(),
            "combination plan built"
        );
        Ok(Self {
            template,
            references,
        })
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// Effective length of each reference, in template order.
    pub fn lengths(&self) -> Vec<usize> {
        self.references
            .iter()
            .map(|reference| reference.values.len())
            .collect()
    }

    /// Number of lines [`Self::lines`] yields, `None` on overflow.
    pub fn combination_count(&self) -> Option<usize> {
        if self.references.is_empty() {
            return Some(0);
        }
        self.lengths()
            .into_iter()
            .try_fold(1usize, usize::checked_mul)
    }

    /// A fresh iterator over the generated lines, in odometer order.
    pub fn lines(&self) -> Lines<'_, 't> {
        Lines {
            plan: self,
            odometer: Odometer::new(self.lengths()),
        }
    }

    fn render(&self, digits: &[usize]) -> String {
        let mut line = self.template.clone();
        for (reference, &digit) in self.references.iter().zip(digits) {
            line = line.replace(reference.token, &reference.values[digit]);
        }
        line
    }
}

fn bind_reference<'t>(
    parsed: &SetReference<'t>,
    sets: &SetRegistry,
    functions: &FunctionRegistry,
    diagnostics: &mut Diagnostics,
) -> Result<BoundReference<'t>> {
    let set = sets.resolve(parsed.reference)?;
    let mut length = set.len();
    let mut modifiers = parsed.modifiers.as_slice();

    if let Some((first, rest)) = modifiers.split_first() {
        if is_numeral(first) {
            let requested = first.parse::<usize>().unwrap_or(usize::MAX);
            if requested > set.len() {
                return Err(TemplateError::TruncationExceedsSet {
                    reference: parsed.token.to_string(),
                    requested,
                    available: set.len(),
                });
            }
            length = requested;
            modifiers = rest;
        }
    }

    let mut chain: Vec<TransformFn> = Vec::with_capacity(modifiers.len());
    for name in modifiers {
        match functions.get(name) {
            Some(function) => chain.push(function),
            None => diagnostics.report(Warning::UnknownFunction {
                name: (*name).to_string(),
            }),
        }
    }

    let values = set.items[..length]
        .iter()
        .map(|item| chain.iter().fold(item.clone(), |text, function| function(&text)))
        .collect();

    Ok(BoundReference {
        token: parsed.token,
        values,
    })
}

/// Lines produced by a [`CombinationPlan`].
pub struct Lines<'p, 't> {
    plan: &'p CombinationPlan<'t>,
    odometer: Odometer,
}

impl Iterator for Lines<'_, '_> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        let digits = self.odometer.next()?;
        trace!(?digits, "combination");
        Some(self.plan.render(&digits))
    }
}

/// Mixed-radix counter over per-position lengths, digit 0 fastest.
///
/// Yields every digit vector exactly once (`product(lengths)` vectors in
/// total) as an owned snapshot. A zero length anywhere yields nothing, and
/// so does an empty `lengths`.
#[derive(Debug, Clone)]
pub struct Odometer {
    lengths: Vec<usize>,
    digits: Vec<usize>,
    exhausted: bool,
}

impl Odometer {
    pub fn new(lengths: Vec<usize>) -> Self {
        let exhausted = lengths.is_empty() || lengths.contains(&0);
        Self {
            digits: vec![0; lengths.len()],
            lengths,
            exhausted,
        }
    }

    fn advance(&mut self) {
        for (digit, &length) in self.digits.iter_mut().zip(&self.lengths) {
            *digit += 1;
            if *digit < length {
                return;
            }
            *digit = 0;
        }
        self.exhausted = true;
    }
}

impl Iterator for Odometer {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        let snapshot = self.digits.clone();
        self.advance();
        Some(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use recombine_model::EngineOptions;

    use super::*;

    fn registry(blocks: &[&str]) -> SetRegistry {
        SetRegistry::build(blocks, &EngineOptions::default()).unwrap()
    }

    fn expand(tokens: &[&str], sets: &SetRegistry) -> Vec<String> {
        let mut diagnostics = Diagnostics::new();
        let plan =
            CombinationPlan::new(tokens, sets, FunctionRegistry::builtin(), &mut diagnostics)
                .unwrap();
        plan.lines().collect()
    }

    #[test]
    fn odometer_order_first_digit_fastest() {
        let digits: Vec<Vec<usize>> = Odometer::new(vec![2, 3]).collect();
        assert_eq!(
            digits,
            vec![
                vec![0, 0],
                vec![1, 0],
                vec![0, 1],
                vec![1, 1],
                vec![0, 2],
                vec![1, 2],
            ]
        );
    }

    #[test]
    fn odometer_edge_lengths() {
        assert_eq!(Odometer::new(vec![1, 1]).count(), 1);
        assert_eq!(Odometer::new(vec![3, 0, 2]).count(), 0);
        assert_eq!(Odometer::new(vec![0]).count(), 0);
        assert_eq!(Odometer::new(vec![]).count(), 0);
        assert_eq!(
            Odometer::new(vec![1, 3]).collect::<Vec<_>>(),
            vec![vec![0, 0], vec![0, 1], vec![0, 2]]
        );
    }

    #[test]
    fn parses_reference_forms() {
        let plain = SetReference::parse("#colors").unwrap();
        assert_eq!(plain.reference, "colors");
        assert!(plain.modifiers.is_empty());

        let closed = SetReference::parse("#colors#.2.caps").unwrap();
        assert_eq!(closed.reference, "colors");
        assert_eq!(closed.modifiers, vec!["2", "caps"]);

        let indexed = SetReference::parse("#3.title").unwrap();
        assert_eq!(indexed.reference, "3");
        assert_eq!(indexed.modifiers, vec!["title"]);

        assert!(SetReference::parse("colors").is_none());
    }

    #[test]
    fn single_set_expands_in_set_order() {
        let sets = registry(&["#colors\nred, blue\n"]);
        assert_eq!(expand(&["#colors"], &sets), vec!["blue", "red"]);
    }

    #[test]
    fn two_sets_cross_product_with_literals() {
        let sets = registry(&["#size\nS, L\n", "#color\nred, blue\n"]);
        let lines = expand(&["shirt:", "#size", "#color"], &sets);
        assert_eq!(
            lines,
            vec![
                "shirt: L blue",
                "shirt: S blue",
                "shirt: L red",
                "shirt: S red",
            ]
        );
    }

    #[test]
    fn truncation_and_transforms_apply_per_item() {
        let sets = registry(&["#colors\nred, blue, green\n"]);
        assert_eq!(expand(&["#colors.2.caps"], &sets), vec!["BLUE", "GREEN"]);
        assert_eq!(expand(&["#0.0"], &sets), Vec::<String>::new());
    }

    #[test]
    fn truncation_larger_than_set_is_rejected() {
        let sets = registry(&["#colors\nred, blue\n"]);
        let mut diagnostics = Diagnostics::new();
        let error = CombinationPlan::new(
            &["#colors.3"],
            &sets,
            FunctionRegistry::builtin(),
            &mut diagnostics,
        )
        .unwrap_err();
        assert!(matches!(
            error,
            TemplateError::TruncationExceedsSet {
                requested: 3,
                available: 2,
                ..
            }
        ));
    }

    #[test]
    fn unknown_set_is_fatal() {
        let sets = registry(&["#colors\nred\n"]);
        let mut diagnostics = Diagnostics::new();
        let error = CombinationPlan::new(
            &["#shapes"],
            &sets,
            FunctionRegistry::builtin(),
            &mut diagnostics,
        )
        .unwrap_err();
        assert!(matches!(error, TemplateError::UnknownSet { reference } if reference == "shapes"));
    }

    #[test]
    fn identical_reference_text_gets_identical_items() {
        let sets = registry(&["#c\nx, y\n"]);
        assert_eq!(expand(&["#c", "#c"], &sets), vec!["x x", "y y", "x x", "y y"]);
        assert_eq!(
            expand(&["#c", "#c#"], &sets),
            vec!["x x#", "y y#", "x x#", "y y#"]
        );
    }

    #[test]
    fn unknown_transform_reported_once() {
        let sets = registry(&["#c\nx, y\n"]);
        let mut diagnostics = Diagnostics::new();
        let plan = CombinationPlan::new(
            &["#c.nope"],
            &sets,
            FunctionRegistry::builtin(),
            &mut diagnostics,
        )
        .unwrap();
        assert_eq!(plan.lines().collect::<Vec<_>>(), vec!["x", "y"]);
        assert_eq!(diagnostics.warnings().len(), 1);
    }

    #[test]
    fn lines_are_restartable() {
        let sets = registry(&["#a\n1, 2\n", "#b\n3, 4, 5\n"]);
        let mut diagnostics = Diagnostics::new();
        let tokens = ["#a", "#b"];
        let plan =
            CombinationPlan::new(&tokens, &sets, FunctionRegistry::builtin(), &mut diagnostics)
                .unwrap();
        let first: Vec<String> = plan.lines().collect();
        let second: Vec<String> = plan.lines().collect();
        assert_eq!(first, second);
        assert_eq!(plan.combination_count(), Some(6));
    }

    #[test]
    fn template_without_references_yields_nothing() {
        let sets = registry(&["#c\nx\n"]);
        let mut diagnostics = Diagnostics::new();
        let plan = CombinationPlan::new(
            &["just", "text"],
            &sets,
            FunctionRegistry::builtin(),
            &mut diagnostics,
        )
        .unwrap();
        assert_eq!(plan.combination_count(), Some(0));
        assert_eq!(plan.lines().count(), 0);
    }
}
