//! Ordered table of noise rules

use crate::OpIdentifier;
use ahash::AHashMap;
use qinsert_core::Operation;
use tracing::debug;

/// A pattern and the noise operation it adds
#[derive(Clone, Debug, PartialEq)]
pub struct Rule {
    pub pattern: OpIdentifier,
    pub noise: Operation,
}

/// Noise rules in declaration order, keyed by unique patterns
///
/// Declaration order decides between matching patterns that are equally
/// specific, so the table behaves like an insertion-ordered map: inserting
/// an existing pattern replaces its operation but keeps its position.
///
/// # Example
/// ```
/// use qinsert_core::{Operation, StandardGate};
/// use qinsert_noise::{OpIdentifier, RuleTable};
///
/// let mut rules = RuleTable::new();
/// rules.insert(OpIdentifier::new("X"), Operation::on(StandardGate::BitFlip(0.01), &[0]).unwrap());
/// rules.insert(OpIdentifier::new("Z"), Operation::on(StandardGate::PhaseFlip(0.01), &[0]).unwrap());
/// assert_eq!(rules.len(), 2);
/// ```
#[derive(Clone, Debug, Default)]
pub struct RuleTable {
    rules: Vec<Rule>,
    index: AHashMap<OpIdentifier, usize>,
}

impl RuleTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table with pre-allocated capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            rules: Vec::with_capacity(capacity),
            index: AHashMap::with_capacity(capacity),
        }
    }

    /// Bind `noise` to `pattern`
    ///
    /// Returns the operation previously bound to `pattern`, if any. The last
    /// write wins; the pattern keeps its original position.
    pub fn insert(&mut self, pattern: OpIdentifier, noise: Operation) -> Option<Operation> {
        if let Some(&pos) = self.index.get(&pattern) {
            debug!(%pattern, position = pos, "replacing noise rule");
            return Some(std::mem::replace(&mut self.rules[pos].noise, noise));
        }
        self.index.insert(pattern.clone(), self.rules.len());
        self.rules.push(Rule { pattern, noise });
        None
    }

    /// Operation bound to `pattern`
    pub fn get(&self, pattern: &OpIdentifier) -> Option<&Operation> {
        self.index.get(pattern).map(|&pos| &self.rules[pos].noise)
    }

    /// Whether `pattern` has a rule
    pub fn contains(&self, pattern: &OpIdentifier) -> bool {
        self.index.contains_key(pattern)
    }

    /// Position of `pattern` in declaration order
    pub fn position(&self, pattern: &OpIdentifier) -> Option<usize> {
        self.index.get(pattern).copied()
    }

    /// Rules in declaration order
    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    /// Patterns in declaration order
    pub fn patterns(&self) -> impl Iterator<Item = &OpIdentifier> {
        self.rules.iter().map(|r| &r.pattern)
    }

    /// Number of rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if the table has no rules
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl PartialEq for RuleTable {
    fn eq(&self, other: &Self) -> bool {
        self.rules == other.rules
    }
}

impl FromIterator<(OpIdentifier, Operation)> for RuleTable {
    fn from_iter<I: IntoIterator<Item = (OpIdentifier, Operation)>>(iter: I) -> Self {
        let mut table = Self::new();
        table.extend(iter);
        table
    }
}

impl Extend<(OpIdentifier, Operation)> for RuleTable {
    fn extend<I: IntoIterator<Item = (OpIdentifier, Operation)>>(&mut self, iter: I) {
        for (pattern, noise) in iter {
            self.insert(pattern, noise);
        }
    }
}

impl<'a> IntoIterator for &'a RuleTable {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}
