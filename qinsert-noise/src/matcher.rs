//! Rule matching: which noise each operation of a moment triggers

use crate::{GateHierarchy, Rule, RuleTable};
use qinsert_core::{Moment, Operation};
use tracing::{debug, trace};

/// Marker that opts an operation into noise when tags are required
pub const PHYSICAL_GATE_TAG: &str = "physical_gate";

/// Selects noise operations for the operations of a moment
///
/// The matcher borrows its rules and gate hierarchy; it is cheap to build
/// for every call and shares nothing mutable.
#[derive(Clone, Copy, Debug)]
pub struct RuleMatcher<'a> {
    rules: &'a RuleTable,
    hierarchy: &'a GateHierarchy,
    require_physical_tag: bool,
}

impl<'a> RuleMatcher<'a> {
    /// Create a matcher over `rules`
    pub fn new(rules: &'a RuleTable, hierarchy: &'a GateHierarchy, require_physical_tag: bool) -> Self {
        Self {
            rules,
            hierarchy,
            require_physical_tag,
        }
    }

    /// Whether `op` is eligible for noise at all
    pub fn is_candidate(&self, op: &Operation) -> bool {
        !self.require_physical_tag || op.has_tag(PHYSICAL_GATE_TAG)
    }

    /// The most specific rule matching `op`
    ///
    /// Rules are scanned in declaration order. The first match becomes the
    /// current best, and a later match replaces it only when its pattern is
    /// a proper subtype of the current best. Equally specific or incomparable
    /// patterns therefore resolve to the one declared first.
    pub fn best_match(&self, op: &Operation) -> Option<&'a Rule> {
        let gate_type = op.gate_type();
        let qubits = op.qubit_set();

        let mut best: Option<&'a Rule> = None;
        let mut matched = 0usize;
        for rule in self.rules {
            if !rule.pattern.matches_parts(&gate_type, &qubits, self.hierarchy) {
                continue;
            }
            matched += 1;
            best = match best {
                Some(current) if !rule.pattern.is_proper_subtype_of(&current.pattern, self.hierarchy) => {
                    Some(current)
                },
                _ => Some(rule),
            };
        }

        if matched > 1 {
            if let Some(winner) = best {
                debug!(
                    operation = %op,
                    candidates = matched,
                    winner = %winner.pattern,
                    "resolved competing noise rules"
                );
            }
        }
        best
    }

    /// Noise operations triggered by `moment`, in operation order
    ///
    /// Each matched operation contributes its winning rule's noise operation
    /// exactly as declared; the noise is not moved onto the matched
    /// operation's qubits.
    pub fn select_noise(&self, moment: &Moment) -> Vec<Operation> {
        let noise: Vec<Operation> = moment
            .iter()
            .filter(|op| self.is_candidate(op))
            .filter_map(|op| self.best_match(op))
            .map(|rule| rule.noise.clone())
            .collect();
        trace!(operations = moment.len(), noise = noise.len(), "selected noise");
        noise
    }
}
