//! Insertion noise configuration

use crate::{GateHierarchy, NoiseError, OpIdentifier, PackingStrategy, Result, RuleTable};
use qinsert_core::{Operation, StandardGate};

/// Configuration for [`crate::InsertionNoiseModel`]
#[derive(Debug, Clone, PartialEq)]
pub struct InsertionNoiseConfig {
    /// Noise operation added for each pattern, in declaration order
    ///
    /// When several patterns match an operation the most specific one
    /// applies; among equally specific or incomparable patterns the one
    /// declared first applies.
    ///
    /// Default: empty
    pub rules: RuleTable,

    /// Put noise moments before the moment that triggered them
    ///
    /// Default: false
    pub prepend: bool,

    /// Only add noise for operations tagged with
    /// [`crate::PHYSICAL_GATE_TAG`]
    ///
    /// Default: true
    pub require_physical_tag: bool,

    /// How noise operations are packed into moments
    ///
    /// Default: [`PackingStrategy::FirstFit`]
    pub packing: PackingStrategy,

    /// Subtype relationships between gate classes used by the patterns
    ///
    /// Default: [`GateHierarchy::standard`]
    pub hierarchy: GateHierarchy,
}

impl Default for InsertionNoiseConfig {
    fn default() -> Self {
        Self {
            rules: RuleTable::new(),
            prepend: false,
            require_physical_tag: true,
            packing: PackingStrategy::FirstFit,
            hierarchy: GateHierarchy::standard(),
        }
    }
}

impl InsertionNoiseConfig {
    /// Create a new configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the rule for `pattern`
    pub fn with_rule(mut self, pattern: impl Into<OpIdentifier>, noise: Operation) -> Self {
        self.rules.insert(pattern.into(), noise);
        self
    }

    /// Add or replace several rules, in order
    pub fn with_rules(mut self, rules: impl IntoIterator<Item = (OpIdentifier, Operation)>) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Set whether noise goes before the triggering moment
    pub fn with_prepend(mut self, prepend: bool) -> Self {
        self.prepend = prepend;
        self
    }

    /// Set whether operations must carry the physical gate tag
    pub fn with_require_physical_tag(mut self, required: bool) -> Self {
        self.require_physical_tag = required;
        self
    }

    /// Set the packing strategy
    pub fn with_packing(mut self, packing: PackingStrategy) -> Self {
        self.packing = packing;
        self
    }

    /// Set the gate hierarchy
    pub fn with_hierarchy(mut self, hierarchy: GateHierarchy) -> Self {
        self.hierarchy = hierarchy;
        self
    }

    /// Validate the configuration
    ///
    /// # Errors
    /// Returns [`NoiseError::InvalidConfig`] for a rule that can never
    /// apply: its pattern names a qubit set whose size differs from the
    /// arity of the built-in gate it selects.
    pub fn validate(&self) -> Result<()> {
        for rule in &self.rules {
            let (Some(qubits), Some(arity)) = (
                rule.pattern.qubits(),
                StandardGate::arity(rule.pattern.gate_type().as_str()),
            ) else {
                continue;
            };
            if qubits.len() != arity {
                return Err(NoiseError::InvalidConfig(format!(
                    "{} names {} qubits but '{}' acts on {}",
                    rule.pattern,
                    qubits.len(),
                    rule.pattern.gate_type(),
                    arity
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flip() -> Operation {
        Operation::on(StandardGate::BitFlip(0.01), &[0]).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = InsertionNoiseConfig::default();
        assert!(config.rules.is_empty());
        assert!(!config.prepend);
        assert!(config.require_physical_tag);
        assert_eq!(config.packing, PackingStrategy::FirstFit);
        assert_eq!(config.hierarchy, GateHierarchy::standard());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = InsertionNoiseConfig::new()
            .with_rule(OpIdentifier::new("X"), flip())
            .with_rules(vec![(OpIdentifier::on("CZ", &[0, 1]), flip())])
            .with_prepend(true)
            .with_require_physical_tag(false)
            .with_packing(PackingStrategy::Earliest)
            .with_hierarchy(GateHierarchy::new());

        assert_eq!(config.rules.len(), 2);
        assert!(config.prepend);
        assert!(!config.require_physical_tag);
        assert_eq!(config.packing, PackingStrategy::Earliest);
        assert!(config.hierarchy.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unreachable_rule_rejected() {
        let config = InsertionNoiseConfig::new().with_rule(OpIdentifier::on("CZ", &[0]), flip());
        assert!(matches!(config.validate(), Err(NoiseError::InvalidConfig(_))));
    }

    #[test]
    fn test_class_patterns_not_checked_for_arity() {
        let config = InsertionNoiseConfig::new()
            .with_rule(OpIdentifier::on("Gate", &[0, 1, 2]), flip())
            .with_rule(OpIdentifier::on("FSim", &[0]), flip());
        assert!(config.validate().is_ok());
    }
}
