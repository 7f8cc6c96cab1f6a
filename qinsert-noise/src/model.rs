//! Noise models that rewrite circuits moment by moment

use crate::{GateHierarchy, InsertionNoiseConfig, MomentAssembler, Result, RuleMatcher, RuleTable};
use qinsert_core::{Circuit, Moment, Operation, QubitId};
use rayon::prelude::*;
use std::fmt;
use tracing::trace;

/// Trait for noise models that add operations around each moment
///
/// Implementors only provide [`NoiseModel::noisy_moment`]; whole sequences
/// and circuits are handled moment by moment.
pub trait NoiseModel: Send + Sync + fmt::Debug {
    /// Replacement for `moment`: the moment itself plus any noise moments
    ///
    /// `system_qubits` lists every qubit in scope. Models that only react to
    /// the operations present may ignore it.
    fn noisy_moment(&self, moment: &Moment, system_qubits: &[QubitId]) -> Vec<Moment>;

    /// Apply [`NoiseModel::noisy_moment`] to each moment and concatenate
    fn noisy_moments(&self, moments: &[Moment], system_qubits: &[QubitId]) -> Vec<Moment> {
        moments
            .iter()
            .flat_map(|moment| self.noisy_moment(moment, system_qubits))
            .collect()
    }

    /// Rewrite a whole circuit, with the circuit's qubits as scope
    fn noisy_circuit(&self, circuit: &Circuit) -> Circuit {
        let qubits = circuit.all_qubits();
        Circuit::from_moments(self.noisy_moments(circuit.moments(), &qubits))
    }
}

/// Adds a fixed noise operation after (or before) matching operations
///
/// Every operation of a moment is looked up in the rule table; the noise
/// operations of the winning rules are packed into new moments which are
/// placed next to the original moment.
///
/// # Example
/// ```
/// use qinsert_core::{Moment, Operation, StandardGate};
/// use qinsert_noise::{InsertionNoiseConfig, InsertionNoiseModel, NoiseModel, OpIdentifier};
///
/// let noise = Operation::on(StandardGate::BitFlip(0.01), &[0]).unwrap();
/// let model = InsertionNoiseModel::new(
///     InsertionNoiseConfig::new()
///         .with_rule(OpIdentifier::new("X"), noise)
///         .with_require_physical_tag(false),
/// )
/// .unwrap();
///
/// let moment = Moment::from_operation(Operation::on(StandardGate::X, &[0]).unwrap());
/// let moments = model.noisy_moment(&moment, &[]);
/// assert_eq!(moments.len(), 2);
/// assert_eq!(moments[0], moment);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct InsertionNoiseModel {
    config: InsertionNoiseConfig,
}

impl InsertionNoiseModel {
    /// Create a model from a validated configuration
    ///
    /// # Errors
    /// Returns the error of [`InsertionNoiseConfig::validate`]
    pub fn new(config: InsertionNoiseConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The model's configuration
    pub fn config(&self) -> &InsertionNoiseConfig {
        &self.config
    }

    /// Rules in declaration order
    pub fn rules(&self) -> &RuleTable {
        &self.config.rules
    }

    /// Gate hierarchy used for matching
    pub fn hierarchy(&self) -> &GateHierarchy {
        &self.config.hierarchy
    }

    /// Whether noise moments go before the original moment
    pub fn prepend(&self) -> bool {
        self.config.prepend
    }

    /// Whether operations must carry the physical gate tag
    pub fn require_physical_tag(&self) -> bool {
        self.config.require_physical_tag
    }

    /// Matcher over this model's rules
    pub fn matcher(&self) -> RuleMatcher<'_> {
        RuleMatcher::new(
            &self.config.rules,
            &self.config.hierarchy,
            self.config.require_physical_tag,
        )
    }

    /// Assembler using this model's packing strategy
    pub fn assembler(&self) -> MomentAssembler {
        MomentAssembler::new(self.config.packing)
    }

    /// Noise operations `moment` triggers, in operation order
    pub fn select_noise(&self, moment: &Moment) -> Vec<Operation> {
        self.matcher().select_noise(moment)
    }

    /// Like [`NoiseModel::noisy_moments`], processing moments in parallel
    ///
    /// The output order is the same as the sequential version.
    pub fn noisy_moments_par(&self, moments: &[Moment], system_qubits: &[QubitId]) -> Vec<Moment> {
        moments
            .par_iter()
            .map(|moment| self.noisy_moment(moment, system_qubits))
            .collect::<Vec<_>>()
            .into_iter()
            .flatten()
            .collect()
    }

    /// Like [`NoiseModel::noisy_circuit`], processing moments in parallel
    pub fn noisy_circuit_par(&self, circuit: &Circuit) -> Circuit {
        let qubits = circuit.all_qubits();
        Circuit::from_moments(self.noisy_moments_par(circuit.moments(), &qubits))
    }
}

impl NoiseModel for InsertionNoiseModel {
    fn noisy_moment(&self, moment: &Moment, _system_qubits: &[QubitId]) -> Vec<Moment> {
        let noise = self.select_noise(moment);
        let moments = self.assembler().emit(moment.clone(), noise, self.config.prepend);
        trace!(added = moments.len() - 1, "noisy moment");
        moments
    }
}
