//! Operation identifiers: the patterns noise rules are keyed by

use crate::GateHierarchy;
use qinsert_core::{Gate, GateType, Operation, QubitId};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// Selects operations by gate class and, optionally, by exact qubit set
///
/// Qubits are kept sorted and deduplicated, so two identifiers naming the
/// same set in different orders are the same key.
///
/// # Example
/// ```
/// use qinsert_core::{Operation, StandardGate};
/// use qinsert_noise::{GateHierarchy, OpIdentifier};
///
/// let hierarchy = GateHierarchy::standard();
/// let any_pauli = OpIdentifier::new("Pauli");
/// let x_on_q0 = OpIdentifier::on("X", &[0]);
///
/// let op = Operation::on(StandardGate::X, &[0]).unwrap();
/// assert!(any_pauli.matches(&op, &hierarchy));
/// assert!(x_on_q0.matches(&op, &hierarchy));
/// assert!(x_on_q0.is_proper_subtype_of(&any_pauli, &hierarchy));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawOpIdentifier")]
pub struct OpIdentifier {
    gate_type: GateType,
    #[serde(skip_serializing_if = "Option::is_none")]
    qubits: Option<SmallVec<[QubitId; 2]>>,
}

#[derive(Deserialize)]
struct RawOpIdentifier {
    gate_type: GateType,
    #[serde(default)]
    qubits: Option<Vec<QubitId>>,
}

impl From<RawOpIdentifier> for OpIdentifier {
    fn from(raw: RawOpIdentifier) -> Self {
        match raw.qubits {
            Some(qubits) => Self::with_qubits(raw.gate_type, &qubits),
            None => Self::new(raw.gate_type),
        }
    }
}

impl OpIdentifier {
    /// Match every operation whose gate belongs to `gate_type`
    pub fn new(gate_type: impl Into<GateType>) -> Self {
        Self {
            gate_type: gate_type.into(),
            qubits: None,
        }
    }

    /// Match operations of `gate_type` acting on exactly `qubits`
    ///
    /// An empty qubit list means "any qubits".
    pub fn with_qubits(gate_type: impl Into<GateType>, qubits: &[QubitId]) -> Self {
        let mut set: SmallVec<[QubitId; 2]> = SmallVec::from_slice(qubits);
        set.sort_unstable();
        set.dedup();
        Self {
            gate_type: gate_type.into(),
            qubits: if set.is_empty() { None } else { Some(set) },
        }
    }

    /// Shorthand for [`OpIdentifier::with_qubits`] with raw indices
    pub fn on(gate_type: impl Into<GateType>, indices: &[usize]) -> Self {
        let qubits: SmallVec<[QubitId; 2]> = indices.iter().copied().map(QubitId::new).collect();
        Self::with_qubits(gate_type, &qubits)
    }

    /// Identifier for the class of `gate`
    pub fn for_gate(gate: &dyn Gate) -> Self {
        Self::new(gate.gate_type())
    }

    /// Identifier for exactly `op`'s class and qubits
    pub fn for_operation(op: &Operation) -> Self {
        Self::with_qubits(op.gate_type(), op.qubits())
    }

    /// Selected gate class
    #[inline]
    pub fn gate_type(&self) -> &GateType {
        &self.gate_type
    }

    /// Required qubit set, sorted, if any
    #[inline]
    pub fn qubits(&self) -> Option<&[QubitId]> {
        self.qubits.as_deref()
    }

    /// Whether a qubit set is required
    #[inline]
    pub fn is_qubit_specific(&self) -> bool {
        self.qubits.is_some()
    }

    /// Whether `op` belongs to this identifier's class and, if qubits are
    /// named, acts on exactly that qubit set
    pub fn matches(&self, op: &Operation, hierarchy: &GateHierarchy) -> bool {
        self.matches_parts(&op.gate_type(), &op.qubit_set(), hierarchy)
    }

    /// Whether a bare gate matches
    ///
    /// A gate has no qubits, so only identifiers without a qubit set can
    /// match it.
    pub fn matches_gate(&self, gate: &dyn Gate, hierarchy: &GateHierarchy) -> bool {
        self.qubits.is_none() && hierarchy.is_subtype(&gate.gate_type(), &self.gate_type)
    }

    /// Match against a precomputed gate type and sorted qubit set
    pub(crate) fn matches_parts(
        &self,
        gate_type: &GateType,
        sorted_qubits: &[QubitId],
        hierarchy: &GateHierarchy,
    ) -> bool {
        if let Some(required) = &self.qubits {
            if required.as_slice() != sorted_qubits {
                return false;
            }
        }
        hierarchy.is_subtype(gate_type, &self.gate_type)
    }

    /// Whether this identifier is strictly more specific than `other`
    ///
    /// True when this class is a strict subtype of `other`'s, or when the
    /// classes are equal or incomparable and only this identifier names
    /// qubits. Irreflexive and asymmetric; not every pair is comparable.
    pub fn is_proper_subtype_of(&self, other: &OpIdentifier, hierarchy: &GateHierarchy) -> bool {
        if self == other {
            return false;
        }
        if hierarchy.is_strict_subtype(&self.gate_type, &other.gate_type) {
            return true;
        }
        if hierarchy.is_strict_subtype(&other.gate_type, &self.gate_type) {
            return false;
        }
        self.qubits.is_some() && other.qubits.is_none()
    }
}

impl From<GateType> for OpIdentifier {
    fn from(gate_type: GateType) -> Self {
        Self::new(gate_type)
    }
}

impl fmt::Display for OpIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OpIdentifier({}", self.gate_type)?;
        if let Some(qubits) = &self.qubits {
            for q in qubits {
                write!(f, ", {}", q)?;
            }
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qinsert_core::{CustomGate, StandardGate};

    fn op(gate: StandardGate, qubits: &[usize]) -> Operation {
        Operation::on(gate, qubits).unwrap()
    }

    #[test]
    fn test_qubits_are_normalized() {
        let a = OpIdentifier::on("CZ", &[3, 1]);
        let b = OpIdentifier::on("CZ", &[1, 3, 1]);
        assert_eq!(a, b);
        assert_eq!(a.qubits(), Some(&[QubitId::new(1), QubitId::new(3)][..]));
        assert_eq!(OpIdentifier::on("CZ", &[]), OpIdentifier::new("CZ"));
    }

    #[test]
    fn test_matches_by_class() {
        let h = GateHierarchy::standard();
        let pauli = OpIdentifier::new("Pauli");

        assert!(pauli.matches(&op(StandardGate::Y, &[4]), &h));
        assert!(!pauli.matches(&op(StandardGate::H, &[4]), &h));
        assert!(OpIdentifier::new("Gate").matches(&op(StandardGate::SWAP, &[0, 1]), &h));
    }

    #[test]
    fn test_matches_exact_qubit_set() {
        let h = GateHierarchy::standard();
        let cz01 = OpIdentifier::on("CZ", &[0, 1]);

        assert!(cz01.matches(&op(StandardGate::CZ, &[1, 0]), &h));
        assert!(!cz01.matches(&op(StandardGate::CZ, &[0, 2]), &h));
        assert!(!OpIdentifier::on("X", &[0, 1]).matches(&op(StandardGate::X, &[0]), &h));
    }

    #[test]
    fn test_custom_gate_class() {
        let h = GateHierarchy::standard();
        let fsim = Operation::on(CustomGate::new("FSim", "TwoQubitGate", 2), &[0, 1]).unwrap();
        assert!(OpIdentifier::new("TwoQubitGate").matches(&fsim, &h));
        assert!(!OpIdentifier::new("FSim").matches(&fsim, &h));
    }

    #[test]
    fn test_matches_gate() {
        let h = GateHierarchy::standard();
        assert!(OpIdentifier::new("Pauli").matches_gate(&StandardGate::Z, &h));
        assert!(!OpIdentifier::on("Pauli", &[0]).matches_gate(&StandardGate::Z, &h));
        assert!(!OpIdentifier::new("Phase").matches_gate(&StandardGate::Z, &h));
    }

    #[test]
    fn test_proper_subtype_by_class() {
        let h = GateHierarchy::standard();
        let x = OpIdentifier::new("X");
        let pauli = OpIdentifier::new("Pauli");

        assert!(x.is_proper_subtype_of(&pauli, &h));
        assert!(!pauli.is_proper_subtype_of(&x, &h));
        assert!(!x.is_proper_subtype_of(&x, &h));

        // A strict subclass wins even against a qubit-specific superclass
        let pauli_q0 = OpIdentifier::on("Pauli", &[0]);
        assert!(x.is_proper_subtype_of(&pauli_q0, &h));
        assert!(!pauli_q0.is_proper_subtype_of(&x, &h));
    }

    #[test]
    fn test_proper_subtype_by_qubits() {
        let h = GateHierarchy::standard();
        let x = OpIdentifier::new("X");
        let x_q0 = OpIdentifier::on("X", &[0]);
        let x_q1 = OpIdentifier::on("X", &[1]);

        assert!(x_q0.is_proper_subtype_of(&x, &h));
        assert!(!x.is_proper_subtype_of(&x_q0, &h));
        assert!(!x_q0.is_proper_subtype_of(&x_q1, &h));
        assert!(!x_q1.is_proper_subtype_of(&x_q0, &h));
    }

    #[test]
    fn test_incomparable_classes() {
        let h = GateHierarchy::standard();
        let pauli = OpIdentifier::new("Pauli");
        let clifford = OpIdentifier::new("Clifford");
        assert!(!pauli.is_proper_subtype_of(&clifford, &h));
        assert!(!clifford.is_proper_subtype_of(&pauli, &h));

        // Qubits break the tie between incomparable classes
        let clifford_q0 = OpIdentifier::on("Clifford", &[0]);
        assert!(clifford_q0.is_proper_subtype_of(&pauli, &h));
        assert!(!pauli.is_proper_subtype_of(&clifford_q0, &h));
    }

    #[test]
    fn test_serde_shape_and_normalization() {
        let id = OpIdentifier::on("CZ", &[1, 0]);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, r#"{"gate_type":"CZ","qubits":[0,1]}"#);

        let generic = serde_json::to_string(&OpIdentifier::new("X")).unwrap();
        assert_eq!(generic, r#"{"gate_type":"X"}"#);

        let unsorted: OpIdentifier = serde_json::from_str(r#"{"gate_type":"CZ","qubits":[1,0,1]}"#).unwrap();
        assert_eq!(unsorted, id);
    }

    #[test]
    fn test_identifiers_from_gates_and_operations() {
        let h = GateHierarchy::standard();
        let fsim = CustomGate::new("FSim", "TwoQubitGate", 2);
        assert_eq!(OpIdentifier::for_gate(&fsim), OpIdentifier::new("TwoQubitGate"));

        let cz = op(StandardGate::CZ, &[4, 2]);
        let exact = OpIdentifier::for_operation(&cz);
        assert_eq!(exact, OpIdentifier::on("CZ", &[2, 4]));
        assert!(exact.matches(&cz, &h));
        assert!(!exact.matches(&op(StandardGate::CZ, &[2, 3]), &h));
        assert!(exact.is_proper_subtype_of(&OpIdentifier::for_gate(&StandardGate::CZ), &h));
    }

    #[test]
    fn test_display() {
        assert_eq!(OpIdentifier::on("CZ", &[2, 0]).to_string(), "OpIdentifier(CZ, q0, q2)");
        assert_eq!(OpIdentifier::new("Pauli").to_string(), "OpIdentifier(Pauli)");
    }
}
