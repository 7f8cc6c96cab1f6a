//! Gate operations applied to specific qubits

use crate::gate::{Gate, GateType};
use crate::{QuantumError, QubitId, Result};
use smallvec::SmallVec;
use std::fmt;
use std::sync::Arc;

/// A gate applied to specific qubits, with optional string tags
///
/// Operations are immutable: tagging returns a new operation sharing the
/// same gate.
///
/// # Example
/// ```
/// use qinsert_core::{Operation, QubitId, StandardGate};
/// use std::sync::Arc;
///
/// let op = Operation::new(Arc::new(StandardGate::X), &[QubitId::new(0)])
///     .unwrap()
///     .with_tag("physical_gate");
/// assert!(op.has_tag("physical_gate"));
/// ```
#[derive(Clone)]
pub struct Operation {
    gate: Arc<dyn Gate>,
    qubits: SmallVec<[QubitId; 2]>, // Most gates are 1-2 qubits
    tags: SmallVec<[String; 1]>,
}

impl Operation {
    /// Create a new operation
    ///
    /// # Errors
    /// Returns error if:
    /// - Qubit count doesn't match gate requirements
    /// - Duplicate qubits specified
    pub fn new(gate: Arc<dyn Gate>, qubits: &[QubitId]) -> Result<Self> {
        if qubits.len() != gate.num_qubits() {
            return Err(QuantumError::invalid_qubit_count(
                gate.name(),
                gate.num_qubits(),
                qubits.len(),
            ));
        }

        for i in 0..qubits.len() {
            for j in (i + 1)..qubits.len() {
                if qubits[i] == qubits[j] {
                    return Err(QuantumError::DuplicateQubit(qubits[i]));
                }
            }
        }

        Ok(Self {
            gate,
            qubits: SmallVec::from_slice(qubits),
            tags: SmallVec::new(),
        })
    }

    /// Shorthand for [`Operation::new`] with raw qubit indices
    pub fn on(gate: impl Gate + 'static, indices: &[usize]) -> Result<Self> {
        let qubits: SmallVec<[QubitId; 2]> = indices.iter().copied().map(QubitId::new).collect();
        Self::new(Arc::new(gate), &qubits)
    }

    /// Return a copy carrying one more tag
    ///
    /// Adding a tag that is already present leaves the tag list unchanged.
    pub fn with_tag(&self, tag: impl Into<String>) -> Self {
        let tag = tag.into();
        let mut op = self.clone();
        if !op.has_tag(&tag) {
            op.tags.push(tag);
        }
        op
    }

    /// Return a copy carrying the given tags in addition to the current ones
    pub fn with_tags<I, S>(&self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut op = self.clone();
        for tag in tags {
            let tag = tag.into();
            if !op.has_tag(&tag) {
                op.tags.push(tag);
            }
        }
        op
    }

    /// Return a copy with every tag removed
    pub fn untagged(&self) -> Self {
        Self {
            gate: self.gate.clone(),
            qubits: self.qubits.clone(),
            tags: SmallVec::new(),
        }
    }

    /// Get the gate
    #[inline]
    pub fn gate(&self) -> &Arc<dyn Gate> {
        &self.gate
    }

    /// Class of the underlying gate
    #[inline]
    pub fn gate_type(&self) -> GateType {
        self.gate.gate_type()
    }

    /// Get the qubits this operation acts on, in application order
    #[inline]
    pub fn qubits(&self) -> &[QubitId] {
        &self.qubits
    }

    /// Qubits sorted ascending, for order-insensitive comparisons
    pub fn qubit_set(&self) -> SmallVec<[QubitId; 2]> {
        let mut set = self.qubits.clone();
        set.sort_unstable();
        set
    }

    /// Get the number of qubits
    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.qubits.len()
    }

    /// Whether this operation touches `qubit`
    #[inline]
    pub fn acts_on(&self, qubit: QubitId) -> bool {
        self.qubits.contains(&qubit)
    }

    /// Tags attached to this operation
    #[inline]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Whether `tag` is attached to this operation
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

impl PartialEq for Operation {
    fn eq(&self, other: &Self) -> bool {
        self.qubits == other.qubits
            && self.tags == other.tags
            && self.gate.name() == other.gate.name()
            && self.gate.gate_type() == other.gate.gate_type()
            && self.gate.parameters() == other.gate.parameters()
    }
}

impl fmt::Debug for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.gate.name())?;
        let params = self.gate.parameters();
        if !params.is_empty() {
            write!(f, "[")?;
            for (i, p) in params.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", p)?;
            }
            write!(f, "]")?;
        }
        write!(f, "(")?;
        for (i, q) in self.qubits.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", q)?;
        }
        write!(f, ")")?;
        if !self.tags.is_empty() {
            write!(f, "[{}]", self.tags.join(", "))?;
        }
        Ok(())
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
