//! Moments: sets of simultaneous operations
//!
//! A [`Moment`] keeps the invariant that no two of its operations share a
//! qubit. [`Moment::new`] checks it; [`Moment::try_add`] refuses an
//! operation that would break it and hands the operation back.

use crate::{Operation, QuantumError, QubitId, Result};
use ahash::AHashSet;
use std::fmt;

/// A layer of operations with pairwise-disjoint qubit supports
///
/// # Example
/// ```
/// use qinsert_core::{Moment, Operation, StandardGate};
///
/// let x0 = Operation::on(StandardGate::X, &[0]).unwrap();
/// let z1 = Operation::on(StandardGate::Z, &[1]).unwrap();
/// let moment = Moment::new(vec![x0, z1]).unwrap();
/// assert_eq!(moment.len(), 2);
/// ```
#[derive(Clone, Default)]
pub struct Moment {
    operations: Vec<Operation>,
    qubits: AHashSet<QubitId>,
}

impl Moment {
    /// Create an empty moment
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a moment holding a single operation
    pub fn from_operation(op: Operation) -> Self {
        let qubits = op.qubits().iter().copied().collect();
        Self {
            operations: vec![op],
            qubits,
        }
    }

    /// Create a moment from operations
    ///
    /// # Errors
    /// Returns [`QuantumError::OverlappingQubits`] if two operations act on
    /// the same qubit.
    pub fn new(operations: impl IntoIterator<Item = Operation>) -> Result<Self> {
        let mut moment = Self::empty();
        for op in operations {
            if let Some(qubit) = moment.first_conflict(op.qubits()) {
                let first = moment
                    .operation_on(qubit)
                    .map(ToString::to_string)
                    .unwrap_or_default();
                return Err(QuantumError::OverlappingQubits {
                    qubit,
                    first,
                    second: op.to_string(),
                });
            }
            moment.push(op);
        }
        Ok(moment)
    }

    /// First of `qubits` already used by this moment
    pub fn first_conflict(&self, qubits: &[QubitId]) -> Option<QubitId> {
        qubits.iter().copied().find(|q| self.qubits.contains(q))
    }

    /// Check if an operation on `qubits` can join this moment
    #[inline]
    pub fn can_add(&self, qubits: &[QubitId]) -> bool {
        self.first_conflict(qubits).is_none()
    }

    /// Add an operation if it touches no qubit already in use
    ///
    /// On conflict the moment is left unchanged and the operation is
    /// returned to the caller.
    pub fn try_add(&mut self, op: Operation) -> std::result::Result<(), Operation> {
        if !self.can_add(op.qubits()) {
            return Err(op);
        }
        self.push(op);
        Ok(())
    }

    // Caller has checked for conflicts
    fn push(&mut self, op: Operation) {
        self.qubits.extend(op.qubits().iter().copied());
        self.operations.push(op);
    }

    /// Operations in insertion order
    #[inline]
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Iterate over the operations
    pub fn iter(&self) -> std::slice::Iter<'_, Operation> {
        self.operations.iter()
    }

    /// Whether some operation acts on `qubit`
    #[inline]
    pub fn operates_on(&self, qubit: QubitId) -> bool {
        self.qubits.contains(&qubit)
    }

    /// The operation acting on `qubit`, if any
    pub fn operation_on(&self, qubit: QubitId) -> Option<&Operation> {
        self.operations.iter().find(|op| op.acts_on(qubit))
    }

    /// Qubits used by this moment, sorted
    pub fn qubits(&self) -> Vec<QubitId> {
        let mut qubits: Vec<QubitId> = self.qubits.iter().copied().collect();
        qubits.sort_unstable();
        qubits
    }

    /// Number of operations
    #[inline]
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Check if the moment has no operations
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

impl PartialEq for Moment {
    fn eq(&self, other: &Self) -> bool {
        self.operations == other.operations
    }
}

impl<'a> IntoIterator for &'a Moment {
    type Item = &'a Operation;
    type IntoIter = std::slice::Iter<'a, Operation>;

    fn into_iter(self) -> Self::IntoIter {
        self.operations.iter()
    }
}

impl IntoIterator for Moment {
    type Item = Operation;
    type IntoIter = std::vec::IntoIter<Operation>;

    fn into_iter(self) -> Self::IntoIter {
        self.operations.into_iter()
    }
}

impl fmt::Debug for Moment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.operations.iter()).finish()
    }
}

impl fmt::Display for Moment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Moment[")?;
        for (i, op) in self.operations.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", op)?;
        }
        write!(f, "]")
    }
}
