//! Circuits as ordered sequences of moments

use crate::{Moment, Operation, QubitId, Result};
use std::collections::BTreeSet;

/// A quantum circuit
///
/// Contains moments in execution order. Each moment holds operations that
/// run in parallel.
///
/// # Example
/// ```
/// use qinsert_core::{Circuit, Moment, Operation, StandardGate};
///
/// let mut circuit = Circuit::new();
/// circuit.push_moment(Moment::from_operation(Operation::on(StandardGate::H, &[0]).unwrap()));
/// assert_eq!(circuit.depth(), 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Circuit {
    moments: Vec<Moment>,
}

impl Circuit {
    /// Create an empty circuit
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a circuit with pre-allocated capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            moments: Vec::with_capacity(capacity),
        }
    }

    /// Create a circuit from moments
    pub fn from_moments(moments: impl IntoIterator<Item = Moment>) -> Self {
        Self {
            moments: moments.into_iter().collect(),
        }
    }

    /// Create a circuit with one moment per group of operations
    ///
    /// # Errors
    /// Returns error if a group contains overlapping operations
    pub fn from_layers<L>(layers: impl IntoIterator<Item = L>) -> Result<Self>
    where
        L: IntoIterator<Item = Operation>,
    {
        let moments = layers
            .into_iter()
            .map(Moment::new)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { moments })
    }

    /// Append a moment
    pub fn push_moment(&mut self, moment: Moment) {
        self.moments.push(moment);
    }

    /// Moments in execution order
    #[inline]
    pub fn moments(&self) -> &[Moment] {
        &self.moments
    }

    /// Consume the circuit, returning its moments
    pub fn into_moments(self) -> Vec<Moment> {
        self.moments
    }

    /// Iterate over all operations, moment by moment
    pub fn operations(&self) -> impl Iterator<Item = &Operation> {
        self.moments.iter().flat_map(|m| m.iter())
    }

    /// Every qubit touched by some operation, sorted
    pub fn all_qubits(&self) -> Vec<QubitId> {
        let set: BTreeSet<QubitId> = self
            .operations()
            .flat_map(|op| op.qubits().iter().copied())
            .collect();
        set.into_iter().collect()
    }

    /// Total number of operations
    pub fn operation_count(&self) -> usize {
        self.moments.iter().map(Moment::len).sum()
    }

    /// Number of moments
    #[inline]
    pub fn depth(&self) -> usize {
        self.moments.len()
    }

    /// Check if the circuit has no moments
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.moments.is_empty()
    }
}

impl std::fmt::Display for Circuit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Circuit({} moments, {} operations)",
            self.depth(),
            self.operation_count()
        )?;
        for (i, moment) in self.moments.iter().enumerate() {
            writeln!(f, "  {}: {}", i, moment)?;
        }
        Ok(())
    }
}
