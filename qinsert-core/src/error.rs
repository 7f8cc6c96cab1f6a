//! Error types for qinsert-core

use crate::QubitId;
use thiserror::Error;

/// Errors raised while building operations, moments and circuits
#[derive(Debug, Error)]
pub enum QuantumError {
    /// Gate applied to wrong number of qubits
    #[error("Gate '{gate}' requires {expected} qubits, but {actual} were provided")]
    InvalidQubitCount {
        gate: String,
        expected: usize,
        actual: usize,
    },

    /// Duplicate qubit in a single operation
    #[error("Duplicate qubit {0} in gate operation")]
    DuplicateQubit(QubitId),

    /// Two operations of one moment act on the same qubit
    #[error("Operations '{first}' and '{second}' overlap on qubit {qubit}")]
    OverlappingQubits {
        qubit: QubitId,
        first: String,
        second: String,
    },

    /// Gate name not known to the registry
    #[error("Unknown gate type: {0}")]
    UnknownGateType(String),

    /// Gate parameters do not fit the gate
    #[error("Invalid parameters for gate '{gate}': {reason}")]
    InvalidParameters { gate: String, reason: String },

    /// Serialized data was written by a newer format
    #[error("Format version mismatch: expected at most {expected}, got {actual}")]
    VersionMismatch { expected: u32, actual: u32 },

    /// Gate cannot be written in the serialized form
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl QuantumError {
    /// Create an invalid qubit count error
    pub fn invalid_qubit_count(gate: impl Into<String>, expected: usize, actual: usize) -> Self {
        Self::InvalidQubitCount {
            gate: gate.into(),
            expected,
            actual,
        }
    }

    /// Create an invalid parameters error
    pub fn invalid_parameters(gate: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameters {
            gate: gate.into(),
            reason: reason.into(),
        }
    }
}
