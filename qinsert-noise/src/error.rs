//! Error types for the insertion noise pass

use qinsert_core::{GateType, QuantumError};
use thiserror::Error;

/// Errors raised while configuring, exporting or importing a noise model
///
/// Matching and moment assembly never fail; errors only come from
/// building the gate hierarchy, validating a configuration or persistence.
#[derive(Debug, Error)]
pub enum NoiseError {
    /// Subtype edge would make a gate type its own ancestor
    #[error("Gate type '{child}' cannot derive from '{parent}': this would create a cycle")]
    HierarchyCycle { child: GateType, parent: GateType },

    /// Configuration holds a rule that can never apply
    #[error("Invalid noise configuration: {0}")]
    InvalidConfig(String),

    /// Gate or operation error from the circuit layer
    #[error(transparent)]
    Quantum(#[from] QuantumError),

    /// JSON encoding or decoding failure
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
