//! Gate serialization types and registry

use crate::gate::{CustomGate, Gate, GateType, StandardGate};
use crate::{Operation, QuantumError, QubitId, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Serialized representation of a gate
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum SerializedGate {
    /// Standard parameterless gate (H, X, CNOT, ...)
    StandardGate { name: String },
    /// Parameterized gate (BitFlip, Depolarize, ...)
    ParameterizedGate { name: String, parameters: Vec<f64> },
    /// Caller-defined gate with its own class
    CustomGate {
        name: String,
        gate_type: GateType,
        num_qubits: usize,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        parameters: Vec<f64>,
    },
}

/// Serialized operation
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SerializedOperation {
    pub gate: SerializedGate,
    pub qubits: Vec<QubitId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

/// Trait for gate registries that convert gates to and from their serialized form
pub trait GateRegistry: Send + Sync {
    /// Create a gate from serialized representation
    fn create_gate(&self, serialized: &SerializedGate) -> Result<Arc<dyn Gate>>;

    /// Serialize a gate to representation
    fn serialize_gate(&self, gate: &dyn Gate) -> Result<SerializedGate>;

    /// Serialize an operation
    fn serialize_operation(&self, op: &Operation) -> Result<SerializedOperation> {
        let gate = self.serialize_gate(op.gate().as_ref())?;
        Ok(SerializedOperation {
            gate,
            qubits: op.qubits().to_vec(),
            tags: op.tags().to_vec(),
        })
    }

    /// Create an operation from serialized representation
    fn create_operation(&self, serialized: &SerializedOperation) -> Result<Operation> {
        let gate = self.create_gate(&serialized.gate)?;
        let op = Operation::new(gate, &serialized.qubits)?;
        Ok(op.with_tags(serialized.tags.iter().cloned()))
    }
}

/// Registry for the built-in gates and [`CustomGate`]
///
/// Any gate whose name is a [`StandardGate`] name and whose type is the
/// default type round-trips as a standard gate; everything else is stored
/// as a custom gate with its explicit class.
#[derive(Debug, Default)]
pub struct StandardGateRegistry;

impl StandardGateRegistry {
    /// Create a new standard gate registry
    pub fn new() -> Self {
        Self
    }
}

impl GateRegistry for StandardGateRegistry {
    fn create_gate(&self, serialized: &SerializedGate) -> Result<Arc<dyn Gate>> {
        match serialized {
            SerializedGate::StandardGate { name } => Ok(Arc::new(StandardGate::from_name(name, &[])?)),
            SerializedGate::ParameterizedGate { name, parameters } => {
                Ok(Arc::new(StandardGate::from_name(name, parameters)?))
            },
            SerializedGate::CustomGate {
                name,
                gate_type,
                num_qubits,
                parameters,
            } => Ok(Arc::new(
                CustomGate::new(name.clone(), gate_type.clone(), *num_qubits).with_parameters(parameters.clone()),
            )),
        }
    }

    fn serialize_gate(&self, gate: &dyn Gate) -> Result<SerializedGate> {
        let name = gate.name().to_string();
        let gate_type = gate.gate_type();
        let parameters = gate.parameters();

        // JSON has no NaN or infinity
        if let Some(p) = parameters.iter().find(|p| !p.is_finite()) {
            return Err(QuantumError::SerializationError(format!(
                "parameter {} of gate '{}' is not a finite number",
                p, name
            )));
        }

        let is_standard = StandardGate::arity(&name) == Some(gate.num_qubits())
            && gate_type.as_str() == name
            && StandardGate::from_name(&name, &parameters).is_ok();

        if !is_standard {
            return Ok(SerializedGate::CustomGate {
                name,
                gate_type,
                num_qubits: gate.num_qubits(),
                parameters,
            });
        }

        if parameters.is_empty() {
            Ok(SerializedGate::StandardGate { name })
        } else {
            Ok(SerializedGate::ParameterizedGate { name, parameters })
        }
    }
}
