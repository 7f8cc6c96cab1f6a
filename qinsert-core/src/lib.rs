//! Core circuit types for the qinsert noise pass
//!
//! This crate provides the values the noise pass works over:
//! - [`QubitId`]: Type-safe qubit addressing
//! - [`Gate`] and [`GateType`]: Gates and the classes rules select on
//! - [`Operation`]: A gate on specific qubits, with tags
//! - [`Moment`]: Operations that run in parallel on disjoint qubits
//! - [`Circuit`]: Moments in execution order
//!
//! # Example
//! ```
//! use qinsert_core::{Circuit, Moment, Operation, StandardGate};
//!
//! let h = Operation::on(StandardGate::H, &[0]).unwrap();
//! let x = Operation::on(StandardGate::X, &[1]).unwrap();
//! let circuit = Circuit::from_moments([Moment::new([h, x]).unwrap()]);
//! assert_eq!(circuit.operation_count(), 2);
//! ```

pub mod circuit;
pub mod error;
pub mod gate;
pub mod moment;
pub mod operation;
pub mod qubit;
pub mod serialization;

// Re-exports for convenience
pub use circuit::Circuit;
pub use error::QuantumError;
pub use gate::{CustomGate, Gate, GateType, StandardGate};
pub use moment::Moment;
pub use operation::Operation;
pub use qubit::QubitId;

/// Type alias for results in qinsert-core
pub type Result<T> = std::result::Result<T, QuantumError>;
