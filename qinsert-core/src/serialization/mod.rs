//! Serialization of gates and operations
//!
//! Operations are persisted through plain serde types so that noise-model
//! configurations can be exported and imported without losing gate classes
//! or tags.

pub mod gate;

pub use gate::{GateRegistry, SerializedGate, SerializedOperation, StandardGateRegistry};

/// Serialization format version
pub const FORMAT_VERSION: u32 = 1;

/// Check that data written with format `version` can be read
///
/// # Errors
/// Returns [`crate::QuantumError::VersionMismatch`] for newer formats
pub fn check_version(version: u32) -> crate::Result<()> {
    if version > FORMAT_VERSION {
        return Err(crate::QuantumError::VersionMismatch {
            expected: FORMAT_VERSION,
            actual: version,
        });
    }
    Ok(())
}
