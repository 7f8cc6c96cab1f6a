//! Rule-based insertion noise for moment-structured circuits
//!
//! For every moment of a circuit, the pass looks up each (tagged) operation
//! in an ordered table of rules, collects the noise operations of the rules
//! that win, packs them into as few conflict-free moments as the packing
//! strategy finds, and places those moments before or after the original.
//!
//! - [`GateHierarchy`]: Which gate classes contain which
//! - [`OpIdentifier`]: Rule patterns, ordered by specificity
//! - [`RuleTable`] and [`RuleMatcher`]: Rule lookup and tie-breaking
//! - [`MomentAssembler`]: Packing and placement of noise moments
//! - [`InsertionNoiseModel`]: The model tying it together
//!
//! # Example
//! ```
//! use qinsert_core::{Circuit, Operation, StandardGate};
//! use qinsert_noise::{InsertionNoiseConfig, InsertionNoiseModel, NoiseModel, OpIdentifier, PHYSICAL_GATE_TAG};
//!
//! let model = InsertionNoiseModel::new(
//!     InsertionNoiseConfig::new()
//!         .with_rule(OpIdentifier::new("TwoQubitGate"), Operation::on(StandardGate::Depolarize(0.01), &[0]).unwrap()),
//! )
//! .unwrap();
//!
//! let cz = Operation::on(StandardGate::CZ, &[0, 1]).unwrap().with_tag(PHYSICAL_GATE_TAG);
//! let circuit = Circuit::from_layers(vec![vec![cz]]).unwrap();
//! assert_eq!(model.noisy_circuit(&circuit).depth(), 2);
//! ```

pub mod assembler;
pub mod config;
pub mod error;
pub mod hierarchy;
pub mod identifier;
pub mod matcher;
pub mod model;
pub mod rule_table;
pub mod serialization;

pub use assembler::{MomentAssembler, PackingStrategy};
pub use config::InsertionNoiseConfig;
pub use error::NoiseError;
pub use hierarchy::{GateHierarchy, HierarchyEdge};
pub use identifier::OpIdentifier;
pub use matcher::{RuleMatcher, PHYSICAL_GATE_TAG};
pub use model::{InsertionNoiseModel, NoiseModel};
pub use rule_table::{Rule, RuleTable};
pub use serialization::SerializedNoiseModel;

/// Type alias for results in qinsert-noise
pub type Result<T> = std::result::Result<T, NoiseError>;
