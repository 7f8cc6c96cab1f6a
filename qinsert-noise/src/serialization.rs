//! Export and import of insertion noise models
//!
//! The persisted form is a plain serde structure: rules as an ordered list
//! of `(pattern, operation)` pairs plus the model flags. Rule order is part
//! of the model's behaviour and is kept exactly.
//!
//! ```json
//! {
//!   "version": 1,
//!   "rule_table": [
//!     [{"gate_type": "X"}, {"gate": {"ParameterizedGate": {"name": "BitFlip", "parameters": [0.01]}}, "qubits": [0]}]
//!   ],
//!   "prepend": false,
//!   "require_physical_tag": true
//! }
//! ```

use crate::{
    GateHierarchy, InsertionNoiseConfig, InsertionNoiseModel, OpIdentifier, PackingStrategy,
    Result, RuleTable,
};
use qinsert_core::serialization::{
    check_version, GateRegistry, SerializedOperation, StandardGateRegistry, FORMAT_VERSION,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

fn default_version() -> u32 {
    FORMAT_VERSION
}

fn default_true() -> bool {
    true
}

/// Serialized insertion noise model
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SerializedNoiseModel {
    /// Format version for compatibility checking
    #[serde(default = "default_version")]
    pub version: u32,
    /// Rules in declaration order
    #[serde(alias = "ops_added")]
    pub rule_table: Vec<(OpIdentifier, SerializedOperation)>,
    #[serde(default)]
    pub prepend: bool,
    #[serde(default = "default_true", alias = "require_marker")]
    pub require_physical_tag: bool,
    #[serde(default)]
    pub packing: PackingStrategy,
    /// Gate class relationships; absent means [`GateHierarchy::standard`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hierarchy: Option<GateHierarchy>,
}

impl InsertionNoiseConfig {
    /// Convert to the serialized form, encoding gates with `registry`
    ///
    /// # Errors
    /// Returns error if the registry cannot encode a noise operation's gate
    pub fn export(&self, registry: &dyn GateRegistry) -> Result<SerializedNoiseModel> {
        let rule_table = self
            .rules
            .iter()
            .map(|rule| -> Result<(OpIdentifier, SerializedOperation)> {
                Ok((rule.pattern.clone(), registry.serialize_operation(&rule.noise)?))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(SerializedNoiseModel {
            version: FORMAT_VERSION,
            rule_table,
            prepend: self.prepend,
            require_physical_tag: self.require_physical_tag,
            packing: self.packing,
            hierarchy: Some(self.hierarchy.clone()),
        })
    }

    /// Rebuild a configuration, decoding gates with `registry`
    ///
    /// Rules are inserted in the stored order; a repeated pattern replaces
    /// the earlier operation in place.
    ///
    /// # Errors
    /// Returns error if the format version is newer than supported or a
    /// noise operation cannot be rebuilt
    pub fn import(serialized: SerializedNoiseModel, registry: &dyn GateRegistry) -> Result<Self> {
        check_version(serialized.version)?;

        let mut rules = RuleTable::with_capacity(serialized.rule_table.len());
        for (pattern, op) in &serialized.rule_table {
            rules.insert(pattern.clone(), registry.create_operation(op)?);
        }
        debug!(
            rules = rules.len(),
            prepend = serialized.prepend,
            require_physical_tag = serialized.require_physical_tag,
            "imported insertion noise config"
        );

        Ok(Self {
            rules,
            prepend: serialized.prepend,
            require_physical_tag: serialized.require_physical_tag,
            packing: serialized.packing,
            hierarchy: serialized.hierarchy.unwrap_or_else(GateHierarchy::standard),
        })
    }
}

impl InsertionNoiseModel {
    /// Convert to the serialized form using the standard gate registry
    pub fn to_serialized(&self) -> Result<SerializedNoiseModel> {
        self.config().export(&StandardGateRegistry::new())
    }

    /// Rebuild a model using the standard gate registry
    ///
    /// # Errors
    /// Returns error if import fails or the imported configuration is invalid
    pub fn from_serialized(serialized: SerializedNoiseModel) -> Result<Self> {
        Self::new(InsertionNoiseConfig::import(serialized, &StandardGateRegistry::new())?)
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.to_serialized()?)?)
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_serialized()?)?)
    }

    /// Deserialize from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_serialized(serde_json::from_str(json)?)
    }
}
