//! Gate definitions
//!
//! A gate is the qubit-independent part of an operation. Every gate reports
//! a [`GateType`], the class name rule patterns select on. Built-in gates use
//! their own name as their type; [`CustomGate`] lets callers pick any type
//! name, so the same class can cover many concrete gates.

use crate::{QuantumError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of a gate class
///
/// # Example
/// ```
/// use qinsert_core::GateType;
///
/// let t = GateType::new("Pauli");
/// assert_eq!(t.as_str(), "Pauli");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GateType(String);

impl GateType {
    /// Create a gate type from its name
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the type name
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for GateType {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for GateType {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// Trait for gates
///
/// Gates are stateless and shared between operations through `Arc`.
///
/// # Example
/// ```ignore
/// #[derive(Debug)]
/// struct Sqrt;
///
/// impl Gate for Sqrt {
///     fn name(&self) -> &str { "SQRT" }
///     fn num_qubits(&self) -> usize { 1 }
/// }
/// ```
pub trait Gate: Send + Sync + fmt::Debug {
    /// The name of the gate (e.g., "H", "CNOT", "BitFlip")
    fn name(&self) -> &str;

    /// Number of qubits this gate acts on
    fn num_qubits(&self) -> usize;

    /// Class this gate belongs to
    fn gate_type(&self) -> GateType {
        GateType::new(self.name())
    }

    /// Numeric parameters, empty for fixed gates
    fn parameters(&self) -> Vec<f64> {
        Vec::new()
    }

    /// Get a description of this gate
    fn description(&self) -> String {
        format!("{}-qubit gate '{}'", self.num_qubits(), self.name())
    }
}

/// Built-in gates and noise channels
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StandardGate {
    I,
    X,
    Y,
    Z,
    H,
    S,
    T,
    CZ,
    CNOT,
    SWAP,
    Measure,
    /// X applied with probability p
    BitFlip(f64),
    /// Z applied with probability p
    PhaseFlip(f64),
    /// Random Pauli with total probability p
    Depolarize(f64),
    /// Energy relaxation with rate gamma
    AmplitudeDamp(f64),
}

impl StandardGate {
    /// Names of all built-in gates
    pub const NAMES: [&'static str; 15] = [
        "I",
        "X",
        "Y",
        "Z",
        "H",
        "S",
        "T",
        "CZ",
        "CNOT",
        "SWAP",
        "Measure",
        "BitFlip",
        "PhaseFlip",
        "Depolarize",
        "AmplitudeDamp",
    ];

    /// Build a standard gate from its name and parameters
    ///
    /// # Errors
    /// Returns [`QuantumError::UnknownGateType`] for names outside
    /// [`StandardGate::NAMES`] and [`QuantumError::InvalidParameters`] when
    /// the parameter list does not fit the gate.
    pub fn from_name(name: &str, parameters: &[f64]) -> Result<Self> {
        let fixed = match name {
            "I" => Some(Self::I),
            "X" => Some(Self::X),
            "Y" => Some(Self::Y),
            "Z" => Some(Self::Z),
            "H" => Some(Self::H),
            "S" => Some(Self::S),
            "T" => Some(Self::T),
            "CZ" => Some(Self::CZ),
            "CNOT" => Some(Self::CNOT),
            "SWAP" => Some(Self::SWAP),
            "Measure" => Some(Self::Measure),
            _ => None,
        };
        if let Some(gate) = fixed {
            if !parameters.is_empty() {
                return Err(QuantumError::invalid_parameters(
                    name,
                    format!("expected no parameters, got {}", parameters.len()),
                ));
            }
            return Ok(gate);
        }

        let p = match parameters {
            [p] => *p,
            _ if Self::NAMES.contains(&name) => {
                return Err(QuantumError::invalid_parameters(
                    name,
                    format!("expected 1 parameter, got {}", parameters.len()),
                ))
            },
            _ => return Err(QuantumError::UnknownGateType(name.to_string())),
        };
        match name {
            "BitFlip" => Self::bit_flip(p),
            "PhaseFlip" => Self::phase_flip(p),
            "Depolarize" => Self::depolarize(p),
            "AmplitudeDamp" => Self::amplitude_damp(p),
            _ => Err(QuantumError::UnknownGateType(name.to_string())),
        }
    }

    /// Bit-flip channel with probability `p`
    pub fn bit_flip(p: f64) -> Result<Self> {
        check_probability("BitFlip", p).map(|_| Self::BitFlip(p))
    }

    /// Phase-flip channel with probability `p`
    pub fn phase_flip(p: f64) -> Result<Self> {
        check_probability("PhaseFlip", p).map(|_| Self::PhaseFlip(p))
    }

    /// Depolarizing channel with probability `p`
    pub fn depolarize(p: f64) -> Result<Self> {
        check_probability("Depolarize", p).map(|_| Self::Depolarize(p))
    }

    /// Amplitude damping channel with rate `gamma`
    pub fn amplitude_damp(gamma: f64) -> Result<Self> {
        check_probability("AmplitudeDamp", gamma).map(|_| Self::AmplitudeDamp(gamma))
    }

    /// Qubit count of the built-in gate with this name
    ///
    /// # Example
    /// ```
    /// use qinsert_core::StandardGate;
    ///
    /// assert_eq!(StandardGate::arity("CZ"), Some(2));
    /// assert_eq!(StandardGate::arity("Pauli"), None);
    /// ```
    pub fn arity(name: &str) -> Option<usize> {
        match name {
            "CZ" | "CNOT" | "SWAP" => Some(2),
            _ if Self::NAMES.contains(&name) => Some(1),
            _ => None,
        }
    }

    /// Whether this gate models noise rather than a control pulse
    pub fn is_noise_channel(&self) -> bool {
        matches!(
            self,
            Self::BitFlip(_) | Self::PhaseFlip(_) | Self::Depolarize(_) | Self::AmplitudeDamp(_)
        )
    }
}

fn check_probability(gate: &str, p: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&p) {
        return Err(QuantumError::invalid_parameters(
            gate,
            format!("probability must be in [0, 1], got {}", p),
        ));
    }
    Ok(())
}

impl Gate for StandardGate {
    fn name(&self) -> &str {
        match self {
            Self::I => "I",
            Self::X => "X",
            Self::Y => "Y",
            Self::Z => "Z",
            Self::H => "H",
            Self::S => "S",
            Self::T => "T",
            Self::CZ => "CZ",
            Self::CNOT => "CNOT",
            Self::SWAP => "SWAP",
            Self::Measure => "Measure",
            Self::BitFlip(_) => "BitFlip",
            Self::PhaseFlip(_) => "PhaseFlip",
            Self::Depolarize(_) => "Depolarize",
            Self::AmplitudeDamp(_) => "AmplitudeDamp",
        }
    }

    fn num_qubits(&self) -> usize {
        match self {
            Self::CZ | Self::CNOT | Self::SWAP => 2,
            _ => 1,
        }
    }

    fn parameters(&self) -> Vec<f64> {
        match *self {
            Self::BitFlip(p) | Self::PhaseFlip(p) | Self::Depolarize(p) | Self::AmplitudeDamp(p) => {
                vec![p]
            },
            _ => Vec::new(),
        }
    }
}

/// A gate defined by the caller
///
/// Custom gates carry an explicit [`GateType`], which lets several custom
/// gates share a class or join a class of the built-in gates. Parameters are
/// stored as given and never checked.
///
/// # Example
/// ```
/// use qinsert_core::{CustomGate, Gate};
///
/// let fsim = CustomGate::new("FSim", "TwoQubitGate", 2).with_parameters(vec![0.5, 0.1]);
/// assert_eq!(fsim.gate_type().as_str(), "TwoQubitGate");
/// assert_eq!(fsim.parameters(), vec![0.5, 0.1]);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct CustomGate {
    name: String,
    gate_type: GateType,
    num_qubits: usize,
    parameters: Vec<f64>,
}

impl CustomGate {
    /// Create a custom gate
    pub fn new(name: impl Into<String>, gate_type: impl Into<GateType>, num_qubits: usize) -> Self {
        Self {
            name: name.into(),
            gate_type: gate_type.into(),
            num_qubits,
            parameters: Vec::new(),
        }
    }

    /// Create a custom gate that is its own type
    pub fn named(name: impl Into<String>, num_qubits: usize) -> Self {
        let name = name.into();
        Self::new(name.clone(), name, num_qubits)
    }

    /// Set the gate's numeric parameters
    pub fn with_parameters(mut self, parameters: Vec<f64>) -> Self {
        self.parameters = parameters;
        self
    }
}

impl Gate for CustomGate {
    fn name(&self) -> &str {
        &self.name
    }

    fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    fn gate_type(&self) -> GateType {
        self.gate_type.clone()
    }

    fn parameters(&self) -> Vec<f64> {
        self.parameters.clone()
    }
}
