//! Registry of gate-type subtype relationships
//!
//! Rule patterns select gates by class. Which classes contain which is kept
//! here as an arena of type nodes with parent links, so a type can belong to
//! several classes at once (`X` is both a `Pauli` and a `Clifford` gate).
//! The relation is the reflexive-transitive closure of the registered edges.

use crate::{NoiseError, Result};
use ahash::AHashMap;
use qinsert_core::GateType;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// A registered `child` is-a `parent` relationship
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HierarchyEdge {
    pub child: GateType,
    pub parent: GateType,
}

#[derive(Clone, Debug)]
struct TypeNode {
    name: GateType,
    parents: SmallVec<[usize; 2]>,
}

/// Arena of gate types and their parents
///
/// # Example
/// ```
/// use qinsert_core::GateType;
/// use qinsert_noise::GateHierarchy;
///
/// let mut hierarchy = GateHierarchy::new();
/// hierarchy.register("X", "Pauli").unwrap();
/// hierarchy.register("Pauli", "Gate").unwrap();
///
/// assert!(hierarchy.is_subtype(&GateType::new("X"), &GateType::new("Gate")));
/// assert!(!hierarchy.is_subtype(&GateType::new("Gate"), &GateType::new("X")));
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<HierarchyEdge>", into = "Vec<HierarchyEdge>")]
pub struct GateHierarchy {
    nodes: Vec<TypeNode>,
    index: AHashMap<GateType, usize>,
    // (child, parent) in registration order
    edges: Vec<(usize, usize)>,
}

impl GateHierarchy {
    /// Create an empty hierarchy
    pub fn new() -> Self {
        Self::default()
    }

    /// Hierarchy covering the built-in gates
    ///
    /// ```text
    /// Gate
    /// ├── SingleQubitGate ── I, H, Pauli (X, Y, Z), Phase (S, T)
    /// ├── TwoQubitGate ───── CZ, CNOT, SWAP
    /// ├── Measurement ────── Measure
    /// ├── NoiseChannel ───── BitFlip, PhaseFlip, Depolarize, AmplitudeDamp
    /// └── Clifford ───────── X, Y, Z, H, S, CZ, CNOT, SWAP
    /// ```
    pub fn standard() -> Self {
        const EDGES: &[(&str, &str)] = &[
            ("SingleQubitGate", "Gate"),
            ("TwoQubitGate", "Gate"),
            ("Measurement", "Gate"),
            ("NoiseChannel", "Gate"),
            ("Clifford", "Gate"),
            ("I", "SingleQubitGate"),
            ("H", "SingleQubitGate"),
            ("Pauli", "SingleQubitGate"),
            ("Phase", "SingleQubitGate"),
            ("X", "Pauli"),
            ("Y", "Pauli"),
            ("Z", "Pauli"),
            ("S", "Phase"),
            ("T", "Phase"),
            ("CZ", "TwoQubitGate"),
            ("CNOT", "TwoQubitGate"),
            ("SWAP", "TwoQubitGate"),
            ("Measure", "Measurement"),
            ("BitFlip", "NoiseChannel"),
            ("PhaseFlip", "NoiseChannel"),
            ("Depolarize", "NoiseChannel"),
            ("AmplitudeDamp", "NoiseChannel"),
            ("X", "Clifford"),
            ("Y", "Clifford"),
            ("Z", "Clifford"),
            ("H", "Clifford"),
            ("S", "Clifford"),
            ("CZ", "Clifford"),
            ("CNOT", "Clifford"),
            ("SWAP", "Clifford"),
        ];

        let mut hierarchy = Self::new();
        for &(child, parent) in EDGES {
            let c = hierarchy.intern(GateType::new(child));
            let p = hierarchy.intern(GateType::new(parent));
            hierarchy.link(c, p);
        }
        hierarchy
    }

    /// Build a hierarchy from edges, in order
    ///
    /// # Errors
    /// Returns [`NoiseError::HierarchyCycle`] if an edge closes a cycle
    pub fn from_edges(edges: impl IntoIterator<Item = HierarchyEdge>) -> Result<Self> {
        let mut hierarchy = Self::new();
        for edge in edges {
            hierarchy.register(edge.child, edge.parent)?;
        }
        Ok(hierarchy)
    }

    /// Declare a type without parents
    ///
    /// Declaring an already known type has no effect. Only edges are
    /// persisted and compared, so a type that is declared but never linked
    /// is dropped by serialization and ignored by `==`. Declaring a type
    /// does not change any subtype answer, since unknown types are already
    /// subtypes of themselves only.
    pub fn declare(&mut self, gate_type: impl Into<GateType>) {
        self.intern(gate_type.into());
    }

    /// Register `child` as a subtype of `parent`
    ///
    /// Unknown names are declared on the fly. Registering an existing edge is
    /// a no-op.
    ///
    /// # Errors
    /// Returns [`NoiseError::HierarchyCycle`] if `parent` already derives
    /// from `child` (including `child == parent`).
    pub fn register(&mut self, child: impl Into<GateType>, parent: impl Into<GateType>) -> Result<()> {
        let child = child.into();
        let parent = parent.into();

        if self.is_subtype(&parent, &child) {
            return Err(NoiseError::HierarchyCycle { child, parent });
        }

        let c = self.intern(child);
        let p = self.intern(parent);
        self.link(c, p);
        Ok(())
    }

    /// Whether `gate_type` is known
    pub fn contains(&self, gate_type: &GateType) -> bool {
        self.index.contains_key(gate_type)
    }

    /// Direct parents of `gate_type`, in registration order
    pub fn parents(&self, gate_type: &GateType) -> Vec<&GateType> {
        self.index
            .get(gate_type)
            .map(|&idx| {
                self.nodes[idx]
                    .parents
                    .iter()
                    .map(|&p| &self.nodes[p].name)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Whether `sub` equals `sup` or derives from it
    ///
    /// Types that were never registered are subtypes of themselves only.
    pub fn is_subtype(&self, sub: &GateType, sup: &GateType) -> bool {
        if sub == sup {
            return true;
        }
        let (Some(&start), Some(&target)) = (self.index.get(sub), self.index.get(sup)) else {
            return false;
        };

        let mut visited = vec![false; self.nodes.len()];
        let mut stack: SmallVec<[usize; 8]> = SmallVec::new();
        stack.push(start);
        while let Some(idx) = stack.pop() {
            if idx == target {
                return true;
            }
            if std::mem::replace(&mut visited[idx], true) {
                continue;
            }
            stack.extend(self.nodes[idx].parents.iter().copied());
        }
        false
    }

    /// Whether `sub` derives from `sup` and differs from it
    pub fn is_strict_subtype(&self, sub: &GateType, sup: &GateType) -> bool {
        sub != sup && self.is_subtype(sub, sup)
    }

    /// Whether one of the two types derives from the other
    pub fn are_comparable(&self, a: &GateType, b: &GateType) -> bool {
        self.is_subtype(a, b) || self.is_subtype(b, a)
    }

    /// Registered edges, in registration order
    pub fn edges(&self) -> Vec<HierarchyEdge> {
        self.edges
            .iter()
            .map(|&(c, p)| HierarchyEdge {
                child: self.nodes[c].name.clone(),
                parent: self.nodes[p].name.clone(),
            })
            .collect()
    }

    /// Number of known types
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if no type is known
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn intern(&mut self, gate_type: GateType) -> usize {
        if let Some(&idx) = self.index.get(&gate_type) {
            return idx;
        }
        let idx = self.nodes.len();
        self.index.insert(gate_type.clone(), idx);
        self.nodes.push(TypeNode {
            name: gate_type,
            parents: SmallVec::new(),
        });
        idx
    }

    fn link(&mut self, child: usize, parent: usize) {
        if self.nodes[child].parents.contains(&parent) {
            return;
        }
        self.nodes[child].parents.push(parent);
        self.edges.push((child, parent));
    }
}

/// Equal when the registered edges are equal, in the same order
impl PartialEq for GateHierarchy {
    fn eq(&self, other: &Self) -> bool {
        self.edges() == other.edges()
    }
}

impl TryFrom<Vec<HierarchyEdge>> for GateHierarchy {
    type Error = NoiseError;

    fn try_from(edges: Vec<HierarchyEdge>) -> Result<Self> {
        Self::from_edges(edges)
    }
}

impl From<GateHierarchy> for Vec<HierarchyEdge> {
    fn from(hierarchy: GateHierarchy) -> Self {
        hierarchy.edges()
    }
}
