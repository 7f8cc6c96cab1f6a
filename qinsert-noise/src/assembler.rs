//! Moment assembly: packing noise operations into conflict-free moments
//!
//! Noise operations are grouped into as few moments as the chosen greedy
//! strategy finds, then spliced next to the moment that triggered them.
//! Both strategies are single-pass heuristics over the input order, not a
//! search for the global minimum depth.

use qinsert_core::{Moment, Operation};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// How noise operations are packed into moments
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PackingStrategy {
    /// Place each operation in the first moment with no qubit conflict
    #[default]
    FirstFit,
    /// Place each operation right after the last moment that uses any of
    /// its qubits, keeping the per-qubit order of the input
    Earliest,
}

/// Packs noise operations and orders them around the original moment
///
/// # Example
/// ```
/// use qinsert_core::{Moment, Operation, StandardGate};
/// use qinsert_noise::MomentAssembler;
///
/// let original = Moment::from_operation(Operation::on(StandardGate::H, &[0]).unwrap());
/// let noise = vec![
///     Operation::on(StandardGate::BitFlip(0.01), &[0]).unwrap(),
///     Operation::on(StandardGate::BitFlip(0.01), &[1]).unwrap(),
/// ];
///
/// let moments = MomentAssembler::default().emit(original.clone(), noise, false);
/// assert_eq!(moments.len(), 2);
/// assert_eq!(moments[0], original);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MomentAssembler {
    strategy: PackingStrategy,
}

impl MomentAssembler {
    /// Create an assembler using `strategy`
    pub fn new(strategy: PackingStrategy) -> Self {
        Self { strategy }
    }

    /// Packing strategy in use
    pub fn strategy(&self) -> PackingStrategy {
        self.strategy
    }

    /// Pack operations into moments whose operations never share a qubit
    ///
    /// Operations are processed in the given order, so the result is
    /// deterministic for a fixed input.
    pub fn pack(&self, ops: impl IntoIterator<Item = Operation>) -> Vec<Moment> {
        let mut moments: Vec<Moment> = Vec::new();
        for op in ops {
            let op = match self.strategy {
                PackingStrategy::FirstFit => place_first_fit(&mut moments, op),
                PackingStrategy::Earliest => place_earliest(&mut moments, op),
            };
            if let Some(op) = op {
                moments.push(Moment::from_operation(op));
            }
        }
        trace!(strategy = ?self.strategy, depth = moments.len(), "packed noise moments");
        moments
    }

    /// Combine `original` with the packed `noise_ops`
    ///
    /// With no noise the result is just `[original]`. Otherwise the packed
    /// moments come before the original when `prepend` is set and after it
    /// when not.
    pub fn emit(&self, original: Moment, noise_ops: Vec<Operation>, prepend: bool) -> Vec<Moment> {
        if noise_ops.is_empty() {
            return vec![original];
        }

        let mut packed = self.pack(noise_ops);
        if prepend {
            packed.push(original);
            packed
        } else {
            let mut moments = Vec::with_capacity(packed.len() + 1);
            moments.push(original);
            moments.append(&mut packed);
            moments
        }
    }
}

/// Try the moments front to back; hand the operation back if none accepts it
fn place_first_fit(moments: &mut [Moment], mut op: Operation) -> Option<Operation> {
    for moment in moments.iter_mut() {
        match moment.try_add(op) {
            Ok(()) => return None,
            Err(rejected) => op = rejected,
        }
    }
    Some(op)
}

/// Place after the last moment touching the operation's qubits
fn place_earliest(moments: &mut [Moment], op: Operation) -> Option<Operation> {
    let start = moments
        .iter()
        .rposition(|m| !m.can_add(op.qubits()))
        .map_or(0, |last| last + 1);
    match moments.get_mut(start) {
        Some(moment) => moment.try_add(op).err(),
        None => Some(op),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qinsert_core::{QubitId, StandardGate};

    fn op(gate: StandardGate, qubits: &[usize]) -> Operation {
        Operation::on(gate, qubits).unwrap()
    }

    fn is_conflict_free(moment: &Moment) -> bool {
        let mut seen = std::collections::HashSet::new();
        moment
            .iter()
            .flat_map(|o| o.qubits().iter().copied())
            .all(|q| seen.insert(q))
    }

    #[test]
    fn test_empty_noise_passes_through() {
        let original = Moment::from_operation(op(StandardGate::X, &[0]));
        let result = MomentAssembler::default().emit(original.clone(), vec![], true);
        assert_eq!(result, vec![original]);
    }

    #[test]
    fn test_disjoint_noise_shares_one_moment() {
        let packed = MomentAssembler::default().pack(vec![
            op(StandardGate::BitFlip(0.1), &[0]),
            op(StandardGate::BitFlip(0.1), &[1]),
            op(StandardGate::Depolarize(0.1), &[2]),
        ]);
        assert_eq!(packed.len(), 1);
        assert_eq!(packed[0].len(), 3);
    }

    #[test]
    fn test_same_qubit_noise_opens_new_moments() {
        let packed = MomentAssembler::default().pack(vec![
            op(StandardGate::BitFlip(0.1), &[0]),
            op(StandardGate::PhaseFlip(0.1), &[0]),
            op(StandardGate::Depolarize(0.1), &[0]),
        ]);
        assert_eq!(packed.len(), 3);
        assert_eq!(packed[2].operations()[0].gate().name(), "Depolarize");
    }

    #[test]
    fn test_first_fit_backfills_earlier_moment() {
        // [X0] [CZ01] then Z1 fits back into the first moment
        let packed = MomentAssembler::new(PackingStrategy::FirstFit).pack(vec![
            op(StandardGate::X, &[0]),
            op(StandardGate::CZ, &[0, 1]),
            op(StandardGate::Z, &[1]),
        ]);
        assert_eq!(packed.len(), 2);
        assert!(packed[0].operates_on(QubitId::new(1)));
        assert_eq!(packed[0].len(), 2);
    }

    #[test]
    fn test_earliest_keeps_per_qubit_order() {
        let packed = MomentAssembler::new(PackingStrategy::Earliest).pack(vec![
            op(StandardGate::X, &[0]),
            op(StandardGate::CZ, &[0, 1]),
            op(StandardGate::Z, &[1]),
            op(StandardGate::H, &[2]),
        ]);
        assert_eq!(packed.len(), 3);
        assert_eq!(packed[0].len(), 2); // X0, H2
        assert_eq!(packed[1].operations()[0].gate().name(), "CZ");
        assert_eq!(packed[2].operations()[0].gate().name(), "Z");
    }

    #[test]
    fn test_prepend_and_append_order() {
        let original = Moment::from_operation(op(StandardGate::H, &[0]));
        let noise = vec![op(StandardGate::BitFlip(0.1), &[0]), op(StandardGate::BitFlip(0.1), &[0])];
        let assembler = MomentAssembler::default();

        let after = assembler.emit(original.clone(), noise.clone(), false);
        assert_eq!(after.len(), 3);
        assert_eq!(after[0], original);

        let before = assembler.emit(original.clone(), noise, true);
        assert_eq!(before.len(), 3);
        assert_eq!(before[2], original);
        assert_eq!(before[0], after[1]);
        assert_eq!(before[1], after[2]);
    }

    #[test]
    fn test_packed_moments_are_conflict_free() {
        let assembler = MomentAssembler::default();
        let packed = assembler.pack(vec![
            op(StandardGate::CNOT, &[0, 1]),
            op(StandardGate::CNOT, &[1, 2]),
            op(StandardGate::CNOT, &[2, 3]),
            op(StandardGate::X, &[3]),
            op(StandardGate::X, &[0]),
        ]);
        assert!(packed.iter().all(is_conflict_free));
        let total: usize = packed.iter().map(Moment::len).sum();
        assert_eq!(total, 5);
    }
}
