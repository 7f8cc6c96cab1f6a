//! Property-based tests for matching and moment packing

use proptest::prelude::*;
use qinsert_core::{Moment, Operation, StandardGate};
use qinsert_noise::{
    GateHierarchy, InsertionNoiseConfig, InsertionNoiseModel, MomentAssembler, NoiseModel,
    OpIdentifier, PackingStrategy, RuleMatcher, RuleTable,
};
use std::collections::HashSet;

const NUM_QUBITS: usize = 6;

fn single_qubit_gate() -> impl Strategy<Value = StandardGate> {
    prop_oneof![
        Just(StandardGate::X),
        Just(StandardGate::Y),
        Just(StandardGate::Z),
        Just(StandardGate::H),
        Just(StandardGate::S),
        Just(StandardGate::T),
        (0.0f64..1.0).prop_map(StandardGate::BitFlip),
        (0.0f64..1.0).prop_map(StandardGate::Depolarize),
    ]
}

fn two_qubit_gate() -> impl Strategy<Value = StandardGate> {
    prop_oneof![Just(StandardGate::CZ), Just(StandardGate::CNOT), Just(StandardGate::SWAP)]
}

/// An operation on one or two distinct qubits
fn operation() -> impl Strategy<Value = Operation> {
    prop_oneof![
        (single_qubit_gate(), 0..NUM_QUBITS)
            .prop_map(|(gate, q)| Operation::on(gate, &[q]).unwrap()),
        (two_qubit_gate(), 0..NUM_QUBITS, 1..NUM_QUBITS).prop_map(|(gate, a, offset)| {
            let b = (a + offset) % NUM_QUBITS;
            Operation::on(gate, &[a, b]).unwrap()
        }),
    ]
}

/// A moment built greedily from random operations, dropping conflicts
fn moment() -> impl Strategy<Value = Moment> {
    prop::collection::vec(operation(), 0..8).prop_map(|ops| {
        let mut moment = Moment::empty();
        for op in ops {
            let _ = moment.try_add(op);
        }
        moment
    })
}

fn pattern() -> impl Strategy<Value = OpIdentifier> {
    let classes = prop_oneof![
        Just("Gate"),
        Just("SingleQubitGate"),
        Just("TwoQubitGate"),
        Just("Pauli"),
        Just("Clifford"),
        Just("X"),
        Just("Z"),
        Just("CZ"),
    ];
    (classes, prop::option::of(0..NUM_QUBITS)).prop_map(|(class, qubit)| match qubit {
        Some(q) if class != "CZ" && class != "TwoQubitGate" => OpIdentifier::on(class, &[q]),
        _ => OpIdentifier::new(class),
    })
}

fn is_conflict_free(moment: &Moment) -> bool {
    let mut seen = HashSet::new();
    moment
        .iter()
        .flat_map(|op| op.qubits().iter().copied())
        .all(|q| seen.insert(q))
}

proptest! {
    /// Property: every packed moment keeps the disjoint-qubit invariant and
    /// no operation is lost or duplicated
    #[test]
    fn packing_is_conflict_free(
        ops in prop::collection::vec(operation(), 0..24),
        earliest in any::<bool>(),
    ) {
        let strategy = if earliest { PackingStrategy::Earliest } else { PackingStrategy::FirstFit };
        let packed = MomentAssembler::new(strategy).pack(ops.clone());

        prop_assert!(packed.iter().all(is_conflict_free));
        prop_assert!(packed.iter().all(|m| !m.is_empty()));

        let total: usize = packed.iter().map(Moment::len).sum();
        prop_assert_eq!(total, ops.len());
        prop_assert!(packed.len() <= ops.len());
    }

    /// Property: first-fit never opens a moment an operation could have joined
    #[test]
    fn first_fit_opens_moments_only_when_needed(
        ops in prop::collection::vec(operation(), 1..24),
    ) {
        let packed = MomentAssembler::new(PackingStrategy::FirstFit).pack(ops);
        for (i, moment) in packed.iter().enumerate().skip(1) {
            let opener = &moment.operations()[0];
            for earlier in &packed[..i] {
                prop_assert!(!earlier.can_add(opener.qubits()));
            }
        }
    }

    /// Property: the result always contains the original moment unchanged,
    /// at the end when prepending and at the start otherwise
    #[test]
    fn original_moment_is_kept(
        m in moment(),
        noise in prop::collection::vec(operation(), 0..6),
        prepend in any::<bool>(),
    ) {
        let result = MomentAssembler::default().emit(m.clone(), noise.clone(), prepend);
        if noise.is_empty() {
            prop_assert_eq!(result, vec![m]);
        } else if prepend {
            prop_assert_eq!(result.last(), Some(&m));
        } else {
            prop_assert_eq!(result.first(), Some(&m));
        }
    }

    /// Property: no matching rule declared after the winner is more specific
    /// than it, whichever order the rules were declared in
    #[test]
    fn winner_is_not_displaced_by_later_rules(
        patterns in prop::collection::vec(pattern(), 1..8),
        op in operation(),
    ) {
        let hierarchy = GateHierarchy::standard();
        let noise = Operation::on(StandardGate::Z, &[0]).unwrap();
        let forward: RuleTable = patterns.iter().cloned().map(|p| (p, noise.clone())).collect();
        let backward: RuleTable = patterns.iter().rev().cloned().map(|p| (p, noise.clone())).collect();

        for table in [&forward, &backward] {
            let matcher = RuleMatcher::new(table, &hierarchy, false);
            match matcher.best_match(&op) {
                Some(winner) => {
                    prop_assert!(winner.pattern.matches(&op, &hierarchy));
                    let winner_pos = table.position(&winner.pattern).unwrap();
                    for (pos, rule) in table.iter().enumerate().skip(winner_pos + 1) {
                        if rule.pattern.matches(&op, &hierarchy) {
                            prop_assert!(
                                !rule.pattern.is_proper_subtype_of(&winner.pattern, &hierarchy),
                                "rule {} at {} beats winner {}", rule.pattern, pos, winner.pattern
                            );
                        }
                    }
                }
                None => {
                    prop_assert!(table.iter().all(|r| !r.pattern.matches(&op, &hierarchy)));
                }
            }
        }
    }

    /// Property: exporting and importing a model does not change its output
    #[test]
    fn json_round_trip_preserves_output(
        patterns in prop::collection::vec(pattern(), 0..6),
        noise in prop::collection::vec(operation(), 6),
        moments in prop::collection::vec(moment(), 1..5),
        prepend in any::<bool>(),
    ) {
        let config = InsertionNoiseConfig::new()
            .with_rules(patterns.into_iter().zip(noise))
            .with_prepend(prepend)
            .with_require_physical_tag(false);
        let model = InsertionNoiseModel::new(config).unwrap();
        let restored = InsertionNoiseModel::from_json(&model.to_json().unwrap()).unwrap();

        prop_assert_eq!(&restored, &model);
        prop_assert_eq!(
            restored.noisy_moments(&moments, &[]),
            model.noisy_moments(&moments, &[])
        );
    }
}
