//! Randomised checks of fixpoint propagation.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use trickt_engine::{Circuit, Gate, GateKind, SimState, Source, SourceId, TriState};

/// A random circuit plus its gate ids in dependency order.
struct Generated {
    circuit: Circuit,
    topo_order: Vec<usize>,
}

fn random_kind(rng: &mut ChaCha20Rng) -> GateKind {
    GateKind::ALL[rng.random_range(0..GateKind::ALL.len())]
}

fn random_arity(rng: &mut ChaCha20Rng, kind: GateKind) -> usize {
    match kind {
        GateKind::Not => 1,
        _ => rng.random_range(2..=4),
    }
}

/// Generates an acyclic circuit whose gate ids are shuffled so that index
/// order says nothing about evaluation order.
fn random_dag(
    rng: &mut ChaCha20Rng,
    num_inputs: usize,
    num_gates: usize,
    num_outputs: usize,
) -> Generated {
    let mut ids: Vec<usize> = (1..=num_gates).collect();
    ids.shuffle(rng);

    let mut circuit = Circuit::with_size(num_inputs, num_outputs, num_gates).unwrap();
    for t in 0..num_gates {
        let kind = random_kind(rng);
        let arity = random_arity(rng, kind);
        let sources: Vec<SourceId> = (0..arity)
            .map(|_| {
                let r = rng.random_range(0..num_inputs + t);
                if r < num_inputs {
                    SourceId::input(r + 1)
                } else {
                    SourceId::gate(ids[r - num_inputs])
                }
            })
            .collect();
        circuit
            .set_gate(ids[t], Gate::with_inputs(kind, sources).unwrap())
            .unwrap();
    }

    for o in 1..=num_outputs {
        let r = rng.random_range(0..num_inputs + num_gates);
        let src = if r < num_inputs {
            SourceId::input(r + 1)
        } else {
            SourceId::gate(r - num_inputs + 1)
        };
        circuit.set_output(o, src).unwrap();
    }

    Generated {
        circuit,
        topo_order: ids,
    }
}

/// Generates a circuit where any pin may read any gate, cycles included.
fn random_cyclic(rng: &mut ChaCha20Rng, num_inputs: usize, num_gates: usize) -> Circuit {
    let mut circuit = Circuit::with_size(num_inputs, num_gates, num_gates).unwrap();
    for id in 1..=num_gates {
        let kind = random_kind(rng);
        let arity = random_arity(rng, kind);
        let sources: Vec<SourceId> = (0..arity)
            .map(|_| {
                if rng.random_bool(0.3) {
                    SourceId::input(rng.random_range(1..=num_inputs))
                } else {
                    SourceId::gate(rng.random_range(1..=num_gates))
                }
            })
            .collect();
        circuit
            .set_gate(id, Gate::with_inputs(kind, sources).unwrap())
            .unwrap();
        circuit.set_output(id, SourceId::gate(id)).unwrap();
    }
    circuit
}

fn random_inputs(rng: &mut ChaCha20Rng, n: usize, p_undefined: f64) -> Vec<TriState> {
    (0..n)
        .map(|_| {
            if rng.random_bool(p_undefined) {
                TriState::Undefined
            } else {
                TriState::from(rng.random_bool(0.5))
            }
        })
        .collect()
}

fn read(source: SourceId, inputs: &[TriState], gates: &[TriState]) -> TriState {
    match source.source() {
        Some(Source::Input(k)) => inputs[k - 1],
        Some(Source::Gate(k)) => gates[k - 1],
        None => panic!("unset source"),
    }
}

/// Evaluates each gate once, in dependency order.
fn reference_eval(g: &Generated, inputs: &[TriState]) -> Vec<TriState> {
    let mut values = vec![TriState::Undefined; g.circuit.num_gates()];
    for &id in &g.topo_order {
        let gate = g.circuit.gate(id).unwrap();
        let pins: Vec<TriState> = gate
            .inputs()
            .iter()
            .map(|s| read(*s, inputs, &values))
            .collect();
        values[id - 1] = gate.evaluate(&pins).unwrap();
    }
    values
}

#[test]
fn test_matches_dependency_order_evaluation() {
    let mut rng = ChaCha20Rng::seed_from_u64(0x7157);
    let mut state = SimState::new();

    for round in 0..200 {
        let num_inputs = rng.random_range(1..=6);
        let num_gates = rng.random_range(1..=40);
        let g = random_dag(&mut rng, num_inputs, num_gates, 4);
        let p_undefined = if round % 2 == 0 { 0.0 } else { 0.3 };
        let inputs = random_inputs(&mut rng, num_inputs, p_undefined);

        g.circuit.simulate_with(&inputs, &mut state).unwrap();
        let expected = reference_eval(&g, &inputs);
        assert_eq!(state.gate_outputs(), expected.as_slice(), "round {round}");

        let expected_outputs: Vec<TriState> = g
            .circuit
            .output_sources()
            .iter()
            .map(|s| read(*s, &inputs, &expected))
            .collect();
        assert_eq!(state.outputs(), expected_outputs.as_slice());

        if p_undefined == 0.0 {
            assert!(state.is_settled(), "round {round}: defined inputs must settle");
        }
        assert!(state.passes() <= num_gates + 1);
    }
}

#[test]
fn test_undefined_inputs_only_lose_information() {
    let mut rng = ChaCha20Rng::seed_from_u64(42);

    for _ in 0..100 {
        let num_inputs = rng.random_range(2..=6);
        let g = random_dag(&mut rng, num_inputs, 30, 6);
        let full = random_inputs(&mut rng, num_inputs, 0.0);
        let partial: Vec<TriState> = full
            .iter()
            .map(|v| {
                if rng.random_bool(0.4) {
                    TriState::Undefined
                } else {
                    *v
                }
            })
            .collect();

        let full_out = g.circuit.simulate(&full).unwrap();
        let partial_out = g.circuit.simulate(&partial).unwrap();
        for (p, f) in partial_out.iter().zip(&full_out) {
            assert!(!p.is_defined() || p == f, "{partial:?} gave {p}, {full:?} gave {f}");
        }
    }
}

#[test]
fn test_cyclic_circuits_reach_a_fixpoint() {
    let mut rng = ChaCha20Rng::seed_from_u64(1234);
    let mut state = SimState::new();

    for _ in 0..200 {
        let num_inputs = rng.random_range(1..=4);
        let num_gates = rng.random_range(1..=25);
        let c = random_cyclic(&mut rng, num_inputs, num_gates);
        let inputs = random_inputs(&mut rng, num_inputs, 0.2);

        c.simulate_with(&inputs, &mut state).unwrap();
        assert!(state.passes() <= num_gates + 1);

        // Re-evaluating any gate on the final values changes nothing.
        let values = state.gate_outputs();
        for (id, gate) in c.gates() {
            let pins: Vec<TriState> = gate
                .inputs()
                .iter()
                .map(|s| read(*s, &inputs, values))
                .collect();
            assert_eq!(gate.evaluate(&pins).unwrap(), values[id - 1], "gate {id}");
        }

        let unresolved: Vec<usize> = state.unresolved().collect();
        let undefined: Vec<usize> = (1..=num_gates)
            .filter(|id| !values[id - 1].is_defined())
            .collect();
        assert_eq!(unresolved, undefined);
        assert_eq!(state.outputs(), values);
    }
}

#[test]
fn test_simulation_is_reentrant() {
    let mut rng = ChaCha20Rng::seed_from_u64(99);
    let g = random_dag(&mut rng, 5, 60, 5);
    let vectors: Vec<Vec<TriState>> = (0..32).map(|_| random_inputs(&mut rng, 5, 0.2)).collect();
    let expected: Vec<Vec<TriState>> = vectors
        .iter()
        .map(|v| g.circuit.simulate(v).unwrap())
        .collect();

    let circuit = &g.circuit;
    std::thread::scope(|s| {
        let handles: Vec<_> = vectors
            .chunks(8)
            .map(|chunk| {
                s.spawn(move || {
                    let mut state = SimState::for_circuit(circuit);
                    chunk
                        .iter()
                        .map(|v| {
                            circuit.simulate_with(v, &mut state).unwrap();
                            state.outputs().to_vec()
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        let got: Vec<Vec<TriState>> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        assert_eq!(got, expected);
    });
}
