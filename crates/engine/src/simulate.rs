//! Fixpoint propagation of three-valued signals through a circuit.

use fixedbitset::FixedBitSet;
use tracing::{debug, trace};
use trickt_logic::{Source, SourceId, TriState};

use crate::circuit::Circuit;
use crate::error::SimulateError;

/// Scratch state for one simulation run.
///
/// The circuit is only ever read during simulation; every value produced
/// lands here instead. Keeping one `SimState` per thread lets several
/// threads simulate the same circuit at once, and reusing it across runs
/// avoids reallocating.
#[derive(Debug, Clone, Default)]
pub struct SimState {
    /// Current output of each gate, indexed by `gate id - 1`.
    gates: Vec<TriState>,

    /// Resolved circuit outputs, indexed by `output id - 1`.
    outputs: Vec<TriState>,

    /// Gates whose output is still `Undefined`.
    pending: FixedBitSet,

    /// Pin values for the gate being evaluated.
    pins: Vec<TriState>,

    /// Number of passes the last run took.
    passes: usize,
}

impl SimState {
    /// Creates an empty state. It grows to fit the first circuit it is used
    /// with.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a state preallocated for `circuit`.
    pub fn for_circuit(circuit: &Circuit) -> Self {
        let mut state = Self::new();
        state.reset(circuit.num_gates(), circuit.num_outputs());
        state
    }

    fn reset(&mut self, num_gates: usize, num_outputs: usize) {
        self.gates.clear();
        self.gates.resize(num_gates, TriState::Undefined);
        self.outputs.clear();
        self.outputs.resize(num_outputs, TriState::Undefined);
        if self.pending.len() == num_gates {
            self.pending.clear();
        } else {
            self.pending = FixedBitSet::with_capacity(num_gates);
        }
        self.pending.insert_range(..);
        self.passes = 0;
    }

    /// Output of gate `id` after the last run.
    pub fn gate_output(&self, id: usize) -> Option<TriState> {
        self.gates.get(id.checked_sub(1)?).copied()
    }

    /// Outputs of every gate, indexed by `gate id - 1`.
    pub fn gate_outputs(&self) -> &[TriState] {
        &self.gates
    }

    /// Circuit outputs, in output order.
    pub fn outputs(&self) -> &[TriState] {
        &self.outputs
    }

    /// Number of passes over the gates the last run needed.
    pub fn passes(&self) -> usize {
        self.passes
    }

    /// Ids of gates left `Undefined` by the last run.
    pub fn unresolved(&self) -> impl Iterator<Item = usize> + '_ {
        self.pending.ones().map(|i| i + 1)
    }

    /// If every gate reached a determinate value.
    pub fn is_settled(&self) -> bool {
        self.pending.is_clear()
    }

    fn into_outputs(self) -> Vec<TriState> {
        self.outputs
    }
}

/// Reads the current value of `source`.
///
/// Anything that does not resolve reads as `Undefined`; validation has
/// already ruled that out by the time this is called.
fn resolve(source: SourceId, inputs: &[TriState], gates: &[TriState]) -> TriState {
    let value = match source.source() {
        Some(Source::Input(k)) => inputs.get(k - 1),
        Some(Source::Gate(k)) => gates.get(k - 1),
        None => None,
    };
    value.copied().unwrap_or_default()
}

impl Circuit {
    /// Simulates the circuit on `inputs` and returns the circuit outputs.
    ///
    /// See [`simulate_with`](Self::simulate_with).
    pub fn simulate(&self, inputs: &[TriState]) -> Result<Vec<TriState>, SimulateError> {
        let mut state = SimState::for_circuit(self);
        self.simulate_with(inputs, &mut state)?;
        Ok(state.into_outputs())
    }

    /// Simulates the circuit on `inputs`, leaving gate and circuit outputs in
    /// `state`.
    ///
    /// Every gate starts `Undefined`. Each pass re-evaluates the gates that
    /// are still `Undefined` using the current values of their sources, and
    /// passes repeat until either every gate is determinate or a pass
    /// resolves nothing new. Since the gate functions are monotone a gate
    /// never leaves a determinate value, so this needs at most one pass per
    /// gate plus one. Gates caught in a cycle that the inputs do not break,
    /// or fed by `Undefined` inputs, stay `Undefined`; that is a result, not
    /// an error.
    pub fn simulate_with(
        &self,
        inputs: &[TriState],
        state: &mut SimState,
    ) -> Result<(), SimulateError> {
        self.validate()?;
        if inputs.len() != self.num_inputs() {
            return Err(SimulateError::InputCount {
                expected: self.num_inputs(),
                got: inputs.len(),
            });
        }

        state.reset(self.num_gates(), self.num_outputs());
        let SimState {
            gates: values,
            outputs,
            pending,
            pins,
            passes,
        } = state;

        loop {
            *passes += 1;
            let mut resolved = 0usize;

            for (idx, slot) in self.gate_slots().map(|(id, g)| (id - 1, g)) {
                if !pending.contains(idx) {
                    continue;
                }
                // Every slot is filled, checked by validate above.
                let Some(gate) = slot else {
                    continue;
                };

                pins.clear();
                pins.extend(gate.inputs().iter().map(|s| resolve(*s, inputs, values)));
                let out = gate.kind().evaluate(pins);

                if out.is_defined() {
                    values[idx] = out;
                    pending.set(idx, false);
                    resolved += 1;
                }
            }

            trace!(pass = *passes, resolved, "propagation pass");
            if resolved == 0 || pending.is_clear() {
                break;
            }
        }

        for (out, source) in outputs.iter_mut().zip(self.output_sources()) {
            *out = resolve(*source, inputs, values);
        }

        debug!(
            passes = *passes,
            gates = self.num_gates(),
            unresolved = pending.count_ones(..),
            "simulation finished"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use trickt_logic::TriState::{False as F, True as T, Undefined as U};
    use trickt_logic::{Gate, GateKind};

    use super::*;
    use crate::validate::Violation;

    fn ids(raw: &[i32]) -> Vec<SourceId> {
        raw.iter().copied().map(SourceId::from).collect()
    }

    /// Builds a circuit from `(kind, sources)` gate specs and output sources.
    fn build(num_inputs: usize, gates: &[(GateKind, &[i32])], outputs: &[i32]) -> Circuit {
        let mut c = Circuit::with_size(num_inputs, outputs.len(), gates.len()).unwrap();
        for (i, (kind, srcs)) in gates.iter().enumerate() {
            c.set_gate(i + 1, Gate::with_inputs(*kind, ids(srcs)).unwrap())
                .unwrap();
        }
        for (i, src) in outputs.iter().enumerate() {
            c.set_output(i + 1, SourceId::from(*src)).unwrap();
        }
        c
    }

    #[test]
    fn test_single_and_gate() {
        let c = build(2, &[(GateKind::And, &[-1, -2])], &[1]);
        assert_eq!(c.simulate(&[T, T]).unwrap(), vec![T]);
        assert_eq!(c.simulate(&[T, F]).unwrap(), vec![F]);
        assert_eq!(c.simulate(&[T, U]).unwrap(), vec![U]);
        assert_eq!(c.simulate(&[U, F]).unwrap(), vec![F]);
    }

    #[test]
    fn test_single_not_gate() {
        let c = build(1, &[(GateKind::Not, &[-1])], &[1]);
        assert_eq!(c.simulate(&[T]).unwrap(), vec![F]);
        assert_eq!(c.simulate(&[U]).unwrap(), vec![U]);
    }

    #[test]
    fn test_output_directly_from_input() {
        let c = build(2, &[(GateKind::Or, &[-1, -2])], &[1, -2]);
        assert_eq!(c.simulate(&[F, T]).unwrap(), vec![T, T]);
        assert_eq!(c.simulate(&[F, U]).unwrap(), vec![U, U]);
    }

    #[test]
    fn test_forward_references_need_no_ordering() {
        // Gate 1 reads gate 2 which reads gate 3: listed against dependency
        // order, so each pass resolves one more gate.
        let c = build(
            2,
            &[
                (GateKind::Not, &[2]),
                (GateKind::Not, &[3]),
                (GateKind::Xor, &[-1, -2]),
            ],
            &[1],
        );
        let mut state = SimState::new();
        c.simulate_with(&[T, F], &mut state).unwrap();
        assert_eq!(state.outputs(), &[T]);
        assert_eq!(state.gate_outputs(), &[T, F, T]);
        assert!(state.is_settled());
        assert_eq!(state.passes(), 3);
    }

    #[test]
    fn test_self_loop_stays_undefined() {
        let c = build(1, &[(GateKind::Xor, &[-1, 1])], &[1]);
        for x in TriState::ALL {
            let mut state = SimState::new();
            c.simulate_with(&[x], &mut state).unwrap();
            assert_eq!(state.outputs(), &[U]);
            assert!(!state.is_settled());
            assert_eq!(state.unresolved().collect::<Vec<_>>(), vec![1]);
        }

        let c = build(1, &[(GateKind::And, &[-1, 1])], &[1]);
        assert_eq!(c.simulate(&[T]).unwrap(), vec![U]);
        // A controlling value breaks the loop.
        assert_eq!(c.simulate(&[F]).unwrap(), vec![F]);
    }

    #[test]
    fn test_cycle_downstream_is_undefined() {
        // Gates 1 and 2 form a loop; gate 3 depends on it, gate 4 does not.
        let c = build(
            2,
            &[
                (GateKind::Not, &[2]),
                (GateKind::Not, &[1]),
                (GateKind::Or, &[1, -1]),
                (GateKind::And, &[-1, -2]),
            ],
            &[3, 4],
        );
        let mut state = SimState::new();
        c.simulate_with(&[F, T], &mut state).unwrap();
        assert_eq!(state.outputs(), &[U, F]);
        assert_eq!(state.unresolved().collect::<Vec<_>>(), vec![1, 2, 3]);

        // OR with a true input does not need the loop.
        assert_eq!(c.simulate(&[T, T]).unwrap(), vec![T, T]);
    }

    #[test]
    fn test_state_reuse_across_runs() {
        let c = build(2, &[(GateKind::Nand, &[-1, -2])], &[1]);
        let mut state = SimState::for_circuit(&c);
        c.simulate_with(&[T, T], &mut state).unwrap();
        assert_eq!(state.outputs(), &[F]);
        c.simulate_with(&[U, T], &mut state).unwrap();
        assert_eq!(state.outputs(), &[U]);
        assert_eq!(state.gate_output(1), Some(U));
        assert_eq!(state.gate_output(2), None);

        // A state used with a different circuit is resized.
        let big = build(
            1,
            &[(GateKind::Not, &[-1]), (GateKind::Not, &[1])],
            &[2, 1, -1],
        );
        big.simulate_with(&[T], &mut state).unwrap();
        assert_eq!(state.outputs(), &[T, F, T]);
        assert_eq!(state.gate_outputs().len(), 2);
    }

    #[test]
    fn test_refuses_invalid_circuit() {
        let mut c = Circuit::with_size(2, 1, 1).unwrap();
        c.set_gate_type(1, "AN", 2).unwrap();
        c.set_output(1, SourceId::gate(1)).unwrap();
        let err = c.simulate(&[T, T]).unwrap_err();
        match err {
            SimulateError::Invalid(report) => assert!(matches!(
                report.first(),
                Violation::GateInput { gate: 1, pin: 0, .. }
            )),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_refuses_wrong_input_count() {
        let c = build(2, &[(GateKind::And, &[-1, -2])], &[1]);
        assert_eq!(
            c.simulate(&[T]),
            Err(SimulateError::InputCount {
                expected: 2,
                got: 1
            })
        );
    }
}
