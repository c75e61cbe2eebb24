//! Circuit representation and the builder operations.

use trickt_logic::{Gate, GateKind, SourceId};

use crate::error::CircuitError;

/// A combinational gate network with numbered inputs and outputs.
///
/// Inputs, gates and outputs are all numbered from 1. Gates refer to their
/// drivers through [`SourceId`]s, which may point at any gate including ones
/// with a larger id, so no topological order is required.
///
/// A circuit is built in stages: [`resize`](Self::resize) allocates empty gate
/// slots and unset outputs, then the `set_*` methods fill them in. Only a
/// circuit that passes [`validate`](Self::validate) can be simulated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Circuit {
    /// The number of inputs.
    num_inputs: usize,

    /// Gate slots, indexed by `gate id - 1`. `None` until assigned.
    gates: Vec<Option<Gate>>,

    /// Source feeding each circuit output, indexed by `output id - 1`.
    outputs: Vec<SourceId>,
}

impl Circuit {
    /// Creates an empty circuit with every count at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a circuit already sized with [`resize`](Self::resize).
    pub fn with_size(
        num_inputs: usize,
        num_outputs: usize,
        num_gates: usize,
    ) -> Result<Self, CircuitError> {
        let mut circuit = Self::new();
        circuit.resize(num_inputs, num_outputs, num_gates)?;
        Ok(circuit)
    }

    /// Drops every gate and resets all counts to zero.
    pub fn clear(&mut self) {
        self.num_inputs = 0;
        self.gates.clear();
        self.outputs.clear();
    }

    /// Discards the current contents and allocates `num_gates` empty gate
    /// slots and `num_outputs` unset outputs.
    ///
    /// All three counts must be in `1..=SourceId::MAX_INDEX` and the slots
    /// must be allocatable; otherwise the circuit is left untouched.
    pub fn resize(
        &mut self,
        num_inputs: usize,
        num_outputs: usize,
        num_gates: usize,
    ) -> Result<(), CircuitError> {
        let counts = 1..=SourceId::MAX_INDEX;
        if !counts.contains(&num_inputs)
            || !counts.contains(&num_outputs)
            || !counts.contains(&num_gates)
        {
            return Err(CircuitError::InvalidSize {
                inputs: num_inputs,
                outputs: num_outputs,
                gates: num_gates,
            });
        }

        let mut gates = Vec::new();
        let mut outputs = Vec::new();
        gates
            .try_reserve_exact(num_gates)
            .and_then(|()| outputs.try_reserve_exact(num_outputs))
            .map_err(|_| CircuitError::Allocation {
                outputs: num_outputs,
                gates: num_gates,
            })?;
        gates.resize(num_gates, None);
        outputs.resize(num_outputs, SourceId::UNSET);

        self.num_inputs = num_inputs;
        self.gates = gates;
        self.outputs = outputs;
        Ok(())
    }

    /// Number of circuit inputs.
    pub fn num_inputs(&self) -> usize {
        self.num_inputs
    }

    /// Number of circuit outputs.
    pub fn num_outputs(&self) -> usize {
        self.outputs.len()
    }

    /// Number of gate slots, filled or not.
    pub fn num_gates(&self) -> usize {
        self.gates.len()
    }

    /// If `id` is in `1..=num_inputs`.
    pub fn is_valid_input_id(&self, id: usize) -> bool {
        (1..=self.num_inputs).contains(&id)
    }

    /// If `id` is in `1..=num_gates`.
    pub fn is_valid_gate_id(&self, id: usize) -> bool {
        (1..=self.gates.len()).contains(&id)
    }

    /// If `id` is in `1..=num_outputs`.
    pub fn is_valid_output_id(&self, id: usize) -> bool {
        (1..=self.outputs.len()).contains(&id)
    }

    /// If `source` refers to an existing input or gate slot.
    ///
    /// The gate slot itself may still be empty.
    pub fn is_valid_source(&self, source: SourceId) -> bool {
        source.is_within(self.num_inputs, self.gates.len())
    }

    /// If gate slot `id` exists and holds a gate.
    pub fn is_gate_defined(&self, id: usize) -> bool {
        self.gate(id).is_some()
    }

    /// If gate `id` is defined and every pin refers to a valid source.
    pub fn is_gate_valid(&self, id: usize) -> bool {
        self.gate(id)
            .is_some_and(|g| g.inputs().iter().all(|s| self.is_valid_source(*s)))
    }

    /// Gets gate `id`, if the slot exists and is filled.
    pub fn gate(&self, id: usize) -> Option<&Gate> {
        self.gates.get(id.checked_sub(1)?)?.as_ref()
    }

    /// Returns an iterator over `(id, slot)` for every gate slot.
    pub fn gate_slots(&self) -> impl Iterator<Item = (usize, Option<&Gate>)> {
        self.gates.iter().enumerate().map(|(i, g)| (i + 1, g.as_ref()))
    }

    /// Returns an iterator over `(id, gate)` for the filled gate slots.
    pub fn gates(&self) -> impl Iterator<Item = (usize, &Gate)> {
        self.gate_slots().filter_map(|(id, g)| Some((id, g?)))
    }

    /// Source feeding output `id`, or `None` if the id is out of range.
    ///
    /// An output that has not been connected yet reports
    /// [`SourceId::UNSET`].
    pub fn output_source(&self, id: usize) -> Option<SourceId> {
        self.outputs.get(id.checked_sub(1)?).copied()
    }

    /// Sources of all outputs, in output order.
    pub fn output_sources(&self) -> &[SourceId] {
        &self.outputs
    }

    fn gate_mut(&mut self, id: usize) -> Result<&mut Gate, CircuitError> {
        let num_gates = self.gates.len();
        self.gates
            .get_mut(id.wrapping_sub(1))
            .ok_or(CircuitError::GateIdOutOfRange { id, num_gates })?
            .as_mut()
            .ok_or(CircuitError::UndefinedGate { id })
    }

    fn check_source(&self, source: SourceId) -> Result<(), CircuitError> {
        if self.is_valid_source(source) {
            Ok(())
        } else {
            Err(CircuitError::InvalidSource { source_id: source })
        }
    }

    /// Places `gate` in slot `id`, replacing whatever was there.
    ///
    /// The gate's pins are not checked against the circuit here, that
    /// happens in [`validate`](Self::validate).
    pub fn set_gate(&mut self, id: usize, gate: Gate) -> Result<(), CircuitError> {
        if !self.is_valid_gate_id(id) {
            return Err(CircuitError::GateIdOutOfRange {
                id,
                num_gates: self.gates.len(),
            });
        }
        self.gates[id - 1] = Some(gate);
        Ok(())
    }

    /// Places a fresh gate of the kind named by `mnemonic` with `arity`
    /// unconnected pins in slot `id`.
    pub fn set_gate_type(
        &mut self,
        id: usize,
        mnemonic: &str,
        arity: usize,
    ) -> Result<(), CircuitError> {
        let gate = GateKind::from_mnemonic(mnemonic)
            .and_then(|kind| Gate::with_arity(kind, arity))
            .map_err(|source| CircuitError::Gate { id, source })?;
        self.set_gate(id, gate)
    }

    /// Connects pin `pin` (0-based) of gate `id` to `source`.
    pub fn set_gate_input(
        &mut self,
        id: usize,
        pin: usize,
        source: SourceId,
    ) -> Result<(), CircuitError> {
        self.check_source(source)?;
        self.gate_mut(id)?
            .set_input(pin, source)
            .map_err(|source| CircuitError::Gate { id, source })
    }

    /// Connects circuit output `id` to `source`.
    pub fn set_output(&mut self, id: usize, source: SourceId) -> Result<(), CircuitError> {
        if !self.is_valid_output_id(id) {
            return Err(CircuitError::OutputIdOutOfRange {
                id,
                num_outputs: self.outputs.len(),
            });
        }
        self.check_source(source)?;
        self.outputs[id - 1] = source;
        Ok(())
    }
}
