//! Error types.

use trickt_logic::{GateError, SourceId};

use crate::validate::ValidationReport;

/// Errors from the circuit builder operations.
///
/// A failed call leaves the circuit exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[allow(missing_docs)]
pub enum CircuitError {
    /// Inputs, outputs and gates must all be at least one and no more than
    /// a source id can address.
    #[error("invalid circuit size: {inputs} inputs, {outputs} outputs, {gates} gates")]
    InvalidSize {
        inputs: usize,
        outputs: usize,
        gates: usize,
    },

    /// Not enough memory for the requested gate and output slots.
    #[error("cannot allocate {gates} gate slots and {outputs} outputs")]
    Allocation { outputs: usize, gates: usize },

    /// Gate id outside `1..=num_gates`.
    #[error("gate id {id} out of range (circuit has {num_gates} gates)")]
    GateIdOutOfRange { id: usize, num_gates: usize },

    /// Output id outside `1..=num_outputs`.
    #[error("output id {id} out of range (circuit has {num_outputs} outputs)")]
    OutputIdOutOfRange { id: usize, num_outputs: usize },

    /// The gate slot has not been assigned a gate yet.
    #[error("gate {id} is not defined")]
    UndefinedGate { id: usize },

    /// Source id that names neither an existing input nor an existing gate.
    #[error("source id {source_id} does not refer to an input or gate of this circuit")]
    InvalidSource { source_id: SourceId },

    /// The gate itself rejected the change.
    #[error("gate {id}: {source}")]
    Gate {
        id: usize,
        #[source]
        source: GateError,
    },
}

/// Errors that prevent a simulation from running.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SimulateError {
    /// The circuit failed validation.
    #[error(transparent)]
    Invalid(#[from] ValidationReport),

    /// The input vector length differs from the circuit's input count.
    #[error("expected {expected} input values, got {got}")]
    InputCount {
        /// Number of circuit inputs.
        expected: usize,
        /// Length of the vector supplied.
        got: usize,
    },
}
