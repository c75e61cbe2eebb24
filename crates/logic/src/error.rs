//! Error types.

use crate::gate::GateKind;

/// Errors produced when configuring or evaluating a single gate.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GateError {
    /// The two-letter gate mnemonic is not one of the known kinds.
    #[error("unknown gate type '{0}'")]
    UnknownMnemonic(String),

    /// The requested number of input pins is not allowed for the kind.
    #[error("{kind} gate cannot have {arity} inputs")]
    InvalidArity { kind: GateKind, arity: usize },

    /// Pin index past the end of the gate's pin list.
    #[error("pin {pin} out of range for gate with {arity} inputs")]
    PinOutOfRange { pin: usize, arity: usize },

    /// Source id 0 is reserved for unset pins.
    #[error("pin {pin} cannot be connected to source 0")]
    ZeroSource { pin: usize },

    /// The number of values handed to `evaluate` differs from the gate's
    /// pin count.
    #[error("gate expects {expected} input values, got {got}")]
    ArityMismatch { expected: usize, got: usize },
}

/// Error returned when text does not name a [`TriState`](crate::TriState).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid logic value '{0}', expected one of T, F, ?")]
pub struct ParseTriStateError(pub String);
