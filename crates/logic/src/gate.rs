//! Logic gates.

use std::fmt;
use std::str::FromStr;

use crate::error::GateError;
use crate::source::SourceId;
use crate::tristate::TriState;

/// Kind of a gate, which determines its truth function and allowed arity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GateKind {
    /// Inverter, exactly one input.
    Not,
    /// Conjunction.
    And,
    /// Inverted conjunction.
    Nand,
    /// Disjunction.
    Or,
    /// Inverted disjunction.
    Nor,
    /// Parity.
    Xor,
    /// Inverted parity.
    Xnor,
}

impl GateKind {
    /// Every gate kind, in the order the text format lists them.
    pub const ALL: [GateKind; 7] = [
        GateKind::Not,
        GateKind::And,
        GateKind::Nand,
        GateKind::Or,
        GateKind::Nor,
        GateKind::Xor,
        GateKind::Xnor,
    ];

    /// Two-letter mnemonic used by the text format.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            GateKind::Not => "NT",
            GateKind::And => "AN",
            GateKind::Nand => "NA",
            GateKind::Or => "OR",
            GateKind::Nor => "NO",
            GateKind::Xor => "XO",
            GateKind::Xnor => "NX",
        }
    }

    /// Looks up a kind by its two-letter mnemonic, ignoring case.
    pub fn from_mnemonic(s: &str) -> Result<Self, GateError> {
        let upper = s.trim().to_ascii_uppercase();
        GateKind::ALL
            .into_iter()
            .find(|k| k.mnemonic() == upper)
            .ok_or_else(|| GateError::UnknownMnemonic(s.to_owned()))
    }

    /// Smallest number of inputs the kind accepts.
    pub const fn min_arity(self) -> usize {
        match self {
            GateKind::Not => 1,
            _ => 2,
        }
    }

    /// Largest number of inputs the kind accepts, if bounded.
    pub const fn max_arity(self) -> Option<usize> {
        match self {
            GateKind::Not => Some(1),
            _ => None,
        }
    }

    /// Arity a freshly created gate of this kind starts with.
    pub const fn default_arity(self) -> usize {
        self.min_arity()
    }

    /// Checks a prospective input count against the kind's constraint.
    pub fn is_valid_arity(self, arity: usize) -> bool {
        arity >= self.min_arity() && self.max_arity().is_none_or(|max| arity <= max)
    }

    /// Applies the truth function to one value per input pin.
    ///
    /// This is total: a NOT given anything other than exactly one value
    /// yields `Undefined`. Use [`Gate::evaluate`] to have the pin count
    /// checked.
    pub fn evaluate(self, inputs: &[TriState]) -> TriState {
        let values = inputs.iter().copied();
        match self {
            GateKind::Not => match inputs {
                [x] => !*x,
                _ => TriState::Undefined,
            },
            GateKind::And => TriState::and_all(values),
            GateKind::Nand => !TriState::and_all(values),
            GateKind::Or => TriState::or_all(values),
            GateKind::Nor => !TriState::or_all(values),
            GateKind::Xor => TriState::xor_all(values),
            GateKind::Xnor => !TriState::xor_all(values),
        }
    }
}

impl fmt::Display for GateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

impl FromStr for GateKind {
    type Err = GateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GateKind::from_mnemonic(s)
    }
}

/// A gate: a kind plus the ordered list of sources feeding its input pins.
///
/// Pins are 0-based. A pin holding [`SourceId::UNSET`] has not been
/// connected yet; the gate is only [complete](Gate::is_complete) once every
/// pin is set. Whether a source actually exists is up to the owning circuit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Gate {
    kind: GateKind,
    inputs: Vec<SourceId>,
}

impl Gate {
    /// Creates a gate with the kind's default arity and no pins connected.
    pub fn new(kind: GateKind) -> Self {
        Self {
            kind,
            inputs: vec![SourceId::UNSET; kind.default_arity()],
        }
    }

    /// Creates a gate with `arity` unconnected pins.
    pub fn with_arity(kind: GateKind, arity: usize) -> Result<Self, GateError> {
        if !kind.is_valid_arity(arity) {
            return Err(GateError::InvalidArity { kind, arity });
        }
        Ok(Self {
            kind,
            inputs: vec![SourceId::UNSET; arity],
        })
    }

    /// Creates a fully connected gate.
    pub fn with_inputs(
        kind: GateKind,
        inputs: impl IntoIterator<Item = SourceId>,
    ) -> Result<Self, GateError> {
        let inputs: Vec<SourceId> = inputs.into_iter().collect();
        if !kind.is_valid_arity(inputs.len()) {
            return Err(GateError::InvalidArity {
                kind,
                arity: inputs.len(),
            });
        }
        if let Some(pin) = inputs.iter().position(|s| s.is_unset()) {
            return Err(GateError::ZeroSource { pin });
        }
        Ok(Self { kind, inputs })
    }

    /// The gate's kind.
    pub fn kind(&self) -> GateKind {
        self.kind
    }

    /// Number of input pins.
    pub fn num_inputs(&self) -> usize {
        self.inputs.len()
    }

    /// Sources of all pins, in pin order.
    pub fn inputs(&self) -> &[SourceId] {
        &self.inputs
    }

    /// Source of pin `pin`, or `None` if out of range.
    pub fn input(&self, pin: usize) -> Option<SourceId> {
        self.inputs.get(pin).copied()
    }

    /// If `pin` names an existing pin.
    pub fn is_valid_pin(&self, pin: usize) -> bool {
        pin < self.inputs.len()
    }

    /// Changes the number of input pins.
    ///
    /// If the count actually changes, every pin is reset to unset.
    pub fn set_num_inputs(&mut self, arity: usize) -> Result<(), GateError> {
        if !self.kind.is_valid_arity(arity) {
            return Err(GateError::InvalidArity {
                kind: self.kind,
                arity,
            });
        }
        if arity != self.inputs.len() {
            self.inputs.clear();
            self.inputs.resize(arity, SourceId::UNSET);
        }
        Ok(())
    }

    /// Connects pin `pin` to `source`.
    pub fn set_input(&mut self, pin: usize, source: SourceId) -> Result<(), GateError> {
        let arity = self.inputs.len();
        let slot = self
            .inputs
            .get_mut(pin)
            .ok_or(GateError::PinOutOfRange { pin, arity })?;
        if source.is_unset() {
            return Err(GateError::ZeroSource { pin });
        }
        *slot = source;
        Ok(())
    }

    /// If the arity is legal for the kind and every pin is connected.
    pub fn is_complete(&self) -> bool {
        self.kind.is_valid_arity(self.inputs.len()) && self.inputs.iter().all(|s| !s.is_unset())
    }

    /// Computes the gate's output from one value per pin.
    pub fn evaluate(&self, inputs: &[TriState]) -> Result<TriState, GateError> {
        if inputs.len() != self.inputs.len() {
            return Err(GateError::ArityMismatch {
                expected: self.inputs.len(),
                got: inputs.len(),
            });
        }
        Ok(self.kind.evaluate(inputs))
    }
}

/// Renders `<MNEMONIC> <arity>: <src1> <src2> ...`.
impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}:", self.kind, self.inputs.len())?;
        for src in &self.inputs {
            write!(f, " {src}")?;
        }
        Ok(())
    }
}
