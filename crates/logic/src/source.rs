//! Signal source identifiers.

use std::fmt;

/// Inner typedef used for raw signed source ids.
pub type RawSourceId = i32;

/// Signed reference to where a signal comes from.
///
/// `-k` is circuit input `k` and `+k` is the output of gate `k`, both
/// 1-based. Zero marks a pin that has not been connected yet.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct SourceId(RawSourceId);

/// Decoded form of a nonzero [`SourceId`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Source {
    /// Circuit input, 1-based.
    Input(usize),
    /// Gate output, 1-based.
    Gate(usize),
}

impl SourceId {
    /// Placeholder for an unconnected pin or output.
    pub const UNSET: SourceId = SourceId(0);

    /// Largest input or gate index a source id can address.
    pub const MAX_INDEX: usize = RawSourceId::MAX as usize;

    /// Id referring to circuit input `k` (1-based), or `None` if `k` is
    /// past [`MAX_INDEX`](Self::MAX_INDEX).
    pub fn try_input(k: usize) -> Option<Self> {
        RawSourceId::try_from(k).ok().map(|k| Self(-k))
    }

    /// Id referring to the output of gate `k` (1-based), or `None` if `k` is
    /// past [`MAX_INDEX`](Self::MAX_INDEX).
    pub fn try_gate(k: usize) -> Option<Self> {
        RawSourceId::try_from(k).ok().map(Self)
    }

    /// Id referring to circuit input `k` (1-based).
    ///
    /// # Panics
    ///
    /// If `k` is greater than [`MAX_INDEX`](Self::MAX_INDEX).
    pub fn input(k: usize) -> Self {
        match Self::try_input(k) {
            Some(id) => id,
            None => panic!("input {k} exceeds the largest source index"),
        }
    }

    /// Id referring to the output of gate `k` (1-based).
    ///
    /// # Panics
    ///
    /// If `k` is greater than [`MAX_INDEX`](Self::MAX_INDEX).
    pub fn gate(k: usize) -> Self {
        match Self::try_gate(k) {
            Some(id) => id,
            None => panic!("gate {k} exceeds the largest source index"),
        }
    }

    /// Raw signed value.
    pub fn get(self) -> RawSourceId {
        self.0
    }

    /// If this is the zero placeholder.
    pub fn is_unset(self) -> bool {
        self.0 == 0
    }

    /// If this names an input in `1..=num_inputs` or a gate in
    /// `1..=num_gates`.
    pub fn is_within(self, num_inputs: usize, num_gates: usize) -> bool {
        match self.source() {
            Some(Source::Input(k)) => k <= num_inputs,
            Some(Source::Gate(k)) => k <= num_gates,
            None => false,
        }
    }

    /// Decodes the id, returning `None` for the zero placeholder.
    pub fn source(self) -> Option<Source> {
        match self.0 {
            0 => None,
            n if n < 0 => Some(Source::Input(n.unsigned_abs() as usize)),
            n => Some(Source::Gate(n as usize)),
        }
    }
}

impl From<RawSourceId> for SourceId {
    fn from(value: RawSourceId) -> Self {
        Self(value)
    }
}

impl From<SourceId> for RawSourceId {
    fn from(value: SourceId) -> Self {
        value.0
    }
}

impl Source {
    /// Encodes back to a [`SourceId`], or `None` if the index does not fit.
    pub fn id(self) -> Option<SourceId> {
        match self {
            Source::Input(k) => SourceId::try_input(k),
            Source::Gate(k) => SourceId::try_gate(k),
        }
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
