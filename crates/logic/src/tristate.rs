//! Three-valued (Kleene) logic values.

use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not};
use std::str::FromStr;

use crate::error::ParseTriStateError;

/// A logic value that may not be known yet.
///
/// `Undefined` is the bottom of the information ordering: every operator
/// here is monotone, so replacing an `Undefined` operand with a determinate
/// value can only turn an `Undefined` result into a determinate one, never
/// change a result that was already determinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum TriState {
    /// Logic low.
    False = 0,
    /// Logic high.
    True = 1,
    /// Not known (yet).
    #[default]
    Undefined = 2,
}

impl TriState {
    /// All three values, in display order.
    pub const ALL: [TriState; 3] = [TriState::False, TriState::True, TriState::Undefined];

    /// Converts a plain boolean.
    #[inline]
    pub const fn from_bool(b: bool) -> Self {
        if b { TriState::True } else { TriState::False }
    }

    /// Returns the boolean value if determinate.
    #[inline]
    pub const fn to_bool(self) -> Option<bool> {
        match self {
            TriState::False => Some(false),
            TriState::True => Some(true),
            TriState::Undefined => None,
        }
    }

    /// Returns `true` unless the value is `Undefined`.
    #[inline]
    pub const fn is_defined(self) -> bool {
        !matches!(self, TriState::Undefined)
    }

    /// Single character representation used by the CLI and truth tables.
    pub const fn to_char(self) -> char {
        match self {
            TriState::False => 'F',
            TriState::True => 'T',
            TriState::Undefined => '?',
        }
    }

    /// Parses a single character.
    ///
    /// Accepts `T`/`1`, `F`/`0` and `?`/`X`/`U` in either case.
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'T' | '1' => Some(TriState::True),
            'F' | '0' => Some(TriState::False),
            '?' | 'X' | 'U' => Some(TriState::Undefined),
            _ => None,
        }
    }

    /// Conjunction over any number of operands.
    ///
    /// Stops at the first `False`. An empty sequence yields `True`.
    pub fn and_all(values: impl IntoIterator<Item = TriState>) -> TriState {
        let mut acc = TriState::True;
        for v in values {
            match v {
                TriState::False => return TriState::False,
                TriState::Undefined => acc = TriState::Undefined,
                TriState::True => {}
            }
        }
        acc
    }

    /// Disjunction over any number of operands.
    ///
    /// Stops at the first `True`. An empty sequence yields `False`.
    pub fn or_all(values: impl IntoIterator<Item = TriState>) -> TriState {
        let mut acc = TriState::False;
        for v in values {
            match v {
                TriState::True => return TriState::True,
                TriState::Undefined => acc = TriState::Undefined,
                TriState::False => {}
            }
        }
        acc
    }

    /// Parity over any number of operands.
    ///
    /// Any `Undefined` operand makes the result `Undefined`. An empty
    /// sequence yields `False`.
    pub fn xor_all(values: impl IntoIterator<Item = TriState>) -> TriState {
        values.into_iter().fold(TriState::False, |acc, v| acc ^ v)
    }
}

impl From<bool> for TriState {
    fn from(value: bool) -> Self {
        TriState::from_bool(value)
    }
}

impl Not for TriState {
    type Output = TriState;

    #[inline]
    fn not(self) -> TriState {
        match self {
            TriState::False => TriState::True,
            TriState::True => TriState::False,
            TriState::Undefined => TriState::Undefined,
        }
    }
}

impl BitAnd for TriState {
    type Output = TriState;

    #[inline]
    fn bitand(self, rhs: TriState) -> TriState {
        match (self, rhs) {
            (TriState::False, _) | (_, TriState::False) => TriState::False,
            (TriState::True, TriState::True) => TriState::True,
            _ => TriState::Undefined,
        }
    }
}

impl BitOr for TriState {
    type Output = TriState;

    #[inline]
    fn bitor(self, rhs: TriState) -> TriState {
        match (self, rhs) {
            (TriState::True, _) | (_, TriState::True) => TriState::True,
            (TriState::False, TriState::False) => TriState::False,
            _ => TriState::Undefined,
        }
    }
}

impl BitXor for TriState {
    type Output = TriState;

    #[inline]
    fn bitxor(self, rhs: TriState) -> TriState {
        match (self.to_bool(), rhs.to_bool()) {
            (Some(a), Some(b)) => TriState::from_bool(a != b),
            _ => TriState::Undefined,
        }
    }
}

impl BitAndAssign for TriState {
    fn bitand_assign(&mut self, rhs: TriState) {
        *self = *self & rhs;
    }
}

impl BitOrAssign for TriState {
    fn bitor_assign(&mut self, rhs: TriState) {
        *self = *self | rhs;
    }
}

impl BitXorAssign for TriState {
    fn bitxor_assign(&mut self, rhs: TriState) {
        *self = *self ^ rhs;
    }
}

impl fmt::Display for TriState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

impl FromStr for TriState {
    type Err = ParseTriStateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => {
                TriState::from_char(c).ok_or_else(|| ParseTriStateError(s.to_owned()))
            }
            _ => Err(ParseTriStateError(s.to_owned())),
        }
    }
}
