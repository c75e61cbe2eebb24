//! Three-valued logic and the gates built on it.
//!
//! [`TriState`] extends booleans with an `Undefined` value for signals that
//! are not known yet. A [`Gate`] pairs a [`GateKind`] truth function with
//! the [`SourceId`]s feeding its input pins.

mod error;
mod gate;
mod source;
mod tristate;

pub use error::{GateError, ParseTriStateError};
pub use gate::{Gate, GateKind};
pub use source::{RawSourceId, Source, SourceId};
pub use tristate::TriState;
