//! Three-valued simulation of combinational gate networks.
//!
//! A [`Circuit`] owns numbered inputs, gates and outputs. Once it passes
//! [`Circuit::validate`], [`Circuit::simulate`] propagates a vector of
//! [`TriState`] inputs through the network by repeated passes until nothing
//! changes, so gates may be listed in any order and cycles simply leave the
//! affected signals undefined.
//!
//! # Example
//! ```
//! use trickt_engine::{Circuit, SourceId, TriState};
//!
//! let mut c = Circuit::with_size(2, 1, 1)?;
//! c.set_gate_type(1, "AN", 2)?;
//! c.set_gate_input(1, 0, SourceId::input(1))?;
//! c.set_gate_input(1, 1, SourceId::input(2))?;
//! c.set_output(1, SourceId::gate(1))?;
//!
//! let out = c.simulate(&[TriState::True, TriState::Undefined])?;
//! assert_eq!(out, vec![TriState::Undefined]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod circuit;
mod error;
pub mod example_circuits;
mod simulate;
mod validate;

pub use circuit::Circuit;
pub use error::{CircuitError, SimulateError};
pub use simulate::SimState;
pub use validate::{ValidationReport, Violation};

pub use trickt_logic::{Gate, GateError, GateKind, Source, SourceId, TriState};
