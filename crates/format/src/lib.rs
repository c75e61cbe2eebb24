//! Text format for trickt circuits.
//!
//! A circuit file is a header line with the three counts, a gate section
//! and an output section:
//!
//! ```text
//! CIRCUITO: 2 2 2
//! PORTAS:
//! 1) XO 2: -1 -2
//! 2) AN 2: -1 -2
//! SAIDAS:
//! 1) 1
//! 2) 2
//! ```
//!
//! Sources are signed: `-k` is circuit input `k`, `+k` is gate `k`.
//!
//! ```
//! use trickt_format::{circuit_to_string, parse_circuit};
//!
//! let text = "CIRCUITO: 1 1 1\nPORTAS:\n1) NT 1: -1\nSAIDAS:\n1) 1\n";
//! let circuit = parse_circuit(text)?;
//! assert_eq!(circuit_to_string(&circuit)?, text);
//! # Ok::<(), trickt_format::FormatError>(())
//! ```

mod error;
mod reader;
mod writer;

pub use error::{FormatError, ParseErrorKind};
pub use reader::{CircuitHeader, CircuitReader, parse_circuit, read_circuit_file};
pub use writer::{CircuitWriter, circuit_to_string, write_circuit_file};

/// First token of the header line.
pub const HEADER_KEYWORD: &str = "CIRCUITO:";

/// Line opening the gate section.
pub const GATES_KEYWORD: &str = "PORTAS:";

/// Line opening the output section.
pub const OUTPUTS_KEYWORD: &str = "SAIDAS:";
