//! Circuit file writer.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::debug;
use trickt_engine::Circuit;

use crate::error::FormatError;
use crate::{GATES_KEYWORD, HEADER_KEYWORD, OUTPUTS_KEYWORD};

/// Writer for the text circuit format.
///
/// Produces the canonical layout the reader accepts: one gate per line as
/// `N) TYPE arity: src src ...` and one output per line as `N) src`.
#[derive(Debug)]
pub struct CircuitWriter<W: Write> {
    writer: W,
}

impl<W: Write> CircuitWriter<W> {
    /// Wraps `writer`.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Writes `circuit`.
    ///
    /// The circuit is validated first and nothing is written if that fails.
    pub fn write(&mut self, circuit: &Circuit) -> Result<(), FormatError> {
        circuit.validate()?;

        let w = &mut self.writer;
        writeln!(
            w,
            "{HEADER_KEYWORD} {} {} {}",
            circuit.num_inputs(),
            circuit.num_outputs(),
            circuit.num_gates()
        )?;

        writeln!(w, "{GATES_KEYWORD}")?;
        for (id, gate) in circuit.gates() {
            writeln!(w, "{id}) {gate}")?;
        }

        writeln!(w, "{OUTPUTS_KEYWORD}")?;
        for (i, source) in circuit.output_sources().iter().enumerate() {
            writeln!(w, "{}) {source}", i + 1)?;
        }

        debug!(
            gates = circuit.num_gates(),
            outputs = circuit.num_outputs(),
            "wrote circuit"
        );
        Ok(())
    }

    /// Flushes and returns the inner writer.
    pub fn finish(mut self) -> Result<W, FormatError> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

/// Renders `circuit` in the text format.
pub fn circuit_to_string(circuit: &Circuit) -> Result<String, FormatError> {
    let mut writer = CircuitWriter::new(Vec::new());
    writer.write(circuit)?;
    let bytes = writer.finish()?;
    // Everything written above is ASCII.
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Writes `circuit` to `path`, creating or truncating the file.
///
/// Validation happens before the file is touched.
pub fn write_circuit_file(circuit: &Circuit, path: impl AsRef<Path>) -> Result<(), FormatError> {
    circuit.validate()?;
    let file = File::create(path)?;
    let mut writer = CircuitWriter::new(BufWriter::new(file));
    writer.write(circuit)?;
    writer.finish()?;
    Ok(())
}
