//! Circuit file reader.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::debug;
use trickt_engine::{Circuit, CircuitError, Gate, GateError, GateKind, SourceId};

use crate::error::{FormatError, ParseErrorKind};
use crate::{GATES_KEYWORD, HEADER_KEYWORD, OUTPUTS_KEYWORD};

/// Counts declared on the `CIRCUITO:` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CircuitHeader {
    /// Number of circuit inputs.
    pub num_inputs: usize,
    /// Number of circuit outputs.
    pub num_outputs: usize,
    /// Number of gates.
    pub num_gates: usize,
}

/// Reader for the text circuit format.
///
/// ```text
/// CIRCUITO: <inputs> <outputs> <gates>
/// PORTAS:
/// 1) <TYPE> <arity>: <src> <src> ...
/// ...
/// SAIDAS:
/// 1) <src>
/// ...
/// ```
///
/// Blank lines are skipped. Indices may be written with or without the
/// trailing `)`.
#[derive(Debug)]
pub struct CircuitReader<R: BufRead> {
    reader: R,
    line_no: usize,
    buf: String,
}

impl<R: BufRead> CircuitReader<R> {
    /// Wraps `reader`; nothing is read until asked.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_no: 0,
            buf: String::new(),
        }
    }

    /// Number of the last line read, 1-based.
    pub fn line_no(&self) -> usize {
        self.line_no
    }

    /// Advances to the next non-blank line, returning it trimmed.
    fn next_line(&mut self, expected: &'static str) -> Result<&str, FormatError> {
        loop {
            self.buf.clear();
            if self.reader.read_line(&mut self.buf)? == 0 {
                return Err(FormatError::parse(
                    self.line_no + 1,
                    ParseErrorKind::UnexpectedEof { expected },
                ));
            }
            self.line_no += 1;
            if !self.buf.trim().is_empty() {
                return Ok(self.buf.trim());
            }
        }
    }

    fn err(&self, kind: impl Into<ParseErrorKind>) -> FormatError {
        FormatError::parse(self.line_no, kind)
    }

    fn expect_keyword(&mut self, keyword: &'static str) -> Result<(), FormatError> {
        let line = self.next_line(keyword)?;
        if line != keyword {
            let found = line.to_owned();
            return Err(self.err(ParseErrorKind::ExpectedKeyword {
                expected: keyword,
                found,
            }));
        }
        Ok(())
    }

    /// Reads and checks the `CIRCUITO:` line.
    pub fn read_header(&mut self) -> Result<CircuitHeader, FormatError> {
        let line = self.next_line(HEADER_KEYWORD)?.to_owned();
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.first() != Some(&HEADER_KEYWORD) {
            let found = tokens.first().copied().unwrap_or_default().to_owned();
            return Err(self.err(ParseErrorKind::ExpectedKeyword {
                expected: HEADER_KEYWORD,
                found,
            }));
        }

        let counts: Vec<usize> = match tokens[1..] {
            [_, _, _] => tokens[1..]
                .iter()
                .map(|t| t.parse::<usize>())
                .collect::<Result<_, _>>()
                .map_err(|_| self.err(ParseErrorKind::BadHeader))?,
            _ => return Err(self.err(ParseErrorKind::BadHeader)),
        };
        if counts.iter().any(|n| !(1..=SourceId::MAX_INDEX).contains(n)) {
            return Err(self.err(ParseErrorKind::BadHeader));
        }

        Ok(CircuitHeader {
            num_inputs: counts[0],
            num_outputs: counts[1],
            num_gates: counts[2],
        })
    }

    /// Reads a whole circuit.
    ///
    /// Gates and outputs are collected as their lines arrive and the circuit
    /// is only sized once every declared line is present, so the header
    /// counts alone never drive an allocation. On error nothing is returned.
    pub fn read_circuit(mut self) -> Result<Circuit, FormatError> {
        let header = self.read_header()?;

        self.expect_keyword(GATES_KEYWORD)?;
        let mut gates = Vec::new();
        for id in 1..=header.num_gates {
            gates.push(self.read_gate_line(&header, id)?);
        }

        self.expect_keyword(OUTPUTS_KEYWORD)?;
        let mut outputs = Vec::new();
        for id in 1..=header.num_outputs {
            outputs.push(self.read_output_line(&header, id)?);
        }

        self.expect_end()?;
        let circuit = self.assemble(&header, gates, &outputs)?;
        debug!(
            inputs = header.num_inputs,
            outputs = header.num_outputs,
            gates = header.num_gates,
            lines = self.line_no,
            "read circuit"
        );
        Ok(circuit)
    }

    /// Parses `<id>) <TYPE> <arity>: <src>...` into a complete gate.
    fn read_gate_line(&mut self, header: &CircuitHeader, id: usize) -> Result<Gate, FormatError> {
        let line = self.next_line("a gate line")?.to_owned();
        let (head, tail) = line
            .split_once(':')
            .ok_or_else(|| self.err(ParseErrorKind::Malformed { what: "gate" }))?;

        let head: Vec<&str> = head.split_whitespace().collect();
        let [index, mnemonic, arity] = head[..] else {
            return Err(self.err(ParseErrorKind::Malformed { what: "gate" }));
        };
        self.check_index(index, id, "gate")?;

        let kind = GateKind::from_mnemonic(mnemonic).map_err(|e| self.err(e))?;
        let arity: usize = arity
            .parse()
            .map_err(|_| self.err(ParseErrorKind::BadNumber(arity.to_owned())))?;
        if !kind.is_valid_arity(arity) {
            return Err(self.err(GateError::InvalidArity { kind, arity }));
        }

        let sources = tail
            .split_whitespace()
            .map(|t| self.parse_source(header, t))
            .collect::<Result<Vec<_>, _>>()?;
        if sources.len() != arity {
            return Err(self.err(ParseErrorKind::PinCount {
                arity,
                found: sources.len(),
            }));
        }
        Gate::with_inputs(kind, sources).map_err(|e| self.err(e))
    }

    /// Sizes the circuit and moves the parsed gates and outputs into it.
    fn assemble(
        &self,
        header: &CircuitHeader,
        gates: Vec<Gate>,
        outputs: &[SourceId],
    ) -> Result<Circuit, FormatError> {
        let mut circuit =
            Circuit::with_size(header.num_inputs, header.num_outputs, header.num_gates)
                .map_err(|e| self.err(e))?;
        for (i, gate) in gates.into_iter().enumerate() {
            circuit.set_gate(i + 1, gate).map_err(|e| self.err(e))?;
        }
        for (i, source) in outputs.iter().enumerate() {
            circuit.set_output(i + 1, *source).map_err(|e| self.err(e))?;
        }
        Ok(circuit)
    }

    /// Parses `<id>) <src>`.
    fn read_output_line(
        &mut self,
        header: &CircuitHeader,
        id: usize,
    ) -> Result<SourceId, FormatError> {
        let line = self.next_line("an output line")?.to_owned();
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let [index, source] = tokens[..] else {
            return Err(self.err(ParseErrorKind::Malformed { what: "output" }));
        };
        self.check_index(index, id, "output")?;
        self.parse_source(header, source)
    }

    fn check_index(&self, token: &str, expected: usize, what: &'static str) -> Result<(), FormatError> {
        let digits = token.strip_suffix(')').unwrap_or(token);
        match digits.parse::<usize>() {
            Ok(n) if n == expected => Ok(()),
            _ => Err(self.err(ParseErrorKind::IndexOrder {
                what,
                expected,
                found: token.to_owned(),
            })),
        }
    }

    /// Parses a source id and checks it against the header counts.
    fn parse_source(&self, header: &CircuitHeader, token: &str) -> Result<SourceId, FormatError> {
        let source = token
            .parse::<i32>()
            .map(SourceId::from)
            .map_err(|_| self.err(ParseErrorKind::BadNumber(token.to_owned())))?;
        if !source.is_within(header.num_inputs, header.num_gates) {
            return Err(self.err(CircuitError::InvalidSource { source_id: source }));
        }
        Ok(source)
    }

    fn expect_end(&mut self) -> Result<(), FormatError> {
        match self.next_line("end of file") {
            Ok(line) => {
                let found = line.to_owned();
                Err(self.err(ParseErrorKind::TrailingContent(found)))
            }
            Err(FormatError::Parse {
                kind: ParseErrorKind::UnexpectedEof { .. },
                ..
            }) => Ok(()),
            Err(e) => Err(e),
        }
    }
}

/// Parses a circuit from a string.
pub fn parse_circuit(text: &str) -> Result<Circuit, FormatError> {
    CircuitReader::new(text.as_bytes()).read_circuit()
}

/// Reads a circuit from a file.
pub fn read_circuit_file(path: impl AsRef<Path>) -> Result<Circuit, FormatError> {
    let file = File::open(path)?;
    CircuitReader::new(BufReader::new(file)).read_circuit()
}
