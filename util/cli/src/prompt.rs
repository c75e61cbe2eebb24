//! Interactive circuit entry.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use trickt_engine::{Circuit, Gate, GateKind, SourceId};

/// Asks questions on `output` and reads answers from `input`, repeating a
/// question until the answer parses.
#[derive(Debug)]
pub(crate) struct Prompter<R, W> {
    input: R,
    output: W,
    line: String,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub(crate) fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            line: String::new(),
        }
    }

    fn ask<T>(
        &mut self,
        question: &str,
        mut parse: impl FnMut(&str) -> Result<T, String>,
    ) -> io::Result<T> {
        loop {
            write!(self.output, "{question}")?;
            self.output.flush()?;

            self.line.clear();
            if self.input.read_line(&mut self.line)? == 0 {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "input ended before the circuit was complete",
                ));
            }
            match parse(self.line.trim()) {
                Ok(value) => return Ok(value),
                Err(msg) => writeln!(self.output, "  {msg}, try again")?,
            }
        }
    }

    /// Walks through counts, gates and outputs and returns the finished
    /// circuit.
    pub(crate) fn enter_circuit(&mut self) -> Result<Circuit> {
        let num_inputs = self.ask("Number of inputs: ", parse_count)?;
        let num_outputs = self.ask("Number of outputs: ", parse_count)?;
        let num_gates = self.ask("Number of gates: ", parse_count)?;
        let mut circuit = Circuit::with_size(num_inputs, num_outputs, num_gates)?;

        let mnemonics: Vec<&str> = GateKind::ALL.iter().map(|k| k.mnemonic()).collect();
        let kinds = mnemonics.join(" ");
        for id in 1..=num_gates {
            let kind = self.ask(&format!("Gate {id} type ({kinds}): "), |s| {
                GateKind::from_mnemonic(s).map_err(|e| e.to_string())
            })?;

            let arity = if kind.max_arity() == Some(kind.min_arity()) {
                kind.min_arity()
            } else {
                let default = kind.default_arity();
                self.ask(&format!("Gate {id} number of inputs [{default}]: "), |s| {
                    if s.is_empty() {
                        return Ok(default);
                    }
                    let n: usize = s.parse().map_err(|_| format!("'{s}' is not a number"))?;
                    if kind.is_valid_arity(n) {
                        Ok(n)
                    } else {
                        Err(format!("{kind} needs at least {} inputs", kind.min_arity()))
                    }
                })?
            };
            circuit.set_gate(id, Gate::with_arity(kind, arity)?)?;

            for pin in 0..arity {
                let question = format!("Gate {id} input {} source: ", pin + 1);
                let source = self.ask(&question, |s| parse_source(&circuit, s))?;
                circuit.set_gate_input(id, pin, source)?;
            }
        }

        for id in 1..=num_outputs {
            let question = format!("Output {id} source: ");
            let source = self.ask(&question, |s| parse_source(&circuit, s))?;
            circuit.set_output(id, source)?;
        }

        Ok(circuit)
    }
}

fn parse_count(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(n) if n > SourceId::MAX_INDEX => {
            Err(format!("{n} is more than {} ids can address", SourceId::MAX_INDEX))
        }
        Ok(n) if n > 0 => Ok(n),
        _ => Err(format!("'{s}' is not a positive number")),
    }
}

/// Accepts `-k` for input `k` and `k` for gate `k`.
fn parse_source(circuit: &Circuit, s: &str) -> Result<SourceId, String> {
    let raw: i32 = s.parse().map_err(|_| format!("'{s}' is not a number"))?;
    let source = SourceId::from(raw);
    if circuit.is_valid_source(source) {
        Ok(source)
    } else {
        Err(format!(
            "{raw} is not -1..-{} or 1..{}",
            circuit.num_inputs(),
            circuit.num_gates()
        ))
    }
}
