//! Structural validation.

use std::fmt;

use trickt_logic::SourceId;

use crate::circuit::Circuit;

/// A single reason a circuit cannot be simulated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    /// The circuit has no inputs.
    NoInputs,
    /// The circuit has no outputs.
    NoOutputs,
    /// The circuit has no gates.
    NoGates,
    /// A gate slot was never filled.
    UndefinedGate {
        /// Gate id.
        gate: usize,
    },
    /// A gate pin is unset or refers to something that does not exist.
    GateInput {
        /// Gate id.
        gate: usize,
        /// Pin index, 0-based.
        pin: usize,
        /// The offending source.
        source: SourceId,
    },
    /// A circuit output is unset or refers to something that does not exist.
    OutputSource {
        /// Output id.
        output: usize,
        /// The offending source.
        source: SourceId,
    },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::NoInputs => f.write_str("circuit has no inputs"),
            Violation::NoOutputs => f.write_str("circuit has no outputs"),
            Violation::NoGates => f.write_str("circuit has no gates"),
            Violation::UndefinedGate { gate } => write!(f, "gate {gate} is not defined"),
            Violation::GateInput { gate, pin, source } => {
                write!(f, "gate {gate} pin {pin} has invalid source {source}")
            }
            Violation::OutputSource { output, source } => {
                write!(f, "output {output} has invalid source {source}")
            }
        }
    }
}

/// Every violation found in a circuit, in a fixed order: counts first,
/// then gates by id and pin, then outputs by id.
///
/// Only ever handed out non-empty, as the error of
/// [`Circuit::validate`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid circuit: {} ({} problem(s) total)", .violations[0], .violations.len())]
pub struct ValidationReport {
    violations: Vec<Violation>,
}

impl ValidationReport {
    /// All violations.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// The first violation found.
    pub fn first(&self) -> &Violation {
        // Never constructed empty.
        &self.violations[0]
    }

    /// Number of violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Always `false`, reports are never empty.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }
}

impl Circuit {
    /// Checks everything that must hold before the circuit can be simulated.
    pub fn validate(&self) -> Result<(), ValidationReport> {
        let mut violations = Vec::new();

        if self.num_inputs() == 0 {
            violations.push(Violation::NoInputs);
        }
        if self.num_outputs() == 0 {
            violations.push(Violation::NoOutputs);
        }
        if self.num_gates() == 0 {
            violations.push(Violation::NoGates);
        }

        for (gate, slot) in self.gate_slots() {
            let Some(g) = slot else {
                violations.push(Violation::UndefinedGate { gate });
                continue;
            };
            for (pin, source) in g.inputs().iter().copied().enumerate() {
                if !self.is_valid_source(source) {
                    violations.push(Violation::GateInput { gate, pin, source });
                }
            }
        }

        for (i, source) in self.output_sources().iter().copied().enumerate() {
            if !self.is_valid_source(source) {
                violations.push(Violation::OutputSource {
                    output: i + 1,
                    source,
                });
            }
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationReport { violations })
        }
    }

    /// If [`validate`](Self::validate) finds nothing wrong.
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

#[cfg(test)]
mod tests {
    use trickt_logic::{Gate, GateKind};

    use super::*;

    fn and_circuit() -> Circuit {
        let mut c = Circuit::with_size(2, 1, 1).unwrap();
        c.set_gate_type(1, "AN", 2).unwrap();
        c.set_gate_input(1, 0, SourceId::input(1)).unwrap();
        c.set_gate_input(1, 1, SourceId::input(2)).unwrap();
        c.set_output(1, SourceId::gate(1)).unwrap();
        c
    }

    #[test]
    fn test_valid_circuit() {
        let c = and_circuit();
        assert!(c.is_valid());
        assert_eq!(c.validate(), Ok(()));
    }

    #[test]
    fn test_empty_circuit() {
        let err = Circuit::new().validate().unwrap_err();
        assert_eq!(
            err.violations(),
            &[Violation::NoInputs, Violation::NoOutputs, Violation::NoGates]
        );
    }

    #[test]
    fn test_unset_gate_slot() {
        let mut c = Circuit::with_size(2, 1, 2).unwrap();
        c.set_gate_type(1, "OR", 2).unwrap();
        c.set_gate_input(1, 0, SourceId::input(1)).unwrap();
        c.set_gate_input(1, 1, SourceId::input(2)).unwrap();
        c.set_output(1, SourceId::gate(1)).unwrap();

        let err = c.validate().unwrap_err();
        assert_eq!(err.violations(), &[Violation::UndefinedGate { gate: 2 }]);
    }

    #[test]
    fn test_unset_and_dangling_pins() {
        let mut c = Circuit::with_size(2, 1, 1).unwrap();
        // Built directly so the circuit's own source checks are bypassed.
        let gate =
            Gate::with_inputs(GateKind::And, [SourceId::from(-3), SourceId::from(2)]).unwrap();
        c.set_gate(1, gate).unwrap();
        c.set_output(1, SourceId::gate(1)).unwrap();

        let err = c.validate().unwrap_err();
        assert_eq!(
            err.violations(),
            &[
                Violation::GateInput {
                    gate: 1,
                    pin: 0,
                    source: SourceId::from(-3)
                },
                Violation::GateInput {
                    gate: 1,
                    pin: 1,
                    source: SourceId::from(2)
                },
            ]
        );

        let mut c = and_circuit();
        c.set_gate(1, Gate::new(GateKind::Xor)).unwrap();
        let err = c.validate().unwrap_err();
        assert_eq!(err.len(), 2);
        assert_eq!(
            *err.first(),
            Violation::GateInput {
                gate: 1,
                pin: 0,
                source: SourceId::UNSET
            }
        );
    }

    #[test]
    fn test_unset_output() {
        let mut c = Circuit::with_size(2, 2, 1).unwrap();
        c.set_gate_type(1, "AN", 2).unwrap();
        c.set_gate_input(1, 0, SourceId::input(1)).unwrap();
        c.set_gate_input(1, 1, SourceId::input(2)).unwrap();
        c.set_output(1, SourceId::gate(1)).unwrap();

        let err = c.validate().unwrap_err();
        assert_eq!(
            err.violations(),
            &[Violation::OutputSource {
                output: 2,
                source: SourceId::UNSET
            }]
        );
        assert_eq!(
            err.to_string(),
            "invalid circuit: output 2 has invalid source 0 (1 problem(s) total)"
        );
    }
}
