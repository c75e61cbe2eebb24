//! Example circuit definitions for testing and demonstration.

use trickt_logic::{Gate, GateKind, SourceId};

use crate::circuit::Circuit;

/// Assembles a circuit from complete gates and output sources.
///
/// # Panics
///
/// If any gate is incomplete or the sizes are zero; only meant for the
/// fixed definitions below.
fn assemble(num_inputs: usize, gates: Vec<Gate>, outputs: &[SourceId]) -> Circuit {
    let mut circuit = Circuit::with_size(num_inputs, outputs.len(), gates.len())
        .expect("example circuit: bad size");
    for (i, gate) in gates.into_iter().enumerate() {
        circuit.set_gate(i + 1, gate).expect("example circuit: bad gate id");
    }
    for (i, src) in outputs.iter().enumerate() {
        circuit
            .set_output(i + 1, *src)
            .expect("example circuit: bad output source");
    }
    circuit
}

fn gate(kind: GateKind, inputs: &[SourceId]) -> Gate {
    Gate::with_inputs(kind, inputs.iter().copied()).expect("example circuit: bad gate")
}

/// Half adder.
///
/// Inputs: `a`, `b`. Outputs: sum, carry.
pub fn half_adder() -> Circuit {
    let (a, b) = (SourceId::input(1), SourceId::input(2));
    assemble(
        2,
        vec![gate(GateKind::Xor, &[a, b]), gate(GateKind::And, &[a, b])],
        &[SourceId::gate(1), SourceId::gate(2)],
    )
}

/// Full adder with its gates listed sinks first, so the network only
/// settles after several passes.
///
/// Inputs: `a`, `b`, `cin`. Outputs: sum, carry out.
pub fn full_adder() -> Circuit {
    let (a, b, cin) = (SourceId::input(1), SourceId::input(2), SourceId::input(3));
    let g = SourceId::gate;
    assemble(
        3,
        vec![
            // 1: cout = (a & b) | (cin & (a ^ b))
            gate(GateKind::Or, &[g(4), g(3)]),
            // 2: sum = (a ^ b) ^ cin
            gate(GateKind::Xor, &[g(5), cin]),
            // 3: cin & (a ^ b)
            gate(GateKind::And, &[cin, g(5)]),
            // 4: a & b
            gate(GateKind::And, &[a, b]),
            // 5: a ^ b
            gate(GateKind::Xor, &[a, b]),
        ],
        &[g(2), g(1)],
    )
}

/// Set/reset latch built from two cross-coupled NOR gates.
///
/// Inputs: `s`, `r`. Outputs: `q`, `!q`. With both inputs low the loop has
/// no forcing value and both outputs stay undefined.
pub fn sr_latch() -> Circuit {
    let (s, r) = (SourceId::input(1), SourceId::input(2));
    assemble(
        2,
        vec![
            gate(GateKind::Nor, &[r, SourceId::gate(2)]),
            gate(GateKind::Nor, &[s, SourceId::gate(1)]),
        ],
        &[SourceId::gate(1), SourceId::gate(2)],
    )
}

/// Ripple-carry adder over two `bits`-wide operands.
///
/// Inputs `1..=bits` are `a` (LSB first), `bits+1..=2*bits` are `b`.
/// Outputs are the `bits` sum bits followed by the final carry. When
/// `reversed` is set the gates are numbered from the last stage back to the
/// first, which forces one propagation pass per stage.
///
/// # Panics
///
/// If `bits` is zero.
pub fn ripple_carry_adder(bits: usize, reversed: bool) -> Circuit {
    assert!(bits > 0, "example circuit: adder needs at least one bit");

    // Per stage: 0 = a^b, 1 = sum, 2 = a&b, 3 = c&(a^b), 4 = carry out.
    // Stage 0 has no carry in and only needs the half adder gates.
    const STAGE: usize = 5;
    let num_gates = bits * STAGE;
    let pos = |stage: usize, k: usize| {
        let natural = stage * STAGE + k;
        let idx = if reversed {
            num_gates - 1 - natural
        } else {
            natural
        };
        SourceId::gate(idx + 1)
    };

    let mut slots: Vec<Option<Gate>> = vec![None; num_gates];
    let mut place = |stage: usize, k: usize, g: Gate| {
        let id = pos(stage, k).get() as usize;
        slots[id - 1] = Some(g);
    };

    for i in 0..bits {
        let a = SourceId::input(i + 1);
        let b = SourceId::input(bits + i + 1);
        place(i, 0, gate(GateKind::Xor, &[a, b]));
        place(i, 2, gate(GateKind::And, &[a, b]));
        if i == 0 {
            // No carry in: sum is a^b, carry is a&b. Pad the stage with
            // buffers so every stage has the same layout.
            place(i, 1, gate(GateKind::Or, &[pos(i, 0), pos(i, 0)]));
            place(i, 3, gate(GateKind::And, &[pos(i, 0), a, b]));
            place(i, 4, gate(GateKind::Or, &[pos(i, 2), pos(i, 2)]));
        } else {
            let cin = pos(i - 1, 4);
            place(i, 1, gate(GateKind::Xor, &[pos(i, 0), cin]));
            place(i, 3, gate(GateKind::And, &[cin, pos(i, 0)]));
            place(i, 4, gate(GateKind::Or, &[pos(i, 2), pos(i, 3)]));
        }
    }

    let gates = slots
        .into_iter()
        .map(|g| g.expect("example circuit: adder slot left empty"))
        .collect();
    let outputs: Vec<SourceId> = (0..bits)
        .map(|i| pos(i, 1))
        .chain([pos(bits - 1, 4)])
        .collect();
    assemble(2 * bits, gates, &outputs)
}
