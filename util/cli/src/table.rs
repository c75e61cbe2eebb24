//! Truth table enumeration.

use std::time::Instant;

use anyhow::{Result, bail};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use tracing::debug;
use trickt_engine::{Circuit, SimState, TriState};

/// How to enumerate a truth table.
#[derive(Debug, Clone)]
pub(crate) struct TableOptions {
    /// Also feed `?` to each input, not just `F` and `T`.
    pub(crate) undefined: bool,
    /// Upper bound on the number of circuit inputs.
    pub(crate) max_inputs: usize,
    /// Show a progress bar on stderr.
    pub(crate) progress: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Row {
    pub(crate) inputs: Vec<TriState>,
    pub(crate) outputs: Vec<TriState>,
}

/// Values each input ranges over, in row order.
fn domain(undefined: bool) -> &'static [TriState] {
    if undefined {
        &[TriState::False, TriState::True, TriState::Undefined]
    } else {
        &[TriState::False, TriState::True]
    }
}

/// Writes row `index` into `inputs`, first input most significant.
fn fill_row(index: u64, values: &[TriState], inputs: &mut [TriState]) {
    let base = values.len() as u64;
    let mut rest = index;
    for slot in inputs.iter_mut().rev() {
        *slot = values[(rest % base) as usize];
        rest /= base;
    }
}

/// Simulates `circuit` on every input vector, in parallel.
pub(crate) fn truth_table(circuit: &Circuit, options: &TableOptions) -> Result<Vec<Row>> {
    let n = circuit.num_inputs();
    if n > options.max_inputs {
        bail!(
            "circuit has {n} inputs, more than --max-inputs {}",
            options.max_inputs
        );
    }
    circuit.validate()?;

    let values = domain(options.undefined);
    let Some(rows) = u32::try_from(n)
        .ok()
        .and_then(|n| (values.len() as u64).checked_pow(n))
    else {
        bail!("truth table with {n} inputs is too large");
    };

    let pb = if options.progress {
        ProgressBar::new(rows)
    } else {
        ProgressBar::hidden()
    };
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{bar:40.cyan/blue} {pos:>7}/{len:7} [{elapsed_precise}] {msg}")?,
    );
    pb.set_message("Simulating...");

    let start = Instant::now();
    let table = (0..rows)
        .into_par_iter()
        .map_init(
            || SimState::for_circuit(circuit),
            |state, index| -> Result<Row> {
                let mut inputs = vec![TriState::Undefined; n];
                fill_row(index, values, &mut inputs);
                circuit.simulate_with(&inputs, state)?;
                pb.inc(1);
                Ok(Row {
                    inputs,
                    outputs: state.outputs().to_vec(),
                })
            },
        )
        .collect::<Result<Vec<_>>>()?;
    pb.finish_and_clear();

    debug!(rows, elapsed = ?start.elapsed(), "truth table done");
    Ok(table)
}

/// Renders a row as `<inputs> | <outputs>`.
pub(crate) fn format_row(row: &Row) -> String {
    let inputs: String = row.inputs.iter().map(|v| v.to_char()).collect();
    let outputs: String = row.outputs.iter().map(|v| v.to_char()).collect();
    format!("{inputs} | {outputs}")
}
