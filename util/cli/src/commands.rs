//! Subcommand implementations.

use std::io;
use std::path::Path;

use anyhow::{Context, Result, bail};
use trickt_engine::{Circuit, GateKind, SimState, TriState};
use trickt_format::{circuit_to_string, read_circuit_file, write_circuit_file};

use crate::prompt::Prompter;
use crate::table::{TableOptions, format_row, truth_table};

fn load(file: &Path) -> Result<Circuit> {
    read_circuit_file(file).with_context(|| format!("failed to read {}", file.display()))
}

/// Parses `TF?`-style input vectors; whitespace and commas are ignored.
fn parse_inputs(text: &str) -> Result<Vec<TriState>> {
    text.chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .map(|c| {
            TriState::from_char(c)
                .with_context(|| format!("invalid input value '{c}', expected T, F or ?"))
        })
        .collect()
}

fn render(values: &[TriState]) -> String {
    values.iter().map(|v| v.to_char()).collect()
}

pub(crate) fn simulate(file: &Path, inputs: &str, show_gates: bool) -> Result<()> {
    let circuit = load(file)?;
    let inputs = parse_inputs(inputs)?;
    if inputs.len() != circuit.num_inputs() {
        bail!(
            "circuit has {} inputs but {} values were given",
            circuit.num_inputs(),
            inputs.len()
        );
    }

    let mut state = SimState::for_circuit(&circuit);
    circuit.simulate_with(&inputs, &mut state)?;

    println!("Inputs:  {}", render(&inputs));
    println!("Outputs: {}", render(state.outputs()));
    if show_gates {
        for (i, value) in state.gate_outputs().iter().enumerate() {
            println!("  gate {}: {value}", i + 1);
        }
    }
    println!("Passes:  {}", state.passes());

    if !state.is_settled() {
        let ids: Vec<String> = state.unresolved().map(|id| id.to_string()).collect();
        println!("Unsettled gates: {}", ids.join(" "));
    }
    Ok(())
}

pub(crate) fn verify(file: &Path) -> Result<()> {
    let circuit = load(file)?;
    circuit.validate()?;

    println!("Circuit: {}", file.display());
    println!("Inputs:  {}", circuit.num_inputs());
    println!("Outputs: {}", circuit.num_outputs());
    println!("Gates:   {}", circuit.num_gates());
    for kind in GateKind::ALL {
        let count = circuit.gates().filter(|(_, g)| g.kind() == kind).count();
        if count > 0 {
            println!("  {kind}: {count}");
        }
    }
    let pins: usize = circuit.gates().map(|(_, g)| g.num_inputs()).sum();
    println!("Pins:    {pins}");
    println!("✓ Circuit is valid");
    Ok(())
}

pub(crate) fn table(file: &Path, options: &TableOptions) -> Result<()> {
    let circuit = load(file)?;
    let rows = truth_table(&circuit, options)?;
    for row in &rows {
        println!("{}", format_row(row));
    }
    Ok(())
}

pub(crate) fn fmt(file: &Path, output: Option<&Path>) -> Result<()> {
    let circuit = load(file)?;
    match output {
        Some(path) => write_circuit_file(&circuit, path)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => print!("{}", circuit_to_string(&circuit)?),
    }
    Ok(())
}

pub(crate) fn new(output: Option<&Path>) -> Result<()> {
    let stdin = io::stdin();
    let circuit = Prompter::new(stdin.lock(), io::stderr()).enter_circuit()?;
    match output {
        Some(path) => {
            write_circuit_file(&circuit, path)
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!("Wrote {}", path.display());
        }
        None => print!("{}", circuit_to_string(&circuit)?),
    }
    Ok(())
}
