//! `trickt`: simulate three-valued gate circuits from the command line.

mod commands;
mod prompt;
mod table;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;
use tracing_subscriber::EnvFilter;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Debug, Parser)]
#[command(name = "trickt")]
#[command(about = "Three-valued combinational circuit simulator", long_about = None)]
#[command(version)]
struct Cli {
    /// Log debug events to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Simulate a circuit on one input vector
    Simulate {
        /// Circuit file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Input values as T/F/? characters, e.g. "TF?"
        #[arg(value_name = "INPUTS")]
        inputs: String,

        /// Also print the output of every gate
        #[arg(short, long)]
        gates: bool,
    },

    /// Check a circuit file and print its statistics
    Verify {
        /// Circuit file
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Print the truth table of a circuit
    Table {
        /// Circuit file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Include undefined (?) input values
        #[arg(short, long)]
        undefined: bool,

        /// Refuse circuits with more inputs than this
        #[arg(long, default_value = "16")]
        max_inputs: usize,

        /// Hide the progress bar
        #[arg(short, long)]
        quiet: bool,
    },

    /// Rewrite a circuit file in canonical form
    Fmt {
        /// Circuit file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output file (defaults to stdout)
        #[arg(short, long, value_name = "OUTPUT")]
        output: Option<PathBuf>,
    },

    /// Enter a circuit interactively
    New {
        /// Output file (defaults to stdout)
        #[arg(short, long, value_name = "OUTPUT")]
        output: Option<PathBuf>,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Simulate {
            file,
            inputs,
            gates,
        } => commands::simulate(&file, &inputs, gates)?,

        Commands::Verify { file } => commands::verify(&file)?,

        Commands::Table {
            file,
            undefined,
            max_inputs,
            quiet,
        } => {
            let options = table::TableOptions {
                undefined,
                max_inputs,
                progress: !quiet,
            };
            commands::table(&file, &options)?;
        }

        Commands::Fmt { file, output } => commands::fmt(&file, output.as_deref())?,

        Commands::New { output } => commands::new(output.as_deref())?,
    }

    Ok(())
}
