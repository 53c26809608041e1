// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Entry point for all user interaction, built on clap.
// Business logic lives in Layer 2 (application); this layer
// only parses arguments, dispatches, and prints results.
//
//   1. `convert` — ARFF → PAT, optionally split three ways
//   2. `inspect` — print the attribute encoding of an ARFF file

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, ConvertArgs, InspectArgs};

#[derive(Parser, Debug)]
#[command(
    name = "arff2pat",
    version,
    about = "Convert Weka ARFF files into SNNS/JavaNNS pattern files."
)]
pub struct Cli {
    /// The subcommand to run (convert or inspect)
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Convert(args) => run_convert(args),
            Commands::Inspect(args) => run_inspect(args),
        }
    }
}

fn run_convert(args: ConvertArgs) -> Result<()> {
    use crate::application::convert_use_case::ConvertUseCase;

    tracing::info!("Converting '{}'", args.arff.display());

    let report = ConvertUseCase::new(args.into()).execute()?;
    println!("{report}");
    Ok(())
}

fn run_inspect(args: InspectArgs) -> Result<()> {
    use crate::application::inspect_use_case::InspectUseCase;

    let report = InspectUseCase::new(args.arff).execute()?;
    println!("{report}");
    Ok(())
}
