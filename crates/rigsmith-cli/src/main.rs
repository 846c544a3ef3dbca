//! rigsmith CLI - humanoid armature synthesis from sliders
//!
//! This binary generates VRM-ready humanoid armatures, validates parameter
//! and mapping files, and normalizes skin weights for export.

use clap::{Parser, Subcommand};
use std::process::ExitCode;

use rigsmith_cli::{commands, logging};

/// rigsmith - Humanoid Armature Synthesis
#[derive(Parser)]
#[command(name = "rigsmith")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate an armature document from a parameter file
    Generate {
        /// Path to the parameter JSON file (default: all sliders at their defaults)
        #[arg(short, long)]
        params: Option<String>,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<String>,

        /// Pretty-print the armature document
        #[arg(long)]
        pretty: bool,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Validate a parameter file and/or a humanoid mapping file
    Validate {
        /// Path to a parameter JSON file
        #[arg(short, long, required_unless_present = "mapping")]
        params: Option<String>,

        /// Path to a humanoid mapping JSON file ({"hips": "Hips", ...})
        #[arg(short, long)]
        mapping: Option<String>,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Normalize four skin weights for 32-bit float export
    Weights {
        /// Comma-separated weights, e.g. 0.5,0.3,0.1,0.05
        weights: String,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// List every slider with its default and bounds
    Params {
        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Generate {
            params,
            output,
            pretty,
            json,
        } => commands::generate::run(params.as_deref(), output.as_deref(), pretty, json),
        Commands::Validate {
            params,
            mapping,
            json,
        } => commands::validate::run(params.as_deref(), mapping.as_deref(), json),
        Commands::Weights { weights, json } => commands::weights::run(&weights, json),
        Commands::Params { json } => commands::params::run(json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
