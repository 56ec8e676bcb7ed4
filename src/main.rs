//! Necroshell CLI - the command shell over the simulation core.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

/// Necroshell - a turn-based necromancy RPG driven by shell commands
#[derive(Parser, Debug)]
#[command(name = "necroshell")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Interactive shell session
    Play {
        /// Random seed (default: random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Resume from a save file
        #[arg(short, long)]
        load: Option<std::path::PathBuf>,
    },

    /// Run commands from a script file, one per line
    Script {
        /// Script file
        #[arg(required = true)]
        script: std::path::PathBuf,

        /// Random seed (default: random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    let result = match args.command {
        Commands::Play { seed, load } => cli::play::execute(seed, load),
        Commands::Script {
            script,
            seed,
            format,
        } => cli::script::execute(&script, seed, format),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
