//! apidiff CLI
//!
//! Command-line interface for apidiff

use apidiff_core::logging_facility::{self, Profile};
use clap::{Parser, Subcommand};

mod commands;
mod config;

#[derive(Debug, Parser)]
#[command(name = "apidiff", version)]
#[command(about = "apidiff - Go API breaking-change detector", long_about = None)]
struct Cli {
    /// Log per-package progress to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log JSON lines to stderr
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Compare the working tree against a base revision
    Check(commands::check::CheckArgs),
}

fn main() {
    let cli = Cli::parse();
    logging_facility::init(Profile::from_flags(cli.verbose, cli.log_json));

    let result = match cli.command {
        Commands::Check(args) => commands::check::execute(args),
    };

    match result {
        Ok(status) => std::process::exit(status.code()),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(commands::ExitStatus::Error.code());
        }
    }
}
