//! Check command

use std::path::PathBuf;

use anyhow::Context;
use apidiff_core::diff::render_outcomes;
use apidiff_engine::run_check;
use clap::Args;

use super::ExitStatus;
use crate::config::{self, OutputFormat, Overrides};

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Revision to compare the working tree against [default: HEAD]
    #[arg(long)]
    pub base: Option<String>,

    /// Also check exported methods on unexported types
    #[arg(long)]
    pub include_unexported_receivers: bool,

    /// Packages checked in parallel [default: 1]
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Report format [default: text]
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Config file [default: ./apidiff.toml when present]
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn execute(args: CheckArgs) -> anyhow::Result<ExitStatus> {
    let cwd = std::env::current_dir().context("cannot determine current directory")?;
    let file = config::load(args.config.as_deref(), &cwd)?;
    let settings = config::resolve(
        file,
        Overrides {
            base: args.base,
            include_unexported_receivers: args.include_unexported_receivers,
            jobs: args.jobs,
            format: args.format,
        },
    );

    let run = run_check(&cwd, &settings.options)?;

    match settings.format {
        OutputFormat::Text => print!("{}", render_outcomes(&run.packages)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&run)?),
    }

    Ok(if run.is_breaking() {
        ExitStatus::Breaking
    } else {
        ExitStatus::Clean
    })
}
