mod actions;
mod changeset;
mod cli;
mod commit;
mod config;
mod constants;
mod decision;
mod error;
mod git;
mod pipeline;
#[cfg(test)]
mod testing;
mod ui;

use crate::cli::Cli;
use crate::config::Config;
use crate::git::ProcessRunner;
use crate::pipeline::Env;
use crate::ui::{CrlfWriter, CrosstermKeys, CrosstermTerminal};
use anyhow::{Result, bail};
use std::io::IsTerminal;

const EXIT_FAILURE: i32 = 1;
const EXIT_USAGE: i32 = 2;

fn main() {
    if let Err(e) = run() {
        error!("{:#}", e);
        std::process::exit(EXIT_FAILURE);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse_args();

    let Some(pipeline) = cli::resolve(&cli.argv()) else {
        error!("unknown command: {}", cli.command);
        info!("usage: git-ui [-C <path>] <record|add> [git commit args...]");
        std::process::exit(EXIT_USAGE);
    };

    // sanity checks
    if !std::io::stdin().is_terminal() || !std::io::stdout().is_terminal() {
        bail!("interactive terminal required");
    }
    let root = git::sanity_check(&cli.directory)?;

    let config = Config::from_env();
    let mut terminal = CrosstermTerminal;
    let mut keys = CrosstermKeys;
    let mut runner = ProcessRunner::new(&root);
    let mut out = CrlfWriter::stdout();

    pipeline.run(&mut Env {
        terminal: &mut terminal,
        keys: &mut keys,
        runner: &mut runner,
        out: &mut out,
        config: &config,
    })
}
