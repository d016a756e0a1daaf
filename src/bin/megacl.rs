// src/bin/megacl.rs

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use megacl::cli::{self, Cli, dispatcher};
use megacl::core::client::NullTransport;
use megacl::core::config::ConfigStore;

/// The main entry point of the `megacl` application.
/// It sets up logging, hands the raw arguments to the dispatch engine, and
/// performs centralized error handling: every fatal condition surfaces here
/// exactly once and maps to exit code 1.
fn main() {
    env_logger::init();

    if let Err(e) = run_cli(Cli::parse()) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run_cli(cli: Cli) -> Result<()> {
    log::debug!("CLI args parsed: {:?}", cli);

    let registry = cli::build_registry();
    let store = ConfigStore::from_home()?;
    // The wire protocol lives in the client collaborator; this build links
    // none, so remote commands fail with an ordinary error while the
    // dispatch engine and local commands stay fully usable.
    dispatcher::run(&registry, &store, Box::new(NullTransport), &cli.args)
}
