// src/cli/handlers/help.rs

use crate::cli::help;
use crate::cli::registry::Invocation;
use crate::core::session::Session;
use anyhow::Result;

/// Prints the top-level usage text.
pub fn handle(_session: &mut Session, invocation: &Invocation<'_>) -> Result<()> {
    println!("{}", help::render(invocation.registry));
    Ok(())
}
