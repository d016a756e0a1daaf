// src/cli/hooks.rs

//! Hooks bound to the global parameters. They fire in resolution order,
//! after a successful scan and before the command body.

use crate::cli::help;
use crate::cli::registry::Invocation;
use crate::core::session::Session;
use anyhow::Result;

/// Hook for `--debug`/`-d`: usage text plus a dump of the compiled registry
/// tables.
pub fn debug(
    _session: &mut Session,
    invocation: &Invocation<'_>,
    _name: &str,
    _value: Option<&str>,
) -> Result<()> {
    println!("{}", help::render(invocation.registry));
    println!("{:#?}", invocation.registry);
    Ok(())
}

/// Hook for `--help`/`-h`: usage text, regardless of which command follows.
pub fn usage(
    _session: &mut Session,
    invocation: &Invocation<'_>,
    _name: &str,
    _value: Option<&str>,
) -> Result<()> {
    println!("{}", help::render(invocation.registry));
    Ok(())
}
