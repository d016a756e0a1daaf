// src/cli/handlers/logout.rs

use crate::cli::registry::Invocation;
use crate::core::session::Session;
use anyhow::Result;

/// Drops the stored credentials and the cached file index. Idempotent.
pub fn handle(session: &mut Session, _invocation: &Invocation<'_>) -> Result<()> {
    session.logout();
    println!("logged out");
    Ok(())
}
