// src/cli/handlers/reload.rs

use crate::cli::registry::Invocation;
use crate::core::session::Session;
use anyhow::Result;

/// Drops the cached file index and rebuilds it from the remote client.
pub fn handle(session: &mut Session, _invocation: &Invocation<'_>) -> Result<()> {
    session.invalidate_index();
    let count = session.file_index()?.len();
    log::debug!("Reloaded file index: {count} nodes");
    Ok(())
}
