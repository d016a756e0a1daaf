// src/cli/handlers/get.rs

use crate::cli::error::CliError;
use crate::cli::registry::Invocation;
use crate::core::session::Session;
use anyhow::{Context, Result};
use colored::Colorize;

/// Downloads the file with the given handle into the working directory.
///
/// The transfer goes to a temporary file first and is moved into place only
/// once it completed, so an interrupted download never leaves a truncated
/// file under the final name.
pub fn handle(session: &mut Session, invocation: &Invocation<'_>) -> Result<()> {
    let handle = invocation
        .positional
        .first()
        .ok_or_else(|| CliError::abort("Need a file handle to download"))?;
    let node = session
        .file_index()?
        .get(handle)
        .cloned()
        .ok_or_else(|| CliError::abort(format!("No file with handle [{handle}]")))?;

    println!("Getting [{}]", node.name.cyan());

    let tmp = tempfile::Builder::new()
        .prefix(".mega-")
        .tempfile_in(".")
        .context("could not create a temporary download file")?;
    session.client()?.download(&node.handle, tmp.path())?;
    tmp.persist(&node.name)
        .with_context(|| format!("could not move the download into place as '{}'", node.name))?;

    Ok(())
}

// MARK: --- UNIT TESTS ---
