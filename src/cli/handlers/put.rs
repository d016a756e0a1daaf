// src/cli/handlers/put.rs

use crate::cli::error::CliError;
use crate::cli::registry::Invocation;
use crate::core::session::Session;
use anyhow::Result;
use std::path::Path;

/// Uploads a local file under a remote directory handle.
pub fn handle(session: &mut Session, invocation: &Invocation<'_>) -> Result<()> {
    let (Some(filename), Some(dir_handle)) = (
        invocation.positional.first(),
        invocation.positional.get(1),
    ) else {
        return Err(
            CliError::abort("Need a file to upload and a directory handle where to upload").into(),
        );
    };

    let src = Path::new(filename);
    if !src.exists() {
        return Err(CliError::abort(format!("File [{filename}] doesn't exist")).into());
    }

    let node = session
        .file_index()?
        .get(dir_handle)
        .cloned()
        .ok_or_else(|| CliError::abort(format!("No directory handle named [{dir_handle}]")))?;
    if !node.kind.is_container() {
        return Err(CliError::abort(format!(
            "The handle [{dir_handle}] must be a directory handle. [{}] is not a directory",
            node.name
        ))
        .into());
    }

    let name = src
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| CliError::abort(format!("File [{filename}] has no usable file name")))?;
    session.client()?.upload(src, &node.handle, name)?;

    Ok(())
}

// MARK: --- UNIT TESTS ---
