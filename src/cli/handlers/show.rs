// src/cli/handlers/show.rs

use crate::cli::registry::Invocation;
use crate::core::session::Session;
use crate::models::FileIndex;
use anyhow::Result;

/// Lists remote nodes as an indented tree, in path order, optionally
/// narrowed by a case-insensitive substring filter (`--filter`/`-f`) on the
/// node name.
pub fn handle(session: &mut Session, invocation: &Invocation<'_>) -> Result<()> {
    let filter = invocation.keywords.value("filter").map(str::to_lowercase);
    let index = session.file_index()?;
    for line in render_lines(index, filter.as_deref()) {
        println!("{line}");
    }
    Ok(())
}

fn render_lines(index: &FileIndex, filter: Option<&str>) -> Vec<String> {
    index
        .iter_by_path()
        .filter(|node| match filter {
            Some(needle) => node.name.to_lowercase().contains(needle),
            None => true,
        })
        .map(|node| format!("{} {}'{}'", node.handle, "  ".repeat(node.level), node.name))
        .collect()
}

// MARK: --- UNIT TESTS ---
