// src/cli/help.rs

//! Deterministic usage text: commands and global parameters sorted by
//! canonical name, with an indented continuation line of aliases whenever a
//! record has more than one. Pure formatting over the registry.

use crate::cli::registry::Registry;

const ALIAS_INDENT: usize = 24;

/// Renders the full usage listing as one string. Callers print it.
pub fn render(registry: &Registry) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Usage: {} COMMAND_NAME [OPTION] [VALUES]\n",
        registry.tool_name()
    ));
    if !registry.doc().is_empty() {
        out.push_str(registry.doc());
        out.push('\n');
    }
    out.push('\n');

    let commands = registry.commands_by_name();
    if !commands.is_empty() {
        out.push_str("Commands:\n");
        for command in commands {
            out.push_str(&format!(
                "    {:<20} {}\n",
                command.name,
                command.doc.as_deref().unwrap_or_default()
            ));
            if command.aliases.len() > 1 {
                let mut aliases = command.aliases.clone();
                aliases.sort_unstable();
                out.push_str(&format!(
                    "{}({})\n",
                    " ".repeat(ALIAS_INDENT),
                    aliases.join(",")
                ));
            }
        }
        out.push('\n');
    }

    let params = registry.params_by_name();
    if !params.is_empty() {
        out.push_str("General parameters:\n");
        for param in params {
            out.push_str(&format!(
                "    --{:<18} {}\n",
                param.name,
                param.doc.as_deref().unwrap_or_default()
            ));
            if param.aliases.len() > 1 {
                let mut aliases: Vec<String> = param
                    .aliases
                    .iter()
                    .map(|alias| {
                        if alias.len() > 1 {
                            format!("--{alias}")
                        } else {
                            format!("-{alias}")
                        }
                    })
                    .collect();
                aliases.sort_unstable();
                out.push_str(&format!(
                    "{}({})\n",
                    " ".repeat(ALIAS_INDENT),
                    aliases.join(",")
                ));
            }
        }
        out.push('\n');
    }

    out
}

// MARK: --- UNIT TESTS ---
