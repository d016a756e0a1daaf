// src/cli/mod.rs

pub mod dispatcher;
pub mod error;
pub mod handlers;
pub mod help;
pub mod hooks;
pub mod registry;
pub mod scanner;

use crate::constants::TOOL_NAME;
use clap::Parser;
use registry::{CommandDecl, ParamDecl, Registry};

/// megacl: a command line client for mega.co.nz.
///
/// clap only slurps the raw token vector (and provides `--version`); the
/// whole command grammar (clustered short switches, `--name[=value]`
/// options, positional arguments) lives in the dispatch engine, so clap's
/// own help flag is disabled to keep `-h`/`--help` ordinary parameters.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(disable_help_flag = true, disable_help_subcommand = true)]
pub struct Cli {
    /// The command name followed by its options and positional arguments.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

/// Compiles the full command surface into the immutable registry.
/// This is the single source of truth for commands and global parameters.
pub fn build_registry() -> Registry {
    Registry::builder(TOOL_NAME, "A command line tool for mega.co.nz.")
        .param(
            ParamDecl::new("debug")
                .alias("d")
                .doc("Provide some debug information.")
                .hook(hooks::debug),
        )
        .param(
            ParamDecl::new("help")
                .alias("h")
                .doc("Print usage information.")
                .hook(hooks::usage),
        )
        .command(CommandDecl::new("help", handlers::help::handle).doc("Give help."))
        .command(
            CommandDecl::new("login", handlers::login::handle)
                .doc("Login to mega.")
                .param(
                    ParamDecl::new("email")
                        .alias("e")
                        .needs_value()
                        .doc("Account email address."),
                ),
        )
        .command(CommandDecl::new("logout", handlers::logout::handle).doc("Logout from mega."))
        .command(
            CommandDecl::new("find", handlers::find::handle)
                .doc("List files on mega by full path.")
                .param(
                    ParamDecl::new("filter")
                        .alias("f")
                        .needs_value()
                        .doc("Case-insensitive substring to match against paths."),
                ),
        )
        .command(
            CommandDecl::new("show", handlers::show::handle)
                .doc("List files on mega as an indented tree.")
                .param(
                    ParamDecl::new("filter")
                        .alias("f")
                        .needs_value()
                        .doc("Case-insensitive substring to match against names."),
                ),
        )
        .command(CommandDecl::new("get", handlers::get::handle).doc("Get a file."))
        .command(CommandDecl::new("put", handlers::put::handle).doc("Put a file."))
        .command(
            CommandDecl::new("reload", handlers::reload::handle)
                .doc("Reload the cached filesystem index."),
        )
        .build()
}

// MARK: --- UNIT TESTS ---
