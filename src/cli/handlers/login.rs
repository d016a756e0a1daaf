// src/cli/handlers/login.rs

use crate::cli::error::CliError;
use crate::cli::registry::Invocation;
use crate::core::session::Session;
use anyhow::{Context, Result};
use colored::Colorize;
use dialoguer::Password;

/// Authenticates against the remote service.
///
/// The email comes from `--email`/`-e`, else from the first positional
/// argument, else from the one remembered in the configuration. The password
/// is always prompted, never taken from the command line.
pub fn handle(session: &mut Session, invocation: &Invocation<'_>) -> Result<()> {
    if let Some(email) = invocation.keywords.value("email") {
        session.set_email(email);
    } else if let Some(email) = invocation.positional.first() {
        session.set_email(email);
    }
    let email = session
        .email()
        .map(str::to_string)
        .ok_or_else(|| CliError::abort("need email to login"))?;

    println!("Login : [{}]", email.cyan());
    let password = Password::new()
        .with_prompt("Password")
        .allow_empty_password(true)
        .interact()?;
    if password.is_empty() {
        return Err(CliError::abort("need a password to login").into());
    }

    session.login(&email, &password).context("login failed")?;
    println!("{}", "login success".green());
    Ok(())
}
