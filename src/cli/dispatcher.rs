// src/cli/dispatcher.rs

//! The command invoker and the configuration lifecycle around it.
//!
//! [`dispatch`] is one shot: select the command, scan the tokens, drain the
//! hook queue, invoke the handler. Either the handler runs exactly once with
//! a fully resolved argument set, or an error unwinds before any invocation.
//! [`run`] wraps a dispatch in the load/parse/save configuration lifecycle:
//! the store is loaded before parsing begins and saved after parsing
//! completes, on every exit path.

use crate::cli::error::CliError;
use crate::cli::help;
use crate::cli::registry::{Invocation, Registry};
use crate::cli::scanner;
use crate::core::client::Transport;
use crate::core::config::ConfigStore;
use crate::core::session::Session;
use anyhow::Result;

/// Resolves and executes one command against an existing session.
pub fn dispatch(registry: &Registry, session: &mut Session, args: &[String]) -> Result<()> {
    log::debug!("Dispatching args: {:?}", args);

    let Some((command_name, rest)) = args.split_first() else {
        println!("{}", help::render(registry));
        return Err(CliError::MissingCommand.into());
    };
    let Some(command) = registry.command(command_name) else {
        println!("{}", help::render(registry));
        return Err(CliError::UnknownCommand(command_name.clone()).into());
    };

    let outcome = scanner::scan(registry, command, rest)?;
    let invocation = Invocation {
        registry,
        positional: &outcome.positional,
        keywords: &outcome.keywords,
    };

    for queued in &outcome.hooks {
        (queued.hook)(session, &invocation, &queued.name, queued.value.as_deref())?;
    }

    (command.handler)(session, &invocation)
}

/// Runs one full invocation: load the persisted configuration, dispatch,
/// then save (unconditionally, exactly once).
pub fn run(
    registry: &Registry,
    store: &ConfigStore,
    transport: Box<dyn Transport>,
    args: &[String],
) -> Result<()> {
    let config = store.load()?;
    let mut session = Session::from_config(transport, &config);

    let result = dispatch(registry, &mut session, args);

    let exported = session.export_config();
    if let Err(save_err) = store.save(&exported) {
        if result.is_ok() {
            return Err(save_err.into());
        }
        // The dispatch error is the one the user needs to see.
        log::warn!("Failed to save configuration: {save_err}");
    }
    result
}

// MARK: --- UNIT TESTS ---

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::registry::{CommandDecl, ParamDecl, Registry};
    use crate::core::client::NullTransport;
    use crate::core::config::ConfigMap;
    use crate::core::session::tests::FakeTransport;
    use serde_json::json;
    use std::cell::RefCell;

    // Handlers and hooks are plain fn pointers, so call recording goes
    // through a thread-local; each #[test] runs on its own thread.
    thread_local! {
        static CALLS: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
    }

    fn record(entry: String) {
        CALLS.with(|calls| calls.borrow_mut().push(entry));
    }

    fn take_calls() -> Vec<String> {
        CALLS.with(|calls| calls.borrow_mut().drain(..).collect())
    }

    fn recording_handler(_: &mut Session, invocation: &Invocation<'_>) -> Result<()> {
        let mut keywords: Vec<String> = invocation
            .keywords
            .iter()
            .map(|(k, v)| format!("{k}={}", v.unwrap_or("_")))
            .collect();
        keywords.sort_unstable();
        record(format!(
            "handler pos=[{}] kw=[{}]",
            invocation.positional.join(","),
            keywords.join(",")
        ));
        Ok(())
    }

    fn recording_hook(
        _: &mut Session,
        _: &Invocation<'_>,
        name: &str,
        value: Option<&str>,
    ) -> Result<()> {
        record(format!("hook {name}={}", value.unwrap_or("_")));
        Ok(())
    }

    fn aborting_handler(_: &mut Session, _: &Invocation<'_>) -> Result<()> {
        record("handler".to_string());
        Err(CliError::abort("stored credential is absent").into())
    }

    fn email_storing_handler(session: &mut Session, invocation: &Invocation<'_>) -> Result<()> {
        if let Some(email) = invocation.keywords.value("email") {
            session.set_email(email);
        }
        Ok(())
    }

    fn fixture() -> Registry {
        Registry::builder("tool", "doc")
            .param(ParamDecl::new("p1").alias("1").needs_value().hook(recording_hook))
            .param(ParamDecl::new("p2").alias("2").needs_value().hook(recording_hook))
            .command(
                CommandDecl::new("login", recording_handler)
                    .param(ParamDecl::new("email").alias("e").needs_value()),
            )
            .command(CommandDecl::new("logout", recording_handler))
            .command(CommandDecl::new("fail", aborting_handler))
            .build()
    }

    fn args(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|s| s.to_string()).collect()
    }

    fn session() -> Session {
        Session::new(Box::new(NullTransport))
    }

    #[test]
    fn test_login_example_invokes_handler_once_with_keywords() {
        let registry = fixture();
        dispatch(&registry, &mut session(), &args(&["login", "-e", "a@b.com"])).unwrap();
        assert_eq!(take_calls(), vec!["handler pos=[] kw=[email=a@b.com]"]);
    }

    #[test]
    fn test_logout_example_invokes_handler_once_with_empty_maps() {
        let registry = fixture();
        dispatch(&registry, &mut session(), &args(&["logout"])).unwrap();
        assert_eq!(take_calls(), vec!["handler pos=[] kw=[]"]);
    }

    #[test]
    fn test_unknown_command_is_fatal_and_invokes_nothing() {
        let registry = fixture();
        let err = dispatch(&registry, &mut session(), &args(&["bogus"])).unwrap_err();
        assert_eq!(
            err.downcast_ref::<CliError>(),
            Some(&CliError::UnknownCommand("bogus".to_string()))
        );
        assert!(take_calls().is_empty());
    }

    #[test]
    fn test_missing_command_is_fatal() {
        let registry = fixture();
        let err = dispatch(&registry, &mut session(), &[]).unwrap_err();
        assert_eq!(err.downcast_ref::<CliError>(), Some(&CliError::MissingCommand));
        assert!(take_calls().is_empty());
    }

    #[test]
    fn test_scan_error_prevents_hooks_and_handler() {
        let registry = fixture();
        let err = dispatch(&registry, &mut session(), &args(&["login", "-1", "x", "-e"]))
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CliError>(),
            Some(CliError::MissingValue { switch: 'e', .. })
        ));
        // All-or-nothing: the already-resolved hook never fires either.
        assert!(take_calls().is_empty());
    }

    #[test]
    fn test_hooks_fire_in_order_before_handler() {
        let registry = fixture();
        dispatch(
            &registry,
            &mut session(),
            &args(&["logout", "-1", "x", "-2", "y"]),
        )
        .unwrap();
        assert_eq!(
            take_calls(),
            vec!["hook p1=x", "hook p2=y", "handler pos=[] kw=[p1=x,p2=y]"]
        );
    }

    #[test]
    fn test_handler_abort_surfaces_as_cli_error() {
        let registry = fixture();
        let err = dispatch(&registry, &mut session(), &args(&["fail"])).unwrap_err();
        assert_eq!(
            err.downcast_ref::<CliError>(),
            Some(&CliError::Abort("stored credential is absent".to_string()))
        );
        // The handler ran exactly once before aborting.
        assert_eq!(take_calls(), vec!["handler"]);
    }

    #[test]
    fn test_run_saves_config_after_success() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::at(dir.path().join("config.json"));
        let registry = Registry::builder("tool", "doc")
            .command(
                CommandDecl::new("login", email_storing_handler)
                    .param(ParamDecl::new("email").alias("e").needs_value()),
            )
            .build();

        run(
            &registry,
            &store,
            Box::new(FakeTransport::new(vec![])),
            &args(&["login", "-e", "a@b.com"]),
        )
        .unwrap();

        let saved = store.load().unwrap();
        assert_eq!(saved.get("email"), Some(&json!("a@b.com")));
    }

    #[test]
    fn test_run_saves_config_even_when_dispatch_fails() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::at(dir.path().join("config.json"));
        let registry = fixture();

        let mut config = ConfigMap::new();
        config.insert("sid".to_string(), json!("stored-sid"));
        config.insert("master_key".to_string(), json!([1, 2, 3, 4]));
        store.save(&config).unwrap();

        let err = run(
            &registry,
            &store,
            Box::new(FakeTransport::new(vec![])),
            &args(&["bogus"]),
        )
        .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CliError>(),
            Some(CliError::UnknownCommand(_))
        ));

        // The stored credentials survived the failed run.
        let saved = store.load().unwrap();
        assert_eq!(saved.get("sid"), Some(&json!("stored-sid")));
        take_calls();
    }

    #[test]
    fn test_run_starts_from_empty_config_on_first_use() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::at(dir.path().join("config.json"));
        let registry = fixture();

        run(
            &registry,
            &store,
            Box::new(FakeTransport::new(vec![])),
            &args(&["logout"]),
        )
        .unwrap();
        take_calls();

        let saved = store.load().unwrap();
        assert_eq!(saved.get("sid"), Some(&json!("")));
    }
}
