// src/cli/scanner.rs

//! The token scanner: a two-state machine over the raw argument list.
//!
//! Single-lookahead scanning keeps the grammar free of backtracking while
//! still covering clustered short switches (`-abc`) and long
//! `--name[=value]` options. The scanner never runs a hook itself; it only
//! queues them, in the exact order values become resolved, for the
//! dispatcher to drain before the command body runs.

use crate::cli::error::CliError;
use crate::cli::registry::{CommandSpec, KeywordMap, ParamHook, ParamSpec, Registry};
use std::fmt;
use std::sync::Arc;

/// A hook queued during the scan, fired later by the dispatcher.
pub struct QueuedHook {
    pub hook: ParamHook,
    pub name: String,
    pub value: Option<String>,
}

impl fmt::Debug for QueuedHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueuedHook")
            .field("name", &self.name)
            .field("value", &self.value)
            .finish()
    }
}

/// The complete result of one scan: either this exists in full, or the scan
/// failed and nothing of it is observable.
#[derive(Debug, Default)]
pub struct ScanOutcome {
    pub positional: Vec<String>,
    pub keywords: KeywordMap,
    pub hooks: Vec<QueuedHook>,
}

/// The single short switch allowed to await its value at any scan position.
/// A second value-needing switch while one is pending is a parse error, not
/// a queue of depth two.
struct PendingSwitch<'t> {
    letter: char,
    cluster: &'t str,
    param: Arc<ParamSpec>,
}

impl PendingSwitch<'_> {
    fn missing_value(&self) -> CliError {
        CliError::MissingValue {
            switch: self.letter,
            cluster: self.cluster.to_string(),
        }
    }
}

/// Scans the tokens following the command name, left to right.
pub fn scan(
    registry: &Registry,
    command: &CommandSpec,
    tokens: &[String],
) -> Result<ScanOutcome, CliError> {
    let mut outcome = ScanOutcome::default();
    let mut pending: Option<PendingSwitch<'_>> = None;

    for token in tokens {
        if let Some(body) = token.strip_prefix("--") {
            // Long option. Only legal while no switch awaits its value.
            if let Some(prev) = &pending {
                return Err(prev.missing_value());
            }
            let (name, value) = match body.split_once('=') {
                Some((name, value)) => (name, Some(value)),
                None => (body, None),
            };
            let param = registry.resolve_param(command, name).ok_or_else(|| {
                CliError::UnknownParameter {
                    name: name.to_string(),
                    token: token.clone(),
                }
            })?;
            let value = value.map(str::to_string).or_else(|| param.default.clone());
            bind(&mut outcome, param, value);
        } else if token.len() > 1 && token.starts_with('-') {
            // Cluster of short switches. A lone "-" falls through to the
            // positional branch.
            if let Some(prev) = &pending {
                return Err(prev.missing_value());
            }
            for letter in token.chars().skip(1) {
                let mut alias_buf = [0u8; 4];
                let alias: &str = letter.encode_utf8(&mut alias_buf);
                let param = registry.resolve_param(command, alias).ok_or_else(|| {
                    CliError::UnknownParameter {
                        name: alias.to_string(),
                        token: token.clone(),
                    }
                })?;
                if param.need_value {
                    if let Some(prev) = &pending {
                        return Err(prev.missing_value());
                    }
                    pending = Some(PendingSwitch {
                        letter,
                        cluster: token.as_str(),
                        param: Arc::clone(param),
                    });
                } else {
                    let value = param.default.clone();
                    bind(&mut outcome, param, value);
                }
            }
        } else if let Some(prev) = pending.take() {
            // A plain token satisfies the pending switch.
            bind(&mut outcome, &prev.param, Some(token.clone()));
        } else {
            outcome.positional.push(token.clone());
        }
    }

    if let Some(prev) = &pending {
        return Err(prev.missing_value());
    }
    Ok(outcome)
}

/// Records a resolved value under the parameter's canonical name and queues
/// its hook, if one is bound.
fn bind(outcome: &mut ScanOutcome, param: &Arc<ParamSpec>, value: Option<String>) {
    outcome.keywords.insert(&param.name, value.clone());
    if let Some(hook) = param.hook {
        outcome.hooks.push(QueuedHook {
            hook,
            name: param.name.clone(),
            value,
        });
    }
}

// MARK: --- UNIT TESTS ---
