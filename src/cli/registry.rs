// src/cli/registry.rs

//! The immutable command/parameter registry and its builder.
//!
//! Registration is an explicit step at startup: declarations accumulate in
//! the builder, which compiles them into alias lookup tables once. The
//! resulting [`Registry`] is read-only and safe to reuse across any number
//! of dispatch calls in the same process.

use crate::core::session::Session;
use anyhow::Result;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

/// The body of a command, called exactly once per successful dispatch.
pub type CommandHandler = fn(&mut Session, &Invocation<'_>) -> Result<()>;

/// A callback bound to a parameter, fired once that parameter's value is
/// resolved and always before the owning command's handler body. It receives
/// the final positional/keyword state, the canonical parameter name, and the
/// resolved value.
pub type ParamHook = fn(&mut Session, &Invocation<'_>, &str, Option<&str>) -> Result<()>;

/// The fully resolved argument set a hook or handler runs against.
#[derive(Debug)]
pub struct Invocation<'a> {
    pub registry: &'a Registry,
    pub positional: &'a [String],
    pub keywords: &'a KeywordMap,
}

/// The keyword map produced by a scan: canonical parameter name to resolved
/// value. Parameters never mentioned on the command line are absent, not
/// defaulted; mentioned parameters without a value (and without a declared
/// default) are present with `None`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct KeywordMap {
    entries: HashMap<String, Option<String>>,
}

impl KeywordMap {
    pub fn insert(&mut self, name: &str, value: Option<String>) {
        self.entries.insert(name.to_string(), value);
    }

    /// Whether the parameter was mentioned at all.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// The resolved value, flattened: `None` both when the parameter is
    /// absent and when it was mentioned without a value.
    pub fn value(&self, name: &str) -> Option<&str> {
        self.entries.get(name).and_then(|v| v.as_deref())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
    }
}

/// A compiled parameter record. The alias set always includes the canonical
/// name itself.
pub struct ParamSpec {
    pub name: String,
    pub aliases: Vec<String>,
    pub need_value: bool,
    pub default: Option<String>,
    pub doc: Option<String>,
    pub hook: Option<ParamHook>,
}

impl fmt::Debug for ParamSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParamSpec")
            .field("name", &self.name)
            .field("aliases", &self.aliases)
            .field("need_value", &self.need_value)
            .field("default", &self.default)
            .field("hook", &self.hook.is_some())
            .finish()
    }
}

/// A compiled command record with its own alias→parameter table. Local
/// aliases shadow global ones during resolution.
pub struct CommandSpec {
    pub name: String,
    pub aliases: Vec<String>,
    pub doc: Option<String>,
    pub params: HashMap<String, Arc<ParamSpec>>,
    pub handler: CommandHandler,
}

impl fmt::Debug for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut params: Vec<(&str, &str)> = self
            .params
            .iter()
            .map(|(alias, spec)| (alias.as_str(), spec.name.as_str()))
            .collect();
        params.sort_unstable();
        f.debug_struct("CommandSpec")
            .field("name", &self.name)
            .field("aliases", &self.aliases)
            .field("params", &params)
            .finish()
    }
}

/// The immutable lookup tables built once at startup.
pub struct Registry {
    tool_name: String,
    doc: String,
    commands: HashMap<String, Arc<CommandSpec>>,
    params: HashMap<String, Arc<ParamSpec>>,
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut commands: Vec<(&str, &str)> = self
            .commands
            .iter()
            .map(|(alias, spec)| (alias.as_str(), spec.name.as_str()))
            .collect();
        commands.sort_unstable();
        let mut params: Vec<(&str, &str)> = self
            .params
            .iter()
            .map(|(alias, spec)| (alias.as_str(), spec.name.as_str()))
            .collect();
        params.sort_unstable();
        f.debug_struct("Registry")
            .field("tool_name", &self.tool_name)
            .field("commands", &commands)
            .field("params", &params)
            .finish()
    }
}

impl Registry {
    pub fn builder(tool_name: &str, doc: &str) -> RegistryBuilder {
        RegistryBuilder {
            tool_name: tool_name.to_string(),
            doc: doc.to_string(),
            params: Vec::new(),
            commands: Vec::new(),
        }
    }

    pub fn tool_name(&self) -> &str {
        &self.tool_name
    }

    pub fn doc(&self) -> &str {
        &self.doc
    }

    /// Looks up a command by any of its aliases.
    pub fn command(&self, name: &str) -> Option<&Arc<CommandSpec>> {
        self.commands.get(name)
    }

    /// Resolves a parameter alias in the context of a command: the
    /// command-local table first, then the global table. First match wins.
    pub fn resolve_param<'r>(
        &'r self,
        command: &'r CommandSpec,
        alias: &str,
    ) -> Option<&'r Arc<ParamSpec>> {
        command.params.get(alias).or_else(|| self.params.get(alias))
    }

    /// All commands, deduplicated, in canonical-name order.
    pub fn commands_by_name(&self) -> Vec<&Arc<CommandSpec>> {
        let map: BTreeMap<&str, &Arc<CommandSpec>> = self
            .commands
            .values()
            .map(|spec| (spec.name.as_str(), spec))
            .collect();
        map.into_values().collect()
    }

    /// All global parameters, deduplicated, in canonical-name order.
    pub fn params_by_name(&self) -> Vec<&Arc<ParamSpec>> {
        let map: BTreeMap<&str, &Arc<ParamSpec>> = self
            .params
            .values()
            .map(|spec| (spec.name.as_str(), spec))
            .collect();
        map.into_values().collect()
    }
}

/// A parameter declaration, global or command-local.
#[derive(Default)]
pub struct ParamDecl {
    name: String,
    aliases: Vec<String>,
    need_value: bool,
    default: Option<String>,
    doc: Option<String>,
    hook: Option<ParamHook>,
}

impl fmt::Debug for ParamDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParamDecl")
            .field("name", &self.name)
            .field("aliases", &self.aliases)
            .finish()
    }
}

impl ParamDecl {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    pub fn alias(mut self, alias: &str) -> Self {
        self.aliases.push(alias.to_string());
        self
    }

    /// Marks the parameter as requiring a value (`--name=value`, or a short
    /// switch consuming the next token).
    pub fn needs_value(mut self) -> Self {
        self.need_value = true;
        self
    }

    pub fn default_value(mut self, value: &str) -> Self {
        self.default = Some(value.to_string());
        self
    }

    pub fn doc(mut self, doc: &str) -> Self {
        self.doc = Some(doc.to_string());
        self
    }

    pub fn hook(mut self, hook: ParamHook) -> Self {
        self.hook = Some(hook);
        self
    }

    fn compile(self) -> Arc<ParamSpec> {
        let mut aliases = vec![self.name.clone()];
        aliases.extend(self.aliases);
        Arc::new(ParamSpec {
            name: self.name,
            aliases,
            need_value: self.need_value,
            default: self.default,
            doc: self.doc,
            hook: self.hook,
        })
    }
}

/// A command declaration with its local parameters and handler.
pub struct CommandDecl {
    name: String,
    aliases: Vec<String>,
    doc: Option<String>,
    params: Vec<ParamDecl>,
    handler: CommandHandler,
}

impl fmt::Debug for CommandDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandDecl")
            .field("name", &self.name)
            .field("aliases", &self.aliases)
            .finish()
    }
}

impl CommandDecl {
    pub fn new(name: &str, handler: CommandHandler) -> Self {
        Self {
            name: name.to_string(),
            aliases: Vec::new(),
            doc: None,
            params: Vec::new(),
            handler,
        }
    }

    pub fn alias(mut self, alias: &str) -> Self {
        self.aliases.push(alias.to_string());
        self
    }

    pub fn doc(mut self, doc: &str) -> Self {
        self.doc = Some(doc.to_string());
        self
    }

    pub fn param(mut self, param: ParamDecl) -> Self {
        self.params.push(param);
        self
    }

    fn compile(self) -> Arc<CommandSpec> {
        let mut aliases = vec![self.name.clone()];
        aliases.extend(self.aliases);
        let mut params = HashMap::new();
        for decl in self.params {
            register_param(&mut params, decl.compile(), &self.name);
        }
        Arc::new(CommandSpec {
            name: self.name,
            aliases,
            doc: self.doc,
            params,
            handler: self.handler,
        })
    }
}

/// Accumulates declarations, then compiles one immutable [`Registry`].
#[derive(Debug)]
pub struct RegistryBuilder {
    tool_name: String,
    doc: String,
    params: Vec<ParamDecl>,
    commands: Vec<CommandDecl>,
}

impl RegistryBuilder {
    /// Declares a global parameter, available to every command.
    pub fn param(mut self, param: ParamDecl) -> Self {
        self.params.push(param);
        self
    }

    pub fn command(mut self, command: CommandDecl) -> Self {
        self.commands.push(command);
        self
    }

    pub fn build(self) -> Registry {
        let mut params = HashMap::new();
        for decl in self.params {
            register_param(&mut params, decl.compile(), "global");
        }

        let mut commands: HashMap<String, Arc<CommandSpec>> = HashMap::new();
        for decl in self.commands {
            let spec = decl.compile();
            for alias in &spec.aliases {
                if let Some(prev) = commands.insert(alias.clone(), Arc::clone(&spec))
                    && prev.name != spec.name
                {
                    // Last registration wins, by contract. Surface it rather
                    // than resolving silently.
                    log::warn!(
                        "Command alias '{}' of '{}' overwrites earlier registration for '{}'.",
                        alias,
                        spec.name,
                        prev.name
                    );
                }
            }
        }

        Registry {
            tool_name: self.tool_name,
            doc: self.doc,
            commands,
            params,
        }
    }
}

/// Registers every alias of a compiled parameter into a table, logging any
/// alias that an earlier declaration already claimed.
fn register_param(table: &mut HashMap<String, Arc<ParamSpec>>, spec: Arc<ParamSpec>, scope: &str) {
    for alias in &spec.aliases {
        if let Some(prev) = table.insert(alias.clone(), Arc::clone(&spec))
            && prev.name != spec.name
        {
            log::warn!(
                "Parameter alias '{}' of '{}' overwrites earlier registration for '{}' (scope: {}).",
                alias,
                spec.name,
                prev.name,
                scope
            );
        }
    }
}

// MARK: --- UNIT TESTS ---

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn noop_handler(_: &mut Session, _: &Invocation<'_>) -> Result<()> {
        Ok(())
    }

    fn noop_hook(_: &mut Session, _: &Invocation<'_>, _: &str, _: Option<&str>) -> Result<()> {
        Ok(())
    }

    #[test]
    fn test_alias_set_includes_canonical_name() {
        let registry = Registry::builder("tool", "doc")
            .param(ParamDecl::new("email").alias("e").needs_value())
            .build();

        let by_name = registry.params_by_name();
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name.first().map(|p| p.aliases.clone()), Some(vec![
            "email".to_string(),
            "e".to_string()
        ]));
    }

    #[test]
    fn test_command_lookup_by_alias() {
        let registry = Registry::builder("tool", "doc")
            .command(CommandDecl::new("reload", noop_handler).alias("refresh"))
            .build();

        assert_eq!(registry.command("reload").map(|c| c.name.as_str()), Some("reload"));
        assert_eq!(registry.command("refresh").map(|c| c.name.as_str()), Some("reload"));
        assert!(registry.command("bogus").is_none());
    }

    #[test]
    fn test_last_alias_registration_wins() {
        let registry = Registry::builder("tool", "doc")
            .param(ParamDecl::new("verbose").alias("v"))
            .param(ParamDecl::new("version").alias("v"))
            .build();

        let command = CommandDecl::new("noop", noop_handler).compile();
        assert_eq!(
            registry.resolve_param(&command, "v").map(|p| p.name.as_str()),
            Some("version")
        );
        // The earlier parameter is still reachable by its untouched aliases.
        assert_eq!(
            registry.resolve_param(&command, "verbose").map(|p| p.name.as_str()),
            Some("verbose")
        );
    }

    #[test]
    fn test_local_params_shadow_global() {
        let registry = Registry::builder("tool", "doc")
            .param(ParamDecl::new("filter").alias("f").needs_value())
            .build();
        let command = CommandDecl::new("show", noop_handler)
            .param(ParamDecl::new("format").alias("f").needs_value())
            .compile();

        assert_eq!(
            registry.resolve_param(&command, "f").map(|p| p.name.as_str()),
            Some("format")
        );
        // The global record stays reachable through its long alias.
        assert_eq!(
            registry.resolve_param(&command, "filter").map(|p| p.name.as_str()),
            Some("filter")
        );
    }

    #[test]
    fn test_listings_are_sorted_and_deduplicated() {
        let registry = Registry::builder("tool", "doc")
            .param(ParamDecl::new("debug").alias("d").hook(noop_hook))
            .param(ParamDecl::new("help").alias("h"))
            .command(CommandDecl::new("show", noop_handler))
            .command(CommandDecl::new("find", noop_handler).alias("search"))
            .build();

        let commands: Vec<&str> = registry
            .commands_by_name()
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(commands, vec!["find", "show"]);

        let params: Vec<&str> = registry
            .params_by_name()
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(params, vec!["debug", "help"]);
    }

    #[test]
    fn test_keyword_map_distinguishes_absent_from_valueless() {
        let mut keywords = KeywordMap::default();
        keywords.insert("debug", None);
        keywords.insert("email", Some("a@b.com".to_string()));

        assert!(keywords.contains("debug"));
        assert_eq!(keywords.value("debug"), None);
        assert_eq!(keywords.value("email"), Some("a@b.com"));
        assert!(!keywords.contains("filter"));
        assert_eq!(keywords.len(), 2);
    }
}
