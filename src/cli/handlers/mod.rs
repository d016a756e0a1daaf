// src/cli/handlers/mod.rs

// One module per command body. Handlers talk to the session and the remote
// client collaborator; none of them know about the dispatch grammar.

pub mod find;
pub mod get;
pub mod help;
pub mod login;
pub mod logout;
pub mod put;
pub mod reload;
pub mod show;
