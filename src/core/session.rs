// src/core/session.rs

//! The long-lived session passed into every command handler.
//!
//! It owns the stored credentials, the lazily attached remote client, and
//! the cached file index. The cache is invalidated explicitly by `logout`
//! and `reload`; nothing rebuilds it behind a handler's back.

use crate::core::client::{ClientError, RemoteClient, SavedSession, Transport};
use crate::core::config::ConfigMap;
use crate::models::FileIndex;
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Represents errors raised by session-level operations.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Not logged in. Run 'login' first.")]
    NotLoggedIn,
    #[error(transparent)]
    Client(#[from] ClientError),
}

pub struct Session {
    transport: Box<dyn Transport>,
    sid: String,
    master_key: Value,
    email: Option<String>,
    seqno: Option<Value>,
    client: Option<Box<dyn RemoteClient>>,
    index: Option<FileIndex>,
}

impl fmt::Debug for Session {
    // The master key is a credential; it never appears in debug output.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("sid", &self.sid)
            .field("email", &self.email)
            .field("client_attached", &self.client.is_some())
            .field("index_cached", &self.index.is_some())
            .finish()
    }
}

impl Session {
    pub fn new(transport: Box<dyn Transport>) -> Self {
        Self {
            transport,
            sid: String::new(),
            master_key: Value::Null,
            email: None,
            seqno: None,
            client: None,
            index: None,
        }
    }

    /// Builds a session from a previously persisted configuration map.
    pub fn from_config(transport: Box<dyn Transport>, config: &ConfigMap) -> Self {
        let mut session = Self::new(transport);
        session.import_config(config);
        session
    }

    /// Restores the persisted fields. Unknown keys are ignored; missing keys
    /// fall back to the logged-out defaults.
    pub fn import_config(&mut self, config: &ConfigMap) {
        self.sid = config
            .get("sid")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        self.master_key = config.get("master_key").cloned().unwrap_or(Value::Null);
        self.email = config
            .get("email")
            .and_then(Value::as_str)
            .map(str::to_string);
        self.seqno = config.get("seqno").filter(|v| !v.is_null()).cloned();
    }

    /// Exports the fields worth persisting. When a client is attached, its
    /// sequence number is refreshed first so the next run resumes correctly.
    pub fn export_config(&mut self) -> ConfigMap {
        if let Some(client) = &self.client {
            self.seqno = client.seqno();
        }
        let mut config = ConfigMap::new();
        config.insert("sid".to_string(), Value::String(self.sid.clone()));
        config.insert("master_key".to_string(), self.master_key.clone());
        config.insert(
            "email".to_string(),
            self.email.clone().map_or(Value::Null, Value::String),
        );
        config.insert(
            "seqno".to_string(),
            self.seqno.clone().unwrap_or(Value::Null),
        );
        config
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn set_email(&mut self, email: &str) {
        self.email = Some(email.to_string());
    }

    /// Whether stored credentials exist (live or resumable).
    pub fn is_authenticated(&self) -> bool {
        !self.sid.is_empty()
    }

    /// Authenticates against the remote service and stores the resulting
    /// credentials for persistence.
    pub fn login(&mut self, email: &str, password: &str) -> Result<(), SessionError> {
        let client = self.transport.login(email, password)?;
        self.sid = client.sid().to_string();
        self.master_key = client.master_key();
        self.seqno = client.seqno();
        self.email = Some(email.to_string());
        self.client = Some(client);
        self.index = None;
        Ok(())
    }

    /// Drops the stored credentials, the live client, and the cached index.
    /// The account email is kept so the next `login` can reuse it.
    pub fn logout(&mut self) {
        self.sid.clear();
        self.master_key = Value::Null;
        self.seqno = None;
        self.client = None;
        self.index = None;
    }

    /// Returns the live client, resuming the persisted session on first use.
    pub fn client(&mut self) -> Result<&mut (dyn RemoteClient + '_), SessionError> {
        if self.client.is_none() {
            if !self.is_authenticated() {
                return Err(SessionError::NotLoggedIn);
            }
            let saved = SavedSession {
                sid: self.sid.clone(),
                master_key: self.master_key.clone(),
                seqno: self.seqno.clone(),
            };
            self.client = Some(self.transport.resume(&saved)?);
        }
        // The unsizing coercion has to happen on the Some arm itself; an
        // ok_or chain would pin the trait object to 'static.
        match self.client.as_deref_mut() {
            Some(client) => Ok(client),
            None => Err(SessionError::NotLoggedIn),
        }
    }

    /// Returns the cached file index, fetching it from the client when no
    /// snapshot is held.
    pub fn file_index(&mut self) -> Result<&FileIndex, SessionError> {
        if self.index.is_none() {
            let index = self.client()?.file_index()?;
            log::debug!("Fetched file index with {} nodes", index.len());
            self.index = Some(index);
        }
        self.index.as_ref().ok_or(SessionError::NotLoggedIn)
    }

    /// Drops the cached file index. The next `file_index` call refetches.
    pub fn invalidate_index(&mut self) {
        self.index = None;
    }
}

// MARK: --- UNIT TESTS ---
