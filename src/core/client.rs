// src/core/client.rs

//! The narrow interface to the remote Mega client.
//!
//! Everything protocol-shaped (the login handshake, directory-tree
//! reconstruction, chunked transfers, crypto) lives behind these two traits.
//! The dispatch engine never touches them; only command bodies do.

use crate::models::FileIndex;
use serde_json::Value;
use std::path::Path;
use thiserror::Error;

/// Represents errors reported by the remote client collaborator.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Login failed.")]
    LoginFailed,
    #[error("The session is no longer valid. Run 'login' again.")]
    SessionExpired,
    #[error("Transfer failed: {0}")]
    Transfer(String),
    #[error("Remote request failed: {0}")]
    Request(String),
    #[error("No remote transport is linked into this build.")]
    TransportUnavailable,
}

/// The credentials a client exposes for persistence between runs. The master
/// key and sequence number are opaque to this crate; they are stored and
/// handed back verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedSession {
    pub sid: String,
    pub master_key: Value,
    pub seqno: Option<Value>,
}

/// A live, authenticated connection to the remote service.
pub trait RemoteClient {
    /// The session id of this connection.
    fn sid(&self) -> &str;

    /// The opaque master key, for persistence.
    fn master_key(&self) -> Value;

    /// The opaque server sequence number, for persistence. Refreshed on
    /// every export so reconnects resume where this run left off.
    fn seqno(&self) -> Option<Value>;

    /// Fetches the remote filesystem with paths and depths already resolved.
    fn file_index(&mut self) -> Result<FileIndex, ClientError>;

    /// Downloads the node with the given handle into `dest`.
    fn download(&mut self, handle: &str, dest: &Path) -> Result<(), ClientError>;

    /// Uploads the local file at `src` under the directory node `parent`,
    /// with the given remote name.
    fn upload(&mut self, src: &Path, parent: &str, name: &str) -> Result<(), ClientError>;
}

/// Creates [`RemoteClient`] connections, either from fresh credentials or
/// from a session persisted by a previous run.
pub trait Transport {
    fn login(&self, email: &str, password: &str) -> Result<Box<dyn RemoteClient>, ClientError>;
    fn resume(&self, saved: &SavedSession) -> Result<Box<dyn RemoteClient>, ClientError>;
}

/// A transport for builds without the wire-protocol crate linked in. Every
/// connection attempt reports [`ClientError::TransportUnavailable`]; local
/// commands (help, logout) are unaffected.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullTransport;

impl Transport for NullTransport {
    fn login(&self, _email: &str, _password: &str) -> Result<Box<dyn RemoteClient>, ClientError> {
        Err(ClientError::TransportUnavailable)
    }

    fn resume(&self, _saved: &SavedSession) -> Result<Box<dyn RemoteClient>, ClientError> {
        Err(ClientError::TransportUnavailable)
    }
}

// MARK: --- UNIT TESTS ---

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_null_transport_refuses_connections() {
        let saved = SavedSession {
            sid: "sid".to_string(),
            master_key: json!([1, 2, 3, 4]),
            seqno: None,
        };
        assert!(matches!(
            NullTransport.login("a@b.com", "pw"),
            Err(ClientError::TransportUnavailable)
        ));
        assert!(matches!(
            NullTransport.resume(&saved),
            Err(ClientError::TransportUnavailable)
        ));
    }
}
