//! Session guard - the façade over a host session subsystem.

use std::collections::HashMap;
use std::path::Path;

use serde_json::Value;
use tracing::{info, warn};

use crate::core::config::SessioConfig;
use crate::host::traits::SessionHost;
use crate::host::types::StorageBackend;
use crate::sessions::errors::SessionError;
use crate::sessions::types::{ClientIdentity, VALIDATION_TOKEN_KEY};
use crate::sessions::{token, validation};

/// Guards one host-managed session against fixation.
///
/// On the first start of a session the guard records a validation token
/// derived from the client identity and the session name, then rotates the
/// session identifier. Every later start re-derives the token and compares;
/// on mismatch the session is destroyed first and [`SessionError::SessionViolated`]
/// is returned after, so no session state survives the error.
#[derive(Debug)]
pub struct SessionGuard<H: SessionHost> {
    host: H,
    identity: ClientIdentity,
}

impl<H: SessionHost> SessionGuard<H> {
    /// A guard for clients that declared no identity.
    pub fn new(host: H) -> Self {
        Self::with_identity(host, ClientIdentity::absent())
    }

    pub fn with_identity(host: H, identity: ClientIdentity) -> Self {
        Self { host, identity }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    pub fn is_active(&self) -> bool {
        self.host.is_active()
    }

    pub fn id(&self) -> Option<&str> {
        self.host.id()
    }

    pub fn name(&self) -> Option<&str> {
        self.host.name()
    }

    /// Start a session under `name` and validate it.
    ///
    /// Idempotent: when a session is already active this is a no-op.
    pub fn start(&mut self, name: &str) -> Result<&mut Self, SessionError> {
        if self.host.is_active() {
            return Ok(self);
        }

        // 1. Validate input (pure)
        let name = validation::validate_session_name(name)?;

        info!(event = "session.start_started", name = %name);

        // 2. Activate the host session (I/O)
        self.host.start(&name)?;

        // 3. Check the session against the declaring client
        self.validate()?;

        info!(
            event = "session.start_completed",
            name = %name,
            session_id = ?self.host.id()
        );

        Ok(self)
    }

    /// Check the active session against the expected validation token.
    ///
    /// First use stores the token and rotates the identifier; the token is
    /// recorded before the new identifier is issued. A mismatch destroys
    /// the session before the error is returned.
    fn validate(&mut self) -> Result<(), SessionError> {
        let name = self.host.name().unwrap_or_default().to_string();
        let expected = token::derive(self.identity.as_str(), &name);

        match self.host.value(VALIDATION_TOKEN_KEY) {
            Some(stored) => {
                if stored.as_str() == Some(expected.as_str()) {
                    info!(event = "session.validated", name = %name);
                    Ok(())
                } else {
                    warn!(
                        event = "session.violation_detected",
                        name = %name,
                        message = "Validation token mismatch, destroying session"
                    );
                    self.destroy()?;
                    Err(SessionError::SessionViolated)
                }
            }
            None => {
                self.host
                    .insert(VALIDATION_TOKEN_KEY, Value::String(expected))?;
                self.host.regenerate_id(true)?;
                info!(
                    event = "session.token_issued",
                    name = %name,
                    session_id = ?self.host.id()
                );
                Ok(())
            }
        }
    }

    /// Rotate the session identifier, optionally discarding storage held
    /// under the old one.
    pub fn regenerate_id(&mut self, destroy_old: bool) -> Result<(), SessionError> {
        self.host.regenerate_id(destroy_old)?;
        Ok(())
    }

    /// Destroy the session: rotate the identifier away, clear the mapping
    /// and delete persisted storage.
    pub fn destroy(&mut self) -> Result<(), SessionError> {
        self.host.regenerate_id(true)?;
        self.host.clear()?;
        self.host.destroy()?;
        info!(event = "session.destroy_completed");
        Ok(())
    }

    /// The value stored under `key`, if present.
    pub fn get(&self, key: &str) -> Result<Option<Value>, SessionError> {
        validation::validate_key(key)?;
        Ok(self.host.value(key))
    }

    /// The value stored under `key`, or `default` when absent.
    pub fn get_or(&self, key: &str, default: Value) -> Result<Value, SessionError> {
        Ok(self.get(key)?.unwrap_or(default))
    }

    /// A snapshot of the whole session mapping, validation token included.
    pub fn all(&self) -> HashMap<String, Value> {
        self.host.values()
    }

    /// Insert or overwrite the value under `key`.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) -> Result<&mut Self, SessionError> {
        validation::validate_key(key)?;
        self.host.insert(key, value.into())?;
        Ok(self)
    }

    /// Remove `key` from the session; no-op when absent.
    pub fn delete(&mut self, key: &str) -> Result<&mut Self, SessionError> {
        validation::validate_key(key)?;
        self.host.remove(key)?;
        Ok(self)
    }

    /// Persist sessions as files under `path`, which must be an existing
    /// writable directory. Checked before the host is touched.
    pub fn store_in_files(&mut self, path: impl AsRef<Path>) -> Result<&mut Self, SessionError> {
        let path = path.as_ref();
        validation::validate_session_dir(path)?;

        self.host.configure_backend(StorageBackend::files(path))?;
        info!(
            event = "session.backend_configured",
            backend = "files",
            path = %path.display()
        );

        Ok(self)
    }

    /// Persist sessions to a remote cache server at `tcp://host:port`.
    pub fn store_in_remote(&mut self, host: &str, port: u16) -> Result<&mut Self, SessionError> {
        let backend = StorageBackend::remote(host, port);
        let endpoint = backend.save_path();

        self.host.configure_backend(backend)?;
        info!(
            event = "session.backend_configured",
            backend = "remote",
            endpoint = %endpoint
        );

        Ok(self)
    }

    /// Apply the backend selection from a loaded configuration.
    pub fn apply_config(&mut self, config: &SessioConfig) -> Result<&mut Self, SessionError> {
        match &config.backend {
            Some(StorageBackend::Files { path }) => {
                self.store_in_files(path)?;
            }
            Some(StorageBackend::Remote { host, port }) => {
                self.store_in_remote(host, *port)?;
            }
            None => {}
        }
        Ok(self)
    }
}
