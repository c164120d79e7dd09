//! Host session subsystem trait definition.

use serde_json::Value;
use std::collections::HashMap;

use crate::host::errors::HostError;
use crate::host::types::StorageBackend;

/// Trait defining the interface to a host session subsystem.
///
/// A host owns one logical session at a time: its identifier, its name and
/// its string-keyed value mapping. All access is synchronous and blocking;
/// serializing concurrent use of one session is the host platform's concern,
/// not modeled here.
pub trait SessionHost {
    /// Activate a session under `name`. No-op when a session is already
    /// active. Hosts with persistent storage resume an existing record for
    /// this name instead of creating a fresh one.
    fn start(&mut self, name: &str) -> Result<(), HostError>;

    /// Whether a session is currently active.
    fn is_active(&self) -> bool;

    /// Name of the active session, if any.
    fn name(&self) -> Option<&str>;

    /// Identifier of the active session, if any.
    fn id(&self) -> Option<&str>;

    /// Rotate the session identifier. `destroy_old` discards persisted data
    /// associated with the previous identifier.
    fn regenerate_id(&mut self, destroy_old: bool) -> Result<(), HostError>;

    /// Get the value stored under `key`, if present.
    fn value(&self, key: &str) -> Option<Value>;

    /// A snapshot of the whole value mapping.
    fn values(&self) -> HashMap<String, Value>;

    /// Insert or overwrite the value under `key`.
    fn insert(&mut self, key: &str, value: Value) -> Result<(), HostError>;

    /// Remove `key` if present; no-op when absent.
    fn remove(&mut self, key: &str) -> Result<(), HostError>;

    /// Clear the whole value mapping.
    fn clear(&mut self) -> Result<(), HostError>;

    /// End the session and delete its persisted storage.
    fn destroy(&mut self) -> Result<(), HostError>;

    /// Select where this host persists session data.
    fn configure_backend(&mut self, backend: StorageBackend) -> Result<(), HostError>;

    /// The currently configured persistence target, if any.
    fn save_path(&self) -> Option<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal host that keeps everything in plain fields, exercising the
    /// trait surface (including trait-object use).
    struct NullHost {
        active: bool,
        name: Option<String>,
        values: HashMap<String, Value>,
        backend: Option<StorageBackend>,
    }

    impl NullHost {
        fn new() -> Self {
            Self {
                active: false,
                name: None,
                values: HashMap::new(),
                backend: None,
            }
        }
    }

    impl SessionHost for NullHost {
        fn start(&mut self, name: &str) -> Result<(), HostError> {
            self.active = true;
            self.name = Some(name.to_string());
            Ok(())
        }

        fn is_active(&self) -> bool {
            self.active
        }

        fn name(&self) -> Option<&str> {
            self.name.as_deref()
        }

        fn id(&self) -> Option<&str> {
            self.active.then_some("null")
        }

        fn regenerate_id(&mut self, _destroy_old: bool) -> Result<(), HostError> {
            Ok(())
        }

        fn value(&self, key: &str) -> Option<Value> {
            self.values.get(key).cloned()
        }

        fn values(&self) -> HashMap<String, Value> {
            self.values.clone()
        }

        fn insert(&mut self, key: &str, value: Value) -> Result<(), HostError> {
            self.values.insert(key.to_string(), value);
            Ok(())
        }

        fn remove(&mut self, key: &str) -> Result<(), HostError> {
            self.values.remove(key);
            Ok(())
        }

        fn clear(&mut self) -> Result<(), HostError> {
            self.values.clear();
            Ok(())
        }

        fn destroy(&mut self) -> Result<(), HostError> {
            self.values.clear();
            self.active = false;
            Ok(())
        }

        fn configure_backend(&mut self, backend: StorageBackend) -> Result<(), HostError> {
            self.backend = Some(backend);
            Ok(())
        }

        fn save_path(&self) -> Option<String> {
            self.backend.as_ref().map(|b| b.save_path())
        }
    }

    #[test]
    fn test_trait_object_usage() {
        let mut host: Box<dyn SessionHost> = Box::new(NullHost::new());
        assert!(!host.is_active());

        host.start("test").unwrap();
        assert!(host.is_active());
        assert_eq!(host.name(), Some("test"));

        host.insert("a", Value::from(1)).unwrap();
        assert_eq!(host.value("a"), Some(Value::from(1)));

        host.destroy().unwrap();
        assert!(!host.is_active());
        assert!(host.values().is_empty());
    }

    #[test]
    fn test_save_path_reflects_backend() {
        let mut host = NullHost::new();
        assert_eq!(host.save_path(), None);

        host.configure_backend(StorageBackend::remote("localhost", 11211))
            .unwrap();
        assert_eq!(host.save_path(), Some("tcp://localhost:11211".to_string()));
    }
}
