//! In-memory host implementation.

use serde_json::Value;
use std::collections::HashMap;
use uuid::Uuid;

use crate::host::errors::HostError;
use crate::host::traits::SessionHost;
use crate::host::types::StorageBackend;

/// A host that keeps the session entirely in memory.
///
/// Nothing outlives the value: this host is the reference implementation for
/// embedding and tests. A configured backend is recorded and reported via
/// [`SessionHost::save_path`] but does not change where data lives.
#[derive(Debug, Default)]
pub struct MemoryHost {
    active: bool,
    id: Option<String>,
    name: Option<String>,
    started_at: Option<String>,
    values: HashMap<String, Value>,
    backend: Option<StorageBackend>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// A host pre-seeded with a value mapping, as a host platform would be
    /// after reloading a previously persisted session.
    pub fn with_values(values: HashMap<String, Value>) -> Self {
        Self {
            values,
            ..Self::default()
        }
    }

    /// When the active session started, RFC 3339.
    pub fn started_at(&self) -> Option<&str> {
        self.started_at.as_deref()
    }
}

impl SessionHost for MemoryHost {
    fn start(&mut self, name: &str) -> Result<(), HostError> {
        if self.active {
            return Ok(());
        }
        self.name = Some(name.to_string());
        if self.id.is_none() {
            self.id = Some(Uuid::new_v4().to_string());
        }
        self.started_at = Some(chrono::Utc::now().to_rfc3339());
        self.active = true;
        Ok(())
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn regenerate_id(&mut self, _destroy_old: bool) -> Result<(), HostError> {
        if !self.active {
            return Ok(());
        }
        // No persisted storage exists for the old identifier, so the
        // destroy_old flag has nothing to discard here.
        self.id = Some(Uuid::new_v4().to_string());
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
        self.id = None;
        self.started_at = None;
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

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_start_assigns_id_and_name() {
        let mut host = MemoryHost::new();
        assert!(!host.is_active());
        assert_eq!(host.id(), None);

        host.start("checkout").unwrap();
        assert!(host.is_active());
        assert_eq!(host.name(), Some("checkout"));
        assert!(host.id().is_some());
        assert!(host.started_at().is_some());
    }

    #[test]
    fn test_start_is_idempotent() {
        let mut host = MemoryHost::new();
        host.start("first").unwrap();
        let id = host.id().unwrap().to_string();

        host.start("second").unwrap();
        assert_eq!(host.name(), Some("first"));
        assert_eq!(host.id(), Some(id.as_str()));
    }

    #[test]
    fn test_regenerate_id_changes_identifier() {
        let mut host = MemoryHost::new();
        host.start("checkout").unwrap();
        let before = host.id().unwrap().to_string();

        host.regenerate_id(true).unwrap();
        let after = host.id().unwrap().to_string();
        assert_ne!(before, after);
    }

    #[test]
    fn test_regenerate_id_noop_when_inactive() {
        let mut host = MemoryHost::new();
        host.regenerate_id(true).unwrap();
        assert_eq!(host.id(), None);
    }

    #[test]
    fn test_value_mapping() {
        let mut host = MemoryHost::new();
        host.insert("a", json!(1)).unwrap();
        host.insert("b", json!("two")).unwrap();

        assert_eq!(host.value("a"), Some(json!(1)));
        assert_eq!(host.value("missing"), None);
        assert_eq!(host.values().len(), 2);

        host.remove("a").unwrap();
        assert_eq!(host.value("a"), None);

        // Removing an absent key is a no-op
        host.remove("a").unwrap();

        host.clear().unwrap();
        assert!(host.values().is_empty());
    }

    #[test]
    fn test_destroy_clears_everything() {
        let mut host = MemoryHost::new();
        host.start("checkout").unwrap();
        host.insert("a", json!(1)).unwrap();

        host.destroy().unwrap();
        assert!(!host.is_active());
        assert_eq!(host.id(), None);
        assert!(host.values().is_empty());
        // The configured name survives destruction
        assert_eq!(host.name(), Some("checkout"));
    }

    #[test]
    fn test_with_values_preserves_mapping_across_start() {
        let mut values = HashMap::new();
        values.insert("cart".to_string(), json!(["a"]));

        let mut host = MemoryHost::with_values(values);
        host.start("checkout").unwrap();
        assert_eq!(host.value("cart"), Some(json!(["a"])));
    }

    #[test]
    fn test_backend_configuration() {
        let mut host = MemoryHost::new();
        assert_eq!(host.save_path(), None);

        host.configure_backend(StorageBackend::remote("localhost", 11211))
            .unwrap();
        assert_eq!(host.save_path(), Some("tcp://localhost:11211".to_string()));

        host.configure_backend(StorageBackend::files("/tmp")).unwrap();
        assert_eq!(host.save_path(), Some("/tmp".to_string()));
    }
}
