//! File-backed host implementation.
//!
//! Persists the active session as a JSON record on disk with atomic
//! temp-file-and-rename writes, and resumes the record on the next start.

use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::core::config::Config;
use crate::host::errors::HostError;
use crate::host::traits::SessionHost;
use crate::host::types::{SessionRecord, StorageBackend};

/// A host that persists session records as files under a directory.
///
/// Records are keyed by session name: `start(name)` resumes an existing
/// record for that name, and rotating the identifier rewrites the record in
/// place, so data persisted under a previous identifier never survives
/// rotation. Selecting a remote backend suspends file mirroring; the
/// endpoint is recorded as the save path only.
#[derive(Debug)]
pub struct FileHost {
    dir: PathBuf,
    mirror: bool,
    active: bool,
    id: Option<String>,
    name: Option<String>,
    created_at: Option<String>,
    values: HashMap<String, Value>,
    backend: Option<StorageBackend>,
}

impl FileHost {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            mirror: true,
            active: false,
            id: None,
            name: None,
            created_at: None,
            values: HashMap::new(),
            backend: None,
        }
    }

    /// A host writing under the default data directory (`~/.sessio/sessions`).
    pub fn with_default_dir() -> Self {
        Self::new(Config::new().sessions_dir())
    }

    fn session_file(dir: &Path, name: &str) -> PathBuf {
        dir.join(format!("{}.json", name.replace('/', "_")))
    }

    fn load_record(dir: &Path, name: &str) -> Result<Option<SessionRecord>, HostError> {
        let file = Self::session_file(dir, name);
        let content = match fs::read_to_string(&file) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str::<SessionRecord>(&content) {
            Ok(record) => Ok(Some(record)),
            Err(e) => {
                tracing::warn!(
                    event = "host.record_invalid_json",
                    file = %file.display(),
                    error = %e,
                    message = "Failed to parse session record, starting fresh"
                );
                Ok(None)
            }
        }
    }

    fn flush(&self) -> Result<(), HostError> {
        if !self.active || !self.mirror {
            return Ok(());
        }
        let Some(name) = self.name.as_deref() else {
            return Ok(());
        };

        fs::create_dir_all(&self.dir)?;

        let record = SessionRecord {
            id: self.id.clone().unwrap_or_default(),
            name: name.to_string(),
            created_at: self.created_at.clone().unwrap_or_default(),
            values: self.values.clone(),
        };
        let json = serde_json::to_string_pretty(&record)?;

        let file = Self::session_file(&self.dir, name);
        let temp_file = file.with_extension("json.tmp");

        if let Err(e) = fs::write(&temp_file, &json) {
            cleanup_temp_file(&temp_file, &e);
            return Err(e.into());
        }
        if let Err(e) = fs::rename(&temp_file, &file) {
            cleanup_temp_file(&temp_file, &e);
            return Err(e.into());
        }

        Ok(())
    }

    fn remove_record(&self) -> Result<(), HostError> {
        let Some(name) = self.name.as_deref() else {
            return Ok(());
        };
        let file = Self::session_file(&self.dir, name);

        if file.exists() {
            fs::remove_file(&file)?;
        } else if self.active {
            tracing::warn!(
                event = "host.remove_nonexistent_record",
                file = %file.display(),
                message = "Attempted to remove session record that doesn't exist - possible state inconsistency"
            );
        }

        Ok(())
    }
}

fn cleanup_temp_file(temp_file: &Path, original_error: &std::io::Error) {
    if let Err(cleanup_err) = fs::remove_file(temp_file) {
        tracing::warn!(
            event = "host.temp_file_cleanup_failed",
            temp_file = %temp_file.display(),
            original_error = %original_error,
            cleanup_error = %cleanup_err,
            message = "Failed to clean up temp file after write error"
        );
    }
}

impl SessionHost for FileHost {
    fn start(&mut self, name: &str) -> Result<(), HostError> {
        if self.active {
            return Ok(());
        }

        match Self::load_record(&self.dir, name)? {
            Some(record) => {
                tracing::info!(
                    event = "host.session_resumed",
                    name = name,
                    session_id = %record.id
                );
                self.id = Some(record.id);
                self.created_at = Some(record.created_at);
                self.values = record.values;
            }
            None => {
                self.id = Some(Uuid::new_v4().to_string());
                self.created_at = Some(chrono::Utc::now().to_rfc3339());
                self.values = HashMap::new();
            }
        }
        self.name = Some(name.to_string());
        self.active = true;
        self.flush()
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
        // The record is keyed by session name, so rewriting it with the new
        // identifier already discards everything stored under the old one.
        self.id = Some(Uuid::new_v4().to_string());
        self.flush()
    }

    fn value(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }

    fn values(&self) -> HashMap<String, Value> {
        self.values.clone()
    }

    fn insert(&mut self, key: &str, value: Value) -> Result<(), HostError> {
        self.values.insert(key.to_string(), value);
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<(), HostError> {
        self.values.remove(key);
        self.flush()
    }

    fn clear(&mut self) -> Result<(), HostError> {
        self.values.clear();
        self.flush()
    }

    fn destroy(&mut self) -> Result<(), HostError> {
        if self.mirror {
            self.remove_record()?;
        }
        self.values.clear();
        self.active = false;
        self.id = None;
        self.created_at = None;
        Ok(())
    }

    fn configure_backend(&mut self, backend: StorageBackend) -> Result<(), HostError> {
        match backend {
            StorageBackend::Files { path } => {
                // Migrate an active record to the new directory
                if self.active && self.mirror && self.dir != path {
                    self.remove_record()?;
                }
                self.dir = path.clone();
                self.mirror = true;
                self.backend = Some(StorageBackend::Files { path });
                self.flush()?;
            }
            StorageBackend::Remote { host, port } => {
                self.mirror = false;
                self.backend = Some(StorageBackend::Remote { host, port });
            }
        }
        Ok(())
    }

    fn save_path(&self) -> Option<String> {
        match &self.backend {
            Some(backend) => Some(backend.save_path()),
            None => Some(self.dir.display().to_string()),
        }
    }
}
