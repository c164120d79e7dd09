use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Where a host persists session data.
///
/// This is configuration only; the persistence format and any wire protocol
/// belong to the host implementation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum StorageBackend {
    /// Session records stored as files under a directory.
    Files { path: PathBuf },
    /// Session records stored in a remote cache server.
    Remote {
        #[serde(default = "default_remote_host")]
        host: String,
        #[serde(default = "default_remote_port")]
        port: u16,
    },
}

fn default_remote_host() -> String {
    "localhost".to_string()
}

fn default_remote_port() -> u16 {
    11211
}

impl StorageBackend {
    pub fn files(path: impl AsRef<Path>) -> Self {
        StorageBackend::Files {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn remote(host: impl Into<String>, port: u16) -> Self {
        StorageBackend::Remote {
            host: host.into(),
            port,
        }
    }

    /// The save path a host reports for this backend: the directory for
    /// file storage, `tcp://host:port` for a remote cache.
    pub fn save_path(&self) -> String {
        match self {
            StorageBackend::Files { path } => path.display().to_string(),
            StorageBackend::Remote { host, port } => format!("tcp://{}:{}", host, port),
        }
    }
}

/// Persisted representation of a session, as written by file-backed hosts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub id: String,
    pub name: String,
    pub created_at: String,
    #[serde(default)]
    pub values: HashMap<String, Value>,
}
