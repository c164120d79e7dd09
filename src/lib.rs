//! sessio: fixation-safe session management over pluggable host backends.
//!
//! This library wraps a host session subsystem behind the [`SessionHost`]
//! trait and layers a [`SessionGuard`] on top of it. The guard starts
//! sessions, binds them to the declaring client via a derived validation
//! token, rotates identifiers, and exposes the keyed value mapping. A token
//! mismatch on a later start destroys the session before the error is
//! surfaced.
//!
//! # Main Entry Points
//!
//! - [`sessions`] - Start, validate, read/write and destroy sessions
//! - [`host`] - Host subsystem trait plus in-memory and file-backed hosts
//! - [`core`] - Configuration, logging and the base error trait

pub mod core;
pub mod host;
pub mod sessions;

// Re-export commonly used types at crate root for convenience
pub use crate::core::config::{Config, SessioConfig, SessionSettings};
pub use crate::core::errors::{SessioError, SessioResult};
pub use crate::core::logging::init_logging;
pub use crate::host::errors::HostError;
pub use crate::host::files::FileHost;
pub use crate::host::memory::MemoryHost;
pub use crate::host::traits::SessionHost;
pub use crate::host::types::{SessionRecord, StorageBackend};
pub use crate::sessions::errors::SessionError;
pub use crate::sessions::guard::SessionGuard;
pub use crate::sessions::types::{ClientIdentity, VALIDATION_TOKEN_KEY};
