//! Host session subsystem implementations.
//!
//! The guard never talks to storage directly; it drives a [`SessionHost`],
//! which owns the active session's identifier, name and value mapping.

pub mod errors;
pub mod files;
pub mod memory;
pub mod traits;
pub mod types;

pub use errors::HostError;
pub use files::FileHost;
pub use memory::MemoryHost;
pub use traits::SessionHost;
pub use types::{SessionRecord, StorageBackend};
