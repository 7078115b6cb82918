//! Key-value persistence
//!
//! Every store serializes its whole state to a JSON blob under a fixed
//! key. Backends implement [`KeyValueStore`]; mutations flow through the
//! background [`Persister`] so callers never block on I/O, and each
//! enqueued write hands back a [`SaveTicket`] that can be awaited when
//! durability matters.

mod file;
mod memory;
mod writer;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use writer::{PersistHandle, Persister, SaveTicket};

#[cfg(test)]
pub(crate) use writer::WriteJob;

use async_trait::async_trait;
use thiserror::Error;

/// Errors from the persistence layer
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Background writer has shut down")]
    WriterGone,
}

/// Whole-blob key-value storage.
///
/// `get` of a missing key is `Ok(None)` and `remove` of a missing key
/// succeeds; only real backend failures surface as errors.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the blob stored under `key`
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the blob stored under `key`
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete the blob stored under `key`
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}
