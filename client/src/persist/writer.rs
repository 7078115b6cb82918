//! Background snapshot writer
//!
//! Store mutations enqueue their serialized snapshot here instead of
//! writing inline. A single task applies writes in submission order, so
//! the last snapshot enqueued for a key is the last one on disk. Each
//! enqueue returns a [`SaveTicket`]: dropping it keeps the old
//! fire-and-forget behavior, awaiting it observes durability and any
//! write failure.

use super::{KeyValueStore, StorageError};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

#[derive(Debug)]
pub(crate) enum WriteOp {
    Put(String),
    Delete,
}

#[derive(Debug)]
pub(crate) struct WriteJob {
    pub(crate) key: String,
    pub(crate) op: WriteOp,
    pub(crate) done: oneshot::Sender<Result<(), StorageError>>,
}

/// Completion handle for one enqueued snapshot write
#[derive(Debug)]
pub struct SaveTicket {
    rx: oneshot::Receiver<Result<(), StorageError>>,
}

impl SaveTicket {
    /// Wait until the writer has applied this write
    pub async fn wait(self) -> Result<(), StorageError> {
        match self.rx.await {
            Ok(result) => result,
            Err(_) => Err(StorageError::WriterGone),
        }
    }

    pub(crate) fn failed(err: StorageError) -> Self {
        let (tx, rx) = oneshot::channel();
        let _ = tx.send(Err(err));
        Self { rx }
    }
}

/// Cloneable producer side of the writer queue
#[derive(Debug, Clone)]
pub struct PersistHandle {
    tx: mpsc::UnboundedSender<WriteJob>,
}

impl PersistHandle {
    /// Enqueue a blob write for `key`
    pub fn put(&self, key: impl Into<String>, payload: String) -> SaveTicket {
        self.submit(key.into(), WriteOp::Put(payload))
    }

    /// Enqueue a blob deletion for `key`
    pub fn delete(&self, key: impl Into<String>) -> SaveTicket {
        self.submit(key.into(), WriteOp::Delete)
    }

    fn submit(&self, key: String, op: WriteOp) -> SaveTicket {
        let (done, rx) = oneshot::channel();
        if let Err(err) = self.tx.send(WriteJob { key, op, done }) {
            let job = err.0;
            warn!(key = %job.key, "persister is gone, dropping write");
            let _ = job.done.send(Err(StorageError::WriterGone));
        }
        SaveTicket { rx }
    }

    /// A handle wired to nothing, for exercising store logic without a
    /// runtime. Keep the receiver alive or every ticket resolves to
    /// [`StorageError::WriterGone`].
    #[cfg(test)]
    pub(crate) fn detached() -> (Self, mpsc::UnboundedReceiver<WriteJob>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

/// The background writer task and its queue
#[derive(Debug)]
pub struct Persister {
    tx: mpsc::UnboundedSender<WriteJob>,
    task: JoinHandle<()>,
}

impl Persister {
    /// Spawn the writer task against a storage backend
    pub fn spawn(store: Arc<dyn KeyValueStore>) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<WriteJob>();
        let task = tokio::spawn(async move {
            while let Some(job) = rx.recv().await {
                let result = match &job.op {
                    WriteOp::Put(payload) => store.set(&job.key, payload).await,
                    WriteOp::Delete => store.remove(&job.key).await,
                };
                if let Err(err) = &result {
                    warn!(key = %job.key, error = %err, "snapshot write failed");
                }
                // Receiver may have dropped its ticket; that is fine.
                let _ = job.done.send(result);
            }
            debug!("persister queue drained, writer exiting");
        });
        Self { tx, task }
    }

    /// A producer handle for stores to enqueue writes through
    pub fn handle(&self) -> PersistHandle {
        PersistHandle {
            tx: self.tx.clone(),
        }
    }

    /// Close the queue and wait for pending writes to be applied.
    ///
    /// The writer keeps running until every [`PersistHandle`] clone is
    /// dropped too, so tear stores down before calling this.
    pub async fn shutdown(self) {
        drop(self.tx);
        if let Err(err) = self.task.await {
            warn!(error = %err, "persister task ended abnormally");
        }
    }
}
