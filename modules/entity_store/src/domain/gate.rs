//! Per-partition serialization gate
//!
//! Every partition is served by one worker task that owns the partition's
//! [`EntityStore`]. Callers submit operations through a bounded queue and
//! wait on a oneshot reply, so operations on a partition run one at a time
//! in arrival order while different partitions run in parallel.

use super::operation::{Operation, Outcome};
use super::store::EntityStore;
use crate::config::{SchemaFamily, StorageConfig};
use crate::contract::StoreError;
use futures::FutureExt;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};

type Reply = oneshot::Sender<Result<Outcome, StoreError>>;

struct Job {
    operation: Operation,
    reply: Reply,
}

/// Handle to a partition's worker; cheap to clone
#[derive(Clone)]
pub struct PartitionHandle {
    name: Arc<str>,
    family: SchemaFamily,
    queue: mpsc::Sender<Job>,
    ready: Arc<AtomicBool>,
}

impl PartitionHandle {
    /// Start the worker for a partition. The database is not opened until
    /// the first operation arrives.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn spawn(
        name: &str,
        family: SchemaFamily,
        storage: StorageConfig,
        queue_capacity: usize,
    ) -> Self {
        let (queue, jobs) = mpsc::channel(queue_capacity.max(1));
        let ready = Arc::new(AtomicBool::new(false));

        let worker = Worker {
            name: name.to_string(),
            family,
            storage,
            store: None,
            ready: ready.clone(),
        };
        tokio::spawn(worker.run(jobs));

        tracing::info!(partition = %name, family = %family, "Partition worker started");
        Self {
            name: Arc::from(name),
            family,
            queue,
            ready,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn family(&self) -> SchemaFamily {
        self.family
    }

    /// True once the schema has been materialized
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// Queue an operation and wait for its result.
    ///
    /// Waits for queue capacity when the partition is saturated. Dropping
    /// the returned future abandons the wait only; an admitted operation
    /// still runs to completion.
    pub async fn submit(&self, operation: Operation) -> Result<Outcome, StoreError> {
        let (reply, result) = oneshot::channel();

        self.queue
            .send(Job { operation, reply })
            .await
            .map_err(|_| {
                tracing::error!(partition = %self.name, "Partition worker is gone");
                StoreError::internal("partition worker unavailable")
            })?;

        result.await.map_err(|_| {
            tracing::error!(partition = %self.name, "Partition worker dropped a reply");
            StoreError::internal("partition worker unavailable")
        })?
    }
}

struct Worker {
    name: String,
    family: SchemaFamily,
    storage: StorageConfig,
    store: Option<EntityStore>,
    ready: Arc<AtomicBool>,
}

impl Worker {
    async fn run(mut self, mut jobs: mpsc::Receiver<Job>) {
        while let Some(Job { operation, reply }) = jobs.recv().await {
            let op_name = operation.name();
            let partition = self.name.clone();
            let result = match self.store().await {
                Ok(store) => guarded(&partition, op_name, store.execute(operation)).await,
                Err(e) => Err(e),
            };

            if let Err(e) = &result {
                tracing::debug!(partition = %self.name, op = op_name, error = %e, "Operation failed");
            }
            // The caller may have stopped waiting
            let _ = reply.send(result);
        }

        tracing::debug!(partition = %self.name, "Partition worker stopped");
    }

    /// The partition's store, opened on first use.
    ///
    /// A failed open leaves the partition uninitialized so the next
    /// operation retries.
    async fn store(&mut self) -> Result<&EntityStore, StoreError> {
        if self.store.is_none() {
            let store = EntityStore::connect(&self.storage, &self.name, self.family)
                .await
                .map_err(|e| {
                    tracing::error!(
                        partition = %self.name,
                        family = %self.family,
                        error = %e,
                        "Partition initialization failed"
                    );
                    StoreError::internal("partition initialization failed")
                })?;

            tracing::info!(partition = %self.name, family = %self.family, "Partition schema ready");
            self.ready.store(true, Ordering::Release);
            self.store = Some(store);
        }

        self.store
            .as_ref()
            .ok_or_else(|| StoreError::internal("partition store unavailable"))
    }
}

/// Run one operation, turning a panic into an `Internal` reply so the
/// worker keeps serving the partition.
async fn guarded<F>(partition: &str, op_name: &str, operation: F) -> Result<Outcome, StoreError>
where
    F: Future<Output = Result<Outcome, StoreError>>,
{
    AssertUnwindSafe(operation)
        .catch_unwind()
        .await
        .unwrap_or_else(|_| {
            tracing::error!(partition = %partition, op = op_name, "Operation panicked");
            Err(StoreError::internal("operation aborted"))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn overflowing() -> Result<Outcome, StoreError> {
        panic!("arithmetic overflow")
    }

    #[tokio::test]
    async fn panicking_operation_becomes_internal_error() {
        let result = guarded("global", "create_order", overflowing()).await;
        assert_eq!(result, Err(StoreError::internal("operation aborted")));

        let result = guarded("global", "list_users", async { Ok(Outcome::Users(vec![])) }).await;
        assert_eq!(result, Ok(Outcome::Users(vec![])));
    }
}
