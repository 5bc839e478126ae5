//! Request dispatcher
//!
//! Decodes opaque requests into operations, runs them through the target
//! partition's gate and wraps the result in an [`Envelope`]. Failures never
//! escape as anything other than a failed envelope.

pub mod dto;
pub mod envelope;
pub mod mapper;
pub mod request;
pub mod routes;

pub use envelope::{Envelope, ErrorBody};
pub use request::{Request, Verb};

use crate::contract::StoreError;
use crate::domain::directory::validate_partition_name;
use crate::domain::{Operation, Outcome, PartitionDirectory};
use std::sync::Arc;

#[derive(Clone)]
pub struct Dispatcher {
    directory: Arc<PartitionDirectory>,
}

impl Dispatcher {
    pub fn new(directory: Arc<PartitionDirectory>) -> Self {
        Self { directory }
    }

    pub fn directory(&self) -> &Arc<PartitionDirectory> {
        &self.directory
    }

    /// Handle a request against the named partition
    pub async fn dispatch(&self, partition: &str, request: Request) -> Envelope {
        tracing::debug!(
            partition = %partition,
            verb = %request.verb,
            path = %request.path(),
            "Dispatching request"
        );

        let result = self.handle(partition, &request).await;
        if let Err(e) = &result {
            tracing::warn!(
                partition = %partition,
                verb = %request.verb,
                path = %request.path(),
                kind = %e.kind(),
                "Request rejected: {}",
                e
            );
        }
        result.into()
    }

    /// Handle a request against the default partition
    pub async fn dispatch_default(&self, request: Request) -> Envelope {
        let partition = self.directory.default_partition().to_string();
        self.dispatch(&partition, request).await
    }

    /// Run an already-decoded operation on a partition
    pub async fn execute(&self, partition: &str, operation: Operation) -> Result<Outcome, StoreError> {
        let handle = self.directory.resolve(partition)?;

        if let Some(family) = operation.family() {
            if family != handle.family() {
                return Err(StoreError::RouteNotFound {
                    verb: operation.name().to_string(),
                    path: format!("{} partition '{}'", handle.family(), partition),
                });
            }
        }

        handle.submit(operation).await
    }

    async fn handle(
        &self,
        partition: &str,
        request: &Request,
    ) -> Result<serde_json::Value, StoreError> {
        validate_partition_name(partition)?;
        let operation = routes::decode(request)?;

        // Routes of the other schema family do not exist on this partition
        if let Some(family) = operation.family() {
            if family != self.directory.family_of(partition) {
                return Err(StoreError::RouteNotFound {
                    verb: request.verb.to_string(),
                    path: request.path(),
                });
            }
        }

        let outcome = self.execute(partition, operation).await?;
        mapper::outcome_to_json(outcome)
    }
}
