//! Module declaration and lifecycle

use crate::api::dispatch::Dispatcher;
use crate::api::native::NativeClient;
use crate::config::Config;
use crate::contract::StoreClient;
use crate::domain::{Operation, PartitionDirectory};
use anyhow::{Context, Result};
use axum::Router;
use std::sync::Arc;

/// Entity store module: partition directory, dispatcher and client wiring
pub struct EntityStoreModule {
    config: Config,
    dispatcher: Dispatcher,
}

impl EntityStoreModule {
    /// Build the module. Partitions start lazily on first reference.
    pub fn new(config: Config) -> Self {
        let directory = Arc::new(PartitionDirectory::new(config.clone()));
        let dispatcher = Dispatcher::new(directory);

        Self { config, dispatcher }
    }

    /// Eagerly materialize the default partition when `eager_init` is set
    pub async fn init(&self) -> Result<()> {
        if !self.config.eager_init {
            tracing::info!(
                default_partition = %self.config.default_partition,
                "Entity store ready (lazy partition initialization)"
            );
            return Ok(());
        }

        let partition = self
            .directory()
            .resolve_default()
            .context("invalid default partition")?;
        partition
            .submit(Operation::Initialize)
            .await
            .with_context(|| format!("failed to initialize partition '{}'", partition.name()))?;

        tracing::info!(
            default_partition = %partition.name(),
            family = %partition.family(),
            "Entity store initialized"
        );
        Ok(())
    }

    pub fn dispatcher(&self) -> Dispatcher {
        self.dispatcher.clone()
    }

    pub fn directory(&self) -> Arc<PartitionDirectory> {
        self.dispatcher.directory().clone()
    }

    /// Typed client for in-process callers
    pub fn client(&self) -> Arc<dyn StoreClient> {
        Arc::new(NativeClient::new(self.dispatcher.clone()))
    }

    /// Mount the REST routes onto `router`
    pub fn register_rest(&self, router: Router) -> Router {
        crate::api::rest::register_routes(router, self.dispatcher.clone())
    }
}
