//! Domain layer - business rules, serialization gate and partition directory

pub mod catalog;
pub mod clock;
pub mod commerce;
pub mod directory;
pub mod gate;
pub mod operation;
pub mod repository;
pub mod store;

pub use directory::PartitionDirectory;
pub use gate::PartitionHandle;
pub use operation::{Operation, Outcome, DEFAULT_EXECUTION_LIMIT};
pub use repository::{CatalogRepository, CommerceRepository};
pub use store::EntityStore;

use crate::contract::StoreError;

/// Log a repository failure and hide its details from the caller
pub(crate) fn storage_failure(action: &'static str) -> impl FnOnce(anyhow::Error) -> StoreError {
    move |e| {
        tracing::error!(error = ?e, "Storage failure during {}", action);
        StoreError::internal(format!("storage failure during {}", action))
    }
}
