//! The family-specific store owned by one partition

use super::catalog::CatalogStore;
use super::clock::MonotonicClock;
use super::commerce::CommerceStore;
use super::operation::{Operation, Outcome};
use crate::config::{SchemaFamily, StorageConfig};
use crate::contract::StoreError;
use crate::infra::storage::{
    ensure_schema, open_partition_db, SeaOrmCatalogRepository, SeaOrmCommerceRepository,
};
use sea_orm::{DatabaseConnection, DbErr};
use std::sync::Arc;

/// Entity store for one partition.
///
/// Holds the partition's only database handle. Methods assume serialized
/// access and must only be reached through the partition's gate.
pub struct EntityStore {
    family: SchemaFamily,
    db: Arc<DatabaseConnection>,
    tables: FamilyStore,
}

enum FamilyStore {
    Catalog(CatalogStore),
    Commerce(CommerceStore),
}

impl EntityStore {
    /// Open the partition database and materialize its schema
    pub async fn connect(
        storage: &StorageConfig,
        partition: &str,
        family: SchemaFamily,
    ) -> Result<Self, DbErr> {
        let db = open_partition_db(storage, partition).await?;
        Self::open(Arc::new(db), family).await
    }

    /// Wrap an open connection, materializing the schema first
    pub async fn open(db: Arc<DatabaseConnection>, family: SchemaFamily) -> Result<Self, DbErr> {
        ensure_schema(&db, family).await?;

        let clock = Arc::new(MonotonicClock::new());
        let tables = match family {
            SchemaFamily::AppCatalog => FamilyStore::Catalog(CatalogStore::new(
                Arc::new(SeaOrmCatalogRepository::new(db.clone())),
                clock,
            )),
            SchemaFamily::Commerce => FamilyStore::Commerce(CommerceStore::new(
                Arc::new(SeaOrmCommerceRepository::new(db.clone())),
                clock,
            )),
        };

        Ok(Self { family, db, tables })
    }

    pub fn family(&self) -> SchemaFamily {
        self.family
    }

    /// Execute one operation to completion
    ///
    /// Operations of another family are rejected as `RouteNotFound`.
    pub async fn execute(&self, operation: Operation) -> Result<Outcome, StoreError> {
        match (&self.tables, operation) {
            (_, Operation::Initialize) => {
                ensure_schema(&self.db, self.family).await.map_err(|e| {
                    tracing::error!(error = %e, family = %self.family, "Schema materialization failed");
                    StoreError::internal("schema materialization failed")
                })?;
                Ok(Outcome::Initialized {
                    family: self.family,
                })
            }

            (FamilyStore::Catalog(store), op) => match op {
                Operation::CreateApp(app) => store.create_app(app).await,
                Operation::GetApp { id } => store.get_app(&id).await,
                Operation::ListApps { owner_id } => store.list_apps(&owner_id).await,
                Operation::UpdateApp { id, patch } => store.update_app(&id, patch).await,
                Operation::DeleteApp { id } => store.delete_app(&id).await,
                Operation::SaveAppData {
                    app_id,
                    data_type,
                    content,
                } => store.save_app_data(&app_id, &data_type, content).await,
                Operation::ListAppData { app_id, data_type } => {
                    store.list_app_data(&app_id, data_type.as_deref()).await
                }
                Operation::RecordExecution {
                    app_id,
                    result,
                    time_ms,
                    status,
                } => store.record_execution(&app_id, result, time_ms, status).await,
                Operation::ListExecutions { app_id, limit } => {
                    store.list_executions(&app_id, limit).await
                }
                other => Err(unsupported(&other, self.family)),
            },

            (FamilyStore::Commerce(store), op) => match op {
                Operation::CreateUser(user) => store.create_user(user).await,
                Operation::GetUser { id } => store.get_user(id).await,
                Operation::ListUsers => store.list_users().await,
                Operation::CreateProduct(product) => store.create_product(product).await,
                Operation::GetProduct { id } => store.get_product(id).await,
                Operation::ListProducts => store.list_products().await,
                Operation::CreateOrder(order) => store.create_order(order).await,
                Operation::ListOrders { user_id } => store.list_orders(user_id).await,
                other => Err(unsupported(&other, self.family)),
            },
        }
    }
}

fn unsupported(operation: &Operation, family: SchemaFamily) -> StoreError {
    StoreError::RouteNotFound {
        verb: operation.name().to_string(),
        path: format!("{} partition", family),
    }
}
