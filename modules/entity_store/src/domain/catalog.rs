//! Application catalog business rules

use super::clock::{micros, MonotonicClock};
use super::operation::Outcome;
use super::repository::CatalogRepository;
use super::storage_failure;
use crate::contract::{
    App, AppDataRecord, AppExecution, AppPatch, ExecutionStatus, NewApp, StoreError,
};
use std::sync::Arc;

/// Catalog operations for one partition
pub struct CatalogStore {
    repo: Arc<dyn CatalogRepository>,
    clock: Arc<MonotonicClock>,
}

impl CatalogStore {
    pub fn new(repo: Arc<dyn CatalogRepository>, clock: Arc<MonotonicClock>) -> Self {
        Self { repo, clock }
    }

    // ===== Apps =====

    /// Create an app; the id is caller-supplied and must be unused
    pub async fn create_app(&self, app: NewApp) -> Result<Outcome, StoreError> {
        require_non_empty("id", &app.id)?;
        if app.id.contains('/') {
            return Err(StoreError::invalid("id must not contain '/'"));
        }
        require_non_empty("name", &app.name)?;
        require_non_empty("created_by", &app.created_by)?;
        require_non_empty("prompt", &app.prompt)?;

        if self.find_app(&app.id).await?.is_some() {
            return Err(StoreError::conflict(format!(
                "app '{}' already exists",
                app.id
            )));
        }

        self.repo
            .insert_app(&app, self.clock.now())
            .await
            .map_err(storage_failure("insert app"))?;

        tracing::debug!(app_id = %app.id, owner = %app.created_by, "App created");
        Ok(Outcome::AppCreated { id: app.id })
    }

    pub async fn get_app(&self, id: &str) -> Result<Outcome, StoreError> {
        self.find_app(id)
            .await?
            .map(Outcome::App)
            .ok_or_else(|| StoreError::not_found("app", id))
    }

    /// Apps owned by `owner_id`, newest first
    pub async fn list_apps(&self, owner_id: &str) -> Result<Outcome, StoreError> {
        require_non_empty("owner id", owner_id)?;

        self.repo
            .list_apps_by_owner(owner_id)
            .await
            .map(Outcome::Apps)
            .map_err(storage_failure("list apps"))
    }

    /// Apply a partial update; `updated_at` is refreshed even for an empty patch
    pub async fn update_app(&self, id: &str, patch: AppPatch) -> Result<Outcome, StoreError> {
        if let Some(name) = &patch.name {
            require_non_empty("name", name)?;
        }
        if let Some(prompt) = &patch.prompt {
            require_non_empty("prompt", prompt)?;
        }

        self.repo
            .update_app(id, &patch, self.clock.now())
            .await
            .map_err(storage_failure("update app"))?
            .map(Outcome::App)
            .ok_or_else(|| StoreError::not_found("app", id))
    }

    /// Remove an app with its data records and executions; absent ids are not an error
    pub async fn delete_app(&self, id: &str) -> Result<Outcome, StoreError> {
        let existed = self
            .repo
            .delete_app_cascade(id)
            .await
            .map_err(storage_failure("delete app"))?;

        tracing::debug!(app_id = %id, existed, "App deleted");
        Ok(Outcome::AppDeleted {
            id: id.to_string(),
            existed,
        })
    }

    // ===== Data records =====

    pub async fn save_app_data(
        &self,
        app_id: &str,
        data_type: &str,
        content: String,
    ) -> Result<Outcome, StoreError> {
        require_non_empty("dataType", data_type)?;
        self.require_app(app_id).await?;

        let created_at = self.clock.now();
        let record = AppDataRecord {
            id: format!("{}-{}-{}", app_id, data_type, micros(created_at)),
            app_id: app_id.to_string(),
            data_type: data_type.to_string(),
            content,
            created_at,
        };

        self.repo
            .insert_data(&record)
            .await
            .map_err(storage_failure("insert app data"))?;

        Ok(Outcome::DataSaved { id: record.id })
    }

    pub async fn list_app_data(
        &self,
        app_id: &str,
        data_type: Option<&str>,
    ) -> Result<Outcome, StoreError> {
        self.repo
            .list_data(app_id, data_type)
            .await
            .map(Outcome::AppData)
            .map_err(storage_failure("list app data"))
    }

    // ===== Executions =====

    pub async fn record_execution(
        &self,
        app_id: &str,
        result: String,
        time_ms: i64,
        status: ExecutionStatus,
    ) -> Result<Outcome, StoreError> {
        let execution_time = u64::try_from(time_ms).map_err(|_| {
            StoreError::invalid(format!(
                "executionTime must be a non-negative integer (got {})",
                time_ms
            ))
        })?;
        self.require_app(app_id).await?;

        let created_at = self.clock.now();
        let execution = AppExecution {
            id: format!("exec-{}-{}", app_id, micros(created_at)),
            app_id: app_id.to_string(),
            execution_result: result,
            execution_time,
            status,
            created_at,
        };

        self.repo
            .insert_execution(&execution)
            .await
            .map_err(storage_failure("insert execution"))?;

        Ok(Outcome::ExecutionRecorded { id: execution.id })
    }

    /// At most `limit` executions, newest first
    pub async fn list_executions(&self, app_id: &str, limit: u64) -> Result<Outcome, StoreError> {
        if limit == 0 {
            return Err(StoreError::invalid("limit must be a positive integer"));
        }

        self.repo
            .list_executions(app_id, limit)
            .await
            .map(Outcome::Executions)
            .map_err(storage_failure("list executions"))
    }

    // ===== Helpers =====

    async fn find_app(&self, id: &str) -> Result<Option<App>, StoreError> {
        self.repo
            .find_app(id)
            .await
            .map_err(storage_failure("find app"))
    }

    async fn require_app(&self, app_id: &str) -> Result<(), StoreError> {
        match self.find_app(app_id).await? {
            Some(_) => Ok(()),
            None => Err(StoreError::not_found("app", app_id)),
        }
    }
}

fn require_non_empty(field: &str, value: &str) -> Result<(), StoreError> {
    if value.trim().is_empty() {
        return Err(StoreError::invalid(format!("{} must not be empty", field)));
    }
    Ok(())
}
