//! Schema management for partition databases
//!
//! Each schema family has its own migrator. Tables and indexes are created
//! with `IF NOT EXISTS` and nothing here ever drops or alters an existing
//! table, so [`ensure_schema`] can run on every cold start.

use crate::config::SchemaFamily;
use sea_orm::DatabaseConnection;
use sea_orm_migration::prelude::*;

mod m20250301_000001_create_prompt_apps;
mod m20250301_000002_create_app_data;
mod m20250301_000003_create_app_executions;
mod m20250301_000101_create_users;
mod m20250301_000102_create_products;
mod m20250301_000103_create_orders;

/// Materialize every table of `family`; a no-op once applied.
///
/// Engine errors are returned verbatim.
pub async fn ensure_schema(db: &DatabaseConnection, family: SchemaFamily) -> Result<(), DbErr> {
    match family {
        SchemaFamily::AppCatalog => AppCatalogMigrator::up(db, None).await,
        SchemaFamily::Commerce => CommerceMigrator::up(db, None).await,
    }
}

/// Check whether a table exists in the partition database
pub async fn has_table(db: &DatabaseConnection, table: &str) -> Result<bool, DbErr> {
    SchemaManager::new(db).has_table(table).await
}

/// Tables owned by a family, in creation order
pub fn tables_of(family: SchemaFamily) -> &'static [&'static str] {
    match family {
        SchemaFamily::AppCatalog => &["prompt_apps", "app_data", "app_executions"],
        SchemaFamily::Commerce => &["users", "products", "orders"],
    }
}

pub struct AppCatalogMigrator;

#[async_trait::async_trait]
impl MigratorTrait for AppCatalogMigrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_prompt_apps::Migration),
            Box::new(m20250301_000002_create_app_data::Migration),
            Box::new(m20250301_000003_create_app_executions::Migration),
        ]
    }
}

pub struct CommerceMigrator;

#[async_trait::async_trait]
impl MigratorTrait for CommerceMigrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000101_create_users::Migration),
            Box::new(m20250301_000102_create_products::Migration),
            Box::new(m20250301_000103_create_orders::Migration),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn migration_names_are_unique() {
        let names: Vec<String> = AppCatalogMigrator::migrations()
            .into_iter()
            .chain(CommerceMigrator::migrations())
            .map(|m| m.name().to_string())
            .collect();

        let unique: HashSet<&String> = names.iter().collect();
        assert_eq!(unique.len(), names.len(), "duplicate names in {names:?}");
        assert!(names.contains(&"m20250301_000001_create_prompt_apps".to_string()));
    }
}
