//! Opening partition databases

use crate::config::StorageConfig;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use std::path::PathBuf;
use std::time::Duration;

/// Open the database backing `partition`.
///
/// In-memory partitions hold exactly one connection for their whole life;
/// a second pooled connection would see a different, empty database.
pub async fn open_partition_db(
    storage: &StorageConfig,
    partition: &str,
) -> Result<DatabaseConnection, DbErr> {
    let mut options = match storage {
        StorageConfig::Memory => {
            let mut options = ConnectOptions::new("sqlite::memory:");
            options
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(Duration::from_secs(u32::MAX as u64))
                .max_lifetime(Duration::from_secs(u32::MAX as u64));
            options
        }
        StorageConfig::Sqlite { data_dir } => {
            std::fs::create_dir_all(data_dir).map_err(|e| {
                DbErr::Custom(format!(
                    "cannot create data dir {}: {}",
                    data_dir.display(),
                    e
                ))
            })?;
            let mut options = ConnectOptions::new(sqlite_url(partition_path(data_dir, partition)));
            options.max_connections(1).min_connections(1);
            options
        }
    };
    options.sqlx_logging(false);

    Database::connect(options).await
}

/// File holding a partition's tables
pub fn partition_path(data_dir: &std::path::Path, partition: &str) -> PathBuf {
    data_dir.join(format!("{}.db", partition))
}

fn sqlite_url(path: PathBuf) -> String {
    format!("sqlite://{}?mode=rwc", path.display())
}
