//! Configuration for the entity store module

use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "ENTITY_STORE_";

/// Entity store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Where partition databases live
    #[serde(default)]
    pub storage: StorageConfig,

    /// Schema family used by partitions without an explicit override
    #[serde(default)]
    pub default_family: SchemaFamily,

    /// Per-partition schema family overrides
    #[serde(default)]
    pub partition_families: HashMap<String, SchemaFamily>,

    /// Partition used by the `/api/db` routes
    #[serde(default = "default_partition")]
    pub default_partition: String,

    /// Pending operations a partition queue holds before submitters wait
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,

    /// Materialize the default partition's schema at startup
    #[serde(default)]
    pub eager_init: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage: StorageConfig::default(),
            default_family: SchemaFamily::default(),
            partition_families: HashMap::new(),
            default_partition: default_partition(),
            queue_capacity: default_queue_capacity(),
            eager_init: false,
        }
    }
}

impl Config {
    /// Load configuration from defaults, an optional YAML file and the environment.
    ///
    /// Environment keys use [`ENV_PREFIX`] and `__` as the nesting separator,
    /// e.g. `ENTITY_STORE_STORAGE__DATA_DIR=/var/lib/store`.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        Ok(Self::figment(path).extract()?)
    }

    /// Layered configuration source, exposed so embedding binaries can nest it
    pub fn figment(path: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        if let Some(path) = path {
            figment = figment.merge(Yaml::file(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Schema family for a partition name
    pub fn family_for(&self, partition: &str) -> SchemaFamily {
        self.partition_families
            .get(partition)
            .copied()
            .unwrap_or(self.default_family)
    }
}

/// Storage backend for partition databases.
///
/// Layered sources are merged key by key, so `data_dir` may remain next to
/// `backend: memory`; it is ignored there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "snake_case")]
pub enum StorageConfig {
    /// One private in-memory SQLite database per partition
    Memory,
    /// One SQLite file per partition under `data_dir`
    Sqlite { data_dir: PathBuf },
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::Sqlite {
            data_dir: PathBuf::from("data"),
        }
    }
}

/// Table family a partition materializes and serves
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaFamily {
    /// Apps, app data records and executions
    #[default]
    AppCatalog,
    /// Users, products and orders
    Commerce,
}

impl SchemaFamily {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AppCatalog => "app_catalog",
            Self::Commerce => "commerce",
        }
    }
}

impl fmt::Display for SchemaFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchemaFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "app_catalog" => Ok(Self::AppCatalog),
            "commerce" => Ok(Self::Commerce),
            other => Err(format!("unknown schema family '{}'", other)),
        }
    }
}

fn default_partition() -> String {
    "global".to_string()
}

fn default_queue_capacity() -> usize {
    1024
}
