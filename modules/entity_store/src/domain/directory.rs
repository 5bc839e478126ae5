//! Partition directory: name -> long-lived partition handle

use super::gate::PartitionHandle;
use crate::config::{Config, SchemaFamily};
use crate::contract::StoreError;
use dashmap::DashMap;

const MAX_PARTITION_NAME_LEN: usize = 64;

/// Maps partition names to their workers, creating each on first reference
pub struct PartitionDirectory {
    config: Config,
    partitions: DashMap<String, PartitionHandle>,
}

impl PartitionDirectory {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            partitions: DashMap::new(),
        }
    }

    /// Handle for `name`, started on first reference.
    ///
    /// Repeated calls return clones of the same handle.
    pub fn resolve(&self, name: &str) -> Result<PartitionHandle, StoreError> {
        validate_partition_name(name)?;

        if let Some(handle) = self.partitions.get(name) {
            return Ok(handle.value().clone());
        }

        let handle = self
            .partitions
            .entry(name.to_string())
            .or_insert_with(|| {
                PartitionHandle::spawn(
                    name,
                    self.config.family_for(name),
                    self.config.storage.clone(),
                    self.config.queue_capacity,
                )
            })
            .value()
            .clone();
        Ok(handle)
    }

    /// Handle for the configured default partition
    pub fn resolve_default(&self) -> Result<PartitionHandle, StoreError> {
        self.resolve(&self.config.default_partition)
    }

    pub fn default_partition(&self) -> &str {
        &self.config.default_partition
    }

    /// Schema family a partition serves, whether or not it has been resolved yet
    pub fn family_of(&self, name: &str) -> SchemaFamily {
        self.config.family_for(name)
    }

    /// Names of the partitions resolved so far, sorted
    pub fn partitions(&self) -> Vec<String> {
        let mut names: Vec<String> = self.partitions.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }
}

/// Partition names double as file names: `[A-Za-z0-9_-]{1,64}`
pub fn validate_partition_name(name: &str) -> Result<(), StoreError> {
    let valid = !name.is_empty()
        && name.len() <= MAX_PARTITION_NAME_LEN
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');

    if !valid {
        return Err(StoreError::invalid(format!(
            "partition name '{}' must be 1-{} characters of [A-Za-z0-9_-]",
            name, MAX_PARTITION_NAME_LEN
        )));
    }
    Ok(())
}
