//! Common test utilities: isolated in-memory stores and sample entities

#![allow(dead_code)]

use entity_store::{
    Config, EntityStoreModule, NewApp, NewProduct, NewUser, SchemaFamily, StorageConfig,
    StoreClient,
};
use rust_decimal::Decimal;
use std::sync::Arc;

/// Partition configured for the commerce family in every test config
pub const SHOP: &str = "shop";

/// In-memory configuration: catalog by default, `shop` serves commerce
pub fn memory_config() -> Config {
    let mut config = Config {
        storage: StorageConfig::Memory,
        ..Config::default()
    };
    config
        .partition_families
        .insert(SHOP.to_string(), SchemaFamily::Commerce);
    config
}

/// Fresh module over private in-memory partitions
pub fn memory_module() -> EntityStoreModule {
    EntityStoreModule::new(memory_config())
}

/// Fresh native client over private in-memory partitions
pub fn memory_client() -> Arc<dyn StoreClient> {
    memory_module().client()
}

pub fn sample_app(id: &str, owner: &str) -> NewApp {
    NewApp {
        id: id.to_string(),
        name: format!("App {}", id),
        description: Some("generated".to_string()),
        prompt: "build me a todo list".to_string(),
        created_by: owner.to_string(),
        config: Some(serde_json::json!({"theme": "dark", "pages": 2})),
    }
}

pub fn sample_user(name: &str) -> NewUser {
    NewUser {
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
    }
}

/// Product priced `cents / 100`
pub fn sample_product(name: &str, cents: i64, stock: i32) -> NewProduct {
    NewProduct {
        name: name.to_string(),
        description: None,
        price: Decimal::new(cents, 2),
        stock,
    }
}
