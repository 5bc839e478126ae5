use anyhow::{Context, Result};
use clap::Parser;
use entity_store::config::ENV_PREFIX;
use entity_store::EntityStoreModule;
use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Entity store HTTP server
#[derive(Debug, Parser)]
#[command(name = "entity-store-server", version, about)]
struct Cli {
    /// YAML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Listen address, overrides `server.bind`
    #[arg(long, value_name = "ADDR")]
    bind: Option<String>,

    /// Print the effective configuration and exit
    #[arg(long)]
    print_config: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct AppConfig {
    #[serde(default)]
    server: ServerConfig,
    #[serde(default)]
    store: entity_store::Config,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ServerConfig {
    #[serde(default = "default_bind")]
    bind: String,
    /// Filter used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    log_level: String,
    #[serde(default)]
    json_logs: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            log_level: default_log_level(),
            json_logs: false,
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:8787".to_string()
}

fn default_log_level() -> String {
    "info,entity_store=debug".to_string()
}

impl AppConfig {
    fn load(cli: &Cli) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(AppConfig::default()));
        if let Some(path) = &cli.config {
            figment = figment.merge(Yaml::file(path));
        }
        figment = figment.merge(env_layer());
        if let Some(bind) = &cli.bind {
            figment = figment.merge(Serialized::default("server.bind", bind));
        }

        figment.extract().context("failed to load configuration")
    }
}

/// Environment overrides sharing the library's [`ENV_PREFIX`].
///
/// `ENTITY_STORE_SERVER__*` keys set `server`; every other key belongs to the
/// store, e.g. `ENTITY_STORE_STORAGE__DATA_DIR` sets `store.storage.data_dir`.
fn env_layer() -> Env {
    Env::prefixed(ENV_PREFIX).split("__").map(|key| {
        if key.as_str().starts_with("server.") {
            key.as_str().to_string().into()
        } else {
            format!("store.{}", key).into()
        }
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load(&cli)?;

    if cli.print_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    init_tracing(&config.server);

    let module = EntityStoreModule::new(config.store.clone());
    module.init().await?;

    let app = module.register_rest(axum::Router::new());

    let listener = tokio::net::TcpListener::bind(&config.server.bind)
        .await
        .with_context(|| format!("failed to bind to {}", config.server.bind))?;

    info!(
        address = %config.server.bind,
        default_partition = %config.store.default_partition,
        default_family = %config.store.default_family,
        "Entity store server started"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Entity store server stopped");
    Ok(())
}

fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&server.log_level));

    let registry = tracing_subscriber::registry().with(filter);
    if server.json_logs {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "unable to install Ctrl+C signal handler");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
