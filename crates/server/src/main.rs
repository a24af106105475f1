//! Satchel server binary.

use anyhow::{Context, Result};
use clap::Parser;
use figment::providers::{Env, Format, Toml};
use figment::Figment;
use satchel_core::{AppConfig, WordCorpus};
use satchel_server::{create_router, AppState};
use satchel_store::FolderStore;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Satchel - ephemeral password-gated drop folders
#[derive(Parser, Debug)]
#[command(name = "satcheld")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(
        short,
        long,
        env = "SATCHEL_CONFIG",
        default_value = "config/server.toml"
    )]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Satchel v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration (file is optional, env vars can provide/override everything)
    let config_path = std::path::Path::new(&args.config);
    let mut figment = Figment::new();
    if config_path.exists() {
        tracing::info!(config_path = %args.config, "Loading configuration from file");
        figment = figment.merge(Toml::file(&args.config));
    } else {
        tracing::debug!("No config file found at {}", args.config);
    }

    let config: AppConfig = figment
        .merge(Env::prefixed("SATCHEL_").split("__"))
        .extract()
        .context("failed to load configuration")?;
    config.validate().map_err(anyhow::Error::msg)?;

    // Load the word corpus once; it is immutable for the process lifetime.
    // An unreadable or degenerate word list is a deployment error, not a
    // runtime failure.
    let folders = &config.folders;
    let corpus = match &folders.dictionary {
        Some(path) => WordCorpus::load(path, folders.word_min_len, folders.word_max_len)
            .with_context(|| format!("failed to load dictionary {}", path.display()))?,
        None => WordCorpus::builtin(folders.word_min_len, folders.word_max_len)
            .context("failed to load builtin dictionary")?,
    };
    tracing::info!(
        words = corpus.len(),
        identifiers = (corpus.len() as f64).powi(folders.words_per_id as i32),
        "Word corpus loaded"
    );

    // Open the store; this creates the root and verifies it is writable.
    let store = Arc::new(
        FolderStore::new(config.folders.clone())
            .await
            .context("failed to open folder store")?,
    );
    tracing::info!(root = %config.folders.root.display(), "Folder store opened");

    let bind = config.server.bind.clone();
    let state = AppState::new(config, store, Arc::new(corpus));
    let router = create_router(state).into_make_service_with_connect_info::<SocketAddr>();

    let listener = tokio::net::TcpListener::bind(&bind)
        .await
        .with_context(|| format!("failed to bind {bind}"))?;
    tracing::info!(bind = %bind, "Listening");

    axum::serve(listener, router)
        .await
        .context("server error")?;
    Ok(())
}
