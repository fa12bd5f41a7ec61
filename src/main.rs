use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use tripscout::api::AppState;
use tripscout::config::TripScoutConfig;
use tripscout::storage::InMemoryDestinationStore;
use tripscout::{cache, web};

fn init_tracing(config: &TripScoutConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone()));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if config.logging.format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Expand a leading `~` to the user's home directory
fn expand_path(raw: &str) -> PathBuf {
    match raw.strip_prefix("~/") {
        Some(rest) => dirs::home_dir()
            .map(|home| home.join(rest))
            .unwrap_or_else(|| PathBuf::from(raw)),
        None => PathBuf::from(raw),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = TripScoutConfig::load()?;
    init_tracing(&config);
    info!(version = tripscout::VERSION, "starting tripscout");

    if config.cache.enabled {
        let cache_path = expand_path(&config.cache.location);
        match cache::init(&cache_path) {
            Ok(()) => info!(path = %cache_path.display(), "result cache ready"),
            Err(e) => warn!("failed to open result cache, continuing without: {e:#}"),
        }
    }

    let store = match &config.catalog.seed_path {
        Some(path) => InMemoryDestinationStore::load_from_json(expand_path(path)).await?,
        None => {
            warn!("no catalog.seed_path configured, starting with an empty catalog");
            InMemoryDestinationStore::new()
        }
    };

    let state = AppState {
        store: Arc::new(store),
        config: Arc::new(config.clone()),
    };
    web::run(state, &config).await
}
