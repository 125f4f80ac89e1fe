//! Marketplace runner
//!
//! Run with:
//! ```bash
//! cargo run -p market-service
//! ```
//!
//! Opens the configured record store and keeps the catalog snapshot fresh
//! until interrupted. Configuration is loaded from environment variables.

use market_common::{try_init_tracing_with_config, AppConfig, AppError, AppResult, TracingConfig};
use market_service::{CatalogWatcher, ServiceContext};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", AppError::from(e));
            std::process::exit(1);
        }
    };

    if let Err(e) = try_init_tracing_with_config(TracingConfig::for_environment(config.app.env)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    if let Err(e) = run(config).await {
        error!(code = e.error_code(), error = %e, "Marketplace failed");
        std::process::exit(1);
    }
}

async fn run(config: AppConfig) -> AppResult<()> {
    info!(
        name = %config.app.name,
        env = ?config.app.env,
        backend = ?config.store.backend,
        auto_approve = config.catalog.auto_approve_listings,
        "Configuration loaded"
    );

    let ctx = ServiceContext::from_config(&config)?;
    let watcher = CatalogWatcher::spawn(ctx);
    let mut updates = watcher.subscribe();

    loop {
        tokio::select! {
            signal = tokio::signal::ctrl_c() => {
                signal.map_err(AppError::internal)?;
                break;
            }
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let available = updates.borrow().iter().filter(|l| l.is_available()).count();
                info!(available, "Catalog updated");
            }
        }
    }

    info!("Shutting down");
    watcher.stop().await;
    Ok(())
}
