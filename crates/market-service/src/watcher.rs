//! Catalog refresh task
//!
//! Keeps a snapshot of the public catalog current. The task reloads on a
//! fixed interval and whenever the catalog or the submission collection is
//! written, and stops when its handle is stopped or dropped.

use std::time::Duration;

use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use market_core::entities::Listing;
use market_store::keys;

use crate::services::{ListingService, ServiceContext};

/// Lower bound for the refresh period
const MIN_REFRESH: Duration = Duration::from_millis(100);

/// Handle to a running catalog refresh task
pub struct CatalogWatcher {
    shutdown: watch::Sender<bool>,
    snapshot: watch::Receiver<Vec<Listing>>,
    task: Option<JoinHandle<()>>,
}

impl CatalogWatcher {
    /// Start watching with the context's configured refresh interval
    pub fn spawn(ctx: ServiceContext) -> Self {
        let period = ctx.settings().catalog_refresh;
        Self::spawn_with_interval(ctx, period)
    }

    pub fn spawn_with_interval(ctx: ServiceContext, period: Duration) -> Self {
        let (shutdown, shutdown_rx) = watch::channel(false);
        let (snapshot_tx, snapshot) = watch::channel(Vec::new());
        let changes = ctx.events().subscribe();

        let task = tokio::spawn(run(ctx, period.max(MIN_REFRESH), shutdown_rx, changes, snapshot_tx));
        info!(?period, "Catalog watcher started");

        Self {
            shutdown,
            snapshot,
            task: Some(task),
        }
    }

    /// The latest catalog snapshot
    pub fn latest(&self) -> Vec<Listing> {
        self.snapshot.borrow().clone()
    }

    /// Receiver notified whenever the snapshot changes
    pub fn subscribe(&self) -> watch::Receiver<Vec<Listing>> {
        self.snapshot.clone()
    }

    /// Stop the task and wait for it to finish
    pub async fn stop(mut self) {
        let _ = self.shutdown.send(true);
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                warn!(error = %e, "Catalog watcher ended abnormally");
            }
        }
    }
}

impl Drop for CatalogWatcher {
    fn drop(&mut self) {
        let _ = self.shutdown.send(true);
    }
}

async fn run(
    ctx: ServiceContext,
    period: Duration,
    mut shutdown: watch::Receiver<bool>,
    mut changes: broadcast::Receiver<market_core::DomainEvent>,
    snapshot: watch::Sender<Vec<Listing>>,
) {
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = shutdown.changed() => break,
            _ = ticker.tick() => {}
            event = changes.recv() => match event {
                Ok(event) => {
                    if !matches!(event.collection(), Some(keys::ACCOUNTS | keys::SELLER_ACCOUNTS)) {
                        continue;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    debug!(skipped, "Catalog watcher lagged behind change events");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            },
        }

        match ListingService::new(&ctx).catalog().await {
            Ok(listings) => {
                let changed = snapshot.send_if_modified(|current| {
                    if *current == listings {
                        false
                    } else {
                        *current = listings;
                        true
                    }
                });
                if changed {
                    debug!(count = snapshot.borrow().len(), "Catalog snapshot refreshed");
                }
            }
            Err(e) => warn!(error = %e, "Catalog refresh failed"),
        }
    }

    info!("Catalog watcher stopped");
}
