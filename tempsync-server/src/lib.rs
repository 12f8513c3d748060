use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::sync::broadcast;

use crate::app::create_app;
use crate::configs::{Settings, Storage};
use crate::errors::ErrorReporter;
use crate::services::{AccessoryService, DiscoveryService, TempStickClient};

pub mod app;
pub mod configs;
pub mod errors;
pub mod handles;
pub mod models;
pub mod services;

#[cfg(any(test, feature = "mock"))]
pub mod tests;

pub async fn run(settings: &Arc<Settings>) -> anyhow::Result<()> {
    let (sender, _receiver) = broadcast::channel(100);
    let reporter = ErrorReporter::new(&settings.tempstick.issue_tracker);

    let storage = Storage::new(&settings.storage);
    let accessory_service = Arc::new(
        AccessoryService::restore(storage, sender, reporter)
            .await
            .context("Failed to restore cached accessories")?,
    );

    let client = Arc::new(
        TempStickClient::new(&settings.tempstick).context("Failed to build the TempStick client")?,
    );
    let discovery = Arc::new(DiscoveryService::new(
        client,
        accessory_service.clone(),
        &settings.tempstick,
    ));

    let app = create_app(accessory_service);

    let ip_addr = settings
        .server
        .host
        .parse::<IpAddr>()
        .with_context(|| format!("Invalid server host {}", settings.server.host))?;
    let address = SocketAddr::from((ip_addr, settings.server.port));
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;

    tracing::info!("listening on {:?}", address);

    // cached accessories are loaded, discovery may start
    let discovery_task = match settings.tempstick.rediscover_interval() {
        Some(every) => discovery.spawn_rediscovery(every),
        None => {
            let discovery = discovery.clone();
            tokio::spawn(async move { discovery.discover().await })
        }
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    discovery_task.abort();
    discovery.shutdown().await;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }

    tracing::info!("shutting down");
}
