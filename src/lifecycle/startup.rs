//! Startup orchestration.
//!
//! # Responsibilities
//! - Start the metrics exporter and the config reload task
//! - Bind the listener and serve until a shutdown signal
//! - Stop background tasks once the server has drained
//!
//! # Design Decisions
//! - Listener settings are read once; a reload changes routing and
//!   controller settings, not the bound address
//! - Observability failures are logged, never fatal

use std::net::SocketAddr;
use std::path::Path;

use tokio::net::TcpListener;

use crate::application::Application;
use crate::config::watcher::{spawn_reload_task, ConfigWatcher};
use crate::http::HttpServer;
use crate::lifecycle::{shutdown_signal, Shutdown};
use crate::observability::metrics;

/// Serve `app` until SIGINT/SIGTERM. Watches `config_path` for changes when given.
pub async fn serve(app: Application, config_path: Option<&Path>) -> Result<(), std::io::Error> {
    let config = app.config();
    let shutdown = Shutdown::new();

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => {
                if let Err(e) = metrics::init_metrics(addr) {
                    tracing::error!(error = %e, "Failed to install metrics exporter");
                }
            }
            Err(e) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                error = %e,
                "Failed to parse metrics address"
            ),
        }
    }

    let mut _watcher = None;
    let mut reload_task = None;
    if let Some(path) = config_path {
        let (watcher, updates) = ConfigWatcher::new(path);
        match watcher.run() {
            Ok(handle) => {
                _watcher = Some(handle);
                reload_task = Some(spawn_reload_task(
                    app.shared_config().clone(),
                    updates,
                    shutdown.subscribe(),
                ));
            }
            Err(e) => tracing::warn!(error = %e, "Config hot reload disabled"),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        request_timeout_secs = config.timeouts.request_secs,
        "Listening for connections"
    );

    HttpServer::new(app).run(listener, shutdown_signal()).await?;

    shutdown.trigger();
    if let Some(task) = reload_task {
        if let Err(e) = task.await {
            tracing::warn!(error = %e, "Config reload task ended abnormally");
        }
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
