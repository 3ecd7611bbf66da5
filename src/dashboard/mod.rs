// src/dashboard/mod.rs
//! Browser dashboard over the scraped dataset.
//!
//! The dataset is loaded once at startup into a [`DashboardContext`] and
//! shared read-only with every handler through axum `State`.

pub mod chart;
pub mod routes;

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::DashboardOptions;
use crate::data::RawData;
use crate::error::{ServeError, StoreError};
use crate::store::{self, Dataset};

/// Everything the handlers need. Immutable after startup.
#[derive(Debug)]
pub struct DashboardContext {
    pub data: RawData,
    /// Where the dataset was read from (shown on the page).
    pub source: PathBuf,
}

impl DashboardContext {
    pub fn new(ds: Dataset, source: PathBuf) -> Self {
        Self { data: RawData::new(ds), source }
    }

    /// Read the configured dataset file. A missing file is
    /// [`StoreError::Missing`] so the caller can stop with a clear message.
    pub fn load(opts: &DashboardOptions) -> Result<Self, StoreError> {
        let ds = store::load_dataset(&opts.dataset, &opts.table)?;
        info!(path = %opts.dataset.display(), rows = ds.len(), "dataset loaded");
        Ok(Self::new(ds, opts.dataset.clone()))
    }
}

pub fn router(ctx: Arc<DashboardContext>) -> Router {
    Router::new()
        .route("/", get(routes::index))
        .route("/health", get(routes::health))
        .route("/api/options", get(routes::options))
        .route("/api/results", get(routes::results))
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}

/// Bind and serve until Ctrl-C.
pub async fn serve(opts: &DashboardOptions, ctx: Arc<DashboardContext>) -> Result<(), ServeError> {
    let ip: IpAddr = opts
        .host
        .parse()
        .map_err(|source| ServeError::Addr { addr: opts.host.clone(), source })?;
    let addr = SocketAddr::new(ip, opts.port);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("dashboard listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(ctx))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    shutdown_on(tokio::signal::ctrl_c()).await
}

/// Resolves when `signal` fires. A signal that cannot be installed never
/// resolves, so the server keeps running.
async fn shutdown_on(signal: impl Future<Output = std::io::Result<()>>) {
    if let Err(e) = signal.await {
        warn!(error = %e, "cannot listen for Ctrl-C; stop the process another way");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn failed_signal_does_not_stop_the_server() {
        let broken = async { Err(std::io::Error::other("no signal handler")) };
        tokio::select! {
            biased;
            _ = shutdown_on(broken) => panic!("shutdown resolved on a failed signal"),
            _ = tokio::task::yield_now() => {}
        }
    }

    #[tokio::test]
    async fn signal_resolves_shutdown() {
        shutdown_on(async { Ok(()) }).await;
    }
}
