//! Web form for submitting repositories
//!
//! One page with a single URL field. Submitting it runs the build pipeline on
//! the blocking thread pool and renders either a download link for the
//! archive or the pipeline's error message.

mod archives;
mod handlers;
mod page;

pub use archives::{ArchiveIndex, DEFAULT_TRACKED_BUILDS};

use crate::build::BuildPipeline;
use anyhow::{Context, Result};
use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

/// Shared state for all handlers.
pub struct ServerState {
    pub pipeline: Arc<BuildPipeline>,
    /// Finished builds by id, pointing at their archive
    pub archives: RwLock<ArchiveIndex>,
}

impl ServerState {
    pub fn new(pipeline: Arc<BuildPipeline>) -> Self {
        Self::with_archive_capacity(pipeline, DEFAULT_TRACKED_BUILDS)
    }

    pub fn with_archive_capacity(pipeline: Arc<BuildPipeline>, capacity: usize) -> Self {
        Self {
            pipeline,
            archives: RwLock::new(ArchiveIndex::with_capacity(capacity)),
        }
    }
}

pub fn router(state: Arc<ServerState>) -> Router {
    Router::new()
        .route("/", get(handlers::index_handler))
        .route("/compile", post(handlers::compile_handler))
        .route("/download/{id}", get(handlers::download_handler))
        .route("/api/health", get(handlers::health_handler))
        .with_state(state)
}

/// Serve the form on `addr` until Ctrl-C.
pub async fn serve(addr: SocketAddr, state: Arc<ServerState>) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    let bound_addr = listener
        .local_addr()
        .context("Failed to get local addr")?;

    info!(addr = %bound_addr, "Web form listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Web form shutting down");
        })
        .await
        .context("Web server error")
}
