//! Router construction and serving.

use axum::Router;
use axum::routing::get;
use log::{error, info};
use quotation_common::Result;
use quotation_common::net::QUOTATION_PATH;
use tokio::net::TcpListener;

use crate::config::{DeadlinePolicy, ServerConfig};
use crate::handler;
use crate::store::SqliteStore;
use crate::upstream::UpstreamClient;

/// Immutable state shared by all requests.
#[derive(Clone)]
pub struct AppState {
    /// Provider client.
    pub upstream: UpstreamClient,
    /// Pooled datastore.
    pub store: SqliteStore,
    /// Request budget and stage caps.
    pub deadlines: DeadlinePolicy,
}

impl AppState {
    /// Open the datastore and build the upstream client described by `config`.
    pub fn new(config: &ServerConfig) -> Result<Self> {
        Ok(Self {
            upstream: UpstreamClient::new(&config.upstream_base_url, config.pair)?,
            store: SqliteStore::open(&config.database, config.pool_size)?,
            deadlines: config.deadlines,
        })
    }
}

/// The server's route table: the quotation route plus a 404 fallback.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(QUOTATION_PATH, get(handler::get_quotation))
        .fallback(handler::not_found)
        .with_state(state)
}

/// Serve on `listener` until Ctrl+C.
pub async fn serve(listener: TcpListener, state: AppState) -> Result<()> {
    info!(
        "Quotation server listening on http://{}{} (upstream {})",
        listener.local_addr()?,
        QUOTATION_PATH,
        state.upstream.url()
    );
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("Quotation server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Ctrl+C received. Shutting down server..."),
        Err(e) => {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
