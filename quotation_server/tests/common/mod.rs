//! Shared test utilities: a stub quotation provider and a server on an ephemeral port.
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use axum::Router;
use axum::http::{StatusCode, header};
use axum::routing::get;
use quotation_server::app::{AppState, router};
use quotation_server::config::{DeadlinePolicy, ServerConfig};
use quotation_server::store::SqliteStore;
use tempfile::TempDir;
use tokio::net::TcpListener;

/// Provider body for the USD-BRL pair with the given bid.
pub fn payload(bid: &str) -> String {
    format!(
        r#"{{"USDBRL":{{"code":"USD","codein":"BRL","name":"Dólar Americano/Real Brasileiro","high":"5.12","low":"5.09","varBid":"0.005","pctChange":"0.1","bid":"{bid}","ask":"5.11","timestamp":"1715374798","create_date":"2024-05-10 17:59:58"}}}}"#
    )
}

/// Generous budgets so that only the stage under test can time out.
pub fn relaxed() -> DeadlinePolicy {
    DeadlinePolicy {
        request_ceiling: Duration::from_secs(5),
        fetch_cap: Duration::from_secs(2),
        persist_cap: Duration::from_secs(1),
    }
}

/// Stub provider answering `GET /json/last/USD-BRL` with a fixed response.
pub struct StubUpstream {
    pub base_url: String,
    hits: Arc<AtomicUsize>,
}

impl StubUpstream {
    pub async fn start(status: StatusCode, body: String, delay: Duration) -> Self {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        let app = Router::new().route(
            "/json/last/USD-BRL",
            get(move || {
                let body = body.clone();
                let counter = Arc::clone(&counter);
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    tokio::time::sleep(delay).await;
                    (status, [(header::CONTENT_TYPE, "application/json")], body)
                }
            }),
        );
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        Self {
            base_url: format!("http://{}/json/last", addr),
            hits,
        }
    }

    pub async fn ok(bid: &str) -> Self {
        Self::start(StatusCode::OK, payload(bid), Duration::ZERO).await
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

/// Quotation server backed by a temporary database.
pub struct TestServer {
    base: String,
    db_path: PathBuf,
    pub store: SqliteStore,
    _dir: TempDir,
}

impl TestServer {
    pub async fn start(upstream: &StubUpstream, deadlines: DeadlinePolicy) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("quotation.db");
        let config = ServerConfig {
            upstream_base_url: upstream.base_url.clone(),
            database: db_path.clone(),
            pool_size: 2,
            deadlines,
            ..ServerConfig::default()
        };
        let state = AppState::new(&config).unwrap();
        let store = state.store.clone();
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router(state)).await.unwrap();
        });
        Self {
            base: format!("http://{}", addr),
            db_path,
            store,
            _dir: dir,
        }
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }
}
