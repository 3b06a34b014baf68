//! HTTP layer exposing keyword analysis as a JSON API.

pub mod routes;
pub mod types;

use std::{net::SocketAddr, sync::Arc};

use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use tokio::{
    net::TcpListener,
    sync::{Mutex, RwLock},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::{
    analysis::{AnalysisResult, Analyzer},
    provider::ModelProvider,
};

pub type SharedAnalyzer = Analyzer<Arc<dyn ModelProvider>>;

#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<SharedAnalyzer>,
    /// Held for the duration of an analysis; one request at a time.
    in_flight: Arc<Mutex<()>>,
    /// Most recent successful result only.
    latest: Arc<RwLock<Option<AnalysisResult>>>,
}

impl AppState {
    pub fn new(analyzer: SharedAnalyzer) -> Self {
        Self {
            analyzer: Arc::new(analyzer),
            in_flight: Arc::new(Mutex::new(())),
            latest: Arc::new(RwLock::new(None)),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/analyze", post(routes::analyze))
        .route("/latest", get(routes::latest))
        .route("/health", get(routes::health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn serve(state: AppState, host: String, port: u16) -> Result<()> {
    let router = router(state);
    let addr: SocketAddr = format!("{host}:{port}").parse()?;
    info!(%addr, "serving keyword-pulse API");
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown requested");
    }
}
