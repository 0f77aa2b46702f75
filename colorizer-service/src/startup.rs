use crate::config::ColorizerConfig;
use crate::handlers;
use crate::services::inference::{HuggingFaceClient, InferenceClient};
use crate::services::{ArtifactStore, Colorizer};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use service_core::error::AppError;
use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Uploads larger than this are rejected at the extractor.
const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub config: ColorizerConfig,
    pub store: Arc<ArtifactStore>,
    pub colorizer: Arc<Colorizer>,
}

pub struct Application {
    port: u16,
    server: Box<dyn std::future::Future<Output = std::io::Result<()>> + Send + Unpin>,
}

impl Application {
    pub async fn build(config: ColorizerConfig) -> Result<Self, AppError> {
        let client: Arc<dyn InferenceClient> =
            Arc::new(HuggingFaceClient::new(config.inference.clone()));
        Self::build_with_client(config, client).await
    }

    /// Tests use this to swap in a canned inference backend.
    pub async fn build_with_client(
        config: ColorizerConfig,
        client: Arc<dyn InferenceClient>,
    ) -> Result<Self, AppError> {
        let store = Arc::new(ArtifactStore::new(&config.storage).await.map_err(|e| {
            tracing::error!(
                "Failed to initialize artifact store at {} / {}: {}",
                config.storage.upload_dir,
                config.storage.results_dir,
                e
            );
            e
        })?);

        if config.inference.api_token.is_none() {
            tracing::warn!(
                "HUGGING_FACE_TOKEN is not set; every request will take the local fallback path"
            );
        }

        let colorizer = Arc::new(Colorizer::new(store.clone(), client));

        let state = AppState {
            config: config.clone(),
            store,
            colorizer,
        };

        let app = Router::new()
            .route("/health", get(handlers::health_check))
            .route("/models", get(handlers::list_models))
            .route("/metrics", get(handlers::metrics_endpoint))
            .route("/colorize", post(handlers::colorize_image))
            .route("/colorize_batch", post(handlers::colorize_batch))
            .route("/download/:name", get(handlers::download_file))
            .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
            .with_state(state);

        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Listening on {}", port);

        let server = axum::serve(listener, app);

        Ok(Self {
            port,
            server: Box::new(server.into_future()),
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.server.await
    }
}
