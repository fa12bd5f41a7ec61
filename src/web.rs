use std::time::Duration;

use anyhow::Result;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;

use crate::api::{self, AppState};
use crate::config::TripScoutConfig;

pub async fn run(state: AppState, config: &TripScoutConfig) -> Result<()> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .nest("/api", api::router(state))
        .layer(cors)
        .layer(TimeoutLayer::new(Duration::from_secs(u64::from(
            config.server.request_timeout_seconds,
        ))))
        .layer(RequestBodyLimitLayer::new(
            usize::try_from(config.server.body_limit_kb).unwrap_or(64) * 1024,
        ));

    let addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("API server running at http://localhost:{}", config.server.port);
    axum::serve(listener, app).await?;
    Ok(())
}
