use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use std::net::SocketAddr;

use crate::api::{ApiClassifyRequest, ApiClassifyResponse};
use dominance_matrix::classify_with_config;
use dominance_matrix::config::EngineConfig;

#[derive(Clone)]
struct AppState {
    config: EngineConfig,
}

pub async fn serve(args: crate::ServeArgs) -> Result<(), String> {
    let (config, config_path) = EngineConfig::load(None)?;
    if let Some(path) = config_path.as_ref() {
        if path.exists() {
            tracing::info!(path = %path.display(), "loaded engine config");
        }
    }

    let state = AppState { config };

    let app = Router::new()
        .route("/api/health", get(health))
        .route("/api/classify", post(classify_handler))
        .with_state(state);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .map_err(|err| format!("invalid bind address: {}", err))?;

    tracing::info!(%addr, "dominance matrix listening");

    axum::serve(
        tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|err| format!("failed to bind server: {}", err))?,
        app,
    )
    .await
    .map_err(|err| format!("server error: {}", err))?;

    Ok(())
}

async fn health() -> impl IntoResponse {
    StatusCode::OK
}

async fn classify_handler(
    State(state): State<AppState>,
    Json(request): Json<ApiClassifyRequest>,
) -> Result<Json<ApiClassifyResponse>, (StatusCode, String)> {
    let (posts, family, duration, density) = request
        .into_parts()
        .map_err(|err| (StatusCode::BAD_REQUEST, err))?;

    let post_count = posts.len();
    let aggregation = classify_with_config(&posts, family, duration, density, &state.config);

    tracing::info!(
        platform = family.label(),
        posts = post_count,
        points = aggregation.points.len(),
        "classified posts"
    );

    Ok(Json(ApiClassifyResponse::from_aggregation(
        family,
        post_count,
        aggregation,
    )))
}
