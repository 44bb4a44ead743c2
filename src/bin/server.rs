use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use anyhow::Context;
use axum::extract::{Query, State};
use axum::response::Html;
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use celestial_ocean::api::{self, ApiError, PreviewQuery, SceneRequest, SceneResponse};
use celestial_ocean::config::{PageConfig, SceneParams};
use celestial_ocean::page;
use celestial_ocean::stars::StarCache;

const DEFAULT_ADDR: &str = "127.0.0.1:3000";

#[derive(Clone)]
struct AppState {
    page: Arc<PageConfig>,
    cache: Arc<Mutex<StarCache>>,
}

async fn page_handler(State(state): State<AppState>) -> Html<String> {
    Html(page::render_page(&state.page, &SceneParams::default()))
}

async fn scene_handler(
    State(state): State<AppState>,
    Query(query): Query<PreviewQuery>,
    Json(req): Json<SceneRequest>,
) -> Result<Json<SceneResponse>, ApiError> {
    let response = tokio::task::spawn_blocking(move || api::scene(req, query, &state.cache))
        .await
        .map_err(|e| ApiError::Internal(e.into()))??;

    Ok(Json(response))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let addr: SocketAddr = std::env::var("CELESTIAL_ADDR")
        .unwrap_or_else(|_| DEFAULT_ADDR.to_string())
        .parse()
        .context("CELESTIAL_ADDR is not a socket address")?;

    let state = AppState {
        page: Arc::new(PageConfig::default()),
        cache: Arc::new(Mutex::new(StarCache::default())),
    };

    // the page itself is rendered from a template, only assets are served raw
    let app = Router::new()
        .route("/", get(page_handler))
        .route("/api/scene", post(scene_handler))
        .fallback_service(ServeDir::new("frontend"))
        .layer(CorsLayer::permissive())
        .with_state(state);

    log::info!("celestial ocean at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
