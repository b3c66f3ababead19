use std::{net::SocketAddr, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use shared::{
    error::{ApiError, ErrorCode},
    protocol::HandlerFailure,
};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

mod api;
mod app_state;
mod config;

use api::{catalog_headers, cors_headers, read_catalog, CatalogContext};
use app_state::AppState;
use config::load_settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let settings = load_settings();
    let catalog = CatalogContext::new(
        &settings.data_path,
        &settings.catalog_name,
        &settings.cache_control,
    )?;
    if !catalog.data_path.exists() {
        error!(
            data_path = %catalog.data_path.display(),
            "artwork data file not found; requests will answer 500 until it exists"
        );
    }

    let app = build_router(Arc::new(AppState { catalog }));

    let addr: SocketAddr = settings.server_bind.parse()?;
    info!(
        %addr,
        url = %format!("{}/api/{}", settings.public_url(), settings.catalog_name),
        "artwork endpoint listening"
    );
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/:catalog", get(serve_catalog).options(preflight))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

fn unknown_catalog(catalog: &str) -> (StatusCode, Json<ApiError>) {
    (
        StatusCode::NOT_FOUND,
        Json(ApiError::new(
            ErrorCode::NotFound,
            format!("catalog '{catalog}' not found"),
        )),
    )
}

async fn serve_catalog(
    State(state): State<Arc<AppState>>,
    Path(catalog): Path<String>,
) -> Result<Response, (StatusCode, Json<ApiError>)> {
    let ctx = &state.catalog;
    if !ctx.serves(&catalog) {
        return Err(unknown_catalog(&catalog));
    }

    match read_catalog(ctx).await {
        Ok(document) => Ok((StatusCode::OK, catalog_headers(ctx), Json(document)).into_response()),
        Err(e) => {
            error!(
                data_path = %ctx.data_path.display(),
                error = %format!("{e:#}"),
                "failed to serve artwork catalog"
            );
            let failure = HandlerFailure {
                error: format!("Failed to read {}", ctx.file_label()),
            };
            Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                cors_headers(),
                Json(failure),
            )
                .into_response())
        }
    }
}

async fn preflight(
    State(state): State<Arc<AppState>>,
    Path(catalog): Path<String>,
) -> Result<Response, (StatusCode, Json<ApiError>)> {
    if !state.catalog.serves(&catalog) {
        return Err(unknown_catalog(&catalog));
    }
    Ok((StatusCode::NO_CONTENT, cors_headers()).into_response())
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
