// rest/mod.rs — Public REST API server.
//
// Axum HTTP server fronting the generation core. Every route except /health
// is gated by the static address allow-list.
//
// Endpoints:
//   POST /api/v1/generate
//   POST /api/v1/export/json
//   POST /api/v1/export/csv
//   POST /api/v1/export/text
//   POST /api/v1/export/excel
//   GET  /api/v1/health

pub mod allowlist;
pub mod routes;

use anyhow::{Context as _, Result};
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::AppContext;

pub async fn start_rest_server(ctx: Arc<AppContext>) -> Result<()> {
    let bind = format!("{}:{}", ctx.config.bind_address, ctx.config.port);
    let addr: SocketAddr = bind
        .parse()
        .with_context(|| format!("invalid bind address: {bind}"))?;

    let router = build_router(ctx);

    info!("REST API listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;
    Ok(())
}

pub fn build_router(ctx: Arc<AppContext>) -> Router {
    let gated = Router::new()
        .route("/api/v1/generate", post(routes::generate::generate))
        .route("/api/v1/export/json", post(routes::export::export_json))
        .route("/api/v1/export/csv", post(routes::export::export_csv))
        .route("/api/v1/export/text", post(routes::export::export_text))
        .route("/api/v1/export/excel", post(routes::export::export_excel))
        .route_layer(middleware::from_fn_with_state(
            ctx.clone(),
            allowlist::require_allowlist,
        ));

    Router::new()
        // Health (not gated)
        .route("/api/v1/health", get(routes::health::health))
        .merge(gated)
        .layer(CorsLayer::permissive())
        .with_state(ctx)
}
