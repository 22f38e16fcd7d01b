// rest/mod.rs — Public REST API server.
//
// Axum HTTP server exposing the region registry (local only by default).
//
// Endpoints (all under /api/v1):
//   POST /general/allocate | /general/release | /general/check_bounds
//        /general/resize   | /general/write
//   GET  /general/content/{key}
//   POST /heap/...              (same set as /general)
//   POST /buffer/create | /buffer/release
//   GET  /buffer/content/{key}
//   POST /stack/create | /stack/push | /stack/pop | /stack/release
//   GET  /usage
//   POST /reclaim
//   GET  /health
//   GET  /metrics

pub mod error;
pub mod routes;

use anyhow::{Context, Result};
use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::AppContext;

/// Bind the listener and serve forever. Failure to bind is the only fatal
/// error; everything after startup is handled per request.
pub async fn start_rest_server(ctx: Arc<AppContext>) -> Result<()> {
    let bind = ctx.config.bind_addr();
    let addr: SocketAddr = bind
        .parse()
        .with_context(|| format!("invalid bind address {bind}"))?;

    let router = build_router(ctx);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding service endpoint {addr}"))?;
    info!("region registry API listening on http://{}", addr);
    axum::serve(listener, router).await?;
    Ok(())
}

pub fn build_router(ctx: Arc<AppContext>) -> Router {
    Router::new()
        // Health + metrics
        .route("/api/v1/health", get(routes::health::health))
        .route("/api/v1/metrics", get(routes::metrics::metrics))
        // General namespace
        .route("/api/v1/general/allocate", post(routes::slots::general::allocate))
        .route("/api/v1/general/release", post(routes::slots::general::release))
        .route(
            "/api/v1/general/check_bounds",
            post(routes::slots::general::check_bounds),
        )
        .route("/api/v1/general/resize", post(routes::slots::general::resize))
        .route("/api/v1/general/write", post(routes::slots::general::write))
        .route(
            "/api/v1/general/content/{key}",
            get(routes::slots::general::content),
        )
        // Heap namespace (same contract, separate keyspace)
        .route("/api/v1/heap/allocate", post(routes::slots::heap::allocate))
        .route("/api/v1/heap/release", post(routes::slots::heap::release))
        .route(
            "/api/v1/heap/check_bounds",
            post(routes::slots::heap::check_bounds),
        )
        .route("/api/v1/heap/resize", post(routes::slots::heap::resize))
        .route("/api/v1/heap/write", post(routes::slots::heap::write))
        .route("/api/v1/heap/content/{key}", get(routes::slots::heap::content))
        // Buffer namespace
        .route("/api/v1/buffer/create", post(routes::buffer::create))
        .route("/api/v1/buffer/release", post(routes::buffer::release))
        .route("/api/v1/buffer/content/{key}", get(routes::buffer::content))
        // Stack namespace
        .route("/api/v1/stack/create", post(routes::stack::create))
        .route("/api/v1/stack/push", post(routes::stack::push))
        .route("/api/v1/stack/pop", post(routes::stack::pop))
        .route("/api/v1/stack/release", post(routes::stack::release))
        // Usage summary + reclaim hook
        .route("/api/v1/usage", get(routes::usage::usage))
        .route("/api/v1/reclaim", post(routes::reclaim::reclaim))
        .fallback(unknown_route)
        .layer(middleware::from_fn_with_state(ctx.clone(), track_request))
        .layer(CorsLayer::permissive())
        .with_state(ctx)
}

/// Counts every dispatched request. Runs outside the handlers so nothing can
/// slip past it.
async fn track_request(
    State(ctx): State<Arc<AppContext>>,
    req: Request,
    next: Next,
) -> Response {
    ctx.metrics.inc_http_requests();
    next.run(req).await
}

/// Unknown routes still get a structured JSON body.
async fn unknown_route() -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "not_found", "message": "unknown route" })),
    )
}
