// rest/routes/buffer.rs — Buffer namespace endpoints.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::rest::error::{required, ApiError};
use crate::AppContext;

#[derive(Deserialize)]
pub struct CreateBufferRequest {
    pub key: Option<String>,
    pub size: Option<usize>,
}

#[derive(Deserialize)]
pub struct KeyRequest {
    pub key: Option<String>,
}

pub async fn create(
    State(ctx): State<Arc<AppContext>>,
    Json(body): Json<CreateBufferRequest>,
) -> Result<Json<Value>, ApiError> {
    let key = required(body.key, "key")?;
    let size = required(body.size, "size")?;
    ctx.registry.create_buffer(&key, size).await?;
    ctx.metrics.inc_regions_created();
    Ok(Json(json!({
        "message": format!("buffer created for key {key} with size {size}"),
        "key": key,
        "size": size,
    })))
}

pub async fn release(
    State(ctx): State<Arc<AppContext>>,
    Json(body): Json<KeyRequest>,
) -> Result<Json<Value>, ApiError> {
    let key = required(body.key, "key")?;
    ctx.registry.release_buffer(&key).await?;
    ctx.metrics.inc_regions_released();
    Ok(Json(json!({
        "message": format!("buffer released for key {key}"),
        "key": key,
    })))
}

pub async fn content(
    State(ctx): State<Arc<AppContext>>,
    Path(key): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let snapshot = ctx.registry.buffer_content(&key).await?;
    Ok(Json(json!({ "key": key, "content": snapshot })))
}
