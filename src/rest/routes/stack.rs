// rest/routes/stack.rs — Stack namespace endpoints.

use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::rest::error::{required, ApiError};
use crate::AppContext;

#[derive(Deserialize)]
pub struct CreateStackRequest {
    pub key: Option<String>,
    pub capacity: Option<usize>,
}

#[derive(Deserialize)]
pub struct KeyRequest {
    pub key: Option<String>,
}

#[derive(Deserialize)]
pub struct PushRequest {
    pub key: Option<String>,
    pub value: Option<Value>,
}

pub async fn create(
    State(ctx): State<Arc<AppContext>>,
    Json(body): Json<CreateStackRequest>,
) -> Result<Json<Value>, ApiError> {
    let key = required(body.key, "key")?;
    let capacity = required(body.capacity, "capacity")?;
    ctx.registry.create_stack(&key, capacity).await?;
    ctx.metrics.inc_regions_created();
    Ok(Json(json!({
        "message": format!("stack created for key {key} with capacity {capacity}"),
        "key": key,
        "capacity": capacity,
    })))
}

pub async fn push(
    State(ctx): State<Arc<AppContext>>,
    Json(body): Json<PushRequest>,
) -> Result<Json<Value>, ApiError> {
    let key = required(body.key, "key")?;
    let value = required(body.value, "value")?;
    let depth = ctx.registry.push(&key, value).await?;
    ctx.metrics.inc_stack_pushes();
    Ok(Json(json!({
        "message": format!("value pushed to stack for key {key}"),
        "key": key,
        "depth": depth,
    })))
}

pub async fn pop(
    State(ctx): State<Arc<AppContext>>,
    Json(body): Json<KeyRequest>,
) -> Result<Json<Value>, ApiError> {
    let key = required(body.key, "key")?;
    let value = ctx.registry.pop(&key).await?;
    ctx.metrics.inc_stack_pops();
    Ok(Json(json!({
        "message": format!("value popped from stack for key {key}"),
        "key": key,
        "value": value,
    })))
}

pub async fn release(
    State(ctx): State<Arc<AppContext>>,
    Json(body): Json<KeyRequest>,
) -> Result<Json<Value>, ApiError> {
    let key = required(body.key, "key")?;
    ctx.registry.release_stack(&key).await?;
    ctx.metrics.inc_regions_released();
    Ok(Json(json!({
        "message": format!("stack released for key {key}"),
        "key": key,
    })))
}
