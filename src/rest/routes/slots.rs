// rest/routes/slots.rs — General and Heap namespace endpoints.
//
// The two namespaces share one contract but separate keyspaces, so the route
// handlers are thin per-namespace wrappers over shared implementations.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::registry::{Namespace, SlotNamespace};
use crate::rest::error::{required, ApiError};
use crate::AppContext;

#[derive(Deserialize)]
pub struct AllocateRequest {
    pub key: Option<String>,
    pub size: Option<usize>,
}

#[derive(Deserialize)]
pub struct KeyRequest {
    pub key: Option<String>,
}

#[derive(Deserialize)]
pub struct CheckBoundsRequest {
    pub key: Option<String>,
    pub index: Option<i64>,
}

#[derive(Deserialize)]
pub struct ResizeRequest {
    pub key: Option<String>,
    pub new_size: Option<usize>,
}

#[derive(Deserialize)]
pub struct WriteRequest {
    pub key: Option<String>,
    pub index: Option<i64>,
    pub value: Option<Value>,
}

async fn allocate(
    ctx: Arc<AppContext>,
    ns: SlotNamespace,
    body: AllocateRequest,
) -> Result<Json<Value>, ApiError> {
    let key = required(body.key, "key")?;
    let size = required(body.size, "size")?;
    ctx.registry.allocate(ns, &key, size).await?;
    ctx.metrics.inc_regions_created();
    Ok(Json(json!({
        "message": format!("{} region allocated for key {key} with size {size}", Namespace::from(ns)),
        "key": key,
        "size": size,
    })))
}

async fn release(
    ctx: Arc<AppContext>,
    ns: SlotNamespace,
    body: KeyRequest,
) -> Result<Json<Value>, ApiError> {
    let key = required(body.key, "key")?;
    ctx.registry.release(ns, &key).await?;
    ctx.metrics.inc_regions_released();
    Ok(Json(json!({
        "message": format!("{} region released for key {key}", Namespace::from(ns)),
        "key": key,
    })))
}

async fn check_bounds(
    ctx: Arc<AppContext>,
    ns: SlotNamespace,
    body: CheckBoundsRequest,
) -> Result<Json<Value>, ApiError> {
    let key = required(body.key, "key")?;
    let index = required(body.index, "index")?;
    let report = ctx.registry.check_bounds(ns, &key, index).await?;
    let in_bounds = report.verdict.is_in_bounds();
    let message = if in_bounds {
        format!("index {index} is within bounds for key {key}")
    } else {
        format!(
            "index {index} is out of bounds for key {key} with size {}",
            report.size
        )
    };
    Ok(Json(json!({
        "message": message,
        "key": key,
        "index": index,
        "size": report.size,
        "in_bounds": in_bounds,
    })))
}

async fn resize(
    ctx: Arc<AppContext>,
    ns: SlotNamespace,
    body: ResizeRequest,
) -> Result<Json<Value>, ApiError> {
    let key = required(body.key, "key")?;
    let new_size = required(body.new_size, "new_size")?;
    let outcome = ctx.registry.resize(ns, &key, new_size).await?;
    Ok(Json(json!({
        "message": format!(
            "{} region for key {key} resized from {} to {}",
            Namespace::from(ns),
            outcome.old_size,
            outcome.new_size
        ),
        "key": key,
        "old_size": outcome.old_size,
        "new_size": outcome.new_size,
    })))
}

async fn write(
    ctx: Arc<AppContext>,
    ns: SlotNamespace,
    body: WriteRequest,
) -> Result<Json<Value>, ApiError> {
    let key = required(body.key, "key")?;
    let index = required(body.index, "index")?;
    let value = required(body.value, "value")?;
    ctx.registry.write_slot(ns, &key, index, value).await?;
    Ok(Json(json!({
        "message": format!("value written at index {index} for key {key}"),
        "key": key,
        "index": index,
    })))
}

async fn content(
    ctx: Arc<AppContext>,
    ns: SlotNamespace,
    key: String,
) -> Result<Json<Value>, ApiError> {
    let snapshot = ctx.registry.slot_content(ns, &key).await?;
    Ok(Json(json!({ "key": key, "content": snapshot })))
}

macro_rules! slot_routes {
    ($mod_name:ident, $ns:expr) => {
        pub mod $mod_name {
            use super::*;

            pub async fn allocate(
                State(ctx): State<Arc<AppContext>>,
                Json(body): Json<AllocateRequest>,
            ) -> Result<Json<Value>, ApiError> {
                super::allocate(ctx, $ns, body).await
            }

            pub async fn release(
                State(ctx): State<Arc<AppContext>>,
                Json(body): Json<KeyRequest>,
            ) -> Result<Json<Value>, ApiError> {
                super::release(ctx, $ns, body).await
            }

            pub async fn check_bounds(
                State(ctx): State<Arc<AppContext>>,
                Json(body): Json<CheckBoundsRequest>,
            ) -> Result<Json<Value>, ApiError> {
                super::check_bounds(ctx, $ns, body).await
            }

            pub async fn resize(
                State(ctx): State<Arc<AppContext>>,
                Json(body): Json<ResizeRequest>,
            ) -> Result<Json<Value>, ApiError> {
                super::resize(ctx, $ns, body).await
            }

            pub async fn write(
                State(ctx): State<Arc<AppContext>>,
                Json(body): Json<WriteRequest>,
            ) -> Result<Json<Value>, ApiError> {
                super::write(ctx, $ns, body).await
            }

            pub async fn content(
                State(ctx): State<Arc<AppContext>>,
                Path(key): Path<String>,
            ) -> Result<Json<Value>, ApiError> {
                super::content(ctx, $ns, key).await
            }
        }
    };
}

slot_routes!(general, SlotNamespace::General);
slot_routes!(heap, SlotNamespace::Heap);
