// rest/routes/reclaim.rs — POST /api/v1/reclaim.
//
// External trigger hook. Idempotent: repeated calls only bump the run count;
// regions are only ever freed by an explicit release.

use axum::{extract::State, Json};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::AppContext;

pub async fn reclaim(State(ctx): State<Arc<AppContext>>) -> Json<Value> {
    let runs = ctx.registry.reclaim();
    Json(json!({
        "message": "reclaim executed",
        "runs": runs,
    }))
}
