// rest/routes/usage.rs — GET /api/v1/usage.

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::registry::UsageSummary;
use crate::AppContext;

/// Live keys and their current sizes/depths, per namespace.
pub async fn usage(State(ctx): State<Arc<AppContext>>) -> Json<UsageSummary> {
    Json(ctx.registry.summarize().await)
}
