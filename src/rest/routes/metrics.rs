// rest/routes/metrics.rs — GET /api/v1/metrics (Prometheus text format).

use axum::extract::State;
use std::sync::Arc;

use crate::AppContext;

pub async fn metrics(State(ctx): State<Arc<AppContext>>) -> String {
    let summary = ctx.registry.summarize().await;
    ctx.metrics.render_prometheus(
        summary.live_regions() as u64,
        ctx.registry.reclaim_runs(),
    )
}
