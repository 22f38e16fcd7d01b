//! Simple in-process counters exposed as `GET /api/v1/metrics` in Prometheus
//! text format. No external library needed — all counters are `AtomicU64`
//! incremented inline.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// In-process performance counters shared across all requests.
#[derive(Debug)]
pub struct RegistryMetrics {
    /// Total HTTP requests dispatched since daemon start.
    pub http_requests_total: AtomicU64,
    /// Total regions created (all namespaces) since daemon start.
    pub regions_created_total: AtomicU64,
    /// Total regions released (all namespaces) since daemon start.
    pub regions_released_total: AtomicU64,
    /// Total successful stack pushes since daemon start.
    pub stack_pushes_total: AtomicU64,
    /// Total successful stack pops since daemon start.
    pub stack_pops_total: AtomicU64,
    /// Daemon start time — used to calculate uptime in the metrics response.
    pub started_at: Instant,
}

impl RegistryMetrics {
    pub fn new() -> Self {
        Self {
            http_requests_total: AtomicU64::new(0),
            regions_created_total: AtomicU64::new(0),
            regions_released_total: AtomicU64::new(0),
            stack_pushes_total: AtomicU64::new(0),
            stack_pops_total: AtomicU64::new(0),
            started_at: Instant::now(),
        }
    }

    pub fn inc_http_requests(&self) {
        self.http_requests_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_regions_created(&self) {
        self.regions_created_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_regions_released(&self) {
        self.regions_released_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_stack_pushes(&self) {
        self.stack_pushes_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_stack_pops(&self) {
        self.stack_pops_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Render counters in Prometheus text format.
    ///
    /// Live region count and reclaim runs are passed in because they live on
    /// the registry (the former requires the namespace locks).
    pub fn render_prometheus(&self, live_regions: u64, reclaim_runs: u64) -> String {
        let uptime = self.started_at.elapsed().as_secs();
        let http_requests = self.http_requests_total.load(Ordering::Relaxed);
        let regions_created = self.regions_created_total.load(Ordering::Relaxed);
        let regions_released = self.regions_released_total.load(Ordering::Relaxed);
        let stack_pushes = self.stack_pushes_total.load(Ordering::Relaxed);
        let stack_pops = self.stack_pops_total.load(Ordering::Relaxed);

        format!(
            "# HELP regiond_uptime_seconds Daemon uptime in seconds.\n\
             # TYPE regiond_uptime_seconds gauge\n\
             regiond_uptime_seconds {uptime}\n\
             # HELP regiond_live_regions Current number of live regions across all namespaces.\n\
             # TYPE regiond_live_regions gauge\n\
             regiond_live_regions {live_regions}\n\
             # HELP regiond_http_requests_total Total HTTP requests dispatched since daemon start.\n\
             # TYPE regiond_http_requests_total counter\n\
             regiond_http_requests_total {http_requests}\n\
             # HELP regiond_regions_created_total Total regions created since daemon start.\n\
             # TYPE regiond_regions_created_total counter\n\
             regiond_regions_created_total {regions_created}\n\
             # HELP regiond_regions_released_total Total regions released since daemon start.\n\
             # TYPE regiond_regions_released_total counter\n\
             regiond_regions_released_total {regions_released}\n\
             # HELP regiond_stack_pushes_total Total successful stack pushes since daemon start.\n\
             # TYPE regiond_stack_pushes_total counter\n\
             regiond_stack_pushes_total {stack_pushes}\n\
             # HELP regiond_stack_pops_total Total successful stack pops since daemon start.\n\
             # TYPE regiond_stack_pops_total counter\n\
             regiond_stack_pops_total {stack_pops}\n\
             # HELP regiond_reclaim_runs_total Total reclaim hook invocations since daemon start.\n\
             # TYPE regiond_reclaim_runs_total counter\n\
             regiond_reclaim_runs_total {reclaim_runs}\n"
        )
    }
}

impl Default for RegistryMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared handle — cheaply clonable.
pub type SharedMetrics = Arc<RegistryMetrics>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_start_at_zero_and_increment() {
        let metrics = RegistryMetrics::new();
        metrics.inc_regions_created();
        metrics.inc_regions_created();
        metrics.inc_stack_pushes();

        let rendered = metrics.render_prometheus(3, 1);
        assert!(rendered.contains("regiond_regions_created_total 2"));
        assert!(rendered.contains("regiond_stack_pushes_total 1"));
        assert!(rendered.contains("regiond_stack_pops_total 0"));
        assert!(rendered.contains("regiond_live_regions 3"));
        assert!(rendered.contains("regiond_reclaim_runs_total 1"));
    }
}
