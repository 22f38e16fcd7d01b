pub mod config;
pub mod metrics;
pub mod registry;
pub mod rest;
pub mod watcher;

use std::sync::Arc;

use config::DaemonConfig;
use metrics::{RegistryMetrics, SharedMetrics};
use registry::RegionRegistry;

/// Shared application state passed to every route handler.
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<DaemonConfig>,
    /// The four-namespace region registry. Single instance, lives from
    /// process start to process stop.
    pub registry: Arc<RegionRegistry>,
    /// In-process Prometheus-style metrics counters.
    pub metrics: SharedMetrics,
    pub started_at: std::time::Instant,
}

impl AppContext {
    pub fn new(config: DaemonConfig) -> Self {
        Self {
            config: Arc::new(config),
            registry: Arc::new(RegionRegistry::new()),
            metrics: Arc::new(RegistryMetrics::new()),
            started_at: std::time::Instant::now(),
        }
    }
}
