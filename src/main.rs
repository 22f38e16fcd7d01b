use anyhow::{Context as _, Result};
use clap::Parser;
use regiond::{config::DaemonConfig, rest, watcher, AppContext};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "regiond",
    about = "Region registry daemon — key-addressed memory regions over REST",
    version
)]
struct Args {
    /// REST API port
    #[arg(long, env = "REGIOND_PORT")]
    port: Option<u16>,

    /// Bind address (default: 127.0.0.1; use 0.0.0.0 for LAN access)
    #[arg(long, env = "REGIOND_BIND")]
    bind_address: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "REGIOND_LOG")]
    log: Option<String>,

    /// Write logs to this file path (rotated daily). Optional.
    #[arg(long, env = "REGIOND_LOG_FILE")]
    log_file: Option<PathBuf>,

    /// Path to a TOML config file
    #[arg(long, env = "REGIOND_CONFIG")]
    config: Option<PathBuf>,

    /// Directory to watch; changes trigger the reclaim hook
    #[arg(long, env = "REGIOND_WATCH_PATH")]
    watch_path: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.log.as_deref(), args.log_file.as_deref())?;

    let mut config = DaemonConfig::load(args.config.as_deref())?;
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(bind) = args.bind_address {
        config.server.bind_address = bind;
    }
    if let Some(path) = args.watch_path {
        config.watch.enabled = true;
        config.watch.path = Some(path);
    }

    let ctx = Arc::new(AppContext::new(config));

    // The debouncer stops watching when dropped, so it lives here for the
    // whole serve loop.
    let _watcher = start_reclaim_watcher(&ctx)?;

    rest::start_rest_server(ctx).await
}

fn start_reclaim_watcher(ctx: &Arc<AppContext>) -> Result<Option<watcher::ReclaimWatcher>> {
    if !ctx.config.watch.enabled {
        return Ok(None);
    }
    let Some(path) = ctx.config.watch.path.clone() else {
        return Ok(None);
    };

    let registry = ctx.registry.clone();
    let debounce = Duration::from_millis(ctx.config.watch.debounce_ms);
    let debouncer = watcher::start_watcher(&path, debounce, move || {
        registry.reclaim();
    })
    .with_context(|| format!("starting reclaim watcher on {}", path.display()))?;

    info!(path = %path.display(), "reclaim watcher started");
    Ok(Some(debouncer))
}

fn init_tracing(level: Option<&str>, log_file: Option<&Path>) -> Result<()> {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    match log_file {
        Some(path) => {
            let dir = path.parent().unwrap_or_else(|| Path::new("."));
            let file = path
                .file_name()
                .context("log file path has no file name")?;
            let appender = tracing_appender::rolling::daily(dir, file);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(appender)
                .with_ansi(false)
                .init();
        }
        None => {
            tracing_subscriber::fmt().with_env_filter(filter).init();
        }
    }
    Ok(())
}
