use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const DEFAULT_PORT: u16 = 4310;
const DEFAULT_DEBOUNCE_MS: u64 = 300;

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

// ─── ServerConfig ─────────────────────────────────────────────────────────────

/// REST endpoint configuration (`[server]` in config.toml).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Port for the REST API (default: 4310).
    pub port: u16,
    /// Bind address (default: 127.0.0.1; use 0.0.0.0 for LAN access).
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            bind_address: default_bind_address(),
        }
    }
}

// ─── WatchConfig ─────────────────────────────────────────────────────────────

/// Reclaim trigger configuration (`[watch]` in config.toml).
///
/// When enabled, a debounced file watcher on `path` fires the registry's
/// `reclaim()` hook on every change batch. The hook itself frees nothing;
/// regions are only ever removed by an explicit release.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WatchConfig {
    /// Enable the watcher. Default: false.
    pub enabled: bool,
    /// Directory (or file) to watch. None disables the watcher even when
    /// `enabled` is set.
    pub path: Option<PathBuf>,
    /// Debounce window in milliseconds (default: 300).
    pub debounce_ms: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            path: None,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

// ─── DaemonConfig ────────────────────────────────────────────────────────────

/// Top-level daemon configuration.
///
/// Precedence: CLI flags > environment > config file > defaults. The CLI and
/// environment overrides are applied in `main.rs` after `load`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct DaemonConfig {
    pub server: ServerConfig,
    pub watch: WatchConfig,
}

impl DaemonConfig {
    /// Load configuration from a TOML file, or defaults when no path is given.
    ///
    /// A missing or malformed file is a startup error — the daemon refuses to
    /// run with a config it cannot read.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => {
                let raw = std::fs::read_to_string(p)
                    .with_context(|| format!("reading config file {}", p.display()))?;
                toml::from_str(&raw)
                    .with_context(|| format!("parsing config file {}", p.display()))
            }
            None => Ok(Self::default()),
        }
    }

    /// Socket address string for the REST listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.bind_address, self.server.port)
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
