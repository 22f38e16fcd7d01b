// watcher.rs — Debounced file watcher that fires the reclaim hook.

use anyhow::Result;
use notify_debouncer_full::{
    new_debouncer,
    notify::{RecursiveMode, Watcher},
    DebounceEventResult,
};
use std::{path::Path, time::Duration};
use tracing::warn;

pub type ReclaimWatcher = notify_debouncer_full::Debouncer<
    notify_debouncer_full::notify::RecommendedWatcher,
    notify_debouncer_full::FileIdMap,
>;

/// Starts a debounced file watcher on `path`. Every change batch triggers
/// `on_change` (in practice: the registry's reclaim hook).
///
/// The returned debouncer must be kept alive for the watcher to keep running.
pub fn start_watcher<F>(path: &Path, debounce: Duration, on_change: F) -> Result<ReclaimWatcher>
where
    F: Fn() + Send + 'static,
{
    let mut debouncer = new_debouncer(
        debounce,
        None,
        move |result: DebounceEventResult| match result {
            Ok(_events) => on_change(),
            Err(errors) => {
                for e in errors {
                    warn!(err = %e, "file watcher error");
                }
            }
        },
    )?;

    debouncer
        .watcher()
        .watch(path, RecursiveMode::Recursive)?;

    Ok(debouncer)
}
