//! Configuration file watcher for hot reload.
//!
//! # Responsibilities
//! - Watch one config file for writes, re-creation and rename-over saves
//! - Reload it and forward fully valid configurations
//!
//! # Design Decisions
//! - A config with any broken visitor is dropped; the caller keeps the old one
//! - The parent directory is watched, not the file: a save that renames a
//!   new file over the config replaces the inode a file watch would follow

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::load_config;
use crate::config::schema::ClientConfig;

/// A watcher that monitors the configuration file for changes.
pub struct ConfigWatcher {
    path: PathBuf,
    update_tx: mpsc::UnboundedSender<ClientConfig>,
}

impl ConfigWatcher {
    /// Returns the watcher and a receiver for reloaded configurations.
    pub fn new(path: &Path) -> (Self, mpsc::UnboundedReceiver<ClientConfig>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        (
            Self {
                path: path.to_path_buf(),
                update_tx,
            },
            update_rx,
        )
    }

    /// Start watching the file in a background thread.
    ///
    /// Watching stops when the returned watcher is dropped.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let (watched, path) = watch_target(&self.path)?;
        let tx = self.update_tx;

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if let Some(config) = reload_on_event(&path, &event) {
                        let _ = tx.send(config);
                    }
                }
                Err(e) => tracing::error!(error = %e, "Watch error"),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&watched, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?self.path, dir = ?watched, "Config watcher started");
        Ok(watcher)
    }
}

/// Canonical parent directory of `path` and the config path inside it, in the
/// form the backends report in events.
fn watch_target(path: &Path) -> Result<(PathBuf, PathBuf), notify::Error> {
    let file_name = path
        .file_name()
        .ok_or_else(|| notify::Error::generic("config path has no file name"))?;
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let dir = fs::canonicalize(parent).map_err(notify::Error::io)?;
    let file = dir.join(file_name);
    Ok((dir, file))
}

/// Reload `path` if `event` is a write or create touching it.
fn reload_on_event(path: &Path, event: &Event) -> Option<ClientConfig> {
    if !(event.kind.is_modify() || event.kind.is_create()) {
        return None;
    }
    // Some backends report no paths; treat that as ours.
    if !event.paths.is_empty() && !event.paths.iter().any(|p| p == path) {
        return None;
    }

    tracing::info!(path = ?path, "Config file change detected, reloading...");
    match load_config(path) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::error!(
                path = ?path,
                error = %e,
                "Failed to reload config. Keeping current configuration."
            );
            None
        }
    }
}
