//! Configuration file watcher for hot reload.

use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::load_config;
use crate::config::schema::SubnetConfig;
use crate::matching::SharedClassifier;
use crate::observability::metrics;

/// A watcher that monitors the configuration file for changes.
pub struct ConfigWatcher {
    path: PathBuf,
    update_tx: mpsc::UnboundedSender<SubnetConfig>,
}

impl ConfigWatcher {
    /// Create a new ConfigWatcher.
    ///
    /// Returns the watcher and a receiver for validated configuration updates.
    pub fn new(path: &Path) -> (Self, mpsc::UnboundedReceiver<SubnetConfig>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        (
            Self {
                path: path.to_path_buf(),
                update_tx,
            },
            update_rx,
        )
    }

    /// Re-read the file and forward it if it validates.
    ///
    /// Returns false when the file was rejected; the previous configuration
    /// stays in effect.
    pub fn reload(&self) -> bool {
        match load_config(&self.path) {
            Ok(new_config) => {
                let _ = self.update_tx.send(new_config);
                true
            }
            Err(e) => {
                metrics::record_reload(false);
                tracing::error!(
                    path = ?self.path,
                    "Failed to reload config: {}. Keeping current configuration.",
                    e
                );
                false
            }
        }
    }

    /// Start watching the file in a background thread.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let path = self.path.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if event.kind.is_modify() || event.kind.is_create() {
                        tracing::info!("Config file change detected, reloading...");
                        self.reload();
                    }
                }
                Err(e) => tracing::error!("Watch error: {:?}", e),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&path, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?path, "Config watcher started");
        Ok(watcher)
    }
}

/// Compile a reloaded configuration and swap it into `shared`.
///
/// Returns the new version, or `None` if compilation failed.
pub fn apply_config(shared: &SharedClassifier, config: &SubnetConfig) -> Option<u64> {
    match config.build_classifier() {
        Ok(classifier) => Some(shared.store(classifier)),
        Err(e) => {
            metrics::record_reload(false);
            tracing::error!(error = %e, "Reloaded subnets failed to compile");
            None
        }
    }
}
