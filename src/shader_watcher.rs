//! Shader hot reload watcher
//!
//! Watches the background shader file for changes and reports them to the
//! render loop. Uses debouncing to avoid multiple reloads during rapid saves
//! from editors.

use anyhow::{Context, Result};
use notify::{Config, Event, PollWatcher, RecursiveMode, Watcher};
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::mpsc::{Receiver, channel};
use std::time::{Duration, Instant};

/// How often the poll watcher scans the shader directory
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Event indicating the shader file has changed and needs reloading
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderReloadEvent {
    /// Path to the shader file
    pub path: PathBuf,
}

/// Manages file watching for shader hot reload
pub struct ShaderWatcher {
    /// The file system watcher
    _watcher: PollWatcher,
    /// Receiver for file change events
    event_receiver: Receiver<ShaderReloadEvent>,
    /// Canonical path of the watched shader
    path: PathBuf,
    /// Debounce delay in milliseconds
    debounce_delay_ms: u64,
}

impl std::fmt::Debug for ShaderWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShaderWatcher")
            .field("path", &self.path)
            .field("debounce_delay_ms", &self.debounce_delay_ms)
            .finish_non_exhaustive()
    }
}

/// Returns true when an event at `now` falls outside the debounce window.
fn debounce_allows(last: &mut Option<Instant>, now: Instant, delay: Duration) -> bool {
    match *last {
        Some(previous) if now.duration_since(previous) < delay => false,
        _ => {
            *last = Some(now);
            true
        }
    }
}

impl ShaderWatcher {
    /// Create a new shader watcher
    ///
    /// # Arguments
    /// * `shader_path` - Path to the shader file
    /// * `debounce_delay_ms` - Debounce delay in milliseconds
    pub fn new(shader_path: &Path, debounce_delay_ms: u64) -> Result<Self> {
        if !shader_path.exists() {
            anyhow::bail!("Shader file not found: {}", shader_path.display());
        }

        let canonical = shader_path
            .canonicalize()
            .unwrap_or_else(|_| shader_path.to_path_buf());
        let filename = canonical
            .file_name()
            .map(|f| f.to_os_string())
            .with_context(|| format!("Shader path has no file name: {}", canonical.display()))?;
        // Watch the parent directory: many editors save atomically (write temp + rename)
        let dir = canonical
            .parent()
            .map(Path::to_path_buf)
            .with_context(|| format!("Shader path has no parent: {}", canonical.display()))?;

        log::info!(
            "Shader hot reload: watching {} (debounce {}ms)",
            canonical.display(),
            debounce_delay_ms
        );

        let (tx, rx) = channel();
        let debounce_state: Arc<Mutex<Option<Instant>>> = Arc::new(Mutex::new(None));
        let debounce_delay = Duration::from_millis(debounce_delay_ms);
        let event_path = canonical.clone();

        let mut watcher = PollWatcher::new(
            move |result: std::result::Result<Event, notify::Error>| {
                let event = match result {
                    Ok(event) => event,
                    Err(e) => {
                        log::warn!("Shader watcher error: {}", e);
                        return;
                    }
                };

                log::debug!(
                    "File system event: {:?} for paths: {:?}",
                    event.kind,
                    event.paths
                );

                if !matches!(
                    event.kind,
                    notify::EventKind::Modify(_)
                        | notify::EventKind::Create(_)
                        | notify::EventKind::Remove(_)
                ) {
                    log::trace!("Ignoring event kind: {:?}", event.kind);
                    return;
                }

                // Match by filename (handles atomic saves where path changes)
                if !event
                    .paths
                    .iter()
                    .any(|p| p.file_name() == Some(filename.as_os_str()))
                {
                    return;
                }

                let should_send =
                    debounce_allows(&mut debounce_state.lock(), Instant::now(), debounce_delay);
                if !should_send {
                    log::trace!("Debouncing shader reload for {}", event_path.display());
                    return;
                }

                log::info!("Shader file changed: {}", event_path.display());
                if let Err(e) = tx.send(ShaderReloadEvent {
                    path: event_path.clone(),
                }) {
                    log::error!("Failed to send shader reload event: {}", e);
                }
            },
            Config::default().with_poll_interval(POLL_INTERVAL),
        )
        .context("Failed to create file watcher")?;

        watcher
            .watch(&dir, RecursiveMode::NonRecursive)
            .with_context(|| format!("Failed to watch shader directory: {}", dir.display()))?;
        log::debug!("Watching directory for shader changes: {}", dir.display());

        Ok(Self {
            _watcher: watcher,
            event_receiver: rx,
            path: canonical,
            debounce_delay_ms,
        })
    }

    /// Check for pending shader reload events (non-blocking)
    ///
    /// Several queued events collapse into one; the reload reads the file
    /// fresh either way.
    pub fn try_recv(&self) -> Option<ShaderReloadEvent> {
        let mut latest = None;
        while let Ok(event) = self.event_receiver.try_recv() {
            latest = Some(event);
        }
        latest
    }

    /// Canonical path of the watched shader
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the debounce delay in milliseconds
    pub fn debounce_delay_ms(&self) -> u64 {
        self.debounce_delay_ms
    }
}
