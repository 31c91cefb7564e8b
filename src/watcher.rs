//! File watcher for save-triggered rebuilds
//!
//! Implements the watch loop:
//! - Non-recursive watch on the target's parent directory
//! - Write-close (`IN_CLOSE_WRITE`) matching against the target path
//! - One synchronous command invocation per matching event, no debouncing
//! - Graceful Ctrl+C shutdown via a shared running flag
//! - NDJSON output for CI

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Receiver, RecvTimeoutError};
use std::sync::Arc;
use std::time::Duration;

use notify::event::{AccessKind, AccessMode};
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

use crate::command::BuildCommand;
use crate::error::{OnsaveError, OnsaveResult};

/// Interval at which the shutdown flag is polled while waiting for events
const POLL_INTERVAL_MS: u64 = 50;

/// Watch options
#[derive(Debug, Clone)]
pub struct WatchOptions {
    /// Absolute path of the file whose saves trigger the command
    pub target: PathBuf,
    /// Directory the watch registers on and the command runs in
    pub watch_dir: PathBuf,
    /// Command run on each save
    pub command: BuildCommand,
}

impl WatchOptions {
    /// Build options from a possibly-relative target path and a command
    /// string.
    ///
    /// The parent directory is canonicalized so that notification paths
    /// compare equal to the target. The file itself does not have to exist
    /// yet; its directory does.
    pub fn resolve(file: &Path, command: &str) -> OnsaveResult<Self> {
        let command = BuildCommand::parse(command)?;

        let absolute = if file.is_absolute() {
            file.to_path_buf()
        } else {
            std::env::current_dir()?.join(file)
        };

        let file_name = absolute
            .file_name()
            .ok_or_else(|| OnsaveError::InvalidTarget {
                path: absolute.clone(),
            })?
            .to_os_string();

        let parent = absolute.parent().ok_or_else(|| OnsaveError::InvalidTarget {
            path: absolute.clone(),
        })?;
        let watch_dir = parent
            .canonicalize()
            .map_err(|_| OnsaveError::WatchRootMissing {
                path: parent.to_path_buf(),
            })?;

        Ok(Self {
            target: watch_dir.join(file_name),
            watch_dir,
            command,
        })
    }
}

/// Watch event types for terminal and NDJSON output
#[derive(Debug, Clone)]
pub enum WatchEvent {
    Started { target: String },
    Modified { path: String },
    Shutdown,
}

impl WatchEvent {
    pub fn to_json(&self) -> String {
        let value = match self {
            WatchEvent::Started { target } => {
                serde_json::json!({"event": "started", "target": target})
            }
            WatchEvent::Modified { path } => {
                serde_json::json!({"event": "modified", "path": path})
            }
            WatchEvent::Shutdown => serde_json::json!({"event": "shutdown"}),
        };
        value.to_string()
    }
}

/// Start watching for saves (blocking).
///
/// Blocks until `running` is cleared or the notification channel
/// disconnects, then emits `Shutdown` and returns. Every write-close
/// notification for the target runs the command once, synchronously, in the
/// target's directory.
pub fn watch(
    options: WatchOptions,
    running: Arc<AtomicBool>,
    on_event: impl Fn(WatchEvent),
) -> OnsaveResult<()> {
    let (tx, rx) = channel();

    let mut watcher = RecommendedWatcher::new(
        move |res: Result<Event, notify::Error>| {
            if let Ok(event) = res {
                let _ = tx.send(event);
            }
        },
        Config::default(),
    )?;

    watcher.watch(&options.watch_dir, RecursiveMode::NonRecursive)?;

    on_event(WatchEvent::Started {
        target: options.target.display().to_string(),
    });

    event_loop(rx, &options, &running, &on_event)
}

/// Core loop, separated from watcher registration so tests can feed
/// synthetic events through the channel.
fn event_loop(
    rx: Receiver<Event>,
    options: &WatchOptions,
    running: &AtomicBool,
    on_event: &impl Fn(WatchEvent),
) -> OnsaveResult<()> {
    while running.load(Ordering::SeqCst) {
        match rx.recv_timeout(Duration::from_millis(POLL_INTERVAL_MS)) {
            Ok(event) => {
                if is_write_close(&event.kind) && event.paths.iter().any(|p| p == &options.target) {
                    on_event(WatchEvent::Modified {
                        path: options.target.display().to_string(),
                    });
                    options.command.run(&options.watch_dir)?;
                }
            }
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    on_event(WatchEvent::Shutdown);
    Ok(())
}

/// True for "write stream closed" notifications (inotify `IN_CLOSE_WRITE`).
fn is_write_close(kind: &EventKind) -> bool {
    matches!(kind, EventKind::Access(AccessKind::Close(AccessMode::Write)))
}
