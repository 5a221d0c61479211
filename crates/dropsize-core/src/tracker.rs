//! Recompute-on-change tracking for terminal height.
//!
//! A terminal-size provider reports row counts as they change; the tracker
//! recomputes the [`SizingResult`] only when the row count actually moves.
//! [`spawn_window_size_watcher`] wires the same logic between two
//! `tokio::sync::watch` channels for hosts with an async event loop.

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::sizing::{SizingPolicy, SizingResult};

/// Holds the latest sizing for a live terminal height.
#[derive(Debug, Clone)]
pub struct WindowSizeTracker {
    policy: SizingPolicy,
    rows: i32,
    current: SizingResult,
}

impl WindowSizeTracker {
    /// Create a tracker and compute the initial result.
    pub fn new(policy: SizingPolicy, rows: i32) -> Self {
        Self {
            policy,
            rows,
            current: policy.compute(rows),
        }
    }

    /// Feed a new row count.
    ///
    /// Returns the recomputed result, or `None` if the row count is unchanged.
    pub fn update(&mut self, rows: i32) -> Option<SizingResult> {
        if rows == self.rows {
            return None;
        }
        self.rows = rows;
        self.current = self.policy.compute(rows);
        debug!(
            rows,
            window_size = self.current.window_size,
            compact = self.current.is_compact_mode,
            "recomputed completion window size"
        );
        Some(self.current)
    }

    /// Replace the policy and recompute for the current row count.
    pub fn set_policy(&mut self, policy: SizingPolicy) -> SizingResult {
        self.policy = policy;
        self.current = policy.compute(self.rows);
        self.current
    }

    /// Latest result.
    pub fn current(&self) -> SizingResult {
        self.current
    }

    /// Last row count seen.
    pub fn rows(&self) -> i32 {
        self.rows
    }

    /// Policy in use.
    pub fn policy(&self) -> &SizingPolicy {
        &self.policy
    }
}

/// Spawn a task that republishes sizing whenever `rows_rx` changes.
///
/// The returned receiver only observes a change when the result value differs
/// from the previous one. The task exits once the row sender is dropped or
/// every result receiver is gone. Must be called inside a tokio runtime.
pub fn spawn_window_size_watcher(
    policy: SizingPolicy,
    mut rows_rx: watch::Receiver<u16>,
) -> (watch::Receiver<SizingResult>, JoinHandle<()>) {
    let initial = *rows_rx.borrow_and_update();
    let mut tracker = WindowSizeTracker::new(policy, i32::from(initial));
    let (result_tx, result_rx) = watch::channel(tracker.current());

    let handle = tokio::spawn(async move {
        loop {
            tokio::select! {
                changed = rows_rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let rows = *rows_rx.borrow_and_update();
                    if let Some(result) = tracker.update(i32::from(rows)) {
                        result_tx.send_if_modified(|published| {
                            if *published == result {
                                false
                            } else {
                                *published = result;
                                true
                            }
                        });
                    }
                }
                () = result_tx.closed() => break,
            }
        }
        debug!("window size watcher stopped");
    });

    (result_rx, handle)
}
