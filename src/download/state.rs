//! Download state tracking.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::download::task::Outcome;

/// Counters shared by all concurrently running tasks of one run.
#[derive(Debug, Default)]
pub struct DownloadState {
    total: usize,
    downloaded: AtomicUsize,
    skipped: AtomicUsize,
    failed: AtomicUsize,
    settled: AtomicUsize,
}

impl DownloadState {
    /// Create state for a run of `total` tasks.
    pub fn new(total: usize) -> Self {
        Self {
            total,
            ..Default::default()
        }
    }

    /// Record a settled task. Returns how many tasks have settled so far,
    /// including this one.
    pub fn record(&self, outcome: &Outcome) -> usize {
        let counter = match outcome {
            Outcome::Downloaded => &self.downloaded,
            Outcome::Skipped => &self.skipped,
            Outcome::Failed(_) => &self.failed,
        };
        counter.fetch_add(1, Ordering::SeqCst);
        self.settled.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Number of tasks that have settled.
    pub fn settled(&self) -> usize {
        self.settled.load(Ordering::SeqCst)
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Snapshot the counters.
    pub fn summary(&self) -> Summary {
        Summary {
            total: self.total,
            downloaded: self.downloaded.load(Ordering::SeqCst),
            skipped: self.skipped.load(Ordering::SeqCst),
            failed: self.failed.load(Ordering::SeqCst),
            inline_written: 0,
        }
    }
}

/// Final statistics for a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    /// Number of download tasks dispatched.
    pub total: usize,
    pub downloaded: usize,
    pub skipped: usize,
    pub failed: usize,

    /// Inline lesson bodies written during the walk (not counted as tasks).
    pub inline_written: usize,
}

impl Summary {
    /// Tasks that ended with the file in place.
    pub fn succeeded(&self) -> usize {
        self.downloaded + self.skipped
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}
