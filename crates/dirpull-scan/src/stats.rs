//! Traversal statistics.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// Counters describing a traversal so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalkStats {
    /// Number of paths produced.
    pub files_produced: u64,
    /// Number of directories listed, the root included.
    pub dirs_entered: u64,
    /// Largest number of suspended parent cursors held at once.
    pub max_depth: usize,
    /// Time spent since the walker was created, frozen once it finishes.
    pub elapsed: Duration,
}

impl WalkStats {
    /// Calculate production rate in files per second.
    pub fn files_per_second(&self) -> f64 {
        if self.elapsed.as_secs_f64() > 0.0 {
            self.files_produced as f64 / self.elapsed.as_secs_f64()
        } else {
            0.0
        }
    }
}

/// Internal tracker that owns the clock.
#[derive(Debug)]
pub(crate) struct StatsTracker {
    start_time: Instant,
    finished: Option<Duration>,
    files_produced: u64,
    dirs_entered: u64,
    max_depth: usize,
}

impl StatsTracker {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            finished: None,
            files_produced: 0,
            dirs_entered: 1,
            max_depth: 0,
        }
    }

    pub fn record_file(&mut self) {
        self.files_produced += 1;
    }

    pub fn record_dir(&mut self, depth: usize) {
        self.dirs_entered += 1;
        self.max_depth = self.max_depth.max(depth);
    }

    pub fn finish(&mut self) {
        if self.finished.is_none() {
            self.finished = Some(self.start_time.elapsed());
        }
    }

    pub fn snapshot(&self) -> WalkStats {
        WalkStats {
            files_produced: self.files_produced,
            dirs_entered: self.dirs_entered,
            max_depth: self.max_depth,
            elapsed: self.finished.unwrap_or_else(|| self.start_time.elapsed()),
        }
    }
}
