//! Run statistics and the ranked history of finished runs.

use serde::{Deserialize, Serialize};

/// Maximum number of finished runs kept in the history
pub const HISTORY_CAPACITY: usize = 50;

/// Summary of one finished run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunRecord {
    /// Clock time the run lasted (milliseconds)
    pub elapsed_ms: u64,
    /// Successful steps before the walk got stuck
    pub step_count: u64,
}

/// Read-only view of the stats handed to observers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub elapsed_ms: u64,
    pub step_count: u64,
    pub history: Vec<RunRecord>,
    pub clock_running: bool,
}

impl StatsSnapshot {
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed_ms as f64 / 1000.0
    }
}

/// Counters for the current run plus the history of past runs
#[derive(Debug, Clone, Default)]
pub struct RunStats {
    elapsed_ms: u64,
    step_count: u64,
    history: Vec<RunRecord>,
    clock_running: bool,
}

impl RunStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    /// Finished runs, ascending by step count
    pub fn history(&self) -> &[RunRecord] {
        &self.history
    }

    pub fn is_clock_running(&self) -> bool {
        self.clock_running
    }

    pub fn add_step(&mut self) {
        self.step_count += 1;
    }

    pub fn start_clock(&mut self) {
        self.clock_running = true;
    }

    /// Advance elapsed time. Returns false (and changes nothing) while the
    /// clock is stopped.
    pub fn tick_clock(&mut self, delta_ms: u64) -> bool {
        if !self.clock_running {
            return false;
        }
        self.elapsed_ms += delta_ms;
        true
    }

    /// Store the current counters as a finished run.
    ///
    /// Returns the record together with its index in the history, or `None`
    /// when it ranked beyond the history capacity and was dropped.
    pub fn record_run(&mut self) -> (RunRecord, Option<usize>) {
        let record = RunRecord {
            elapsed_ms: self.elapsed_ms,
            step_count: self.step_count,
        };

        // Equal step counts keep their insertion order.
        let rank = self
            .history
            .partition_point(|r| r.step_count <= record.step_count);
        self.history.insert(rank, record);
        self.history.truncate(HISTORY_CAPACITY);

        (record, (rank < HISTORY_CAPACITY).then_some(rank))
    }

    /// Zero the counters and stop the clock; the history survives unless
    /// `clear_history` is set.
    pub fn reset_counters(&mut self, clear_history: bool) {
        self.clock_running = false;
        self.elapsed_ms = 0;
        self.step_count = 0;
        if clear_history {
            self.history.clear();
        }
    }

    /// Longest run in the history
    pub fn best_run(&self) -> Option<&RunRecord> {
        self.history.last()
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            elapsed_ms: self.elapsed_ms,
            step_count: self.step_count,
            history: self.history.clone(),
            clock_running: self.clock_running,
        }
    }
}
