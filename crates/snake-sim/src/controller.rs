//! Run lifecycle: start a run, step it, record it when stuck, start again.

use crate::observer::Observer;
use crate::planner;
use crate::rng::RandomSource;
use crate::trail::TrailLog;
use snake_core::{Cell, RunConfig, RunId, RunRecord, RunStats, SettingsStore};
use tracing::{info, instrument, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationState {
    /// Between runs, while the next one is being set up
    Idle,
    Running,
}

/// What a call to [`SimulationController::tick`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The controller was idle
    Skipped,
    Moved { from: Cell, to: Cell },
    /// No legal move was left; the run was recorded and a new one started.
    /// `rank` is the record's index in the history, if it was kept.
    RunFinished { record: RunRecord, rank: Option<usize> },
}

pub struct SimulationController<O: Observer> {
    state: SimulationState,
    config: RunConfig,
    position: Cell,
    trail: TrailLog,
    stats: RunStats,
    rng: RandomSource,
    observer: O,
    run_id: RunId,
    runs_finished: u64,
}

impl<O: Observer> SimulationController<O> {
    /// Create an idle controller; call [`initialize`](Self::initialize) to
    /// start the first run.
    pub fn new(settings: &SettingsStore, rng: RandomSource, observer: O) -> Self {
        let config = settings.snapshot();
        let position = config.start;

        Self {
            state: SimulationState::Idle,
            config,
            position,
            trail: TrailLog::new(position),
            stats: RunStats::new(),
            rng,
            observer,
            run_id: RunId::new(),
            runs_finished: 0,
        }
    }

    /// Start a new run from the current settings.
    #[instrument(skip(self, settings))]
    pub fn initialize(&mut self, settings: &SettingsStore, clear_history: bool) {
        self.state = SimulationState::Idle;

        self.config = settings.snapshot();
        self.run_id = RunId::new();
        self.observer.on_config_applied(&self.config);

        self.position = self.config.start;
        self.trail = TrailLog::new(self.position);
        self.stats.reset_counters(clear_history);
        if clear_history {
            self.runs_finished = 0;
        }
        self.notify_stats();
        self.observer.on_cell_activated(self.position);

        self.stats.start_clock();
        self.state = SimulationState::Running;

        info!(
            event = "run_started",
            run_id = %self.run_id,
            cols = self.config.field.cols,
            rows = self.config.field.rows,
            start = %self.config.start,
            step_interval_ms = self.config.step_interval_ms,
            trail_length = self.config.trail_length,
            self_collision_check = self.config.self_collision_check,
            wrap_around_edges = self.config.wrap_around_edges,
            "Run started"
        );
    }

    /// Manual restart: new run with an empty history
    pub fn restart(&mut self, settings: &SettingsStore) {
        self.initialize(settings, true);
    }

    /// Advance the walk by at most one cell.
    pub fn tick(&mut self, settings: &SettingsStore) -> TickOutcome {
        if self.state == SimulationState::Idle {
            return TickOutcome::Skipped;
        }

        match planner::plan(self.position, &self.config, &self.trail, &mut self.rng) {
            Some(next) => {
                let previous = self.position;
                self.position = next;
                self.trail.push(next, self.config.trail_length);
                self.stats.add_step();

                self.observer.on_cell_deactivated(previous);
                self.observer.on_cell_activated(next);
                self.notify_stats();

                trace!(run_id = %self.run_id, from = %previous, to = %next, "Step");
                TickOutcome::Moved {
                    from: previous,
                    to: next,
                }
            }
            None => {
                let (record, rank) = self.stats.record_run();
                self.runs_finished += 1;
                self.notify_stats();

                info!(
                    event = "run_finished",
                    run_id = %self.run_id,
                    steps = record.step_count,
                    elapsed_ms = record.elapsed_ms,
                    rank = ?rank.map(|r| r + 1),
                    runs_finished = self.runs_finished,
                    position = %self.position,
                    "Walk is stuck, run recorded"
                );

                self.initialize(settings, false);
                TickOutcome::RunFinished { record, rank }
            }
        }
    }

    /// Advance the stats clock. Returns false while the clock is stopped.
    pub fn tick_clock(&mut self, delta_ms: u64) -> bool {
        let advanced = self.stats.tick_clock(delta_ms);
        if advanced {
            self.notify_stats();
        }
        advanced
    }

    pub fn state(&self) -> SimulationState {
        self.state
    }

    pub fn position(&self) -> Cell {
        self.position
    }

    pub fn trail(&self) -> &TrailLog {
        &self.trail
    }

    /// Configuration of the current run
    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    pub fn run_id(&self) -> RunId {
        self.run_id
    }

    /// Runs finished since the history was last cleared
    pub fn runs_finished(&self) -> u64 {
        self.runs_finished
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    fn notify_stats(&mut self) {
        let snapshot = self.stats.snapshot();
        self.observer.on_stats_changed(&snapshot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::NoopObserver;
    use snake_core::{FieldConfig, Settings};

    fn settings(cols: i32, rows: i32, start: Cell) -> SettingsStore {
        SettingsStore::new(Settings {
            field: FieldConfig::new(cols, rows),
            start,
            ..Settings::default()
        })
        .unwrap()
    }

    #[test]
    fn test_controller_starts_idle() {
        let settings = settings(5, 5, Cell::new(2, 2));
        let mut controller =
            SimulationController::new(&settings, RandomSource::seeded(1), NoopObserver);
        assert_eq!(controller.state(), SimulationState::Idle);
        assert_eq!(controller.tick(&settings), TickOutcome::Skipped);
        assert_eq!(controller.stats().step_count(), 0);
        assert!(!controller.tick_clock(100));
    }

    #[test]
    fn test_initialize_seeds_run() {
        let settings = settings(5, 5, Cell::new(2, 2));
        let mut controller =
            SimulationController::new(&settings, RandomSource::seeded(1), NoopObserver);
        controller.initialize(&settings, true);

        assert_eq!(controller.state(), SimulationState::Running);
        assert_eq!(controller.position(), Cell::new(2, 2));
        assert_eq!(controller.trail().len(), 1);
        assert!(controller.stats().is_clock_running());
        assert!(controller.tick_clock(100));
        assert_eq!(controller.stats().elapsed_ms(), 100);
    }

    #[test]
    fn test_tick_moves_to_neighbour() {
        let settings = settings(5, 5, Cell::new(2, 2));
        let mut controller =
            SimulationController::new(&settings, RandomSource::seeded(5), NoopObserver);
        controller.initialize(&settings, true);

        match controller.tick(&settings) {
            TickOutcome::Moved { from, to } => {
                assert_eq!(from, Cell::new(2, 2));
                assert_eq!((to.x - from.x).abs() + (to.y - from.y).abs(), 1);
                assert_eq!(controller.position(), to);
                assert_eq!(controller.trail().head(), Some(to));
            }
            other => panic!("expected a move, got {:?}", other),
        }
        assert_eq!(controller.stats().step_count(), 1);
    }

    #[test]
    fn test_run_id_changes_per_run() {
        let settings = settings(5, 5, Cell::new(2, 2));
        let mut controller =
            SimulationController::new(&settings, RandomSource::seeded(5), NoopObserver);
        controller.initialize(&settings, true);
        let first = controller.run_id();
        controller.restart(&settings);
        assert_ne!(first, controller.run_id());
    }
}
