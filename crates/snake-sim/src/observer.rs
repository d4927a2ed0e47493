//! Notifications from the controller to whatever draws the field.

use snake_core::{Cell, RunConfig, StatsSnapshot};

/// Receiver of controller state changes.
///
/// Per successful step: one deactivation (the vacated cell), one activation
/// (the new head), one stats change. Per (re)initialization:
/// `on_config_applied` first, which also means the whole surface is cleared,
/// then a stats change and the activation of the start cell.
pub trait Observer {
    fn on_cell_activated(&mut self, cell: Cell);

    fn on_cell_deactivated(&mut self, cell: Cell);

    /// Fired after every counter mutation: step, clock tick, run recorded,
    /// reset
    fn on_stats_changed(&mut self, stats: &StatsSnapshot);

    fn on_config_applied(&mut self, config: &RunConfig);
}

/// Observer that ignores everything, for headless runs
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl Observer for NoopObserver {
    fn on_cell_activated(&mut self, _cell: Cell) {}

    fn on_cell_deactivated(&mut self, _cell: Cell) {}

    fn on_stats_changed(&mut self, _stats: &StatsSnapshot) {}

    fn on_config_applied(&mut self, _config: &RunConfig) {}
}

impl<O: Observer + ?Sized> Observer for Box<O> {
    fn on_cell_activated(&mut self, cell: Cell) {
        (**self).on_cell_activated(cell)
    }

    fn on_cell_deactivated(&mut self, cell: Cell) {
        (**self).on_cell_deactivated(cell)
    }

    fn on_stats_changed(&mut self, stats: &StatsSnapshot) {
        (**self).on_stats_changed(stats)
    }

    fn on_config_applied(&mut self, config: &RunConfig) {
        (**self).on_config_applied(config)
    }
}
