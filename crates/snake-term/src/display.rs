//! Text rendering of the field and the run log.

use crossterm::{
    cursor::MoveTo,
    queue,
    style::Print,
    terminal::{BeginSynchronizedUpdate, Clear, ClearType, EndSynchronizedUpdate},
};
use snake_core::{Cell, RunConfig, StatsSnapshot};
use snake_sim::Observer;
use std::collections::{HashMap, VecDeque};
use std::fmt::Write as _;
use std::io::{self, Write};

/// Observer that keeps just enough state to draw the field as text.
///
/// Vacated cells are not blanked at once: they fade out over the next
/// `trail_length - 1` activations, the same span as `trail_fade_ms`.
pub struct TerminalObserver {
    enabled: bool,
    dirty: bool,
    config: Option<RunConfig>,
    head: Option<Cell>,
    lit: VecDeque<Cell>,
    stats: Option<StatsSnapshot>,
}

impl TerminalObserver {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            dirty: false,
            config: None,
            head: None,
            lit: VecDeque::new(),
            stats: None,
        }
    }

    /// Draw the current frame if anything changed since the last one.
    pub fn present<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        if !self.enabled || !self.dirty {
            return Ok(());
        }
        queue!(
            out,
            BeginSynchronizedUpdate,
            Clear(ClearType::All),
            MoveTo(0, 0),
            Print(self.render_frame()),
            EndSynchronizedUpdate
        )?;
        out.flush()?;
        self.dirty = false;
        Ok(())
    }

    pub fn render_frame(&self) -> String {
        let mut frame = String::new();
        if let Some(config) = &self.config {
            frame.push_str(&self.render_field(config));
            frame.push_str(&render_config(config));
        }
        if let Some(stats) = &self.stats {
            frame.push_str(&render_stats(stats));
        }
        frame
    }

    fn render_field(&self, config: &RunConfig) -> String {
        // later activations overwrite earlier ones, so each cell keeps its
        // youngest age
        let newest = self.lit.len().saturating_sub(1);
        let ages: HashMap<Cell, usize> = self
            .lit
            .iter()
            .enumerate()
            .map(|(i, cell)| (*cell, newest - i))
            .collect();

        // one extra byte per row for the newline
        let mut field =
            String::with_capacity(config.field.cell_count() + config.field.rows as usize);
        for y in 0..config.field.rows {
            for x in 0..config.field.cols {
                let cell = Cell::new(x, y);
                let glyph = if self.head == Some(cell) {
                    '@'
                } else {
                    match ages.get(&cell) {
                        Some(age) => fade_glyph(*age, config.trail_length),
                        None => '.',
                    }
                };
                field.push(glyph);
            }
            field.push('\n');
        }
        field
    }
}

fn fade_glyph(age: usize, trail_length: usize) -> char {
    match age * 3 / trail_length.max(1) {
        0 => 'O',
        1 => 'o',
        _ => ':',
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag {
        "on"
    } else {
        "off"
    }
}

fn render_config(config: &RunConfig) -> String {
    format!(
        "\nField {}x{} | start {} | step {}ms | trail {} (fades over {}ms) | collision {} | wrap {}\n",
        config.field.cols,
        config.field.rows,
        config.start,
        config.step_interval_ms,
        config.trail_length,
        config.trail_fade_ms(),
        on_off(config.self_collision_check),
        on_off(config.wrap_around_edges),
    )
}

fn render_stats(stats: &StatsSnapshot) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Time: {} sec", stats.elapsed_secs());
    let _ = writeln!(out, "Steps: {}", stats.step_count);
    let _ = writeln!(out, "\nLog");
    let _ = writeln!(out, "{:>5} {:>10} {:>8}", "index", "time", "steps");
    for (index, record) in stats.history.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>5} {:>10} {:>8}",
            index + 1,
            record.elapsed_ms,
            record.step_count
        );
    }
    out
}

impl Observer for TerminalObserver {
    fn on_cell_activated(&mut self, cell: Cell) {
        self.head = Some(cell);
        self.lit.push_back(cell);
        let capacity = self.config.as_ref().map_or(1, |c| c.trail_length);
        while self.lit.len() > capacity {
            self.lit.pop_front();
        }
        self.dirty = true;
    }

    fn on_cell_deactivated(&mut self, cell: Cell) {
        if self.head == Some(cell) {
            self.head = None;
        }
        self.dirty = true;
    }

    fn on_stats_changed(&mut self, stats: &StatsSnapshot) {
        self.stats = Some(stats.clone());
        self.dirty = true;
    }

    fn on_config_applied(&mut self, config: &RunConfig) {
        self.config = Some(config.clone());
        self.head = None;
        self.lit.clear();
        self.dirty = true;
    }
}
