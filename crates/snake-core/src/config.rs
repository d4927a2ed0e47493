//! Configuration types for the simulation.

use crate::{Cell, Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Period of the stats clock that advances elapsed time
pub const DEFAULT_CLOCK_INTERVAL_MS: u64 = 100;

/// Field dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldConfig {
    /// Number of columns (x extent)
    pub cols: i32,
    /// Number of rows (y extent)
    pub rows: i32,
}

impl FieldConfig {
    pub fn new(cols: i32, rows: i32) -> Self {
        Self { cols, rows }
    }

    /// True iff `cell` lies inside the field
    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.y >= 0 && cell.x < self.cols && cell.y < self.rows
    }

    pub fn cell_count(&self) -> usize {
        (self.cols.max(0) as usize) * (self.rows.max(0) as usize)
    }
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self { cols: 51, rows: 51 }
    }
}

/// Mutable walk settings, edited between runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Field dimensions
    pub field: FieldConfig,
    /// Where every run begins
    pub start: Cell,
    /// Delay between steps (milliseconds)
    pub step_interval_ms: u64,
    /// Number of cells kept in the trail
    pub trail_length: usize,
    /// Refuse to step onto a cell still in the trail
    pub self_collision_check: bool,
    /// Treat the field as a torus
    pub wrap_around_edges: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            field: FieldConfig::default(),
            start: Cell::new(25, 25),
            step_interval_ms: 100,
            trail_length: 20,
            self_collision_check: false,
            wrap_around_edges: false,
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<()> {
        if self.field.cols <= 0 || self.field.rows <= 0 {
            return Err(Error::Validation(format!(
                "field must be at least 1x1, got {}x{}",
                self.field.cols, self.field.rows
            )));
        }
        if !self.field.contains(self.start) {
            return Err(Error::Validation(format!(
                "start {} lies outside the {}x{} field",
                self.start, self.field.cols, self.field.rows
            )));
        }
        if self.step_interval_ms == 0 {
            return Err(Error::Validation("step interval must be positive".to_string()));
        }
        if self.trail_length == 0 {
            return Err(Error::Validation("trail length must be at least 1".to_string()));
        }
        Ok(())
    }
}

/// Immutable snapshot of the settings, taken when a run starts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    pub field: FieldConfig,
    pub start: Cell,
    pub step_interval_ms: u64,
    pub trail_length: usize,
    pub self_collision_check: bool,
    pub wrap_around_edges: bool,
}

impl RunConfig {
    /// How long a vacated cell stays visible, so that the visible tail
    /// matches the trail length
    pub fn trail_fade_ms(&self) -> u64 {
        self.step_interval_ms * (self.trail_length.saturating_sub(1) as u64)
    }
}

impl From<&Settings> for RunConfig {
    fn from(settings: &Settings) -> Self {
        Self {
            field: settings.field,
            start: settings.start,
            step_interval_ms: settings.step_interval_ms,
            trail_length: settings.trail_length,
            self_collision_check: settings.self_collision_check,
            wrap_around_edges: settings.wrap_around_edges,
        }
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self::from(&Settings::default())
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Terminal application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Initial walk settings
    pub settings: Settings,
    /// Stats clock period (milliseconds)
    pub clock_interval_ms: u64,
    /// Random seed for reproducible walks; entropy when absent
    pub seed: Option<u64>,
    /// Draw the field to stdout
    pub render: bool,
    /// Log output format
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            settings: Settings::default(),
            clock_interval_ms: DEFAULT_CLOCK_INTERVAL_MS,
            seed: None,
            render: true,
            log_format: LogFormat::Pretty,
        }
    }
}

impl AppConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: AppConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn validate(&self) -> Result<()> {
        if self.clock_interval_ms == 0 {
            return Err(Error::Validation("clock interval must be positive".to_string()));
        }
        self.settings.validate()
    }
}
