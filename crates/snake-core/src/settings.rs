//! Mutable settings surface.
//!
//! The store only ever holds valid settings: every setter checks its input
//! and leaves the previous value in place when the input is rejected.

use crate::{Cell, Error, Result, RunConfig, Settings};
use tracing::debug;

/// Owned holder of the current walk settings
#[derive(Debug, Clone, Default)]
pub struct SettingsStore {
    settings: Settings,
}

impl SettingsStore {
    pub fn new(settings: Settings) -> Result<Self> {
        settings.validate()?;
        Ok(Self { settings })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Snapshot used for the next run
    pub fn snapshot(&self) -> RunConfig {
        RunConfig::from(&self.settings)
    }

    pub fn set_cols(&mut self, cols: i32) -> Result<()> {
        if cols <= 0 {
            return Err(Error::Validation(format!("cols must be positive, got {}", cols)));
        }
        self.settings.field.cols = cols;
        self.clamp_start();
        Ok(())
    }

    pub fn set_rows(&mut self, rows: i32) -> Result<()> {
        if rows <= 0 {
            return Err(Error::Validation(format!("rows must be positive, got {}", rows)));
        }
        self.settings.field.rows = rows;
        self.clamp_start();
        Ok(())
    }

    pub fn set_start(&mut self, start: Cell) -> Result<()> {
        if !self.settings.field.contains(start) {
            return Err(Error::Validation(format!(
                "start {} lies outside the {}x{} field",
                start, self.settings.field.cols, self.settings.field.rows
            )));
        }
        self.settings.start = start;
        Ok(())
    }

    pub fn set_step_interval_ms(&mut self, interval_ms: u64) -> Result<()> {
        if interval_ms == 0 {
            return Err(Error::Validation("step interval must be positive".to_string()));
        }
        self.settings.step_interval_ms = interval_ms;
        Ok(())
    }

    pub fn set_trail_length(&mut self, length: usize) -> Result<()> {
        if length == 0 {
            return Err(Error::Validation("trail length must be at least 1".to_string()));
        }
        self.settings.trail_length = length;
        Ok(())
    }

    pub fn set_self_collision_check(&mut self, enabled: bool) {
        self.settings.self_collision_check = enabled;
    }

    pub fn set_wrap_around_edges(&mut self, enabled: bool) {
        self.settings.wrap_around_edges = enabled;
    }

    /// Apply a parsed command to the store
    pub fn apply(&mut self, command: SettingsCommand) -> Result<()> {
        match command {
            SettingsCommand::Cols(cols) => self.set_cols(cols),
            SettingsCommand::Rows(rows) => self.set_rows(rows),
            SettingsCommand::Start(start) => self.set_start(start),
            SettingsCommand::StepInterval(ms) => self.set_step_interval_ms(ms),
            SettingsCommand::TrailLength(length) => self.set_trail_length(length),
            SettingsCommand::SelfCollision(enabled) => {
                self.set_self_collision_check(enabled);
                Ok(())
            }
            SettingsCommand::WrapAround(enabled) => {
                self.set_wrap_around_edges(enabled);
                Ok(())
            }
        }
    }

    // Keep the start position inside the field after it shrinks.
    fn clamp_start(&mut self) {
        let field = self.settings.field;
        let start = self.settings.start;
        let clamped = Cell::new(start.x.min(field.cols - 1), start.y.min(field.rows - 1));
        if clamped != start {
            debug!(from = %start, to = %clamped, "Clamped start position into shrunken field");
            self.settings.start = clamped;
        }
    }
}

/// One edit to the settings, as typed by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsCommand {
    Cols(i32),
    Rows(i32),
    Start(Cell),
    StepInterval(u64),
    TrailLength(usize),
    SelfCollision(bool),
    WrapAround(bool),
}

impl SettingsCommand {
    /// Parse lines such as `cols 40`, `start 3 4` or `wrap on`.
    ///
    /// Numbers must be plain decimal digits; signs, decimals and other
    /// characters are rejected.
    pub fn parse(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let keyword = words
            .next()
            .ok_or_else(|| Error::Parse("empty command".to_string()))?;
        let args: Vec<&str> = words.collect();

        let command = match keyword.to_ascii_lowercase().as_str() {
            "cols" => SettingsCommand::Cols(parse_number(single(keyword, &args)?)?),
            "rows" => SettingsCommand::Rows(parse_number(single(keyword, &args)?)?),
            "start" => match args.as_slice() {
                [x, y] => SettingsCommand::Start(Cell::new(parse_number(x)?, parse_number(y)?)),
                _ => {
                    return Err(Error::Parse(
                        "start expects two values: start <x> <y>".to_string(),
                    ))
                }
            },
            "interval" => SettingsCommand::StepInterval(parse_number(single(keyword, &args)?)?),
            "length" => SettingsCommand::TrailLength(parse_number(single(keyword, &args)?)?),
            "collision" => SettingsCommand::SelfCollision(parse_flag(single(keyword, &args)?)?),
            "wrap" => SettingsCommand::WrapAround(parse_flag(single(keyword, &args)?)?),
            other => return Err(Error::Parse(format!("unknown setting '{}'", other))),
        };

        Ok(command)
    }
}

fn single<'a>(keyword: &str, args: &[&'a str]) -> Result<&'a str> {
    match args {
        [value] => Ok(*value),
        _ => Err(Error::Parse(format!("{} expects exactly one value", keyword))),
    }
}

fn parse_number<T: std::str::FromStr>(value: &str) -> Result<T> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::Parse(format!("'{}' is not a number", value)));
    }
    value
        .parse()
        .map_err(|_| Error::Validation(format!("'{}' is out of range", value)))
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "on" | "true" | "1" | "yes" => Ok(true),
        "off" | "false" | "0" | "no" => Ok(false),
        _ => Err(Error::Parse(format!("'{}' is not on/off", value))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FieldConfig;
    use proptest::prelude::*;

    fn store(cols: i32, rows: i32, start: Cell) -> SettingsStore {
        SettingsStore::new(Settings {
            field: FieldConfig::new(cols, rows),
            start,
            ..Settings::default()
        })
        .unwrap()
    }

    #[test]
    fn test_shrinking_cols_clamps_start_immediately() {
        let mut store = store(10, 10, Cell::new(7, 4));
        store.set_cols(5).unwrap();
        assert_eq!(store.settings().start, Cell::new(4, 4));
        assert_eq!(store.snapshot().start, Cell::new(4, 4));
    }

    #[test]
    fn test_shrinking_rows_clamps_start() {
        let mut store = store(10, 10, Cell::new(2, 9));
        store.set_rows(3).unwrap();
        assert_eq!(store.settings().start, Cell::new(2, 2));
    }

    #[test]
    fn test_growing_field_keeps_start() {
        let mut store = store(10, 10, Cell::new(2, 9));
        store.set_cols(40).unwrap();
        store.set_rows(40).unwrap();
        assert_eq!(store.settings().start, Cell::new(2, 9));
    }

    #[test]
    fn test_rejected_input_keeps_last_valid_value() {
        let mut store = store(10, 10, Cell::new(1, 1));
        assert!(store.set_cols(0).is_err());
        assert!(store.set_rows(-3).is_err());
        assert!(store.set_step_interval_ms(0).is_err());
        assert!(store.set_trail_length(0).is_err());
        assert!(store.set_start(Cell::new(10, 0)).is_err());

        let settings = store.settings();
        assert_eq!(settings.field, FieldConfig::new(10, 10));
        assert_eq!(settings.start, Cell::new(1, 1));
        assert_eq!(settings.step_interval_ms, 100);
        assert_eq!(settings.trail_length, 20);
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(SettingsCommand::parse("cols 40").unwrap(), SettingsCommand::Cols(40));
        assert_eq!(SettingsCommand::parse("ROWS 7").unwrap(), SettingsCommand::Rows(7));
        assert_eq!(
            SettingsCommand::parse("start 3 4").unwrap(),
            SettingsCommand::Start(Cell::new(3, 4))
        );
        assert_eq!(
            SettingsCommand::parse("  interval   50 ").unwrap(),
            SettingsCommand::StepInterval(50)
        );
        assert_eq!(
            SettingsCommand::parse("length 12").unwrap(),
            SettingsCommand::TrailLength(12)
        );
        assert_eq!(
            SettingsCommand::parse("collision on").unwrap(),
            SettingsCommand::SelfCollision(true)
        );
        assert_eq!(
            SettingsCommand::parse("wrap off").unwrap(),
            SettingsCommand::WrapAround(false)
        );
    }

    #[test]
    fn test_parse_rejects_non_numeric_input() {
        assert!(matches!(SettingsCommand::parse("cols -4"), Err(Error::Parse(_))));
        assert!(matches!(SettingsCommand::parse("cols 4.5"), Err(Error::Parse(_))));
        assert!(matches!(SettingsCommand::parse("cols abc"), Err(Error::Parse(_))));
        assert!(matches!(SettingsCommand::parse("cols"), Err(Error::Parse(_))));
        assert!(matches!(SettingsCommand::parse("start 1"), Err(Error::Parse(_))));
        assert!(matches!(SettingsCommand::parse("speed 3"), Err(Error::Parse(_))));
        assert!(matches!(SettingsCommand::parse(""), Err(Error::Parse(_))));
        assert!(matches!(
            SettingsCommand::parse("cols 99999999999"),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn test_apply_zero_is_rejected_after_parse() {
        let mut store = store(10, 10, Cell::new(1, 1));
        let command = SettingsCommand::parse("cols 0").unwrap();
        assert!(store.apply(command).is_err());
        assert_eq!(store.settings().field.cols, 10);

        store.apply(SettingsCommand::WrapAround(true)).unwrap();
        assert!(store.settings().wrap_around_edges);
    }

    proptest! {
        #[test]
        fn proptest_start_always_inside_field(
            cols in 1i32..60,
            rows in 1i32..60,
            new_cols in 1i32..60,
            new_rows in 1i32..60,
        ) {
            let mut store = store(cols, rows, Cell::new(cols - 1, rows - 1));
            store.set_cols(new_cols).unwrap();
            store.set_rows(new_rows).unwrap();
            let settings = store.settings();
            prop_assert!(settings.field.contains(settings.start));
        }
    }
}
