//! Core type definitions for the simulation.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a single run, used to correlate log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(pub Uuid);

impl RunId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Grid coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn add(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Neighbouring cell one step in `direction` (no bounds applied)
    pub fn step(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.to_delta();
        self.add(dx, dy)
    }

    /// Apply toroidal wrapping for given field dimensions
    pub fn wrap(&self, cols: i32, rows: i32) -> Self {
        Self {
            x: self.x.rem_euclid(cols),
            y: self.y.rem_euclid(rows),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Orthogonal movement direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    East,
    West,
    South,
    North,
}

impl Direction {
    pub fn to_delta(&self) -> (i32, i32) {
        match self {
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
            Direction::South => (0, 1),
            Direction::North => (0, -1),
        }
    }

    /// Candidate enumeration order. Carries no priority.
    pub fn all() -> [Direction; 4] {
        [
            Direction::East,
            Direction::West,
            Direction::South,
            Direction::North,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_wrap() {
        let cell = Cell::new(5, 5);
        assert_eq!(cell.wrap(10, 10), Cell::new(5, 5));

        let cell = Cell::new(-1, -1);
        assert_eq!(cell.wrap(10, 10), Cell::new(9, 9));

        let cell = Cell::new(10, 10);
        assert_eq!(cell.wrap(10, 10), Cell::new(0, 0));
    }

    #[test]
    fn test_direction_delta() {
        assert_eq!(Direction::East.to_delta(), (1, 0));
        assert_eq!(Direction::West.to_delta(), (-1, 0));
        assert_eq!(Direction::South.to_delta(), (0, 1));
        assert_eq!(Direction::North.to_delta(), (0, -1));
    }

    #[test]
    fn test_step_follows_enumeration_order() {
        let origin = Cell::new(3, 3);
        let neighbours: Vec<Cell> = Direction::all().iter().map(|d| origin.step(*d)).collect();
        assert_eq!(
            neighbours,
            vec![
                Cell::new(4, 3),
                Cell::new(2, 3),
                Cell::new(3, 4),
                Cell::new(3, 2)
            ]
        );
    }

    #[test]
    fn test_cell_equality_is_field_wise() {
        assert_eq!(Cell::new(1, 2), Cell { x: 1, y: 2 });
        assert_ne!(Cell::new(1, 2), Cell::new(2, 1));
    }
}
