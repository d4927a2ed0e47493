//! Bounded trail of recently visited cells.

use snake_core::Cell;
use std::collections::VecDeque;

/// Oldest-first FIFO of visited cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrailLog {
    cells: VecDeque<Cell>,
}

impl TrailLog {
    pub fn new(seed: Cell) -> Self {
        let mut cells = VecDeque::new();
        cells.push_back(seed);
        Self { cells }
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }

    /// Append `cell`, evicting the oldest entry when the trail grows past
    /// `max_length`.
    pub fn push(&mut self, cell: Cell, max_length: usize) {
        self.cells.push_back(cell);
        if self.cells.len() > max_length {
            self.cells.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Most recently visited cell
    pub fn head(&self) -> Option<Cell> {
        self.cells.back().copied()
    }

    /// Cells from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_new_has_single_entry() {
        let trail = TrailLog::new(Cell::new(2, 3));
        assert_eq!(trail.len(), 1);
        assert!(trail.contains(Cell::new(2, 3)));
        assert!(!trail.contains(Cell::new(3, 2)));
        assert_eq!(trail.head(), Some(Cell::new(2, 3)));
    }

    #[test]
    fn test_push_evicts_oldest() {
        let mut trail = TrailLog::new(Cell::new(0, 0));
        trail.push(Cell::new(1, 0), 3);
        trail.push(Cell::new(2, 0), 3);
        assert_eq!(trail.len(), 3);

        trail.push(Cell::new(3, 0), 3);
        assert_eq!(trail.len(), 3);
        assert!(!trail.contains(Cell::new(0, 0)));
        assert_eq!(
            trail.iter().collect::<Vec<_>>(),
            vec![Cell::new(1, 0), Cell::new(2, 0), Cell::new(3, 0)]
        );
        assert_eq!(trail.head(), Some(Cell::new(3, 0)));
    }

    #[test]
    fn test_length_one_keeps_only_newest() {
        let mut trail = TrailLog::new(Cell::new(0, 0));
        trail.push(Cell::new(0, 1), 1);
        assert_eq!(trail.iter().collect::<Vec<_>>(), vec![Cell::new(0, 1)]);
    }

    proptest! {
        #[test]
        fn proptest_push_never_exceeds_max_length(
            max_length in 1usize..32,
            moves in proptest::collection::vec((0i32..20, 0i32..20), 0..200),
        ) {
            let mut trail = TrailLog::new(Cell::new(0, 0));
            for (x, y) in moves {
                trail.push(Cell::new(x, y), max_length);
                prop_assert!(trail.len() <= max_length);
                prop_assert_eq!(trail.head(), Some(Cell::new(x, y)));
            }
        }
    }
}
