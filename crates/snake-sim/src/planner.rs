//! Choice of the next cell.

use crate::rng::RandomSource;
use crate::trail::TrailLog;
use snake_core::{Cell, Direction, RunConfig};

/// Legal next cells from `current`, in east, west, south, north order.
///
/// With wrapping enabled the field is a torus, so on very small fields two
/// directions can land on the same cell; such duplicates are kept.
pub fn candidates(current: Cell, config: &RunConfig, trail: &TrailLog) -> Vec<Cell> {
    let field = config.field;

    Direction::all()
        .iter()
        .map(|direction| {
            let next = current.step(*direction);
            if config.wrap_around_edges {
                next.wrap(field.cols, field.rows)
            } else {
                next
            }
        })
        .filter(|cell| field.contains(*cell))
        .filter(|cell| !config.self_collision_check || !trail.contains(*cell))
        .collect()
}

/// Pick the next cell uniformly among the legal candidates, or `None` when
/// the walk is stuck.
pub fn plan(
    current: Cell,
    config: &RunConfig,
    trail: &TrailLog,
    rng: &mut RandomSource,
) -> Option<Cell> {
    let options = candidates(current, config, trail);
    if options.is_empty() {
        return None;
    }

    let index = rng.next_int(0, options.len() as i64 - 1);
    Some(options[index as usize])
}
