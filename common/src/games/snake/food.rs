use std::collections::HashSet;

use crate::games::SessionRng;
use crate::log;
use super::types::{BoardSize, Cell};

pub const FOOD_PLACEMENT_ATTEMPTS: usize = 1000;
const FALLBACK_CORNER_OFFSET: i32 = 1;

pub fn place_food(occupied: &HashSet<Cell>, board_size: BoardSize, rng: &mut SessionRng) -> Cell {
    let size = board_size.get() as i32;

    for _ in 0..FOOD_PLACEMENT_ATTEMPTS {
        let candidate = Cell::new(rng.random_range(0..size), rng.random_range(0..size));
        if !occupied.contains(&candidate) {
            return candidate;
        }
    }

    let fallback = fallback_cell(board_size);
    log!(
        "Food placement gave up after {} attempts ({} of {} cells occupied), using {}",
        FOOD_PLACEMENT_ATTEMPTS,
        occupied.len(),
        board_size.cell_count(),
        fallback
    );
    fallback
}

pub fn fallback_cell(board_size: BoardSize) -> Cell {
    let far = board_size.get() as i32 - 1 - FALLBACK_CORNER_OFFSET;
    Cell::new(far, far)
}
