use log::debug;
use rand::Rng;

use crate::Coords;
use crate::grid::Grid;
use crate::occupancy::Occupancy;

pub const FOOD_ATTEMPTS: usize = 1000;
pub const OBSTACLE_ATTEMPTS: usize = 100;

fn random_free_cell<R: Rng>(rng: &mut R, grid: &Grid, occ: &Occupancy, attempts: usize) -> Option<Coords> {
    let rows = grid.interior_rows();
    let cols = grid.interior_cols();

    (0..attempts)
        .map(|_| (rng.gen_range(rows.clone()), rng.gen_range(cols.clone())))
        .find(|pos| !occ.is_occupied(*pos))
}

/// Picks a food cell outside the snake and obstacles. Food currently on
/// the board is ignored since it is being replaced.
///
/// When the random draws run out, falls back to the first free interior
/// cell in row-major order, and to the grid centre if nothing is free.
pub fn place_food<R: Rng>(rng: &mut R, grid: &Grid, occ: &Occupancy) -> Coords {
    let occ = occ.without_food();

    if let Some(pos) = random_free_cell(rng, grid, &occ, FOOD_ATTEMPTS) {
        return pos;
    }

    debug!("food placement exhausted {} attempts, scanning", FOOD_ATTEMPTS);
    grid.interior_cells()
        .find(|pos| !occ.is_occupied(*pos))
        .unwrap_or_else(|| grid.center())
}

/// Picks an obstacle cell clear of snake, obstacles and food. `None` means
/// skip this obstacle.
pub fn place_obstacle<R: Rng>(rng: &mut R, grid: &Grid, occ: &Occupancy) -> Option<Coords> {
    random_free_cell(rng, grid, occ, OBSTACLE_ATTEMPTS)
}
