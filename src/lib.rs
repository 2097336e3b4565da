pub mod config;
pub mod engine;
pub mod game;
pub mod grid;
pub mod input;
pub mod occupancy;
pub mod placement;
pub mod progression;
pub mod skin;
pub mod snake;
pub mod storage;
pub mod term;

/// Grid position as (row, col).
pub type Coords = (i32, i32);

pub type TermInt = u16;
/// Terminal position as (x, y).
pub type TermPos = (TermInt, TermInt);
