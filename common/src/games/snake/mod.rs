mod collision;
mod difficulty;
mod food;
mod game_session;
mod snake;
mod types;

pub use collision::check_collision;
pub use difficulty::{Difficulty, MIN_TICK_INTERVAL, SpeedProfile, next_interval};
pub use food::{FOOD_PLACEMENT_ATTEMPTS, fallback_cell, place_food};
pub use game_session::{BoardSnapshot, GameSession, SessionState, TickOutcome};
pub use snake::{INITIAL_SNAKE_LENGTH, Snake};
pub use types::{BoardSize, Cell, DeathReason, Direction, MIN_BOARD_SIZE, in_bounds};
