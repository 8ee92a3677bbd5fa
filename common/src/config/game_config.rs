use serde::{Deserialize, Serialize};

use crate::games::snake::{Difficulty, MIN_BOARD_SIZE};
use super::Validate;

pub const MAX_BOARD_SIZE: u32 = 100;

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct GameConfig {
    pub default_difficulty: Difficulty,
    pub board_size: u32,
    pub tile_size: u32,
    pub high_score_file: String,
    pub remote_score_file: String,
}

impl Validate for GameConfig {
    fn validate(&self) -> Result<(), String> {
        if self.board_size < MIN_BOARD_SIZE || self.board_size > MAX_BOARD_SIZE {
            return Err(format!(
                "board_size must be between {} and {}, got {}",
                MIN_BOARD_SIZE, MAX_BOARD_SIZE, self.board_size
            ));
        }
        if self.tile_size == 0 {
            return Err("tile_size must be greater than 0".to_string());
        }
        if self.high_score_file.is_empty() {
            return Err("high_score_file must not be empty".to_string());
        }
        if self.remote_score_file.is_empty() {
            return Err("remote_score_file must not be empty".to_string());
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            default_difficulty: Difficulty::Medium,
            board_size: 25,
            tile_size: 20,
            high_score_file: "snake_high_score.yaml".to_string(),
            remote_score_file: "snake_remote_scores.yaml".to_string(),
        }
    }
}
