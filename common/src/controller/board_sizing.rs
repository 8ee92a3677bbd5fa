use crate::config::GameConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoardDimensions {
    pub board_size: u32,
    pub tile_size: u32,
}

impl BoardDimensions {
    pub fn canvas_size(&self) -> u32 {
        self.board_size * self.tile_size
    }
}

pub trait BoardSizeProvider {
    fn current_board_size(&self) -> BoardDimensions;
}

pub struct FixedBoardSize {
    dimensions: BoardDimensions,
}

impl FixedBoardSize {
    pub fn new(board_size: u32, tile_size: u32) -> Self {
        Self {
            dimensions: BoardDimensions { board_size, tile_size },
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.board_size, config.tile_size)
    }
}

impl BoardSizeProvider for FixedBoardSize {
    fn current_board_size(&self) -> BoardDimensions {
        self.dimensions
    }
}
