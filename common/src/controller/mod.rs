mod board_sizing;
mod events;
mod game_controller;
mod input;
mod timer;

pub use board_sizing::{BoardDimensions, BoardSizeProvider, FixedBoardSize};
pub use events::{GameEvent, GameEventSink, SessionSummary, Sound, TickReport};
pub use game_controller::{ControllerCommand, GameController};
pub use input::DirectionBuffer;
pub use timer::TickTimer;
