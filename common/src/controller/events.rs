use std::time::Duration;

use tokio::sync::mpsc;

use crate::Account;
use crate::games::snake::{BoardSnapshot, DeathReason, Difficulty, SessionState};
use super::board_sizing::BoardDimensions;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sound {
    Eat,
    GameOver,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TickReport {
    pub tick: u64,
    pub snapshot: BoardSnapshot,
    pub score: u32,
    pub interval: Duration,
    pub state: SessionState,
    pub terminal: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionSummary {
    pub difficulty: Difficulty,
    pub final_score: u32,
    pub reason: DeathReason,
    pub ticks: u64,
    pub high_score: u32,
    pub is_new_record: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    SessionStarted {
        difficulty: Difficulty,
        dimensions: BoardDimensions,
        snapshot: BoardSnapshot,
        interval: Duration,
        high_score: u32,
    },
    SessionRejected {
        reason: String,
    },
    PauseToggled {
        paused: bool,
    },
    Tick(TickReport),
    Sound(Sound),
    SessionEnded(SessionSummary),
    ReturnedToMenu,
    HighScoreChanged {
        high_score: u32,
    },
    AccountChanged {
        account: Option<Account>,
    },
}

pub trait GameEventSink {
    fn publish(&mut self, event: GameEvent);
}

impl GameEventSink for Vec<GameEvent> {
    fn publish(&mut self, event: GameEvent) {
        self.push(event);
    }
}

impl GameEventSink for mpsc::UnboundedSender<GameEvent> {
    fn publish(&mut self, event: GameEvent) {
        let _ = self.send(event);
    }
}
