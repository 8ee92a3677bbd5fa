use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const MIN_TICK_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpeedProfile {
    pub initial_interval: Duration,
    pub increment: Duration,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn speed_profile(&self) -> SpeedProfile {
        let (initial_ms, increment_ms) = match self {
            Difficulty::Easy => (200, 5),
            Difficulty::Medium => (150, 7),
            Difficulty::Hard => (100, 10),
        };
        SpeedProfile {
            initial_interval: Duration::from_millis(initial_ms),
            increment: Duration::from_millis(increment_ms),
        }
    }
}

pub fn next_interval(current: Duration, increment: Duration) -> Duration {
    current.saturating_sub(increment).max(MIN_TICK_INTERVAL)
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" | "e" => Ok(Difficulty::Easy),
            "medium" | "m" => Ok(Difficulty::Medium),
            "hard" | "h" => Ok(Difficulty::Hard),
            other => Err(format!("Unknown difficulty: {} (expected easy, medium or hard)", other)),
        }
    }
}
