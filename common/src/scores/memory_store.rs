use std::collections::HashMap;
use std::sync::Mutex;

use crate::UserId;
use super::{LocalScoreStore, RemoteScoreStore};

#[derive(Default)]
pub struct MemoryLocalScoreStore {
    score: Mutex<u32>,
    writes: Mutex<Vec<u32>>,
    failing: bool,
}

impl MemoryLocalScoreStore {
    pub fn new(score: u32) -> Self {
        Self {
            score: Mutex::new(score),
            writes: Mutex::new(Vec::new()),
            failing: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn writes(&self) -> Vec<u32> {
        self.writes.lock().map(|w| w.clone()).unwrap_or_default()
    }
}

impl LocalScoreStore for MemoryLocalScoreStore {
    fn read_high_score(&self) -> Result<u32, String> {
        if self.failing {
            return Err("local storage unavailable".to_string());
        }
        self.score
            .lock()
            .map(|score| *score)
            .map_err(|_| "Score lock poisoned".to_string())
    }

    fn write_high_score(&self, score: u32) -> Result<(), String> {
        if self.failing {
            return Err("local storage unavailable".to_string());
        }
        *self.score.lock().map_err(|_| "Score lock poisoned".to_string())? = score;
        self.writes
            .lock()
            .map_err(|_| "Score lock poisoned".to_string())?
            .push(score);
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RemoteWrite {
    pub user_id: UserId,
    pub score: u32,
    pub display_name: String,
}

#[derive(Default)]
pub struct MemoryRemoteScoreStore {
    scores: Mutex<HashMap<UserId, (u32, String)>>,
    writes: Mutex<Vec<RemoteWrite>>,
    failing: bool,
}

impl MemoryRemoteScoreStore {
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn seed(&self, user_id: &UserId, score: u32, display_name: &str) {
        if let Ok(mut scores) = self.scores.lock() {
            scores.insert(user_id.clone(), (score, display_name.to_string()));
        }
    }

    pub fn writes(&self) -> Vec<RemoteWrite> {
        self.writes.lock().map(|w| w.clone()).unwrap_or_default()
    }

    pub fn stored(&self, user_id: &UserId) -> Option<u32> {
        self.scores
            .lock()
            .ok()
            .and_then(|scores| scores.get(user_id).map(|(score, _)| *score))
    }
}

impl RemoteScoreStore for MemoryRemoteScoreStore {
    async fn read_high_score(&self, user_id: &UserId) -> Result<u32, String> {
        if self.failing {
            return Err("account service unavailable".to_string());
        }
        Ok(self.stored(user_id).unwrap_or(0))
    }

    async fn write_high_score(&self, user_id: &UserId, score: u32, display_name: &str) -> Result<(), String> {
        if self.failing {
            return Err("account service unavailable".to_string());
        }
        let mut scores = self
            .scores
            .lock()
            .map_err(|_| "Score lock poisoned".to_string())?;
        let entry = scores
            .entry(user_id.clone())
            .or_insert((0, display_name.to_string()));
        if score > entry.0 {
            *entry = (score, display_name.to_string());
        }
        drop(scores);

        self.writes
            .lock()
            .map_err(|_| "Score lock poisoned".to_string())?
            .push(RemoteWrite {
                user_id: user_id.clone(),
                score,
                display_name: display_name.to_string(),
            });
        Ok(())
    }
}
