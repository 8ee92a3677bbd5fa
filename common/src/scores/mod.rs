mod high_score;
mod memory_store;
mod yaml_store;

use std::future::Future;
use std::sync::Arc;

use crate::UserId;

pub use high_score::{HighScoreKeeper, HighScoreUpdate};
pub use memory_store::{MemoryLocalScoreStore, MemoryRemoteScoreStore, RemoteWrite};
pub use yaml_store::{
    FileLocalScoreStore, FileRemoteScoreStore, LocalHighScoreRecord, RemoteScoreBook,
    RemoteScoreRecord, YamlLocalScoreStore, YamlRemoteScoreStore,
};

pub trait LocalScoreStore {
    fn read_high_score(&self) -> Result<u32, String>;
    fn write_high_score(&self, score: u32) -> Result<(), String>;
}

impl<T: LocalScoreStore> LocalScoreStore for Arc<T> {
    fn read_high_score(&self) -> Result<u32, String> {
        self.as_ref().read_high_score()
    }

    fn write_high_score(&self, score: u32) -> Result<(), String> {
        self.as_ref().write_high_score(score)
    }
}

pub trait RemoteScoreStore: Send + Sync + 'static {
    fn read_high_score(&self, user_id: &UserId) -> impl Future<Output = Result<u32, String>> + Send;

    fn write_high_score(
        &self,
        user_id: &UserId,
        score: u32,
        display_name: &str,
    ) -> impl Future<Output = Result<(), String>> + Send;
}
