use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::UserId;
use crate::config::{ContentProvider, FileContentProvider, Validate, YamlDocument};
use super::{LocalScoreStore, RemoteScoreStore};

#[derive(Debug, Default, PartialEq, Serialize, Deserialize, Clone)]
pub struct LocalHighScoreRecord {
    pub high_score: u32,
    pub updated_at: Option<String>,
}

impl Validate for LocalHighScoreRecord {
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}

pub struct YamlLocalScoreStore<P: ContentProvider> {
    document: YamlDocument<LocalHighScoreRecord, P>,
}

pub type FileLocalScoreStore = YamlLocalScoreStore<FileContentProvider>;

impl FileLocalScoreStore {
    pub fn from_file(file_path: &str) -> Self {
        Self {
            document: YamlDocument::from_yaml_file(file_path),
        }
    }
}

impl<P: ContentProvider> YamlLocalScoreStore<P> {
    pub fn new(provider: P) -> Self {
        Self {
            document: YamlDocument::new(provider),
        }
    }
}

impl<P: ContentProvider> LocalScoreStore for YamlLocalScoreStore<P> {
    fn read_high_score(&self) -> Result<u32, String> {
        Ok(self.document.load()?.high_score)
    }

    fn write_high_score(&self, score: u32) -> Result<(), String> {
        self.document.update(|record| {
            record.high_score = score;
            record.updated_at = Some(Local::now().to_rfc3339());
        })?;
        Ok(())
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct RemoteScoreRecord {
    pub username: String,
    pub high_score: u32,
    pub last_played: String,
}

#[derive(Debug, Default, PartialEq, Serialize, Deserialize, Clone)]
pub struct RemoteScoreBook {
    pub users: BTreeMap<String, RemoteScoreRecord>,
}

impl Validate for RemoteScoreBook {
    fn validate(&self) -> Result<(), String> {
        if let Some(id) = self.users.keys().find(|id| id.is_empty()) {
            return Err(format!("user id must not be empty, got {:?}", id));
        }
        Ok(())
    }
}

pub struct YamlRemoteScoreStore<P>
where
    P: ContentProvider + Send + Sync + 'static,
{
    document: Arc<YamlDocument<RemoteScoreBook, P>>,
}

pub type FileRemoteScoreStore = YamlRemoteScoreStore<FileContentProvider>;

impl FileRemoteScoreStore {
    pub fn from_file(file_path: &str) -> Self {
        Self {
            document: Arc::new(YamlDocument::from_yaml_file(file_path)),
        }
    }
}

impl<P> YamlRemoteScoreStore<P>
where
    P: ContentProvider + Send + Sync + 'static,
{
    pub fn new(provider: P) -> Self {
        Self {
            document: Arc::new(YamlDocument::new(provider)),
        }
    }

    pub fn record(&self, user_id: &UserId) -> Result<Option<RemoteScoreRecord>, String> {
        Ok(self.document.load()?.users.get(user_id.as_str()).cloned())
    }
}

impl<P> RemoteScoreStore for YamlRemoteScoreStore<P>
where
    P: ContentProvider + Send + Sync + 'static,
{
    async fn read_high_score(&self, user_id: &UserId) -> Result<u32, String> {
        let document = self.document.clone();
        let user_id = user_id.clone();
        tokio::task::spawn_blocking(move || -> Result<u32, String> {
            let book = document.load()?;
            Ok(book
                .users
                .get(user_id.as_str())
                .map(|record| record.high_score)
                .unwrap_or(0))
        })
        .await
        .map_err(|e| format!("Score read task failed: {}", e))?
    }

    async fn write_high_score(&self, user_id: &UserId, score: u32, display_name: &str) -> Result<(), String> {
        let document = self.document.clone();
        let user_id = user_id.clone();
        let display_name = display_name.to_string();
        tokio::task::spawn_blocking(move || -> Result<(), String> {
            document.update(|book| {
                let now = Local::now().to_rfc3339();
                let record = book
                    .users
                    .entry(user_id.to_string())
                    .or_insert_with(|| RemoteScoreRecord {
                        username: display_name.clone(),
                        high_score: 0,
                        last_played: now.clone(),
                    });
                if score > record.high_score {
                    record.high_score = score;
                    record.username = display_name;
                }
                record.last_played = now;
            })?;
            Ok(())
        })
        .await
        .map_err(|e| format!("Score write task failed: {}", e))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MemoryContentProvider;

    fn get_temp_file_path(name: &str) -> String {
        let mut path = std::env::temp_dir();
        let random_number: u32 = rand::random();
        path.push(format!("temp_snake_hub_{}_{}.yaml", name, random_number));
        path.to_string_lossy().to_string()
    }

    #[test]
    fn test_missing_local_file_reads_zero() {
        let store = FileLocalScoreStore::from_file(&get_temp_file_path("missing"));
        assert_eq!(store.read_high_score(), Ok(0));
    }

    #[test]
    fn test_local_file_persists_between_instances() {
        let file_path = get_temp_file_path("local");
        FileLocalScoreStore::from_file(&file_path)
            .write_high_score(7)
            .unwrap();

        let reopened = FileLocalScoreStore::from_file(&file_path);
        assert_eq!(reopened.read_high_score(), Ok(7));

        let _ = std::fs::remove_file(file_path);
    }

    #[test]
    fn test_corrupt_local_file_is_an_error() {
        let store = YamlLocalScoreStore::new(MemoryContentProvider::new(Some(
            "high_score: [not a number]".to_string(),
        )));
        assert!(store.read_high_score().is_err());
    }

    #[tokio::test]
    async fn test_remote_write_keeps_higher_score() {
        let store = YamlRemoteScoreStore::new(MemoryContentProvider::default());
        let user = UserId::new("u1".to_string());

        store.write_high_score(&user, 9, "Ana").await.unwrap();
        store.write_high_score(&user, 4, "Ana B").await.unwrap();

        assert_eq!(store.read_high_score(&user).await, Ok(9));
        let record = store.record(&user).unwrap().unwrap();
        assert_eq!(record.username, "Ana");
        assert_eq!(record.high_score, 9);
    }

    #[tokio::test]
    async fn test_remote_unknown_user_reads_zero() {
        let store = YamlRemoteScoreStore::new(MemoryContentProvider::default());
        let user = UserId::new("nobody".to_string());
        assert_eq!(store.read_high_score(&user).await, Ok(0));
    }

    #[tokio::test]
    async fn test_remote_file_keys_by_user() {
        let file_path = get_temp_file_path("remote");
        let store = FileRemoteScoreStore::from_file(&file_path);
        let first = UserId::new("first".to_string());
        let second = UserId::new("second".to_string());

        store.write_high_score(&first, 3, "First").await.unwrap();
        store.write_high_score(&second, 11, "Second").await.unwrap();

        let reopened = FileRemoteScoreStore::from_file(&file_path);
        assert_eq!(reopened.read_high_score(&first).await, Ok(3));
        assert_eq!(reopened.read_high_score(&second).await, Ok(11));

        let _ = std::fs::remove_file(file_path);
    }

    struct SlowContentProvider {
        inner: MemoryContentProvider,
    }

    impl ContentProvider for SlowContentProvider {
        fn read_content(&self) -> Result<Option<String>, String> {
            std::thread::sleep(std::time::Duration::from_millis(50));
            self.inner.read_content()
        }

        fn write_content(&self, content: &str) -> Result<(), String> {
            self.inner.write_content(content)
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_concurrent_remote_writes_keep_both_users() {
        let store = YamlRemoteScoreStore::new(SlowContentProvider {
            inner: MemoryContentProvider::default(),
        });
        let a = UserId::new("a".to_string());
        let b = UserId::new("b".to_string());

        let (first, second) = tokio::join!(
            store.write_high_score(&a, 5, "A"),
            store.write_high_score(&b, 9, "B"),
        );
        first.unwrap();
        second.unwrap();

        assert_eq!(store.read_high_score(&a).await, Ok(5));
        assert_eq!(store.read_high_score(&b).await, Ok(9));
    }
}
