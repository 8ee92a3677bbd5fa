mod content;
mod document;
mod game_config;
mod serializer;

pub use content::{ContentProvider, FileContentProvider, MemoryContentProvider};
pub use document::YamlDocument;
pub use game_config::{GameConfig, MAX_BOARD_SIZE};
pub use serializer::{DocumentSerializer, YamlSerializer};

pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}
