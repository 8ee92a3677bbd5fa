use std::io::ErrorKind;
use std::sync::Mutex;

pub trait ContentProvider {
    fn read_content(&self) -> Result<Option<String>, String>;
    fn write_content(&self, content: &str) -> Result<(), String>;
}

pub struct FileContentProvider {
    file_path: String,
}

impl FileContentProvider {
    pub fn new(file_path: String) -> Self {
        Self { file_path }
    }

    pub fn file_path(&self) -> &str {
        &self.file_path
    }
}

impl ContentProvider for FileContentProvider {
    fn read_content(&self) -> Result<Option<String>, String> {
        match std::fs::read_to_string(&self.file_path) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(format!("Failed to read {}: {}", self.file_path, err)),
        }
    }

    fn write_content(&self, content: &str) -> Result<(), String> {
        std::fs::write(&self.file_path, content)
            .map_err(|e| format!("Failed to write {}: {}", self.file_path, e))
    }
}

#[derive(Default)]
pub struct MemoryContentProvider {
    content: Mutex<Option<String>>,
}

impl MemoryContentProvider {
    pub fn new(content: Option<String>) -> Self {
        Self {
            content: Mutex::new(content),
        }
    }
}

impl ContentProvider for MemoryContentProvider {
    fn read_content(&self) -> Result<Option<String>, String> {
        let content = self
            .content
            .lock()
            .map_err(|_| "Content lock poisoned".to_string())?;
        Ok(content.clone())
    }

    fn write_content(&self, content: &str) -> Result<(), String> {
        let mut current = self
            .content
            .lock()
            .map_err(|_| "Content lock poisoned".to_string())?;
        *current = Some(content.to_string());
        Ok(())
    }
}
