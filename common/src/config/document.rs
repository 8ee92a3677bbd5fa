use serde::{Deserialize, Serialize};
use std::sync::Mutex;

use super::{ContentProvider, DocumentSerializer, FileContentProvider, Validate, YamlSerializer};

pub struct YamlDocument<TValue, TProvider, TSerializer = YamlSerializer>
where
    TValue: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
    TProvider: ContentProvider,
    TSerializer: DocumentSerializer<TValue>,
{
    provider: TProvider,
    serializer: TSerializer,
    cached: Mutex<Option<TValue>>,
    // Serializes read-modify-write cycles in `update`.
    writer: Mutex<()>,
}

impl<TValue> YamlDocument<TValue, FileContentProvider, YamlSerializer>
where
    TValue: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
{
    pub fn from_yaml_file(file_path: &str) -> Self {
        Self::new(FileContentProvider::new(file_path.to_string()))
    }
}

impl<TValue, TProvider> YamlDocument<TValue, TProvider, YamlSerializer>
where
    TValue: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
    TProvider: ContentProvider,
{
    pub fn new(provider: TProvider) -> Self {
        Self {
            provider,
            serializer: YamlSerializer,
            cached: Mutex::new(None),
            writer: Mutex::new(()),
        }
    }
}

impl<TValue, TProvider, TSerializer> YamlDocument<TValue, TProvider, TSerializer>
where
    TValue: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
    TProvider: ContentProvider,
    TSerializer: DocumentSerializer<TValue>,
{
    // Nothing stored yet loads as `TValue::default()`, which is not written back.
    pub fn load(&self) -> Result<TValue, String> {
        let mut cached = self
            .cached
            .lock()
            .map_err(|_| "Document cache lock poisoned".to_string())?;

        if let Some(value) = cached.as_ref() {
            return Ok(value.clone());
        }

        let Some(content) = self.provider.read_content()? else {
            return Ok(TValue::default());
        };

        let value = self.serializer.deserialize(&content)?;
        value
            .validate()
            .map_err(|e| format!("Validation error: {}", e))?;

        *cached = Some(value.clone());
        Ok(value)
    }

    pub fn save(&self, value: &TValue) -> Result<(), String> {
        value
            .validate()
            .map_err(|e| format!("Validation error: {}", e))?;

        let content = self.serializer.serialize(value)?;
        self.provider.write_content(&content)?;

        let mut cached = self
            .cached
            .lock()
            .map_err(|_| "Document cache lock poisoned".to_string())?;
        *cached = Some(value.clone());
        Ok(())
    }

    pub fn update<F>(&self, modify: F) -> Result<TValue, String>
    where
        F: FnOnce(&mut TValue),
    {
        let _writer = self
            .writer
            .lock()
            .map_err(|_| "Document writer lock poisoned".to_string())?;

        let mut value = self.load()?;
        modify(&mut value);
        self.save(&value)?;
        Ok(value)
    }
}
