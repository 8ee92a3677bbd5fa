use serde::{Deserialize, Serialize};

pub trait DocumentSerializer<T> {
    fn serialize(&self, value: &T) -> Result<String, String>;
    fn deserialize(&self, content: &str) -> Result<T, String>;
}

#[derive(Default)]
pub struct YamlSerializer;

impl<T> DocumentSerializer<T> for YamlSerializer
where
    T: for<'de> Deserialize<'de> + Serialize,
{
    fn serialize(&self, value: &T) -> Result<String, String> {
        serde_yaml_ng::to_string(value).map_err(|e| format!("Failed to serialize YAML: {}", e))
    }

    fn deserialize(&self, content: &str) -> Result<T, String> {
        serde_yaml_ng::from_str(content).map_err(|e| format!("Failed to parse YAML: {}", e))
    }
}
