//! Storage backend trait and implementations
//!
//! Every backend parses its format into a `serde_json::Value` tree so the
//! rest of the crate only deals with one document shape.

use crate::error::{Error, Result};
use serde::{Serialize, de::DeserializeOwned};
use std::path::Path;

/// Trait for storage backend implementations
pub trait StorageBackend: Clone + Send + Sync {
    /// File extension for this storage format (e.g., "json", "yml")
    fn extension(&self) -> &str;

    /// Serialize data to string
    fn serialize<T: Serialize>(&self, data: &T) -> Result<String>;

    /// Deserialize data from string
    fn deserialize<T: DeserializeOwned>(&self, content: &str) -> Result<T>;

    /// Read and deserialize from file
    fn read<T: DeserializeOwned>(&self, path: &Path) -> Result<T> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        self.deserialize(&content)
    }

    /// Serialize and write to file
    ///
    /// Uses atomic write: writes to temp file then renames to prevent corruption.
    fn write<T: Serialize>(&self, path: &Path, data: &T) -> Result<()> {
        let content = self.serialize(data)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| Error::DirectoryCreate {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let file_name = path.file_name().ok_or_else(|| {
            Error::Config(format!(
                "Invalid path '{}': must have a filename",
                path.display()
            ))
        })?;
        let mut temp_filename = file_name.to_os_string();
        temp_filename.push(".tmp");
        let temp_path = path.with_file_name(temp_filename);

        std::fs::write(&temp_path, &content).map_err(|e| Error::FileWrite {
            path: temp_path.clone(),
            source: e,
        })?;

        std::fs::rename(&temp_path, path).map_err(|e| Error::FileWrite {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

// =============================================================================
// JSON Storage Implementation
// =============================================================================

/// JSON storage backend (default), written pretty-printed
#[derive(Debug, Clone, Default)]
pub struct JsonStorage;

impl JsonStorage {
    pub fn new() -> Self {
        Self
    }
}

impl StorageBackend for JsonStorage {
    fn extension(&self) -> &str {
        "json"
    }

    fn serialize<T: Serialize>(&self, data: &T) -> Result<String> {
        serde_json::to_string_pretty(data).map_err(Error::from)
    }

    fn deserialize<T: DeserializeOwned>(&self, content: &str) -> Result<T> {
        serde_json::from_str(content).map_err(|e| Error::Parse(e.to_string()))
    }
}

// =============================================================================
// YAML Storage Implementation
// =============================================================================

/// YAML storage backend (`.yml` files)
#[cfg(feature = "yaml")]
#[derive(Debug, Clone)]
pub struct YamlStorage {
    extension: String,
}

#[cfg(feature = "yaml")]
impl YamlStorage {
    /// Create a YAML backend reading `.yml` files
    pub fn new() -> Self {
        Self {
            extension: "yml".into(),
        }
    }

    /// Use a different file extension (e.g., "yaml")
    #[must_use]
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }
}

#[cfg(feature = "yaml")]
impl Default for YamlStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "yaml")]
impl StorageBackend for YamlStorage {
    fn extension(&self) -> &str {
        &self.extension
    }

    fn serialize<T: Serialize>(&self, data: &T) -> Result<String> {
        serde_yaml::to_string(data).map_err(|e| Error::Parse(e.to_string()))
    }

    fn deserialize<T: DeserializeOwned>(&self, content: &str) -> Result<T> {
        serde_yaml::from_str(content).map_err(|e| Error::Parse(e.to_string()))
    }
}

// =============================================================================
// TOML Storage Implementation
// =============================================================================

/// TOML storage backend
#[cfg(feature = "toml")]
#[derive(Debug, Clone, Default)]
pub struct TomlStorage;

#[cfg(feature = "toml")]
impl TomlStorage {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(feature = "toml")]
impl StorageBackend for TomlStorage {
    fn extension(&self) -> &str {
        "toml"
    }

    fn serialize<T: Serialize>(&self, data: &T) -> Result<String> {
        toml::to_string_pretty(data).map_err(|e| Error::Parse(e.to_string()))
    }

    fn deserialize<T: DeserializeOwned>(&self, content: &str) -> Result<T> {
        toml::from_str(content).map_err(|e| Error::Parse(e.to_string()))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};
    use tempfile::tempdir;

    #[test]
    fn test_json_serialize_pretty() {
        let storage = JsonStorage::new();
        let json = storage.serialize(&json!({"type": "world-config"})).unwrap();
        assert!(json.contains('\n'));
        assert!(json.contains("\"type\": \"world-config\""));
    }

    #[test]
    fn test_json_parse_error_is_parse_variant() {
        let storage = JsonStorage::new();
        let result: Result<Value> = storage.deserialize("{ broken");

        assert!(matches!(result, Err(Error::Parse(_))));
    }

    #[test]
    fn test_json_write_creates_parent_and_reads_back() {
        let storage = JsonStorage::new();
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/config.json");
        let doc = json!({"spawn": {"chance": 12}});

        storage.write(&path, &doc).unwrap();
        let loaded: Value = storage.read(&path).unwrap();

        assert_eq!(loaded, doc);
        assert!(!dir.path().join("nested/config.json.tmp").exists());
    }

    #[test]
    fn test_read_nonexistent_file() {
        let storage = JsonStorage::new();
        let result: Result<Value> = storage.read(Path::new("/nonexistent/file.json"));

        assert!(matches!(result.unwrap_err(), Error::FileRead { .. }));
    }

    #[cfg(feature = "yaml")]
    #[test]
    fn test_yaml_parses_into_json_tree() {
        let storage = YamlStorage::new();
        let doc: Value = storage
            .deserialize("type: world-config\nworlds:\n  - nether\nspawn:\n  chance: 40\n")
            .unwrap();

        assert_eq!(storage.extension(), "yml");
        assert_eq!(doc["worlds"], json!(["nether"]));
        assert_eq!(doc["spawn"]["chance"], json!(40));
    }

    #[cfg(feature = "yaml")]
    #[test]
    fn test_yaml_parse_error() {
        let storage = YamlStorage::new().with_extension("yaml");
        let result: Result<Value> = storage.deserialize("key: [unclosed");
        assert!(matches!(result, Err(Error::Parse(_))));
        assert_eq!(storage.extension(), "yaml");
    }
}
