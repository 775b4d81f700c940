//! Engine configuration

use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::storage::{JsonStorage, StorageBackend};

/// How a bounded-integer option treats values below its minimum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundsFloor {
    /// Clamp to 0 regardless of the declared minimum (compatible with existing
    /// configuration files)
    #[default]
    Zero,
    /// Clamp to the declared minimum
    Minimum,
}

/// Configuration for loading and validating layered option documents
pub struct EngineConfig<S: StorageBackend = JsonStorage> {
    /// Directory holding the base document and all override documents
    pub config_dir: PathBuf,

    /// File stem of the base document (e.g., "config" -> config.yml)
    pub base_file: String,

    /// Application name (used for the default config directory)
    pub app_name: String,

    /// Storage backend implementation (selects the file format)
    pub storage: S,

    /// Path of the document-type marker inside override documents
    pub type_path: String,

    /// Value the marker must hold for a document to count as an override
    pub type_marker: String,

    /// Path of the world list inside documents
    pub worlds_path: String,

    /// Height ceiling used for vertical coordinates when no world is loaded
    pub default_ceiling: i64,

    /// Floor applied to bounded integers below their minimum
    pub bounds_floor: BoundsFloor,
}

impl Default for EngineConfig<JsonStorage> {
    fn default() -> Self {
        EngineConfigBuilder::new("app").config_dir(".").build()
    }
}

impl<S: StorageBackend> EngineConfig<S> {
    /// Get the full path to the base document
    pub fn base_path(&self) -> PathBuf {
        self.config_dir
            .join(format!("{}.{}", self.base_file, self.storage.extension()))
    }

    /// Check the configuration for values the loader cannot work with
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` describing the first problem found.
    pub fn validate(&self) -> Result<()> {
        if self.base_file.trim().is_empty() {
            return Err(Error::Config("base file name cannot be empty".into()));
        }
        if self.type_path.trim().is_empty() || self.worlds_path.trim().is_empty() {
            return Err(Error::Config(
                "type and worlds paths cannot be empty".into(),
            ));
        }
        if self.default_ceiling < 0 {
            return Err(Error::Config(format!(
                "default ceiling must not be negative, got {}",
                self.default_ceiling
            )));
        }
        Ok(())
    }
}

impl EngineConfig<JsonStorage> {
    /// Create a new builder for EngineConfig
    ///
    /// # Example
    /// ```rust
    /// use wcman::EngineConfig;
    ///
    /// let config = EngineConfig::builder("my-server")
    ///     .config_dir("~/.config/my-server")
    ///     .type_marker("hardmode")
    ///     .build();
    /// assert_eq!(config.default_ceiling, 255);
    /// ```
    pub fn builder(app_name: impl Into<String>) -> EngineConfigBuilder {
        EngineConfigBuilder::new(app_name)
    }
}

/// Builder for creating EngineConfig with a fluent API
#[derive(Debug, Clone)]
pub struct EngineConfigBuilder<S: StorageBackend = JsonStorage> {
    config_dir: Option<PathBuf>,
    base_file: String,
    app_name: String,
    storage: S,
    type_path: String,
    type_marker: String,
    worlds_path: String,
    default_ceiling: i64,
    bounds_floor: BoundsFloor,
}

impl EngineConfigBuilder<JsonStorage> {
    /// Create a new builder with the required app name
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            config_dir: None,
            base_file: "config".into(),
            app_name: app_name.into(),
            storage: JsonStorage::new(),
            type_path: "type".into(),
            type_marker: "world-config".into(),
            worlds_path: "worlds".into(),
            default_ceiling: 255,
            bounds_floor: BoundsFloor::Zero,
        }
    }
}

impl<S: StorageBackend> EngineConfigBuilder<S> {
    /// Set the configuration directory
    ///
    /// Supports `~` expansion for home directory.
    pub fn config_dir(mut self, path: impl Into<PathBuf>) -> Self {
        let path: PathBuf = path.into();
        let expanded = if path.starts_with("~") {
            if let Some(home) = dirs::home_dir() {
                home.join(path.strip_prefix("~").unwrap_or(&path))
            } else {
                path
            }
        } else {
            path
        };
        self.config_dir = Some(expanded);
        self
    }

    /// Set the base document stem (default: "config")
    pub fn base_file(mut self, stem: impl Into<String>) -> Self {
        self.base_file = stem.into();
        self
    }

    /// Use a different storage backend (file format)
    pub fn storage<T: StorageBackend>(self, storage: T) -> EngineConfigBuilder<T> {
        EngineConfigBuilder {
            config_dir: self.config_dir,
            base_file: self.base_file,
            app_name: self.app_name,
            storage,
            type_path: self.type_path,
            type_marker: self.type_marker,
            worlds_path: self.worlds_path,
            default_ceiling: self.default_ceiling,
            bounds_floor: self.bounds_floor,
        }
    }

    /// Set the document-type marker path (default: "type")
    pub fn type_path(mut self, path: impl Into<String>) -> Self {
        self.type_path = path.into();
        self
    }

    /// Set the marker value override documents must carry (default: "world-config")
    pub fn type_marker(mut self, marker: impl Into<String>) -> Self {
        self.type_marker = marker.into();
        self
    }

    /// Set the world list path (default: "worlds")
    pub fn worlds_path(mut self, path: impl Into<String>) -> Self {
        self.worlds_path = path.into();
        self
    }

    /// Set the fallback height ceiling (default: 255)
    pub fn default_ceiling(mut self, ceiling: i64) -> Self {
        self.default_ceiling = ceiling;
        self
    }

    /// Set how bounded integers below their minimum are clamped
    pub fn bounds_floor(mut self, floor: BoundsFloor) -> Self {
        self.bounds_floor = floor;
        self
    }

    /// Build the EngineConfig
    ///
    /// If `config_dir` is not set, uses the system config directory for the app.
    pub fn build(self) -> EngineConfig<S> {
        let config_dir = self.config_dir.unwrap_or_else(|| {
            dirs::config_dir()
                .map(|d| d.join(&self.app_name))
                .unwrap_or_else(|| PathBuf::from("."))
        });

        EngineConfig {
            config_dir,
            base_file: self.base_file,
            app_name: self.app_name,
            storage: self.storage,
            type_path: self.type_path,
            type_marker: self.type_marker,
            worlds_path: self.worlds_path,
            default_ceiling: self.default_ceiling,
            bounds_floor: self.bounds_floor,
        }
    }
}
