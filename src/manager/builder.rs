//! Builder for ConfigManager
//!
//! This module contains [`ConfigManagerBuilder`] which provides a fluent API
//! for creating a [`ConfigManager`](super::ConfigManager).

use crate::config::{
    BoundsFloor, EngineConfigBuilder, OptionDescriptor, OptionRegistry, OptionSchema,
};
use crate::diagnostics::{DiagnosticSink, LogSink};
use crate::error::Result;
use crate::source::RawDocument;
use crate::storage::{JsonStorage, StorageBackend};
use crate::world::{StaticWorlds, WorldHeights};
use std::path::PathBuf;
use std::sync::Arc;

use super::ConfigManager;

/// Builder for creating a [`ConfigManager`] with a fluent API.
///
/// # Example
///
/// ```rust,no_run
/// use wcman::{ConfigManager, MemorySink, OptionDescriptor};
/// use std::sync::Arc;
///
/// let sink = Arc::new(MemorySink::new());
/// let manager = ConfigManager::builder("my-server")
///     .config_dir("~/.config/my-server")
///     .type_marker("hardmode")
///     .with_option(OptionDescriptor::integer("build.max_y", 128).vertical())
///     .with_sink(sink.clone())
///     .build()
///     .unwrap();
/// ```
pub struct ConfigManagerBuilder<S: StorageBackend = JsonStorage> {
    config_builder: EngineConfigBuilder<S>,
    options: Vec<OptionDescriptor>,
    worlds: Arc<dyn WorldHeights>,
    sink: Arc<dyn DiagnosticSink>,
}

impl ConfigManagerBuilder<JsonStorage> {
    /// Create a new builder with the required app name.
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            config_builder: EngineConfigBuilder::new(app_name),
            options: Vec::new(),
            worlds: Arc::new(StaticWorlds::new()),
            sink: Arc::new(LogSink::new()),
        }
    }
}

impl<S: StorageBackend> ConfigManagerBuilder<S> {
    /// Set the configuration directory.
    ///
    /// Supports `~` expansion for home directory.
    pub fn config_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_builder = self.config_builder.config_dir(path);
        self
    }

    /// Set the base document stem (default: "config").
    pub fn base_file(mut self, stem: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.base_file(stem);
        self
    }

    /// Use a different storage backend (file format).
    pub fn storage<T: StorageBackend>(self, storage: T) -> ConfigManagerBuilder<T> {
        ConfigManagerBuilder {
            config_builder: self.config_builder.storage(storage),
            options: self.options,
            worlds: self.worlds,
            sink: self.sink,
        }
    }

    /// Set the document-type marker path (default: "type").
    pub fn type_path(mut self, path: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.type_path(path);
        self
    }

    /// Set the marker value override documents must carry.
    pub fn type_marker(mut self, marker: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.type_marker(marker);
        self
    }

    /// Set the world list path (default: "worlds").
    pub fn worlds_path(mut self, path: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.worlds_path(path);
        self
    }

    /// Set the fallback height ceiling (default: 255).
    pub fn default_ceiling(mut self, ceiling: i64) -> Self {
        self.config_builder = self.config_builder.default_ceiling(ceiling);
        self
    }

    /// Set how bounded integers below their minimum are clamped.
    pub fn bounds_floor(mut self, floor: BoundsFloor) -> Self {
        self.config_builder = self.config_builder.bounds_floor(floor);
        self
    }

    /// Register one option.
    pub fn with_option(mut self, option: OptionDescriptor) -> Self {
        self.options.push(option);
        self
    }

    /// Register every option of an [`OptionSchema`].
    pub fn with_schema<T: OptionSchema>(mut self) -> Self {
        self.options.extend(T::options());
        self
    }

    /// Register every option of an existing registry.
    pub fn with_registry(mut self, registry: &OptionRegistry) -> Self {
        self.options.extend(registry.all().iter().cloned());
        self
    }

    /// Set the world height provider (default: no worlds loaded).
    pub fn with_worlds<W: WorldHeights + 'static>(mut self, worlds: Arc<W>) -> Self {
        self.worlds = worlds;
        self
    }

    /// Set the diagnostic sink (default: [`LogSink`]).
    pub fn with_sink<D: DiagnosticSink + 'static>(mut self, sink: Arc<D>) -> Self {
        self.sink = sink;
        self
    }

    /// Build the [`ConfigManager`] and load the configured directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the registry is invalid, the base document is
    /// missing or unreadable, or the engine configuration is invalid.
    pub fn build(self) -> Result<ConfigManager<S>> {
        let registry = OptionRegistry::new(self.options)?;
        ConfigManager::new(self.config_builder.build(), registry, self.worlds, self.sink)
    }

    /// Build the [`ConfigManager`] from already-parsed documents.
    ///
    /// # Errors
    ///
    /// Returns an error if the registry is invalid or `documents` is empty.
    pub fn build_from_documents<D: RawDocument>(self, documents: &[D]) -> Result<ConfigManager<S>> {
        let registry = OptionRegistry::new(self.options)?;
        ConfigManager::from_documents(
            self.config_builder.build(),
            registry,
            self.worlds,
            self.sink,
            documents,
        )
    }
}
