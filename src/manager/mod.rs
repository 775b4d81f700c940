//! Main configuration manager module
//!
//! This module contains the [`ConfigManager`] struct which is the primary entry point
//! for loading layered configuration and reading per-world option values.

use crate::config::{EngineConfig, OptionRegistry};
use crate::diagnostics::DiagnosticSink;
use crate::error::Result;
use crate::events::EventManager;
use crate::source::{DirectorySource, RawDocument};
use crate::storage::{JsonStorage, StorageBackend};
use crate::store::LayeredStore;
use crate::sync::{MutexExt, SwapCell};
use crate::validate::LayerValidator;
use crate::world::WorldHeights;

use log::info;
use std::sync::{Arc, Mutex};

mod builder;
mod operations;

pub use builder::ConfigManagerBuilder;

/// Owns the option registry, the collaborators and the current store snapshot.
///
/// - **Load/Reload**: Read the base and override documents, build a new store
///   and publish it in one pointer swap
/// - **Per-World Access**: Typed getters by option path and world name
/// - **Snapshots**: Hand out `Arc<LayeredStore>` for lock-free reads
/// - **Reload Events**: Callbacks after each successful reload
///
/// # Example
///
/// ```rust,no_run
/// use wcman::{ConfigManager, OptionDescriptor, StaticWorlds};
/// use std::sync::Arc;
///
/// let manager = ConfigManager::builder("my-server")
///     .config_dir("/srv/my-server/config")
///     .with_option(OptionDescriptor::integer("spawn.zombie_chance", 20).percentage())
///     .with_option(OptionDescriptor::boolean("general.enabled", true))
///     .with_worlds(Arc::new(StaticWorlds::new().world("world", 256)))
///     .build()?;
///
/// let chance = manager.get_int("spawn.zombie_chance", "world")?;
/// # Ok::<(), wcman::Error>(())
/// ```
pub struct ConfigManager<S: StorageBackend = JsonStorage> {
    /// Configuration
    config: EngineConfig<S>,

    /// Catalog of known options
    registry: Arc<OptionRegistry>,

    /// World height provider for vertical-coordinate options
    worlds: Arc<dyn WorldHeights>,

    /// Receives a message for every clamped value
    sink: Arc<dyn DiagnosticSink>,

    /// Currently published store
    store: SwapCell<LayeredStore>,

    /// Reload listeners
    events: Arc<EventManager>,

    /// Serializes reloads so two builds never race to publish
    reload_mutex: Mutex<()>,
}

impl ConfigManager {
    /// Create a builder for `ConfigManager` with a fluent API.
    ///
    /// This is the recommended way to create a `ConfigManager`.
    pub fn builder(app_name: impl Into<String>) -> ConfigManagerBuilder {
        ConfigManagerBuilder::new(app_name)
    }
}

impl<S: StorageBackend> ConfigManager<S> {
    /// Create a manager and load documents from the configured directory.
    ///
    /// # Errors
    ///
    /// - `Error::Config` if the engine configuration is invalid
    /// - `Error::MissingBaseDocument` if the base document does not exist
    /// - read, parse or schema errors from the base document and registry
    pub fn new(
        config: EngineConfig<S>,
        registry: OptionRegistry,
        worlds: Arc<dyn WorldHeights>,
        sink: Arc<dyn DiagnosticSink>,
    ) -> Result<Self> {
        config.validate()?;
        let documents = DirectorySource::from_config(&config).load()?;
        Self::from_documents(config, registry, worlds, sink, &documents)
    }

    /// Create a manager from documents that were already parsed.
    ///
    /// `documents[0]` is the base document.
    ///
    /// # Errors
    ///
    /// Same as [`ConfigManager::new`], minus the file errors.
    pub fn from_documents<D: RawDocument>(
        config: EngineConfig<S>,
        registry: OptionRegistry,
        worlds: Arc<dyn WorldHeights>,
        sink: Arc<dyn DiagnosticSink>,
        documents: &[D],
    ) -> Result<Self> {
        config.validate()?;
        let store = build_store(&config, &registry, &*worlds, &*sink, documents)?;

        info!(
            "Initialized wcman ConfigManager at {:?} with {} options",
            config.config_dir,
            registry.len()
        );

        Ok(Self {
            config,
            registry: Arc::new(registry),
            worlds,
            sink,
            store: SwapCell::new(store),
            events: Arc::new(EventManager::new()),
            reload_mutex: Mutex::new(()),
        })
    }

    /// Get the configuration
    pub fn config(&self) -> &EngineConfig<S> {
        &self.config
    }

    /// Get the option registry
    pub fn registry(&self) -> &OptionRegistry {
        &self.registry
    }

    /// Get the event manager for registering reload listeners
    pub fn events(&self) -> &Arc<EventManager> {
        &self.events
    }

    /// Take a snapshot of the current store.
    ///
    /// The snapshot stays valid and unchanged across later reloads.
    pub fn snapshot(&self) -> Arc<LayeredStore> {
        self.store.load()
    }

    /// Re-read the configured directory and publish the new store.
    ///
    /// The directory is read under the reload lock, so a slower reload can
    /// never publish documents older than the ones a faster reload already
    /// published. On error the previous store stays published.
    ///
    /// # Errors
    ///
    /// Same as [`ConfigManager::new`].
    pub fn reload(&self) -> Result<Arc<LayeredStore>> {
        let _guard = self.reload_mutex.lock_recovered();
        let documents = DirectorySource::from_config(&self.config).load()?;
        self.publish(&documents)
    }

    /// Publish a store built from already-parsed documents.
    ///
    /// # Errors
    ///
    /// `Error::MissingBaseDocument` if `documents` is empty, or a schema error.
    pub fn reload_from<D: RawDocument>(&self, documents: &[D]) -> Result<Arc<LayeredStore>> {
        let _guard = self.reload_mutex.lock_recovered();
        self.publish(documents)
    }

    /// Build, swap and notify. Callers hold `reload_mutex`.
    fn publish<D: RawDocument>(&self, documents: &[D]) -> Result<Arc<LayeredStore>> {
        let store = build_store(
            &self.config,
            &self.registry,
            &*self.worlds,
            &*self.sink,
            documents,
        )?;
        let previous = self.store.swap(store);
        let current = self.store.load();

        info!("Reloaded configuration: {} layers", current.layers().len());
        self.events.notify(&previous, &current);

        Ok(current)
    }
}

fn build_store<S: StorageBackend, D: RawDocument>(
    config: &EngineConfig<S>,
    registry: &OptionRegistry,
    worlds: &dyn WorldHeights,
    sink: &dyn DiagnosticSink,
    documents: &[D],
) -> Result<LayeredStore> {
    let validator = LayerValidator::new(worlds, sink)
        .default_ceiling(config.default_ceiling)
        .bounds_floor(config.bounds_floor);

    LayeredStore::builder(registry, validator)
        .type_marker(config.type_path.as_str(), config.type_marker.as_str())
        .worlds_path(config.worlds_path.as_str())
        .build(documents)
}
