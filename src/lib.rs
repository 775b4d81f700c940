//! # wcman - World Config Manager
//!
//! Layered, per-world configuration for servers that host several worlds.
//! A base document supplies every option; override documents replace
//! selected options for the worlds they name.
//!
//! ## Features
//!
//! - **Typed Options**: Boolean, integer, double, string and string-list options with defaults
//! - **Bounds Validation**: Percentage, vertical-coordinate and custom range rules that clamp bad values
//! - **Per-World Overrides**: The highest-index override naming a world wins for that world
//! - **Atomic Reload**: Readers hold `Arc` snapshots; a reload swaps one pointer
//! - **Pluggable Formats**: JSON always, YAML (`yaml`, default) and TOML (`toml`) via features
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use wcman::{ConfigManager, OptionDescriptor, StaticWorlds};
//! use std::sync::Arc;
//!
//! # fn example() -> wcman::Result<()> {
//! let manager = ConfigManager::builder("my-server")
//!     .config_dir("~/.config/my-server")
//!     .with_option(OptionDescriptor::integer("spawn.zombie_chance", 20).percentage())
//!     .with_option(OptionDescriptor::integer("build.max_y", 200).vertical())
//!     .with_option(OptionDescriptor::string_list("mobs.blocked", &[]))
//!     .with_worlds(Arc::new(StaticWorlds::new().world("world", 256).world("nether", 128)))
//!     .build()?;
//!
//! let max_y = manager.get_int("build.max_y", "nether")?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Document Layout
//!
//! The base document (`config.json` by default) holds values for any option;
//! missing options take their defaults. Every other file in the directory with
//! the same extension is an override candidate, applied in file-name order.
//! A candidate only becomes a layer if it carries the type marker and names
//! at least one world:
//!
//! ```json
//! {
//!   "type": "world-config",
//!   "worlds": ["world_nether"],
//!   "spawn": { "zombie_chance": 60 }
//! }
//! ```
//!
//! Other files (message catalogs and the like) can live in the same directory.
//!
//! ## Option Schema
//!
//! ```rust
//! use wcman::{OptionDescriptor, OptionRegistry, OptionSchema};
//!
//! struct HardMode;
//!
//! impl OptionSchema for HardMode {
//!     fn options() -> Vec<OptionDescriptor> {
//!         vec![
//!             OptionDescriptor::boolean("general.enabled", true),
//!             OptionDescriptor::integer("player.respawn_health", 20).bounded(1, 20),
//!         ]
//!     }
//! }
//!
//! let registry = OptionRegistry::from_schema::<HardMode>().unwrap();
//! assert!(registry.lookup("player.respawn_health").is_some());
//! ```

// Core modules
mod diagnostics;
mod error;
mod events;
mod manager;
mod resolver;
pub mod source;
pub mod storage;
mod store;
mod sync;
mod validate;
mod world;

// Grouped modules
pub mod config;

// Re-exports from core
pub use diagnostics::{DiagnosticSink, LogSink, MemorySink};
pub use error::{Error, Result};
pub use events::{EventManager, ReloadCallback, WatchCallback};
pub use manager::{ConfigManager, ConfigManagerBuilder};
pub use source::{DirectorySource, RawDocument, ValueDocument};
pub use storage::{JsonStorage, StorageBackend};
pub use store::{Layer, LayeredStore, StoreBuilder};
pub use sync::SwapCell;
pub use validate::LayerValidator;
pub use world::{StaticWorlds, WorldHeights};

#[cfg(feature = "yaml")]
pub use storage::YamlStorage;

#[cfg(feature = "toml")]
pub use storage::TomlStorage;

// Re-exports from config
pub use config::{
    BoundsFloor, EngineConfig, EngineConfigBuilder, OptionDescriptor, OptionRegistry,
    OptionSchema, OptionValue, Subtype, ValueKind,
};
