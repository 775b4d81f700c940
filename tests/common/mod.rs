//! Common test utilities for wcman integration tests
//!
//! Provides a shared option catalog, a temp-dir fixture and document helpers.

#![allow(dead_code)]

use serde_json::{Value, json};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;
use wcman::{
    ConfigManager, MemorySink, OptionDescriptor, OptionSchema, StaticWorlds, ValueDocument,
};

/// Route library logs to the test harness output
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// =============================================================================
// Test Option Catalog
// =============================================================================

/// A catalog covering every kind and every subtype
pub struct TestOptions;

impl OptionSchema for TestOptions {
    fn options() -> Vec<OptionDescriptor> {
        vec![
            OptionDescriptor::boolean("general.enabled", true),
            OptionDescriptor::string("general.tag", "[wc]"),
            OptionDescriptor::integer("spawn.zombie_chance", 20).percentage(),
            OptionDescriptor::integer("build.max_y", 200).vertical(),
            OptionDescriptor::integer("player.respawn_health", 20).bounded(1, 20),
            OptionDescriptor::integer("mobs.limit", 50),
            OptionDescriptor::double("mobs.speed", 1.0),
            OptionDescriptor::string_list("mobs.blocked", &["creeper"]),
        ]
    }
}

/// Worlds used across tests: `world` (256), `nether` (128), `end` (256)
pub fn test_worlds() -> StaticWorlds {
    StaticWorlds::new()
        .world("world", 256)
        .world("nether", 128)
        .world("end", 256)
}

/// An override document for `worlds` with `body` merged in
pub fn overlay(worlds: &[&str], body: Value) -> Value {
    let mut doc = body;
    doc["type"] = json!("world-config");
    doc["worlds"] = json!(worlds);
    doc
}

/// Name documents `doc0.json`, `doc1.json`, ...
pub fn documents(values: Vec<Value>) -> Vec<ValueDocument> {
    values
        .into_iter()
        .enumerate()
        .map(|(i, v)| ValueDocument::new(format!("doc{i}.json"), v))
        .collect()
}

/// Build a manager over in-memory documents
pub fn manager_from(values: Vec<Value>) -> (ConfigManager, Arc<MemorySink>) {
    init_logging();
    let sink = Arc::new(MemorySink::new());
    let manager = ConfigManager::builder("test-app")
        .config_dir("/nonexistent/test-app")
        .with_schema::<TestOptions>()
        .with_worlds(Arc::new(test_worlds()))
        .with_sink(sink.clone())
        .build_from_documents(&documents(values))
        .expect("manager should build");
    (manager, sink)
}

pub fn write_json(dir: &Path, name: &str, value: &Value) {
    std::fs::write(
        dir.join(name),
        serde_json::to_string_pretty(value).expect("serialize"),
    )
    .expect("write test document");
}

// =============================================================================
// Test Fixture
// =============================================================================

/// Test fixture that manages a temporary JSON config directory
pub struct TestFixture {
    pub temp_dir: TempDir,
    pub sink: Arc<MemorySink>,
}

impl TestFixture {
    /// Create a fixture with a base document
    pub fn new(base: Value) -> Self {
        init_logging();
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        write_json(temp_dir.path(), "config.json", &base);
        Self {
            temp_dir,
            sink: Arc::new(MemorySink::new()),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn write(&self, name: &str, value: &Value) {
        write_json(self.path(), name, value);
    }

    pub fn remove(&self, name: &str) {
        std::fs::remove_file(self.path().join(name)).expect("remove test document");
    }

    /// Build a manager reading this fixture's directory
    pub fn manager(&self) -> ConfigManager {
        ConfigManager::builder("test-app")
            .config_dir(self.path())
            .with_schema::<TestOptions>()
            .with_worlds(Arc::new(test_worlds()))
            .with_sink(self.sink.clone())
            .build()
            .expect("manager should build")
    }
}
