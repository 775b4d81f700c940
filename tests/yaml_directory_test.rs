//! YAML Directory Integration Tests
//!
//! Loads a directory of `.yml` documents, the layout plugin-style servers use.

mod common;

use common::{TestOptions, test_worlds};
use std::sync::Arc;
use tempfile::tempdir;
use wcman::{ConfigManager, MemorySink, YamlStorage};

const BASE: &str = r#"
worlds:
  - world
general:
  tag: "[hm]"
spawn:
  zombie_chance: 120
mobs:
  blocked:
    - creeper
    - witch
"#;

const NETHER: &str = r#"
type: world-config
worlds:
  - nether
build:
  max_y: 200
mobs:
  speed: 1.5
"#;

const MESSAGES: &str = r#"
type: messages
worlds: [nether]
mobs:
  speed: 9.0
"#;

#[test]
fn test_yaml_directory_layers() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("config.yml"), BASE).unwrap();
    std::fs::write(dir.path().join("nether.yml"), NETHER).unwrap();
    std::fs::write(dir.path().join("messages.yml"), MESSAGES).unwrap();
    std::fs::write(dir.path().join("ignored.json"), "{}").unwrap();

    let sink = Arc::new(MemorySink::new());
    let manager = ConfigManager::builder("test-app")
        .config_dir(dir.path())
        .storage(YamlStorage::new())
        .with_schema::<TestOptions>()
        .with_worlds(Arc::new(test_worlds()))
        .with_sink(sink.clone())
        .build()
        .unwrap();

    assert_eq!(manager.snapshot().layers().len(), 2);
    assert_eq!(manager.get_string("general.tag", "nether").unwrap(), "[hm]");
    assert_eq!(manager.get_int("spawn.zombie_chance", "world").unwrap(), 100);
    assert_eq!(manager.get_int("build.max_y", "nether").unwrap(), 128);
    assert_eq!(manager.get_int("build.max_y", "world").unwrap(), 200);
    assert_eq!(manager.get_double("mobs.speed", "nether").unwrap(), 1.5);
    assert_eq!(manager.get_double("mobs.speed", "world").unwrap(), 1.0);
    assert_eq!(
        manager.get_string_list("mobs.blocked", "end").unwrap(),
        vec!["creeper", "witch"]
    );
    assert_eq!(manager.enabled_worlds(), vec!["nether", "world"]);
    assert_eq!(sink.len(), 2);
}

#[test]
fn test_yaml_export_round_trip() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("config.yml"), BASE).unwrap();

    let manager = ConfigManager::builder("test-app")
        .config_dir(dir.path())
        .storage(YamlStorage::new())
        .with_schema::<TestOptions>()
        .with_sink(Arc::new(MemorySink::new()))
        .build()
        .unwrap();

    let path = manager.export_base().unwrap();
    assert_eq!(path, dir.path().join("config.yml"));

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("zombie_chance: 100"));

    manager.reload().unwrap();
    assert_eq!(manager.get_int("spawn.zombie_chance", "world").unwrap(), 100);
    assert_eq!(manager.get_int("mobs.limit", "world").unwrap(), 50);
}
