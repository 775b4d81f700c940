//! Raw configuration documents
//!
//! The layered store never touches a file format directly. It reads through
//! the narrow [`RawDocument`] trait, which any parser can implement.
//! [`ValueDocument`] is the implementation used for files loaded through a
//! [`StorageBackend`](crate::StorageBackend), and [`DirectorySource`]
//! discovers those files on disk.

mod directory;

pub use directory::DirectorySource;

use serde_json::Value;

/// Type-aware read access to one parsed configuration document
///
/// Every getter returns `None` when the path is absent *or* holds a value of
/// another type; use [`contains`](RawDocument::contains) to tell them apart.
pub trait RawDocument {
    /// Name used in diagnostics (usually the file name)
    fn name(&self) -> &str;

    /// Whether anything is set at `path`
    fn contains(&self, path: &str) -> bool;

    fn get_bool(&self, path: &str) -> Option<bool>;

    fn get_int(&self, path: &str) -> Option<i64>;

    fn get_double(&self, path: &str) -> Option<f64>;

    fn get_string(&self, path: &str) -> Option<String>;

    fn get_string_list(&self, path: &str) -> Option<Vec<String>>;

    /// Whether the document carries `marker` at `path`
    fn declares_type(&self, path: &str, marker: &str) -> bool {
        self.get_string(path).as_deref() == Some(marker)
    }

    /// World names listed at `path` (empty if absent or malformed)
    fn worlds(&self, path: &str) -> Vec<String> {
        self.get_string_list(path).unwrap_or_default()
    }
}

// =============================================================================
// JSON tree document
// =============================================================================

/// A document backed by a parsed `serde_json::Value` tree
///
/// Paths are dotted (`"spawn.zombie.chance"`) and walk nested objects.
/// A `null` leaf counts as absent, which is how YAML renders `key:` with no value.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueDocument {
    name: String,
    root: Value,
}

impl ValueDocument {
    pub fn new(name: impl Into<String>, root: Value) -> Self {
        Self {
            name: name.into(),
            root,
        }
    }

    /// The whole parsed tree
    pub fn root(&self) -> &Value {
        &self.root
    }

    fn lookup(&self, path: &str) -> Option<&Value> {
        let mut current = &self.root;
        for segment in path.split('.') {
            current = current.as_object()?.get(segment)?;
        }
        (!current.is_null()).then_some(current)
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

impl RawDocument for ValueDocument {
    fn name(&self) -> &str {
        &self.name
    }

    fn contains(&self, path: &str) -> bool {
        self.lookup(path).is_some()
    }

    fn get_bool(&self, path: &str) -> Option<bool> {
        self.lookup(path)?.as_bool()
    }

    fn get_int(&self, path: &str) -> Option<i64> {
        let value = self.lookup(path)?;
        value.as_i64().or_else(|| {
            // Whole floats such as `10.0` are accepted as integers
            value
                .as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64)
                .map(|f| f as i64)
        })
    }

    fn get_double(&self, path: &str) -> Option<f64> {
        self.lookup(path)?.as_f64()
    }

    fn get_string(&self, path: &str) -> Option<String> {
        scalar_to_string(self.lookup(path)?)
    }

    fn get_string_list(&self, path: &str) -> Option<Vec<String>> {
        let items = self.lookup(path)?.as_array()?;
        Some(items.iter().filter_map(scalar_to_string).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> ValueDocument {
        ValueDocument::new(
            "nether.yml",
            json!({
                "type": "world-config",
                "worlds": ["world_nether", "world_the_end"],
                "spawn": {
                    "chance": 40,
                    "speed": 1.25,
                    "whole": 10.0,
                    "enabled": true,
                    "name": "zombie",
                    "blocked": ["creeper", 3, true, {"nested": 1}],
                    "empty": null
                }
            }),
        )
    }

    #[test]
    fn test_dotted_lookup() {
        let doc = sample();

        assert!(doc.contains("spawn.chance"));
        assert!(!doc.contains("spawn.missing"));
        assert!(!doc.contains("spawn.chance.deeper"));
        assert!(!doc.contains("spawn.empty"));
        assert_eq!(doc.name(), "nether.yml");
    }

    #[test]
    fn test_typed_getters() {
        let doc = sample();

        assert_eq!(doc.get_int("spawn.chance"), Some(40));
        assert_eq!(doc.get_int("spawn.whole"), Some(10));
        assert_eq!(doc.get_int("spawn.speed"), None);
        assert_eq!(doc.get_double("spawn.speed"), Some(1.25));
        assert_eq!(doc.get_double("spawn.chance"), Some(40.0));
        assert_eq!(doc.get_bool("spawn.enabled"), Some(true));
        assert_eq!(doc.get_bool("spawn.name"), None);
        assert_eq!(doc.get_string("spawn.name").as_deref(), Some("zombie"));
        assert_eq!(doc.get_string("spawn.chance").as_deref(), Some("40"));
    }

    #[test]
    fn test_string_list_skips_non_scalars() {
        let doc = sample();

        assert_eq!(
            doc.get_string_list("spawn.blocked"),
            Some(vec!["creeper".into(), "3".into(), "true".into()])
        );
        assert_eq!(doc.get_string_list("spawn.name"), None);
    }

    #[test]
    fn test_marker_and_worlds() {
        let doc = sample();

        assert!(doc.declares_type("type", "world-config"));
        assert!(!doc.declares_type("type", "messages"));
        assert_eq!(doc.worlds("worlds"), vec!["world_nether", "world_the_end"]);
        assert!(doc.worlds("spawn.name").is_empty());
    }
}
