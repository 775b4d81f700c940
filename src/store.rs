//! Layered value store
//!
//! One [`Layer`] per qualifying document, ordered by load order. Layer 0 is
//! the base document merged onto the option defaults, so it holds a value for
//! every registered option. Override layers hold only what their document sets
//! and always name at least one world.
//!
//! A store is built once and never mutated. Reloading builds a new store.

use crate::config::{OptionDescriptor, OptionRegistry, OptionValue, ValueKind};
use crate::diagnostics::DiagnosticSink;
use crate::error::{Error, Result};
use crate::source::RawDocument;
use crate::validate::LayerValidator;
use log::{debug, info, warn};
use serde_json::{Map, Value};
use std::collections::{BTreeSet, HashMap};
use time::OffsetDateTime;

// =============================================================================
// Layer
// =============================================================================

/// Validated values contributed by one document
#[derive(Debug, Clone)]
pub struct Layer {
    index: usize,
    source: String,
    worlds: BTreeSet<String>,
    values: HashMap<String, OptionValue>,
}

impl Layer {
    /// Position in the store; 0 is the base layer
    pub fn index(&self) -> usize {
        self.index
    }

    /// Name of the document this layer was read from
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Worlds this layer applies to (empty for the base layer)
    pub fn worlds(&self) -> &BTreeSet<String> {
        &self.worlds
    }

    pub fn applies_to(&self, world: &str) -> bool {
        self.worlds.contains(world)
    }

    /// Value this layer holds for the option at `path`
    pub fn get(&self, path: &str) -> Option<&OptionValue> {
        self.values.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.values.contains_key(path)
    }

    /// Number of options this layer sets
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

// =============================================================================
// Layered Store
// =============================================================================

/// Immutable, ordered set of layers built from one load cycle
#[derive(Debug, Clone)]
pub struct LayeredStore {
    pub(crate) defaults: HashMap<String, OptionValue>,
    pub(crate) layers: Vec<Layer>,
    base_worlds: Vec<String>,
    loaded_at: OffsetDateTime,
}

impl LayeredStore {
    /// Start building a store for `registry`, validating values with `validator`
    pub fn builder<'a>(
        registry: &'a OptionRegistry,
        validator: LayerValidator<'a>,
    ) -> StoreBuilder<'a> {
        StoreBuilder::new(registry, validator)
    }

    /// All layers in index order
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Layer at `index`
    pub fn layer(&self, index: usize) -> Option<&Layer> {
        self.layers.get(index)
    }

    /// The base layer (always present)
    pub fn base(&self) -> &Layer {
        &self.layers[0]
    }

    /// Default value registered for the option at `path`
    pub fn default_value(&self, path: &str) -> Option<&OptionValue> {
        self.defaults.get(path)
    }

    /// When this store finished building
    pub fn loaded_at(&self) -> OffsetDateTime {
        self.loaded_at
    }

    /// Every world named by the base document or any override layer, sorted
    pub fn enabled_worlds(&self) -> Vec<String> {
        let mut worlds: BTreeSet<&str> = self.base_worlds.iter().map(String::as_str).collect();
        for layer in &self.layers[1..] {
            worlds.extend(layer.worlds.iter().map(String::as_str));
        }
        worlds.into_iter().map(String::from).collect()
    }

    /// Render the layer at `index` as a nested document
    ///
    /// Dotted option paths become nested objects. The base document's world
    /// list is written under `worlds_path` when exporting layer 0, and each
    /// override layer's worlds are written there for the others.
    pub fn layer_document(&self, index: usize, worlds_path: &str) -> Option<Value> {
        let layer = self.layers.get(index)?;
        let mut root = Map::new();

        let mut paths: Vec<&String> = layer.values.keys().collect();
        paths.sort();
        for path in paths {
            insert_path(&mut root, path, layer.values[path].to_json());
        }

        let worlds: Vec<&str> = if index == 0 {
            self.base_worlds.iter().map(String::as_str).collect()
        } else {
            layer.worlds.iter().map(String::as_str).collect()
        };
        if !worlds.is_empty() {
            insert_path(&mut root, worlds_path, Value::from(worlds));
        }

        Some(Value::Object(root))
    }
}

fn insert_path(root: &mut Map<String, Value>, path: &str, value: Value) {
    let mut segments = path.split('.').peekable();
    let mut current = root;

    while let Some(segment) = segments.next() {
        if segments.peek().is_none() {
            current.insert(segment.to_string(), value);
            return;
        }
        let entry = current
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        match entry {
            Value::Object(map) => current = map,
            _ => {
                warn!("Cannot export {path}: '{segment}' already holds a value");
                return;
            }
        }
    }
}

// =============================================================================
// Store Builder
// =============================================================================

/// Builds a [`LayeredStore`] from an ordered list of raw documents
pub struct StoreBuilder<'a> {
    registry: &'a OptionRegistry,
    validator: LayerValidator<'a>,
    type_path: String,
    type_marker: String,
    worlds_path: String,
}

impl<'a> StoreBuilder<'a> {
    pub fn new(registry: &'a OptionRegistry, validator: LayerValidator<'a>) -> Self {
        Self {
            registry,
            validator,
            type_path: "type".into(),
            type_marker: "world-config".into(),
            worlds_path: "worlds".into(),
        }
    }

    /// Override documents must hold `marker` at `path` (default: "world-config" at "type")
    #[must_use]
    pub fn type_marker(mut self, path: impl Into<String>, marker: impl Into<String>) -> Self {
        self.type_path = path.into();
        self.type_marker = marker.into();
        self
    }

    /// Path of the world list (default: "worlds")
    #[must_use]
    pub fn worlds_path(mut self, path: impl Into<String>) -> Self {
        self.worlds_path = path.into();
        self
    }

    /// Build the store
    ///
    /// `documents[0]` is the base document. The rest are override candidates
    /// in precedence order; candidates without the type marker or with an
    /// empty world list are dropped and do not take a layer index.
    ///
    /// # Errors
    ///
    /// - `Error::MissingBaseDocument` if `documents` is empty
    /// - `Error::UnsupportedSubtype` if the validator meets a broken descriptor
    pub fn build<D: RawDocument>(&self, documents: &[D]) -> Result<LayeredStore> {
        let (base, overrides) = documents
            .split_first()
            .ok_or_else(|| Error::MissingBaseDocument("no documents were supplied".into()))?;

        let defaults: HashMap<String, OptionValue> = self
            .registry
            .all()
            .iter()
            .map(|option| (option.path.clone(), option.default.clone()))
            .collect();

        let base_worlds: Vec<String> = sorted_worlds(base.worlds(&self.worlds_path))
            .into_iter()
            .collect();

        let mut base_values = HashMap::with_capacity(self.registry.len());
        for option in self.registry.all() {
            let value = match self.read_value(base, option) {
                Some(raw) => self.validator.validate(option, &base_worlds, raw)?,
                None => option.default.clone(),
            };
            base_values.insert(option.path.clone(), value);
        }

        let mut layers = vec![Layer {
            index: 0,
            source: base.name().to_string(),
            worlds: BTreeSet::new(),
            values: base_values,
        }];

        for doc in overrides {
            if !doc.declares_type(&self.type_path, &self.type_marker) {
                debug!(
                    "Ignoring {}: '{}' is not '{}'",
                    doc.name(),
                    self.type_path,
                    self.type_marker
                );
                continue;
            }

            let worlds = sorted_worlds(doc.worlds(&self.worlds_path));
            if worlds.is_empty() {
                debug!("Ignoring {}: no worlds declared", doc.name());
                continue;
            }
            let world_list: Vec<String> = worlds.iter().cloned().collect();

            let mut values = HashMap::new();
            for option in self.registry.all() {
                if let Some(raw) = self.read_value(doc, option) {
                    let value = self.validator.validate(option, &world_list, raw)?;
                    values.insert(option.path.clone(), value);
                }
            }

            layers.push(Layer {
                index: layers.len(),
                source: doc.name().to_string(),
                worlds,
                values,
            });
        }

        info!(
            "Built configuration store: {} layers from {} documents",
            layers.len(),
            documents.len()
        );

        Ok(LayeredStore {
            defaults,
            layers,
            base_worlds,
            loaded_at: OffsetDateTime::now_utc(),
        })
    }

    /// Read `option` from `doc`; a value of the wrong type is reported and treated as absent
    fn read_value<D: RawDocument>(&self, doc: &D, option: &OptionDescriptor) -> Option<OptionValue> {
        let path = option.path.as_str();
        if !doc.contains(path) {
            return None;
        }

        let value = match option.kind {
            ValueKind::Boolean => doc.get_bool(path).map(OptionValue::Bool),
            ValueKind::Integer => doc.get_int(path).map(OptionValue::Int),
            ValueKind::Double => doc.get_double(path).map(OptionValue::Double),
            ValueKind::String => doc.get_string(path).map(OptionValue::String),
            ValueKind::StringList => doc.get_string_list(path).map(OptionValue::StringList),
        };

        if value.is_none() {
            self.sink().warn(&format!(
                "Value for {path} in {} is not a {}, ignoring it.",
                doc.name(),
                option.kind
            ));
        }
        value
    }

    fn sink(&self) -> &dyn DiagnosticSink {
        self.validator.sink()
    }
}

fn sorted_worlds(worlds: Vec<String>) -> BTreeSet<String> {
    worlds
        .into_iter()
        .map(|w| w.trim().to_string())
        .filter(|w| !w.is_empty())
        .collect()
}
