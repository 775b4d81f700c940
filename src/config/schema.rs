//! Option descriptors and typed values
//!
//! # Overview
//!
//! Every configurable option is described once by an [`OptionDescriptor`]:
//!
//! - **Path**: dotted document path, also the option's identity (`"spawn.zombie_chance"`)
//! - **Kind**: one of boolean, integer, double, string, list of strings
//! - **Subtype**: optional bounds rule for integer options
//! - **Default**: typed value used when the base document omits the option
//!
//! ```rust
//! use wcman::{OptionDescriptor, OptionValue, ValueKind};
//!
//! let chance = OptionDescriptor::integer("spawn.zombie_chance", 20).percentage();
//! let ceiling = OptionDescriptor::integer("build.max_y", 128).vertical();
//! let health = OptionDescriptor::integer("player.respawn_health", 20).bounded(1, 20);
//! let worlds = OptionDescriptor::string_list("tweaks.disabled_in", &["lobby"]);
//!
//! assert_eq!(chance.kind, ValueKind::Integer);
//! assert_eq!(worlds.default, OptionValue::from(vec!["lobby".to_string()]));
//! ```
//!
//! Descriptors compare and hash by path only, so two descriptors with the same
//! path are the same option even if their metadata differ.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

// =============================================================================
// Value Kinds
// =============================================================================

/// Declared value type of an option
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    /// `true` / `false`
    Boolean,
    /// Signed 64-bit integer
    Integer,
    /// 64-bit float
    Double,
    /// Free text
    String,
    /// List of strings
    StringList,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Boolean => "boolean",
            ValueKind::Integer => "integer",
            ValueKind::Double => "double",
            ValueKind::String => "string",
            ValueKind::StringList => "string list",
        };
        f.write_str(name)
    }
}

// =============================================================================
// Validation Subtypes
// =============================================================================

/// Bounds rule applied to an integer option when a layer is built
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case", tag = "rule")]
pub enum Subtype {
    /// Clamped to `[0, 100]`
    Percentage,
    /// Clamped to `[0, max height]` of every world the layer declares
    VerticalCoordinate,
    /// Clamped to a custom `[min, max]` range
    BoundedInteger { min: i64, max: i64 },
}

impl fmt::Display for Subtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Subtype::Percentage => f.write_str("percentage"),
            Subtype::VerticalCoordinate => f.write_str("vertical coordinate"),
            Subtype::BoundedInteger { min, max } => write!(f, "bounded integer [{min}, {max}]"),
        }
    }
}

// =============================================================================
// Option Values
// =============================================================================

/// A typed option value
///
/// Serialized untagged so an exported layer reads like a plain document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Int(i64),
    Double(f64),
    String(String),
    StringList(Vec<String>),
}

impl OptionValue {
    /// Kind of this value
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match self {
            OptionValue::Bool(_) => ValueKind::Boolean,
            OptionValue::Int(_) => ValueKind::Integer,
            OptionValue::Double(_) => ValueKind::Double,
            OptionValue::String(_) => ValueKind::String,
            OptionValue::StringList(_) => ValueKind::StringList,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            OptionValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            OptionValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_double(&self) -> Option<f64> {
        match self {
            OptionValue::Double(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            OptionValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_string_list(&self) -> Option<&[String]> {
        match self {
            OptionValue::StringList(list) => Some(list),
            _ => None,
        }
    }

    /// Convert into a JSON value (used when exporting a layer)
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            OptionValue::Bool(b) => serde_json::Value::Bool(*b),
            OptionValue::Int(i) => serde_json::Value::from(*i),
            OptionValue::Double(d) => serde_json::Number::from_f64(*d)
                .map_or(serde_json::Value::Null, serde_json::Value::Number),
            OptionValue::String(s) => serde_json::Value::String(s.clone()),
            OptionValue::StringList(list) => serde_json::Value::from(list.clone()),
        }
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        OptionValue::Bool(value)
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        OptionValue::Int(value)
    }
}

impl From<f64> for OptionValue {
    fn from(value: f64) -> Self {
        OptionValue::Double(value)
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        OptionValue::String(value)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::String(value.to_string())
    }
}

impl From<Vec<String>> for OptionValue {
    fn from(value: Vec<String>) -> Self {
        OptionValue::StringList(value)
    }
}

// =============================================================================
// Option Descriptor
// =============================================================================

/// Immutable description of one configuration option
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionDescriptor {
    /// Dotted document path; the option's identity
    pub path: String,

    /// Declared value kind
    pub kind: ValueKind,

    /// Optional bounds rule (integer options only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtype: Option<Subtype>,

    /// Value used when the base document omits the option
    pub default: OptionValue,
}

impl OptionDescriptor {
    // =========================================================================
    // Kind-specific constructors
    // =========================================================================

    pub fn boolean(path: impl Into<String>, default: bool) -> Self {
        Self::with_default(path, ValueKind::Boolean, OptionValue::Bool(default))
    }

    pub fn integer(path: impl Into<String>, default: i64) -> Self {
        Self::with_default(path, ValueKind::Integer, OptionValue::Int(default))
    }

    pub fn double(path: impl Into<String>, default: f64) -> Self {
        Self::with_default(path, ValueKind::Double, OptionValue::Double(default))
    }

    pub fn string(path: impl Into<String>, default: impl Into<String>) -> Self {
        Self::with_default(path, ValueKind::String, OptionValue::String(default.into()))
    }

    pub fn string_list(path: impl Into<String>, default: &[&str]) -> Self {
        let list = default.iter().map(|s| (*s).to_string()).collect();
        Self::with_default(path, ValueKind::StringList, OptionValue::StringList(list))
    }

    /// Create a descriptor from parts without checking that `default` matches `kind`.
    ///
    /// [`OptionRegistry::new`](super::OptionRegistry::new) rejects mismatches.
    pub fn with_default(path: impl Into<String>, kind: ValueKind, default: OptionValue) -> Self {
        Self {
            path: path.into(),
            kind,
            subtype: None,
            default,
        }
    }

    // =========================================================================
    // Subtype setters (builder pattern)
    // =========================================================================

    /// Clamp this option to `[0, 100]`
    #[must_use]
    pub fn percentage(mut self) -> Self {
        self.subtype = Some(Subtype::Percentage);
        self
    }

    /// Clamp this option to the height of the worlds a layer applies to
    #[must_use]
    pub fn vertical(mut self) -> Self {
        self.subtype = Some(Subtype::VerticalCoordinate);
        self
    }

    /// Clamp this option to `[min, max]`
    #[must_use]
    pub fn bounded(mut self, min: i64, max: i64) -> Self {
        self.subtype = Some(Subtype::BoundedInteger { min, max });
        self
    }

    // =========================================================================
    // Schema validation
    // =========================================================================

    /// Validate the descriptor definition itself
    ///
    /// Checks:
    /// - Path is not empty
    /// - Default value matches the declared kind
    /// - Subtype is only used on integer options
    /// - Bounded range has min <= max
    pub fn validate_schema(&self) -> crate::Result<()> {
        if self.path.trim().is_empty() {
            return Err(crate::Error::InvalidDescriptor {
                path: self.path.clone(),
                reason: "path cannot be empty".into(),
            });
        }

        if self.default.kind() != self.kind {
            return Err(crate::Error::InvalidDescriptor {
                path: self.path.clone(),
                reason: format!(
                    "default value is {} but option is declared as {}",
                    self.default.kind(),
                    self.kind
                ),
            });
        }

        match self.subtype {
            Some(subtype) if self.kind != ValueKind::Integer => {
                Err(crate::Error::UnsupportedSubtype {
                    path: self.path.clone(),
                    subtype: subtype.to_string(),
                    kind: self.kind.to_string(),
                })
            }
            Some(Subtype::BoundedInteger { min, max }) if min > max => {
                Err(crate::Error::InvalidDescriptor {
                    path: self.path.clone(),
                    reason: format!("min ({min}) cannot be greater than max ({max})"),
                })
            }
            _ => Ok(()),
        }
    }
}

impl PartialEq for OptionDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for OptionDescriptor {}

impl Hash for OptionDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.path.hash(state);
    }
}

// =============================================================================
// Option Schema Trait
// =============================================================================

/// Trait for types that define an option catalog
///
/// Implement this for a marker type in the host application, then build the
/// registry with [`OptionRegistry::from_schema`](super::OptionRegistry::from_schema).
pub trait OptionSchema {
    /// Every option the host understands
    fn options() -> Vec<OptionDescriptor>;
}

// Empty catalog
impl OptionSchema for () {
    fn options() -> Vec<OptionDescriptor> {
        Vec::new()
    }
}

// =============================================================================
// Tests
// =============================================================================
