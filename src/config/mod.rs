//! Core configuration types and traits
//!
//! This module contains the foundational types for option management:
//! - `EngineConfig` - Configuration for the loader and validator
//! - `OptionSchema` - Trait for supplying an option catalog
//! - `OptionDescriptor` - Path, kind, bounds rule and default of one option
//! - `OptionRegistry` - Validated, read-only catalog of descriptors

mod registry;
mod schema;
mod types;

pub use registry::OptionRegistry;
pub use schema::{OptionDescriptor, OptionSchema, OptionValue, Subtype, ValueKind};

pub use types::{BoundsFloor, EngineConfig, EngineConfigBuilder};
