//! World height provider
//!
//! Vertical-coordinate options are clamped against the height of the worlds a
//! layer applies to. The host supplies those heights through [`WorldHeights`].

use std::collections::BTreeMap;

/// Supplies the maximum build height of loaded worlds
pub trait WorldHeights: Send + Sync {
    /// Whether the world is currently loaded
    fn is_loaded(&self, world: &str) -> bool;

    /// Maximum height of a loaded world
    ///
    /// Only called for worlds where [`is_loaded`](WorldHeights::is_loaded) returned `true`.
    fn max_height(&self, world: &str) -> i64;

    /// Names of all loaded worlds, in a stable order
    fn loaded_worlds(&self) -> Vec<String>;
}

/// Fixed set of worlds and their heights
///
/// Useful for hosts whose worlds never change at runtime, and for tests.
#[derive(Debug, Clone, Default)]
pub struct StaticWorlds {
    heights: BTreeMap<String, i64>,
}

impl StaticWorlds {
    /// Create a provider with no worlds loaded
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a loaded world
    #[must_use]
    pub fn world(mut self, name: impl Into<String>, max_height: i64) -> Self {
        self.heights.insert(name.into(), max_height);
        self
    }
}

impl WorldHeights for StaticWorlds {
    fn is_loaded(&self, world: &str) -> bool {
        self.heights.contains_key(world)
    }

    fn max_height(&self, world: &str) -> i64 {
        self.heights.get(world).copied().unwrap_or_default()
    }

    fn loaded_worlds(&self) -> Vec<String> {
        self.heights.keys().cloned().collect()
    }
}
