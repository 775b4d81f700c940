//! Event system for configuration reloads
//!
//! Provides callbacks fired after a new store has been published.

use crate::config::OptionValue;
use crate::store::LayeredStore;
use std::collections::HashMap;
use crate::sync::RwLockExt;
use std::sync::{Arc, RwLock};

/// Type alias for a reload callback receiving (`previous`, `current`)
pub type ReloadCallback = Arc<dyn Fn(&LayeredStore, &LayeredStore) + Send + Sync>;

/// Type alias for an option watch callback receiving (`path`, `old_value`, `new_value`)
pub type WatchCallback = Arc<dyn Fn(&str, &OptionValue, &OptionValue) + Send + Sync>;

/// Manages listeners for store reloads
pub struct EventManager {
    /// Called for every reload
    reload_listeners: RwLock<Vec<ReloadCallback>>,

    /// Called when an option's base value changes across a reload
    watchers: RwLock<HashMap<String, Vec<WatchCallback>>>,
}

impl EventManager {
    /// Create a new event manager
    #[must_use]
    pub fn new() -> Self {
        Self {
            reload_listeners: RwLock::new(Vec::new()),
            watchers: RwLock::new(HashMap::new()),
        }
    }

    /// Register a listener called after every reload
    pub fn on_reload<F>(&self, callback: F)
    where
        F: Fn(&LayeredStore, &LayeredStore) + Send + Sync + 'static,
    {
        self.reload_listeners.write_recovered().push(Arc::new(callback));
    }

    /// Register a listener for one option's base-layer value
    ///
    /// Fires only when a reload changes the value.
    pub fn watch<F>(&self, path: &str, callback: F)
    where
        F: Fn(&str, &OptionValue, &OptionValue) + Send + Sync + 'static,
    {
        self.watchers
            .write_recovered()
            .entry(path.to_string())
            .or_default()
            .push(Arc::new(callback));
    }

    /// Remove all listeners for a specific option
    pub fn unwatch(&self, path: &str) {
        self.watchers.write_recovered().remove(path);
    }

    /// Clear all listeners
    pub fn clear(&self) {
        self.reload_listeners.write_recovered().clear();
        self.watchers.write_recovered().clear();
    }

    /// Notify listeners that `current` replaced `previous`
    ///
    /// Callbacks run outside the internal locks, so they may register more listeners.
    pub fn notify(&self, previous: &LayeredStore, current: &LayeredStore) {
        let listeners: Vec<ReloadCallback> = self.reload_listeners.read_recovered().clone();
        for callback in &listeners {
            callback(previous, current);
        }

        let watched: Vec<(String, Vec<WatchCallback>)> = self
            .watchers
            .read_recovered()
            .iter()
            .map(|(path, callbacks)| (path.clone(), callbacks.clone()))
            .collect();

        for (path, callbacks) in watched {
            let (Some(old), Some(new)) = (previous.base().get(&path), current.base().get(&path))
            else {
                continue;
            };
            if old == new {
                continue;
            }
            for callback in &callbacks {
                callback(&path, old, new);
            }
        }
    }
}

impl Default for EventManager {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================
