use crate::config::{OptionDescriptor, OptionValue};
use crate::error::{Error, Result};
use crate::manager::ConfigManager;
use crate::storage::StorageBackend;

use log::info;
use std::path::{Path, PathBuf};

impl<S: StorageBackend> ConfigManager<S> {
    /// Look up a registered option.
    ///
    /// # Errors
    ///
    /// Returns `Error::OptionNotFound` if no option is registered at `path`.
    pub fn option(&self, path: &str) -> Result<&OptionDescriptor> {
        self.registry
            .lookup(path)
            .ok_or_else(|| Error::OptionNotFound(path.to_string()))
    }

    /// Effective value of the option at `path` for `world`.
    ///
    /// # Errors
    ///
    /// Returns `Error::OptionNotFound` for an unregistered path.
    pub fn resolve(&self, path: &str, world: &str) -> Result<OptionValue> {
        let option = self.option(path)?;
        Ok(self.snapshot().resolve(option, world).clone())
    }

    // =========================================================================
    // Typed getters
    // =========================================================================
    //
    // Each getter reads one snapshot, so a concurrent reload is either fully
    // visible or not at all.

    /// # Errors
    ///
    /// `Error::OptionNotFound` or `Error::TypeMismatch`.
    pub fn get_bool(&self, path: &str, world: &str) -> Result<bool> {
        self.snapshot().get_bool(self.option(path)?, world)
    }

    /// # Errors
    ///
    /// `Error::OptionNotFound` or `Error::TypeMismatch`.
    pub fn get_int(&self, path: &str, world: &str) -> Result<i64> {
        self.snapshot().get_int(self.option(path)?, world)
    }

    /// # Errors
    ///
    /// `Error::OptionNotFound` or `Error::TypeMismatch`.
    pub fn get_double(&self, path: &str, world: &str) -> Result<f64> {
        self.snapshot().get_double(self.option(path)?, world)
    }

    /// # Errors
    ///
    /// `Error::OptionNotFound` or `Error::TypeMismatch`.
    pub fn get_string(&self, path: &str, world: &str) -> Result<String> {
        self.snapshot().get_string(self.option(path)?, world)
    }

    /// # Errors
    ///
    /// `Error::OptionNotFound` or `Error::TypeMismatch`.
    pub fn get_string_list(&self, path: &str, world: &str) -> Result<Vec<String>> {
        self.snapshot().get_string_list(self.option(path)?, world)
    }

    /// Every world named by the loaded documents, sorted.
    pub fn enabled_worlds(&self) -> Vec<String> {
        self.snapshot().enabled_worlds()
    }

    // =========================================================================
    // Export
    // =========================================================================

    /// Rewrite the base document with every option's effective base value.
    ///
    /// Options missing from the file are written with their defaults, and
    /// clamped values are written clamped. Keys the registry does not know
    /// are dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn export_base(&self) -> Result<PathBuf> {
        let path = self.config.base_path();
        self.export_base_to(&path)?;
        Ok(path)
    }

    /// Write the effective base values to `path` in the configured format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn export_base_to(&self, path: &Path) -> Result<()> {
        let snapshot = self.snapshot();
        let document = snapshot
            .layer_document(0, &self.config.worlds_path)
            .ok_or_else(|| Error::Config("store has no base layer".into()))?;

        self.config.storage.write(path, &document)?;
        info!("Exported base configuration to {}", path.display());
        Ok(())
    }
}
