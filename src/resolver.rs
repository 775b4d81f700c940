//! Per-world option resolution
//!
//! The effective value of an option for a world comes from the highest-index
//! layer that both applies to the world and sets the option. Layers are never
//! merged: a later applicable layer replaces the earlier value outright.
//! With no applicable override the base layer answers.

use crate::config::{OptionDescriptor, OptionValue, ValueKind};
use crate::error::{Error, Result};
use crate::store::LayeredStore;

impl LayeredStore {
    /// Index of the layer that decides `option` for `world`
    ///
    /// Always at least 0, since the base layer applies everywhere.
    pub fn last_index(&self, option: &OptionDescriptor, world: &str) -> usize {
        self.layers
            .iter()
            .skip(1)
            .filter(|layer| layer.applies_to(world) && layer.contains(&option.path))
            .map(|layer| layer.index())
            .last()
            .unwrap_or(0)
    }

    /// Effective value of `option` for `world`
    ///
    /// Never fails. If the deciding layer has no entry the registered default
    /// is returned, and then the descriptor's own default.
    pub fn resolve<'a>(&'a self, option: &'a OptionDescriptor, world: &str) -> &'a OptionValue {
        self.value_at(option, self.last_index(option, world))
    }

    /// Value stored for `option` at layer `index`, falling back to the default
    pub fn value_at<'a>(&'a self, option: &'a OptionDescriptor, index: usize) -> &'a OptionValue {
        self.layers
            .get(index)
            .and_then(|layer| layer.get(&option.path))
            .or_else(|| self.defaults.get(&option.path))
            .unwrap_or(&option.default)
    }

    // =========================================================================
    // Typed accessors
    // =========================================================================

    /// # Errors
    ///
    /// `Error::TypeMismatch` if `option` is not a boolean option.
    pub fn get_bool(&self, option: &OptionDescriptor, world: &str) -> Result<bool> {
        self.get_bool_at(option, self.last_index(option, world))
    }

    /// # Errors
    ///
    /// `Error::TypeMismatch` if `option` is not an integer option.
    pub fn get_int(&self, option: &OptionDescriptor, world: &str) -> Result<i64> {
        self.get_int_at(option, self.last_index(option, world))
    }

    /// # Errors
    ///
    /// `Error::TypeMismatch` if `option` is not a double option.
    pub fn get_double(&self, option: &OptionDescriptor, world: &str) -> Result<f64> {
        self.get_double_at(option, self.last_index(option, world))
    }

    /// # Errors
    ///
    /// `Error::TypeMismatch` if `option` is not a string option.
    pub fn get_string(&self, option: &OptionDescriptor, world: &str) -> Result<String> {
        self.get_string_at(option, self.last_index(option, world))
    }

    /// # Errors
    ///
    /// `Error::TypeMismatch` if `option` is not a string list option.
    pub fn get_string_list(&self, option: &OptionDescriptor, world: &str) -> Result<Vec<String>> {
        self.get_string_list_at(option, self.last_index(option, world))
    }

    // =========================================================================
    // Index-addressed accessors
    // =========================================================================

    /// Boolean stored at layer `index`
    pub fn get_bool_at(&self, option: &OptionDescriptor, index: usize) -> Result<bool> {
        expect_kind(option, ValueKind::Boolean)?;
        Ok(self
            .typed_at(option, index, OptionValue::as_bool)
            .unwrap_or_default())
    }

    /// Integer stored at layer `index`
    pub fn get_int_at(&self, option: &OptionDescriptor, index: usize) -> Result<i64> {
        expect_kind(option, ValueKind::Integer)?;
        Ok(self
            .typed_at(option, index, OptionValue::as_int)
            .unwrap_or_default())
    }

    /// Double stored at layer `index`
    pub fn get_double_at(&self, option: &OptionDescriptor, index: usize) -> Result<f64> {
        expect_kind(option, ValueKind::Double)?;
        Ok(self
            .typed_at(option, index, OptionValue::as_double)
            .unwrap_or_default())
    }

    /// String stored at layer `index`
    pub fn get_string_at(&self, option: &OptionDescriptor, index: usize) -> Result<String> {
        expect_kind(option, ValueKind::String)?;
        Ok(self
            .typed_at(option, index, |v| v.as_str().map(String::from))
            .unwrap_or_default())
    }

    /// String list stored at layer `index`
    pub fn get_string_list_at(&self, option: &OptionDescriptor, index: usize) -> Result<Vec<String>> {
        expect_kind(option, ValueKind::StringList)?;
        Ok(self
            .typed_at(option, index, |v| v.as_string_list().map(<[String]>::to_vec))
            .unwrap_or_default())
    }

    /// Convert the value at `index`; a stored value of the wrong variant falls
    /// back to the descriptor default
    fn typed_at<T>(
        &self,
        option: &OptionDescriptor,
        index: usize,
        convert: impl Fn(&OptionValue) -> Option<T>,
    ) -> Option<T> {
        convert(self.value_at(option, index)).or_else(|| convert(&option.default))
    }
}

fn expect_kind(option: &OptionDescriptor, expected: ValueKind) -> Result<()> {
    if option.kind == expected {
        Ok(())
    } else {
        Err(Error::TypeMismatch {
            key: option.path.clone(),
            expected: expected.to_string(),
            actual: option.kind.to_string(),
        })
    }
}
