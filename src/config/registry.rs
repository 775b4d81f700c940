//! Static catalog of option descriptors

use super::schema::{OptionDescriptor, OptionSchema};
use crate::error::{Error, Result};
use std::collections::HashMap;

/// Read-only catalog of every option the host understands
///
/// Built once at startup. Construction validates each descriptor, so a
/// registry that exists is always well formed.
#[derive(Debug, Clone, Default)]
pub struct OptionRegistry {
    options: Vec<OptionDescriptor>,
    by_path: HashMap<String, usize>,
}

impl OptionRegistry {
    /// Build a registry from descriptors, preserving their order
    ///
    /// # Errors
    ///
    /// Returns a schema error if a descriptor is malformed or a path is registered twice.
    pub fn new(options: Vec<OptionDescriptor>) -> Result<Self> {
        let mut by_path = HashMap::with_capacity(options.len());

        for (idx, option) in options.iter().enumerate() {
            option.validate_schema()?;
            if by_path.insert(option.path.clone(), idx).is_some() {
                return Err(Error::InvalidDescriptor {
                    path: option.path.clone(),
                    reason: "path is registered more than once".into(),
                });
            }
        }

        Ok(Self { options, by_path })
    }

    /// Build a registry from an [`OptionSchema`] implementation
    ///
    /// # Errors
    ///
    /// Same as [`OptionRegistry::new`].
    pub fn from_schema<T: OptionSchema>() -> Result<Self> {
        Self::new(T::options())
    }

    /// Find the descriptor registered at `path`
    pub fn lookup(&self, path: &str) -> Option<&OptionDescriptor> {
        self.by_path.get(path).map(|&idx| &self.options[idx])
    }

    /// All descriptors in registration order
    pub fn all(&self) -> &[OptionDescriptor] {
        &self.options
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ValueKind;

    struct Catalog;

    impl OptionSchema for Catalog {
        fn options() -> Vec<OptionDescriptor> {
            vec![
                OptionDescriptor::boolean("general.enabled", true),
                OptionDescriptor::integer("spawn.chance", 10).percentage(),
                OptionDescriptor::string("general.tag", "[wc]"),
            ]
        }
    }

    #[test]
    fn test_lookup_and_order() {
        let registry = OptionRegistry::from_schema::<Catalog>().unwrap();

        assert_eq!(registry.len(), 3);
        assert_eq!(registry.all()[1].path, "spawn.chance");
        assert_eq!(
            registry.lookup("general.tag").map(|o| o.kind),
            Some(ValueKind::String)
        );
        assert!(registry.lookup("missing.path").is_none());
    }

    #[test]
    fn test_duplicate_path_rejected() {
        let result = OptionRegistry::new(vec![
            OptionDescriptor::integer("a", 1),
            OptionDescriptor::boolean("a", false),
        ]);

        assert!(matches!(result, Err(Error::InvalidDescriptor { .. })));
    }

    #[test]
    fn test_subtype_on_string_is_fatal() {
        let mut tag = OptionDescriptor::string("general.tag", "x");
        tag.subtype = Some(crate::config::Subtype::Percentage);

        let err = OptionRegistry::new(vec![tag]).unwrap_err();
        assert!(err.is_schema_error());
    }

    #[test]
    fn test_empty_schema() {
        let registry = OptionRegistry::from_schema::<()>().unwrap();
        assert!(registry.is_empty());
    }
}
