use crate::config::EngineConfig;
use crate::error::{Error, Result};
use crate::source::ValueDocument;
use crate::storage::StorageBackend;
use log::{debug, warn};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Discovers the base document and override documents in one directory
///
/// The base document is `<base_file>.<ext>`. Every other `*.<ext>` file in
/// the directory is an override candidate, returned in lexical file-name
/// order so later files win ties the same way on every run.
pub struct DirectorySource<S: StorageBackend> {
    dir: PathBuf,
    base_file: String,
    storage: S,
}

impl<S: StorageBackend> DirectorySource<S> {
    pub fn new(dir: impl Into<PathBuf>, base_file: impl Into<String>, storage: S) -> Self {
        Self {
            dir: dir.into(),
            base_file: base_file.into(),
            storage,
        }
    }

    /// Create a source for the directory and format named by an engine config
    pub fn from_config(config: &EngineConfig<S>) -> Self {
        Self::new(
            config.config_dir.clone(),
            config.base_file.clone(),
            config.storage.clone(),
        )
    }

    fn base_file_name(&self) -> String {
        format!("{}.{}", self.base_file, self.storage.extension())
    }

    pub fn base_path(&self) -> PathBuf {
        self.dir.join(self.base_file_name())
    }

    /// File names of the override candidates, sorted
    ///
    /// # Errors
    ///
    /// Returns `Error::DirectoryRead` if the directory cannot be listed.
    pub fn override_names(&self) -> Result<Vec<String>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let base = self.base_file_name();
        let ext = format!(".{}", self.storage.extension());
        let mut names = Vec::new();

        for entry in std::fs::read_dir(&self.dir).map_err(|e| Error::DirectoryRead {
            path: self.dir.clone(),
            source: e,
        })? {
            let entry = entry.map_err(|e| Error::DirectoryRead {
                path: self.dir.clone(),
                source: e,
            })?;
            if !entry.path().is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().to_string();
            if name.ends_with(&ext) && name != base {
                names.push(name);
            }
        }

        names.sort();
        Ok(names)
    }

    /// Read the base document followed by every override candidate
    ///
    /// Override files that fail to parse are logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns `Error::MissingBaseDocument` if the base file does not exist,
    /// or the read/parse error of the base file.
    pub fn load(&self) -> Result<Vec<ValueDocument>> {
        let base_path = self.base_path();
        if !base_path.is_file() {
            return Err(Error::MissingBaseDocument(base_path.display().to_string()));
        }

        let mut documents = vec![self.read_document(&base_path)?];

        for name in self.override_names()? {
            let path = self.dir.join(&name);
            match self.read_document(&path) {
                Ok(doc) => documents.push(doc),
                Err(e) => warn!("Skipping unreadable configuration file {name}: {e}"),
            }
        }

        debug!(
            "Discovered {} configuration documents in {}",
            documents.len(),
            self.dir.display()
        );
        Ok(documents)
    }

    fn read_document(&self, path: &Path) -> Result<ValueDocument> {
        let root: Value = self.storage.read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        Ok(ValueDocument::new(name, root))
    }
}
