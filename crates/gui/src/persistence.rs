//! Configuration persistence over an abstract key/value storage.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::PathBuf;
use std::rc::Rc;

use shared::{ConfigPatch, Configuration, FieldError};

/// Storage key holding the serialized configuration
pub const STORAGE_KEY: &str = "car-configurator-config";

#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("storage is unavailable")]
    Unavailable,
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("no stored value under '{0}'")]
    NotFound(String),
    #[error("stored value is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("stored value is not a JSON object")]
    NotAnObject,
}

/// String key/value storage
pub trait KeyValueStorage {
    fn get(&self, key: &str) -> Result<Option<String>, PersistError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistError>;
}

/// One `<key>.json` file per key inside a directory
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Storage in the platform config directory
    pub fn in_project_dirs() -> Option<Self> {
        directories::ProjectDirs::from("com", "configurator", "car-configurator")
            .map(|dirs| Self::new(dirs.config_dir()))
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, PersistError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistError> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.path_for(key), value)?;
        Ok(())
    }
}

/// In-memory storage. Clones share the same map, so a test can keep a handle
/// while the store owns another.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    pub fn insert_raw(&self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, PersistError> {
        Ok(self.raw(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistError> {
        self.insert_raw(key, value);
        Ok(())
    }
}

/// Result of a successful load
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedConfiguration {
    /// Stored fields merged over the default
    pub config: Configuration,
    /// Stored fields that were dropped in favor of the default
    pub rejected: Vec<FieldError>,
}

/// Reads and writes the configuration under a single storage key
pub struct Persistence {
    storage: Box<dyn KeyValueStorage>,
    key: String,
}

impl Persistence {
    pub fn new(storage: Box<dyn KeyValueStorage>) -> Self {
        Self::with_key(storage, STORAGE_KEY)
    }

    pub fn with_key(storage: Box<dyn KeyValueStorage>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn save(&mut self, config: &Configuration) -> Result<(), PersistError> {
        let json = serde_json::to_string(config)?;
        self.storage.set(&self.key, &json)
    }

    /// Load the stored configuration, merging it field by field over the default
    pub fn load(&self) -> Result<LoadedConfiguration, PersistError> {
        let text = self
            .storage
            .get(&self.key)?
            .ok_or_else(|| PersistError::NotFound(self.key.clone()))?;
        let value: serde_json::Value = serde_json::from_str(&text)?;
        merge_over_default(&value)
    }
}

/// Merge a loose JSON object over [`Configuration::default`]
pub fn merge_over_default(value: &serde_json::Value) -> Result<LoadedConfiguration, PersistError> {
    let (patch, mut rejected) =
        ConfigPatch::from_json(value).map_err(|_| PersistError::NotAnObject)?;
    let mut config = Configuration::default();
    rejected.extend(config.apply(&patch));
    Ok(LoadedConfiguration { config, rejected })
}
