// Persistence gateway: keyed record collections stored as pretty-printed JSON files

use std::{
    collections::BTreeMap,
    fs,
    io::{self, Write},
    marker::PhantomData,
    path::{Path, PathBuf},
};

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

pub type Records<T> = BTreeMap<String, T>;

// Error types for store I/O
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Handle on one JSON file holding a mapping from record id to record.
///
/// Nothing is cached between calls: every `load` reads the file and every
/// `save` rewrites it whole.
#[derive(Debug, Clone)]
pub struct JsonStore<T> {
    path: PathBuf,
    entity: &'static str,
    _record: PhantomData<fn() -> T>,
}

impl<T> JsonStore<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(path: impl AsRef<Path>, entity: &'static str) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            entity,
            _record: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn entity(&self) -> &'static str {
        self.entity
    }

    // A missing file is an empty collection, not an error
    pub fn try_load(&self) -> Result<Records<T>, StoreError> {
        if !self.path.exists() {
            return Ok(Records::new());
        }
        let content = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn try_save(&self, records: &Records<T>) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(records)?;
        let mut file = fs::File::create(&self.path)?;
        file.write_all(json.as_bytes())?;
        file.flush()?;
        Ok(())
    }

    /// Loads every record, reporting and masking failures with an empty map.
    pub fn load(&self) -> Records<T> {
        match self.try_load() {
            Ok(records) => records,
            Err(e) => {
                tracing::error!(
                    entity = self.entity,
                    path = %self.path.display(),
                    error = %e,
                    "Error loading {} file",
                    self.entity
                );
                Records::new()
            }
        }
    }

    /// Overwrites the file with `records`. A failed write is reported and dropped.
    pub fn save(&self, records: &Records<T>) {
        if let Err(e) = self.try_save(records) {
            tracing::error!(
                entity = self.entity,
                path = %self.path.display(),
                error = %e,
                "Error saving {} file",
                self.entity
            );
        }
    }
}
