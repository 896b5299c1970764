// Store configuration: where the three record files live on disk

use std::path::{Path, PathBuf};

pub const DATA_DIR_ENV: &str = "HOTEL_DATA_DIR";

// File locations for the customer, hotel and reservation stores
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub data_dir: PathBuf,
    pub customers_file: String,
    pub hotels_file: String,
    pub reservations_file: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            customers_file: "customers.json".to_string(),
            hotels_file: "hotels.json".to_string(),
            reservations_file: "reservations.json".to_string(),
        }
    }
}

impl StoreConfig {
    // Default file names placed under the given directory
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            data_dir: dir.as_ref().to_path_buf(),
            ..Default::default()
        }
    }

    /// Reads the data directory from `HOTEL_DATA_DIR`, falling back to the
    /// current directory when the variable is unset or empty.
    pub fn from_env() -> Self {
        match std::env::var(DATA_DIR_ENV) {
            Ok(dir) if !dir.trim().is_empty() => Self::in_dir(dir),
            _ => Self::default(),
        }
    }

    pub fn customers_path(&self) -> PathBuf {
        self.data_dir.join(&self.customers_file)
    }

    pub fn hotels_path(&self) -> PathBuf {
        self.data_dir.join(&self.hotels_file)
    }

    pub fn reservations_path(&self) -> PathBuf {
        self.data_dir.join(&self.reservations_file)
    }
}
