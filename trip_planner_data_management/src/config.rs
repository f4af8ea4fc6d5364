use std::path::PathBuf;

use crate::TripStoreError;

/// Environment variable naming the database file, optionally supplied
/// through a `.env` file next to the working directory.
pub const DB_FILE_VAR: &str = "DB_FILE";

#[derive(Debug, Clone)]
pub enum DatabaseLocation {
    File(PathBuf),
    InMemory,
}

/// Explicit store configuration. Constructed directly for isolated
/// instances (tests use [`StoreConfig::in_memory`]) or from the process
/// environment for deployments.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub database: DatabaseLocation,
}

impl StoreConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        StoreConfig {
            database: DatabaseLocation::File(path.into()),
        }
    }

    pub fn in_memory() -> Self {
        StoreConfig {
            database: DatabaseLocation::InMemory,
        }
    }

    /// Reads `DB_FILE` from the environment, loading a `.env` file first
    /// if one exists. A missing `.env` is fine; a missing `DB_FILE` is not.
    pub fn from_env() -> Result<Self, TripStoreError> {
        match dotenvy::dotenv() {
            Ok(path) => tracing::debug!(path = %path.display(), "loaded env file"),
            Err(dotenvy::Error::Io(_)) => {}
            Err(err) => {
                return Err(TripStoreError::Config(format!("failed to parse .env: {err}")));
            }
        }

        let path = std::env::var(DB_FILE_VAR)
            .map_err(|_| TripStoreError::Config(format!("{DB_FILE_VAR} is not set")))?;

        Ok(StoreConfig::new(path))
    }
}
