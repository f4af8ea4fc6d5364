use std::fmt;

pub mod config;
pub mod database;
mod data_manager;

pub use data_manager::*;

#[derive(Debug)]
pub enum TripStoreError {
    Database(String),
    Config(String),
}

impl fmt::Display for TripStoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TripStoreError::Database(msg) => write!(f, "database error: {msg}"),
            TripStoreError::Config(msg) => write!(f, "config error: {msg}"),
        }
    }
}

impl std::error::Error for TripStoreError {}
