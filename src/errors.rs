//! Error types for the DocStore crate
//!
//! This module contains all error types that can be returned by DocStore operations.

use config::ConfigError;
use store_object::StoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocStoreError {
    #[error("Database connection error: {0}")]
    DatabaseConnection(#[from] sqlx::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl DocStoreError {
    /// Whether the underlying operation was cancelled or ran past its deadline
    pub fn is_cancelled(&self) -> bool {
        matches!(self, DocStoreError::Store(e) if e.is_cancelled())
    }
}
