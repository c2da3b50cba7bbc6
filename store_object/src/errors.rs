use thiserror::Error;

use crate::cancel::CancelReason;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error in {table}.{operation}: {source}")]
    Database {
        table: String,
        operation: &'static str,
        #[source]
        source: sqlx::Error,
    },

    #[error("Serialization error in {table}.{operation}: {source}")]
    Serialization {
        table: String,
        operation: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Operation cancelled: {0}")]
    Cancelled(CancelReason),

    #[error("Failed to create index {index} for fields {fields:?}: {source}")]
    IndexCreation {
        index: String,
        fields: Vec<String>,
        #[source]
        source: Box<StoreError>,
    },

    #[error("Transaction is no longer active")]
    TransactionClosed,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Connection error: {0}")]
    Connection(#[source] sqlx::Error),
}

impl StoreError {
    /// Wrap an engine error with the table and operation that produced it
    pub fn database_operation(table: &str, operation: &'static str, source: sqlx::Error) -> Self {
        tracing::warn!(table, operation, error = %source, "database operation failed");
        Self::Database {
            table: table.to_string(),
            operation,
            source,
        }
    }

    /// Wrap an encode/decode failure with the table and operation that produced it
    pub fn serialization(table: &str, operation: &'static str, source: serde_json::Error) -> Self {
        tracing::warn!(table, operation, error = %source, "document serialization failed");
        Self::Serialization {
            table: table.to_string(),
            operation,
            source,
        }
    }

    pub fn index_creation(index: &str, fields: &[&str], source: StoreError) -> Self {
        Self::IndexCreation {
            index: index.to_string(),
            fields: fields.iter().map(|f| f.to_string()).collect(),
            source: Box::new(source),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled(_))
    }

    pub fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization { .. })
    }

    pub fn is_database(&self) -> bool {
        matches!(self, Self::Database { .. } | Self::Connection(_))
    }
}

impl From<CancelReason> for StoreError {
    fn from(reason: CancelReason) -> Self {
        Self::Cancelled(reason)
    }
}
