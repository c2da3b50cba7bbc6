//! Convenience re-exports for common store-object usage

// Core traits
pub use crate::traits::{table_name, Document, DocumentExecutor, Statement, StoreObject};

// Error types
pub use crate::errors::StoreError;

// Tables, connections and cancellation
pub use crate::cancel::{CancelReason, CancellationToken, Context};
pub use crate::connection::{Connection, Transaction};
pub use crate::generic_store::{Table, TableTx};
pub use crate::item::Item;

// Query building
pub use crate::query_builder::{
    all, and, between, contains, contains_all, contains_any, equal, greater_than,
    greater_than_or_equal, in_values, less_than, less_than_or_equal, like, not_equal, or, Clause,
    Pagination,
};

// Common external dependencies that are frequently used
pub use async_trait::async_trait;
pub use serde::{Deserialize, Serialize};
pub use sqlx::SqlitePool;
