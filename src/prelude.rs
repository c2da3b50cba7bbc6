//! Convenience re-exports for common DocStore usage
//!
//! This prelude module re-exports the most commonly used items from the DocStore ecosystem,
//! making it easier to import everything you need with a single use statement.
//!
//! # Example
//!
//! ```rust
//! use docstore::prelude::*;
//!
//! let clause = equal("$.name", "foo").and(greater_than("$.age", 21));
//! assert_eq!(clause.values().len(), 2);
//! ```

// Core DocStore components
pub use crate::core::DocStore;
pub use crate::errors::DocStoreError;

// Re-export centralized config
pub use config::{AppConfig, DatabaseConfig, JournalMode, SynchronousMode};

// Re-export commonly used store-object types for convenience
pub use store_object::prelude::*;

// Re-export store_object module for macro-generated code
pub use store_object;

// Re-export table derive for record types
pub use table_derive::{model, Document};

// Common external dependencies
pub use anyhow;
pub use chrono::{DateTime, Utc};
pub use async_trait;
pub use serde_json;
pub use sqlx;
pub use tokio;
