//! # DocStore
//!
//! A typed JSON document store on SQLite. Each record type is bound to its own
//! table holding one JSON document per row; predicates are built from a small
//! clause algebra and rendered to parameterized SQL over `data->>'<path>'` extraction.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use docstore::prelude::*;
//!
//! #[model]
//! pub struct User {
//!     pub id: i64,
//!     pub name: String,
//!     pub tags: Vec<String>,
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = DocStore::new(DatabaseConfig::new("./app.db")).await?;
//!     let ctx = Context::background();
//!
//!     let users = store.table::<User>(&ctx).await?;
//!     users.create_index(&ctx, &["$.name"]).await?;
//!
//!     users
//!         .insert(&ctx, &User { id: 1, name: "John Doe".to_string(), tags: vec!["admin".to_string()] })
//!         .await?;
//!
//!     let admins = users.query_many(&ctx, &contains("$.tags", "admin")).await?;
//!     println!("Found {} admins", admins.len());
//!
//!     store.close().await;
//!     Ok(())
//! }
//! ```

/// Conditional debug logging macros
/// These macros only compile in code when the `debug-logging` feature is enabled
#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        tracing::trace!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {};
}

pub mod core;
pub mod errors;
pub mod prelude;

// Re-export the main public types for convenience
pub use self::core::DocStore;
pub use errors::DocStoreError;

// Re-export centralized config
pub use config::{AppConfig, DatabaseConfig, JournalMode, SynchronousMode};

// Re-export internal crates used by macros and public API
// These MUST be public for the generated macro code to work correctly
pub use store_object;
pub use table_derive;

// Re-export external dependencies used in public API
pub use sqlx;
pub use async_trait;
