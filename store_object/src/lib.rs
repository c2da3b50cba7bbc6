//! Store Object - Core document storage layer for DocStore
//!
//! This crate provides the predicate algebra and its SQL rendering, table and
//! index naming, the SQLite connection façade, and the generic table and
//! transactional table view built on top of them.

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

pub mod cancel;
pub mod connection;
pub mod errors;
pub mod generic_store;
pub mod item;
pub mod naming;
pub mod prelude;
pub mod query_builder;
pub mod traits;

pub use cancel::{CancelReason, CancellationToken, Context};
pub use connection::{Connection, Transaction};
pub use errors::StoreError;
pub use generic_store::{Table, TableTx};
pub use item::Item;
pub use naming::ValidationError;
pub use query_builder::{Clause, Combinator, ComparisonOperator, Pagination};
pub use traits::{table_name, Document, DocumentExecutor, Statement, StoreObject};

pub type DbPool = sqlx::SqlitePool;
