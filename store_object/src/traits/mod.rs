//! Traits for document storage
//!
//! This module contains the traits that bind record types to tables, define
//! the table read/write contract, and abstract statement execution over a
//! pool or an open transaction.

pub mod core;
pub mod document;
pub mod executor;

pub use self::core::StoreObject;
pub use document::{table_name, Document};
pub use executor::{DocumentExecutor, Statement};
