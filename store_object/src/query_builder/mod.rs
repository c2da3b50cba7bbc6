//! Query builder utilities
//!
//! This module provides the predicate algebra and its SQL rendering.

pub mod binding;
pub mod filter;
pub mod pagination;
pub mod sql_generation;


pub use binding::bind_values;
pub use filter::{
    all, and, between, contains, contains_all, contains_any, equal, greater_than,
    greater_than_or_equal, in_values, less_than, less_than_or_equal, like, not_equal, or, Clause,
    Combinator, ComparisonOperator,
};
pub use pagination::Pagination;
pub use sql_generation::{json_field, SqlGenerator, DOCUMENT_COLUMN};
